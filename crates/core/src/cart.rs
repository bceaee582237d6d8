//! Cart lines and totals.

use serde::{Deserialize, Serialize};

use crate::feedback::ControllerError;
use crate::fixtures::Product;
use crate::types::{Price, ProductId};

/// One catalog item copied into the cart with its price at add time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
}

impl From<&Product> for CartLine {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
        }
    }
}

/// Ordered cart contents. Insertion order is display order and the same
/// product may appear more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Append a line for `product`.
    pub fn push(&mut self, product: &Product) {
        self.lines.push(CartLine::from(product));
    }

    /// Remove the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::CartIndexOutOfRange`] and leaves the cart
    /// untouched if `index` is not a current line.
    pub fn remove(&mut self, index: usize) -> Result<CartLine, ControllerError> {
        if index >= self.lines.len() {
            return Err(ControllerError::CartIndexOutOfRange {
                index,
                len: self.lines.len(),
            });
        }
        Ok(self.lines.remove(index))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Take every line out, leaving the cart empty.
    pub fn drain(&mut self) -> Vec<CartLine> {
        std::mem::take(&mut self.lines)
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line prices; zero for an empty cart.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(|line| line.price).sum()
    }

    /// Project the cart for display.
    #[must_use]
    pub fn view(&self) -> CartView {
        CartView {
            items: self
                .lines
                .iter()
                .enumerate()
                .map(|(index, line)| CartItemView {
                    index,
                    name: line.name.clone(),
                    price: line.price,
                })
                .collect(),
            total: self.total(),
            count: self.lines.len(),
        }
    }
}

/// One rendered cart row; `index` is what the remove button sends back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub index: usize,
    pub name: String,
    pub price: Price,
}

/// Display projection of a [`Cart`]. Holds no state of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: Price,
    pub count: usize,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::fixtures::ProductCatalog;

    fn product(id: u32) -> Product {
        ProductCatalog::default()
            .get(ProductId::new(id))
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut cart = Cart::default();
        cart.push(&product(3));
        cart.push(&product(1));
        cart.push(&product(3));

        let ids: Vec<u32> = cart.lines().iter().map(|l| l.product_id.as_u32()).collect();
        assert_eq!(ids, vec![3, 1, 3]);
        assert_eq!(cart.total(), Price::yuan(1299 + 8999 + 1299));
    }

    #[test]
    fn test_remove_middle() {
        let mut cart = Cart::default();
        for id in [1, 2, 3] {
            cart.push(&product(id));
        }

        let removed = cart.remove(1).unwrap();
        assert_eq!(removed.name, "智能手机");
        assert_eq!(cart.total(), Price::yuan(8999 + 1299));
    }

    #[test]
    fn test_remove_only_item_totals_zero() {
        let mut cart = Cart::default();
        cart.push(&product(2));
        cart.remove(0).unwrap();
        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut cart = Cart::default();
        cart.push(&product(1));
        assert_eq!(
            cart.remove(1),
            Err(ControllerError::CartIndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_view_indexes_rows() {
        let mut cart = Cart::default();
        cart.push(&product(1));
        cart.push(&product(2));

        let view = cart.view();
        assert_eq!(view.count, 2);
        assert_eq!(view.items[1].index, 1);
        assert_eq!(view.items[1].name, "智能手机");
        assert_eq!(view.total, Price::yuan(13998));
    }
}
