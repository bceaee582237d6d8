//! Injectable mock data.
//!
//! The storefront has no backend: the product catalog, the login table, the
//! decline card and the verification code are all fixture data. [`Fixtures`]
//! bundles them so tests and deployments can substitute their own without
//! touching the transition logic.
//!
//! Fixtures can be loaded from JSON. Every top-level key is optional and falls
//! back to the built-in demo data:
//!
//! ```json
//! {
//!   "products": [{ "id": 1, "name": "笔记本电脑", "price": { "amount": "8999" } }],
//!   "credentials": {
//!     "accounts": [{ "username": "testuser@example.com", "password": "password123" }],
//!     "known_invalid": [{ "username": "invalid@example.com", "password": "wrongpassword" }]
//!   },
//!   "decline_card": "4000000000000002",
//!   "verification_code": "123456"
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::feedback::ControllerError;
use crate::session::SessionUser;
use crate::types::{Email, Price, ProductId};

/// Errors that can occur when loading [`Fixtures`].
#[derive(Debug, thiserror::Error)]
pub enum FixturesError {
    #[error("invalid fixtures JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate product id {0} in catalog")]
    DuplicateProduct(ProductId),

    #[error("fixture value `{0}` must not be empty")]
    EmptyValue(&'static str),
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
}

/// Read-only mapping of product id to product, iterated in id order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Product>", into = "Vec<Product>")]
pub struct ProductCatalog {
    products: BTreeMap<ProductId, Product>,
}

impl ProductCatalog {
    /// Look up a product.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Iterate products in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl TryFrom<Vec<Product>> for ProductCatalog {
    type Error = FixturesError;

    fn try_from(list: Vec<Product>) -> Result<Self, Self::Error> {
        let mut products = BTreeMap::new();
        for product in list {
            let id = product.id;
            if products.insert(id, product).is_some() {
                return Err(FixturesError::DuplicateProduct(id));
            }
        }
        Ok(Self { products })
    }
}

impl From<ProductCatalog> for Vec<Product> {
    fn from(catalog: ProductCatalog) -> Self {
        catalog.products.into_values().collect()
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        let products = [
            (1, "笔记本电脑", 8999),
            (2, "智能手机", 4999),
            (3, "无线耳机", 1299),
        ]
        .into_iter()
        .map(|(id, name, price)| {
            (
                ProductId::new(id),
                Product {
                    id: ProductId::new(id),
                    name: name.to_string(),
                    price: Price::yuan(price),
                },
            )
        })
        .collect();

        Self { products }
    }
}

/// A login the demo accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoAccount {
    pub username: Email,
    pub password: String,
    /// Display name; defaults to the local part of the username.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A login that is rejected with the specific "Invalid credentials" message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownInvalidLogin {
    pub username: String,
    pub password: String,
}

/// Closed list of credential pairs. There is no hashing and no lookup
/// beyond exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialTable {
    pub accounts: Vec<DemoAccount>,
    #[serde(default)]
    pub known_invalid: Vec<KnownInvalidLogin>,
}

impl CredentialTable {
    /// Check a non-empty username/password pair against the table.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::InvalidCredentials`] for a known-invalid
    /// pair and [`ControllerError::WrongUsernameOrPassword`] for anything else
    /// not in the accepted list.
    pub fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<SessionUser, ControllerError> {
        if let Some(account) = self
            .accounts
            .iter()
            .find(|a| a.username.as_str() == username && a.password == password)
        {
            let mut user = SessionUser::from_email(account.username.clone());
            if let Some(name) = &account.display_name {
                user.name.clone_from(name);
            }
            return Ok(user);
        }

        if self
            .known_invalid
            .iter()
            .any(|l| l.username == username && l.password == password)
        {
            return Err(ControllerError::InvalidCredentials);
        }

        Err(ControllerError::WrongUsernameOrPassword)
    }

    /// The user pre-populated at startup: the first accepted account.
    #[must_use]
    pub fn default_user(&self) -> Option<SessionUser> {
        self.accounts.first().map(|account| {
            let mut user = SessionUser::from_email(account.username.clone());
            if let Some(name) = &account.display_name {
                user.name.clone_from(name);
            }
            user
        })
    }
}

impl Default for CredentialTable {
    fn default() -> Self {
        Self {
            accounts: vec![DemoAccount {
                username: Email::parse("testuser@example.com")
                    .unwrap_or_else(|_| unreachable!("literal email is valid")),
                password: "password123".to_string(),
                display_name: None,
            }],
            known_invalid: vec![KnownInvalidLogin {
                username: "invalid@example.com".to_string(),
                password: "wrongpassword".to_string(),
            }],
        }
    }
}

/// All mock data the storefront runs against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fixtures {
    #[serde(rename = "products")]
    pub catalog: ProductCatalog,
    pub credentials: CredentialTable,
    /// Card number that always declines.
    pub decline_card: String,
    /// The only verification code accepted at onboarding step 4.
    pub verification_code: String,
}

impl Default for Fixtures {
    fn default() -> Self {
        Self {
            catalog: ProductCatalog::default(),
            credentials: CredentialTable::default(),
            decline_card: "4000000000000002".to_string(),
            verification_code: "123456".to_string(),
        }
    }
}

impl Fixtures {
    /// Parse fixtures from JSON, filling omitted keys with the demo defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, the catalog repeats an id,
    /// or a magic value is empty (an empty decline card or verification code
    /// would collide with the empty-field checks).
    pub fn from_json(json: &str) -> Result<Self, FixturesError> {
        let fixtures: Self = serde_json::from_str(json)?;
        fixtures.validate()?;
        Ok(fixtures)
    }

    fn validate(&self) -> Result<(), FixturesError> {
        if self.decline_card.is_empty() {
            return Err(FixturesError::EmptyValue("decline_card"));
        }
        if self.verification_code.is_empty() {
            return Err(FixturesError::EmptyValue("verification_code"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = ProductCatalog::default();
        assert_eq!(catalog.len(), 3);
        let phone = catalog.get(ProductId::new(2)).unwrap();
        assert_eq!(phone.name, "智能手机");
        assert_eq!(phone.price, Price::yuan(4999));
        assert!(catalog.get(ProductId::new(4)).is_none());
    }

    #[test]
    fn test_authenticate_accepted() {
        let table = CredentialTable::default();
        let user = table
            .authenticate("testuser@example.com", "password123")
            .unwrap();
        assert_eq!(user.name, "testuser");
        assert_eq!(user.email.as_str(), "testuser@example.com");
    }

    #[test]
    fn test_authenticate_known_invalid() {
        let table = CredentialTable::default();
        assert_eq!(
            table.authenticate("invalid@example.com", "wrongpassword"),
            Err(ControllerError::InvalidCredentials)
        );
    }

    #[test]
    fn test_authenticate_other() {
        let table = CredentialTable::default();
        assert_eq!(
            table.authenticate("testuser@example.com", "wrong"),
            Err(ControllerError::WrongUsernameOrPassword)
        );
        assert_eq!(
            table.authenticate("invalid@example.com", "password123"),
            Err(ControllerError::WrongUsernameOrPassword)
        );
    }

    #[test]
    fn test_from_json_partial_override() {
        let fixtures = Fixtures::from_json(
            r#"{
                "products": [{ "id": 7, "name": "键盘", "price": { "amount": "199" } }],
                "verification_code": "000000"
            }"#,
        )
        .unwrap();

        assert_eq!(fixtures.catalog.len(), 1);
        assert_eq!(
            fixtures.catalog.get(ProductId::new(7)).unwrap().price,
            Price::yuan(199)
        );
        assert_eq!(fixtures.verification_code, "000000");
        assert_eq!(fixtures.decline_card, "4000000000000002");
        assert_eq!(fixtures.credentials, CredentialTable::default());
    }

    #[test]
    fn test_from_json_display_name() {
        let fixtures = Fixtures::from_json(
            r#"{ "credentials": { "accounts": [
                { "username": "qa@example.com", "password": "pw", "display_name": "QA" }
            ] } }"#,
        )
        .unwrap();

        let user = fixtures.credentials.authenticate("qa@example.com", "pw").unwrap();
        assert_eq!(user.name, "QA");
        assert_eq!(fixtures.credentials.default_user(), Some(user));
    }

    #[test]
    fn test_from_json_rejects_duplicates() {
        let err = Fixtures::from_json(
            r#"{ "products": [
                { "id": 1, "name": "a", "price": { "amount": "1" } },
                { "id": 1, "name": "b", "price": { "amount": "2" } }
            ] }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate product id 1"));
    }

    #[test]
    fn test_from_json_rejects_empty_magic_values() {
        let err = Fixtures::from_json(r#"{ "decline_card": "" }"#).unwrap_err();
        assert!(matches!(err, FixturesError::EmptyValue("decline_card")));
    }
}
