//! Errors and notices surfaced to the visitor.
//!
//! Nothing here is fatal. Every failed operation leaves the view in a visible,
//! re-enterable state; the [`ErrorSlot`] says where the renderer shows it.

use core::fmt;

use crate::types::ProductId;

/// A form field that carries its own inline error indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Username,
    Password,
    FirstName,
    Email,
}

impl Field {
    /// The `data-testid` of the inline error element for this field.
    #[must_use]
    pub const fn error_testid(&self) -> &'static str {
        match self {
            Self::Username => "username-error",
            Self::Password => "password-error",
            Self::FirstName => "first-name-error",
            Self::Email => "email-error",
        }
    }

    /// Inline error text.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Username => "请输入用户名",
            Self::Password => "请输入密码",
            Self::FirstName => "请输入名字",
            Self::Email => "请输入邮箱",
        }
    }
}

/// Where an error is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSlot {
    /// Per-field inline indicators.
    Inline,
    /// The shared `error-message` element on the login page.
    Message,
    /// The `payment-error` panel on the checkout page.
    Payment,
    /// A blocking alert.
    Alert,
}

/// Failure of a [`ViewController`](crate::ViewController) operation.
///
/// The `Display` text is exactly what the visitor sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    /// One or more required fields were empty.
    #[error("{}", missing_fields_text(.0))]
    MissingFields(Vec<Field>),

    /// The known-bad demo login was used.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Any other login that is not in the credential table.
    #[error("用户名或密码错误")]
    WrongUsernameOrPassword,

    #[error("密码不匹配")]
    PasswordMismatch,

    #[error("验证码错误")]
    WrongVerificationCode,

    #[error("请填写完整的配送信息")]
    IncompleteShipping,

    #[error("请填写完整的支付信息")]
    IncompletePayment,

    #[error("请填写完整的个人资料")]
    IncompleteProfile,

    /// The decline card was used.
    #[error("Payment failed")]
    PaymentDeclined,

    #[error("商品不存在: {0}")]
    UnknownProduct(ProductId),

    #[error("购物车中没有第 {} 项 (共 {len} 项)", .index + 1)]
    CartIndexOutOfRange {
        /// Zero-based index that was requested.
        index: usize,
        /// Cart length at the time of the request.
        len: usize,
    },

    #[error("偏好选项不存在: {0}")]
    UnknownPreference(u8),
}

fn missing_fields_text(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::message)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ControllerError {
    /// Where this error is shown.
    #[must_use]
    pub const fn slot(&self) -> ErrorSlot {
        match self {
            Self::MissingFields(_) => ErrorSlot::Inline,
            Self::InvalidCredentials | Self::WrongUsernameOrPassword => ErrorSlot::Message,
            Self::PaymentDeclined => ErrorSlot::Payment,
            _ => ErrorSlot::Alert,
        }
    }

    /// Fields with inline errors, empty for every other kind of error.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        match self {
            Self::MissingFields(fields) => fields,
            _ => &[],
        }
    }
}

/// Informational feedback from a successful operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Sign-up accepted; a verification mail is (notionally) on its way.
    SignupComplete,
    /// A product was appended to the cart.
    AddedToCart {
        /// Name of the product.
        name: String,
    },
    ShippingSaved,
    ProfileSaved,
    /// A catalog search was submitted.
    SearchSubmitted {
        /// The search term as typed.
        term: String,
    },
    /// Skipping onboarding needs an explicit confirmation.
    ConfirmSkip,
}

impl Notice {
    /// The `data-testid` of the element that renders this notice.
    #[must_use]
    pub const fn testid(&self) -> &'static str {
        match self {
            Self::SignupComplete => "verification-sent",
            Self::ConfirmSkip => "confirm-skip-dialog",
            _ => "notice",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SignupComplete => f.write_str("注册成功！验证邮件已发送"),
            Self::AddedToCart { name } => write!(f, "{name} 已添加到购物车"),
            Self::ShippingSaved => f.write_str("配送信息已保存"),
            Self::ProfileSaved => f.write_str("资料已保存"),
            Self::SearchSubmitted { term } => write!(f, "搜索: {term}"),
            Self::ConfirmSkip => f.write_str("确定要跳过引导设置吗？"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_messages_are_exact() {
        assert_eq!(ControllerError::InvalidCredentials.to_string(), "Invalid credentials");
        assert_eq!(
            ControllerError::WrongUsernameOrPassword.to_string(),
            "用户名或密码错误"
        );
        assert_eq!(ControllerError::PaymentDeclined.to_string(), "Payment failed");
    }

    #[test]
    fn test_slots() {
        assert_eq!(
            ControllerError::MissingFields(vec![Field::Username]).slot(),
            ErrorSlot::Inline
        );
        assert_eq!(ControllerError::InvalidCredentials.slot(), ErrorSlot::Message);
        assert_eq!(ControllerError::PaymentDeclined.slot(), ErrorSlot::Payment);
        assert_eq!(ControllerError::PasswordMismatch.slot(), ErrorSlot::Alert);
    }

    #[test]
    fn test_out_of_range_is_one_based_in_text() {
        let err = ControllerError::CartIndexOutOfRange { index: 2, len: 1 };
        assert_eq!(err.to_string(), "购物车中没有第 3 项 (共 1 项)");
    }

    #[test]
    fn test_fields_only_for_missing_fields() {
        let err = ControllerError::MissingFields(vec![Field::FirstName, Field::Email]);
        assert_eq!(err.fields(), &[Field::FirstName, Field::Email]);
        assert!(ControllerError::IncompletePayment.fields().is_empty());
    }

    #[test]
    fn test_notice_text() {
        let notice = Notice::AddedToCart {
            name: "无线耳机".to_string(),
        };
        assert_eq!(notice.to_string(), "无线耳机 已添加到购物车");
        assert_eq!(Notice::SignupComplete.testid(), "verification-sent");
    }
}
