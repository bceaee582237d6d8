//! Login, sign-up and logout flows.

use demo_shop_integration_tests::{TestContext, TestError};
use reqwest::StatusCode;

#[tokio::test]
async fn test_first_visit_shows_login_page() -> Result<(), TestError> {
    let ctx = TestContext::new().await?;
    let page = ctx.get("/").await?;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.is_visible("login-page"));
    assert!(!page.is_visible("dashboard-page"));
    assert!(page.has_testid("login-button"));
    assert_eq!(page.testid_text("cart-count"), Some("0"));
    Ok(())
}

#[tokio::test]
async fn test_successful_login() -> Result<(), TestError> {
    let ctx = TestContext::new().await?;
    ctx.get("/").await?;

    let page = ctx
        .post(
            "/auth/login",
            &[("username", "testuser@example.com"), ("password", "password123")],
        )
        .await?;

    assert!(page.is_visible("dashboard-page"));
    assert!(page.has_testid("welcome-message"));
    assert!(page.body.contains(r#"<span id="user-name">testuser</span>"#));
    assert!(page.body.contains(r#"<span id="user-email">testuser@example.com</span>"#));
    Ok(())
}

#[tokio::test]
async fn test_invalid_credentials_message() -> Result<(), TestError> {
    let ctx = TestContext::new().await?;

    let page = ctx
        .post(
            "/auth/login",
            &[("username", "invalid@example.com"), ("password", "wrongpassword")],
        )
        .await?;

    assert!(page.is_visible("login-page"));
    assert_eq!(page.testid_text("error-message"), Some("Invalid credentials"));
    assert_eq!(page.input_value("username"), Some("invalid@example.com"));
    Ok(())
}

#[tokio::test]
async fn test_unknown_user_message() -> Result<(), TestError> {
    let ctx = TestContext::new().await?;

    let page = ctx
        .post("/auth/login", &[("username", "someone@example.com"), ("password", "x")])
        .await?;

    assert_eq!(page.testid_text("error-message"), Some("用户名或密码错误"));
    Ok(())
}

#[tokio::test]
async fn test_empty_login_shows_both_field_errors() -> Result<(), TestError> {
    let ctx = TestContext::new().await?;

    let page = ctx
        .post("/auth/login", &[("username", ""), ("password", "")])
        .await?;

    assert!(page.is_visible("login-page"));
    assert!(page.has_testid("username-error"));
    assert!(page.has_testid("password-error"));
    assert!(!page.has_testid("error-message"));
    Ok(())
}

#[tokio::test]
async fn test_signup_mismatch_then_success() -> Result<(), TestError> {
    let ctx = TestContext::new().await?;
    ctx.show_page("signup-page").await?;

    let page = ctx
        .post(
            "/auth/signup",
            &[
                ("email", "newuser@example.com"),
                ("password", "securepassword123"),
                ("confirm_password", "different"),
            ],
        )
        .await?;
    assert!(page.is_visible("signup-page"));
    assert_eq!(page.testid_text("alert"), Some("密码不匹配"));

    let page = ctx
        .post(
            "/auth/signup",
            &[
                ("email", "newuser@example.com"),
                ("password", "securepassword123"),
                ("confirm_password", "securepassword123"),
            ],
        )
        .await?;
    assert!(page.is_visible("login-page"));
    assert_eq!(page.testid_text("verification-sent"), Some("注册成功！验证邮件已发送"));
    Ok(())
}

#[tokio::test]
async fn test_logout_clears_cart() -> Result<(), TestError> {
    let ctx = TestContext::new().await?;
    ctx.post("/cart/add", &[("product_id", "1")]).await?;
    ctx.post("/cart/add", &[("product_id", "2")]).await?;

    let page = ctx.show_page("cart-page").await?;
    assert_eq!(page.testid_text("cart-count"), Some("2"));

    let page = ctx.post("/auth/logout", &[]).await?;
    assert!(page.is_visible("login-page"));
    assert_eq!(page.testid_text("cart-count"), Some("0"));

    let page = ctx.show_page("dashboard-page").await?;
    assert!(page.body.contains(r#"<span id="user-name"></span>"#));
    Ok(())
}

#[tokio::test]
async fn test_unknown_page_is_not_found() -> Result<(), TestError> {
    let ctx = TestContext::new().await?;
    let page = ctx.show_page("admin-page").await?;
    assert_eq!(page.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_visits_are_isolated() -> Result<(), TestError> {
    let first = TestContext::new().await?;
    first.post("/cart/add", &[("product_id", "3")]).await?;

    let second_client = reqwest::Client::builder().cookie_store(true).build()?;
    let body = second_client
        .get(first.url("/pages/cart-page"))
        .send()
        .await?
        .text()
        .await?;
    assert!(body.contains(r#"data-testid="cart-count">0<"#));

    let page = first.show_page("cart-page").await?;
    assert_eq!(page.testid_text("cart-count"), Some("1"));
    Ok(())
}
