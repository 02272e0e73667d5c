//! Registration and login form controllers.

use tracing::{info, instrument};

use super::{ControllerContext, FormController, FormData, FormId, FormOutcome, fields};
use crate::controllers::feedback::Feedback;
use crate::controllers::navigation::Navigation;
use crate::error::SiteError;
use crate::models::User;
use crate::services::{AuthService, RegisterOutcome};
use crate::validation::{RegistrationInput, validate_registration};

/// Shown after a successful login, before the redirect.
pub const LOGIN_SUCCESS: &str = "Đăng nhập thành công! Chuyển hướng...";

/// Shown when no account matches the submitted credentials.
pub const LOGIN_FAILED: &str = "Tên đăng nhập hoặc mật khẩu không chính xác";

/// First line of the registration success message.
pub const REGISTER_SUCCESS: &str = "Đăng ký thành công!";

/// Handles `register-form`.
#[derive(Debug, Default)]
pub struct RegisterController;

impl FormController for RegisterController {
    fn form(&self) -> FormId {
        FormId::Register
    }

    #[instrument(skip_all, name = "register_form")]
    fn handle(&self, ctx: &ControllerContext<'_>, form: &FormData) -> Result<FormOutcome, SiteError> {
        let input = RegistrationInput {
            username: form.get(fields::USERNAME).trim(),
            password: form.get(fields::PASSWORD),
            confirm_password: form.get(fields::CONFIRM_PASSWORD),
            email: form.get(fields::EMAIL).trim(),
            fullname: form.get(fields::FULLNAME).trim(),
        };

        if let Err(e) = validate_registration(&input) {
            info!(reason = ?e, "Registration form rejected");
            return Ok(FormOutcome::error(e.to_string()));
        }

        let user = User::new(input.username, input.password, input.email, input.fullname);

        match AuthService::new(ctx.storage).register(user)? {
            RegisterOutcome::Success => Ok(FormOutcome {
                feedback: Some(Feedback::success([
                    REGISTER_SUCCESS.to_string(),
                    format!("Tên đăng nhập: {}", input.username),
                    format!("Email: {}", input.email),
                    format!("Tên: {}", input.fullname),
                ])),
                navigation: None,
                reset_form: true,
            }),
            outcome @ RegisterOutcome::DuplicateUsername => Ok(FormOutcome::error(outcome.message())),
        }
    }
}

/// Handles `login-form`.
#[derive(Debug, Default)]
pub struct LoginController;

impl FormController for LoginController {
    fn form(&self) -> FormId {
        FormId::Login
    }

    #[instrument(skip_all, name = "login_form")]
    fn handle(&self, ctx: &ControllerContext<'_>, form: &FormData) -> Result<FormOutcome, SiteError> {
        let auth = AuthService::new(ctx.storage);

        // Credentials are compared exactly as typed.
        let Some(user) = auth.login(form.get(fields::USERNAME), form.get(fields::PASSWORD))? else {
            return Ok(FormOutcome::error(LOGIN_FAILED));
        };

        auth.set_current_user(&user)?;
        info!(username = %user.username, "User logged in");

        Ok(FormOutcome {
            feedback: Some(Feedback::success([LOGIN_SUCCESS])),
            navigation: Some(Navigation::Delayed {
                target: ctx.config.landing_page.clone(),
                delay: ctx.config.login_redirect_delay,
            }),
            reset_form: false,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::SiteConfig;
    use crate::seed::initialize;
    use crate::store::Storage;
    use crate::validation::RegistrationError;

    fn seeded() -> Storage {
        let storage = Storage::in_memory();
        initialize(&storage).unwrap();
        storage
    }

    fn registration() -> FormData {
        FormData::new()
            .with(fields::USERNAME, "  alice_01 ")
            .with(fields::PASSWORD, "secret1")
            .with(fields::CONFIRM_PASSWORD, "secret1")
            .with(fields::EMAIL, " alice@example.com ")
            .with(fields::FULLNAME, " Alice Nguyen ")
    }

    #[test]
    fn test_register_success_trims_and_stores() {
        let storage = seeded();
        let config = SiteConfig::default();
        let ctx = ControllerContext::new(&storage, &config);

        let outcome = RegisterController.handle(&ctx, &registration()).unwrap();

        let feedback = outcome.feedback.unwrap();
        assert!(feedback.is_success());
        assert_eq!(
            feedback.lines,
            vec![
                "Đăng ký thành công!",
                "Tên đăng nhập: alice_01",
                "Email: alice@example.com",
                "Tên: Alice Nguyen",
            ]
        );
        assert!(outcome.reset_form);
        assert_eq!(outcome.navigation, None);

        let users = AuthService::new(&storage).users().unwrap();
        assert_eq!(
            users,
            vec![User::new("alice_01", "secret1", "alice@example.com", "Alice Nguyen")]
        );
    }

    #[test]
    fn test_register_password_is_not_trimmed() {
        let storage = seeded();
        let config = SiteConfig::default();
        let ctx = ControllerContext::new(&storage, &config);

        let form = registration()
            .with(fields::PASSWORD, " secret1")
            .with(fields::CONFIRM_PASSWORD, "secret1");
        let outcome = RegisterController.handle(&ctx, &form).unwrap();

        assert_eq!(
            outcome.feedback.unwrap().text(),
            RegistrationError::PasswordMismatch.to_string()
        );
    }

    #[test]
    fn test_register_validation_failure_changes_nothing() {
        let storage = seeded();
        let config = SiteConfig::default();
        let ctx = ControllerContext::new(&storage, &config);

        let form = registration().with(fields::EMAIL, "alice@example");
        let outcome = RegisterController.handle(&ctx, &form).unwrap();

        let feedback = outcome.feedback.unwrap();
        assert!(!feedback.is_success());
        assert_eq!(feedback.text(), "Email không hợp lệ");
        assert!(!outcome.reset_form);
        assert!(AuthService::new(&storage).users().unwrap().is_empty());
    }

    #[test]
    fn test_register_duplicate() {
        let storage = seeded();
        let config = SiteConfig::default();
        let ctx = ControllerContext::new(&storage, &config);

        RegisterController.handle(&ctx, &registration()).unwrap();
        let outcome = RegisterController.handle(&ctx, &registration()).unwrap();

        assert_eq!(outcome.feedback.unwrap().text(), "Tên đăng nhập đã tồn tại");
        assert!(!outcome.reset_form);
        assert_eq!(AuthService::new(&storage).users().unwrap().len(), 1);
    }

    #[test]
    fn test_login_success_sets_current_user_and_redirects() {
        let storage = seeded();
        let config = SiteConfig::default();
        let ctx = ControllerContext::new(&storage, &config);
        RegisterController.handle(&ctx, &registration()).unwrap();

        let form = FormData::new()
            .with(fields::USERNAME, "alice_01")
            .with(fields::PASSWORD, "secret1");
        let outcome = LoginController.handle(&ctx, &form).unwrap();

        assert_eq!(outcome.feedback.unwrap().text(), LOGIN_SUCCESS);
        assert_eq!(
            outcome.navigation,
            Some(Navigation::Delayed {
                target: "index.html".to_string(),
                delay: Duration::from_millis(1500),
            })
        );

        let current = AuthService::new(&storage).current_user().unwrap().unwrap();
        assert_eq!(current.username, "alice_01");
    }

    #[test]
    fn test_login_does_not_trim() {
        let storage = seeded();
        let config = SiteConfig::default();
        let ctx = ControllerContext::new(&storage, &config);
        RegisterController.handle(&ctx, &registration()).unwrap();

        let form = FormData::new()
            .with(fields::USERNAME, " alice_01")
            .with(fields::PASSWORD, "secret1");
        let outcome = LoginController.handle(&ctx, &form).unwrap();

        assert_eq!(outcome.feedback.unwrap().text(), LOGIN_FAILED);
        assert_eq!(outcome.navigation, None);
        assert_eq!(AuthService::new(&storage).current_user().unwrap(), None);
    }
}
