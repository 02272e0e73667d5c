//! Form field validation.
//!
//! The predicates are pure; [`validate_registration`] applies them in the
//! order the registration form reports failures.

use thiserror::Error;

use sample_site_core::{Email, Username};

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Returns `true` if `s` has the shape `local@domain.suffix`.
#[must_use]
pub fn valid_email(s: &str) -> bool {
    Email::parse(s).is_ok()
}

/// Returns `true` if `s` is at least [`MIN_PASSWORD_LENGTH`] UTF-16 code
/// units long, the way browsers measure string length.
#[must_use]
pub fn valid_password(s: &str) -> bool {
    s.encode_utf16().count() >= MIN_PASSWORD_LENGTH
}

/// Returns `true` if `s` is at least 3 characters of `[A-Za-z0-9_]`.
#[must_use]
pub fn valid_username(s: &str) -> bool {
    Username::parse(s).is_ok()
}

/// Fields submitted by the registration form, already trimmed where the form
/// trims them.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationInput<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
    pub email: &'a str,
    pub fullname: &'a str,
}

/// The first registration check that failed.
///
/// The display text is the message shown to the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("Tên đăng nhập phải từ 3 ký tự, chỉ chứa chữ, số và dấu gạch dưới")]
    InvalidUsername,
    #[error("Mật khẩu phải có từ 6 ký tự trở lên")]
    WeakPassword,
    #[error("Mật khẩu xác nhận không khớp")]
    PasswordMismatch,
    #[error("Email không hợp lệ")]
    InvalidEmail,
    #[error("Vui lòng nhập tên đầy đủ")]
    MissingFullname,
}

/// Check a registration submission, stopping at the first failure.
///
/// Order: username, password, confirmation, email, full name.
///
/// # Errors
///
/// Returns the first [`RegistrationError`] encountered.
pub fn validate_registration(input: &RegistrationInput<'_>) -> Result<(), RegistrationError> {
    if !valid_username(input.username) {
        return Err(RegistrationError::InvalidUsername);
    }
    if !valid_password(input.password) {
        return Err(RegistrationError::WeakPassword);
    }
    if input.password != input.confirm_password {
        return Err(RegistrationError::PasswordMismatch);
    }
    if !valid_email(input.email) {
        return Err(RegistrationError::InvalidEmail);
    }
    if input.fullname.is_empty() {
        return Err(RegistrationError::MissingFullname);
    }
    Ok(())
}
