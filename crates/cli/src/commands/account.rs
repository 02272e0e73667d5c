//! Account commands.
//!
//! # Usage
//!
//! ```bash
//! site-cli register -u alice -p secret1 -e alice@example.com -n "Alice Nguyen"
//! site-cli login -u alice -p secret1
//! site-cli whoami
//! site-cli logout
//! ```

use sample_site_storefront::controllers::fields;
use sample_site_storefront::{FormData, FormId, SiteConfig};
use tracing::info;

use super::{CommandError, open_site, report};

/// Submit the registration form.
///
/// # Errors
///
/// Returns `CommandError::Rejected` with the form's message if validation or
/// registration fails.
pub fn register(
    config: SiteConfig,
    username: &str,
    password: &str,
    confirm: &str,
    email: &str,
    fullname: &str,
) -> Result<(), CommandError> {
    let mut site = open_site(config)?;
    let mut form = FormData::new()
        .with(fields::USERNAME, username)
        .with(fields::PASSWORD, password)
        .with(fields::CONFIRM_PASSWORD, confirm)
        .with(fields::EMAIL, email)
        .with(fields::FULLNAME, fullname);

    report(site.submit(FormId::Register, &mut form)?)
}

/// Submit the login form and wait for the post-login redirect.
///
/// # Errors
///
/// Returns `CommandError::Rejected` if the credentials do not match.
pub async fn login(config: SiteConfig, username: &str, password: &str) -> Result<(), CommandError> {
    let mut site = open_site(config)?;
    let mut form = FormData::new()
        .with(fields::USERNAME, username)
        .with(fields::PASSWORD, password);

    report(site.submit(FormId::Login, &mut form)?)?;

    if let Some(redirect) = site.take_pending_navigation() {
        redirect.wait().await;
    }
    if let Some(url) = site.location().current() {
        info!("-> {url}");
    }
    Ok(())
}

/// Log out.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn logout(config: SiteConfig) -> Result<(), CommandError> {
    let mut site = open_site(config)?;
    site.logout()?;
    info!("Logged out");
    Ok(())
}

/// Show the logged-in user.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn whoami(config: SiteConfig) -> Result<(), CommandError> {
    let site = open_site(config)?;
    match site.current_user()? {
        Some(user) => info!("{} <{}> ({})", user.username, user.email, user.fullname),
        None => info!("Not logged in"),
    }
    Ok(())
}
