//! Form controllers and the page they are attached to.
//!
//! A [`Site`] stands in for a loaded page: loading it seeds the store and
//! attaches a controller to each form the [`Page`] contains. Submitting a form
//! hands its field values to the controller, which returns a [`FormOutcome`]
//! describing what the page should show and where it should go. The default
//! form submission never happens; only the outcome's navigation does.

pub mod auth;
pub mod feedback;
pub mod navigation;
pub mod search;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use tracing::{debug, info, instrument};

pub use auth::{LoginController, RegisterController};
pub use feedback::{Feedback, FeedbackLevel};
pub use navigation::{Location, Navigation, ScheduledNavigation};
pub use search::SearchController;

use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::models::User;
use crate::seed::{SeedReport, initialize};
use crate::services::{AuthService, CartService, CatalogService};
use crate::store::{FileStore, Storage};

/// Form field names.
pub mod fields {
    pub const USERNAME: &str = "username";
    pub const PASSWORD: &str = "password";
    pub const CONFIRM_PASSWORD: &str = "confirmPassword";
    pub const EMAIL: &str = "email";
    pub const FULLNAME: &str = "fullname";
    pub const QUERY: &str = "q";
}

/// The forms a page can host, identified by element id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormId {
    Register,
    Login,
    Search,
}

impl FormId {
    /// Every form, in attachment order.
    pub const ALL: [Self; 3] = [Self::Register, Self::Login, Self::Search];

    /// The form's element id.
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Register => "register-form",
            Self::Login => "login-form",
            Self::Search => "search-form",
        }
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

/// Error returned when parsing an unknown form id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form id: {0}")]
pub struct UnknownFormId(pub String);

impl FromStr for FormId {
    type Err = UnknownFormId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.element_id() == s)
            .ok_or_else(|| UnknownFormId(s.to_string()))
    }
}

/// Field values of a submitted form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    values: BTreeMap<String, String>,
}

impl FormData {
    /// An empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, builder style.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set `name` to `value`.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Value of `name`; a missing field reads as empty.
    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map_or("", String::as_str)
    }

    /// Clear every field back to empty.
    pub fn reset(&mut self) {
        self.values.values_mut().for_each(String::clear);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// What a page contains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    forms: BTreeSet<FormId>,
    result_panel: bool,
}

impl Page {
    /// A page with no forms and no result panel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A page with every form and a result panel.
    #[must_use]
    pub fn full() -> Self {
        FormId::ALL
            .into_iter()
            .fold(Self::new(), Self::with_form)
            .with_result_panel()
    }

    /// Add a form.
    #[must_use]
    pub fn with_form(mut self, form: FormId) -> Self {
        self.forms.insert(form);
        self
    }

    /// Add the `result` element.
    #[must_use]
    pub const fn with_result_panel(mut self) -> Self {
        self.result_panel = true;
        self
    }

    /// Returns `true` if the page contains `form`.
    #[must_use]
    pub fn has_form(&self, form: FormId) -> bool {
        self.forms.contains(&form)
    }

    /// Returns `true` if the page contains the `result` element.
    #[must_use]
    pub const fn has_result_panel(&self) -> bool {
        self.result_panel
    }
}

/// What a controller decided about a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormOutcome {
    /// Message for the result panel.
    pub feedback: Option<Feedback>,
    /// Where to go next.
    pub navigation: Option<Navigation>,
    /// Whether the form's fields should be cleared.
    pub reset_form: bool,
}

impl FormOutcome {
    /// An outcome that only shows an error.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            feedback: Some(Feedback::error(message)),
            ..Self::default()
        }
    }

    /// An outcome that only navigates.
    #[must_use]
    pub fn navigate(navigation: Navigation) -> Self {
        Self {
            navigation: Some(navigation),
            ..Self::default()
        }
    }
}

/// What a controller may use while handling a submission.
#[derive(Debug, Clone, Copy)]
pub struct ControllerContext<'a> {
    pub storage: &'a Storage,
    pub config: &'a SiteConfig,
}

impl<'a> ControllerContext<'a> {
    /// Create a controller context.
    #[must_use]
    pub const fn new(storage: &'a Storage, config: &'a SiteConfig) -> Self {
        Self { storage, config }
    }
}

/// A handler bound to one form's submit event.
pub trait FormController {
    /// The form this controller handles.
    fn form(&self) -> FormId;

    /// Handle a submission.
    ///
    /// Visitor mistakes are reported through the outcome's feedback.
    ///
    /// # Errors
    ///
    /// Returns `SiteError` only for storage or infrastructure failures.
    fn handle(&self, ctx: &ControllerContext<'_>, form: &FormData) -> Result<FormOutcome, SiteError>;
}

/// A loaded page with its controllers attached.
pub struct Site {
    storage: Storage,
    config: SiteConfig,
    page: Page,
    controllers: BTreeMap<FormId, Box<dyn FormController>>,
    result: Option<Feedback>,
    location: Location,
    pending: Option<ScheduledNavigation>,
    seed_report: SeedReport,
}

impl Site {
    /// Load `page`: seed the store, then attach the built-in controller for
    /// every form the page contains.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Store` if seeding fails.
    #[instrument(skip(storage, config))]
    pub fn load(page: Page, storage: Storage, config: SiteConfig) -> Result<Self, SiteError> {
        let seed_report = initialize(&storage)?;

        let mut site = Self {
            storage,
            config,
            page,
            controllers: BTreeMap::new(),
            result: None,
            location: Location::new(),
            pending: None,
            seed_report,
        };

        site.attach(RegisterController);
        site.attach(LoginController);
        site.attach(SearchController);

        Ok(site)
    }

    /// Open the file store named by `config` and load `page` over it.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Store` if the store cannot be opened or seeded.
    pub fn open(page: Page, config: SiteConfig) -> Result<Self, SiteError> {
        let storage =
            Storage::new(FileStore::open(&config.storage_path)?).with_policy(config.malformed_policy);
        Self::load(page, storage, config)
    }

    /// Attach `controller` if the page contains its form, replacing any
    /// controller already bound to that form. Returns whether it was attached.
    pub fn attach(&mut self, controller: impl FormController + 'static) -> bool {
        let form = controller.form();
        if !self.page.has_form(form) {
            debug!(%form, "Form not on page; controller not attached");
            return false;
        }
        self.controllers.insert(form, Box::new(controller));
        true
    }

    /// Submit `form` with the values in `data`.
    ///
    /// Returns `None` if no controller is attached to the form. Otherwise the
    /// outcome is applied: feedback goes to the result panel (and is dropped
    /// when the page has none), navigation happens or is scheduled, and `data`
    /// is cleared if the controller asked for a reset.
    ///
    /// # Errors
    ///
    /// Returns `SiteError` on storage failure, or `SiteError::NoRuntime` if a
    /// delayed navigation is requested outside a tokio runtime.
    #[instrument(skip_all, fields(form = %form))]
    pub fn submit(&mut self, form: FormId, data: &mut FormData) -> Result<Option<FormOutcome>, SiteError> {
        let Some(controller) = self.controllers.get(&form) else {
            debug!("No controller attached; submission ignored");
            return Ok(None);
        };

        let ctx = ControllerContext::new(&self.storage, &self.config);
        let outcome = controller.handle(&ctx, data)?;

        if let Some(feedback) = &outcome.feedback {
            self.show(feedback.clone());
        }

        match &outcome.navigation {
            Some(Navigation::Immediate(target)) => self.location.assign(target.clone()),
            Some(Navigation::Delayed { target, delay }) => {
                let scheduled =
                    ScheduledNavigation::spawn(self.location.clone(), target.clone(), *delay)?;
                info!(url = %target, delay_ms = delay.as_millis(), "Navigation scheduled");
                self.pending = Some(scheduled);
            }
            None => {}
        }

        if outcome.reset_form {
            data.reset();
        }

        Ok(Some(outcome))
    }

    /// Log out and return to the landing page.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Store` if `currentUser` cannot be removed.
    pub fn logout(&mut self) -> Result<(), SiteError> {
        self.auth().logout()?;
        self.location.assign(self.config.landing_page.clone());
        Ok(())
    }

    /// The logged-in account, if any.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Store` if `currentUser` is malformed under the strict policy.
    pub fn current_user(&self) -> Result<Option<User>, SiteError> {
        Ok(self.auth().current_user()?)
    }

    fn show(&mut self, feedback: Feedback) {
        if self.page.has_result_panel() {
            self.result = Some(feedback);
        } else {
            debug!("No result panel; feedback dropped");
        }
    }

    /// Current contents of the result panel.
    #[must_use]
    pub const fn result(&self) -> Option<&Feedback> {
        self.result.as_ref()
    }

    /// Markup of the result panel, if it holds a message.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Template` if rendering fails.
    pub fn render_result(&self) -> Result<Option<String>, SiteError> {
        Ok(self.result.as_ref().map(Feedback::render).transpose()?)
    }

    /// The page's location.
    #[must_use]
    pub const fn location(&self) -> &Location {
        &self.location
    }

    /// The most recently scheduled delayed navigation.
    #[must_use]
    pub const fn pending_navigation(&self) -> Option<&ScheduledNavigation> {
        self.pending.as_ref()
    }

    /// Take ownership of the scheduled navigation, e.g. to await it.
    pub const fn take_pending_navigation(&mut self) -> Option<ScheduledNavigation> {
        self.pending.take()
    }

    /// Collections written when the page loaded.
    #[must_use]
    pub const fn seed_report(&self) -> &SeedReport {
        &self.seed_report
    }

    /// The page description.
    #[must_use]
    pub const fn page(&self) -> &Page {
        &self.page
    }

    /// Site configuration.
    #[must_use]
    pub const fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Underlying storage.
    #[must_use]
    pub const fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Account service over this site's storage.
    #[must_use]
    pub const fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.storage)
    }

    /// Cart service over this site's storage.
    #[must_use]
    pub const fn cart(&self) -> CartService<'_> {
        CartService::new(&self.storage)
    }

    /// Catalog service over this site's storage.
    #[must_use]
    pub const fn catalog(&self) -> CatalogService<'_> {
        CatalogService::new(&self.storage)
    }
}

impl fmt::Debug for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Site")
            .field("page", &self.page)
            .field("controllers", &self.controllers.keys().collect::<Vec<_>>())
            .field("result", &self.result)
            .field("location", &self.location.current())
            .finish_non_exhaustive()
    }
}
