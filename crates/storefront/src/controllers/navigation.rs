//! Page navigation.
//!
//! [`Location`] plays the role of the window location: every navigation is
//! appended to its history. Delayed navigations run on the tokio timer as a
//! [`ScheduledNavigation`] that can be cancelled or awaited, so tests drive
//! them with paused time.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::info;

use crate::error::SiteError;

/// Where a controller wants the browser to go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Navigate right away.
    Immediate(String),
    /// Navigate once `delay` has elapsed.
    Delayed { target: String, delay: Duration },
}

impl Navigation {
    /// The page being navigated to.
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::Immediate(target) | Self::Delayed { target, .. } => target,
        }
    }
}

/// Shared handle to the current page location.
#[derive(Debug, Clone, Default)]
pub struct Location {
    history: Arc<Mutex<Vec<String>>>,
}

impl Location {
    /// A location that has not navigated anywhere yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigate to `url`.
    pub fn assign(&self, url: impl Into<String>) {
        let url = url.into();
        info!(%url, "Navigating");
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url);
    }

    /// The most recent navigation target.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Every navigation target, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// A navigation waiting on a timer.
///
/// Dropping the handle does not cancel the navigation.
#[derive(Debug)]
pub struct ScheduledNavigation {
    target: String,
    deadline: Instant,
    handle: JoinHandle<()>,
}

impl ScheduledNavigation {
    /// Schedule `location` to navigate to `target` after `delay`.
    ///
    /// The deadline is fixed when this is called, not when the task first runs.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::NoRuntime` when called outside a tokio runtime.
    pub fn spawn(location: Location, target: String, delay: Duration) -> Result<Self, SiteError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| SiteError::NoRuntime)?;
        let deadline = Instant::now() + delay;

        let task_target = target.clone();
        let handle = runtime.spawn(async move {
            sleep_until(deadline).await;
            location.assign(task_target);
        });

        Ok(Self {
            target,
            deadline,
            handle,
        })
    }

    /// The page that will be navigated to.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// When the navigation fires.
    #[must_use]
    pub const fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Returns `true` once the navigation has happened or been cancelled.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop the navigation if it has not fired yet.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Wait for the timer. Returns `true` if the navigation happened and
    /// `false` if it was cancelled.
    pub async fn wait(self) -> bool {
        self.handle.await.is_ok()
    }
}
