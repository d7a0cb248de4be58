//! # Notifications and Navigation
//!
//! The two UI collaborators the commands talk to: a toast surface and a
//! router. Neither affects state; both are traits so tests can record calls.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  command ──► Notifier::notify(Notification { title, description, .. }) │
//! │         └──► Navigator::navigate(Route::Profile)                       │
//! │                                                                         │
//! │  Production: TracingNotifier / TracingNavigator (log the call)         │
//! │  Tests:      RecordingNotifier / RecordingNavigator (keep the calls)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// =============================================================================
// Notifications
// =============================================================================

/// Visual weight of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Default,
    /// Red toast for rejected input and failures.
    Destructive,
}

/// A user-visible toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Notification {
            title: title.into(),
            description: description.into(),
            severity: Severity::Default,
        }
    }

    /// A destructive toast titled "Ошибка".
    pub fn error(description: impl Into<String>) -> Self {
        Notification {
            title: "Ошибка".to_string(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }
}

/// Toast surface.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Default => info!(
                title = %notification.title,
                description = %notification.description,
                "notification"
            ),
            Severity::Destructive => warn!(
                title = %notification.title,
                description = %notification.description,
                "notification"
            ),
        }
    }
}

/// Keeps every notification, for assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        RecordingNotifier::default()
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.sent().pop()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

// =============================================================================
// Navigation
// =============================================================================

/// Storefront pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Home,
    Login,
    Profile,
    Admin,
}

impl Route {
    pub const fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Profile => "/profile",
            Route::Admin => "/admin",
        }
    }
}

/// Router.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Writes navigation requests to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, route: Route) {
        info!(path = route.path(), "navigate");
    }
}

/// Keeps every navigation request, for assertions.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        RecordingNavigator::default()
    }

    pub fn visited(&self) -> Vec<Route> {
        self.visited.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.visited().last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route);
    }
}
