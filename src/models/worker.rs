//! Worker model and related types.

use serde::{Deserialize, Serialize};

/// The role a worker holds within the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerRole {
    /// Can view staffing dashboards and administer the organization.
    Manager,
    /// Clocks in and out of shifts.
    #[default]
    CareWorker,
}

/// A user of the system who can own shifts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    /// Stable identifier, as issued by the identity provider.
    pub id: String,
    /// Contact email.
    pub email: String,
    /// Display name, if known.
    #[serde(default)]
    pub name: Option<String>,
    /// The worker's role.
    #[serde(default)]
    pub role: WorkerRole,
    /// The organization the worker is assigned to.
    #[serde(default)]
    pub organization_id: Option<String>,
}

impl Worker {
    /// Returns true if the worker is a manager.
    ///
    /// ```
    /// use shift_tracker::models::{Worker, WorkerRole};
    ///
    /// let worker = Worker {
    ///     id: "auth0|123".to_string(),
    ///     email: "sam@example.com".to_string(),
    ///     name: None,
    ///     role: WorkerRole::Manager,
    ///     organization_id: None,
    /// };
    /// assert!(worker.is_manager());
    /// ```
    pub fn is_manager(&self) -> bool {
        self.role == WorkerRole::Manager
    }

    /// The name shown on reports: the display name, or the email when unnamed.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.email)
    }
}
