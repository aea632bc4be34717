//! When geofences are enforced.

use serde::Deserialize;

/// Selects which clock transitions are subject to the organization geofence.
///
/// The default checks clock-in only, leaving clock-out unrestricted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct GeofencePolicy {
    /// Reject clock-in outside the organization's area.
    #[serde(default = "enabled")]
    pub enforce_on_clock_in: bool,
    /// Reject clock-out outside the organization's area.
    #[serde(default)]
    pub enforce_on_clock_out: bool,
}

impl Default for GeofencePolicy {
    fn default() -> Self {
        Self {
            enforce_on_clock_in: true,
            enforce_on_clock_out: false,
        }
    }
}

fn enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_checks_clock_in_only() {
        let policy = GeofencePolicy::default();
        assert!(policy.enforce_on_clock_in);
        assert!(!policy.enforce_on_clock_out);
    }

    #[test]
    fn test_empty_yaml_matches_default() {
        let policy: GeofencePolicy = serde_yaml::from_str("{}").unwrap();
        assert_eq!(policy, GeofencePolicy::default());
    }
}
