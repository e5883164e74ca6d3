//! Non-fatal findings collected while expanding a configuration tree.

use serde::Serialize;
use tracing::warn;

/// A usability warning tied to an attribute path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    /// Dotted attribute path
    pub path: String,

    /// Human-readable explanation
    pub summary: String,
}

/// Warnings accumulated during one conversion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Create an empty collection
    #[must_use]
    pub const fn new() -> Self {
        Self {
            warnings: Vec::new(),
        }
    }

    /// Record a warning and log it
    pub fn warn(&mut self, path: impl Into<String>, summary: impl Into<String>) {
        let warning = Warning {
            path: path.into(),
            summary: summary.into(),
        };
        warn!(path = %warning.path, "{}", warning.summary);
        self.warnings.push(warning);
    }

    /// Returns true if nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Number of warnings
    #[must_use]
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// Recorded warnings, in order
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}
