//! Virtue domain model.
//!
//! This module owns the virtue taxonomy: the core types shared across the
//! crate, the predefined catalog, and the registry that merges it with
//! user-defined virtues.

mod builtins;
mod registry;

pub use builtins::predefined;
pub use registry::VirtueRegistry;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::MAX_PRIORITY_VIRTUES;

/// A named character trait tracked by the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Virtue {
    /// Unique, stable identifier. Never reused after deletion.
    pub id: String,
    /// Display name, unique case-insensitively across the registry.
    pub name: String,
    /// Short description shown alongside the name.
    pub description: String,
    /// True for user-defined virtues; predefined virtues are immutable.
    #[serde(rename = "isCustom", default)]
    pub is_custom: bool,
}

impl Virtue {
    /// Create a user-defined virtue.
    pub fn custom(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            is_custom: true,
        }
    }
}

/// A single virtue's score on the 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtueScore {
    /// Id of the virtue this score belongs to.
    #[serde(rename = "virtueId")]
    pub virtue_id: String,
    /// Score in [0,100].
    pub score: f64,
}

impl VirtueScore {
    /// Create a score entry.
    pub fn new(virtue_id: impl Into<String>, score: f64) -> Self {
        Self {
            virtue_id: virtue_id.into(),
            score,
        }
    }
}

/// The user's character development goals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGoals {
    /// Ids of the selected priority virtues, at most [`MAX_PRIORITY_VIRTUES`].
    pub priority_virtues: Vec<String>,
    /// Free-text innovation goals.
    pub innovation_goals: String,
    /// Behavioral commitments derived from the selected virtues.
    #[serde(default)]
    pub behavioral_commitments: Vec<String>,
    /// Coaching plan for the first week.
    #[serde(default)]
    pub first_week_coaching_plan: Vec<String>,
}

impl UserGoals {
    /// Whether the given virtue id is one of the user's priorities.
    pub fn is_priority(&self, virtue_id: &str) -> bool {
        self.priority_virtues.iter().any(|id| id == virtue_id)
    }

    /// Add a priority virtue selection.
    ///
    /// Returns false without changing anything when the id is already
    /// selected or the selection is at [`MAX_PRIORITY_VIRTUES`].
    pub fn select_priority(&mut self, virtue_id: impl Into<String>) -> bool {
        let virtue_id = virtue_id.into();
        if self.is_priority(&virtue_id) || self.priority_virtues.len() >= MAX_PRIORITY_VIRTUES {
            return false;
        }
        self.priority_virtues.push(virtue_id);
        true
    }

    /// Drop priority ids that no longer exist in the registry.
    ///
    /// Deleting a custom virtue leaves its id behind in any saved goals;
    /// callers run this before display so stale ids never surface.
    pub fn retain_known(&mut self, virtues: &[Virtue]) {
        self.priority_virtues
            .retain(|id| virtues.iter().any(|v| &v.id == id));
    }
}

/// A logged character moment with coaching feedback.
///
/// Owned by the server; cached and displayed client-side, append-only from
/// the user's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterMoment {
    /// Server-assigned identifier.
    pub id: String,
    /// When the moment was logged.
    pub timestamp: DateTime<Utc>,
    /// The user's description of the moment.
    pub moment: String,
    /// Virtue the moment was logged against.
    pub virtue_id: String,
    /// Coaching feedback attached by the server.
    pub feedback: String,
}
