//! Templated weekly challenges for priority virtues.

use serde::{Deserialize, Serialize};

use crate::virtues::{UserGoals, Virtue};

/// Completion state of a challenge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeStatus {
    /// Not yet completed.
    #[default]
    Pending,
    /// Marked done by the user.
    Completed,
}

/// A weekly practice challenge tied to one virtue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    /// Deterministic id: `challenge-<virtueId>-<n>`.
    pub id: String,
    /// Short imperative title.
    pub title: String,
    /// What to actually do.
    pub description: String,
    /// Virtue the challenge practices.
    #[serde(rename = "virtueId")]
    pub virtue_id: String,
    /// Completion state, starts pending.
    #[serde(default)]
    pub status: ChallengeStatus,
}

impl Challenge {
    fn new(virtue_id: &str, seq: usize, title: String, description: String) -> Self {
        Self {
            id: format!("challenge-{virtue_id}-{seq}"),
            title,
            description,
            virtue_id: virtue_id.to_string(),
            status: ChallengeStatus::Pending,
        }
    }
}

/// Derive placeholder challenges from the user's priority virtues.
///
/// Returns an empty list when there are no goals or no priorities. Each
/// priority virtue that resolves in `virtues` yields one or two challenges:
/// courage, empathy, and humility carry bespoke templates, every other
/// virtue falls back to a generic one built from its name. Ids are
/// deterministic, so the same goals always derive the same challenges.
/// Stale priority ids are skipped, never an error.
pub fn derive_challenges(goals: Option<&UserGoals>, virtues: &[Virtue]) -> Vec<Challenge> {
    let Some(goals) = goals else {
        return Vec::new();
    };

    let mut challenges = Vec::new();
    for virtue_id in &goals.priority_virtues {
        let Some(virtue) = virtues.iter().find(|v| &v.id == virtue_id) else {
            continue;
        };
        challenges.extend(templates_for(virtue));
    }
    challenges
}

fn templates_for(virtue: &Virtue) -> Vec<Challenge> {
    match virtue.id.as_str() {
        "courage" => vec![
            Challenge::new(
                &virtue.id,
                1,
                format!("Speak Up with {}", virtue.name),
                "In your next team meeting, identify one point where you can respectfully \
                 challenge an idea or offer a new perspective, even if it feels uncomfortable."
                    .to_string(),
            ),
            Challenge::new(
                &virtue.id,
                2,
                "Embrace a New Task".to_string(),
                "Volunteer for a task or project that is outside your comfort zone and \
                 requires you to learn something new."
                    .to_string(),
            ),
        ],
        "empathy" => vec![
            Challenge::new(
                &virtue.id,
                1,
                "Active Listening Exercise".to_string(),
                "In your next one-on-one conversation, practice active listening by focusing \
                 entirely on the other person without interrupting or formulating your \
                 response. Summarize their points back to them."
                    .to_string(),
            ),
            Challenge::new(
                &virtue.id,
                2,
                "Understand a Different Perspective".to_string(),
                "Seek out a colleague with a different viewpoint on a current project and ask \
                 open-ended questions to truly understand their rationale."
                    .to_string(),
            ),
        ],
        "humility" => vec![
            Challenge::new(
                &virtue.id,
                1,
                "Ask for Feedback".to_string(),
                "Proactively ask a peer or manager for constructive feedback on a recent \
                 piece of your work, and listen openly to their suggestions."
                    .to_string(),
            ),
            Challenge::new(
                &virtue.id,
                2,
                "Acknowledge Others' Contributions".to_string(),
                "Publicly acknowledge a colleague's contribution or idea that helped improve \
                 your work or a team project."
                    .to_string(),
            ),
        ],
        _ => vec![Challenge::new(
            &virtue.id,
            1,
            format!("Apply {} in a Daily Task", virtue.name),
            format!(
                "Identify one routine task today and consciously think about how you can \
                 apply {} while performing it.",
                virtue.name
            ),
        )],
    }
}
