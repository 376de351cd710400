//! Wire records and their decoded internal forms.
//!
//! Raw records (`*Record`) mirror what the backend actually sends: every
//! field is optional or defaulted, unknown fields are ignored, and ids
//! arrive under Mongo's `_id` key. Each record decodes into a validated
//! internal type in one explicit step, so the rest of the crate never
//! reasons about payload shape.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::MAX_PRIORITY_VIRTUES;
use crate::synthetic::{Challenge, ChallengeStatus, HistoricalVirtueScore, Insight, InsightKind};
use crate::virtues::{CharacterMoment, UserGoals, VirtueScore};

/// Raw score row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreRecord {
    #[serde(rename = "virtueId", default)]
    pub virtue_id: String,
    #[serde(default)]
    pub score: f64,
}

impl ScoreRecord {
    /// Decode into a domain score entry.
    pub fn into_score(self) -> VirtueScore {
        VirtueScore::new(self.virtue_id, self.score)
    }
}

/// Raw goal record (`priority_virtues` / `innovation_goal` on the wire).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoalRecord {
    #[serde(default)]
    pub priority_virtues: Vec<String>,
    #[serde(default)]
    pub innovation_goal: String,
}

impl GoalRecord {
    /// Decode into [`UserGoals`], deduplicating priority ids and enforcing
    /// the selection cap.
    pub fn into_goals(self) -> UserGoals {
        let mut goals = UserGoals {
            innovation_goals: self.innovation_goal,
            ..Default::default()
        };
        let mut skipped = 0usize;
        for id in self.priority_virtues {
            if !goals.select_priority(id) {
                skipped += 1;
            }
        }
        if skipped > 0 {
            debug!(
                skipped,
                cap = MAX_PRIORITY_VIRTUES,
                "Dropped duplicate or over-cap priority ids from server goals"
            );
        }
        goals
    }
}

/// Payload for saving goals.
#[derive(Debug, Clone, Serialize)]
pub struct GoalSubmit {
    pub priority_virtues: Vec<String>,
    pub innovation_goal: String,
}

impl GoalSubmit {
    /// Build the wire payload from domain goals.
    pub fn from_goals(goals: &UserGoals) -> Self {
        Self {
            priority_virtues: goals.priority_virtues.clone(),
            innovation_goal: goals.innovation_goals.clone(),
        }
    }
}

/// Raw assessment record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssessmentRecord {
    #[serde(default)]
    pub scores: Vec<ScoreRecord>,
    #[serde(default)]
    pub narrative_profile: String,
}

/// Decoded assessment result.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    /// Raw (sparse) score rows; run through `scores::normalize` before
    /// display.
    pub scores: Vec<VirtueScore>,
    /// Narrative summary of the assessment.
    pub narrative_profile: String,
}

impl AssessmentRecord {
    /// Decode into an [`Assessment`].
    pub fn into_assessment(self) -> Assessment {
        Assessment {
            scores: self.scores.into_iter().map(ScoreRecord::into_score).collect(),
            narrative_profile: self.narrative_profile,
        }
    }
}

/// Payload for submitting questionnaire answers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssessmentSubmit {
    pub answers: BTreeMap<String, i64>,
}

/// Raw dashboard payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardStatsRecord {
    #[serde(rename = "currentScores", default)]
    pub current_scores: Vec<ScoreRecord>,
    #[serde(default)]
    pub history: Vec<HistoryEntryRecord>,
}

/// Raw history bucket: a flat `{date, <virtueId>: score}` map.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryEntryRecord {
    #[serde(default)]
    pub date: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, Value>,
}

impl HistoryEntryRecord {
    /// Decode into a chart bucket, keeping only numeric values.
    pub fn into_bucket(self) -> HistoricalVirtueScore {
        let scores = self
            .values
            .into_iter()
            .filter_map(|(id, value)| value.as_f64().map(|score| (id, score)))
            .collect();
        HistoricalVirtueScore {
            date: self.date,
            scores,
        }
    }
}

/// Decoded dashboard payload.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    /// Raw (sparse) score rows; run through `scores::normalize` before
    /// display.
    pub current_scores: Vec<VirtueScore>,
    /// Server-supplied trend series, oldest first.
    pub history: Vec<HistoricalVirtueScore>,
}

impl DashboardStatsRecord {
    /// Decode into [`DashboardStats`].
    pub fn into_stats(self) -> DashboardStats {
        DashboardStats {
            current_scores: self
                .current_scores
                .into_iter()
                .map(ScoreRecord::into_score)
                .collect(),
            history: self
                .history
                .into_iter()
                .map(HistoryEntryRecord::into_bucket)
                .collect(),
        }
    }
}

/// Raw insight row from the weekly reflection feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsightRecord {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "virtueId", default)]
    pub virtue_id: Option<String>,
}

impl InsightRecord {
    /// Decode into an [`Insight`]; rows with an unrecognized kind are
    /// dropped.
    pub fn into_insight(self) -> Option<Insight> {
        let kind = match self.kind.as_str() {
            "support" => InsightKind::Support,
            "hinder" => InsightKind::Hinder,
            "opportunity" => InsightKind::Opportunity,
            "pattern" => InsightKind::Pattern,
            "suggestion" => InsightKind::Suggestion,
            "achievement" => InsightKind::Achievement,
            other => {
                debug!(kind = %other, "Dropping insight with unknown kind");
                return None;
            }
        };
        Some(Insight {
            id: self.id,
            kind,
            message: self.message,
            virtue_id: self.virtue_id,
        })
    }
}

/// Raw weekly reflection payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeeklyReflectionRecord {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub insights: Vec<InsightRecord>,
    #[serde(default)]
    pub focus: Vec<String>,
}

/// Decoded weekly reflection.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyReflection {
    /// Narrative summary of the week.
    pub summary: String,
    /// Server-authored insight feed.
    pub insights: Vec<Insight>,
    /// Virtue ids the user is focusing on.
    pub focus: Vec<String>,
}

impl WeeklyReflectionRecord {
    /// Decode into a [`WeeklyReflection`].
    pub fn into_reflection(self) -> WeeklyReflection {
        WeeklyReflection {
            summary: self.summary,
            insights: self
                .insights
                .into_iter()
                .filter_map(InsightRecord::into_insight)
                .collect(),
            focus: self.focus,
        }
    }
}

/// Raw logged moment (`content` / `virtue_id` on the wire).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MomentRecord {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub virtue_id: String,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub timestamp: DateTime<Utc>,
}

impl MomentRecord {
    /// Decode into a [`CharacterMoment`].
    pub fn into_moment(self) -> CharacterMoment {
        CharacterMoment {
            id: self.id,
            timestamp: self.timestamp,
            moment: self.content,
            virtue_id: self.virtue_id,
            feedback: self.feedback,
        }
    }
}

/// Payload for logging a moment.
#[derive(Debug, Clone, Serialize)]
pub struct MomentSubmit {
    pub content: String,
    pub virtue_id: String,
}

/// Raw challenge record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChallengeRecord {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "virtueId", default)]
    pub virtue_id: String,
    #[serde(default)]
    pub status: String,
}

impl ChallengeRecord {
    /// Decode into a [`Challenge`]; anything but "completed" reads as
    /// pending.
    pub fn into_challenge(self) -> Challenge {
        Challenge {
            id: self.id,
            title: self.title,
            description: self.description,
            virtue_id: self.virtue_id,
            status: match self.status.as_str() {
                "completed" => ChallengeStatus::Completed,
                _ => ChallengeStatus::Pending,
            },
        }
    }
}

/// Payload for toggling a challenge's status.
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeStatusUpdate {
    pub status: ChallengeStatus,
}

/// A news article matched to virtues.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub virtues: Vec<String>,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
}

/// Login response (`{token, user}` on the wire; the user record is not
/// needed here).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenRecord {
    #[serde(default)]
    pub token: String,
}
