//! Rule-based fallback insight feed.

use serde::{Deserialize, Serialize};

use crate::virtues::{CharacterMoment, UserGoals, Virtue};

/// Number of characters quoted from a moment in its insight.
pub const MOMENT_EXCERPT_CHARS: usize = 30;

/// Insight category.
///
/// The local generator only emits `Support`, `Hinder`, and `Opportunity`;
/// `Pattern`, `Suggestion`, and `Achievement` arrive in server-authored
/// feeds and share this vocabulary so both render through one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    /// Something that supported the user's development.
    Support,
    /// Something that got in the way.
    Hinder,
    /// An opening to practice a virtue.
    Opportunity,
    /// A recurring behavior the analytics spotted.
    Pattern,
    /// A concrete next step.
    Suggestion,
    /// A milestone reached.
    Achievement,
}

/// A single insight card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Stable id, unique per rule within one derived feed.
    pub id: String,
    /// Category driving the card's presentation.
    #[serde(rename = "type")]
    pub kind: InsightKind,
    /// Human-readable message.
    pub message: String,
    /// Virtue the insight refers to, when it refers to one.
    #[serde(rename = "virtueId", skip_serializing_if = "Option::is_none")]
    pub virtue_id: Option<String>,
}

impl Insight {
    fn new(id: &str, kind: InsightKind, message: String, virtue_id: Option<String>) -> Self {
        Self {
            id: id.to_string(),
            kind,
            message,
            virtue_id,
        }
    }
}

/// Derive a fallback insight feed from goals and logged moments.
///
/// Deterministic, rule-based placeholder content, not a recommendation
/// engine. Rules apply in order and are independently addable:
/// 1. first priority virtue (if it resolves) gets an opportunity card;
/// 2. second priority virtue (if it resolves) gets a hinder card;
/// 3. the most recent moment gets a support card quoting its opening, or a
///    reminder card is emitted when no moments exist;
/// 4. two fixed generic cards always close the feed.
///
/// Priority ids that no longer resolve in `virtues` are skipped, never an
/// error.
pub fn derive_insights(
    goals: Option<&UserGoals>,
    moments: &[CharacterMoment],
    virtues: &[Virtue],
) -> Vec<Insight> {
    let find = |id: &str| virtues.iter().find(|v| v.id == id);
    let mut insights = Vec::new();

    if let Some(goals) = goals {
        if let Some(primary) = goals.priority_virtues.first().and_then(|id| find(id)) {
            insights.push(Insight::new(
                "insight-1",
                InsightKind::Opportunity,
                format!(
                    "You had an opportunity this week to practice {} during a team \
                     discussion. Consider how you might have voiced your thoughts more \
                     assertively.",
                    primary.name
                ),
                Some(primary.id.clone()),
            ));
        }
        if let Some(secondary) = goals.priority_virtues.get(1).and_then(|id| find(id)) {
            insights.push(Insight::new(
                "insight-2",
                InsightKind::Hinder,
                format!(
                    "Your calendar shows a high number of back-to-back meetings, which \
                     might hinder your ability to reflect and apply {}. Try scheduling \
                     short breaks.",
                    secondary.name
                ),
                Some(secondary.id.clone()),
            ));
        }
    }

    if let Some(recent) = moments.last() {
        let virtue_name = find(&recent.virtue_id)
            .map(|v| v.name.clone())
            .unwrap_or_else(|| recent.virtue_id.clone());
        let excerpt: String = recent.moment.chars().take(MOMENT_EXCERPT_CHARS).collect();
        insights.push(Insight::new(
            "insight-3",
            InsightKind::Support,
            format!(
                "Your recent log about \"{excerpt}...\" shows a strong application of \
                 {virtue_name}. Keep up the great work!"
            ),
            Some(recent.virtue_id.clone()),
        ));
    } else {
        insights.push(Insight::new(
            "insight-4",
            InsightKind::Opportunity,
            "No character moments logged this week. Remember to capture your experiences \
             to track your growth!"
                .to_string(),
            None,
        ));
    }

    insights.push(Insight::new(
        "insight-5",
        InsightKind::Opportunity,
        "Consider dedicating 15 minutes each morning to planning how you'll embody a \
         target virtue today."
            .to_string(),
        None,
    ));
    insights.push(Insight::new(
        "insight-6",
        InsightKind::Support,
        "You consistently allocated time for deep work this week, which supports focused \
         application of wisdom and curiosity."
            .to_string(),
        None,
    ));

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::virtues::predefined;
    use chrono::Utc;

    fn moment(text: &str, virtue_id: &str) -> CharacterMoment {
        CharacterMoment {
            id: "m-1".to_string(),
            timestamp: Utc::now(),
            moment: text.to_string(),
            virtue_id: virtue_id.to_string(),
            feedback: "Well done.".to_string(),
        }
    }

    fn goals(ids: &[&str]) -> UserGoals {
        UserGoals {
            priority_virtues: ids.iter().map(|id| id.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_goals_no_moments_yields_three_generic_insights() {
        let insights = derive_insights(None, &[], &predefined());

        assert_eq!(insights.len(), 3);
        assert!(insights.iter().all(|i| i.virtue_id.is_none()));
        assert_eq!(insights[0].kind, InsightKind::Opportunity);
        assert_eq!(insights[1].kind, InsightKind::Opportunity);
        assert_eq!(insights[2].kind, InsightKind::Support);
    }

    #[test]
    fn test_priority_virtues_add_opportunity_and_hinder() {
        let goals = goals(&["courage", "empathy"]);
        let insights = derive_insights(Some(&goals), &[], &predefined());

        assert_eq!(insights.len(), 5);
        assert_eq!(insights[0].kind, InsightKind::Opportunity);
        assert_eq!(insights[0].virtue_id.as_deref(), Some("courage"));
        assert!(insights[0].message.contains("Courage"));
        assert_eq!(insights[1].kind, InsightKind::Hinder);
        assert_eq!(insights[1].virtue_id.as_deref(), Some("empathy"));
    }

    #[test]
    fn test_single_priority_virtue_adds_only_opportunity() {
        let goals = goals(&["wisdom"]);
        let insights = derive_insights(Some(&goals), &[], &predefined());

        assert_eq!(insights.len(), 4);
        assert!(!insights.iter().any(|i| i.kind == InsightKind::Hinder));
    }

    #[test]
    fn test_stale_priority_id_is_skipped() {
        let goals = goals(&["custom-999", "courage"]);
        let insights = derive_insights(Some(&goals), &[], &predefined());

        // The stale first slot vanishes; courage still resolves as the
        // second priority and keeps its hinder card.
        assert!(!insights
            .iter()
            .any(|i| i.virtue_id.as_deref() == Some("custom-999")));
        assert!(insights
            .iter()
            .any(|i| i.kind == InsightKind::Hinder
                && i.virtue_id.as_deref() == Some("courage")));
    }

    #[test]
    fn test_latest_moment_gets_support_with_excerpt() {
        let moments = vec![
            moment("An older entry", "wisdom"),
            moment(
                "Spoke up in the planning meeting even though the room disagreed",
                "courage",
            ),
        ];
        let insights = derive_insights(None, &moments, &predefined());

        let support = &insights[0];
        assert_eq!(support.kind, InsightKind::Support);
        assert_eq!(support.virtue_id.as_deref(), Some("courage"));
        assert!(support.message.contains("Spoke up in the planning meeti"));
        assert!(support.message.contains("Courage"));
    }

    #[test]
    fn test_moment_with_stale_virtue_falls_back_to_raw_id() {
        let moments = vec![moment("Practiced my deleted virtue", "custom-999")];
        let insights = derive_insights(None, &moments, &predefined());

        assert!(insights[0].message.contains("custom-999"));
        assert_eq!(insights[0].virtue_id.as_deref(), Some("custom-999"));
    }

    #[test]
    fn test_wire_format_uses_type_and_lowercase_kind() {
        let insights = derive_insights(None, &[], &predefined());
        let json = serde_json::to_value(&insights[0]).unwrap();
        assert_eq!(json["type"], serde_json::json!("opportunity"));
        assert!(json.get("virtueId").is_none());
    }

    #[test]
    fn test_server_authored_kinds_deserialize() {
        let insight: Insight = serde_json::from_str(
            r#"{"id":"1","type":"pattern","message":"You tend to log more moments when you are focused."}"#,
        )
        .unwrap();
        assert_eq!(insight.kind, InsightKind::Pattern);
    }
}
