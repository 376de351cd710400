//! The predefined virtue catalog.

use super::Virtue;

/// The predefined virtues in fixed declaration order.
///
/// These are compiled-in constants of the application: `is_custom` is false,
/// they are never persisted, and the registry refuses to modify or remove
/// them.
pub fn predefined() -> Vec<Virtue> {
    fn virtue(id: &str, name: &str, description: &str) -> Virtue {
        Virtue {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            is_custom: false,
        }
    }

    vec![
        virtue(
            "resilience",
            "Resilience",
            "The capacity to recover quickly from difficulties.",
        ),
        virtue(
            "integrity",
            "Integrity",
            "The quality of being honest and having strong moral principles.",
        ),
        virtue(
            "growth_mindset",
            "Growth Mindset",
            "A belief that abilities can be developed through dedication and hard work.",
        ),
        virtue(
            "humility",
            "Humility",
            "A modest or low view of one's own importance.",
        ),
        virtue(
            "teamwork",
            "Teamwork",
            "The collaborative effort of a group to achieve a common goal.",
        ),
        virtue(
            "courage",
            "Courage",
            "The ability to do something that frightens one.",
        ),
        virtue(
            "empathy",
            "Empathy",
            "The ability to understand and share the feelings of another.",
        ),
        virtue(
            "wisdom",
            "Wisdom",
            "The quality of having experience, knowledge, and good judgment.",
        ),
        virtue(
            "curiosity",
            "Curiosity",
            "A strong desire to know or learn something.",
        ),
        virtue(
            "adaptability",
            "Adaptability",
            "The quality of being able to adjust to new conditions.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predefined_catalog_is_stable() {
        let virtues = predefined();
        assert_eq!(virtues.len(), 10);
        assert_eq!(virtues[0].id, "resilience");
        assert_eq!(virtues[5].id, "courage");
        assert_eq!(virtues[9].id, "adaptability");
        assert!(virtues.iter().all(|v| !v.is_custom));
    }

    #[test]
    fn test_predefined_ids_are_unique() {
        let virtues = predefined();
        for (i, a) in virtues.iter().enumerate() {
            for b in &virtues[i + 1..] {
                assert_ne!(a.id, b.id);
                assert_ne!(a.name.to_lowercase(), b.name.to_lowercase());
            }
        }
    }
}
