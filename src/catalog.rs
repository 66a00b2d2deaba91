//! Fixed catalog of selectable attributes. The collection order is the
//! display order; ids come from a closed identifier alphabet, so they never
//! need escaping inside the share link.

use serde::Serialize;

/// One selectable attribute card: a stable id plus display copy.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub static ATTRIBUTES: &[AttributeDefinition] = &[
    AttributeDefinition {
        id: "creative",
        title: "Creative",
        description: "Brings original ideas and new perspectives.",
    },
    AttributeDefinition {
        id: "focused",
        title: "Focused",
        description: "Deep work and consistent follow-through.",
    },
    AttributeDefinition {
        id: "curious",
        title: "Curious",
        description: "Always learning and asking questions.",
    },
    AttributeDefinition {
        id: "empathic",
        title: "Empathic",
        description: "Understands and cares about others.",
    },
    AttributeDefinition {
        id: "analytical",
        title: "Analytical",
        description: "Enjoys problem solving and structure.",
    },
    AttributeDefinition {
        id: "visionary",
        title: "Visionary",
        description: "Sees long-term possibilities and direction.",
    },
    AttributeDefinition {
        id: "adaptable",
        title: "Adaptable",
        description: "Adjusts quickly to new situations.",
    },
    AttributeDefinition {
        id: "resilient",
        title: "Resilient",
        description: "Bounces back and stays persistent.",
    },
    AttributeDefinition {
        id: "intuitive",
        title: "Intuitive",
        description: "Relies on gut feeling and insight.",
    },
    AttributeDefinition {
        id: "bold",
        title: "Bold",
        description: "Takes risks and acts decisively.",
    },
];

pub fn find(id: &str) -> Option<&'static AttributeDefinition> {
    ATTRIBUTES.iter().find(|attr| attr.id == id)
}

pub fn is_known(id: &str) -> bool {
    find(id).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique() {
        for (idx, attr) in ATTRIBUTES.iter().enumerate() {
            assert!(
                !ATTRIBUTES[idx + 1..].iter().any(|other| other.id == attr.id),
                "duplicate id {}",
                attr.id
            );
        }
    }

    #[test]
    fn find_known_and_unknown() {
        assert_eq!(find("creative").map(|a| a.title), Some("Creative"));
        assert!(find("unknownid").is_none());
        assert!(is_known("bold"));
        assert!(!is_known("BOLD"));
    }

    #[test]
    fn display_order_starts_with_creative_and_ends_with_bold() {
        assert_eq!(ATTRIBUTES.first().map(|a| a.id), Some("creative"));
        assert_eq!(ATTRIBUTES.last().map(|a| a.id), Some("bold"));
        assert_eq!(ATTRIBUTES.len(), 10);
    }
}
