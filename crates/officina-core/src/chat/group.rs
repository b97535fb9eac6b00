//! Chat group domain model and the fixed default groups.
//!
//! Groups are user-defined labels for organizing sessions; they are not a
//! security boundary.

use super::id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-defined label used to organize chat sessions.
///
/// Invariant: a group cannot be deleted while any session references it.
/// The store enforces this on deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatGroup {
    /// Unique group identifier (opaque string)
    pub id: String,
    /// Display label
    pub name: String,
    /// Display color tag (CSS hex color)
    pub color: String,
    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Timestamp when the group was created
    pub created_at: DateTime<Utc>,
    /// Timestamp when the group was last updated
    pub updated_at: DateTime<Utc>,
}

impl ChatGroup {
    /// Creates a fresh group with a generated id.
    pub fn new(name: impl Into<String>, color: impl Into<String>, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id::generate("group"),
            name: name.into(),
            color: color.into(),
            description,
            created_at: now,
            updated_at: now,
        }
    }

    fn fixed(id: &str, name: &str, color: &str, description: &str) -> Self {
        let now = Utc::now();
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            description: Some(description.to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges the provided fields of `patch` and refreshes `updated_at`.
    pub fn apply(&mut self, patch: GroupPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        self.updated_at = Utc::now();
    }
}

/// Partial update of a group. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct GroupPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
}

/// Fixed id of the bootstrap "General" group.
pub const GROUP_GENERAL: &str = "group_general";
/// Fixed id of the bootstrap "Automation" group.
pub const GROUP_AUTOMATION: &str = "group_automation";
/// Fixed id of the bootstrap "Documentation" group.
pub const GROUP_DOCUMENTATION: &str = "group_documentation";

/// The three groups seeded into an empty store.
///
/// Ids, names and colors are fixed so repeated bootstraps are idempotent.
pub fn default_groups() -> Vec<ChatGroup> {
    vec![
        ChatGroup::fixed(
            GROUP_GENERAL,
            "General",
            "#3b82f6",
            "General purpose conversations",
        ),
        ChatGroup::fixed(
            GROUP_AUTOMATION,
            "Automation",
            "#10b981",
            "Industrial automation and PLC related chats",
        ),
        ChatGroup::fixed(
            GROUP_DOCUMENTATION,
            "Documentation",
            "#f59e0b",
            "Documentation generation and technical writing",
        ),
    ]
}
