//! Insert payloads for the remote persistence API.
//!
//! These are the strict shapes the remote accepts: snake_case field names
//! and closed value domains. Owner columns (`user_id`, and for employees
//! `created_by` / `last_modified_by`) are stamped by the remote client from
//! the authenticated session, never by callers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Task/employee priority domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// Task department domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "HR")]
    Hr,
    #[serde(rename = "IT")]
    It,
    #[serde(rename = "Manager")]
    Manager,
}

/// Mission reward domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardType {
    Points,
    Badge,
    Achievement,
}

/// Gallery item kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryItemType {
    Photo,
    Note,
}

/// Employee work arrangement domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkArrangement {
    Remote,
    Onsite,
    Hybrid,
}

/// Employee lifecycle status domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    Active,
    Inactive,
    Archived,
}

impl Default for EmployeeStatus {
    fn default() -> Self {
        EmployeeStatus::Active
    }
}

fn default_true() -> bool {
    true
}

/// Gallery item permission flags, stored as a JSON document remote-side.
///
/// Kept camelCase on the wire; the remote treats the column as opaque JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryPermissions {
    #[serde(default)]
    pub public: bool,
    #[serde(default = "default_true")]
    pub editable: bool,
    #[serde(default = "default_true")]
    pub allow_comments: bool,
}

impl Default for GalleryPermissions {
    fn default() -> Self {
        Self {
            public: false,
            editable: true,
            allow_comments: true,
        }
    }
}

/// Insert shape for the `tags` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInsert {
    pub name: String,
    pub color: String,
    pub icon: Option<String>,
}

/// Insert shape for the `tasks` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInsert {
    pub title: String,
    pub description: Option<String>,
    pub due_date: String,
    pub completed: bool,
    pub notes: Option<String>,
    pub link: Option<String>,
    pub priority: Option<Priority>,
    pub department: Option<Department>,
}

/// Insert shape for the `missions` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionInsert {
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<String>,
    pub link: Option<String>,
    pub progress: u32,
    pub completed: bool,
    pub reward_type: Option<RewardType>,
    pub reward_value: Option<String>,
}

/// Insert shape for the `mission_requirements` table (minus `mission_id`,
/// which the remote client fills in after the parent mission exists).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementInsert {
    pub tag: String,
    pub count: u32,
    pub current: u32,
}

/// Insert shape for the `gallery_items` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItemInsert {
    #[serde(rename = "type")]
    pub item_type: GalleryItemType,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub location: Option<String>,
    pub date: String,
    pub image_url: Option<String>,
    pub alt_text: Option<String>,
    pub metadata: Value,
    pub permissions: GalleryPermissions,
}

/// Insert shape for the `employees` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeInsert {
    pub full_name: String,
    pub start_date: String,
    pub position: String,
    pub department: String,
    pub work_arrangement: WorkArrangement,
    pub work_arrangement_details: Value,
    pub supervisor: Value,
    pub contact: Value,
    pub onboarding_progress: Value,
    pub status: EmployeeStatus,
    pub priority: Priority,
    pub tags: Vec<String>,
    pub notes: String,
}

/// Insert shape for the `people_notes` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeopleNoteInsert {
    pub name: String,
    pub role: String,
    pub department: String,
    pub meeting_date: Option<String>,
    pub meeting_time: Option<String>,
    pub topics: Vec<String>,
    pub notes: String,
    pub follow_up: String,
    pub photo_url: Option<String>,
}
