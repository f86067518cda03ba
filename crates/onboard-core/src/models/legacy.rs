//! Loosely-typed legacy records as persisted by the old client.
//!
//! Every persisted blob is `{ "state": { "<collection>": [records...] } }`
//! with camelCase record fields. Records are untrusted input: optional
//! fields default here, required fields missing or out of domain surface as
//! per-record transform errors, never as panics or family aborts.

use crate::models::remote::{
    Department, EmployeeStatus, GalleryItemType, GalleryPermissions, Priority, RewardType,
    WorkArrangement,
};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Envelope around a persisted per-family blob.
///
/// Only the `state` object matters; anything else the old client stored
/// alongside it is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct LegacyRecordSet {
    #[serde(default)]
    pub state: Map<String, Value>,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Legacy tag record from `onboard-buddy-tags`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyTag {
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Legacy task record from `onboard-buddy-tasks`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyTask {
    pub title: String,
    pub due_date: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub department: Option<Department>,
    /// Tag names to re-attach after the task exists remote-side.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Embedded requirement inside a legacy mission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyRequirement {
    pub tag: String,
    pub count: u32,
    #[serde(default)]
    pub current: u32,
}

/// Legacy mission record from `onboard-buddy-missions`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyMission {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub reward_type: Option<RewardType>,
    #[serde(default)]
    pub reward_value: Option<String>,
    #[serde(default)]
    pub requirements: Vec<LegacyRequirement>,
}

/// Legacy gallery record from `onboard-buddy-gallery`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyGalleryItem {
    #[serde(rename = "type")]
    pub item_type: GalleryItemType,
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default = "empty_object")]
    pub metadata: Value,
    #[serde(default)]
    pub permissions: GalleryPermissions,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Legacy employee record from `onboard-buddy-employees`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyEmployee {
    pub full_name: String,
    pub start_date: String,
    pub position: String,
    pub department: String,
    pub work_arrangement: WorkArrangement,
    #[serde(default = "empty_object")]
    pub work_arrangement_details: Value,
    #[serde(default = "empty_object")]
    pub supervisor: Value,
    pub contact: Value,
    #[serde(default = "empty_object")]
    pub onboarding_progress: Value,
    #[serde(default)]
    pub status: EmployeeStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

/// Legacy people-note record from `people-notes-storage`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPeopleNote {
    pub name: String,
    pub role: String,
    pub department: String,
    #[serde(default)]
    pub meeting_date: Option<String>,
    #[serde(default)]
    pub meeting_time: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub follow_up: String,
    #[serde(default)]
    pub photo_url: Option<String>,
}
