//! Remote persistence API boundary.
//!
//! [`RemoteStore`] is the seam between the migration engine and the hosted
//! store. Production uses [`SupabaseClient`]; tests substitute a mock.
//! Expected rejections come back as `OnboardError::Rejected` with a
//! structured kind so callers never parse message text.

mod http;

pub use http::{AuthSession, SupabaseClient};

use crate::error::Result;
use crate::models::remote::{
    EmployeeInsert, GalleryItemInsert, MissionInsert, PeopleNoteInsert, RequirementInsert,
    TagInsert, TaskInsert,
};
use async_trait::async_trait;
use serde::Deserialize;

/// Identifier of a freshly created remote row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedRecord {
    pub id: String,
}

/// Create/delete operations the migration consumes, one per entity family
/// plus the association and compensation calls.
///
/// Every call requires an authenticated session; without one the client
/// fails with `AuthRequired`, which the engine records per record like any
/// other rejection.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn create_tag(&self, input: &TagInsert) -> Result<CreatedRecord>;

    async fn create_task(&self, input: &TaskInsert) -> Result<CreatedRecord>;

    /// Attach tag names to an existing task.
    async fn add_task_tags(&self, task_id: &str, tags: &[String]) -> Result<()>;

    /// Create a mission together with its requirements.
    ///
    /// Compound server-side: if requirement insertion fails after the
    /// mission row exists, the implementation deletes the mission and
    /// reports the requirement failure.
    async fn create_mission(
        &self,
        input: &MissionInsert,
        requirements: &[RequirementInsert],
    ) -> Result<CreatedRecord>;

    async fn create_gallery_item(&self, input: &GalleryItemInsert) -> Result<CreatedRecord>;

    /// Attach tag names to an existing gallery item.
    async fn add_gallery_tags(&self, item_id: &str, tags: &[String]) -> Result<()>;

    /// Compensating delete used when tag attachment fails after the item
    /// was created.
    async fn delete_gallery_item(&self, item_id: &str) -> Result<()>;

    async fn create_employee(&self, input: &EmployeeInsert) -> Result<CreatedRecord>;

    async fn create_people_note(&self, input: &PeopleNoteInsert) -> Result<CreatedRecord>;
}
