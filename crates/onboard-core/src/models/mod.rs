//! Data shapes on both sides of the migration.
//!
//! `legacy` holds the loosely-typed records read from client storage;
//! `remote` holds the strict insert payloads the persistence API accepts.

pub mod legacy;
pub mod remote;

pub use legacy::{
    LegacyEmployee, LegacyGalleryItem, LegacyMission, LegacyPeopleNote, LegacyRecordSet,
    LegacyRequirement, LegacyTag, LegacyTask,
};
pub use remote::{
    Department, EmployeeInsert, EmployeeStatus, GalleryItemInsert, GalleryItemType,
    GalleryPermissions, MissionInsert, PeopleNoteInsert, Priority, RequirementInsert, RewardType,
    TagInsert, TaskInsert, WorkArrangement,
};
