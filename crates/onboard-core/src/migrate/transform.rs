//! Per-family transforms from legacy records to remote insert payloads.
//!
//! Each transform validates one untrusted record and applies the defaulting
//! rules (missing optional fields, empty structures, enum domains). A
//! record that does not satisfy its family's required shape yields a
//! per-record error; the caller keeps iterating.

use crate::error::{OnboardError, Result};
use crate::models::legacy::{
    LegacyEmployee, LegacyGalleryItem, LegacyMission, LegacyPeopleNote, LegacyTag, LegacyTask,
};
use crate::models::remote::{
    EmployeeInsert, GalleryItemInsert, MissionInsert, PeopleNoteInsert, RequirementInsert,
    TagInsert, TaskInsert,
};
use serde_json::Value;

fn decode<T: serde::de::DeserializeOwned>(family: &str, record: &Value) -> Result<T> {
    serde_json::from_value(record.clone()).map_err(|e| OnboardError::Validation {
        field: family.to_string(),
        message: e.to_string(),
    })
}

pub(crate) fn transform_tag(record: &Value) -> Result<TagInsert> {
    let tag: LegacyTag = decode("tag", record)?;
    Ok(TagInsert {
        name: tag.name,
        color: tag.color,
        icon: tag.icon,
    })
}

/// Returns the insert payload plus the tag names to attach afterwards.
pub(crate) fn transform_task(record: &Value) -> Result<(TaskInsert, Vec<String>)> {
    let task: LegacyTask = decode("task", record)?;
    let insert = TaskInsert {
        title: task.title,
        description: task.description,
        due_date: task.due_date,
        completed: task.completed,
        notes: task.notes,
        link: task.link,
        priority: task.priority,
        department: task.department,
    };
    Ok((insert, task.tags))
}

/// Returns the mission payload plus its flattened requirement inputs.
pub(crate) fn transform_mission(record: &Value) -> Result<(MissionInsert, Vec<RequirementInsert>)> {
    let mission: LegacyMission = decode("mission", record)?;
    let requirements = mission
        .requirements
        .into_iter()
        .map(|req| RequirementInsert {
            tag: req.tag,
            count: req.count,
            current: req.current,
        })
        .collect();
    let insert = MissionInsert {
        title: mission.title,
        description: mission.description,
        deadline: mission.deadline,
        link: mission.link,
        progress: mission.progress,
        completed: mission.completed,
        reward_type: mission.reward_type,
        reward_value: mission.reward_value,
    };
    Ok((insert, requirements))
}

/// Returns the item payload plus the tag names to attach afterwards.
pub(crate) fn transform_gallery_item(
    record: &Value,
) -> Result<(GalleryItemInsert, Vec<String>)> {
    let item: LegacyGalleryItem = decode("gallery item", record)?;
    let insert = GalleryItemInsert {
        item_type: item.item_type,
        title: item.title,
        description: item.description,
        content: item.content,
        location: item.location,
        date: item.date,
        image_url: item.image_url,
        alt_text: item.alt_text,
        metadata: item.metadata,
        permissions: item.permissions,
    };
    Ok((insert, item.tags))
}

pub(crate) fn transform_employee(record: &Value) -> Result<EmployeeInsert> {
    let employee: LegacyEmployee = decode("employee", record)?;
    Ok(EmployeeInsert {
        full_name: employee.full_name,
        start_date: employee.start_date,
        position: employee.position,
        department: employee.department,
        work_arrangement: employee.work_arrangement,
        work_arrangement_details: employee.work_arrangement_details,
        supervisor: employee.supervisor,
        contact: employee.contact,
        onboarding_progress: employee.onboarding_progress,
        status: employee.status,
        priority: employee.priority,
        tags: employee.tags,
        notes: employee.notes,
    })
}

pub(crate) fn transform_people_note(record: &Value) -> Result<PeopleNoteInsert> {
    let person: LegacyPeopleNote = decode("people note", record)?;
    Ok(PeopleNoteInsert {
        name: person.name,
        role: person.role,
        department: person.department,
        meeting_date: person.meeting_date,
        meeting_time: person.meeting_time,
        topics: person.topics,
        notes: person.notes,
        follow_up: person.follow_up,
        photo_url: person.photo_url,
    })
}
