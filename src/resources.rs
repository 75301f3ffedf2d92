//! Typed models for the scheduling collections
//!
//! The collection API serves JSON arrays of these records. The paging
//! layer itself is generic over `T: DeserializeOwned`, so these types are
//! a convenience for callers that want typed access instead of raw
//! `serde_json::Value`.

use crate::types::CollectionItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Teachers collection endpoint
pub const TEACHERS_ENDPOINT: &str = "/teachers";
/// Rooms collection endpoint
pub const ROOMS_ENDPOINT: &str = "/rooms";
/// Courses collection endpoint
pub const COURSES_ENDPOINT: &str = "/courses";
/// Schedule entries collection endpoint
pub const SCHEDULE_ENDPOINT: &str = "/schedule";

/// A teacher record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: u64,
    pub name: String,
    pub short_name: Option<String>,
    pub email: Option<String>,
    /// Whether the record has been reviewed by an administrator
    #[serde(default)]
    pub verified: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl fmt::Display for Teacher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.short_name {
            Some(short) => write!(f, "{} ({short})", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A room record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: u64,
    pub name: String,
    pub capacity: Option<u32>,
    pub building: Option<String>,
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.building {
            Some(building) => write!(f, "{} ({building})", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A course record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: u64,
    pub title: String,
    pub code: Option<String>,
    /// Elective courses are excluded from mandatory-schedule checks
    #[serde(default)]
    pub optional: bool,
    pub hours_per_week: Option<u32>,
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{code}] {}", self.title),
            None => write!(f, "{}", self.title),
        }
    }
}

/// One placed lesson in the schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: u64,
    pub course_id: u64,
    pub teacher_id: u64,
    pub room_id: Option<u64>,
    /// Day of week, 0 = Monday
    pub day: u8,
    /// Slot index within the day, 0-based
    pub slot: u8,
    pub updated_at: Option<DateTime<Utc>>,
}

impl fmt::Display for ScheduleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "course {} / teacher {} @ day {} slot {}",
            self.course_id, self.teacher_id, self.day, self.slot
        )
    }
}

impl CollectionItem for Teacher {
    fn item_id(&self) -> Option<String> {
        Some(self.id.to_string())
    }
}

impl CollectionItem for Room {
    fn item_id(&self) -> Option<String> {
        Some(self.id.to_string())
    }
}

impl CollectionItem for Course {
    fn item_id(&self) -> Option<String> {
        Some(self.id.to_string())
    }
}

impl CollectionItem for ScheduleEntry {
    fn item_id(&self) -> Option<String> {
        Some(self.id.to_string())
    }
}
