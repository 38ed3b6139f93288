use std::path::PathBuf;

use clap::{command, Parser};
use serde::{Deserialize, Serialize};

use self::{
    course_model::Course,
    slot_model::{default_slots, TimeSlot},
};
use super::error::AddError;

pub mod course_model;
pub mod slot_model;

/// A model for describing ARGS of the tool.
/// Consists of:
/// 1. Path to config.json, that tells where the catalog lives and which slot templates to use.
/// 2. Path to commands.json, that lists the user actions to replay against the catalog.
/// 3. Optional catalog source overriding the one from config.json.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, value_name = "FILE", default_value = "config.json")]
    pub config_json_path: PathBuf,
    #[arg(long, value_name = "FILE", default_value = "commands.json")]
    pub commands_json_path: PathBuf,
    /// Path or http(s) URL of the course catalog
    #[arg(long, value_name = "SOURCE")]
    pub catalog_source: Option<String>,
}

/// A model for describing configuration of the tool.
/// Consists of:
/// 1. Catalog source: a local path or an http(s) URL serving the catalog JSON
/// 2. Slot templates courses are bound to. Falls back to the built-in weekly grid
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub catalog_source: String,
    #[serde(default = "default_slots")]
    pub slots: Vec<TimeSlot>,
}

/// A course bound to the slot derived from its course code.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScheduledCourse {
    #[serde(flatten)]
    pub course: Course,
    pub slot: TimeSlot,
}

impl ScheduledCourse {
    pub fn id(&self) -> &str {
        &self.course.id
    }

    pub fn code(&self) -> &str {
        &self.course.course_code
    }
}

/// Every course offered, in the order the catalog lists them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    courses: Vec<ScheduledCourse>,
}

impl Catalog {
    pub(crate) fn new(courses: Vec<ScheduledCourse>) -> Self {
        Catalog { courses }
    }

    pub fn courses(&self) -> &[ScheduledCourse] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

/// The user's in-progress selection, kept in insertion order and unique by
/// course id. Only grows through [`super::helpers::add`], so no two members
/// ever share a day and an overlapping interval.
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct Schedule {
    courses: Vec<ScheduledCourse>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduledCourse> {
        self.courses.iter()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn contains(&self, course_id: &str) -> bool {
        self.courses.iter().any(|c| c.id() == course_id)
    }

    pub(crate) fn push(&mut self, course: ScheduledCourse) {
        self.courses.push(course);
    }

    pub(crate) fn retain(&mut self, keep: impl FnMut(&ScheduledCourse) -> bool) {
        self.courses.retain(keep);
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduledCourse;
    type IntoIter = std::slice::Iter<'a, ScheduledCourse>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Outcome of checking a course's prerequisites against a schedule.
/// `missing` keeps the order of the course's own prerequisite list.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PrerequisiteCheck {
    pub satisfied: bool,
    pub missing: Vec<String>,
}

/// Outcome of checking a candidate's slot against a schedule.
/// `with` is the first conflicting course in insertion order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConflictCheck<'a> {
    pub conflict: bool,
    pub with: Option<&'a ScheduledCourse>,
}

/// A single user action against the planner.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Command {
    Filter {
        #[serde(default)]
        department: Option<String>,
    },
    Departments,
    Show {
        id: String,
    },
    Add {
        id: String,
    },
    Remove {
        id: String,
    },
    Schedule,
}

/// What the planner tells the presentation layer after a [`Command`].
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Report {
    Listing {
        department: Option<String>,
        courses: Vec<String>,
    },
    Departments {
        departments: Vec<String>,
    },
    Details {
        course: ScheduledCourse,
        in_schedule: bool,
        prerequisites: PrerequisiteCheck,
        conflict_with: Option<String>,
    },
    Added {
        code: String,
        total_credits: u32,
    },
    Rejected {
        id: String,
        message: String,
        error: AddError,
    },
    Removed {
        id: String,
        was_scheduled: bool,
        total_credits: u32,
    },
    Schedule {
        courses: Vec<String>,
        total_credits: u32,
    },
    UnknownCourse {
        id: String,
    },
}
