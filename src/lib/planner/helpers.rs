use std::{
    collections::{BTreeSet, HashSet},
    error::Error,
    fs::File,
    io::{BufReader, Write},
};

use figment::{
    providers::{Env, Format, Json, Serialized},
    Figment,
};
use log::{debug, info};

use crate::planner::{
    error::{AddError, LoadError},
    models::{
        course_model::{Course, RawCatalog},
        slot_model::TimeSlot,
        Args, Catalog, Command, Config, ConflictCheck, PrerequisiteCheck, Report, Schedule,
        ScheduledCourse,
    },
};

pub fn log_catalog(catalog: &Catalog) {
    for entry in catalog.courses() {
        debug!(
            "Offering {} \"{}\" ({} credits) at {}, requires {:?}",
            entry.code(),
            entry.course.title,
            entry.course.credits,
            entry.slot,
            entry.course.prerequisites
        );
    }
}

/* config.json, then PLANNER_ env vars, then --catalog-source on top */
pub fn get_config(args: &Args) -> Result<Config, figment::Error> {
    let mut figment = Figment::new()
        .merge(Json::file(&args.config_json_path))
        .merge(Env::prefixed("PLANNER_"));
    if let Some(source) = &args.catalog_source {
        figment = figment.merge(Serialized::default("catalog_source", source));
    }
    let config: Config = figment.extract()?;
    info!(
        "Using catalog {} with {} slot templates",
        config.catalog_source,
        config.slots.len()
    );
    Ok(config)
}

/// Writes the reports as one pretty JSON array. Logs never go to this writer.
pub fn write_reports<W: Write>(mut writer: W, reports: &[Report]) -> Result<(), Box<dyn Error>> {
    serde_json::to_writer_pretty(&mut writer, reports)?;
    writeln!(writer)?;
    Ok(())
}

pub fn get_commands(args: &Args) -> Result<Vec<Command>, Box<dyn Error>> {
    info!(
        "Reading commands.json from {}",
        std::path::absolute(&args.commands_json_path)?.display()
    );
    let commands_file = BufReader::new(File::open(&args.commands_json_path)?);
    let commands: Vec<Command> = serde_json::from_reader(commands_file)?;
    debug!("Read {} commands", commands.len());
    Ok(commands)
}

/// Sum of the UTF-16 code units of a course code.
///
/// Matches the character-code sum the browser catalog used, so a course lands
/// in the same slot here as it did there.
pub fn slot_hash(course_code: &str) -> u32 {
    course_code
        .encode_utf16()
        .fold(0u32, |acc, unit| acc.wrapping_add(u32::from(unit)))
}

/// Picks the slot a course meets in: `slots[slot_hash(code) % slots.len()]`.
pub fn assign_slot<'a>(course_code: &str, slots: &'a [TimeSlot]) -> Option<&'a TimeSlot> {
    if slots.is_empty() {
        return None;
    }
    slots.get(slot_hash(course_code) as usize % slots.len())
}

/* parse the catalog and bind every course to its slot, any bad entry fails the whole load */
pub fn load_catalog(raw: &str, slots: &[TimeSlot]) -> Result<Catalog, LoadError> {
    if slots.is_empty() {
        return Err(LoadError::EmptySlotCatalog);
    }
    let raw_catalog: RawCatalog = serde_json::from_str(raw)?;

    let mut seen_ids = HashSet::new();
    let mut courses = Vec::with_capacity(raw_catalog.courses.len());
    for raw_course in raw_catalog.courses {
        let course = Course::from(raw_course);
        if course.credits == 0 {
            return Err(LoadError::InvalidCourse {
                id: course.id,
                reason: "credit count must be positive".to_owned(),
            });
        }
        if course.terms.is_empty() {
            return Err(LoadError::InvalidCourse {
                id: course.id,
                reason: "no terms offered".to_owned(),
            });
        }
        if !seen_ids.insert(course.id.clone()) {
            return Err(LoadError::DuplicateId { id: course.id });
        }
        let slot = assign_slot(&course.course_code, slots)
            .ok_or(LoadError::EmptySlotCatalog)?
            .clone();
        courses.push(ScheduledCourse { course, slot });
    }

    info!("Loaded {} courses", courses.len());
    let catalog = Catalog::new(courses);
    log_catalog(&catalog);
    Ok(catalog)
}

pub fn list_departments(catalog: &Catalog) -> Vec<String> {
    catalog
        .courses()
        .iter()
        .map(|entry| entry.course.department.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// `None` lists the whole catalog.
pub fn filter_by_department<'a>(
    catalog: &'a Catalog,
    department: Option<&str>,
) -> Vec<&'a ScheduledCourse> {
    catalog
        .courses()
        .iter()
        .filter(|entry| department.is_none_or(|d| entry.course.department == d))
        .collect()
}

pub fn find_course<'a>(catalog: &'a Catalog, course_id: &str) -> Option<&'a ScheduledCourse> {
    catalog.courses().iter().find(|entry| entry.id() == course_id)
}

pub fn check_prerequisites(course: &Course, schedule: &Schedule) -> PrerequisiteCheck {
    let missing = course
        .prerequisites
        .iter()
        .filter(|code| !schedule.iter().any(|s| s.code() == code.as_str()))
        .cloned()
        .collect::<Vec<_>>();
    PrerequisiteCheck {
        satisfied: missing.is_empty(),
        missing,
    }
}

pub fn check_conflict<'a>(candidate: &ScheduledCourse, schedule: &'a Schedule) -> ConflictCheck<'a> {
    let with = schedule
        .iter()
        .find(|existing| candidate.slot.overlaps(&existing.slot));
    ConflictCheck {
        conflict: with.is_some(),
        with,
    }
}

pub fn add(candidate: &ScheduledCourse, schedule: &Schedule) -> Result<Schedule, AddError> {
    if schedule.contains(candidate.id()) {
        return Err(AddError::AlreadyScheduled {
            id: candidate.id().to_owned(),
        });
    }

    let prerequisites = check_prerequisites(&candidate.course, schedule);
    if !prerequisites.satisfied {
        return Err(AddError::PrerequisitesNotMet {
            missing: prerequisites.missing,
        });
    }

    if let Some(existing) = check_conflict(candidate, schedule).with {
        return Err(AddError::TimeConflict {
            with: Box::new(existing.clone()),
        });
    }

    let mut updated = schedule.clone();
    updated.push(candidate.clone());
    Ok(updated)
}

pub fn remove(course_id: &str, schedule: &Schedule) -> Schedule {
    let mut updated = schedule.clone();
    updated.retain(|c| c.id() != course_id);
    updated
}

pub fn total_credits(schedule: &Schedule) -> u32 {
    schedule.iter().map(|c| c.course.credits).sum()
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
