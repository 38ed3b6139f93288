use log::{info, warn};

use super::{
    helpers::{
        add, check_conflict, check_prerequisites, filter_by_department, find_course,
        list_departments, remove, total_credits,
    },
    models::{Catalog, Command, Report, Schedule},
};

/// Owns everything a browsing session needs: the loaded catalog, the
/// department currently shown and the schedule being assembled.
/// Every [`Command`] is one state transition producing one [`Report`].
#[derive(Debug, Clone)]
pub struct Planner {
    catalog: Catalog,
    department: Option<String>,
    schedule: Schedule,
}

impl Planner {
    pub fn new(catalog: Catalog) -> Self {
        Planner {
            catalog,
            department: None,
            schedule: Schedule::new(),
        }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    pub fn apply(&mut self, command: Command) -> Report {
        match command {
            Command::Filter { department } => {
                self.department = department;
                let courses = filter_by_department(&self.catalog, self.department())
                    .into_iter()
                    .map(|entry| entry.code().to_owned())
                    .collect();
                Report::Listing {
                    department: self.department.clone(),
                    courses,
                }
            }
            Command::Departments => Report::Departments {
                departments: list_departments(&self.catalog),
            },
            Command::Show { id } => {
                let Some(entry) = find_course(&self.catalog, &id) else {
                    return Report::UnknownCourse { id };
                };
                Report::Details {
                    course: entry.clone(),
                    in_schedule: self.schedule.contains(&id),
                    prerequisites: check_prerequisites(&entry.course, &self.schedule),
                    conflict_with: check_conflict(entry, &self.schedule)
                        .with
                        .filter(|existing| existing.id() != id)
                        .map(|existing| existing.code().to_owned()),
                }
            }
            Command::Add { id } => {
                let Some(entry) = find_course(&self.catalog, &id) else {
                    warn!("Tried to add unknown course {}", id);
                    return Report::UnknownCourse { id };
                };
                match add(entry, &self.schedule) {
                    Ok(schedule) => {
                        self.schedule = schedule;
                        info!("Added {} to the schedule", entry.code());
                        Report::Added {
                            code: entry.code().to_owned(),
                            total_credits: total_credits(&self.schedule),
                        }
                    }
                    Err(error) => {
                        match error.conflicting_code() {
                            Some(code) => warn!("Rejected {}: clashes with {}", entry.code(), code),
                            None => warn!("Rejected {}: {}", entry.code(), error),
                        }
                        Report::Rejected {
                            id,
                            message: error.to_string(),
                            error,
                        }
                    }
                }
            }
            Command::Remove { id } => {
                let was_scheduled = self.schedule.contains(&id);
                self.schedule = remove(&id, &self.schedule);
                if was_scheduled {
                    info!("Removed {} from the schedule", id);
                }
                Report::Removed {
                    id,
                    was_scheduled,
                    total_credits: total_credits(&self.schedule),
                }
            }
            Command::Schedule => Report::Schedule {
                courses: self
                    .schedule
                    .iter()
                    .map(|entry| entry.code().to_owned())
                    .collect(),
                total_credits: total_credits(&self.schedule),
            },
        }
    }
}
