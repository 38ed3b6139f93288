//! Module with course model compatible with the catalog JSON (`rit_courses.json`)
use std::fmt;

use serde::{Deserialize, Serialize};

/// Catalog feeds write ids and levels either as strings or as bare numbers.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum StringOrNumber {
    Text(String),
    Number(u64),
}

impl fmt::Display for StringOrNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringOrNumber::Text(text) => f.write_str(text),
            StringOrNumber::Number(number) => write!(f, "{}", number),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawCourse {
    pub id: StringOrNumber,
    pub course_code: String,
    pub title: String,
    pub department: String,
    pub credits: u32,
    pub level: StringOrNumber,
    pub description: String,
    pub prerequisites: Vec<String>,
    pub terms: Vec<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RawCatalog {
    pub courses: Vec<RawCourse>,
}

/// A course record as loaded from the catalog. Immutable once loaded.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub course_code: String,
    pub title: String,
    pub department: String,
    pub credits: u32,
    pub level: String,
    pub description: String,
    pub prerequisites: Vec<String>,
    pub terms: Vec<String>,
}

impl From<RawCourse> for Course {
    fn from(raw: RawCourse) -> Self {
        Course {
            id: raw.id.to_string(),
            course_code: raw.course_code,
            title: raw.title,
            department: raw.department,
            credits: raw.credits,
            level: raw.level.to_string(),
            description: raw.description,
            prerequisites: raw.prerequisites,
            terms: raw.terms,
        }
    }
}
