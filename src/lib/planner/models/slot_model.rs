//! Module with weekly time slot templates that courses are bound to
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while reading slot templates from configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("unknown day letter '{0}', expected one of MTWRF")]
    UnknownDay(char),

    #[error("slot must meet on at least one day")]
    NoDays,

    #[error("invalid clock time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("slot '{label}' starts at {start} which is not before its end {end}")]
    EmptyInterval {
        label: String,
        start: ClockTime,
        end: ClockTime,
    },
}

/// Set of weekdays a slot meets on, one bit per day.
///
/// Textual form uses registrar letters: `M` Monday, `T` Tuesday,
/// `W` Wednesday, `R` Thursday, `F` Friday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Days(u8);

impl Days {
    pub const MON: Days = Days(1 << 0);
    pub const TUE: Days = Days(1 << 1);
    pub const WED: Days = Days(1 << 2);
    pub const THU: Days = Days(1 << 3);
    pub const FRI: Days = Days(1 << 4);

    const LETTERS: [(char, Days); 5] = [
        ('M', Days::MON),
        ('T', Days::TUE),
        ('W', Days::WED),
        ('R', Days::THU),
        ('F', Days::FRI),
    ];

    pub const fn union(self, other: Days) -> Days {
        Days(self.0 | other.0)
    }

    pub const fn intersects(self, other: Days) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromStr for Days {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut days = Days(0);
        for letter in s.chars().filter(|c| !c.is_whitespace()) {
            let (_, day) = Days::LETTERS
                .iter()
                .find(|(l, _)| *l == letter.to_ascii_uppercase())
                .ok_or(SlotError::UnknownDay(letter))?;
            days = days.union(*day);
        }
        if days.is_empty() {
            return Err(SlotError::NoDays);
        }
        Ok(days)
    }
}

impl TryFrom<String> for Days {
    type Error = SlotError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Days> for String {
    fn from(days: Days) -> Self {
        days.to_string()
    }
}

impl fmt::Display for Days {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (letter, day) in Days::LETTERS {
            if self.intersects(day) {
                write!(f, "{}", letter)?;
            }
        }
        Ok(())
    }
}

/// Time of day in minutes since midnight, written as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    pub const fn from_hm(hours: u16, minutes: u16) -> ClockTime {
        ClockTime(hours * 60 + minutes)
    }

    pub const fn minutes(self) -> u16 {
        self.0
    }
}

impl FromStr for ClockTime {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SlotError::InvalidTime(s.to_owned());
        let (hours, minutes) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hours: u16 = hours.parse().map_err(|_| invalid())?;
        let minutes: u16 = minutes.parse().map_err(|_| invalid())?;
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }
        Ok(ClockTime::from_hm(hours, minutes))
    }
}

impl TryFrom<String> for ClockTime {
    type Error = SlotError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Raw shape of a slot template as it appears in `config.json`.
#[derive(Deserialize)]
struct RawTimeSlot {
    days: Days,
    label: Option<String>,
    start: ClockTime,
    end: ClockTime,
}

/// A weekly meeting pattern: the days a course meets and the interval
/// `[start, end)` it occupies on each of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeSlot")]
pub struct TimeSlot {
    pub days: Days,
    pub label: String,
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TimeSlot {
    pub fn new(days: Days, start: ClockTime, end: ClockTime) -> Result<TimeSlot, SlotError> {
        let label = format!("{} {}-{}", days, start, end);
        if start >= end {
            return Err(SlotError::EmptyInterval { label, start, end });
        }
        Ok(TimeSlot {
            days,
            label,
            start,
            end,
        })
    }

    /// Two slots overlap when they share a day and their half-open
    /// intervals intersect. Touching endpoints do not overlap.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.days.intersects(other.days) && self.start < other.end && self.end > other.start
    }
}

impl TryFrom<RawTimeSlot> for TimeSlot {
    type Error = SlotError;

    fn try_from(raw: RawTimeSlot) -> Result<Self, Self::Error> {
        let mut slot = TimeSlot::new(raw.days, raw.start, raw.end)?;
        if let Some(label) = raw.label {
            slot.label = label;
        }
        Ok(slot)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

const MW: Days = Days::MON.union(Days::WED);
const TR: Days = Days::TUE.union(Days::THU);
const MWF: Days = MW.union(Days::FRI);

const DEFAULT_SLOTS: [(Days, (u16, u16), (u16, u16)); 10] = [
    (MW, (8, 0), (9, 15)),
    (MW, (9, 30), (10, 45)),
    (MW, (11, 0), (12, 15)),
    (MW, (12, 30), (13, 45)),
    (MW, (14, 0), (15, 15)),
    (TR, (8, 0), (9, 15)),
    (TR, (9, 30), (10, 45)),
    (TR, (11, 0), (12, 15)),
    (TR, (12, 30), (13, 45)),
    (MWF, (10, 0), (10, 50)),
];

/// The slot catalog used when configuration does not provide one.
/// Order matters: courses are bound to slots by index.
pub fn default_slots() -> Vec<TimeSlot> {
    DEFAULT_SLOTS
        .iter()
        .map(|&(days, (sh, sm), (eh, em))| TimeSlot {
            days,
            label: format!("{} {}-{}", days, ClockTime::from_hm(sh, sm), ClockTime::from_hm(eh, em)),
            start: ClockTime::from_hm(sh, sm),
            end: ClockTime::from_hm(eh, em),
        })
        .collect()
}
