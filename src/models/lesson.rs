use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Server-assigned identifier. The collection endpoint may send it as a JSON
/// string or a number, so both are accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct LessonId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

impl From<RawId> for LessonId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => LessonId(s),
            RawId::Number(n) => LessonId(n.to_string()),
        }
    }
}

impl From<LessonId> for String {
    fn from(id: LessonId) -> Self {
        id.0
    }
}

impl LessonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric(&self) -> Option<u64> {
        self.0.trim().parse().ok()
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Text ids sort below numeric ids. Numeric ids compare by value, text ids
// lexically, and equal values fall back to the raw text so the order stays total.
impl Ord for LessonId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for LessonId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    N1,
    N2,
    N3,
    N4,
    N5,
}

impl Level {
    pub const ALL: [Level; 5] = [Level::N1, Level::N2, Level::N3, Level::N4, Level::N5];

    pub fn code(&self) -> &'static str {
        match self {
            Level::N1 => "N1",
            Level::N2 => "N2",
            Level::N3 => "N3",
            Level::N4 => "N4",
            Level::N5 => "N5",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown level: {0}")]
pub struct UnknownLevel(pub String);

impl FromStr for Level {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.code() == s)
            .ok_or_else(|| UnknownLevel(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: LessonId,
    pub lesson_title: String,
    pub lesson_image: String,
    pub level: Level,
    /// Minutes.
    pub estimated_time: f64,
    #[serde(default)]
    pub is_completed: bool,
}

impl Lesson {
    pub fn payload(&self) -> LessonPayload {
        LessonPayload {
            lesson_title: self.lesson_title.clone(),
            lesson_image: self.lesson_image.clone(),
            level: self.level,
            estimated_time: self.estimated_time,
            is_completed: self.is_completed,
        }
    }

    pub fn with_payload(id: LessonId, payload: LessonPayload) -> Self {
        Self {
            id,
            lesson_title: payload.lesson_title,
            lesson_image: payload.lesson_image,
            level: payload.level,
            estimated_time: payload.estimated_time,
            is_completed: payload.is_completed,
        }
    }
}

/// Body of POST and PUT requests: every field except the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonPayload {
    pub lesson_title: String,
    pub lesson_image: String,
    pub level: Level,
    pub estimated_time: f64,
    pub is_completed: bool,
}
