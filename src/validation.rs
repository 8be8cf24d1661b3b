use std::collections::BTreeMap;

use url::Url;

use crate::models::{Lesson, LessonPayload, Level};

pub const TITLE_REQUIRED: &str = "Lesson title is required";
pub const TITLE_TOO_SHORT: &str =
    "Lesson title must contain more than 1 word (e.g., 'Kanji Master')";
pub const IMAGE_REQUIRED: &str = "Lesson image URL is required";
pub const IMAGE_INVALID: &str = "Please enter a valid URL (e.g., https://example.com/image.jpg)";
pub const LEVEL_REQUIRED: &str = "Level is required";
pub const LEVEL_INVALID: &str = "Level must be one of N1, N2, N3, N4, N5";
pub const TIME_REQUIRED: &str = "Estimated time is required";
pub const TIME_INVALID: &str = "Estimated time must be a positive number";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    LessonTitle,
    LessonImage,
    Level,
    EstimatedTime,
    IsCompleted,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::LessonTitle => "lessonTitle",
            Field::LessonImage => "lessonImage",
            Field::Level => "level",
            Field::EstimatedTime => "estimatedTime",
            Field::IsCompleted => "isCompleted",
        }
    }
}

/// One keystroke (or toggle) worth of input for a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    LessonTitle(String),
    LessonImage(String),
    Level(String),
    EstimatedTime(String),
    IsCompleted(bool),
}

impl FieldChange {
    pub fn field(&self) -> Field {
        match self {
            FieldChange::LessonTitle(_) => Field::LessonTitle,
            FieldChange::LessonImage(_) => Field::LessonImage,
            FieldChange::Level(_) => Field::Level,
            FieldChange::EstimatedTime(_) => Field::EstimatedTime,
            FieldChange::IsCompleted(_) => Field::IsCompleted,
        }
    }
}

/// Raw form input. Numeric and level fields stay as text until validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LessonForm {
    pub lesson_title: String,
    pub lesson_image: String,
    pub level: String,
    pub estimated_time: String,
    pub is_completed: bool,
}

impl LessonForm {
    pub fn from_lesson(lesson: &Lesson) -> Self {
        Self {
            lesson_title: lesson.lesson_title.clone(),
            lesson_image: lesson.lesson_image.clone(),
            level: lesson.level.code().to_string(),
            estimated_time: lesson.estimated_time.to_string(),
            is_completed: lesson.is_completed,
        }
    }

    pub fn apply(&mut self, change: FieldChange) {
        match change {
            FieldChange::LessonTitle(v) => self.lesson_title = v,
            FieldChange::LessonImage(v) => self.lesson_image = v,
            FieldChange::Level(v) => self.level = v,
            FieldChange::EstimatedTime(v) => self.estimated_time = v,
            FieldChange::IsCompleted(v) => self.is_completed = v,
        }
    }

    /// Validated, normalized request body, or every field error found.
    pub fn to_payload(&self) -> Result<LessonPayload, FieldErrors> {
        match (
            check_title(&self.lesson_title),
            check_image(&self.lesson_image),
            check_level(&self.level),
            check_estimated_time(&self.estimated_time),
        ) {
            (Ok(lesson_title), Ok(lesson_image), Ok(level), Ok(estimated_time)) => {
                Ok(LessonPayload {
                    lesson_title,
                    lesson_image,
                    level,
                    estimated_time,
                    is_completed: self.is_completed,
                })
            }
            _ => Err(validate(self)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Removes the error for `field` only; the rest are left untouched.
    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }
}

pub fn validate(form: &LessonForm) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if let Err(msg) = check_title(&form.lesson_title) {
        errors.insert(Field::LessonTitle, msg);
    }
    if let Err(msg) = check_image(&form.lesson_image) {
        errors.insert(Field::LessonImage, msg);
    }
    if let Err(msg) = check_level(&form.level) {
        errors.insert(Field::Level, msg);
    }
    if let Err(msg) = check_estimated_time(&form.estimated_time) {
        errors.insert(Field::EstimatedTime, msg);
    }

    errors
}

fn check_title(raw: &str) -> Result<String, &'static str> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(TITLE_REQUIRED);
    }
    if title.split_whitespace().count() < 2 {
        return Err(TITLE_TOO_SHORT);
    }
    Ok(title.to_string())
}

fn check_image(raw: &str) -> Result<String, &'static str> {
    let image = raw.trim();
    if image.is_empty() {
        return Err(IMAGE_REQUIRED);
    }
    // Relative references fail to parse; scheme-only URLs like `mailto:` lack a host.
    match Url::parse(image) {
        Ok(url) if url.has_host() => Ok(image.to_string()),
        _ => Err(IMAGE_INVALID),
    }
}

fn check_level(raw: &str) -> Result<Level, &'static str> {
    let level = raw.trim();
    if level.is_empty() {
        return Err(LEVEL_REQUIRED);
    }
    level.parse().map_err(|_| LEVEL_INVALID)
}

fn check_estimated_time(raw: &str) -> Result<f64, &'static str> {
    let time = raw.trim();
    if time.is_empty() {
        return Err(TIME_REQUIRED);
    }
    match time.parse::<f64>() {
        Ok(minutes) if minutes.is_finite() && minutes > 0.0 => Ok(minutes),
        _ => Err(TIME_INVALID),
    }
}
