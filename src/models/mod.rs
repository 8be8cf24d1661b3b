pub mod lesson;

pub use lesson::{Lesson, LessonId, LessonPayload, Level, UnknownLevel};
