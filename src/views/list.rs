use std::sync::Arc;

use tracing::{error, info};

use crate::client::LessonClient;
use crate::models::{Lesson, LessonId};
use crate::views::state::FetchState;

/// Which slice of the collection a list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    /// Every lesson, newest id first.
    All,
    /// Home: lessons not yet completed, in server order.
    Incomplete,
    /// Lessons already completed, in server order.
    Completed,
}

impl ListFilter {
    pub fn apply(self, lessons: Vec<Lesson>) -> Vec<Lesson> {
        match self {
            ListFilter::All => sort_by_id_desc(lessons),
            ListFilter::Incomplete => lessons.into_iter().filter(|l| !l.is_completed).collect(),
            ListFilter::Completed => lessons.into_iter().filter(|l| l.is_completed).collect(),
        }
    }
}

pub fn sort_by_id_desc(mut lessons: Vec<Lesson>) -> Vec<Lesson> {
    lessons.sort_by(|a, b| b.id.cmp(&a.id));
    lessons
}

pub struct ListView {
    client: Arc<dyn LessonClient>,
    filter: ListFilter,
    state: FetchState<Vec<Lesson>>,
}

impl ListView {
    pub fn new(client: Arc<dyn LessonClient>, filter: ListFilter) -> Self {
        Self {
            client,
            filter,
            state: FetchState::Idle,
        }
    }

    pub fn all(client: Arc<dyn LessonClient>) -> Self {
        Self::new(client, ListFilter::All)
    }

    pub fn home(client: Arc<dyn LessonClient>) -> Self {
        Self::new(client, ListFilter::Incomplete)
    }

    pub fn completed(client: Arc<dyn LessonClient>) -> Self {
        Self::new(client, ListFilter::Completed)
    }

    pub fn filter(&self) -> ListFilter {
        self.filter
    }

    pub fn state(&self) -> &FetchState<Vec<Lesson>> {
        &self.state
    }

    /// Row actions are inert while a fetch or delete is in flight.
    pub fn is_busy(&self) -> bool {
        self.state.is_loading()
    }

    /// Rows to render; empty unless the last fetch succeeded.
    pub fn lessons(&self) -> &[Lesson] {
        self.state.data().map(Vec::as_slice).unwrap_or_default()
    }

    pub async fn activate(&mut self) {
        self.reload().await;
    }

    /// Invalidates whatever is shown and fetches the collection again.
    pub async fn reload(&mut self) {
        self.state = FetchState::Loading;
        self.state = match self.client.list_all().await {
            Ok(lessons) => FetchState::Success(self.filter.apply(lessons)),
            Err(e) => {
                error!("Error fetching lessons: {}", e);
                FetchState::Error(e.to_string())
            }
        };
    }

    /// Deletes one lesson, then reloads whether or not the delete went through.
    /// A failed delete is only logged; the reload shows what the server kept.
    pub async fn delete(&mut self, id: &LessonId) {
        self.state = FetchState::Loading;
        match self.client.delete_by_id(id).await {
            Ok(()) => info!("Lesson {} deleted", id),
            Err(e) => error!("Error deleting lesson {}: {}", id, e),
        }
        self.reload().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Level;

    fn lesson(id: &str, is_completed: bool) -> Lesson {
        Lesson {
            id: LessonId::new(id),
            lesson_title: format!("Lesson {}", id),
            lesson_image: "https://example.com/a.jpg".to_string(),
            level: Level::N5,
            estimated_time: 10.0,
            is_completed,
        }
    }

    fn ids(lessons: &[Lesson]) -> Vec<&str> {
        lessons.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn all_sorts_descending_by_id() {
        let lessons = ["3", "1", "4", "1", "5"].map(|id| lesson(id, false)).to_vec();
        let sorted = ListFilter::All.apply(lessons);
        assert_eq!(ids(&sorted), vec!["5", "4", "3", "1", "1"]);
    }

    #[test]
    fn sort_is_numeric_not_lexical() {
        let lessons = ["2", "10", "9"].map(|id| lesson(id, false)).to_vec();
        assert_eq!(ids(&ListFilter::All.apply(lessons)), vec!["10", "9", "2"]);
    }

    #[test]
    fn mixed_text_and_numeric_ids_sort_without_panicking() {
        let lessons: Vec<Lesson> = (0..400)
            .map(|i| match i % 3 {
                0 => lesson(&i.to_string(), false),
                1 => lesson(&format!("{}x", i), false),
                _ => lesson(&format!("lesson-{}", i % 17), false),
            })
            .collect();

        let sorted = ListFilter::All.apply(lessons);

        assert_eq!(sorted.len(), 400);
        assert_eq!(sorted[0].id.as_str(), "399");
        assert!(sorted.windows(2).all(|w| w[0].id >= w[1].id));
        let first_text = sorted.iter().position(|l| l.id.as_str().parse::<u64>().is_err()).unwrap();
        assert!(sorted[first_text..].iter().all(|l| l.id.as_str().parse::<u64>().is_err()));
    }

    #[test]
    fn incomplete_keeps_only_open_lessons() {
        let lessons = vec![lesson("1", true), lesson("2", false)];
        assert_eq!(ids(&ListFilter::Incomplete.apply(lessons)), vec!["2"]);
    }

    #[test]
    fn completed_keeps_only_finished_lessons() {
        let lessons = vec![lesson("1", true), lesson("2", false), lesson("3", true)];
        assert_eq!(ids(&ListFilter::Completed.apply(lessons)), vec!["1", "3"]);
    }
}
