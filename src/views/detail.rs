use std::sync::Arc;

use tracing::error;

use crate::client::LessonClient;
use crate::models::{Lesson, LessonId};
use crate::views::state::FetchState;

pub struct DetailView {
    client: Arc<dyn LessonClient>,
    id: LessonId,
    state: FetchState<Option<Lesson>>,
}

impl DetailView {
    pub fn new(client: Arc<dyn LessonClient>, id: LessonId) -> Self {
        Self {
            client,
            id,
            state: FetchState::Idle,
        }
    }

    pub fn id(&self) -> &LessonId {
        &self.id
    }

    /// `Success(None)` is the not-found state: the request worked but
    /// returned no record.
    pub fn state(&self) -> &FetchState<Option<Lesson>> {
        &self.state
    }

    pub fn lesson(&self) -> Option<&Lesson> {
        self.state.data().and_then(Option::as_ref)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.state, FetchState::Success(None))
    }

    pub async fn activate(&mut self) {
        self.state = FetchState::Loading;
        self.state = match self.client.get_by_id(&self.id).await {
            Ok(lesson) => FetchState::Success(lesson),
            Err(e) => {
                error!("Error fetching lesson detail {}: {}", self.id, e);
                FetchState::Error(e.to_string())
            }
        };
    }
}
