use std::sync::Arc;

use tracing::{error, info};

use crate::client::LessonClient;
use crate::models::{Lesson, LessonId};
use crate::navigation::{DeferredNavigation, Navigator, Route};
use crate::validation::{FieldChange, FieldErrors, LessonForm};
use crate::views::form::FormModel;
use crate::views::state::{FetchState, SubmitState};

/// Loads one lesson into a form and PUTs the edited version back.
///
/// The form is only usable once the initial fetch has produced a record; a
/// failed or empty fetch is terminal for the view.
pub struct EditView {
    client: Arc<dyn LessonClient>,
    navigator: Arc<dyn Navigator>,
    id: LessonId,
    fetch: FetchState<Option<Lesson>>,
    form: FormModel,
}

impl EditView {
    pub fn new(client: Arc<dyn LessonClient>, navigator: Arc<dyn Navigator>, id: LessonId) -> Self {
        Self {
            client,
            navigator,
            id,
            fetch: FetchState::Idle,
            form: FormModel::default(),
        }
    }

    pub fn id(&self) -> &LessonId {
        &self.id
    }

    pub fn fetch_state(&self) -> &FetchState<Option<Lesson>> {
        &self.fetch
    }

    pub fn is_editable(&self) -> bool {
        matches!(self.fetch, FetchState::Success(Some(_)))
    }

    pub fn form(&self) -> &LessonForm {
        self.form.form()
    }

    pub fn errors(&self) -> &FieldErrors {
        self.form.errors()
    }

    pub fn submit_state(&self) -> &SubmitState {
        self.form.submit_state()
    }

    pub fn redirect(&self) -> Option<&DeferredNavigation> {
        self.form.redirect()
    }

    pub fn is_busy(&self) -> bool {
        self.fetch.is_loading() || self.form.submit_state().is_submitting()
    }

    pub async fn activate(&mut self) {
        self.fetch = FetchState::Loading;
        self.fetch = match self.client.get_by_id(&self.id).await {
            Ok(Some(lesson)) => {
                self.form = FormModel::with_form(LessonForm::from_lesson(&lesson));
                FetchState::Success(Some(lesson))
            }
            Ok(None) => FetchState::Success(None),
            Err(e) => {
                error!("Error fetching lesson {}: {}", self.id, e);
                FetchState::Error(e.to_string())
            }
        };
    }

    pub fn change(&mut self, change: FieldChange) {
        if self.is_editable() {
            self.form.change(change);
        }
    }

    pub fn reset(&mut self) {
        self.form.reset();
    }

    /// Leaves without saving.
    pub fn cancel(&self) {
        self.navigator.navigate_to(Route::AllLessons);
    }

    /// Full replace of the record with the form contents. Inert until the
    /// initial fetch has populated the form.
    pub async fn submit(&mut self) {
        if !self.is_editable() {
            return;
        }
        let Some(payload) = self.form.begin_submit() else {
            return;
        };

        let outcome = self.client.update(&self.id, &payload).await;
        match self.form.finish_submit(outcome, &self.navigator) {
            Ok(lesson) => info!("Lesson updated successfully: {}", lesson.id),
            Err(e) => error!("Error updating lesson {}: {}", self.id, e),
        }
    }
}
