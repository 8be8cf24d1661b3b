use std::sync::Arc;

use tracing::{error, info};

use crate::client::LessonClient;
use crate::navigation::{DeferredNavigation, Navigator};
use crate::validation::{FieldChange, FieldErrors, LessonForm};
use crate::views::form::FormModel;
use crate::views::state::SubmitState;

pub struct CreateView {
    client: Arc<dyn LessonClient>,
    navigator: Arc<dyn Navigator>,
    form: FormModel,
}

impl CreateView {
    pub fn new(client: Arc<dyn LessonClient>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            client,
            navigator,
            form: FormModel::default(),
        }
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
        self.form.submit_state().is_submitting()
    }

    pub fn change(&mut self, change: FieldChange) {
        self.form.change(change);
    }

    pub fn reset(&mut self) {
        self.form.reset();
    }

    /// Validates and, when the form is clean, POSTs it. Invalid forms never
    /// reach the network.
    pub async fn submit(&mut self) {
        let Some(payload) = self.form.begin_submit() else {
            return;
        };

        let outcome = self.client.create(&payload).await;
        match self.form.finish_submit(outcome, &self.navigator) {
            Ok(lesson) => info!("Lesson created successfully: {}", lesson.id),
            Err(e) => error!("Error creating lesson: {}", e),
        }
    }
}
