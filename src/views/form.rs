use std::sync::Arc;

use crate::error::ClientError;
use crate::models::{Lesson, LessonPayload};
use crate::navigation::{DeferredNavigation, Navigator, Route, SUCCESS_REDIRECT_DELAY};
use crate::validation::{FieldChange, FieldErrors, LessonForm};
use crate::views::state::SubmitState;

/// Form values, inline field errors and the submit machine shared by the
/// create and edit screens.
#[derive(Debug, Default)]
pub struct FormModel {
    form: LessonForm,
    errors: FieldErrors,
    submit: SubmitState,
    redirect: Option<DeferredNavigation>,
}

impl FormModel {
    pub fn with_form(form: LessonForm) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    pub fn form(&self) -> &LessonForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn submit_state(&self) -> &SubmitState {
        &self.submit
    }

    pub fn redirect(&self) -> Option<&DeferredNavigation> {
        self.redirect.as_ref()
    }

    /// Sets one field and drops that field's error without revalidating.
    pub fn change(&mut self, change: FieldChange) {
        self.errors.clear(change.field());
        self.form.apply(change);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Starts a submission. Returns the request body, or `None` when the
    /// form is invalid (errors are recorded and the machine stays idle) or a
    /// submission is already in flight.
    pub(crate) fn begin_submit(&mut self) -> Option<LessonPayload> {
        if self.submit.is_submitting() {
            return None;
        }
        self.submit = SubmitState::Idle;
        if let Some(pending) = self.redirect.take() {
            pending.cancel();
        }

        match self.form.to_payload() {
            Ok(payload) => {
                self.errors = FieldErrors::default();
                self.submit = SubmitState::Submitting;
                Some(payload)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    /// Records the outcome. On success the list route is scheduled after the
    /// success delay; on failure the entered values stay for resubmission.
    pub(crate) fn finish_submit(
        &mut self,
        outcome: Result<Lesson, ClientError>,
        navigator: &Arc<dyn Navigator>,
    ) -> Result<Lesson, ClientError> {
        match &outcome {
            Ok(_) => {
                self.submit = SubmitState::Success;
                self.redirect = Some(DeferredNavigation::schedule(
                    navigator.clone(),
                    Route::AllLessons,
                    SUCCESS_REDIRECT_DELAY,
                ));
            }
            Err(e) => {
                self.submit = SubmitState::Error(e.to_string());
            }
        }
        outcome
    }
}
