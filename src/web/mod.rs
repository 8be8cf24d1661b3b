pub mod render;

use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;
use crate::models::LessonId;
use crate::navigation::{Navigator, Route};
use crate::state::AppState;
use crate::validation::FieldChange;
use crate::views::{CreateView, DetailView, EditView, ListView};

/// Server-side navigator. The page itself carries the redirect (a refresh
/// meta tag), so a timer that fires here only has to be logged.
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate_to(&self, route: Route) {
        debug!("browser navigates to {}", route.path());
    }
}

/// Submitted form fields. An unchecked checkbox is absent from the body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonFormBody {
    #[serde(default)]
    pub lesson_title: String,
    #[serde(default)]
    pub lesson_image: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub estimated_time: String,
    #[serde(default)]
    pub is_completed: Option<String>,
}

impl LessonFormBody {
    pub fn into_changes(self) -> Vec<FieldChange> {
        let is_completed = matches!(self.is_completed.as_deref(), Some("true" | "on"));
        vec![
            FieldChange::LessonTitle(self.lesson_title),
            FieldChange::LessonImage(self.lesson_image),
            FieldChange::Level(self.level),
            FieldChange::EstimatedTime(self.estimated_time),
            FieldChange::IsCompleted(is_completed),
        ]
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/Home", get(home))
        .route("/AllLesson", get(all_lessons))
        .route("/CompletedLesson", get(completed_lessons))
        .route("/detail/{id}", get(lesson_detail))
        .route("/AddLesson", get(add_lesson_form).post(add_lesson))
        .route("/edit/{id}", get(edit_lesson_form).post(edit_lesson))
        .route("/lessons/{id}/delete", post(delete_lesson))
        .fallback(not_found)
        .with_state(state)
}

async fn home(State(state): State<AppState>) -> Html<String> {
    let mut view = ListView::home(state.lessons.clone());
    view.activate().await;
    Html(render::lesson_cards_page(&view, "courses"))
}

async fn completed_lessons(State(state): State<AppState>) -> Html<String> {
    let mut view = ListView::completed(state.lessons.clone());
    view.activate().await;
    Html(render::lesson_cards_page(&view, "Completed Lessons"))
}

async fn all_lessons(State(state): State<AppState>) -> Html<String> {
    let mut view = ListView::all(state.lessons.clone());
    view.activate().await;
    Html(render::lesson_table_page(&view))
}

/// Post/redirect/get: the browser lands on the list again, so a refresh
/// re-fetches instead of repeating the delete.
async fn delete_lesson(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    let mut view = ListView::all(state.lessons.clone());
    view.delete(&LessonId::new(id)).await;
    Redirect::to(&Route::AllLessons.path())
}

async fn lesson_detail(State(state): State<AppState>, Path(id): Path<String>) -> Html<String> {
    let mut view = DetailView::new(state.lessons.clone(), LessonId::new(id));
    view.activate().await;
    Html(render::detail_page(&view))
}

async fn add_lesson_form(State(state): State<AppState>) -> Html<String> {
    let view = CreateView::new(state.lessons.clone(), state.navigator.clone());
    Html(render::create_page(&view))
}

async fn add_lesson(
    State(state): State<AppState>,
    body: Result<Form<LessonFormBody>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let Form(body) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let mut view = CreateView::new(state.lessons.clone(), state.navigator.clone());
    for change in body.into_changes() {
        view.change(change);
    }
    view.submit().await;
    Ok(Html(render::create_page(&view)))
}

async fn edit_lesson_form(State(state): State<AppState>, Path(id): Path<String>) -> Html<String> {
    let mut view = EditView::new(state.lessons.clone(), state.navigator.clone(), LessonId::new(id));
    view.activate().await;
    Html(render::edit_page(&view))
}

async fn edit_lesson(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Form<LessonFormBody>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let Form(body) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;

    // The record is fetched first so a lesson deleted in the meantime
    // fails closed instead of being recreated by the PUT.
    let mut view = EditView::new(state.lessons.clone(), state.navigator.clone(), LessonId::new(id));
    view.activate().await;
    for change in body.into_changes() {
        view.change(change);
    }
    view.submit().await;
    Ok(Html(render::edit_page(&view)))
}

async fn not_found() -> AppError {
    AppError::NotFound
}
