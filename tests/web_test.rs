mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use common::{FakeLessonClient, RecordingNavigator, lesson};
use lesson_catalog::error::ClientError;
use lesson_catalog::state::AppState;
use lesson_catalog::web::router;

fn app(client: Arc<FakeLessonClient>) -> axum::Router {
    router(AppState {
        lessons: client,
        navigator: Arc::new(RecordingNavigator::default()),
    })
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn list_page_shows_banner_and_no_table_on_fetch_failure() {
    let client = FakeLessonClient::with_lessons(vec![lesson("1", "Kanji Master", false)]);
    client.fail("list", ClientError::Http { status: 500 });

    let (status, body) = send(app(client), get("/AllLesson")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Error: HTTP error! status: 500"));
    assert!(!body.contains("<table"));
}

#[tokio::test]
async fn list_page_renders_rows_newest_first() {
    let client = FakeLessonClient::with_lessons(vec![
        lesson("1", "First Lesson", false),
        lesson("2", "Second Lesson", true),
    ]);

    let (_, body) = send(app(client), get("/AllLesson")).await;

    let first = body.find("Second Lesson").unwrap();
    let second = body.find("First Lesson").unwrap();
    assert!(first < second);
    assert!(body.contains(r#"href="/edit/2""#));
    assert!(body.contains(r#"action="/lessons/1/delete""#));
}

#[tokio::test]
async fn home_page_lists_incomplete_lessons() {
    let client = FakeLessonClient::with_lessons(vec![
        lesson("1", "Done Lesson", true),
        lesson("2", "Open Lesson", false),
    ]);

    let (_, body) = send(app(client), get("/")).await;

    assert!(body.contains("Open Lesson"));
    assert!(!body.contains("Done Lesson"));
}

#[tokio::test]
async fn detail_page_formats_minutes() {
    let mut long = lesson("3", "Long Course", false);
    long.estimated_time = 1234.0;
    let client = FakeLessonClient::with_lessons(vec![long]);

    let (_, body) = send(app(client), get("/detail/3")).await;

    assert!(body.contains("1,234 minutes"));
    assert!(body.contains("Not Completed"));
    assert!(body.contains("#3"));
}

#[tokio::test]
async fn detail_page_not_found_state() {
    let client = FakeLessonClient::with_lessons(vec![]);
    client.respond_null("8");

    let (_, body) = send(app(client), get("/detail/8")).await;

    assert!(body.contains("Lesson Not Found"));
}

#[tokio::test]
async fn invalid_add_renders_field_errors_without_calling_api() {
    let client = FakeLessonClient::with_lessons(vec![]);

    let (status, body) = send(
        app(client.clone()),
        post_form(
            "/AddLesson",
            "lessonTitle=Kanji&lessonImage=not-a-url&level=N3&estimatedTime=30",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("must contain more than 1 word"));
    assert!(body.contains("valid URL"));
    assert!(body.contains(r#"value="not-a-url""#));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn valid_add_shows_success_and_refreshes_to_list() {
    let client = FakeLessonClient::with_lessons(vec![]);

    let (_, body) = send(
        app(client.clone()),
        post_form(
            "/AddLesson",
            "lessonTitle=Kanji+Master&lessonImage=https%3A%2F%2Fexample.com%2Fk.jpg&level=N2&estimatedTime=45&isCompleted=true",
        ),
    )
    .await;

    assert!(body.contains("Lesson created successfully! Redirecting to all lessons..."));
    assert!(body.contains(r#"content="2;url=/AllLesson""#));
    let lessons = client.lessons();
    let created = &lessons[0];
    assert_eq!(created.lesson_title, "Kanji Master");
    assert!(created.is_completed);
}

#[tokio::test]
async fn edit_submit_replaces_record() {
    let client = FakeLessonClient::with_lessons(vec![lesson("5", "Grammar Basics", false)]);

    let (_, body) = send(
        app(client.clone()),
        post_form(
            "/edit/5",
            "lessonTitle=Grammar+Basics&lessonImage=https%3A%2F%2Fexample.com%2F5.jpg&level=N1&estimatedTime=30",
        ),
    )
    .await;

    assert!(body.contains("Lesson updated successfully!"));
    assert_eq!(client.calls(), vec!["get", "update"]);
    assert_eq!(client.lessons()[0].level.code(), "N1");
}

#[tokio::test]
async fn edit_page_fetch_failure_hides_form() {
    let client = FakeLessonClient::with_lessons(vec![]);

    let (_, body) = send(app(client), get("/edit/42")).await;

    assert!(body.contains("Failed to load lesson data: HTTP error! status: 404"));
    assert!(!body.contains("<form"));
}

#[tokio::test]
async fn delete_redirects_back_to_the_list() {
    let client = FakeLessonClient::with_lessons(vec![
        lesson("1", "First Lesson", false),
        lesson("2", "Second Lesson", false),
    ]);

    let response = app(client.clone())
        .oneshot(post_form("/lessons/2/delete", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/AllLesson");
    assert_eq!(client.calls(), vec!["delete", "list"]);

    let (_, body) = send(app(client.clone()), get("/AllLesson")).await;
    assert!(body.contains("First Lesson"));
    assert!(!body.contains("Second Lesson"));
}

#[tokio::test]
async fn list_page_with_text_ids_renders() {
    let client = FakeLessonClient::with_lessons(
        (0..60)
            .map(|i| {
                let id = if i % 2 == 0 { i.to_string() } else { format!("kanji-{}", i) };
                lesson(&id, "Some Lesson", false)
            })
            .collect(),
    );

    let (status, body) = send(app(client), get("/AllLesson")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.find(r#"href="/edit/58""#).unwrap() < body.find(r#"href="/edit/kanji-59""#).unwrap());
}

#[tokio::test]
async fn unknown_path_is_404() {
    let client = FakeLessonClient::with_lessons(vec![]);

    let (status, _) = send(app(client), get("/nowhere")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
