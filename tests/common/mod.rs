#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lesson_catalog::client::LessonClient;
use lesson_catalog::error::ClientError;
use lesson_catalog::models::{Lesson, LessonId, LessonPayload, Level};
use lesson_catalog::navigation::{Navigator, Route};

pub fn lesson(id: &str, title: &str, is_completed: bool) -> Lesson {
    Lesson {
        id: LessonId::new(id),
        lesson_title: title.to_string(),
        lesson_image: format!("https://example.com/{}.jpg", id),
        level: Level::N3,
        estimated_time: 30.0,
        is_completed,
    }
}

#[derive(Default)]
struct Store {
    lessons: Vec<Lesson>,
    next_id: u64,
    calls: Vec<&'static str>,
    failures: HashMap<&'static str, ClientError>,
    null_ids: Vec<LessonId>,
}

/// In-memory collection that hands out ids the way the hosted mock API does.
#[derive(Default)]
pub struct FakeLessonClient {
    store: Mutex<Store>,
}

impl FakeLessonClient {
    pub fn with_lessons(lessons: Vec<Lesson>) -> Arc<Self> {
        let next_id = lessons
            .iter()
            .filter_map(|l| l.id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Arc::new(Self {
            store: Mutex::new(Store {
                lessons,
                next_id,
                ..Store::default()
            }),
        })
    }

    /// Makes every later call of `op` ("list", "get", "create", "update", "delete") fail.
    pub fn fail(&self, op: &'static str, error: ClientError) {
        self.store.lock().unwrap().failures.insert(op, error);
    }

    pub fn respond_null(&self, id: &str) {
        self.store.lock().unwrap().null_ids.push(LessonId::new(id));
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.store.lock().unwrap().calls.clone()
    }

    pub fn lessons(&self) -> Vec<Lesson> {
        self.store.lock().unwrap().lessons.clone()
    }

    fn begin(&self, op: &'static str) -> Result<std::sync::MutexGuard<'_, Store>, ClientError> {
        let mut store = self.store.lock().unwrap();
        store.calls.push(op);
        if let Some(err) = store.failures.get(op).cloned() {
            return Err(err);
        }
        Ok(store)
    }
}

#[async_trait]
impl LessonClient for FakeLessonClient {
    async fn list_all(&self) -> Result<Vec<Lesson>, ClientError> {
        let store = self.begin("list")?;
        Ok(store.lessons.clone())
    }

    async fn get_by_id(&self, id: &LessonId) -> Result<Option<Lesson>, ClientError> {
        let store = self.begin("get")?;
        if store.null_ids.contains(id) {
            return Ok(None);
        }
        store
            .lessons
            .iter()
            .find(|l| &l.id == id)
            .cloned()
            .map(Some)
            .ok_or(ClientError::Http { status: 404 })
    }

    async fn create(&self, lesson: &LessonPayload) -> Result<Lesson, ClientError> {
        let mut store = self.begin("create")?;
        store.next_id += 1;
        let created = Lesson::with_payload(LessonId::new(store.next_id.to_string()), lesson.clone());
        store.lessons.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &LessonId, lesson: &LessonPayload) -> Result<Lesson, ClientError> {
        let mut store = self.begin("update")?;
        let slot = store
            .lessons
            .iter_mut()
            .find(|l| &l.id == id)
            .ok_or(ClientError::Http { status: 404 })?;
        *slot = Lesson::with_payload(id.clone(), lesson.clone());
        Ok(slot.clone())
    }

    async fn delete_by_id(&self, id: &LessonId) -> Result<(), ClientError> {
        let mut store = self.begin("delete")?;
        let before = store.lessons.len();
        store.lessons.retain(|l| &l.id != id);
        if store.lessons.len() == before {
            return Err(ClientError::Http { status: 404 });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}
