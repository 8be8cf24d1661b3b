use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::models::LessonId;

/// How long a success banner stays up before returning to the list.
pub const SUCCESS_REDIRECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    AllLessons,
    CompletedLessons,
    AddLesson,
    Detail(LessonId),
    Edit(LessonId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/Home".to_string(),
            Route::AllLessons => "/AllLesson".to_string(),
            Route::CompletedLessons => "/CompletedLesson".to_string(),
            Route::AddLesson => "/AddLesson".to_string(),
            Route::Detail(id) => format!("/detail/{}", id),
            Route::Edit(id) => format!("/edit/{}", id),
        }
    }
}

pub trait Navigator: Send + Sync {
    fn navigate_to(&self, route: Route);
}

/// A navigation that fires after `delay` unless cancelled first.
/// Dropping the handle cancels it, so a torn-down view never navigates.
#[derive(Debug)]
pub struct DeferredNavigation {
    route: Route,
    delay: Duration,
    handle: JoinHandle<()>,
}

impl DeferredNavigation {
    pub fn schedule(navigator: Arc<dyn Navigator>, route: Route, delay: Duration) -> Self {
        debug!("navigation to {} scheduled in {:?}", route.path(), delay);
        let target = route.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.navigate_to(target);
        });

        Self {
            route,
            delay,
            handle,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn cancel(self) {
        debug!("navigation to {} cancelled", self.route.path());
        // Drop aborts the timer.
    }
}

impl Drop for DeferredNavigation {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
