use std::sync::Arc;

use crate::client::LessonClient;
use crate::navigation::Navigator;

#[derive(Clone)]
pub struct AppState {
    pub lessons: Arc<dyn LessonClient>,
    pub navigator: Arc<dyn Navigator>,
}
