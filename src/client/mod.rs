use std::env;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::{AppError, ClientError};
use crate::models::{Lesson, LessonId, LessonPayload};

pub const BASE_URL_VAR: &str = "LESSON_API_BASE_URL";

#[derive(Clone, Debug)]
pub struct LessonApiConfig {
    base_url: Url,
}

impl LessonApiConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');

        let parsed = Url::parse(trimmed)
            .map_err(|e| AppError::Config(format!("{} is not a valid URL: {}", BASE_URL_VAR, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "{} must be an http(s) URL, got {}",
                BASE_URL_VAR, trimmed
            )));
        }

        Ok(Self { base_url: parsed })
    }

    pub fn new_from_env() -> Result<Self, AppError> {
        let base_url = env::var(BASE_URL_VAR)
            .map_err(|_| AppError::Config(format!("{} is not set", BASE_URL_VAR)))?;
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// The id always lands as one percent-encoded path segment under the base.
    fn item_url(&self, id: &LessonId) -> Result<Url, ClientError> {
        // URL parsing drops tabs and newlines before it resolves dot segments.
        let bare: String = id
            .as_str()
            .chars()
            .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
            .collect();
        if matches!(bare.as_str(), "" | "." | "..") {
            return Err(ClientError::InvalidId(id.to_string()));
        }

        let mut url = self.base_url.clone();
        // http(s) URLs always have path segments.
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidId(id.to_string()))?
            .pop_if_empty()
            .push(id.as_str());
        Ok(url)
    }
}

/// The remote lesson collection. Every call is independent: nothing is
/// cached, retried or deduplicated.
#[async_trait]
pub trait LessonClient: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Lesson>, ClientError>;
    /// `Ok(None)` means the server answered successfully but with no record.
    async fn get_by_id(&self, id: &LessonId) -> Result<Option<Lesson>, ClientError>;
    async fn create(&self, lesson: &LessonPayload) -> Result<Lesson, ClientError>;
    async fn update(&self, id: &LessonId, lesson: &LessonPayload) -> Result<Lesson, ClientError>;
    async fn delete_by_id(&self, id: &LessonId) -> Result<(), ClientError>;
}

pub struct LessonHttpClient {
    client: Client,
    config: LessonApiConfig,
}

impl LessonHttpClient {
    pub fn new(config: LessonApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &LessonApiConfig {
        &self.config
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await.map_err(|e| {
            warn!("lesson api unreachable: {}", e);
            ClientError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("lesson api responded with {}", status);
            return Err(ClientError::Http {
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        serde_json::from_str::<T>(&body).map_err(|e| {
            warn!("Failed to parse lesson api response: {}", e);
            ClientError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl LessonClient for LessonHttpClient {
    async fn list_all(&self) -> Result<Vec<Lesson>, ClientError> {
        let url = self.config.base_url.clone();
        debug!("GET {}", url);
        let response = self.send(self.client.get(url)).await?;
        let records: Vec<Value> = Self::decode(response).await?;

        // One malformed record should not hide the rest of the collection.
        let lessons = records
            .into_iter()
            .filter_map(|record| match serde_json::from_value::<Lesson>(record) {
                Ok(lesson) => Some(lesson),
                Err(e) => {
                    warn!("Skipping malformed lesson record: {}", e);
                    None
                }
            })
            .collect();
        Ok(lessons)
    }

    async fn get_by_id(&self, id: &LessonId) -> Result<Option<Lesson>, ClientError> {
        let url = self.config.item_url(id)?;
        debug!("GET {}", url);
        let response = self.send(self.client.get(url)).await?;
        Self::decode(response).await
    }

    async fn create(&self, lesson: &LessonPayload) -> Result<Lesson, ClientError> {
        let url = self.config.base_url.clone();
        debug!("POST {}", url);
        let response = self.send(self.client.post(url).json(lesson)).await?;
        Self::decode(response).await
    }

    async fn update(&self, id: &LessonId, lesson: &LessonPayload) -> Result<Lesson, ClientError> {
        let url = self.config.item_url(id)?;
        debug!("PUT {}", url);
        let response = self.send(self.client.put(url).json(lesson)).await?;
        Self::decode(response).await
    }

    async fn delete_by_id(&self, id: &LessonId) -> Result<(), ClientError> {
        let url = self.config.item_url(id)?;
        debug!("DELETE {}", url);
        // The body is either the deleted record or an empty ack; neither is needed.
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}
