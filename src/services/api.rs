//! Volunteam REST API client
//!
//! This service talks to the remote events/users API: listing and creating
//! events, updating an event's volunteer roster and fetching user details.

use std::time::{Duration, Instant};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use crate::config::settings::ApiConfig;
use crate::models::event::{UpdateVolunteersRequest, VolunteeringEvent};
use crate::models::user::User;
use crate::utils::errors::{Result, VolunteamError};
use crate::utils::logging::{log_api_error, log_request};

/// Remote source of events and users
#[async_trait]
pub trait VolunteamApi: Send + Sync {
    async fn list_events(&self) -> Result<Vec<VolunteeringEvent>>;

    async fn create_event(&self, event: &VolunteeringEvent) -> Result<()>;

    /// Append `user_id` to the event's roster; the returned event is authoritative
    async fn update_volunteers(&self, event: &VolunteeringEvent, user_id: &str) -> Result<VolunteeringEvent>;

    async fn get_user_details(&self, user_id: &str) -> Result<User>;
}

/// Error body some API deployments return
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// reqwest-backed implementation of [`VolunteamApi`]
#[derive(Clone, Debug)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
}

impl HttpApiClient {
    /// Create a new HttpApiClient instance
    pub fn new(config: &ApiConfig) -> Result<Self> {
        url::Url::parse(&config.base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(VolunteamError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> (RequestBuilder, String) {
        let url = self.endpoint(segments);
        (self.client.request(method, &url), url)
    }

    async fn send(&self, builder: RequestBuilder, method: &str, url: &str) -> Result<Response> {
        let started = Instant::now();
        let response = builder.send().await.map_err(|e| {
            log_api_error("volunteam", &e.to_string(), Some(url));
            VolunteamError::Http(e)
        })?;

        log_request(method, url, response.status().as_u16(), started.elapsed().as_millis() as u64);
        Ok(response)
    }

    async fn error_from(response: Response) -> VolunteamError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status.canonical_reason().unwrap_or("Request failed").to_string()
                } else {
                    body
                }
            });

        VolunteamError::Api { status: status.as_u16(), message }
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T> {
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl VolunteamApi for HttpApiClient {
    async fn list_events(&self) -> Result<Vec<VolunteeringEvent>> {
        let (builder, url) = self.request(Method::GET, &["events"]);
        let response = self.send(builder, "GET", &url).await?;
        let events: Vec<VolunteeringEvent> = Self::json(response).await?;
        debug!(count = events.len(), "Events fetched");
        Ok(events)
    }

    async fn create_event(&self, event: &VolunteeringEvent) -> Result<()> {
        let (builder, url) = self.request(Method::POST, &["events"]);
        let response = self.send(builder.json(event), "POST", &url).await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        debug!(event_id = %event.id, "Event created");
        Ok(())
    }

    async fn update_volunteers(&self, event: &VolunteeringEvent, user_id: &str) -> Result<VolunteeringEvent> {
        let body = UpdateVolunteersRequest {
            volunteers_ids: event.volunteers_with(user_id),
        };

        let (builder, url) = self.request(Method::PATCH, &["events", &event.id]);
        let response = self.send(builder.json(&body), "PATCH", &url).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(VolunteamError::EventNotFound { event_id: event.id.clone() });
        }

        Self::json(response).await
    }

    async fn get_user_details(&self, user_id: &str) -> Result<User> {
        let (builder, url) = self.request(Method::GET, &["users", user_id]);
        let response = self.send(builder, "GET", &url).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(VolunteamError::UserNotFound { user_id: user_id.to_string() });
        }

        Self::json(response).await
    }
}
