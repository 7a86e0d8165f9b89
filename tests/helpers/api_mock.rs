//! Mock Volunteam API and image store
//!
//! Wraps a wiremock server that answers like the json-server backed events API
//! and the imgbb-style image host.

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};
use volunteam::models::event::VolunteeringEvent;
use volunteam::models::user::User;

pub const TEST_IMAGE_KEY: &str = "test-image-key";

/// Mock server standing in for both remote collaborators
pub struct VolunteamMockServer {
    pub server: MockServer,
}

impl VolunteamMockServer {
    pub async fn new() -> Self {
        Self { server: MockServer::start().await }
    }

    pub fn base_url(&self) -> String {
        self.server.uri()
    }

    pub fn upload_url(&self) -> String {
        format!("{}/1/upload", self.server.uri())
    }

    pub async fn mock_list_events(&self, events: &[VolunteeringEvent]) {
        Mock::given(method("GET"))
            .and(path("/events"))
            .respond_with(ResponseTemplate::new(200).set_body_json(events))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_create_event(&self, status: u16) {
        let template = if status < 300 {
            ResponseTemplate::new(status).set_body_json(json!({}))
        } else {
            ResponseTemplate::new(status).set_body_json(json!({ "message": "Could not save event" }))
        };

        Mock::given(method("POST"))
            .and(path("/events"))
            .respond_with(template)
            .mount(&self.server)
            .await;
    }

    /// PATCH /events/{id} answering with `updated`
    pub async fn mock_update_volunteers(&self, updated: &VolunteeringEvent) {
        Mock::given(method("PATCH"))
            .and(path(format!("/events/{}", updated.id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(updated))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_update_volunteers_error(&self, event_id: &str, status: u16) {
        Mock::given(method("PATCH"))
            .and(path(format!("/events/{}", event_id)))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "error": "Server exploded" })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_get_user(&self, user: &User) {
        Mock::given(method("GET"))
            .and(path(format!("/users/{}", user.id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(user))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_user_not_found(&self, user_id: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/users/{}", user_id)))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({})))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_upload_success(&self, filename: &str, url: &str, size: u64) {
        Mock::given(method("POST"))
            .and(path("/1/upload"))
            .and(query_param("key", TEST_IMAGE_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(upload_success_body(filename, url, size)))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_upload_error(&self, status: u16, message: &str) {
        Mock::given(method("POST"))
            .and(path("/1/upload"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "status_code": status,
                "error": { "message": message, "code": 100 },
                "status_txt": "Bad Request"
            })))
            .mount(&self.server)
            .await;
    }

    /// Requests received so far for `http_method` on `request_path`
    pub async fn received(&self, http_method: &str, request_path: &str) -> Vec<wiremock::Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.method.as_str() == http_method && r.url.path() == request_path)
            .collect()
    }
}

pub fn upload_success_body(filename: &str, url: &str, size: u64) -> Value {
    json!({
        "data": {
            "id": "2ndCYJK",
            "title": "photo",
            "url_viewer": "https://ibb.co/2ndCYJK",
            "url": url,
            "display_url": url,
            "size": size,
            "image": {
                "filename": filename,
                "name": "photo",
                "mime": "image/jpeg",
                "extension": "jpg",
                "url": url
            }
        },
        "success": true,
        "status": 200
    })
}
