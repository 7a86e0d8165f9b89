//! Integration tests for the create-event screen

mod helpers;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use helpers::*;
use volunteam::handlers::create_event::{
    CreateEventScreen, SelectImageOutcome, CAMERA_PERMISSION_DENIED, LIBRARY_PERMISSION_DENIED,
};
use volunteam::models::image::ImageSource;
use volunteam::state::event_form::{DATE_TIME_TOO_SOON, DESCRIPTION_TOO_SHORT, NAME_TOO_SHORT, NOT_ENOUGH_VOLUNTEERS};
use volunteam::state::{EventsStore, ImageSlotState};
use volunteam::utils::errors::PlatformError;
use volunteam::VolunteamError;

async fn build_screen(mock: &VolunteamMockServer, fakes: &FakePlatform) -> (CreateEventScreen, EventsStore) {
    let store = EventsStore::new();
    let (services, _) = test_services(mock, store.clone());
    let screen = CreateEventScreen::new(test_position(), current_user(), services, fakes.platform());
    (screen, store)
}

fn fill_valid_form(screen: &mut CreateEventScreen) {
    screen.set_name("Park Cleanup");
    screen.set_description("Bring gloves, we provide the bags");
    screen.set_volunteers_needed(5);
    screen.set_date_time(Utc::now() + Duration::days(1));
}

#[tokio::test]
async fn test_select_image_from_library_uploads() {
    let mock = VolunteamMockServer::new().await;
    mock.mock_upload_success("photo.jpg", "https://i.ibb.co/abc/photo.jpg", 2048).await;
    let fakes = FakePlatform::new();
    fakes.action_sheet.answer(Some(1));
    fakes.image_picker.queue_pick(Ok(Some(picked_image(b"jpeg bytes"))));
    let (mut screen, _) = build_screen(&mock, &fakes).await;

    let outcome = screen.select_image().await;

    assert_matches!(outcome, SelectImageOutcome::Uploaded(ref image) if image.url == "https://i.ibb.co/abc/photo.jpg");
    assert_eq!(fakes.image_picker.launched(), vec![ImageSource::Library]);
    assert_eq!(
        fakes.action_sheet.shown(),
        vec![vec!["Take Photo...".to_string(), "Choose from Library...".to_string(), "Cancel".to_string()]]
    );
    assert_matches!(screen.image_state(), ImageSlotState::Persisted { .. });
    assert!(!screen.is_uploading());
    assert_eq!(screen.image_size_label().as_deref(), Some("2.0 KB"));
}

#[tokio::test]
async fn test_cancelled_action_sheet_changes_nothing() {
    let mock = VolunteamMockServer::new().await;
    let fakes = FakePlatform::new();
    fakes.action_sheet.answer(Some(2));
    let (mut screen, _) = build_screen(&mock, &fakes).await;

    assert_eq!(screen.select_image().await, SelectImageOutcome::Cancelled);
    assert!(fakes.image_picker.launched().is_empty());
    assert_eq!(screen.image_state(), &ImageSlotState::Empty);
}

#[tokio::test]
async fn test_picker_closed_without_selection() {
    let mock = VolunteamMockServer::new().await;
    let fakes = FakePlatform::new();
    fakes.action_sheet.answer(Some(0));
    fakes.image_picker.queue_pick(Ok(None));
    let (mut screen, _) = build_screen(&mock, &fakes).await;

    assert_eq!(screen.select_image().await, SelectImageOutcome::Cancelled);
    assert_eq!(fakes.image_picker.launched(), vec![ImageSource::Camera]);
    assert_eq!(screen.image_state(), &ImageSlotState::Empty);
}

#[tokio::test]
async fn test_camera_permission_denied_alerts() {
    let mock = VolunteamMockServer::new().await;
    let fakes = FakePlatform::new();
    fakes.action_sheet.answer(Some(0));
    fakes.image_picker.deny(ImageSource::Camera);
    let (mut screen, _) = build_screen(&mock, &fakes).await;

    let outcome = screen.select_image().await;

    assert_eq!(outcome, SelectImageOutcome::PermissionDenied(ImageSource::Camera));
    assert_eq!(fakes.alerts.messages(), vec![CAMERA_PERMISSION_DENIED.to_string()]);
    assert!(fakes.image_picker.launched().is_empty());
    assert_eq!(screen.image_state(), &ImageSlotState::Empty);
}

#[tokio::test]
async fn test_library_permission_error_counts_as_denial() {
    let mock = VolunteamMockServer::new().await;
    let fakes = FakePlatform::new();
    fakes.action_sheet.answer(Some(1));
    *fakes.image_picker.library_allowed.lock().unwrap() = Err(PlatformError::unknown());
    let (mut screen, _) = build_screen(&mock, &fakes).await;

    let outcome = screen.select_image().await;

    assert_eq!(outcome, SelectImageOutcome::PermissionDenied(ImageSource::Library));
    assert_eq!(fakes.alerts.messages(), vec![LIBRARY_PERMISSION_DENIED.to_string()]);
}

#[tokio::test]
async fn test_failed_upload_keeps_staged_image() {
    let mock = VolunteamMockServer::new().await;
    mock.mock_upload_error(400, "Invalid API v1 key.").await;
    let fakes = FakePlatform::new();
    fakes.action_sheet.answer(Some(1));
    fakes.image_picker.queue_pick(Ok(Some(picked_image(b"jpeg bytes"))));
    let (mut screen, _) = build_screen(&mock, &fakes).await;

    let outcome = screen.select_image().await;

    assert_eq!(
        outcome,
        SelectImageOutcome::UploadFailed("Image upload failed: Invalid API v1 key.".to_string())
    );
    assert_eq!(screen.upload_error(), Some("Image upload failed: Invalid API v1 key."));
    let image = screen.image().expect("staged image stays visible");
    assert_eq!(image.url, "file:///tmp/photo.jpg");
    assert!(!image.uploaded);
    assert!(!screen.is_uploading());
}

#[tokio::test]
async fn test_empty_picked_image_is_ignored() {
    let mock = VolunteamMockServer::new().await;
    let fakes = FakePlatform::new();
    let (mut screen, _) = build_screen(&mock, &fakes).await;

    assert_eq!(screen.persist_image(picked_image(b"")).await, SelectImageOutcome::Cancelled);
    assert_eq!(screen.image_state(), &ImageSlotState::Empty);
    assert!(mock.received("POST", "/1/upload").await.is_empty());
}

#[tokio::test]
async fn test_remove_image() {
    let mock = VolunteamMockServer::new().await;
    mock.mock_upload_success("photo.jpg", "https://i.ibb.co/abc/photo.jpg", 10).await;
    let fakes = FakePlatform::new();
    let (mut screen, _) = build_screen(&mock, &fakes).await;

    screen.persist_image(picked_image(b"jpeg bytes")).await;
    assert!(screen.image().is_some());

    screen.remove_image();
    assert!(screen.image().is_none());
    assert!(screen.image_size_label().is_none());
}

#[tokio::test]
async fn test_upload_abandoned_when_screen_closed() {
    let mock = VolunteamMockServer::new().await;
    mock.mock_upload_success("photo.jpg", "https://i.ibb.co/abc/photo.jpg", 10).await;
    let fakes = FakePlatform::new();
    let (mut screen, _) = build_screen(&mock, &fakes).await;

    screen.close();
    let outcome = screen.persist_image(picked_image(b"jpeg bytes")).await;

    assert_eq!(outcome, SelectImageOutcome::Abandoned);
    assert!(screen.lifetime().is_cancelled());
    assert!(!screen.is_uploading());
    assert!(!screen.is_busy());
    assert!(screen.image().is_none());
    assert!(mock.received("POST", "/1/upload").await.is_empty());
}

#[tokio::test]
async fn test_upload_abandoned_mid_flight_clears_busy_flag() {
    let mock = VolunteamMockServer::new().await;
    wiremock::Mock::given(wiremock::matchers::method("POST"))
        .respond_with(
            wiremock::ResponseTemplate::new(200)
                .set_body_json(upload_success_body("photo.jpg", "https://i.ibb.co/abc/photo.jpg", 10))
                .set_delay(std::time::Duration::from_secs(2)),
        )
        .mount(&mock.server)
        .await;
    let fakes = FakePlatform::new();
    let (mut screen, _) = build_screen(&mock, &fakes).await;

    let lifetime = screen.lifetime();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        lifetime.cancel();
    });
    let outcome = screen.persist_image(picked_image(b"jpeg bytes")).await;

    assert_eq!(outcome, SelectImageOutcome::Abandoned);
    assert!(!screen.is_uploading());
    assert!(!screen.is_busy());
    assert_matches!(screen.image_state(), ImageSlotState::Picked { .. });
}

#[tokio::test]
async fn test_submit_after_close_is_cancelled() {
    let mock = VolunteamMockServer::new().await;
    mock.mock_create_event(201).await;
    let fakes = FakePlatform::new();
    let (mut screen, store) = build_screen(&mock, &fakes).await;

    fill_valid_form(&mut screen);
    screen.close();

    assert_matches!(screen.submit().await, Err(VolunteamError::Cancelled));
    assert!(!screen.is_busy());
    assert!(store.is_empty().await);
    assert!(mock.received("POST", "/events").await.is_empty());
}

#[tokio::test]
async fn test_submit_reports_every_violation() {
    let mock = VolunteamMockServer::new().await;
    let fakes = FakePlatform::new();
    let (mut screen, store) = build_screen(&mock, &fakes).await;

    let result = screen.submit().await;

    assert_matches!(result, Err(VolunteamError::Validation(ref errors)) if errors.len() == 4);
    assert_eq!(
        screen.saving_errors(),
        &[
            NAME_TOO_SHORT.to_string(),
            DESCRIPTION_TOO_SHORT.to_string(),
            NOT_ENOUGH_VOLUNTEERS.to_string(),
            DATE_TIME_TOO_SOON.to_string(),
        ]
    );
    assert!(!screen.is_valid());
    assert!(store.is_empty().await);
    assert!(mock.received("POST", "/events").await.is_empty());
}

#[tokio::test]
async fn test_description_is_truncated() {
    let mock = VolunteamMockServer::new().await;
    let fakes = FakePlatform::new();
    let (mut screen, _) = build_screen(&mock, &fakes).await;

    screen.set_description(&"x".repeat(400));

    assert_eq!(screen.form().description.chars().count(), 300);
}

#[tokio::test]
async fn test_submit_creates_event_with_uploaded_image() {
    let mock = VolunteamMockServer::new().await;
    mock.mock_upload_success("photo.jpg", "https://i.ibb.co/abc/photo.jpg", 10).await;
    mock.mock_create_event(201).await;
    let fakes = FakePlatform::new();
    let (mut screen, store) = build_screen(&mock, &fakes).await;

    fill_valid_form(&mut screen);
    screen.persist_image(picked_image(b"jpeg bytes")).await;
    let event = screen.submit().await.unwrap();

    assert_eq!(event.name, "Park Cleanup");
    assert_eq!(event.organizer_id, "user-1");
    assert!(event.volunteers_ids.is_empty());
    assert_eq!(event.position, test_position());
    assert_eq!(event.image_url.as_deref(), Some("https://i.ibb.co/abc/photo.jpg"));
    assert!(screen.is_valid());
    assert!(screen.saving_errors().is_empty());
    assert!(!screen.is_busy());
    let stored = store.find_by_id(&event.id).await;
    assert_eq!(stored, Some(event));
}

#[tokio::test]
async fn test_submit_without_image_omits_url() {
    let mock = VolunteamMockServer::new().await;
    mock.mock_upload_error(500, "Server error").await;
    mock.mock_create_event(201).await;
    let fakes = FakePlatform::new();
    let (mut screen, _) = build_screen(&mock, &fakes).await;

    fill_valid_form(&mut screen);
    screen.persist_image(picked_image(b"jpeg bytes")).await;
    let event = screen.submit().await.unwrap();

    assert!(event.image_url.is_none());
    let requests = mock.received("POST", "/events").await;
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("imageUrl").is_none());
}

#[tokio::test]
async fn test_submit_api_failure_keeps_store_untouched() {
    let mock = VolunteamMockServer::new().await;
    mock.mock_create_event(500).await;
    let fakes = FakePlatform::new();
    let (mut screen, store) = build_screen(&mock, &fakes).await;

    fill_valid_form(&mut screen);
    let result = screen.submit().await;

    assert_matches!(result, Err(VolunteamError::Api { status: 500, .. }));
    assert!(store.is_empty().await);
    assert!(!screen.is_busy());
}
