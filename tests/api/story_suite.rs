use crate::common::{TEST_ACCESS_TOKEN, spawn_mock_api};
use claims::assert_ok;
use storyspoil::scenario::{
    MALFORMED_STORY_ID, STORY_ID, ScenarioContext, Step, StepError, UNKNOWN_STORY_ID, run_steps,
    run_suite,
};
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn every_step_passes_against_a_conforming_api() {
    // Arrange
    let api = spawn_mock_api().await;
    api.mount_authentication().await;
    api.mount_story_endpoints(&Uuid::new_v4().to_string()).await;

    // Act
    let report = assert_ok!(run_suite(&api.settings).await);

    // Assert
    assert!(report.is_success(), "{}", report);
    let steps: Vec<Step> = report.steps.iter().map(|r| r.step).collect();
    assert_eq!(steps, Step::ORDERED.to_vec());
}

#[tokio::test]
async fn steps_send_their_requests_in_order_with_the_captured_story_id() {
    // Arrange
    let api = spawn_mock_api().await;
    let story_id = Uuid::new_v4().to_string();
    api.mount_authentication().await;
    api.mount_story_endpoints(&story_id).await;

    // Act
    let _ = run_suite(&api.settings).await;

    // Assert
    let sent: Vec<(String, String)> = api
        .story_requests()
        .await
        .iter()
        .map(|r| (r.method.to_string(), r.url.path().to_string()))
        .collect();
    let expected: Vec<(String, String)> = vec![
        ("POST".into(), "/api/Story/Create".into()),
        ("PUT".into(), format!("/api/Story/Edit/{}", story_id)),
        ("DELETE".into(), format!("/api/Story/Delete/{}", story_id)),
        ("POST".into(), "/api/Story/Create".into()),
        ("PUT".into(), format!("/api/Story/Edit/{}", UNKNOWN_STORY_ID)),
        ("DELETE".into(), format!("/api/Story/Delete/{}", MALFORMED_STORY_ID)),
    ];
    assert_eq!(sent, expected);
}

#[tokio::test]
async fn every_story_request_carries_the_bearer_token() {
    // Arrange
    let api = spawn_mock_api().await;
    api.mount_authentication().await;
    api.mount_story_endpoints("story-1").await;

    // Act
    let _ = run_suite(&api.settings).await;

    // Assert
    let requests = api.story_requests().await;
    assert_eq!(requests.len(), 6);
    for request in requests {
        assert_eq!(
            request
                .headers
                .get("Authorization")
                .and_then(|v| v.to_str().ok()),
            Some(format!("Bearer {}", TEST_ACCESS_TOKEN).as_str()),
            "{} {} was sent without the bearer token",
            request.method,
            request.url
        );
    }
}

#[tokio::test]
async fn a_failed_create_leaves_edit_and_delete_without_a_story_id() {
    // Arrange
    let api = spawn_mock_api().await;
    api.mount_authentication().await;
    Mock::given(path("/api/Story/Create"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&api.server)
        .await;
    api.mount_story_endpoints("story-1").await;

    // Act
    let report = assert_ok!(run_suite(&api.settings).await);

    // Assert
    assert!(!report.is_success());
    match report.outcome_of(Step::CreateStory) {
        Some(Err(StepError::Assertion(failure))) => {
            assert_eq!(failure.field, "status");
            assert_eq!(failure.expected, "201 Created");
            assert_eq!(failure.actual, "500 Internal Server Error");
        }
        other => panic!("Expected a status mismatch, got {:?}", other),
    }
    for step in [Step::EditStory, Step::DeleteStory] {
        assert!(
            matches!(
                report.outcome_of(step),
                Some(Err(StepError::MissingDependency(STORY_ID)))
            ),
            "{} should have reported the missing story id",
            step
        );
    }
    // The steps after the dependent ones still ran
    for step in [
        Step::CreateStoryWithoutTitle,
        Step::EditUnknownStory,
        Step::DeleteUnknownStory,
    ] {
        assert!(matches!(report.outcome_of(step), Some(Ok(()))), "{}", report);
    }
}

#[tokio::test]
async fn a_wrong_message_fails_only_that_step() {
    // Arrange
    let api = spawn_mock_api().await;
    api.mount_authentication().await;
    Mock::given(path("/api/Story/Edit/story-1"))
        .and(method("PUT"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "msg": "Edited" })),
        )
        .with_priority(1)
        .mount(&api.server)
        .await;
    api.mount_story_endpoints("story-1").await;

    // Act
    let report = assert_ok!(run_suite(&api.settings).await);

    // Assert
    let failed: Vec<Step> = report.failures().map(|(step, _)| step).collect();
    assert_eq!(failed, vec![Step::EditStory]);
    match report.outcome_of(Step::EditStory) {
        Some(Err(StepError::Assertion(failure))) => {
            assert_eq!(failure.field, "msg");
            assert_eq!(failure.expected, "\"Successfully edited\"");
            assert_eq!(failure.actual, "\"Edited\"");
        }
        other => panic!("Expected a message mismatch, got {:?}", other),
    }
}

#[tokio::test]
async fn a_create_without_story_id_is_reported() {
    // Arrange
    let api = spawn_mock_api().await;
    api.mount_authentication().await;
    Mock::given(path("/api/Story/Create"))
        .and(method("POST"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(serde_json::json!({ "msg": "Successfully created!" })),
        )
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&api.server)
        .await;
    api.mount_story_endpoints("story-1").await;

    // Act
    let report = assert_ok!(run_suite(&api.settings).await);

    // Assert
    match report.outcome_of(Step::CreateStory) {
        Some(Err(StepError::Assertion(failure))) => assert_eq!(failure.field, "storyId"),
        other => panic!("Expected a missing storyId, got {:?}", other),
    }
    assert!(matches!(
        report.outcome_of(Step::EditStory),
        Some(Err(StepError::MissingDependency(_)))
    ));
    assert!(matches!(
        report.outcome_of(Step::CreateStoryWithoutTitle),
        Some(Ok(()))
    ));
}

#[tokio::test]
async fn a_body_that_is_not_json_is_reported_with_its_content() {
    // Arrange
    let api = spawn_mock_api().await;
    api.mount_authentication().await;
    Mock::given(path(format!("/api/Story/Delete/{}", MALFORMED_STORY_ID)))
        .and(method("DELETE"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Bad Request"))
        .with_priority(1)
        .mount(&api.server)
        .await;
    api.mount_story_endpoints("story-1").await;

    // Act
    let report = assert_ok!(run_suite(&api.settings).await);

    // Assert
    match report.outcome_of(Step::DeleteUnknownStory) {
        Some(Err(StepError::UnexpectedBody { status, body, .. })) => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(body, "Bad Request");
        }
        other => panic!("Expected an unexpected body, got {:?}", other),
    }
}

#[tokio::test]
async fn run_steps_writes_the_captured_story_id_into_the_context() {
    // Arrange
    let api = spawn_mock_api().await;
    api.mount_authentication().await;
    api.mount_story_endpoints("story-1").await;
    let client = api.client().await;
    let mut ctx = ScenarioContext::default();

    // Act
    let report = run_steps(&client, &mut ctx).await;

    // Assert
    assert!(report.is_success(), "{}", report);
    assert_eq!(ctx.story_id.as_deref(), Some("story-1"));
}
