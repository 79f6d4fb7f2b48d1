use artypacks_api::{ApiConfig, ApiError, ContactClient, ContactMessage, CONTACT_FAILED_MESSAGE};
use wiremock::matchers::{body_string_contains, header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn message() -> ContactMessage {
    ContactMessage {
        name: "Robin".to_string(),
        email: "robin@example.com".to_string(),
        message: "Does the converter keep my brush names?".to_string(),
    }
}

#[tokio::test]
async fn submits_form_fields_with_json_accept() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("accept", "application/json"))
        .and(body_string_contains("name=\"email\""))
        .and(body_string_contains("robin@example.com"))
        .and(body_string_contains("keep my brush names"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ContactClient::new(server.uri(), &ApiConfig::default()).unwrap();
    client.submit(&message()).await.unwrap();
}

#[tokio::test]
async fn relay_failure_uses_fallback_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let client = ContactClient::new(server.uri(), &ApiConfig::default()).unwrap();
    let err = client.submit(&message()).await.unwrap_err();
    assert_eq!(err.user_message(), CONTACT_FAILED_MESSAGE);
}

#[tokio::test]
async fn invalid_message_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = ContactClient::new(server.uri(), &ApiConfig::default()).unwrap();
    let bad = ContactMessage {
        email: "not-an-email".to_string(),
        ..message()
    };
    let err = client.submit(&bad).await.unwrap_err();
    assert!(matches!(err, ApiError::Config(_)));
}

#[test]
fn validation_rules() {
    assert!(message().validate().is_ok());
    assert!(ContactMessage { name: " ".into(), ..message() }.validate().is_err());
    assert!(ContactMessage { message: "".into(), ..message() }.validate().is_err());
    assert!(ContactMessage { email: "@example.com".into(), ..message() }.validate().is_err());
    assert!(ContactMessage { email: "robin@localhost".into(), ..message() }.validate().is_err());
}
