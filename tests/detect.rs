//! Integration tests for `FaceClient::detect_image` against a mock server.
//!
//! The client is blocking, so the mock server is driven from a separate
//! tokio runtime and the client is called from the plain test thread.

use std::path::Path;

use faceplus_cli::{ClientConfig, FaceClient, FaceError};
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FIXTURE: &str = include_str!("fixtures/detect_one_face.json");
const IMAGE: &[u8] = b"\xff\xd8\xff\xe0\x00\x10JFIF\x00fake image bytes\x00\x01\x02";

fn start_server(rt: &Runtime, status: u16, body: &str) -> MockServer {
    rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/detection/detect"))
            .and(query_param("api_key", "KEY"))
            .and(query_param("api_secret", "SECRET"))
            .and(query_param("attribute", "gender,age,race,smiling,glass,pose"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&server)
            .await;
        server
    })
}

fn client_for(server: &MockServer) -> FaceClient {
    let config = ClientConfig::new(format!("{}/v2", server.uri()), "KEY", "SECRET");
    FaceClient::new(config).unwrap()
}

fn write_image(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("face.jpg");
    std::fs::write(&path, IMAGE).unwrap();
    path
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

#[test]
fn test_detect_decodes_fixture() {
    let rt = Runtime::new().unwrap();
    let server = start_server(&rt, 200, FIXTURE);
    let dir = tempfile::tempdir().unwrap();
    let image = write_image(dir.path());

    let detection = client_for(&server).detect_image(&image).unwrap();

    assert_eq!(detection.session_id, "38047ad0f0b34c7e8c6efb6ba39ed355");
    assert_eq!(detection.image.id, "030-2aa0b8f20ff8a7ca3ab1bac0e2e7b1d2");
    assert_eq!(detection.image.width, 500);
    assert_eq!(detection.image.height, 500);
    assert_eq!(
        detection.image.url,
        "http://www.faceplusplus.com.cn/static/resources/python_demo/1.jpg"
    );
    assert_eq!(detection.faces.len(), 1);

    let face = &detection.faces[0];
    assert_eq!(face.id, "688ff02d25c78d0a7fee8bea2fe5be5e");
    assert_eq!(face.tag, "");
    assert_eq!(face.attributes.age.value, 23);
    assert_eq!(face.attributes.age.range, 5);
    assert_eq!(face.attributes.gender.value, "Female");
    assert_eq!(face.attributes.gender.confidence, 99.9999);
    assert_eq!(face.attributes.glass.value, "None");
    assert_eq!(face.attributes.race.value, "Asian");
    assert_eq!(face.attributes.smiling.value, 4.55578);
    assert_eq!(face.attributes.pose.pitch_angle.value, 17.0);
    assert_eq!(face.attributes.pose.yaw_angle.value, -2.0);
    assert_eq!(face.position.center.x, 51.5);
    assert_eq!(face.position.center.y, 35.0);
    assert_eq!(face.position.eye_left.x, 46.41);
    assert_eq!(face.position.mouth_right.y, 41.625);
    assert_eq!(face.position.nose.x, 51.9483);
    assert_eq!(face.position.width, 23.8);
    assert_eq!(face.position.height, 23.8);
}

#[test]
fn test_detect_sends_single_img_field() {
    let rt = Runtime::new().unwrap();
    let server = start_server(&rt, 200, FIXTURE);
    let dir = tempfile::tempdir().unwrap();
    let image = write_image(dir.path());

    client_for(&server).detect_image(&image).unwrap();

    let requests = rt.block_on(server.received_requests()).unwrap();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(
        req.url.query(),
        Some("api_key=KEY&api_secret=SECRET&attribute=gender,age,race,smiling,glass,pose")
    );

    let body = &req.body;
    assert_eq!(count(body, b"Content-Disposition"), 1);
    assert!(contains(body, b"name=\"img\""));
    let filename = format!("filename=\"{}\"", image.display());
    assert!(contains(body, filename.as_bytes()));
    assert!(contains(body, IMAGE));
}

#[test]
fn test_missing_file_makes_no_request() {
    let rt = Runtime::new().unwrap();
    let server = start_server(&rt, 200, FIXTURE);
    let dir = tempfile::tempdir().unwrap();

    let err = client_for(&server)
        .detect_image(dir.path().join("nope.jpg"))
        .unwrap_err();

    assert!(matches!(err, FaceError::Io { .. }));
    let requests = rt.block_on(server.received_requests()).unwrap();
    assert!(requests.is_empty());
}

#[test]
fn test_malformed_response_is_decode_error() {
    let rt = Runtime::new().unwrap();
    let server = start_server(&rt, 200, "<html>oops</html>");
    let dir = tempfile::tempdir().unwrap();
    let image = write_image(dir.path());

    let err = client_for(&server).detect_image(&image).unwrap_err();

    match err {
        FaceError::Decode { body, .. } => assert_eq!(body, "<html>oops</html>"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_response_is_decode_error() {
    let rt = Runtime::new().unwrap();
    let server = start_server(&rt, 200, "");
    let dir = tempfile::tempdir().unwrap();
    let image = write_image(dir.path());

    let err = client_for(&server).detect_image(&image).unwrap_err();

    assert!(matches!(err, FaceError::Decode { .. }));
}

#[test]
fn test_error_status_is_api_error() {
    let rt = Runtime::new().unwrap();
    let server = start_server(
        &rt,
        401,
        r#"{"error":"AUTHORIZATION_ERROR","error_code":1004}"#,
    );
    let dir = tempfile::tempdir().unwrap();
    let image = write_image(dir.path());

    let err = client_for(&server).detect_image(&image).unwrap_err();

    match err {
        FaceError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "AUTHORIZATION_ERROR (code 1004)");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unreachable_server_is_http_error() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_image(dir.path());
    // Port 9 (discard) is not expected to accept HTTP connections.
    let config = ClientConfig::new("http://127.0.0.1:9", "KEY", "SECRET");
    let client = FaceClient::new(config).unwrap();

    let err = client.detect_image(&image).unwrap_err();

    assert!(matches!(err, FaceError::Http(_)));
}
