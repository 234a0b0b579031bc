//! Integration tests for `tigre::fetch_shops` against a local locator API.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use liiist_scraper::{tigre, ScrapeClient, ScraperError};

fn test_client() -> ScrapeClient {
    ScrapeClient::new(5, "liiist-test/0.1", 0, 0).expect("failed to build test ScrapeClient")
}

fn locator_url(server: &MockServer) -> String {
    format!("{}/store/locator.php", server.uri())
}

fn store(name: &str, address: &str, collect: &str, drive: &str, lat: &str) -> serde_json::Value {
    json!({
        "store": {
            "name": name,
            "address": address,
            "city": "Roma",
            "click_collect": collect,
            "click_drive": drive,
            "lat": lat,
            "lon": "12.49",
            "hours": "Lun-Sab 8:00-20:00"
        }
    })
}

#[tokio::test]
async fn posts_fixed_payload_and_keeps_pickup_stores() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/store/locator.php"))
        .and(header("accept", "*/*"))
        .and(body_json(json!({
            "user": {
                "latitude": 42.8528624,
                "longitude": 13.5389759,
                "lang": "it",
                "radius": 200000
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            store("Tigre Tuscolana", "Via Tuscolana 10, Roma RM", "false", "true", "41.87"),
            store("Tigre Ascoli", "Via Napoli 2, Ascoli AP", "false", "true", "42.85"),
            store("Oasi Pescara", "Via Milano 3, Pescara PE", "true", "false", "42.46"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let report = tigre::fetch_shops(&test_client(), &locator_url(&server))
        .await
        .expect("fetch should succeed");

    assert!(report.failures.is_empty());
    let names: Vec<&str> = report.shops.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Tigre Tuscolana", "Oasi Pescara"]);
    assert_eq!(report.shops[0].lat, Some(41.87));
    assert_eq!(report.shops[0].long, Some(12.49));
    assert_eq!(report.shops[0].working_hours, "Lun-Sab 8:00-20:00");
    assert!(report.shops.iter().all(|s| s.picks_up_in_shop));
}

#[tokio::test]
async fn non_success_status_carries_code_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/store/locator.php"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden: bad origin"))
        .mount(&server)
        .await;

    let err = tigre::fetch_shops(&test_client(), &locator_url(&server))
        .await
        .unwrap_err();

    match err {
        ScraperError::UnexpectedStatus { status, body, .. } => {
            assert_eq!(status, 403);
            assert_eq!(body, "forbidden: bad origin");
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn non_numeric_coordinate_fails_the_run() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/store/locator.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([store(
            "Tigre Prati",
            "Via Cola di Rienzo 1, Roma RM",
            "true",
            "false",
            "quarantuno"
        )])))
        .mount(&server)
        .await;

    let err = tigre::fetch_shops(&test_client(), &locator_url(&server))
        .await
        .unwrap_err();
    assert!(
        matches!(err, ScraperError::InvalidNumber { ref field, .. } if field == "lat"),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn undecodable_body_is_a_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/store/locator.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = tigre::fetch_shops(&test_client(), &locator_url(&server))
        .await
        .unwrap_err();
    assert!(matches!(err, ScraperError::Deserialize { .. }), "got: {err:?}");
}

#[tokio::test]
async fn retries_rate_limited_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/store/locator.php"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/store/locator.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = ScrapeClient::new(5, "liiist-test/0.1", 1, 0).unwrap();
    let report = tigre::fetch_shops(&client, &locator_url(&server))
        .await
        .expect("second attempt succeeds");
    assert!(report.shops.is_empty());
}
