use anyhow::bail;
use anyhow::Result;
use mockito::Matcher;
use serde_json::json;
use test_utils::emotion_conversation_fixture;
use test_utils::map_fixture;
use test_utils::safety_fixture;
use test_utils::sos_fixture;
use test_utils::toxicity_fixture;

use super::encode_path_segment;
use super::ApiError;
use super::SafetyApi;
use crate::domain::models::Coordinate;
use crate::domain::models::Reply;

fn api(url: &str) -> SafetyApi {
    return SafetyApi::new(&format!("{url}/api"), "200");
}

#[test]
fn it_encodes_path_segments_like_a_browser() {
    assert_eq!(encode_path_segment("+15551234567"), "%2B15551234567");
    assert_eq!(encode_path_segment("a b/c"), "a%20b%2Fc");
    assert_eq!(encode_path_segment("it's-(ok)_~.*!"), "it's-(ok)_~.*!");
}

#[tokio::test]
async fn it_analyzes_toxicity() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/toxicity/analyze")
        .match_body(Matcher::Json(json!({ "text": "you are awful" })))
        .with_status(200)
        .with_body(toxicity_fixture().to_string())
        .create_async()
        .await;

    let res = api(&server.url()).analyze_toxicity("you are awful").await?;
    mock.assert_async().await;

    let analysis = match res {
        Reply::Success(analysis) => analysis,
        Reply::Failed(err) => bail!("Unexpected failure: {err}"),
    };

    assert_eq!(analysis.risk_level, "HIGH");
    assert!(analysis.is_toxic);
    assert_eq!(analysis.scores.get("insult"), Some(&0.82));

    return Ok(());
}

#[tokio::test]
async fn it_returns_backend_errors_regardless_of_status() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/safety/score")
        .with_status(400)
        .with_body(json!({ "error": "Latitude and longitude required" }).to_string())
        .create_async()
        .await;

    let res = api(&server.url())
        .safety_score(Coordinate::new(1.0, 2.0))
        .await?;
    mock.assert_async().await;

    assert_eq!(
        res,
        Reply::Failed("Latitude and longitude required".to_string())
    );

    return Ok(());
}

#[tokio::test]
async fn it_decodes_success_bodies_on_error_status() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/safety/score")
        .match_body(Matcher::Json(
            json!({ "latitude": 28.6139, "longitude": 77.209 }),
        ))
        .with_status(500)
        .with_body(safety_fixture().to_string())
        .create_async()
        .await;

    let res = api(&server.url())
        .safety_score(Coordinate::new(28.6139, 77.209))
        .await?;
    mock.assert_async().await;

    match res {
        Reply::Success(score) => assert_eq!(score.safety_level, "MODERATE"),
        Reply::Failed(err) => bail!("Unexpected failure: {err}"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_requests_safety_maps() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/safety/map")
        .match_body(Matcher::Json(
            json!({ "latitude": 28.6139, "longitude": 77.209, "radius_km": 2.0 }),
        ))
        .with_status(200)
        .with_body(map_fixture().to_string())
        .create_async()
        .await;

    let res = api(&server.url())
        .safety_map(Coordinate::new(28.6139, 77.209), 2.0)
        .await?;
    mock.assert_async().await;

    match res {
        Reply::Success(map) => {
            assert_eq!(map.map_file, "safety_map.html");
            assert_eq!(map.center, Coordinate::new(28.6139, 77.209));
            assert_eq!(map.radius_km, 2.0);
        }
        Reply::Failed(err) => bail!("Unexpected failure: {err}"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_rejects_non_json_bodies() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/emotion/analyze")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let res = api(&server.url()).analyze_emotion("hello").await;
    mock.assert_async().await;

    let err = res.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::Decode { .. })
    ));
}

#[tokio::test]
async fn it_rejects_bodies_with_missing_fields() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/toxicity/analyze")
        .with_status(200)
        .with_body(json!({ "risk_level": "LOW" }).to_string())
        .create_async()
        .await;

    let res = api(&server.url()).analyze_toxicity("hello").await;
    mock.assert_async().await;

    let err = res.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::Schema { .. })
    ));
}

#[tokio::test]
async fn it_fails_on_unreachable_servers() {
    let res = SafetyApi::new("http://127.0.0.1:1/api", "200")
        .list_contacts()
        .await;

    let err = res.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::Transport { .. })
    ));
}

#[tokio::test]
async fn it_sends_sos_alerts() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/sos/alert")
        .match_body(Matcher::Json(json!({
            "user_name": "Asha",
            "latitude": 28.6139,
            "longitude": 77.209,
            "message": "Emergency! I need help!"
        })))
        .with_status(200)
        .with_body(sos_fixture().to_string())
        .create_async()
        .await;

    let res = api(&server.url())
        .send_sos(
            "Asha",
            Coordinate::new(28.6139, 77.209),
            "Emergency! I need help!",
        )
        .await?;
    mock.assert_async().await;

    let receipt = match res {
        Reply::Success(receipt) => receipt,
        Reply::Failed(err) => bail!("Unexpected failure: {err}"),
    };
    assert_eq!(receipt.contacts_alerted.map(|e| return e.len()), Some(2));

    return Ok(());
}

#[tokio::test]
async fn it_reads_contacts_from_share_responses() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/sos/share-location")
        .with_status(200)
        .with_body(
            json!({
                "status": "success",
                "message": "Location shared with 1 contacts",
                "location_link": "https://www.google.com/maps?q=1,2",
                "contacts": [{ "contact": "+15551234567", "status": "simulated" }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let res = api(&server.url())
        .share_location("Asha", Coordinate::new(1.0, 2.0))
        .await?;
    mock.assert_async().await;

    match res {
        Reply::Success(receipt) => {
            let contacts = receipt.contacts_alerted.unwrap_or_default();
            assert_eq!(contacts[0].contact, "+15551234567");
        }
        Reply::Failed(err) => bail!("Unexpected failure: {err}"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_removes_contacts_with_encoded_phone_numbers() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/api/sos/contacts/%2B15551234567")
        .with_status(200)
        .with_body(json!({ "message": "Contact removed" }).to_string())
        .create_async()
        .await;

    let res = api(&server.url()).remove_contact("+15551234567").await?;
    mock.assert_async().await;

    match res {
        Reply::Success(update) => assert_eq!(update.message, "Contact removed"),
        Reply::Failed(err) => bail!("Unexpected failure: {err}"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_loads_sos_history_with_limit() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/sos/history")
        .match_query(Matcher::UrlEncoded("limit".to_string(), "5".to_string()))
        .with_status(200)
        .with_body(json!({ "history": [] }).to_string())
        .create_async()
        .await;

    let res = api(&server.url()).sos_history(5).await?;
    mock.assert_async().await;

    match res {
        Reply::Success(history) => assert!(history.history.is_empty()),
        Reply::Failed(err) => bail!("Unexpected failure: {err}"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_analyzes_emotion_conversations() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/emotion/analyze-conversation")
        .match_body(Matcher::Json(json!({ "messages": ["first", "second"] })))
        .with_status(200)
        .with_body(emotion_conversation_fixture().to_string())
        .create_async()
        .await;

    let messages = vec!["first".to_string(), "second".to_string()];
    let res = api(&server.url())
        .analyze_emotion_conversation(&messages)
        .await?;
    mock.assert_async().await;

    match res {
        Reply::Success(analysis) => {
            assert_eq!(analysis.overall_mental_health_risk, "MEDIUM");
            assert_eq!(analysis.emotional_patterns.len(), 1);
        }
        Reply::Failed(err) => bail!("Unexpected failure: {err}"),
    }

    return Ok(());
}

#[tokio::test]
async fn it_successfully_health_checks() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/health")
        .with_status(200)
        .with_body(json!({ "status": "healthy" }).to_string())
        .create_async()
        .await;

    let res = api(&server.url()).health_check().await?;
    mock.assert_async().await;

    assert_eq!(res, json!({ "status": "healthy" }));
    return Ok(());
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/health")
        .with_status(500)
        .with_body("oops")
        .create_async()
        .await;

    let res = api(&server.url()).health_check().await;
    mock.assert_async().await;

    assert!(res.is_err());
}
