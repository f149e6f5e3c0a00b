use garmin_connect_client::http_client::ReqwestConnectClient;
use garmin_connect_client::{ActivityId, ConnectClient, ConnectError};
use secrecy::SecretString;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestConnectClient {
    ReqwestConnectClient::new(&server.uri(), SecretString::new("tok".into())).expect("client")
}

fn activity_json(id: u64, name: &str) -> serde_json::Value {
    serde_json::json!({
        "activityId": id,
        "activityName": name,
        "startTimeLocal": "2024-05-01 07:30:00",
        "activityType": {"typeId": 1, "typeKey": "running"},
        "distance": 10000.0,
        "duration": 3000.0,
        "averageHR": 150.4,
        "maxHR": 171.6,
        "calories": 640.0
    })
}

#[tokio::test]
async fn requests_carry_session_cookie_and_nk_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/activity-service/activity/1"))
        .and(header("cookie", "SESSIONID=tok"))
        .and(header("nk", "NT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(activity_json(1, "Ride")))
        .expect(1)
        .mount(&server)
        .await;

    let activity = client_for(&server)
        .activity(ActivityId(1))
        .await
        .expect("activity");
    assert_eq!(activity.activity_name, "Ride");
}

#[tokio::test]
async fn activities_for_display_name_uses_start_and_limit() {
    let server = MockServer::start().await;
    let body = serde_json::json!([activity_json(1, "Ride"), activity_json(2, "Run")]);

    Mock::given(method("GET"))
        .and(path("/activitylist-service/activities/Jane"))
        .and(query_param("start", "0"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let acts = client_for(&server)
        .activities(Some("Jane"), 0, 100)
        .await
        .expect("acts");
    assert_eq!(acts.len(), 2);
    assert_eq!(acts[0].id, ActivityId(1));
    assert_eq!(acts[1].activity_name, "Run");
}

#[tokio::test]
async fn activities_display_name_is_sent_verbatim_as_one_segment() {
    let server = MockServer::start().await;
    let cases = [
        ("Jane#1", "/activitylist-service/activities/Jane%231"),
        ("a/b", "/activitylist-service/activities/a%2Fb"),
        ("x?y", "/activitylist-service/activities/x%3Fy"),
    ];
    for (_, p) in cases {
        Mock::given(method("GET"))
            .and(path(p))
            .and(query_param("start", "0"))
            .and(query_param("limit", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server);
    for (name, _) in cases {
        client
            .activities(Some(name), 0, 100)
            .await
            .unwrap_or_else(|e| panic!("{name:?}: {e}"));
    }

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 3);
    for req in &received {
        let pairs: Vec<(String, String)> = req.url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                (String::from("start"), String::from("0")),
                (String::from("limit"), String::from("100")),
            ]
        );
    }
}

#[tokio::test]
async fn activities_without_display_name_lists_own() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/activitylist-service/activities/search/activities"))
        .and(query_param("start", "0"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let acts = client_for(&server)
        .activities(None, 0, 100)
        .await
        .expect("acts");
    assert!(acts.is_empty());
}

#[tokio::test]
async fn activity_weather_parses_payload() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "issueDate": "2024-05-01T07:00:00.000+0000",
        "temp": 61,
        "apparentTemp": 59,
        "dewPoint": 48.2,
        "relativeHumidity": 63,
        "windDirection": 230,
        "windDirectionCompassPoint": "sw",
        "windSpeed": 8,
        "latitude": 55.67,
        "longitude": 12.56
    });

    Mock::given(method("GET"))
        .and(path("/weather-service/weather/77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let w = client_for(&server)
        .activity_weather(ActivityId(77))
        .await
        .expect("weather");
    assert_eq!(w.temp, 61.0);
    assert_eq!(w.wind_direction_compass_point, "sw");
    assert_eq!(w.longitude, 12.56);
}

#[tokio::test]
async fn delete_activity_returns_ok() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/activity-service/activity/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .delete_activity(ActivityId(5))
        .await
        .expect("delete");
}

#[tokio::test]
async fn rename_activity_puts_id_and_name() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/activity-service/activity/5"))
        .and(body_json(serde_json::json!({
            "activityId": 5,
            "activityName": "  Evening Ride "
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .rename_activity(ActivityId(5), "  Evening Ride ")
        .await
        .expect("rename");
}

#[tokio::test]
async fn non_success_statuses_map_to_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/activity-service/activity/401"))
        .respond_with(ResponseTemplate::new(401).set_body_string("login required"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/activity-service/activity/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/activity-service/activity/429"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/activity-service/activity/500"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.activity(ActivityId(401)).await {
        Err(ConnectError::Auth(body)) => assert_eq!(body, "login required"),
        other => panic!("expected Auth error, got {other:?}"),
    }
    assert!(matches!(
        client.activity(ActivityId(404)).await,
        Err(ConnectError::NotFound(_))
    ));
    assert!(matches!(
        client.delete_activity(ActivityId(429)).await,
        Err(ConnectError::RateLimited(_))
    ));
    match client.delete_activity(ActivityId(500)).await {
        Err(ConnectError::Api { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn unexpected_body_reports_snippet() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/activity-service/activity/3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "Morning Run"})),
        )
        .mount(&server)
        .await;

    match client_for(&server).activity(ActivityId(3)).await {
        Err(ConnectError::Decode(msg)) => assert!(msg.contains("Morning Run")),
        other => panic!("expected Decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn base_url_trailing_slash_is_handled() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather-service/weather/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/", server.uri());
    let client = ReqwestConnectClient::new(&base, SecretString::new("tok".into())).expect("client");
    let w = client.activity_weather(ActivityId(1)).await.expect("weather");
    assert_eq!(w.temp, 0.0);
}
