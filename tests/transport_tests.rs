//! Integration tests for the HTTP transport: header handling, error
//! classification, and response decoding against a mock server.

#[cfg(test)]
mod transport_tests {
    use std::time::Duration;

    use integrations_applemusic::types::SongsResponse;
    use integrations_applemusic::{
        AppleMusicClient, AppleMusicError, DecodeKind, DEFAULT_USER_AGENT,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tokio_test::assert_ok;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> AppleMusicClient {
        AppleMusicClient::builder()
            .base_url(server.uri())
            .developer_token("dev-token")
            .build()
            .expect("client should build")
    }

    fn song_envelope() -> serde_json::Value {
        json!({
            "data": [{
                "id": "1613600188",
                "type": "songs",
                "attributes": {
                    "name": "Harvest Moon",
                    "artistName": "Neil Young",
                    "durationInMillis": 305951
                }
            }]
        })
    }

    #[tokio::test]
    async fn get_decodes_success_envelope() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/catalog/us/songs/1613600188"))
            .respond_with(ResponseTemplate::new(200).set_body_json(song_envelope()))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let response: SongsResponse = client
            .get("catalog/us/songs/1613600188")
            .await
            .expect("request should succeed");

        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].resource.id, "1613600188");
        assert_eq!(response.data[0].attributes.name, "Harvest Moon");
        assert_eq!(response.data[0].attributes.artist_name, "Neil Young");
    }

    #[tokio::test]
    async fn request_headers_reach_the_wire() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/catalog/us/songs/1"))
            .and(header("user-agent", DEFAULT_USER_AGENT))
            .and(header("accept", "application/json"))
            .and(header("content-type", "application/json"))
            .and(header("authorization", "Bearer dev-token"))
            .and(header("music-user-token", "user-token"))
            .and(header("x-request-id", "req-42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(song_envelope()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = AppleMusicClient::builder()
            .base_url(mock_server.uri())
            .developer_token("dev-token")
            .user_token("user-token")
            .header("X-Request-Id", "req-42")
            .build()
            .expect("client should build");

        let result: Result<SongsResponse, _> = client.get("catalog/us/songs/1").await;
        assert_ok!(result);
    }

    #[tokio::test]
    async fn static_headers_cannot_replace_authorization() {
        let mock_server = MockServer::start().await;

        // The mock only matches the real bearer token, so a forged static
        // Authorization header would leave this expectation unmet.
        Mock::given(method("GET"))
            .and(path("/v1/catalog/us/songs/1"))
            .and(header("authorization", "Bearer dev-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(song_envelope()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = AppleMusicClient::builder()
            .base_url(mock_server.uri())
            .header("Authorization", "Bearer forged")
            .developer_token("dev-token")
            .build()
            .expect("client should build");

        let result: Result<SongsResponse, _> = client.get("catalog/us/songs/1").await;
        assert_ok!(result);
    }

    #[tokio::test]
    async fn forbidden_is_classified_as_authentication_error() {
        let mock_server = MockServer::start().await;

        let error_body = json!({
            "errors": [{
                "title": "Forbidden",
                "detail": "no access to this resource"
            }]
        });

        Mock::given(method("GET"))
            .and(path("/v1/me/library/songs"))
            .respond_with(ResponseTemplate::new(403).set_body_json(error_body))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client
            .get::<SongsResponse>("me/library/songs")
            .await
            .expect_err("request should fail");

        assert!(err.is_authentication_error());
        match err {
            AppleMusicError::Api(api) => {
                assert_eq!(api.status_code, 403);
                assert_eq!(api.message(), "Forbidden: no access to this resource");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rate_limit_is_flagged_after_a_single_attempt() {
        let mock_server = MockServer::start().await;

        let error_body = json!({
            "errors": [{
                "title": "Too Many Requests",
                "detail": "rate limit exceeded"
            }]
        });

        // expect(1) doubles as proof that the client does not retry.
        Mock::given(method("GET"))
            .and(path("/v1/catalog/us/songs/1"))
            .respond_with(ResponseTemplate::new(429).set_body_json(error_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client
            .get::<SongsResponse>("catalog/us/songs/1")
            .await
            .expect_err("request should fail");

        assert!(err.is_rate_limit_error());
        assert!(!err.is_invalid_request_error());
    }

    #[tokio::test]
    async fn server_error_without_details_falls_back_to_status_line() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/catalog/us/songs/1"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({})))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client
            .get::<SongsResponse>("catalog/us/songs/1")
            .await
            .expect_err("request should fail");

        assert!(err.is_server_error());
        assert!(err.to_string().contains("API error (status code: 500)"));
    }

    #[tokio::test]
    async fn error_with_empty_body_surfaces_decode_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/catalog/us/songs/1"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client
            .get::<SongsResponse>("catalog/us/songs/1")
            .await
            .expect_err("request should fail");

        match err {
            AppleMusicError::Decode { status_code, kind } => {
                assert_eq!(status_code, 500);
                assert_eq!(kind, DecodeKind::EmptyBody);
            }
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn html_error_page_is_reported_with_preview() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/catalog/us/songs/1"))
            .respond_with(
                ResponseTemplate::new(503)
                    .set_body_string("<html><body>Service Unavailable</body></html>"),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client
            .get::<SongsResponse>("catalog/us/songs/1")
            .await
            .expect_err("request should fail");

        match err {
            AppleMusicError::Decode {
                status_code,
                kind: DecodeKind::NotJson { preview },
            } => {
                assert_eq!(status_code, 503);
                assert!(preview.contains("<html>"));
            }
            other => panic!("expected NotJson decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_error_envelope_is_a_schema_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/catalog/us/songs/1"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"errors": "nope"})))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client
            .get::<SongsResponse>("catalog/us/songs/1")
            .await
            .expect_err("request should fail");

        match err {
            AppleMusicError::Decode { status_code, kind } => {
                assert_eq!(status_code, 400);
                assert!(matches!(kind, DecodeKind::Schema { .. }));
            }
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_success_body_is_a_decode_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/catalog/us/songs/1"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client
            .get::<SongsResponse>("catalog/us/songs/1")
            .await
            .expect_err("request should fail");

        match err {
            AppleMusicError::Decode { status_code, kind } => {
                assert_eq!(status_code, 200);
                assert_eq!(kind, DecodeKind::EmptyBody);
            }
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn post_empty_accepts_bodyless_reply() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/me/library"))
            .and(body_json(json!({"data": [{"id": "900", "type": "songs"}]})))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let result = client
            .post_empty(
                "me/library",
                &json!({"data": [{"id": "900", "type": "songs"}]}),
            )
            .await;

        assert_ok!(result);
    }

    #[tokio::test]
    async fn delete_empty_discards_reply_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/v1/me/library/playlists/p.123/tracks"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let result = client
            .delete_empty("me/library/playlists/p.123/tracks")
            .await;

        assert_ok!(result);
    }

    #[tokio::test]
    async fn put_round_trips_json_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/v1/me/library/playlists/p.123"))
            .and(body_json(json!({"attributes": {"name": "Renamed"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let result: Result<serde_json::Value, _> = client
            .put(
                "me/library/playlists/p.123",
                &json!({"attributes": {"name": "Renamed"}}),
            )
            .await;

        assert_ok!(result);
    }

    #[tokio::test]
    async fn timeout_maps_to_transport_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/catalog/us/songs/1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(song_envelope())
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&mock_server)
            .await;

        let client = AppleMusicClient::builder()
            .base_url(mock_server.uri())
            .timeout(Duration::from_millis(50))
            .build()
            .expect("client should build");

        let err = client
            .get::<SongsResponse>("catalog/us/songs/1")
            .await
            .expect_err("request should time out");

        match err {
            AppleMusicError::Transport { message } => {
                assert!(message.contains("timed out"), "unexpected message: {message}");
            }
            other => panic!("expected Transport error, got {other:?}"),
        }
    }
}
