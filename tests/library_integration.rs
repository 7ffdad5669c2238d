//! Integration tests for the Plex library fetcher.

use recommendarr_core::library::{FetchError, PlexClient, library_titles};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

mod support;
use support::fixtures::plex_section_xml;
use support::socket_guard::start_mock_server_or_skip;

#[tokio::test]
async fn test_fetch_section_returns_every_video_in_order() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    let movies = [
        ("Dune", "2021"),
        ("Arrival", "2016"),
        ("Sicario", "2015"),
        ("Arrival", "2016"),
    ];

    Mock::given(method("GET"))
        .and(path("/library/sections/1/all"))
        .and(query_param("X-Plex-Token", "plex-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(plex_section_xml(&movies))
                .insert_header("content-type", "text/xml;charset=utf-8"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PlexClient::with_base_url(mock_server.uri(), "plex-token").unwrap();
    let items = client.fetch_section("1").await.unwrap();

    assert_eq!(items.len(), movies.len());
    assert_eq!(
        library_titles(&items),
        vec!["Dune (2021)", "Arrival (2016)", "Sicario (2015)", "Arrival (2016)"]
    );
}

#[tokio::test]
async fn test_fetch_section_encodes_token() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/library/sections/2/all"))
        .and(query_param("X-Plex-Token", "a+b/c&d"))
        .respond_with(ResponseTemplate::new(200).set_body_string(plex_section_xml(&[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PlexClient::with_base_url(mock_server.uri(), "a+b/c&d").unwrap();
    let items = client.fetch_section("2").await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_fetch_section_unauthorized_is_http_status_error() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/library/sections/1/all"))
        .respond_with(ResponseTemplate::new(401).set_body_string("<html>Unauthorized</html>"))
        .mount(&mock_server)
        .await;

    let client = PlexClient::with_base_url(mock_server.uri(), "wrong").unwrap();
    let err = client.fetch_section("1").await.unwrap_err();

    match &err {
        FetchError::HttpStatus { status, body, .. } => {
            assert_eq!(*status, 401);
            assert!(body.contains("Unauthorized"));
        }
        other => panic!("expected HttpStatus, got: {other:?}"),
    }
    assert!(
        !err.to_string().contains("wrong"),
        "token must not leak into error text: {err}"
    );
}

#[tokio::test]
async fn test_fetch_section_malformed_body_is_parse_error() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/library/sections/1/all"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(
                    "<MediaContainer><Video title=\"Dune\"></Directory></MediaContainer>",
                ),
        )
        .mount(&mock_server)
        .await;

    let client = PlexClient::with_base_url(mock_server.uri(), "plex-token").unwrap();
    let err = client.fetch_section("1").await.unwrap_err();
    assert!(matches!(err, FetchError::Parse { .. }), "got: {err:?}");
}

#[tokio::test]
async fn test_fetch_section_connection_refused_is_network_error() {
    // Reserve a port, then release it so nothing is listening there.
    let Ok(listener) = std::net::TcpListener::bind("127.0.0.1:0") else {
        return;
    };
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client =
        PlexClient::with_base_url(format!("http://127.0.0.1:{port}"), "plex-token").unwrap();
    let err = client.fetch_section("1").await.unwrap_err();
    assert!(matches!(err, FetchError::Network { .. }), "got: {err:?}");
    assert!(!err.to_string().contains("plex-token"));
}
