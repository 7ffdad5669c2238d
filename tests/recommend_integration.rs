//! Integration tests for the chat-completion client.

use recommendarr_core::recommend::{OpenAiClient, RecommendError, split_suggestions};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

mod support;
use support::fixtures::chat_completion_json;
use support::socket_guard::start_mock_server_or_skip;

fn library() -> Vec<String> {
    vec!["Dune (2021)".to_string(), "Arrival (2016)".to_string()]
}

#[tokio::test]
async fn test_suggest_movies_sends_system_and_joined_library() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_json(json!({
            "model": "gpt-4o-mini",
            "messages": [
                {"role": "system", "content": "Recommend movies."},
                {"role": "user", "content": "Dune (2021),Arrival (2016)"}
            ]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_completion_json("Blade Runner 2049,Sicario,Enemy")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::with_base_url(
        "sk-test",
        "gpt-4o-mini",
        format!("{}/v1", mock_server.uri()),
    )
    .unwrap();
    let answer = client
        .suggest_movies("Recommend movies.", &library())
        .await
        .unwrap();

    assert_eq!(answer, "Blade Runner 2049,Sicario,Enemy");
    assert_eq!(split_suggestions(&answer).len(), 3);
}

#[tokio::test]
async fn test_suggest_movies_returns_content_verbatim() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_completion_json(" Heat, Ronin\n")),
        )
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::with_base_url("sk-test", "gpt-4o-mini", mock_server.uri()).unwrap();
    let answer = client.suggest_movies("p", &library()).await.unwrap();
    assert_eq!(answer, " Heat, Ronin\n");
}

#[tokio::test]
async fn test_zero_choices_is_empty_response_error() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [],
            "usage": {"prompt_tokens": 10, "completion_tokens": 0, "total_tokens": 10}
        })))
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::with_base_url("sk-test", "gpt-4o-mini", mock_server.uri()).unwrap();
    let err = client.suggest_movies("p", &library()).await.unwrap_err();
    assert!(matches!(err, RecommendError::EmptyResponse), "got: {err:?}");
}

#[tokio::test]
async fn test_non_200_status_includes_body() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        })))
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::with_base_url("sk-bad", "gpt-4o-mini", mock_server.uri()).unwrap();
    let err = client.suggest_movies("p", &library()).await.unwrap_err();

    match &err {
        RecommendError::HttpStatus { status, body } => {
            assert_eq!(*status, 401);
            assert!(body.contains("Incorrect API key"), "body: {body}");
        }
        other => panic!("expected HttpStatus, got: {other:?}"),
    }
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_non_200_success_status_is_rejected() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(202).set_body_json(chat_completion_json("Heat")))
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::with_base_url("sk-test", "gpt-4o-mini", mock_server.uri()).unwrap();
    let err = client.suggest_movies("p", &library()).await.unwrap_err();
    assert!(matches!(err, RecommendError::HttpStatus { status: 202, .. }));
}

#[tokio::test]
async fn test_malformed_json_is_parse_error() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{\"choices\": [ {\"message\": ")
                .insert_header("content-type", "application/json"),
        )
        .mount(&mock_server)
        .await;

    let client = OpenAiClient::with_base_url("sk-test", "gpt-4o-mini", mock_server.uri()).unwrap();
    let err = client.suggest_movies("p", &library()).await.unwrap_err();
    assert!(matches!(err, RecommendError::Parse { .. }), "got: {err:?}");
}
