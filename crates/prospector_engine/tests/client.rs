use std::time::Duration;

use pretty_assertions::assert_eq;
use prospector_engine::{
    ClientSettings, FailureKind, ReqwestBackend, ScrapeApi, ScrapeRequestBody,
};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> ClientSettings {
    ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    }
}

fn request() -> ScrapeRequestBody {
    ScrapeRequestBody {
        urls: vec!["http://leilao.example".to_string()],
        palavras_chave: vec!["trator".to_string()],
        negativos_fortes: vec!["scania".to_string()],
        negativos_fracos: vec!["truck".to_string()],
    }
}

#[tokio::test]
async fn health_is_true_on_2xx() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let backend = ReqwestBackend::new(settings_for(&server));
    assert!(backend.health().await);
}

#[tokio::test]
async fn health_is_false_on_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let backend = ReqwestBackend::new(settings_for(&server));
    assert!(!backend.health().await);
}

#[tokio::test]
async fn health_is_false_when_unreachable() {
    let settings = ClientSettings {
        base_url: "http://127.0.0.1:9".to_string(),
        connect_timeout: Duration::from_millis(200),
        request_timeout: Duration::from_millis(200),
    };
    let backend = ReqwestBackend::new(settings);
    assert!(!backend.health().await);
}

#[tokio::test]
async fn submit_posts_the_exact_wire_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .and(body_json(json!({
            "urls": ["http://leilao.example"],
            "palavrasChave": ["trator"],
            "negativosFortes": ["scania"],
            "negativosFracos": ["truck"],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = ReqwestBackend::new(settings_for(&server));
    let rows = backend
        .submit(&request(), CancellationToken::new())
        .await
        .expect("submit ok");
    assert!(rows.is_empty());
}

#[tokio::test]
async fn submit_defaults_missing_row_fields_to_empty_strings() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "Site": "http://leilao.example", "Link": "http://leilao.example/lote/1" }]
        })))
        .mount(&server)
        .await;

    let backend = ReqwestBackend::new(settings_for(&server));
    let rows = backend
        .submit(&request(), CancellationToken::new())
        .await
        .expect("submit ok");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].site, "http://leilao.example");
    assert_eq!(rows[0].termos, "");
    assert_eq!(rows[0].descricao, "");
    assert_eq!(rows[0].link, "http://leilao.example/lote/1");
}

#[tokio::test]
async fn submit_surfaces_backend_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "message": "Limite máximo de 500 URLs" })),
        )
        .mount(&server)
        .await;

    let backend = ReqwestBackend::new(settings_for(&server));
    let err = backend
        .submit(&request(), CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(400));
    assert_eq!(err.message, "Limite máximo de 500 URLs");
}

#[tokio::test]
async fn submit_falls_back_to_status_line_without_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let backend = ReqwestBackend::new(settings_for(&server));
    let err = backend
        .submit(&request(), CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
    assert!(err.message.contains("503"));
}

#[tokio::test]
async fn malformed_response_body_is_a_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let backend = ReqwestBackend::new(settings_for(&server));
    let err = backend
        .submit(&request(), CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedResponse);
}

#[tokio::test]
async fn slow_response_settles_as_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "data": [] })),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let backend = ReqwestBackend::new(settings);
    let err = backend
        .submit(&request(), CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn cancellation_wins_over_a_late_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scrape"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(json!({ "data": [{ "Site": "late" }] })),
        )
        .mount(&server)
        .await;

    let backend = ReqwestBackend::new(settings_for(&server));
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let err = backend.submit(&request(), cancel).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Cancelled);
}
