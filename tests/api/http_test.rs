//! HTTP client behaviour against a one-shot local server.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use deskwatch::api::http::HttpNotificationApi;
use deskwatch::api::{ApiError, Credential, NotificationApi};

/// Serve one response and hand back the raw request text.
async fn serve_once(status_line: &str, body: &str) -> (String, oneshot::Receiver<String>) {
    let listener = match TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => listener,
        Err(err) => panic!("listener should bind: {err}"),
    };
    let addr = match listener.local_addr() {
        Ok(addr) => addr,
        Err(err) => panic!("listener should expose local addr: {err}"),
    };

    let (tx, rx) = oneshot::channel();
    let status_line_owned = status_line.to_owned();
    let body_owned = body.to_owned();
    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut read_buf = [0_u8; 4096];
            let n = socket.read(&mut read_buf).await.unwrap_or(0);
            let _ = tx.send(String::from_utf8_lossy(&read_buf[..n]).into_owned());

            let response = format!(
                "HTTP/1.1 {status_line_owned}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body_owned}",
                body_owned.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
        }
    });

    (format!("http://{addr}/api"), rx)
}

fn client(base_url: &str) -> HttpNotificationApi {
    match HttpNotificationApi::new(base_url, Duration::from_secs(5)) {
        Ok(api) => api,
        Err(err) => panic!("client should build: {err}"),
    }
}

async fn request_text(rx: oneshot::Receiver<String>) -> String {
    match rx.await {
        Ok(text) => text,
        Err(err) => panic!("server should capture the request: {err}"),
    }
}

#[tokio::test]
async fn list_sends_bearer_and_parses_backend_json() {
    let body = r#"[
        {"id": 1, "mensagem": "[CHAMADO:#45] O técnico João assumiu o chamado.", "lida": false, "dataCriacao": "2024-05-01T10:00:00"},
        {"id": 2, "mensagem": "Relatório disponível", "lida": true, "dataCriacao": "2024-05-02T11:30:00Z"}
    ]"#;
    let (url, rx) = serve_once("200 OK", body).await;
    let api = client(&url);

    let result = api.list(&Credential::bearer("abc123")).await;
    let notifications = match result {
        Ok(list) => list,
        Err(err) => panic!("list should succeed: {err}"),
    };
    assert_eq!(notifications.len(), 2);
    assert_eq!(notifications[0].id, 1);
    assert!(!notifications[0].is_read);
    assert!(notifications[1].is_read);

    let request = request_text(rx).await;
    assert!(request.starts_with("GET /api/notificacoes "));
    assert!(request.to_lowercase().contains("authorization: bearer abc123"));
}

#[tokio::test]
async fn mark_read_puts_to_item_endpoint() {
    let (url, rx) = serve_once("204 No Content", "").await;
    let api = client(&url);

    let result = api.mark_read(17, &Credential::bearer("abc123")).await;
    assert!(result.is_ok(), "mark_read should succeed: {result:?}");

    let request = request_text(rx).await;
    assert!(request.starts_with("PUT /api/notificacoes/17/lida "));
}

#[tokio::test]
async fn unauthorized_status_maps_to_unauthorized() {
    let (url, _rx) = serve_once("401 Unauthorized", "{}").await;
    let api = client(&url);

    let result = api.list(&Credential::bearer("expired")).await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn server_error_body_is_sanitised() {
    let (url, _rx) = serve_once(
        "500 Internal Server Error",
        "boom\n\n  while validating Bearer abcdefghijklmnop",
    )
    .await;
    let api = client(&url);

    match api.mark_read(1, &Credential::bearer("t")).await {
        Err(ApiError::HttpStatus { status, body }) => {
            assert_eq!(status, 500);
            assert!(!body.contains("abcdefghijklmnop"));
            assert!(body.starts_with("boom while validating"));
        }
        other => panic!("expected HttpStatus error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_list_body_is_parse_error() {
    let (url, _rx) = serve_once("200 OK", r#"{"not": "a list"}"#).await;
    let api = client(&url);

    let result = api.list(&Credential::bearer("t")).await;
    assert!(matches!(result, Err(ApiError::Parse(_))));
}
