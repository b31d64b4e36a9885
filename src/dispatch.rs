//! Background requests
//!
//! Each function prepares its request under a short write lock, spawns a
//! tokio task for the HTTP call, and writes the outcome back into the shared
//! state. `None` means nothing was spawned.

use crate::api::GatewayClient;
use crate::api::clients::{create_api_client, list_api_clients};
use crate::api::mail::send_mail;
use crate::api::messages::{export_outgoing_messages, list_outgoing_messages};
use crate::api::sms::send_sms;
use crate::export::save_export;
use crate::pages::{mail, sms};
use crate::state::AppState;
use crate::types::{ExportFormat, InputMode, ToastKind};
use std::sync::{Arc, RwLock};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

pub type SharedState = Arc<RwLock<AppState>>;

pub fn fetch_messages(state: SharedState, client: GatewayClient) -> Option<JoinHandle<()>> {
    let (request_id, query) = state.write().ok()?.logs.begin_fetch();

    Some(tokio::spawn(async move {
        let result = list_outgoing_messages(&client, &query).await;
        if let Ok(mut s) = state.write() {
            s.logs.apply_fetch(request_id, result);
        }
    }))
}

pub fn fetch_clients(state: SharedState, client: GatewayClient) -> Option<JoinHandle<()>> {
    let (request_id, query) = state.write().ok()?.clients.begin_fetch();

    Some(tokio::spawn(async move {
        let result = list_api_clients(&client, &query).await;
        if let Ok(mut s) = state.write() {
            s.clients.apply_fetch(request_id, result);
        }
    }))
}

pub fn submit_sms(state: SharedState, client: GatewayClient) -> Option<JoinHandle<()>> {
    let (payload, api_key) = {
        let mut s = state.write().ok()?;
        if s.sms.phase.is_submitting() {
            return None;
        }
        match s.sms.begin_submit() {
            Some(request) => request,
            None => {
                let missing = s.sms.missing().join(", ");
                s.show_toast(ToastKind::Warning, format!("Missing: {missing}"));
                return None;
            }
        }
    };

    Some(tokio::spawn(async move {
        let outcome = send_sms(&client, &payload, &api_key).await.map_err(|err| {
            error!(error = %err, "sms send failed");
            err.user_message(sms::SEND_FAILED)
        });

        if let Ok(mut s) = state.write() {
            let default_key = s.default_api_key.clone();
            match &outcome {
                Ok(()) => s.show_toast(ToastKind::Success, sms::SEND_OK),
                Err(message) => s.show_toast(ToastKind::Error, message.clone()),
            }
            s.sms.finish(outcome, default_key.as_deref());
        }
    }))
}

pub fn submit_mail(state: SharedState, client: GatewayClient) -> Option<JoinHandle<()>> {
    let (payload, api_key) = {
        let mut s = state.write().ok()?;
        if s.mail.phase.is_submitting() {
            return None;
        }
        match s.mail.begin_submit() {
            Some(request) => request,
            None => {
                let missing = s.mail.missing().join(", ");
                s.show_toast(ToastKind::Warning, format!("Missing: {missing}"));
                return None;
            }
        }
    };

    Some(tokio::spawn(async move {
        let outcome = send_mail(&client, &payload, &api_key).await.map_err(|err| {
            error!(error = %err, "mail send failed");
            err.user_message(mail::SEND_FAILED)
        });

        if let Ok(mut s) = state.write() {
            let default_key = s.default_api_key.clone();
            match &outcome {
                Ok(()) => s.show_toast(ToastKind::Success, mail::SEND_OK),
                Err(message) => s.show_toast(ToastKind::Error, message.clone()),
            }
            s.mail.finish(outcome, default_key.as_deref());
        }
    }))
}

/// Create a client from the open modal; refreshes the list on success
pub fn submit_new_client(state: SharedState, client: GatewayClient) -> Option<JoinHandle<()>> {
    let payload = {
        let mut s = state.write().ok()?;
        let form = s.clients.create.as_mut()?;
        match form.begin_submit() {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(warning) => {
                s.show_toast(ToastKind::Warning, warning);
                return None;
            }
        }
    };

    Some(tokio::spawn(async move {
        match create_api_client(&client, &payload).await {
            Ok(()) => {
                if let Ok(mut s) = state.write() {
                    s.clients.close_create();
                    if s.mode == InputMode::CreatingClient {
                        s.mode = InputMode::Normal;
                    }
                    s.show_toast(ToastKind::Success, "Client created successfully");
                }
                if let Some(refresh) = fetch_clients(state, client) {
                    let _ = refresh.await;
                }
            }
            Err(err) => {
                error!(error = %err, "create api client failed");
                if let Ok(mut s) = state.write() {
                    if let Some(form) = s.clients.create.as_mut() {
                        form.submitting = false;
                    }
                    s.show_toast(
                        ToastKind::Error,
                        err.user_message("Failed to create client"),
                    );
                }
            }
        }
    }))
}

/// Download the current log query as a file in the export directory
pub fn export_messages(
    state: SharedState,
    client: GatewayClient,
    format: ExportFormat,
) -> Option<JoinHandle<()>> {
    let (query, dir) = {
        let mut s = state.write().ok()?;
        if s.logs.exporting {
            return None;
        }
        s.logs.exporting = true;
        s.show_toast(
            ToastKind::Warning,
            format!("Exporting {}...", format.as_str().to_uppercase()),
        );
        (s.logs.query.clone(), s.export_dir.clone())
    };

    Some(tokio::spawn(async move {
        let saved = match export_outgoing_messages(&client, &query, format).await {
            Ok(bytes) => save_export(&dir, format, &bytes).map_err(|err| {
                warn!(error = %err, "could not save export");
                format!("Export failed: {err}")
            }),
            Err(err) => {
                error!(error = %err, "export request failed");
                Err(err.user_message("Export failed"))
            }
        };

        if let Ok(mut s) = state.write() {
            s.logs.exporting = false;
            match saved {
                Ok(path) => {
                    info!(path = %path.display(), "export saved");
                    s.show_toast(ToastKind::Success, format!("Saved {}", path.display()));
                }
                Err(message) => s.show_toast(ToastKind::Error, message),
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::pages::forms::FormPhase;
    use crate::table::TableEvent;
    use crate::types::Screen;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn shared(server: &MockServer) -> (SharedState, GatewayClient) {
        let mut config = Config::default();
        config.server.base_url = Some(server.uri());
        config.gateway.api_key = Some("default-key".into());
        let state = Arc::new(RwLock::new(AppState::new(&config)));
        let client = GatewayClient::new(&server.uri()).unwrap();
        (state, client)
    }

    #[tokio::test]
    async fn test_slow_stale_response_does_not_win() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/outgoing-messages"))
            .and(query_param("q", "old"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(300))
                    .set_body_json(json!({ "data": [{ "id": 1, "channel": "sms", "status": "sent" }], "total": 1 })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/outgoing-messages"))
            .and(query_param("q", "new"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    { "id": 2, "channel": "email", "status": "failed" },
                    { "id": 3, "channel": "email", "status": "sent" }
                ],
                "total": 2
            })))
            .mount(&server)
            .await;

        let (state, client) = shared(&server);

        state
            .write()
            .unwrap()
            .logs
            .apply_table_event(TableEvent::SearchChanged("old".into()));
        let slow = fetch_messages(state.clone(), client.clone()).unwrap();

        state
            .write()
            .unwrap()
            .logs
            .apply_table_event(TableEvent::SearchChanged("new".into()));
        let fast = fetch_messages(state.clone(), client).unwrap();

        fast.await.unwrap();
        slow.await.unwrap();

        let s = state.read().unwrap();
        assert_eq!(s.logs.total, 2);
        assert_eq!(s.logs.table.rows()[0].id, 2);
        assert!(!s.logs.table.is_loading());
    }

    #[tokio::test]
    async fn test_fetch_failure_empties_rows() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/outgoing-messages"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (state, client) = shared(&server);
        fetch_messages(state.clone(), client).unwrap().await.unwrap();

        let s = state.read().unwrap();
        assert_eq!(s.logs.total, 0);
        assert!(s.logs.table.rows().is_empty());
    }

    #[tokio::test]
    async fn test_sms_success_clears_form_and_toasts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sms/send"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let (state, client) = shared(&server);
        {
            let mut s = state.write().unwrap();
            s.sms.phone_numbers = "9876543210".into();
            s.sms.content = "hello".into();
            s.sms.dlt_template_id = "1107".into();
        }

        submit_sms(state.clone(), client.clone()).unwrap().await.unwrap();

        let s = state.read().unwrap();
        assert_eq!(s.sms.phase, FormPhase::Success(sms::SEND_OK.into()));
        assert!(s.sms.phone_numbers.is_empty());
        assert_eq!(s.sms.api_key, "default-key");
        assert_eq!(s.toast.as_ref().unwrap().kind, ToastKind::Success);
    }

    #[tokio::test]
    async fn test_sms_invalid_form_never_sends() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (state, client) = shared(&server);
        assert!(submit_sms(state.clone(), client).is_none());
        let s = state.read().unwrap();
        assert_eq!(s.toast.as_ref().unwrap().kind, ToastKind::Warning);
        assert_eq!(s.sms.phase, FormPhase::Idle);
    }

    #[tokio::test]
    async fn test_mail_failure_keeps_values() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/mail/send"))
            .respond_with(
                ResponseTemplate::new(422).set_body_json(json!({ "message": "Bad recipient" })),
            )
            .mount(&server)
            .await;

        let (state, client) = shared(&server);
        {
            let mut s = state.write().unwrap();
            s.mail.to = "a@example.com".into();
            s.mail.subject = "Hi".into();
            s.mail.body = "Body".into();
        }

        submit_mail(state.clone(), client).unwrap().await.unwrap();

        let s = state.read().unwrap();
        assert_eq!(s.mail.phase, FormPhase::Error("Bad recipient".into()));
        assert_eq!(s.mail.to, "a@example.com");
        assert_eq!(s.toast.as_ref().unwrap().text, "Bad recipient");
    }

    #[tokio::test]
    async fn test_create_client_refreshes_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api-client"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api-clients"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "id": 9, "name": "crm" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (state, client) = shared(&server);
        {
            let mut s = state.write().unwrap();
            s.screen = Screen::ApiClients;
            s.mode = InputMode::CreatingClient;
            s.clients.open_create();
            s.clients.create.as_mut().unwrap().name = "crm".into();
        }

        submit_new_client(state.clone(), client).unwrap().await.unwrap();

        let s = state.read().unwrap();
        assert!(s.clients.create.is_none());
        assert_eq!(s.mode, InputMode::Normal);
        assert_eq!(s.clients.table.rows().len(), 1);
        assert_eq!(s.toast.as_ref().unwrap().text, "Client created successfully");
    }

    #[tokio::test]
    async fn test_export_writes_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/outgoing-messages"))
            .and(query_param("export", "true"))
            .and(query_param("type", "csv"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"id\n1\n".to_vec()))
            .mount(&server)
            .await;

        let (state, client) = shared(&server);
        let dir = tempfile::tempdir().unwrap();
        state.write().unwrap().export_dir = dir.path().to_path_buf();

        export_messages(state.clone(), client, ExportFormat::Csv)
            .unwrap()
            .await
            .unwrap();

        let s = state.read().unwrap();
        assert!(!s.logs.exporting);
        assert_eq!(s.toast.as_ref().unwrap().kind, ToastKind::Success);
        let written: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(written.len(), 1);
    }
}
