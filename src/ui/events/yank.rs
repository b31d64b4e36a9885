//! Yank (copy) handlers
//!
//! `y` on a list screen copies the selected row to the system clipboard as
//! pretty-printed JSON.

use crate::dispatch::SharedState;
use crate::types::ToastKind;
use arboard::Clipboard;
use serde::Serialize;
use tracing::{debug, warn};

pub fn yank_selected_message(state: &SharedState) {
    let text = match state.read() {
        Ok(s) => s.logs.table.selected_row().and_then(row_json),
        Err(_) => return,
    };
    copy(state, text, "message");
}

pub fn yank_selected_client(state: &SharedState) {
    let text = match state.read() {
        Ok(s) => s.clients.table.selected_row().and_then(row_json),
        Err(_) => return,
    };
    copy(state, text, "client");
}

fn row_json<T: Serialize>(row: &T) -> Option<String> {
    serde_json::to_string_pretty(row).ok()
}

fn copy(state: &SharedState, text: Option<String>, what: &str) {
    let Some(text) = text else {
        debug!("nothing selected to yank");
        return;
    };

    let result = Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));

    let Ok(mut s) = state.write() else {
        return;
    };
    match result {
        Ok(()) => s.show_toast(ToastKind::Success, format!("Copied {what} to clipboard")),
        Err(err) => {
            warn!(error = %err, "failed to copy to clipboard");
            s.show_toast(ToastKind::Error, "Clipboard unavailable");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ApiClient;
    use serde_json::json;

    #[test]
    fn test_row_json_is_pretty() {
        let client = ApiClient {
            id: json!(7),
            name: Some("billing".into()),
            description: None,
            created_at: None,
        };
        let text = row_json(&client).unwrap();
        assert!(text.contains('\n'));
        assert!(text.contains("\"billing\""));
    }
}
