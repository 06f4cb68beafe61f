//! Human-readable messages from rejected requests.

use serde_json::Value;

/// Pick the message to show for a non-success response.
///
/// Preference order:
/// 1. a string `message` field of a JSON body
/// 2. a string `error` field of a JSON body
/// 3. the raw body text, if not blank
/// 4. `HTTP <status>: <status_text>`
pub fn error_message_from_body(status: u16, status_text: &str, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        let field = json
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| json.get("error").and_then(Value::as_str))
            .filter(|msg| !msg.trim().is_empty());

        if let Some(msg) = field {
            return msg.to_string();
        }
    }

    let raw = body.trim();
    if !raw.is_empty() {
        return raw.to_string();
    }

    format!("HTTP {}: {}", status, status_text)
}
