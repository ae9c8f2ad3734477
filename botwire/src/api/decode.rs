//! Response decoding into typed envelopes.
//!
//! Decoding never produces a fatal error: shape mismatches become synthetic
//! `ok:false` envelopes carrying the decode error and the raw body, so
//! callers always receive a typed result.

use botwire_core::{ApiResponse, EditResult, Message};
use serde::de::DeserializeOwned;

/// Decodes response bytes for a declared result type.
pub fn decode_response<T: DeserializeOwned>(bytes: &[u8]) -> ApiResponse<T> {
    match serde_json::from_slice::<ApiResponse<T>>(bytes) {
        Ok(envelope) => envelope,
        Err(err) => ApiResponse::failure(format!(
            "response decode failed: {}; body: {}",
            err,
            String::from_utf8_lossy(bytes)
        )),
    }
}

/// Decodes an edit endpoint response, which returns either the edited
/// message or a bare boolean acknowledgement. The message shape is tried
/// first; the order is a fixed tie-break, not arbitrary.
pub fn decode_edit_result(bytes: &[u8]) -> ApiResponse<EditResult> {
    let message_err = match serde_json::from_slice::<ApiResponse<Message>>(bytes) {
        Ok(envelope) => {
            return ApiResponse {
                ok: envelope.ok,
                result: envelope.result.map(EditResult::Message),
                description: envelope.description,
                error_code: envelope.error_code,
                parameters: envelope.parameters,
            }
        }
        Err(err) => err,
    };

    match serde_json::from_slice::<ApiResponse<bool>>(bytes) {
        Ok(envelope) => ApiResponse {
            ok: envelope.ok,
            result: envelope.result.map(EditResult::Acknowledged),
            description: envelope.description,
            error_code: envelope.error_code,
            parameters: envelope.parameters,
        },
        Err(bool_err) => ApiResponse::failure(format!(
            "edit result decode failed: as message: {}; as acknowledgement: {}; body: {}",
            message_err,
            bool_err,
            String::from_utf8_lossy(bytes)
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use botwire_core::User;

    #[test]
    fn test_decode_success() {
        let body = br#"{"ok":true,"result":{"id":1,"is_bot":true,"first_name":"bot"}}"#;
        let envelope: ApiResponse<User> = decode_response(body);
        assert!(envelope.ok);
        assert_eq!(envelope.result.unwrap().id, 1);
    }

    #[test]
    fn test_decode_failure_keeps_platform_description() {
        let body = br#"{"ok":false,"description":"Bad Request: chat not found","error_code":400}"#;
        let envelope: ApiResponse<User> = decode_response(body);
        assert!(!envelope.ok);
        assert_eq!(
            envelope.description.as_deref(),
            Some("Bad Request: chat not found")
        );
    }

    #[test]
    fn test_malformed_body_becomes_synthetic_envelope() {
        let body = b"<html>bad gateway</html>";
        let envelope: ApiResponse<User> = decode_response(body);
        assert!(!envelope.ok);
        let description = envelope.description.unwrap();
        assert!(description.contains("response decode failed"));
        assert!(description.contains("bad gateway"));
    }

    #[test]
    fn test_edit_result_message_shape_wins() {
        let body = br#"{"ok":true,"result":{"message_id":9,"date":0,"chat":{"id":1,"type":"private"},"text":"edited"}}"#;
        let envelope = decode_edit_result(body);
        assert!(envelope.ok);
        match envelope.result.unwrap() {
            EditResult::Message(msg) => assert_eq!(msg.message_id, 9),
            EditResult::Acknowledged(_) => panic!("message shape must take precedence"),
        }
    }

    #[test]
    fn test_edit_result_boolean_shape() {
        let body = br#"{"ok":true,"result":true}"#;
        let envelope = decode_edit_result(body);
        assert!(envelope.ok);
        assert!(matches!(
            envelope.result.unwrap(),
            EditResult::Acknowledged(true)
        ));
    }

    #[test]
    fn test_edit_result_neither_shape_names_both_attempts() {
        let body = br#"{"ok":true,"result":123}"#;
        let envelope = decode_edit_result(body);
        assert!(!envelope.ok);
        let description = envelope.description.unwrap();
        assert!(description.contains("as message"));
        assert!(description.contains("as acknowledgement"));
    }

    #[test]
    fn test_edit_result_platform_failure_passes_through() {
        let body = br#"{"ok":false,"description":"message is not modified"}"#;
        let envelope = decode_edit_result(body);
        assert!(!envelope.ok);
        assert_eq!(
            envelope.description.as_deref(),
            Some("message is not modified")
        );
    }
}
