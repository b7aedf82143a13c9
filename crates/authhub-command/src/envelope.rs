//! Command frames and reply builders.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use authhub_core::error::AppError;
use authhub_core::types::response::Envelope;

/// One request frame: the command name and its logical payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    /// Command name, e.g. `login` or `validateUser`.
    pub cmd: String,
    /// Command payload; shape depends on the command.
    #[serde(default)]
    pub payload: Value,
}

impl CommandRequest {
    /// Parse a request from one raw frame.
    ///
    /// A malformed frame is a declined reply, not a dropped connection.
    pub fn parse(line: &str) -> Result<Self, Value> {
        serde_json::from_str(line)
            .map_err(|_| error_reply(&AppError::validation("Invalid command frame")))
    }
}

/// Fold an application error into the structured error reply.
pub fn error_reply(err: &AppError) -> Value {
    serde_json::to_value(Envelope::from(err)).unwrap_or_else(|_| {
        serde_json::json!({
            "message": "Internal error",
            "statusCode": 500,
            "status": "Error",
        })
    })
}

/// Reply for an unknown command name.
pub fn unknown_command_reply(cmd: &str) -> Value {
    error_reply(&AppError::not_found(format!("Unknown command '{cmd}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_well_formed_frame() {
        let req =
            CommandRequest::parse(r#"{"cmd":"login","payload":{"email":"a@b.c"}}"#).unwrap();
        assert_eq!(req.cmd, "login");
        assert_eq!(req.payload["email"], "a@b.c");
    }

    #[test]
    fn payload_is_optional() {
        let req = CommandRequest::parse(r#"{"cmd":"findAllUsers"}"#).unwrap();
        assert_eq!(req.cmd, "findAllUsers");
        assert!(req.payload.is_null());
    }

    #[test]
    fn malformed_frame_becomes_a_structured_error() {
        let reply = CommandRequest::parse("not json at all").unwrap_err();
        assert_eq!(reply["status"], "Error");
        assert_eq!(reply["statusCode"], 400);
    }

    #[test]
    fn error_reply_carries_kind_status() {
        let reply = error_reply(&AppError::unauthorized("Token not valid"));
        assert_eq!(reply["statusCode"], 401);
        assert_eq!(reply["message"], "Token not valid");
        assert_eq!(reply["status"], "Error");
    }

    #[test]
    fn unknown_command_is_a_404_reply() {
        let reply = unknown_command_reply("selfDestruct");
        assert_eq!(reply["statusCode"], 404);
        assert!(reply["message"].as_str().unwrap().contains("selfDestruct"));
    }
}
