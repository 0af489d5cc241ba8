use serde::{Deserialize, Serialize};

/// Request shape of the popup/page message protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AgentRequest {
    Ping,
    ScanPage,
    Ghostwrite { text: String },
}

/// Response shape of the popup/page message protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AgentResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl AgentResponse {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn with_text(text: impl Into<String>, method: &str) -> Self {
        Self {
            success: true,
            text: Some(text.into()),
            method: Some(method.to_string()),
            ..Self::default()
        }
    }

    pub fn written(method: &str) -> Self {
        Self {
            success: true,
            method: Some(method.to_string()),
            ..Self::default()
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AgentRequest, AgentResponse};

    #[test]
    fn requests_use_the_wire_action_tags() {
        let ping: AgentRequest = serde_json::from_str(r#"{"action":"ping"}"#).unwrap();
        assert_eq!(ping, AgentRequest::Ping);

        let scan: AgentRequest = serde_json::from_str(r#"{"action":"scan_page"}"#).unwrap();
        assert_eq!(scan, AgentRequest::ScanPage);

        let write: AgentRequest =
            serde_json::from_str(r#"{"action":"ghostwrite","text":"hello"}"#).unwrap();
        assert_eq!(
            write,
            AgentRequest::Ghostwrite {
                text: "hello".to_string()
            }
        );
    }

    #[test]
    fn failure_responses_omit_empty_fields() {
        let json = serde_json::to_string(&AgentResponse::failure("No text box found")).unwrap();
        assert_eq!(json, r#"{"success":false,"error":"No text box found"}"#);
    }
}
