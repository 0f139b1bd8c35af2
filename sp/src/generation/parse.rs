//! Decoding model output into sessions

use serde::Deserialize;
use tracing::{debug, warn};

use super::types::{GenerationError, Session, SessionType};

/// Sessions a well-formed module contains
pub const EXPECTED_SESSIONS: usize = 4;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope {
    Wrapped { sessions: Vec<RawSession> },
    Bare(Vec<RawSession>),
}

#[derive(Debug, Deserialize)]
struct RawSession {
    #[serde(default)]
    title: String,
    #[serde(default, rename = "type")]
    session_type: String,
    #[serde(default)]
    content: String,
}

/// Strip a surrounding markdown code fence, if the model added one
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the info string (```json)
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parse the model's JSON answer into validated sessions
///
/// Accepts `{"sessions": [...]}` or a bare array. Every session needs a title,
/// content and a known type. A count or mix other than two Theory plus two
/// Application is logged and accepted as-is.
pub fn parse_sessions(text: &str) -> Result<Vec<Session>, GenerationError> {
    debug!(len = text.len(), "parse_sessions: called");
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(GenerationError::malformed("The model returned an empty response"));
    }

    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|e| GenerationError::malformed(format!("Could not parse study module: {}", e)))?;
    let raw = match envelope {
        Envelope::Wrapped { sessions } => sessions,
        Envelope::Bare(sessions) => sessions,
    };

    if raw.is_empty() {
        return Err(GenerationError::malformed("The study module contained no sessions"));
    }

    let mut sessions = Vec::with_capacity(raw.len());
    for (idx, r) in raw.into_iter().enumerate() {
        let n = idx + 1;
        if r.title.trim().is_empty() {
            return Err(GenerationError::malformed(format!("Session {} has no title", n)));
        }
        if r.content.trim().is_empty() {
            return Err(GenerationError::malformed(format!("Session {} has no content", n)));
        }
        let session_type: SessionType = r
            .session_type
            .parse()
            .map_err(|e| GenerationError::malformed(format!("Session {}: {}", n, e)))?;
        sessions.push(Session::new(r.title.trim(), session_type, r.content));
    }

    let theory = sessions
        .iter()
        .filter(|s| s.session_type == SessionType::Theory)
        .count();
    if sessions.len() != EXPECTED_SESSIONS || theory != EXPECTED_SESSIONS / 2 {
        warn!(
            count = sessions.len(),
            theory,
            "parse_sessions: unexpected module shape, keeping what was returned"
        );
    }

    Ok(sessions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::GenerationErrorKind;

    const FOUR: &str = r#"{"sessions": [
        {"title": "Soil phases", "type": "Theory", "content": "Solids, water, air."},
        {"title": "Relations", "type": "Theory", "content": "`e = Vv / Vs`"},
        {"title": "Numericals", "type": "Application", "content": "1. Find e."},
        {"title": "PYQs", "type": "Application", "content": "SSC JE 2019 Q4"}
    ]}"#;

    #[test]
    fn test_parse_four_sessions() {
        let sessions = parse_sessions(FOUR).unwrap();
        assert_eq!(sessions.len(), 4);
        assert_eq!(sessions[0].title, "Soil phases");
        assert_eq!(sessions[1].content, "`e = Vv / Vs`");
        assert_eq!(sessions[2].session_type, SessionType::Application);
    }

    #[test]
    fn test_parse_code_fenced() {
        let fenced = format!("```json\n{}\n```", FOUR);
        assert_eq!(parse_sessions(&fenced).unwrap().len(), 4);

        let bare_fence = format!("```\n{}\n```\n", FOUR);
        assert_eq!(parse_sessions(&bare_fence).unwrap().len(), 4);
    }

    #[test]
    fn test_parse_bare_array() {
        let text = r#"[{"title": "T", "type": "theory", "content": "c"}]"#;
        let sessions = parse_sessions(text).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].session_type, SessionType::Theory);
    }

    #[test]
    fn test_fewer_sessions_accepted() {
        let text = r#"{"sessions": [
            {"title": "A", "type": "Theory", "content": "a"},
            {"title": "B", "type": "Application", "content": "b"}
        ]}"#;
        assert_eq!(parse_sessions(text).unwrap().len(), 2);
    }

    #[test]
    fn test_rejects_empty_and_garbage() {
        for text in ["", "   ", "not json", "{}", r#"{"sessions": []}"#, "[]"] {
            let err = parse_sessions(text).unwrap_err();
            assert_eq!(err.kind, GenerationErrorKind::MalformedResponse, "input: {:?}", text);
        }
    }

    #[test]
    fn test_rejects_missing_fields() {
        let no_title = r#"[{"type": "Theory", "content": "c"}]"#;
        assert!(parse_sessions(no_title).unwrap_err().message.contains("no title"));

        let no_content = r#"[{"title": "T", "type": "Theory", "content": "  "}]"#;
        assert!(parse_sessions(no_content).unwrap_err().message.contains("no content"));
    }

    #[test]
    fn test_rejects_unknown_type() {
        let text = r#"[{"title": "T", "type": "Quiz", "content": "c"}]"#;
        let err = parse_sessions(text).unwrap_err();
        assert_eq!(err.kind, GenerationErrorKind::MalformedResponse);
        assert!(err.message.contains("quiz"));
    }
}
