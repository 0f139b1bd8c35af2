//! Study module request and session types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::curriculum::ResolvedSlot;

/// Everything the generator needs to know about one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub day: i64,
    pub topic: String,
    pub subject: String,
    pub phase_description: String,
}

impl GenerationRequest {
    /// Build the request for a resolved day
    pub fn for_slot(slot: &ResolvedSlot) -> Self {
        Self {
            day: slot.day,
            topic: slot.topic.to_string(),
            subject: slot.subject.to_string(),
            phase_description: slot.phase.description.to_string(),
        }
    }
}

/// Kind of study session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionType {
    Theory,
    Application,
}

impl SessionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Theory => "Theory",
            Self::Application => "Application",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "theory" => Ok(Self::Theory),
            "application" => Ok(Self::Application),
            other => Err(format!("unknown session type '{}'", other)),
        }
    }
}

/// One generated study session
///
/// `content` is markdown and is rendered as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub title: String,
    pub session_type: SessionType,
    pub content: String,
}

impl Session {
    pub fn new(title: impl Into<String>, session_type: SessionType, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: title.into(),
            session_type,
            content: content.into(),
        }
    }
}

/// Why a generation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationErrorKind {
    /// The service could not be reached or did not answer in time
    NetworkFailure,
    /// The answer could not be turned into sessions
    MalformedResponse,
    /// The service answered with an error
    RemoteServiceError,
    /// Local setup problem: missing API key or a broken prompt template
    Setup,
}

/// A failed generation; `message` is what the user sees
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GenerationError {
    pub kind: GenerationErrorKind,
    pub message: String,
}

impl GenerationError {
    pub fn new(kind: GenerationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::NetworkFailure, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::MalformedResponse, message)
    }

    pub fn remote(message: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::RemoteServiceError, message)
    }

    pub fn setup(message: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::Setup, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum::resolve;

    #[test]
    fn test_request_for_slot() {
        let request = GenerationRequest::for_slot(&resolve(1));
        assert_eq!(request.day, 1);
        assert_eq!(request.subject, "Soil Mechanics");
        assert_eq!(request.topic, "Phase Diagram");
        assert!(!request.phase_description.is_empty());
    }

    #[test]
    fn test_session_type_parse_is_case_insensitive() {
        assert_eq!("Theory".parse::<SessionType>(), Ok(SessionType::Theory));
        assert_eq!("THEORY".parse::<SessionType>(), Ok(SessionType::Theory));
        assert_eq!(" application ".parse::<SessionType>(), Ok(SessionType::Application));
        assert!("Practice".parse::<SessionType>().is_err());
    }

    #[test]
    fn test_session_ids_are_unique() {
        let a = Session::new("A", SessionType::Theory, "x");
        let b = Session::new("A", SessionType::Theory, "x");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_error_display_is_message() {
        let err = GenerationError::network("timeout");
        assert_eq!(err.to_string(), "timeout");
        assert_eq!(err.kind, GenerationErrorKind::NetworkFailure);
    }
}
