//! Frontend Models
//!
//! Data structures matching backend payloads.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Backend identifier.
///
/// The backend is free to send ids as JSON strings or numbers; both are kept
/// as text and written back in the same shape they arrived in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(String);

impl Id {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integer value only when it prints back to the exact same text
    fn as_integer(&self) -> Option<i64> {
        let value: i64 = self.0.parse().ok()?;
        (value.to_string() == self.0).then_some(value)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Id {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for Id {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_integer() {
            Some(n) => serializer.serialize_i64(n),
            None => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Id(s),
            Raw::Int(n) => Id(n.to_string()),
        })
    }
}

/// Problem pool entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Problem {
    /// Case-insensitive match on title or any tag. `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
    }
}

/// Full problem with statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemDetail {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub time_limit_ms: Option<u32>,
    #[serde(default)]
    pub memory_limit_kb: Option<u32>,
}

impl ProblemDetail {
    pub fn summary(&self) -> Problem {
        Problem {
            id: self.id.clone(),
            title: self.title.clone(),
            difficulty: self.difficulty.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// Body for creating or updating a problem
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProblemPayload {
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub tags: Vec<String>,
    pub time_limit_ms: u32,
    pub memory_limit_kb: u32,
}

/// Difficulty options offered by the problem editor
pub const DIFFICULTIES: &[(&str, &str)] = &[
    ("easy", "Easy"),
    ("medium", "Medium"),
    ("hard", "Hard"),
];

/// Server-side row linking a problem to a contest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestProblem {
    /// Association id
    pub id: Id,
    pub problem_id: Id,
    pub order: u32,
    pub points: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contest {
    pub id: Id,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub problems: Vec<ContestProblem>,
}

/// Body for creating or updating a contest's own fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContestPayload {
    pub title: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
}

/// Body for `POST /contests/{id}/problems`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAssociation {
    pub problem_id: Id,
    pub order: u32,
    pub points: u32,
}

/// Body for `PUT /contests/{id}/problems/{assocId}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AssociationPatch {
    pub order: u32,
    pub points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Pending,
    Running,
    Accepted,
    WrongAnswer,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    RuntimeError,
    CompilationError,
    #[serde(other)]
    Unknown,
}

impl SubmissionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "Pending",
            SubmissionStatus::Running => "Running",
            SubmissionStatus::Accepted => "Accepted",
            SubmissionStatus::WrongAnswer => "Wrong Answer",
            SubmissionStatus::TimeLimitExceeded => "Time Limit Exceeded",
            SubmissionStatus::MemoryLimitExceeded => "Memory Limit Exceeded",
            SubmissionStatus::RuntimeError => "Runtime Error",
            SubmissionStatus::CompilationError => "Compilation Error",
            SubmissionStatus::Unknown => "Unknown",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            SubmissionStatus::Accepted => "status-badge ok",
            SubmissionStatus::Pending | SubmissionStatus::Running => "status-badge waiting",
            SubmissionStatus::Unknown => "status-badge",
            _ => "status-badge fail",
        }
    }

    /// Judging finished; the verdict won't change
    pub fn is_final(&self) -> bool {
        !matches!(self, SubmissionStatus::Pending | SubmissionStatus::Running)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: Id,
    pub problem_id: Id,
    #[serde(default)]
    pub problem_title: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    pub language: String,
    #[serde(default)]
    pub status: SubmissionStatus,
    #[serde(default)]
    pub score: Option<u32>,
    #[serde(default)]
    pub time_ms: Option<u32>,
    #[serde(default)]
    pub memory_kb: Option<u32>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSubmission {
    pub problem_id: Id,
    pub language: String,
    pub code: String,
}

/// Languages offered by the submit form: (backend value, label)
pub const LANGUAGES: &[(&str, &str)] = &[
    ("cpp", "C++17"),
    ("c", "C11"),
    ("python", "Python 3"),
    ("java", "Java 17"),
    ("rust", "Rust"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UserPatch {
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_accepts_numbers_and_strings() {
        let from_num: Id = serde_json::from_str("42").unwrap();
        let from_str: Id = serde_json::from_str("\"p1\"").unwrap();
        assert_eq!(from_num.as_str(), "42");
        assert_eq!(from_str.as_str(), "p1");
    }

    #[test]
    fn test_id_serializes_in_original_shape() {
        assert_eq!(serde_json::to_string(&Id::from("42")).unwrap(), "42");
        assert_eq!(serde_json::to_string(&Id::from("p1")).unwrap(), "\"p1\"");
        // Leading zeros would be lost as a number
        assert_eq!(serde_json::to_string(&Id::from("007")).unwrap(), "\"007\"");
    }

    #[test]
    fn test_login_response_ignores_extra_fields() {
        let json = r#"{"access_token": "abc", "token_type": "bearer"}"#;
        let resp: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.access_token, "abc");
    }

    #[test]
    fn test_signed_id_keeps_its_text() {
        assert_eq!(serde_json::to_string(&Id::from("-5")).unwrap(), "-5");
        assert_eq!(serde_json::to_string(&Id::from("-05")).unwrap(), "\"-05\"");
        assert_eq!(serde_json::to_string(&Id::from("-0")).unwrap(), "\"-0\"");
        assert_eq!(serde_json::to_string(&Id::from("+5")).unwrap(), "\"+5\"");
    }

    #[test]
    fn test_contest_problems_default_to_empty() {
        let json = r#"{"id": 3, "title": "Weekly", "start_time": "2024-01-01T10:00", "end_time": "2024-01-01T12:00"}"#;
        let contest: Contest = serde_json::from_str(json).unwrap();
        assert!(contest.problems.is_empty());
        assert_eq!(contest.id, Id::from("3"));
    }

    #[test]
    fn test_unknown_status_does_not_fail() {
        let json = r#"{"id": 1, "problem_id": 2, "language": "cpp", "status": "presentation_error"}"#;
        let sub: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(sub.status, SubmissionStatus::Unknown);
        assert!(sub.status.is_final());
    }

    #[test]
    fn test_problem_matches_title_or_tag() {
        let problem = Problem {
            id: Id::from("p1"),
            title: "Two Sum".to_string(),
            difficulty: "easy".to_string(),
            tags: vec!["Hash-Table".to_string()],
        };
        assert!(problem.matches("two"));
        assert!(problem.matches("hash"));
        assert!(problem.matches(""));
        assert!(!problem.matches("graph"));
    }
}
