//! The structured-notes record and its declared response schema.
//!
//! A structured reply must deserialize into [`StructuredResult`] exactly:
//! every required field present, enum fields restricted to their literals,
//! no unknown fields. Anything else is a `MalformedResponse`.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::AiError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructuredResult {
    pub projects: Vec<Project>,
    pub people: Vec<Person>,
    pub decisions: Vec<Decision>,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

/// Deserialized from its literal string only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ProjectStatus {
    #[serde(rename = "On Track")]
    OnTrack,
    #[serde(rename = "At Risk")]
    AtRisk,
    Completed,
}

impl ProjectStatus {
    pub const LITERALS: [&'static str; 3] = ["On Track", "At Risk", "Completed"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "On Track",
            Self::AtRisk => "At Risk",
            Self::Completed => "Completed",
        }
    }
}

impl TryFrom<String> for ProjectStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "On Track" => Ok(Self::OnTrack),
            "At Risk" => Ok(Self::AtRisk),
            "Completed" => Ok(Self::Completed),
            _ => Err(unknown_literal("status", &value, &Self::LITERALS)),
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Person {
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Decision {
    pub summary: String,
    pub impact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_made: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Task {
    pub description: String,
    pub assignee: String,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const LITERALS: [&'static str; 3] = ["High", "Medium", "Low"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl TryFrom<String> for Priority {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "High" => Ok(Self::High),
            "Medium" => Ok(Self::Medium),
            "Low" => Ok(Self::Low),
            _ => Err(unknown_literal("priority", &value, &Self::LITERALS)),
        }
    }
}

fn unknown_literal(field: &str, value: &str, allowed: &[&str]) -> String {
    format!("unknown {field} {value:?}, expected one of {allowed:?}")
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StructuredResult {
    /// Parse a reply body. The raw text only goes to the debug log.
    pub fn from_reply(text: &str) -> Result<Self, AiError> {
        serde_json::from_str(text.trim()).map_err(|e| {
            debug!(raw = %text, "structured reply rejected: {e}");
            AiError::MalformedResponse(format!("reply does not match the notes schema: {e}"))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
            && self.people.is_empty()
            && self.decisions.is_empty()
            && self.tasks.is_empty()
    }
}

/// The declared shape sent with structured requests, in the provider's
/// OpenAPI-subset schema dialect.
pub fn response_schema() -> serde_json::Value {
    let string = || serde_json::json!({ "type": "STRING" });
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "projects": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": string(),
                        "description": string(),
                        "status": { "type": "STRING", "enum": ProjectStatus::LITERALS },
                        "deadline": string(),
                    },
                    "required": ["name", "description", "status"],
                },
            },
            "people": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": string(),
                        "role": string(),
                    },
                    "required": ["name", "role"],
                },
            },
            "decisions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "summary": string(),
                        "impact": string(),
                        "dateMade": string(),
                    },
                    "required": ["summary", "impact"],
                },
            },
            "tasks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "description": string(),
                        "assignee": string(),
                        "priority": { "type": "STRING", "enum": Priority::LITERALS },
                        "dueDate": string(),
                    },
                    "required": ["description", "assignee", "priority"],
                },
            },
        },
        "required": ["projects", "people", "decisions", "tasks"],
        "propertyOrdering": ["projects", "people", "decisions", "tasks"],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn sample() -> StructuredResult {
        StructuredResult {
            projects: vec![Project {
                name: "Website relaunch".into(),
                description: "New landing page and docs".into(),
                status: ProjectStatus::AtRisk,
                deadline: Some("2026-11-30".into()),
            }],
            people: vec![Person {
                name: "Dana".into(),
                role: "Design lead".into(),
            }],
            decisions: vec![Decision {
                summary: "Drop the legacy API".into(),
                impact: "High".into(),
                date_made: None,
            }],
            tasks: vec![
                Task {
                    description: "Draft migration guide".into(),
                    assignee: "Sam".into(),
                    priority: Priority::High,
                    due_date: Some("Friday".into()),
                },
                Task {
                    description: "Book venue".into(),
                    assignee: "Unassigned".into(),
                    priority: Priority::Low,
                    due_date: None,
                },
            ],
        }
    }

    #[test]
    fn exact_serialization_parses_back_equal() {
        let original = sample();
        let text = serde_json::to_string(&original).unwrap();
        assert_eq!(StructuredResult::from_reply(&text).unwrap(), original);
    }

    #[test]
    fn wire_names_are_camel_case_literals() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["projects"][0]["status"], "At Risk");
        assert_eq!(json["tasks"][0]["dueDate"], "Friday");
        assert_eq!(json["tasks"][0]["priority"], "High");
        assert!(json["decisions"][0].get("dateMade").is_none());
    }

    #[test]
    fn null_optional_field_is_accepted() {
        let text = r#"{"projects":[],"people":[],"decisions":[{"summary":"s","impact":"i","dateMade":null}],"tasks":[]}"#;
        let result = StructuredResult::from_reply(text).unwrap();
        assert_eq!(result.decisions[0].date_made, None);
    }

    #[test]
    fn task_without_assignee_is_malformed() {
        let text = r#"{"projects":[],"people":[],"decisions":[],"tasks":[{"description":"d","priority":"High"}]}"#;
        let err = StructuredResult::from_reply(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
        assert!(err.detail().contains("assignee"));
    }

    #[test]
    fn missing_collection_is_malformed() {
        let text = r#"{"projects":[],"people":[],"decisions":[]}"#;
        let err = StructuredResult::from_reply(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn undeclared_priority_is_malformed() {
        let text = r#"{"projects":[],"people":[],"decisions":[],"tasks":[{"description":"d","assignee":"a","priority":"Urgent"}]}"#;
        let err = StructuredResult::from_reply(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn tagged_object_priority_is_malformed() {
        let text = r#"{"projects":[],"people":[],"decisions":[],"tasks":[{"description":"d","assignee":"a","priority":{"High":null}}]}"#;
        let err = StructuredResult::from_reply(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn tagged_object_status_is_malformed() {
        let text = r#"{"projects":[{"name":"n","description":"d","status":{"Completed":null}}],"people":[],"decisions":[],"tasks":[]}"#;
        let err = StructuredResult::from_reply(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn variant_name_is_not_a_literal() {
        let text = r#"{"projects":[{"name":"n","description":"d","status":"OnTrack"}],"people":[],"decisions":[],"tasks":[]}"#;
        let err = StructuredResult::from_reply(text).unwrap_err();
        assert!(err.detail().contains("On Track"));
    }

    #[test]
    fn unknown_field_is_malformed() {
        let text = r#"{"projects":[],"people":[{"name":"n","role":"r","email":"e"}],"decisions":[],"tasks":[]}"#;
        let err = StructuredResult::from_reply(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn prose_is_malformed() {
        let err = StructuredResult::from_reply("Here are your notes!").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
        assert!(!err.detail().contains("Here are your notes"));
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let result = StructuredResult::from_reply(
            "\n {\"projects\":[],\"people\":[],\"decisions\":[],\"tasks\":[]}\n",
        )
        .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn schema_declares_required_fields_and_literals() {
        let schema = response_schema();
        assert_eq!(
            schema["required"],
            serde_json::json!(["projects", "people", "decisions", "tasks"])
        );
        let task = &schema["properties"]["tasks"]["items"];
        assert_eq!(
            task["required"],
            serde_json::json!(["description", "assignee", "priority"])
        );
        assert_eq!(
            task["properties"]["priority"]["enum"],
            serde_json::json!(["High", "Medium", "Low"])
        );
    }
}
