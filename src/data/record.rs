//! Motion records as read from the open data archives.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Placeholder title of a withdrawn motion.
pub const WITHDRAWN_TITLE: &str = "Motionen utgår";

/// One motion parsed from an archive entry, persisted to the raw JSONL store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMotionRecord {
    pub id: String,
    /// Submission date.
    pub date: Option<String>,
    /// Date the document was last processed by the publishing system.
    pub file_date: Option<String>,
    pub title: String,
    /// Author and party byline, e.g. "av John Doe (p)".
    pub subtitle: Option<String>,
    /// Plain-text body extracted from the HTML.
    pub text: String,
    pub main_author: Option<String>,
    pub author_party: Option<String>,
}

/// Why an archive entry did not produce a record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SkipReason {
    #[error("entry could not be read: {0}")]
    Unreadable(String),
    #[error("entry is not valid UTF-8")]
    NotUtf8,
    #[error("entry is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("dokumentstatus.dokument is not a mapping")]
    DocumentNotMapping,
    #[error("missing key {key} (id={}, title={})", display_opt(.id), display_opt(.title))]
    MissingKey {
        key: &'static str,
        id: Option<String>,
        title: Option<String>,
    },
    #[error("key {key} has an unexpected type")]
    WrongType { key: &'static str },
    #[error("stakeholder list is empty")]
    EmptyStakeholders,
    #[error("motion is withdrawn")]
    Withdrawn,
}

impl SkipReason {
    /// Short label used to aggregate skip counts.
    pub fn kind(&self) -> &'static str {
        match self {
            SkipReason::Unreadable(_) => "unreadable",
            SkipReason::NotUtf8 => "not_utf8",
            SkipReason::InvalidJson(_) => "invalid_json",
            SkipReason::DocumentNotMapping => "document_not_mapping",
            SkipReason::MissingKey { .. } => "missing_key",
            SkipReason::WrongType { .. } => "wrong_type",
            SkipReason::EmptyStakeholders => "empty_stakeholders",
            SkipReason::Withdrawn => "withdrawn",
        }
    }
}

fn display_opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("?")
}

/// A stakeholder named on the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: Option<String>,
    pub party: Option<String>,
}

impl Author {
    /// Both `namn` and `partibet` must be present; either may be null.
    fn from_value(value: &Value) -> Result<Self, SkipReason> {
        let object = value
            .as_object()
            .ok_or(SkipReason::WrongType { key: "intressent" })?;
        let field = |key: &'static str| match object.get(key) {
            None => Err(SkipReason::MissingKey {
                key,
                id: None,
                title: None,
            }),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(SkipReason::WrongType { key }),
        };
        Ok(Self {
            name: field("namn")?,
            party: field("partibet")?,
        })
    }
}

/// The `intressent` field holds either one stakeholder or a list of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stakeholder {
    Single(Author),
    Many(Vec<Author>),
}

impl Stakeholder {
    /// Only the first entry of a list has to be well formed; malformed later
    /// entries are dropped.
    pub fn from_value(value: &Value) -> Result<Self, SkipReason> {
        match value {
            Value::Array(items) => {
                let (first, rest) = items.split_first().ok_or(SkipReason::EmptyStakeholders)?;
                let mut authors = vec![Author::from_value(first)?];
                authors.extend(rest.iter().filter_map(|v| Author::from_value(v).ok()));
                Ok(Stakeholder::Many(authors))
            }
            Value::Object(_) => Author::from_value(value).map(Stakeholder::Single),
            _ => Err(SkipReason::WrongType { key: "intressent" }),
        }
    }

    /// The author credited for the motion: the only one, or the first listed.
    pub fn main_author(&self) -> Option<&Author> {
        match self {
            Stakeholder::Single(author) => Some(author),
            Stakeholder::Many(authors) => authors.first(),
        }
    }
}
