use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Kinds of names a user can navigate to. Error and placeholder rows are not
/// name types, so they can never end up in history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NameType {
    Eth,
    Box,
    Dns,
    Address,
    Tld,
}

impl NameType {
    pub fn as_str(self) -> &'static str {
        match self {
            NameType::Eth => "eth",
            NameType::Box => "box",
            NameType::Dns => "dns",
            NameType::Address => "address",
            NameType::Tld => "tld",
        }
    }
}

impl fmt::Display for NameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NameType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eth" => Ok(NameType::Eth),
            "box" => Ok(NameType::Box),
            "dns" => Ok(NameType::Dns),
            "address" => Ok(NameType::Address),
            "tld" => Ok(NameType::Tld),
            other => Err(Error::UnknownNameType(other.to_string())),
        }
    }
}

/// One row of the search dropdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum SearchItem {
    Eth {
        text: String,
    },
    Box {
        text: String,
        is_valid: bool,
    },
    Dns {
        text: String,
    },
    Address {
        text: String,
    },
    Tld {
        text: String,
    },
    History {
        text: String,
        name_type: NameType,
        last_accessed: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        is_valid: Option<bool>,
    },
    Error {
        text: String,
    },
    Text {
        text: String,
    },
}

impl SearchItem {
    pub fn text(&self) -> &str {
        match self {
            SearchItem::Eth { text }
            | SearchItem::Box { text, .. }
            | SearchItem::Dns { text }
            | SearchItem::Address { text }
            | SearchItem::Tld { text }
            | SearchItem::History { text, .. }
            | SearchItem::Error { text }
            | SearchItem::Text { text } => text,
        }
    }

    /// The navigable kind of this row; `None` for error and placeholder rows.
    pub fn name_type(&self) -> Option<NameType> {
        match self {
            SearchItem::Eth { .. } => Some(NameType::Eth),
            SearchItem::Box { .. } => Some(NameType::Box),
            SearchItem::Dns { .. } => Some(NameType::Dns),
            SearchItem::Address { .. } => Some(NameType::Address),
            SearchItem::Tld { .. } => Some(NameType::Tld),
            SearchItem::History { name_type, .. } => Some(*name_type),
            SearchItem::Error { .. } | SearchItem::Text { .. } => None,
        }
    }

    pub fn is_history(&self) -> bool {
        matches!(self, SearchItem::History { .. })
    }

    /// Validity carried into history on selection. Only `.box` rows compute
    /// their own flag; history rows replay what was stored.
    pub fn validity(&self) -> Option<bool> {
        match self {
            SearchItem::Box { is_valid, .. } => Some(*is_valid),
            SearchItem::History { is_valid, .. } => *is_valid,
            _ => None,
        }
    }

    /// Short label used by text renderers.
    pub fn kind_label(&self) -> &'static str {
        match self {
            SearchItem::History { .. } => "history",
            SearchItem::Error { .. } => "error",
            SearchItem::Text { .. } => "text",
            other => other.name_type().map(NameType::as_str).unwrap_or("text"),
        }
    }
}

/// A previously selected suggestion, as persisted by a [`crate::HistoryStore`].
///
/// Field names follow the browser's `search-history-v2` local-storage layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub text: String,
    pub name_type: NameType,
    /// Unix time in milliseconds.
    pub last_accessed: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_valid: Option<bool>,
}

impl HistoryItem {
    pub fn new<S: Into<String>>(text: S, name_type: NameType, last_accessed: i64) -> Self {
        Self {
            text: text.into(),
            name_type,
            last_accessed,
            is_valid: None,
        }
    }

    pub fn same_entry(&self, text: &str, name_type: NameType) -> bool {
        self.text == text && self.name_type == name_type
    }
}

impl From<&HistoryItem> for SearchItem {
    fn from(h: &HistoryItem) -> Self {
        SearchItem::History {
            text: h.text.clone(),
            name_type: h.name_type,
            last_accessed: h.last_accessed,
            is_valid: h.is_valid,
        }
    }
}
