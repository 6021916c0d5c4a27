//! Interaction records and their enums.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the HCP was engaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InteractionType {
    #[default]
    Meeting,
    Call,
    Email,
    Chat,
    Conference,
}

impl InteractionType {
    pub const ALL: [InteractionType; 5] = [
        InteractionType::Meeting,
        InteractionType::Call,
        InteractionType::Email,
        InteractionType::Chat,
        InteractionType::Conference,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            InteractionType::Meeting => "Meeting",
            InteractionType::Call => "Call",
            InteractionType::Email => "Email",
            InteractionType::Chat => "Chat",
            InteractionType::Conference => "Conference",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionType::Meeting => "meeting",
            InteractionType::Call => "call",
            InteractionType::Email => "email",
            InteractionType::Chat => "chat",
            InteractionType::Conference => "conference",
        }
    }

    /// Next type in [`InteractionType::ALL`], wrapping around.
    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Previous type in [`InteractionType::ALL`], wrapping around.
    pub fn prev(&self) -> Self {
        let i = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl FromStr for InteractionType {
    type Err = ();

    // Lenient: backends and users spell these in many ways.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "meeting" | "visit" | "in-person" | "in_person" => Ok(InteractionType::Meeting),
            "call" | "phone" | "phone call" | "phone_call" => Ok(InteractionType::Call),
            "email" | "e-mail" | "mail" => Ok(InteractionType::Email),
            "chat" | "message" => Ok(InteractionType::Chat),
            "conference" | "event" | "congress" => Ok(InteractionType::Conference),
            _ => Err(()),
        }
    }
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Observed HCP sentiment during the interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Sentiment::Positive => Sentiment::Neutral,
            Sentiment::Neutral => Sentiment::Negative,
            Sentiment::Negative => Sentiment::Positive,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Sentiment::Positive => Sentiment::Negative,
            Sentiment::Neutral => Sentiment::Positive,
            Sentiment::Negative => Sentiment::Neutral,
        }
    }
}

impl FromStr for Sentiment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" | "good" => Ok(Sentiment::Positive),
            "neutral" | "mixed" => Ok(Sentiment::Neutral),
            "negative" | "bad" => Ok(Sentiment::Negative),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where an interaction record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InteractionSource {
    /// Entered field by field in the log form
    #[default]
    Form,
    /// Extracted by the backend from a free-text note
    Chat,
}

/// A logged interaction with a healthcare professional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: u64,
    pub hcp_name: String,
    pub interaction_type: InteractionType,
    pub date: NaiveDate,
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default)]
    pub topics: String,
    #[serde(default)]
    pub sentiment: Sentiment,
    #[serde(default)]
    pub outcomes: String,
    #[serde(default)]
    pub follow_up: Option<String>,
    #[serde(default)]
    pub follow_up_done: bool,
    #[serde(default)]
    pub source: InteractionSource,
    pub created_at: DateTime<Utc>,
}

impl Interaction {
    /// Whether this interaction has an open follow-up action.
    pub fn has_pending_follow_up(&self) -> bool {
        !self.follow_up_done
            && self
                .follow_up
                .as_deref()
                .is_some_and(|f| !f.trim().is_empty())
    }

    /// Case-insensitive match against name, type, topics, outcomes and attendees.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.hcp_name.to_lowercase().contains(&query)
            || self.interaction_type.as_str().contains(&query)
            || self.topics.to_lowercase().contains(&query)
            || self.outcomes.to_lowercase().contains(&query)
            || self
                .attendees
                .iter()
                .any(|a| a.to_lowercase().contains(&query))
    }
}

/// Everything needed to create an [`Interaction`]; the store assigns the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionDraft {
    pub hcp_name: String,
    pub interaction_type: InteractionType,
    pub date: NaiveDate,
    pub attendees: Vec<String>,
    pub topics: String,
    pub sentiment: Sentiment,
    pub outcomes: String,
    pub follow_up: Option<String>,
    pub source: InteractionSource,
}

impl InteractionDraft {
    /// A draft for `hcp_name` on `date` with every other field at its default.
    pub fn new(hcp_name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            hcp_name: hcp_name.into(),
            interaction_type: InteractionType::default(),
            date,
            attendees: Vec::new(),
            topics: String::new(),
            sentiment: Sentiment::default(),
            outcomes: String::new(),
            follow_up: None,
            source: InteractionSource::Form,
        }
    }
}

/// Split a comma separated attendee list, dropping empty entries.
pub fn parse_attendees(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
