//! Chat domain types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Intent
// =============================================================================

/// Support need a message is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Immediate danger or urgent distress.
    Crisis,
    /// Looking for a counsellor or therapist.
    Counseling,
    /// Looking for a peer or facilitated group.
    SupportGroup,
    /// Settlement-related support for newcomers.
    NewcomerOnboarding,
    /// Questions about fees and free services.
    Cost,
    /// Nothing recognised.
    Fallback,
}

impl Intent {
    /// Every intent, in classification precedence order.
    pub const ALL: [Intent; 6] = [
        Intent::Crisis,
        Intent::Counseling,
        Intent::SupportGroup,
        Intent::NewcomerOnboarding,
        Intent::Cost,
        Intent::Fallback,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Intent::Crisis => "crisis",
            Intent::Counseling => "counseling",
            Intent::SupportGroup => "support_group",
            Intent::NewcomerOnboarding => "newcomer_onboarding",
            Intent::Cost => "cost",
            Intent::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Messages
// =============================================================================

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

/// Per-session message identifier, assigned in increasing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of a chat transcript. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    /// Follow-up chips. Empty for user messages.
    pub suggestions: Vec<String>,
    /// Intent this assistant message answers. `None` for user messages and
    /// the welcome message.
    pub intent: Option<Intent>,
    /// User message that triggered this assistant reply.
    pub in_reply_to: Option<MessageId>,
}

impl ChatMessage {
    pub fn is_assistant(&self) -> bool {
        self.sender == Sender::Assistant
    }
}

/// Templated assistant reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedReply {
    pub body: String,
    pub suggestions: Vec<String>,
}

// =============================================================================
// Turn state
// =============================================================================

/// Turn-taking state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnState {
    /// No assistant reply outstanding.
    Idle,
    /// At least one user message is waiting for its reply.
    AwaitingAssistantReply,
}

impl fmt::Display for TurnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnState::Idle => write!(f, "Idle"),
            TurnState::AwaitingAssistantReply => write!(f, "AwaitingAssistantReply"),
        }
    }
}
