//! Rule-based support assistant for MindBridge.
//!
//! Classifies free-text messages into support intents, composes templated
//! replies, and runs the chat session with its delayed assistant turn.

pub mod classifier;
pub mod error;
pub mod response;
pub mod scheduler;
pub mod session;
pub mod types;

pub use classifier::{classify, Classification, IntentClassifier, IntentRule, INTENT_RULES};
pub use error::ChatError;
pub use response::ResponseComposer;
pub use scheduler::{ManualScheduler, ReplyScheduler, ReplyTask, TokioScheduler};
pub use session::ConversationSession;
pub use types::{ChatMessage, ComposedReply, Intent, MessageId, Sender, TurnState};
