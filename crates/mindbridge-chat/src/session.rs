//! Conversation session: one chat widget's transcript and turn-taking.
//!
//! Turn lifecycle:
//! - Idle -> AwaitingAssistantReply (user message appended, reply scheduled)
//! - AwaitingAssistantReply -> Idle (last outstanding reply appended)
//!
//! User messages sent while a reply is outstanding queue up in order. Only the
//! oldest outstanding turn has a timer; when its reply lands the next one is
//! scheduled. Each reply is classified from its own triggering message.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use chrono::Utc;
use mindbridge_core::config::ChatConfig;
use tracing::{debug, info};
use uuid::Uuid;

use crate::classifier::IntentClassifier;
use crate::error::ChatError;
use crate::response::ResponseComposer;
use crate::scheduler::ReplyScheduler;
use crate::types::{ChatMessage, ComposedReply, Intent, MessageId, Sender, TurnState};

/// A user message still waiting for its assistant reply.
#[derive(Debug, Clone)]
struct PendingTurn {
    trigger: MessageId,
    text: String,
}

#[derive(Debug)]
struct SessionState {
    id: Uuid,
    transcript: Vec<ChatMessage>,
    next_message_id: u64,
    pending: VecDeque<PendingTurn>,
    draft: String,
    closed: bool,
}

impl SessionState {
    fn append(
        &mut self,
        text: String,
        sender: Sender,
        suggestions: Vec<String>,
        intent: Option<Intent>,
        in_reply_to: Option<MessageId>,
    ) -> MessageId {
        self.next_message_id += 1;
        let id = MessageId(self.next_message_id);
        self.transcript.push(ChatMessage {
            id,
            text,
            sender,
            timestamp: Utc::now(),
            suggestions,
            intent,
            in_reply_to,
        });
        id
    }

    fn append_reply(&mut self, reply: ComposedReply, intent: Option<Intent>, trigger: Option<MessageId>) {
        self.append(reply.body, Sender::Assistant, reply.suggestions, intent, trigger);
    }
}

/// Chat transcript plus turn-taking for one widget instance.
///
/// Not shared between widgets. Dropping (or [`close`](Self::close)-ing) the
/// session turns any reply still scheduled against it into a no-op.
pub struct ConversationSession {
    shared: Arc<Mutex<SessionState>>,
    scheduler: Arc<dyn ReplyScheduler>,
    reply_delay: Duration,
}

impl ConversationSession {
    /// Create a session using the configured reply delay.
    pub fn new(scheduler: Arc<dyn ReplyScheduler>, config: &ChatConfig) -> Self {
        Self::with_reply_delay(scheduler, config.reply_delay())
    }

    pub fn with_reply_delay(scheduler: Arc<dyn ReplyScheduler>, reply_delay: Duration) -> Self {
        let state = SessionState {
            id: Uuid::new_v4(),
            transcript: Vec::new(),
            next_message_id: 0,
            pending: VecDeque::new(),
            draft: String::new(),
            closed: false,
        };
        Self {
            shared: Arc::new(Mutex::new(state)),
            scheduler,
            reply_delay,
        }
    }

    pub fn id(&self) -> Uuid {
        self.lock().id
    }

    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }

    /// Seed an empty transcript with the welcome message.
    ///
    /// Returns `false` and does nothing if the transcript already has messages.
    pub fn start(&self) -> bool {
        let mut state = self.lock();
        if !state.transcript.is_empty() {
            return false;
        }
        state.append_reply(ResponseComposer.welcome(), None, None);
        info!(session_id = %state.id, "Chat session started");
        true
    }

    /// Send a user message.
    ///
    /// Blank input is ignored and returns `None`. Otherwise the message is
    /// appended, the draft is cleared and an assistant turn is queued.
    pub fn send(&self, text: &str) -> Option<MessageId> {
        if text.trim().is_empty() {
            debug!("Ignoring blank chat message");
            return None;
        }

        let (id, first_pending) = {
            let mut state = self.lock();
            let id = state.append(text.to_string(), Sender::User, Vec::new(), None, None);
            state.pending.push_back(PendingTurn {
                trigger: id,
                text: text.to_string(),
            });
            state.draft.clear();
            debug!(
                session_id = %state.id,
                message_id = %id,
                pending = state.pending.len(),
                "User message queued"
            );
            (id, state.pending.len() == 1)
        };

        if first_pending {
            schedule_reply(&self.shared, &self.scheduler, self.reply_delay);
        }
        Some(id)
    }

    /// Pre-fill the input with a suggestion chip. Appends nothing.
    pub fn select_suggestion(&self, suggestion: &str) {
        self.lock().draft = suggestion.to_string();
    }

    /// Replace the current input text.
    pub fn set_draft(&self, text: &str) {
        self.lock().draft = text.to_string();
    }

    pub fn draft(&self) -> String {
        self.lock().draft.clone()
    }

    /// Send whatever is in the input. Blank drafts are ignored.
    pub fn send_draft(&self) -> Option<MessageId> {
        let draft = self.draft();
        self.send(&draft)
    }

    /// Snapshot of the transcript, oldest first.
    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.lock().transcript.clone()
    }

    pub fn message_count(&self) -> usize {
        self.lock().transcript.len()
    }

    /// Most recent assistant message, if any.
    pub fn last_assistant_message(&self) -> Option<ChatMessage> {
        self.lock()
            .transcript
            .iter()
            .rev()
            .find(|m| m.is_assistant())
            .cloned()
    }

    pub fn state(&self) -> TurnState {
        if self.lock().pending.is_empty() {
            TurnState::Idle
        } else {
            TurnState::AwaitingAssistantReply
        }
    }

    /// Whether the "assistant is typing" indicator should show.
    pub fn is_composing(&self) -> bool {
        self.state() == TurnState::AwaitingAssistantReply
    }

    /// Number of user messages still waiting for a reply.
    pub fn pending_replies(&self) -> usize {
        self.lock().pending.len()
    }

    /// Discard the session. Scheduled replies will find it closed.
    pub fn close(self) {
        drop(self);
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        lock_state(&self.shared)
    }
}

impl Drop for ConversationSession {
    fn drop(&mut self) {
        let mut state = self.lock();
        if !state.closed {
            state.closed = true;
            let dropped = state.pending.len();
            state.pending.clear();
            info!(session_id = %state.id, dropped_replies = dropped, "Chat session closed");
        }
    }
}

impl std::fmt::Debug for ConversationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("ConversationSession")
            .field("id", &state.id)
            .field("messages", &state.transcript.len())
            .field("pending", &state.pending.len())
            .field("reply_delay", &self.reply_delay)
            .finish()
    }
}

// =============================================================================
// Assistant turn
// =============================================================================

fn lock_state(shared: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Schedule delivery of the oldest pending turn. The task holds only a weak
/// reference, so it cannot keep a discarded session alive.
fn schedule_reply(
    shared: &Arc<Mutex<SessionState>>,
    scheduler: &Arc<dyn ReplyScheduler>,
    delay: Duration,
) {
    let weak = Arc::downgrade(shared);
    let next_scheduler = Arc::clone(scheduler);
    scheduler.schedule(
        delay,
        Box::new(move || {
            if let Err(e) = deliver_reply(&weak, &next_scheduler, delay) {
                debug!(error = %e, "Assistant reply dropped");
            }
        }),
    );
}

fn deliver_reply(
    weak: &Weak<Mutex<SessionState>>,
    scheduler: &Arc<dyn ReplyScheduler>,
    delay: Duration,
) -> Result<(), ChatError> {
    let shared = weak.upgrade().ok_or(ChatError::SessionClosed(Uuid::nil()))?;

    let more_pending = {
        let mut state = lock_state(&shared);
        if state.closed {
            return Err(ChatError::SessionClosed(state.id));
        }
        let turn = state
            .pending
            .pop_front()
            .ok_or(ChatError::NoPendingTurn(state.id))?;

        let classification = IntentClassifier.classify_detailed(&turn.text);
        let reply = ResponseComposer.compose(classification.intent);
        state.append_reply(reply, Some(classification.intent), Some(turn.trigger));
        debug!(
            session_id = %state.id,
            trigger = %turn.trigger,
            intent = %classification.intent,
            keyword = classification.matched_keyword.unwrap_or("-"),
            "Assistant reply appended"
        );
        !state.pending.is_empty()
    };

    if more_pending {
        schedule_reply(&shared, scheduler, delay);
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
