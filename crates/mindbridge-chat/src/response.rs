//! Templated assistant replies.
//!
//! Each intent maps to one fixed body and a fixed list of follow-up
//! suggestions. No personalisation and no randomness: the same intent always
//! produces the same reply.

use crate::types::{ComposedReply, Intent};

// =============================================================================
// Templates
// =============================================================================

const WELCOME_BODY: &str = "Hi! I'm your virtual mental health support assistant. \
I'm here to help you find the right resources and support. How can I assist you today?";

const WELCOME_SUGGESTIONS: &[&str] = &[
    "I need immediate crisis support",
    "Find counseling services near me",
    "Looking for support groups",
    "Mental health resources for newcomers",
];

const CRISIS_BODY: &str = "I understand you need immediate help. Here are crisis resources available 24/7:

**Newcomer Women's Crisis Center**
Phone: 416-555-0123 (24/7)
Address: 245 Main St, Toronto
Languages: English, Somali, Arabic, French

**Crisis Text Line**: Text HOME to 741741

If you're in immediate danger, please call 911. Would you like me to help you find other support services?";

const CRISIS_SUGGESTIONS: &[&str] = &[
    "Find nearby counseling",
    "Support groups",
    "How to prepare for counseling",
];

const COUNSELING_BODY: &str = "I can help you find counseling services. Here are some options:

**Multicultural Family Counseling**
Phone: 416-555-0789
Address: 789 Queen St E, Toronto
Hours: Mon-Sat 9 AM-6 PM
Cost: Sliding scale fees
Languages: English, Arabic, French, Spanish

**What to expect:**
- Individual or family sessions
- Culturally sensitive care
- Flexible payment options

Would you like help preparing for your first appointment?";

const COUNSELING_SUGGESTIONS: &[&str] = &[
    "Book an appointment",
    "What to expect in counseling",
    "Support groups",
];

const SUPPORT_GROUP_BODY: &str = "Support groups can be really helpful! Here's what's available:

**Somali Women's Mental Health Circle**
Phone: 416-555-0456
Address: 156 Dundas St W, Toronto
Hours: Mon-Fri 6-9 PM
Cost: Free
Languages: Somali, English
Childcare available

**Benefits of group support:**
- Share experiences with others
- Learn coping strategies
- Build community connections
- Cultural understanding

Groups typically meet weekly. Would you like help joining?";

const SUPPORT_GROUP_SUGGESTIONS: &[&str] = &[
    "How to join a group",
    "Individual counseling",
    "Peer support",
];

const NEWCOMER_BODY: &str = "Welcome! There are specialized services for newcomers:

**New Canadians Peer Support**
Phone: 416-555-0321
Address: 321 College St, Toronto
Hours: Daily 2-8 PM
Cost: Free
Languages: Multiple languages
Walk-in center with resource navigation

**Services include:**
- Peer mentorship
- Settlement support
- Mental health resources
- Community connections

What specific support are you looking for?";

const NEWCOMER_SUGGESTIONS: &[&str] = &["Crisis support", "Counseling services", "Support groups"];

const COST_BODY: &str = "Many mental health services are available at low or no cost:

**Free services:**
- Crisis support (24/7)
- Support groups
- Peer support programs
- Walk-in centers

**Sliding scale:**
- Individual counseling
- Family therapy
- Specialized programs

**Insurance:**
- Many services covered by OHIP
- Extended health benefits may apply

Don't let cost prevent you from getting help. What type of support interests you?";

const COST_SUGGESTIONS: &[&str] = &["Find free counseling", "Crisis support", "Support groups"];

const FALLBACK_BODY: &str = "I understand you're looking for support. I can help you find:

**Crisis Support** - Immediate 24/7 help
**Counseling** - Individual and family therapy
**Support Groups** - Connect with others
**Peer Support** - Community connections

All services are available in multiple languages including Somali, Arabic, and French. What would be most helpful for you right now?";

const FALLBACK_SUGGESTIONS: &[&str] = &[
    "Crisis support",
    "Find counseling",
    "Support groups",
    "Peer support",
];

// =============================================================================
// ResponseComposer
// =============================================================================

/// Maps intents to their reply templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseComposer;

impl ResponseComposer {
    pub fn new() -> Self {
        Self
    }

    /// Reply for `intent`. Total over [`Intent`].
    pub fn compose(&self, intent: Intent) -> ComposedReply {
        let (body, suggestions) = match intent {
            Intent::Crisis => (CRISIS_BODY, CRISIS_SUGGESTIONS),
            Intent::Counseling => (COUNSELING_BODY, COUNSELING_SUGGESTIONS),
            Intent::SupportGroup => (SUPPORT_GROUP_BODY, SUPPORT_GROUP_SUGGESTIONS),
            Intent::NewcomerOnboarding => (NEWCOMER_BODY, NEWCOMER_SUGGESTIONS),
            Intent::Cost => (COST_BODY, COST_SUGGESTIONS),
            Intent::Fallback => (FALLBACK_BODY, FALLBACK_SUGGESTIONS),
        };
        reply(body, suggestions)
    }

    /// Greeting that opens every session.
    pub fn welcome(&self) -> ComposedReply {
        reply(WELCOME_BODY, WELCOME_SUGGESTIONS)
    }
}

fn reply(body: &str, suggestions: &[&str]) -> ComposedReply {
    ComposedReply {
        body: body.to_string(),
        suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
    }
}

// =============================================================================
// Tests
// =============================================================================
