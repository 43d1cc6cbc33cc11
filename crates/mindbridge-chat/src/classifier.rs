//! Keyword intent classifier.
//!
//! Rules are evaluated in table order against the lower-cased message and the
//! first rule with a matching keyword wins. Table order is the precedence:
//! a message mentioning both a crisis and counselling is a crisis.

use crate::types::Intent;

/// One row of the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentRule {
    pub intent: Intent,
    /// Lower-case substrings, any of which selects `intent`.
    pub keywords: &'static [&'static str],
}

/// Ordered rule table. [`Intent::Fallback`] has no row; it is what remains.
pub const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::Crisis,
        keywords: &["crisis", "emergency", "immediate"],
    },
    IntentRule {
        intent: Intent::Counseling,
        keywords: &["counseling", "therapy", "therapist"],
    },
    IntentRule {
        intent: Intent::SupportGroup,
        keywords: &["group", "support group"],
    },
    IntentRule {
        intent: Intent::NewcomerOnboarding,
        keywords: &["newcomer", "immigrant", "refugee"],
    },
    IntentRule {
        intent: Intent::Cost,
        keywords: &["cost", "free", "payment"],
    },
];

/// Outcome of classification, with the keyword that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub intent: Intent,
    pub matched_keyword: Option<&'static str>,
}

/// Stateless classifier over [`INTENT_RULES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn rules(&self) -> &'static [IntentRule] {
        INTENT_RULES
    }

    /// Classify a message. Total: empty or unrecognised input is `Fallback`.
    pub fn classify(&self, message: &str) -> Intent {
        self.classify_detailed(message).intent
    }

    pub fn classify_detailed(&self, message: &str) -> Classification {
        let lower = message.to_lowercase();

        for rule in self.rules() {
            if let Some(keyword) = rule.keywords.iter().copied().find(|k| lower.contains(k)) {
                return Classification {
                    intent: rule.intent,
                    matched_keyword: Some(keyword),
                };
            }
        }

        Classification {
            intent: Intent::Fallback,
            matched_keyword: None,
        }
    }
}

/// Classify with the default rule table.
pub fn classify(message: &str) -> Intent {
    IntentClassifier.classify(message)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Rule table ----

    #[test]
    fn test_rule_table_order() {
        let order: Vec<Intent> = INTENT_RULES.iter().map(|r| r.intent).collect();
        assert_eq!(
            order,
            vec![
                Intent::Crisis,
                Intent::Counseling,
                Intent::SupportGroup,
                Intent::NewcomerOnboarding,
                Intent::Cost,
            ]
        );
    }

    #[test]
    fn test_rule_keywords_are_lower_case() {
        for rule in INTENT_RULES {
            assert!(!rule.keywords.is_empty());
            for k in rule.keywords {
                assert_eq!(*k, k.to_lowercase());
            }
        }
    }

    #[test]
    fn test_every_keyword_selects_its_rule() {
        for rule in INTENT_RULES {
            for k in rule.keywords {
                let c = IntentClassifier.classify_detailed(k);
                assert_eq!(c.intent, rule.intent, "keyword {k}");
            }
        }
    }

    // ---- Single intents ----

    #[test]
    fn test_crisis() {
        assert_eq!(classify("I need immediate crisis support"), Intent::Crisis);
        assert_eq!(classify("This is an EMERGENCY"), Intent::Crisis);
    }

    #[test]
    fn test_counseling() {
        assert_eq!(classify("Find counseling services near me"), Intent::Counseling);
        assert_eq!(classify("I want to talk to a therapist"), Intent::Counseling);
        assert_eq!(classify("Is family therapy available?"), Intent::Counseling);
    }

    #[test]
    fn test_support_group() {
        assert_eq!(classify("Looking for support groups"), Intent::SupportGroup);
        assert_eq!(classify("any GROUP sessions?"), Intent::SupportGroup);
    }

    #[test]
    fn test_newcomer() {
        assert_eq!(classify("Mental health resources for newcomers"), Intent::NewcomerOnboarding);
        assert_eq!(classify("I am a refugee"), Intent::NewcomerOnboarding);
        assert_eq!(classify("help for an immigrant family"), Intent::NewcomerOnboarding);
    }

    #[test]
    fn test_cost() {
        assert_eq!(classify("How much does it cost?"), Intent::Cost);
        assert_eq!(classify("payment options"), Intent::Cost);
    }

    #[test]
    fn test_fallback() {
        assert_eq!(classify(""), Intent::Fallback);
        assert_eq!(classify("   "), Intent::Fallback);
        assert_eq!(classify("hello there"), Intent::Fallback);
        assert_eq!(classify("I feel anxious"), Intent::Fallback);
    }

    // ---- Precedence ----

    #[test]
    fn test_crisis_beats_counseling() {
        assert_eq!(classify("crisis counseling please"), Intent::Crisis);
        assert_eq!(classify("counseling after a crisis"), Intent::Crisis);
    }

    #[test]
    fn test_counseling_beats_group() {
        assert_eq!(classify("group therapy"), Intent::Counseling);
    }

    #[test]
    fn test_group_beats_newcomer_and_cost() {
        assert_eq!(classify("free newcomer group"), Intent::SupportGroup);
    }

    #[test]
    fn test_newcomer_beats_cost() {
        assert_eq!(classify("free help for refugees"), Intent::NewcomerOnboarding);
    }

    // ---- Substring semantics ----

    #[test]
    fn test_substring_matching_inside_words() {
        // Plain substring checks: "free" inside "freedom", "group" inside "groupie".
        assert_eq!(classify("freedom"), Intent::Cost);
        assert_eq!(classify("groupie"), Intent::SupportGroup);
        // "immediately" contains "immediate".
        assert_eq!(classify("call me immediately"), Intent::Crisis);
    }

    #[test]
    fn test_unicode_input_does_not_panic() {
        assert_eq!(classify("مرحبا، أحتاج مساعدة"), Intent::Fallback);
        assert_eq!(classify("CRISIS 🚨"), Intent::Crisis);
    }

    #[test]
    fn test_detailed_reports_keyword() {
        let c = IntentClassifier::new().classify_detailed("Any free therapy?");
        assert_eq!(c.intent, Intent::Counseling);
        assert_eq!(c.matched_keyword, Some("therapy"));

        let c = IntentClassifier::new().classify_detailed("hi");
        assert_eq!(c.matched_keyword, None);
    }
}
