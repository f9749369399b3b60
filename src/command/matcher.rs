//! CommandMatcher - ordered evaluation of the rule table

use serde::Serialize;

use super::grammar::{Grammar, GrammarError};
use super::rule::{CommandRule, build_rules};
use crate::domain::RawIntent;

/// Result of a successful match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandMatch {
    /// Name of the rule that matched
    pub rule: &'static str,
    /// Intent extracted from the captures
    pub intent: RawIntent,
    /// Normalized transcript the rule was applied to
    pub transcript: String,
}

/// Lower-case, trim, collapse whitespace and drop trailing punctuation
pub fn normalize_transcript(text: &str) -> String {
    let lowered = text.to_lowercase();
    let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_end_matches(['.', '!', '?', ','])
        .trim()
        .to_string()
}

/// Ordered rule table; first accepting rule wins
#[derive(Debug, Clone)]
pub struct CommandMatcher {
    grammar: Grammar,
    rules: Vec<CommandRule>,
}

impl Default for CommandMatcher {
    fn default() -> Self {
        Self::with_grammar(Grammar::default()).expect("built-in grammar must compile")
    }
}

impl CommandMatcher {
    /// Create a matcher using the built-in vocabulary
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher from a custom vocabulary
    pub fn with_grammar(grammar: Grammar) -> Result<Self, GrammarError> {
        grammar.validate()?;
        let rules = build_rules(&grammar)?;
        Ok(Self { grammar, rules })
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[CommandRule] {
        &self.rules
    }

    /// Match a raw transcript against the rule table
    pub fn match_transcript(&self, transcript: &str) -> Option<CommandMatch> {
        let normalized = normalize_transcript(transcript);
        if normalized.is_empty() {
            return None;
        }

        for rule in &self.rules {
            if let Some(intent) = rule.apply(&normalized, &self.grammar) {
                tracing::debug!("Transcript {:?} matched rule {}", normalized, rule.name);
                return Some(CommandMatch {
                    rule: rule.name,
                    intent,
                    transcript: normalized,
                });
            }
        }

        tracing::debug!("Transcript {:?} matched no rule", normalized);
        None
    }

    /// Like `match_transcript`, but folds a miss into `RawIntent::Unrecognized`
    pub fn interpret(&self, transcript: &str) -> RawIntent {
        match self.match_transcript(transcript) {
            Some(m) => m.intent,
            None => RawIntent::Unrecognized {
                transcript: normalize_transcript(transcript),
            },
        }
    }
}
