//! Word lists the rule table is built from.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors building a rule table from a grammar
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("Grammar list `{0}` must contain at least one entry")]
    EmptyList(&'static str),

    #[error("Grammar list `{list}` contains a blank entry")]
    BlankEntry { list: &'static str },

    #[error("Room preposition `{0}` must be a single word")]
    MultiWordPreposition(String),

    #[error("Invalid command pattern for rule `{rule}`: {source}")]
    Pattern {
        rule: &'static str,
        #[source]
        source: regex::Error,
    },
}

/// Vocabulary used by the navigation rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grammar {
    /// Verbs that introduce a navigation command ("go to ...")
    #[serde(default = "default_navigate_verbs")]
    pub navigate_verbs: Vec<String>,

    /// Leading determiners stripped from labels and room names
    #[serde(default = "default_articles")]
    pub articles: Vec<String>,

    /// Words that separate an object from its room ("... in the kitchen")
    #[serde(default = "default_room_prepositions")]
    pub room_prepositions: Vec<String>,
}

fn default_navigate_verbs() -> Vec<String> {
    ["go", "navigate", "move", "head", "drive"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_articles() -> Vec<String> {
    ["the", "a", "an", "this", "that", "my", "our"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_room_prepositions() -> Vec<String> {
    ["in", "inside"].into_iter().map(String::from).collect()
}

impl Default for Grammar {
    fn default() -> Self {
        Self {
            navigate_verbs: default_navigate_verbs(),
            articles: default_articles(),
            room_prepositions: default_room_prepositions(),
        }
    }
}

impl Grammar {
    /// Check that every list is usable in a pattern
    pub fn validate(&self) -> Result<(), GrammarError> {
        for (name, list) in [
            ("navigate_verbs", &self.navigate_verbs),
            ("room_prepositions", &self.room_prepositions),
        ] {
            if list.is_empty() {
                return Err(GrammarError::EmptyList(name));
            }
        }
        for (name, list) in [
            ("navigate_verbs", &self.navigate_verbs),
            ("articles", &self.articles),
            ("room_prepositions", &self.room_prepositions),
        ] {
            if list.iter().any(|w| w.trim().is_empty()) {
                return Err(GrammarError::BlankEntry { list: name });
            }
        }
        if let Some(p) = self
            .room_prepositions
            .iter()
            .find(|p| p.trim().contains(char::is_whitespace))
        {
            return Err(GrammarError::MultiWordPreposition(p.clone()));
        }
        Ok(())
    }

    /// Regex alternation of the given words, longest first
    pub(super) fn alternation(words: &[String]) -> String {
        let mut words: Vec<String> = words.iter().map(|w| w.trim().to_lowercase()).collect();
        words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        words.dedup();
        words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Strip one leading article from a captured phrase
    pub fn strip_article(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if let Some((first, rest)) = trimmed.split_once(char::is_whitespace) {
            if self.articles.iter().any(|a| a.eq_ignore_ascii_case(first)) {
                return rest.trim().to_string();
            }
        }
        trimmed.to_string()
    }

    /// Whether any word of the phrase is a room preposition
    pub fn has_room_preposition(&self, phrase: &str) -> bool {
        phrase.split_whitespace().any(|word| {
            self.room_prepositions
                .iter()
                .any(|p| p.eq_ignore_ascii_case(word))
        })
    }
}
