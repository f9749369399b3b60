//! CommandRule - one entry of the ordered rule table

use regex::{Captures, Regex};

use super::grammar::{Grammar, GrammarError};
use crate::domain::RawIntent;

/// Turns the captures of a matched pattern into an intent.
///
/// Returning `None` rejects the match and lets evaluation fall through to
/// the next rule.
pub type Extractor = fn(&Captures<'_>, &Grammar) -> Option<RawIntent>;

/// A pattern with ordered capture groups plus its extractor
#[derive(Debug, Clone)]
pub struct CommandRule {
    /// Stable rule name, used in logs and dry-run output
    pub name: &'static str,
    /// Example utterance shown in help output
    pub example: &'static str,
    pattern: Regex,
    extract: Extractor,
}

impl CommandRule {
    pub fn new(
        name: &'static str,
        example: &'static str,
        pattern: &str,
        extract: Extractor,
    ) -> Result<Self, GrammarError> {
        let pattern = Regex::new(pattern).map_err(|source| GrammarError::Pattern {
            rule: name,
            source,
        })?;
        Ok(Self {
            name,
            example,
            pattern,
            extract,
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Try the rule against a normalized transcript
    pub fn apply(&self, normalized: &str, grammar: &Grammar) -> Option<RawIntent> {
        let captures = self.pattern.captures(normalized)?;
        (self.extract)(&captures, grammar)
    }
}

/// Build the rule table in priority order
pub(super) fn build_rules(grammar: &Grammar) -> Result<Vec<CommandRule>, GrammarError> {
    let verbs = Grammar::alternation(&grammar.navigate_verbs);
    let preps = Grammar::alternation(&grammar.room_prepositions);

    Ok(vec![
        CommandRule::new(
            "navigate_in_room",
            "go to the chair in the kitchen",
            &format!(r"^(?:{verbs}) (?:to|towards) (.+?) (?:{preps}) (.+)$"),
            extract_label_in_room,
        )?,
        CommandRule::new(
            "navigate",
            "navigate to the chair",
            &format!(r"^(?:{verbs}) (?:to|towards) (.+)$"),
            extract_label,
        )?,
        CommandRule::new(
            "advance",
            "advance",
            r"\b(?:advance|(?:move|go|drive) forward)\b",
            |_, _| Some(RawIntent::Advance),
        )?,
        CommandRule::new(
            "turn_around",
            "turn around",
            r"\b(?:turn|spin) (?:around|360)\b",
            |_, _| Some(RawIntent::TurnAround),
        )?,
        CommandRule::new(
            "move_back",
            "move back",
            r"\b(?:(?:move|go|drive) back(?:wards)?|back up|reverse)\b",
            |_, _| Some(RawIntent::MoveBack),
        )?,
        CommandRule::new(
            "patrol_start",
            "start patrol",
            r"\b(?:start|begin|initiate) (?:the |a )?patrol(?:ling)?\b",
            |_, _| Some(RawIntent::PatrolStart),
        )?,
        CommandRule::new(
            "patrol_stop",
            "finish patrol",
            r"\b(?:end|finish|stop|terminate) (?:the )?patrol(?:ling)?\b",
            |_, _| Some(RawIntent::PatrolStop),
        )?,
    ])
}

fn extract_label_in_room(captures: &Captures<'_>, grammar: &Grammar) -> Option<RawIntent> {
    let label = grammar.strip_article(captures.get(1)?.as_str());
    let room = grammar.strip_article(captures.get(2)?.as_str());

    // "the lamp in the box in the kitchen" is ambiguous; refuse to guess
    if label.is_empty() || room.is_empty() || grammar.has_room_preposition(&room) {
        return None;
    }

    Some(RawIntent::NavigateToLabel {
        label,
        room_name: Some(room),
    })
}

fn extract_label(captures: &Captures<'_>, grammar: &Grammar) -> Option<RawIntent> {
    let label = grammar.strip_article(captures.get(1)?.as_str());
    if label.is_empty() || grammar.has_room_preposition(&label) {
        return None;
    }

    Some(RawIntent::NavigateToLabel {
        label,
        room_name: None,
    })
}
