//! Command matching - mapping spoken transcripts to raw intents
//!
//! A transcript is normalized (lower-cased, trimmed, trailing punctuation
//! dropped) and tried against an ordered rule table. The first rule whose
//! pattern matches *and* whose extractor accepts the captures wins.
//!
//! Rule priority:
//! 1. `go to the lamp in the kitchen` - object in room
//! 2. `go to the lamp` - bare object
//! 3. `advance`, `turn around`, `move back` - movement primitives
//! 4. `start patrol`
//! 5. `stop patrol` / `end patrol` / `finish patrol`
//!
//! Room-qualified navigation must come before bare navigation, otherwise the
//! room would be swallowed into the object label.

mod grammar;
mod matcher;
mod rule;

pub use grammar::{Grammar, GrammarError};
pub use matcher::{CommandMatch, CommandMatcher, normalize_transcript};
pub use rule::CommandRule;

#[cfg(test)]
mod tests;
