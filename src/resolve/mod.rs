//! Intent resolution against the cached entity catalog.
//!
//! Resolution is pure: it reads the current [`EntityCatalog`] snapshot and
//! never performs I/O, so the same catalog and intent always give the same
//! answer. When several entities qualify, the first one in catalog order is
//! chosen.

mod suggest;

use crate::catalog::EntityCatalog;
use crate::domain::{RawIntent, ResolutionFailure, ResolvedIntent};

pub use suggest::closest_match;

/// Jaro-Winkler similarity above which a near miss is offered as a suggestion
pub const DEFAULT_SUGGESTION_THRESHOLD: f64 = 0.85;

/// Resolves raw intents to concrete targets
#[derive(Debug, Clone)]
pub struct IntentResolver {
    suggestion_threshold: f64,
}

impl Default for IntentResolver {
    fn default() -> Self {
        Self {
            suggestion_threshold: DEFAULT_SUGGESTION_THRESHOLD,
        }
    }
}

impl IntentResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the near-miss threshold (values above 1.0 disable suggestions)
    pub fn with_suggestion_threshold(mut self, threshold: f64) -> Self {
        self.suggestion_threshold = threshold;
        self
    }

    pub fn resolve(&self, intent: &RawIntent, catalog: &EntityCatalog) -> ResolvedIntent {
        match intent {
            RawIntent::NavigateToLabel {
                label,
                room_name: Some(room_name),
            } => self.resolve_in_room(label, room_name, catalog),
            RawIntent::NavigateToLabel {
                label,
                room_name: None,
            } => self.resolve_anywhere(label, catalog),
            RawIntent::Advance => ResolvedIntent::Advance,
            RawIntent::TurnAround => ResolvedIntent::TurnAround,
            RawIntent::MoveBack => ResolvedIntent::MoveBack,
            RawIntent::PatrolStart => ResolvedIntent::PatrolStart,
            RawIntent::PatrolStop => ResolvedIntent::PatrolStop,
            RawIntent::Unrecognized { transcript } => {
                ResolvedIntent::ResolutionFailure(ResolutionFailure::no_match(transcript))
            }
        }
    }

    fn resolve_in_room(
        &self,
        label: &str,
        room_name: &str,
        catalog: &EntityCatalog,
    ) -> ResolvedIntent {
        let Some(room) = catalog.find_room(room_name) else {
            let names: Vec<String> = catalog.rooms().iter().map(|r| r.name.clone()).collect();
            let failure = ResolutionFailure::room_not_found(room_name)
                .with_suggestion(self.suggest(room_name, &names));
            return ResolvedIntent::ResolutionFailure(failure);
        };

        let entity = catalog
            .entities_labeled(label)
            .find(|e| e.room_id == Some(room.id));

        match entity {
            Some(entity) => ResolvedIntent::NavigateToEntity {
                entity_id: entity.id,
                target: format!("{} in {}", label, room_name),
            },
            None => {
                let labels: Vec<String> = catalog
                    .entities()
                    .iter()
                    .filter(|e| e.room_id == Some(room.id))
                    .map(|e| e.label.to_lowercase())
                    .collect();
                let failure = ResolutionFailure::entity_not_found_in_room(label, room_name)
                    .with_suggestion(self.suggest(label, &labels));
                ResolvedIntent::ResolutionFailure(failure)
            }
        }
    }

    fn resolve_anywhere(&self, label: &str, catalog: &EntityCatalog) -> ResolvedIntent {
        match catalog.entities_labeled(label).next() {
            Some(entity) => ResolvedIntent::NavigateToEntity {
                entity_id: entity.id,
                target: label.to_string(),
            },
            None => {
                let failure = ResolutionFailure::entity_not_found(label)
                    .with_suggestion(self.suggest(label, &catalog.labels()));
                ResolvedIntent::ResolutionFailure(failure)
            }
        }
    }

    fn suggest(&self, spoken: &str, candidates: &[String]) -> Option<String> {
        closest_match(spoken, candidates, self.suggestion_threshold)
    }
}

/// Resolve with the default resolver settings
pub fn resolve(intent: &RawIntent, catalog: &EntityCatalog) -> ResolvedIntent {
    IntentResolver::default().resolve(intent, catalog)
}

#[cfg(test)]
mod tests;
