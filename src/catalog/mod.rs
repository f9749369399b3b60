//! Entity catalog: the cached snapshot of known objects and rooms.
//!
//! The catalog is refreshed wholesale from a [`CatalogSource`]; individual
//! entries are never patched in place. Resolution only ever reads the
//! snapshot that is current when a transcript is processed.

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::domain::{Entity, Room};

/// Backend that can deliver a fresh catalog snapshot
pub trait CatalogSource: Send + Sync {
    /// Ordered list of detected objects
    fn fetch_entities(&self) -> Result<Vec<Entity>>;

    /// Ordered list of named rooms
    fn fetch_rooms(&self) -> Result<Vec<Room>>;

    /// Fetch both lists; fails if either request fails
    fn fetch_snapshot(&self) -> Result<CatalogSnapshot> {
        Ok(CatalogSnapshot {
            entities: self.fetch_entities()?,
            rooms: self.fetch_rooms()?,
        })
    }
}

/// One complete backend snapshot
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub entities: Vec<Entity>,
    pub rooms: Vec<Room>,
}

/// Current set of known entities and rooms
#[derive(Debug, Clone, Default)]
pub struct EntityCatalog {
    entities: Vec<Entity>,
    rooms: Vec<Room>,
    generation: u64,
    refreshed_at: Option<DateTime<Utc>>,
}

impl EntityCatalog {
    /// Create an empty catalog (generation 0, never refreshed)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding the given snapshot
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        let mut catalog = Self::new();
        catalog.replace(snapshot);
        catalog
    }

    /// Swap in a new snapshot, replacing both lists
    pub fn replace(&mut self, snapshot: CatalogSnapshot) {
        self.entities = snapshot.entities;
        self.rooms = snapshot.rooms;
        self.generation += 1;
        self.refreshed_at = Some(Utc::now());
        tracing::debug!(
            "Catalog refreshed (generation {}): {} entities, {} rooms",
            self.generation,
            self.entities.len(),
            self.rooms.len()
        );
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Number of snapshots applied so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.rooms.is_empty()
    }

    /// First room whose name equals `name`, ignoring case
    pub fn find_room(&self, name: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.has_name(name))
    }

    /// All entities with the given label, in catalog order
    pub fn entities_labeled<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.entities.iter().filter(move |e| e.has_label(label))
    }

    /// Distinct lower-cased labels, in first-seen order
    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        for entity in &self.entities {
            let label = entity.label.to_lowercase();
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Position;

    fn snapshot() -> CatalogSnapshot {
        CatalogSnapshot {
            entities: vec![
                Entity::new(1, "Chair", Position::default()).in_room(2),
                Entity::new(2, "lamp", Position::default()),
                Entity::new(3, "chair", Position::default()).in_room(3),
            ],
            rooms: vec![Room::new(2, "Kitchen"), Room::new(3, "living room")],
        }
    }

    #[test]
    fn test_replace_bumps_generation() {
        let mut catalog = EntityCatalog::new();
        assert_eq!(catalog.generation(), 0);
        assert!(catalog.refreshed_at().is_none());

        catalog.replace(snapshot());
        assert_eq!(catalog.generation(), 1);
        assert_eq!(catalog.entities().len(), 3);

        catalog.replace(CatalogSnapshot::default());
        assert_eq!(catalog.generation(), 2);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_lookup_ignores_case() {
        let catalog = EntityCatalog::from_snapshot(snapshot());
        assert_eq!(catalog.find_room("kitchen").map(|r| r.id), Some(2));
        assert!(catalog.find_room("garage").is_none());

        let ids: Vec<_> = catalog.entities_labeled("CHAIR").map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_labels_are_distinct() {
        let catalog = EntityCatalog::from_snapshot(snapshot());
        assert_eq!(catalog.labels(), vec!["chair".to_string(), "lamp".to_string()]);
    }
}
