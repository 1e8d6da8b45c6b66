//! # tion-adapter-host-memory
//!
//! In-memory host for one compilation run.
//!
//! [`MemoryHost`] keeps the identifier namespace (append-only, in claim
//! order) and records every component and entity registration it is
//! handed. It is created fresh per run; two runs over the same document
//! therefore produce the same identifiers.
//!
//! ## Dependency rule
//!
//! Depends on `tion-app` (port traits) and `tion-domain` only.

use std::collections::HashSet;

use serde::Serialize;
use tion_app::ports::{ComponentHandle, EntityHandle, EntityRegistry, IdentifierRegistry};
use tion_domain::entity::EntityKind;
use tion_domain::id::Id;
use tion_domain::time::TimePeriod;

/// A component registered under the polling contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentRecord {
    pub id: Id,
    pub update_interval: TimePeriod,
}

/// An entity registered under its kind's contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRecord {
    pub id: Id,
    pub kind: EntityKind,
}

/// Host state accumulated during a run.
#[derive(Debug, Default, Serialize)]
pub struct MemoryHost {
    ids: Vec<Id>,
    #[serde(skip)]
    taken: HashSet<Id>,
    components: Vec<ComponentRecord>,
    entities: Vec<EntityRecord>,
}

impl MemoryHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifiers in the order they were taken.
    #[must_use]
    pub fn ids(&self) -> &[Id] {
        &self.ids
    }

    #[must_use]
    pub fn components(&self) -> &[ComponentRecord] {
        &self.components
    }

    #[must_use]
    pub fn entities(&self) -> &[EntityRecord] {
        &self.entities
    }
}

impl IdentifierRegistry for MemoryHost {
    fn contains(&self, id: &Id) -> bool {
        self.taken.contains(id)
    }

    fn insert(&mut self, id: Id) {
        if self.taken.insert(id.clone()) {
            tracing::trace!(%id, "identifier taken");
            self.ids.push(id);
        }
    }
}

impl EntityRegistry for MemoryHost {
    fn register_component(&mut self, id: &Id, update_interval: TimePeriod) -> ComponentHandle {
        self.components.push(ComponentRecord {
            id: id.clone(),
            update_interval,
        });
        ComponentHandle(self.components.len() - 1)
    }

    fn register_climate(&mut self, id: &Id) -> EntityHandle {
        self.register(id, EntityKind::Climate)
    }

    fn register(&mut self, id: &Id, kind: EntityKind) -> EntityHandle {
        tracing::trace!(%id, %kind, "entity registered");
        self.entities.push(EntityRecord {
            id: id.clone(),
            kind,
        });
        EntityHandle {
            id: id.clone(),
            kind,
            slot: self.entities.len() - 1,
        }
    }
}
