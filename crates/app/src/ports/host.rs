//! Host ports: the identifier namespace and the entity registration contract.
//!
//! The host owns every object the compiled firmware will contain. The
//! pipeline claims identifiers from it and registers the device and its
//! entities with it; how the host records them is its own business.

use serde::Serialize;
use tion_domain::entity::EntityKind;
use tion_domain::error::ConfigError;
use tion_domain::id::{Id, IdDecl};
use tion_domain::time::TimePeriod;

/// Host-wide, append-only identifier namespace.
pub trait IdentifierRegistry {
    /// Whether `id` is already taken.
    fn contains(&self, id: &Id) -> bool;

    /// Record `id` as taken.
    fn insert(&mut self, id: Id);

    /// Claim an identifier chosen by the user.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateId`] when `id` is already taken.
    fn claim(&mut self, id: &Id) -> Result<(), ConfigError> {
        if self.contains(id) {
            return Err(ConfigError::DuplicateId(id.clone()));
        }
        self.insert(id.clone());
        Ok(())
    }

    /// Generate a fresh identifier from `base`, suffixing `_2`, `_3`, … until unique.
    fn generate(&mut self, base: &Id) -> Id {
        let mut candidate = base.clone();
        let mut n = 1;
        while self.contains(&candidate) {
            n += 1;
            candidate = base.with_suffix(n);
        }
        self.insert(candidate.clone());
        candidate
    }

    /// Turn a declaration into a concrete identifier.
    ///
    /// Manual identifiers must have been [`claim`](Self::claim)ed beforehand;
    /// auto identifiers are generated here.
    fn materialise(&mut self, decl: &IdDecl) -> Id {
        match decl {
            IdDecl::Manual(id) => id.clone(),
            IdDecl::Auto(base) => self.generate(base),
        }
    }
}

/// Slot the host assigned to a polled component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ComponentHandle(pub usize);

/// Registration receipt for an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityHandle {
    pub id: Id,
    pub kind: EntityKind,
    pub slot: usize,
}

/// Host registration contracts for the device and its entities.
pub trait EntityRegistry {
    /// Register a component under the periodic polling contract.
    fn register_component(&mut self, id: &Id, update_interval: TimePeriod) -> ComponentHandle;

    /// Register a device under the climate-entity contract.
    fn register_climate(&mut self, id: &Id) -> EntityHandle;

    /// Register an auxiliary entity of the given kind.
    fn register(&mut self, id: &Id, kind: EntityKind) -> EntityHandle;
}

/// Everything the pipeline needs from its host.
pub trait Host: IdentifierRegistry + EntityRegistry {}

impl<T: IdentifierRegistry + EntityRegistry> Host for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Default)]
    struct Names(HashSet<Id>);

    impl IdentifierRegistry for Names {
        fn contains(&self, id: &Id) -> bool {
            self.0.contains(id)
        }

        fn insert(&mut self, id: Id) {
            self.0.insert(id);
        }
    }

    fn id(value: &str) -> Id {
        Id::parse(value).unwrap()
    }

    #[test]
    fn should_claim_free_identifier() {
        let mut names = Names::default();
        assert!(names.claim(&id("dev1")).is_ok());
        assert!(names.contains(&id("dev1")));
    }

    #[test]
    fn should_reject_claim_of_taken_identifier() {
        let mut names = Names::default();
        names.claim(&id("dev1")).unwrap();
        assert_eq!(
            names.claim(&id("dev1")),
            Err(ConfigError::DuplicateId(id("dev1")))
        );
    }

    #[test]
    fn should_generate_base_then_suffixed_identifiers() {
        let mut names = Names::default();
        let base = id("tion_switch");
        assert_eq!(names.generate(&base).as_str(), "tion_switch");
        assert_eq!(names.generate(&base).as_str(), "tion_switch_2");
        assert_eq!(names.generate(&base).as_str(), "tion_switch_3");
    }

    #[test]
    fn should_skip_generated_name_taken_by_manual_claim() {
        let mut names = Names::default();
        names.claim(&id("sensor")).unwrap();
        assert_eq!(names.generate(&id("sensor")).as_str(), "sensor_2");
    }

    #[test]
    fn should_materialise_manual_identifier_verbatim() {
        let mut names = Names::default();
        let decl = IdDecl::Manual(id("bt1"));
        assert_eq!(names.materialise(&decl).as_str(), "bt1");
    }
}
