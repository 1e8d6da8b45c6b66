//! # tion-app
//!
//! Application layer: the compilation pipeline and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `VPort` / `FrameSpec`: a transport and the frame format it carries
//!   - `ProtocolApi` / `FrameCompatible`: a protocol API base and the frames it understands
//!   - `IdentifierRegistry` / `EntityRegistry`: the host namespace and registration contracts
//! - Run the pipeline, in order:
//!   - `schema`: validate the raw configuration tree into a `TionConfig`
//!   - `resolver`: bind the protocol API to the transport's frame format
//!   - `builder`: instantiate transport, API and device, wire their metadata
//!   - `composer`: build the optional entities and hand them to the device
//!   - `presets`: compile the preset table
//!   - `flags`: derive the feature flags
//! - Produce an `ObjectGraph` per device block
//!
//! ## Dependency rule
//! Depends on `tion-domain` only (plus `serde_yaml` for the raw tree).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod builder;
pub mod compiler;
pub mod composer;
pub mod error;
pub mod flags;
pub mod graph;
pub mod ports;
pub mod presets;
pub mod resolver;
pub mod schema;

#[cfg(test)]
mod testing;
