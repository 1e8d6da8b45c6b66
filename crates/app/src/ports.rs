//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the compilation pipeline and its
//! collaborators: the transport (vport), the protocol API it carries, and
//! the host that owns identifiers and entity registration. They are defined
//! here (in `app`) so that both the pipeline and the adapters can depend on
//! them without creating circular dependencies.

pub mod api;
pub mod host;
pub mod vport;

pub use api::{FrameCompatible, ProtocolApi};
pub use host::{ComponentHandle, EntityHandle, EntityRegistry, Host, IdentifierRegistry};
pub use vport::{FrameSpec, VPort};
