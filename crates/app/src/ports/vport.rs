//! Transport port: the pluggable channel a breezer exchanges frames over.

use tion_domain::config::VPortConfig;
use tion_domain::error::ConfigError;
use tion_domain::id::Id;
use tion_domain::platform::VPortKind;

/// Compile-time description of a transport's wire framing.
pub trait FrameSpec {
    /// Firmware type the protocol API is parameterised with.
    const TYPE_NAME: &'static str;
}

/// A declared transport the device binds to.
///
/// Implementations live in adapter crates (e.g. `adapter_vport`). The
/// builder obtains a handle with [`bind`](Self::bind) and then reads the
/// associated declarations:
///
/// - [`Frame`](Self::Frame) parameterises the protocol API,
/// - [`KIND`](Self::KIND) is handed to the device during binding.
pub trait VPort: Sized {
    /// Framing of the bytes this transport carries.
    type Frame: FrameSpec;

    /// Transport kind tag.
    const KIND: VPortKind;

    /// Obtain a handle on a declared vport.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::VPortKindMismatch`] when the declaration is of
    /// another kind than this transport.
    fn bind(config: &VPortConfig) -> Result<Self, ConfigError>;

    /// Identifier of the vport object.
    fn id(&self) -> &Id;
}
