//! Protocol API port: the device-family specific command/state layer.

use tion_domain::platform::{Platform, StateType};

use super::vport::FrameSpec;

/// Protocol API base of one breezer family.
///
/// Implementations live in adapter crates (e.g. `adapter_protocol`). An API
/// base does not know the transport it runs over; the resolver pairs it
/// with a transport's [`FrameSpec`].
pub trait ProtocolApi {
    /// Platform this API drives.
    const PLATFORM: Platform;

    /// Firmware class of the API base.
    const API_CLASS: &'static str;

    /// Firmware class of the climate device bound to this API.
    const DEVICE_CLASS: &'static str;

    /// State structure exchanged with the transport.
    const STATE_TYPE: StateType;
}

/// Marks an API that understands frames shaped by `F`.
///
/// Pairs without an implementation cannot be resolved and therefore cannot
/// be compiled.
pub trait FrameCompatible<F: FrameSpec>: ProtocolApi {}
