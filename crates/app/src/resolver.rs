//! Type parameter resolver: binds a protocol API to a transport's framing.
//!
//! The firmware class `tion::TionVPortApi<Frame, Api>` is generic over the
//! frame format its transport declares. The binding happens here, at Rust
//! compile time: [`resolve`] only accepts an API/transport pair for which
//! the API implements [`FrameCompatible`] for the transport's
//! [`VPort::Frame`]. There is no runtime check to fail.

use std::marker::PhantomData;

use tion_domain::id::Id;
use tion_domain::platform::StateType;

use crate::ports::{FrameCompatible, FrameSpec, VPort};

/// Firmware template wrapping an API base with a frame format.
pub const VPORT_API_TEMPLATE: &str = "tion::TionVPortApi";

/// A protocol API concretely parameterised with frame format `F`.
#[derive(Debug)]
pub struct TionVPortApi<F, A> {
    id: Id,
    vport: Id,
    _binding: PhantomData<fn() -> (F, A)>,
}

impl<F, A> TionVPortApi<F, A>
where
    F: FrameSpec,
    A: FrameCompatible<F>,
{
    #[must_use]
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Transport the API is bound to.
    #[must_use]
    pub fn vport(&self) -> &Id {
        &self.vport
    }

    /// Fully parameterised firmware class name.
    #[must_use]
    pub fn class_name() -> String {
        format!("{VPORT_API_TEMPLATE}<{}, {}>", F::TYPE_NAME, A::API_CLASS)
    }

    /// State representation declared by the API base.
    #[must_use]
    pub fn state_type(&self) -> StateType {
        A::STATE_TYPE
    }
}

/// The API type `A` resolved against transport `P`.
pub type ResolvedApi<P, A> = TionVPortApi<<P as VPort>::Frame, A>;

/// Bind API base `A` to the frame format of transport `port`.
#[must_use]
pub fn resolve<P, A>(id: Id, port: &P) -> ResolvedApi<P, A>
where
    P: VPort,
    A: FrameCompatible<P::Frame>,
{
    let frame = <P::Frame as FrameSpec>::TYPE_NAME;
    tracing::debug!(api = %id, frame, base = A::API_CLASS, "resolved protocol api");
    TionVPortApi {
        id,
        vport: port.id().clone(),
        _binding: PhantomData,
    }
}
