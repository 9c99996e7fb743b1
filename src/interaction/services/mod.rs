//! Services that process inbound interactions.

mod deferred;
mod dispatcher;

pub use deferred::spawn_deferred;
pub use dispatcher::{
    DispatchError, InboundRequest, InteractionDispatcher, SIGNATURE_HEADER, TIMESTAMP_HEADER,
};
