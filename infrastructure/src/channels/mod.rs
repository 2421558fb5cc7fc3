//! Channel adapter glue.
//!
//! The per-channel UI/automation mechanics are external; this module holds
//! the fixed contract they plug into: a minimal [`ChannelTransport`] trait,
//! the [`BoundedWaitAdapter`] that turns any transport into a
//! [`ChannelAdapter`](chatcheck_application::ChannelAdapter) with a single
//! explicit bounded-retry policy, and the tagged-dispatch gateway chosen
//! once at run start.

mod adapter;
mod gateway;
mod retry;
mod transport;

pub use adapter::BoundedWaitAdapter;
pub use gateway::{gateway_for, TransportGateway};
pub use retry::RetryPolicy;
pub use transport::{ChannelTransport, HttpRelayTransport, TransportConnector, TransportError};
