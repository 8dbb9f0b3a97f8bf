//! Agents and their per-tick movement protocol.

#[allow(clippy::module_inception)]
mod agent;
mod event;
mod status;

pub use agent::{Agent, PeerView, DEFAULT_STARVATION_THRESHOLD};
pub use event::{AbandonReason, AgentEvent, AgentTick, Notice};
pub use status::AgentStatus;
