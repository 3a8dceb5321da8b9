//! Data models for the escrow bot
//!
//! Deals and their lifecycle, the per-user capture state, and the
//! transport-neutral events exchanged with the chat layer.

pub mod capture;
pub mod deal;
pub mod event;

pub use capture::{CaptureState, CaptureStep, Transition};
pub use deal::{ApprovalOutcome, Deal, DealId, DealStatus, NewDeal};
pub use event::{DealAction, Inbound, Outbound, Reply};
