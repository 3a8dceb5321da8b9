use thiserror::Error;

use crate::models::{DealId, DealStatus};

/// Rejected input during the guided deal creation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid User ID `{0}`. Please enter a valid number or mention.")]
    InvalidSellerId(String),
    #[error("You cannot open a deal with yourself. Enter the seller's User ID.")]
    SelfDeal,
    #[error("Invalid amount `{0}`. Please enter a positive number.")]
    InvalidAmount(String),
    #[error("Invalid currency. Keep it short (1-{max_len} characters, e.g. USD).")]
    InvalidCurrency { max_len: usize },
    #[error("No deal creation in progress")]
    NotCapturing,
}

/// Errors surfaced to users by deal commands
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EscrowError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("Deal #{0} not found.")]
    NotFound(DealId),
    #[error("You are not involved in deal #{deal_id}.")]
    Unauthorized { deal_id: DealId },
    #[error("Deal #{deal_id} is already {status}.")]
    InvalidState { deal_id: DealId, status: DealStatus },
    #[error("{0}")]
    Usage(String),
}

impl EscrowError {
    /// Short label used as the title of error replies
    pub fn title(&self) -> &'static str {
        match self {
            EscrowError::Validation(_) => "Invalid Input",
            EscrowError::NotFound(_) => "Deal Not Found",
            EscrowError::Unauthorized { .. } => "Not Allowed",
            EscrowError::InvalidState { .. } => "Deal Closed",
            EscrowError::Usage(_) => "Usage",
        }
    }
}

/// Errors raised while loading configuration at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}
