//! Deal model and its lifecycle transitions

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::EscrowError;

pub type DealId = i64;

/// Status of a deal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStatus {
    PendingPayment,
    /// Declared for payment confirmation; nothing transitions here yet
    InProgress,
    Completed,
    /// Declared for dispute handling; nothing transitions here yet
    Disputed,
    Rejected,
}

impl DealStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingPayment => "pending_payment",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Disputed => "disputed",
            Self::Rejected => "rejected",
        }
    }

    /// No further transitions are allowed out of a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }
}

impl fmt::Display for DealStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role a participant holds in a deal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Buyer,
    Seller,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Buyer => f.write_str("Buyer"),
            Role::Seller => f.write_str("Seller"),
        }
    }
}

/// What an approval led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalOutcome {
    /// Caller's approval is recorded, the other party has not approved yet
    Waiting,
    /// Both parties approved and the deal is completed
    Completed,
}

/// Terms captured from the buyer, ready to be committed to the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewDeal {
    pub buyer_id: i64,
    pub seller_id: i64,
    pub amount: f64,
    pub currency: String,
    pub description: String,
}

/// One escrow agreement between a buyer and a seller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: DealId,
    pub buyer_id: i64,
    pub seller_id: i64,
    pub amount: f64,
    pub currency: String,
    pub description: String,
    pub status: DealStatus,
    pub approved_by_buyer: bool,
    pub approved_by_seller: bool,
    pub created_at: DateTime<Utc>,
}

impl Deal {
    pub fn new(id: DealId, terms: NewDeal, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            buyer_id: terms.buyer_id,
            seller_id: terms.seller_id,
            amount: terms.amount,
            currency: terms.currency,
            description: terms.description,
            status: DealStatus::PendingPayment,
            approved_by_buyer: false,
            approved_by_seller: false,
            created_at,
        }
    }

    /// Role of `user_id` in this deal, buyer taking precedence
    pub fn role_of(&self, user_id: i64) -> Option<Role> {
        if user_id == self.buyer_id {
            Some(Role::Buyer)
        } else if user_id == self.seller_id {
            Some(Role::Seller)
        } else {
            None
        }
    }

    pub fn is_participant(&self, user_id: i64) -> bool {
        self.role_of(user_id).is_some()
    }

    fn authorize(&self, user_id: i64) -> Result<Role, EscrowError> {
        self.role_of(user_id)
            .ok_or(EscrowError::Unauthorized { deal_id: self.id })
    }

    /// Record the caller's approval; completes the deal once both sides approved.
    pub fn approve(&mut self, user_id: i64) -> Result<ApprovalOutcome, EscrowError> {
        let role = self.authorize(user_id)?;
        if self.status.is_terminal() {
            return Err(EscrowError::InvalidState {
                deal_id: self.id,
                status: self.status,
            });
        }

        match role {
            Role::Buyer => self.approved_by_buyer = true,
            Role::Seller => self.approved_by_seller = true,
        }

        if self.approved_by_buyer && self.approved_by_seller {
            self.status = DealStatus::Completed;
            Ok(ApprovalOutcome::Completed)
        } else {
            Ok(ApprovalOutcome::Waiting)
        }
    }

    /// Cancel the deal. Only allowed while it is still awaiting payment.
    pub fn reject(&mut self, user_id: i64) -> Result<Role, EscrowError> {
        let role = self.authorize(user_id)?;
        if self.status != DealStatus::PendingPayment {
            return Err(EscrowError::InvalidState {
                deal_id: self.id,
                status: self.status,
            });
        }
        self.status = DealStatus::Rejected;
        Ok(role)
    }

    /// Read access for participants only
    pub fn view(&self, user_id: i64) -> Result<&Deal, EscrowError> {
        self.authorize(user_id)?;
        Ok(self)
    }
}
