//! Transport-neutral inbound events and outbound replies

use crate::models::capture::CaptureStep;
use crate::models::deal::{ApprovalOutcome, Deal, DealId};
use crate::utils::EscrowError;

/// Event delivered by the chat transport
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    Command {
        name: String,
        args: Vec<String>,
        from: i64,
    },
    FreeText {
        text: String,
        from: i64,
    },
    ButtonPress {
        token: String,
        from: i64,
    },
}

/// Button action attached to a deal message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealAction {
    Approve(DealId),
    Reject(DealId),
}

impl DealAction {
    /// Token carried by the button, e.g. `approve_1001`
    pub fn token(&self) -> String {
        match self {
            DealAction::Approve(id) => format!("approve_{}", id),
            DealAction::Reject(id) => format!("reject_{}", id),
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        let (kind, id) = token.split_once('_')?;
        let id = id.parse::<DealId>().ok().filter(|id| *id > 0)?;
        match kind {
            "approve" => Some(DealAction::Approve(id)),
            "reject" => Some(DealAction::Reject(id)),
            _ => None,
        }
    }
}

/// Content of a reply, rendered by the transport
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Help,
    CapturePrompt(CaptureStep),
    CaptureCancelled,
    NothingToCancel,
    DealCreated(Deal),
    DealDetails(Deal),
    Approved {
        deal_id: DealId,
        outcome: ApprovalOutcome,
    },
    Rejected {
        deal_id: DealId,
    },
    DealList {
        user_id: i64,
        deals: Vec<Deal>,
    },
    /// Command used again before its cooldown elapsed
    Cooldown {
        remaining_seconds: u64,
    },
    Error(EscrowError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Reply {
        body: Reply,
        buttons: Vec<DealAction>,
    },
    /// Answer to a button press; `alert` marks it as an error the presser must see
    Acknowledge {
        text: String,
        alert: bool,
    },
}

impl Outbound {
    pub fn reply(body: Reply) -> Self {
        Outbound::Reply {
            body,
            buttons: Vec::new(),
        }
    }

    pub fn error(error: EscrowError) -> Self {
        Outbound::reply(Reply::Error(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_tokens() {
        assert_eq!(DealAction::Approve(1001).token(), "approve_1001");
        assert_eq!(DealAction::Reject(7).token(), "reject_7");
        assert_eq!(DealAction::parse("approve_1001"), Some(DealAction::Approve(1001)));
        assert_eq!(DealAction::parse("reject_1002"), Some(DealAction::Reject(1002)));
    }

    #[test]
    fn test_malformed_tokens_are_ignored() {
        for token in ["approve_", "approve_x", "approve_0", "refund_1001", "approve1001", ""] {
            assert_eq!(DealAction::parse(token), None, "token {:?}", token);
        }
    }
}
