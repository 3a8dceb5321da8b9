//! Guided deal-creation state, one per user

use std::fmt;

use crate::models::deal::NewDeal;
use crate::utils::{parse_user_id, ValidationError};

const MAX_CURRENCY_LEN: usize = 10;

/// Step of the capture sequence waiting for input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStep {
    SellerId,
    Amount,
    Currency,
    Description,
}

impl fmt::Display for CaptureStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CaptureStep::SellerId => "seller_id",
            CaptureStep::Amount => "amount",
            CaptureStep::Currency => "currency",
            CaptureStep::Description => "description",
        };
        f.write_str(name)
    }
}

/// Capture state with the fields collected so far
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CaptureState {
    #[default]
    Idle,
    AwaitingSeller,
    AwaitingAmount {
        seller_id: i64,
    },
    AwaitingCurrency {
        seller_id: i64,
        amount: f64,
    },
    AwaitingDescription {
        seller_id: i64,
        amount: f64,
        currency: String,
    },
}

/// Result of feeding one message into an active capture
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Advanced(CaptureState),
    Completed(NewDeal),
}

impl CaptureState {
    pub fn is_active(&self) -> bool {
        !matches!(self, CaptureState::Idle)
    }

    pub fn step(&self) -> Option<CaptureStep> {
        match self {
            CaptureState::Idle => None,
            CaptureState::AwaitingSeller => Some(CaptureStep::SellerId),
            CaptureState::AwaitingAmount { .. } => Some(CaptureStep::Amount),
            CaptureState::AwaitingCurrency { .. } => Some(CaptureStep::Currency),
            CaptureState::AwaitingDescription { .. } => Some(CaptureStep::Description),
        }
    }

    /// Validate `input` for the current step. On error the state is left as is.
    pub fn advance(&self, buyer_id: i64, input: &str) -> Result<Transition, ValidationError> {
        match self {
            CaptureState::Idle => Err(ValidationError::NotCapturing),
            CaptureState::AwaitingSeller => {
                let seller_id = parse_seller_id(input.trim())?;
                if seller_id == buyer_id {
                    return Err(ValidationError::SelfDeal);
                }
                Ok(Transition::Advanced(CaptureState::AwaitingAmount { seller_id }))
            }
            CaptureState::AwaitingAmount { seller_id } => {
                let amount = parse_amount(input.trim())?;
                Ok(Transition::Advanced(CaptureState::AwaitingCurrency {
                    seller_id: *seller_id,
                    amount,
                }))
            }
            CaptureState::AwaitingCurrency { seller_id, amount } => {
                let currency = parse_currency(input.trim())?;
                Ok(Transition::Advanced(CaptureState::AwaitingDescription {
                    seller_id: *seller_id,
                    amount: *amount,
                    currency,
                }))
            }
            CaptureState::AwaitingDescription {
                seller_id,
                amount,
                currency,
            } => Ok(Transition::Completed(NewDeal {
                buyer_id,
                seller_id: *seller_id,
                amount: *amount,
                currency: currency.clone(),
                description: input.to_string(),
            })),
        }
    }
}

fn parse_seller_id(input: &str) -> Result<i64, ValidationError> {
    match parse_user_id(input) {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::InvalidSellerId(input.to_string())),
    }
}

fn parse_amount(input: &str) -> Result<f64, ValidationError> {
    // f64 parsing accepts "NaN" and "inf", neither is a usable amount
    match input.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(ValidationError::InvalidAmount(input.to_string())),
    }
}

fn parse_currency(input: &str) -> Result<String, ValidationError> {
    // Uppercasing can lengthen a string (ß -> SS), so measure the stored form
    let currency = input.to_uppercase();
    let len = currency.chars().count();
    if len == 0 || len > MAX_CURRENCY_LEN {
        return Err(ValidationError::InvalidCurrency {
            max_len: MAX_CURRENCY_LEN,
        });
    }
    Ok(currency)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUYER: i64 = 7;

    fn expect_advanced(state: &CaptureState, input: &str) -> CaptureState {
        match state.advance(BUYER, input) {
            Ok(Transition::Advanced(next)) => next,
            other => panic!("expected advance for {:?}, got {:?}", input, other),
        }
    }

    #[test]
    fn test_full_sequence_builds_deal_terms() {
        let state = CaptureState::AwaitingSeller;
        let state = expect_advanced(&state, "55");
        assert_eq!(state.step(), Some(CaptureStep::Amount));
        let state = expect_advanced(&state, "100");
        assert_eq!(state.step(), Some(CaptureStep::Currency));
        let state = expect_advanced(&state, "usd");
        assert_eq!(state.step(), Some(CaptureStep::Description));

        let terms = match state.advance(BUYER, "book") {
            Ok(Transition::Completed(terms)) => terms,
            other => panic!("expected completion, got {:?}", other),
        };
        assert_eq!(
            terms,
            NewDeal {
                buyer_id: BUYER,
                seller_id: 55,
                amount: 100.0,
                currency: "USD".to_string(),
                description: "book".to_string(),
            }
        );
    }

    #[test]
    fn test_seller_id_validation() {
        let state = CaptureState::AwaitingSeller;
        assert_eq!(
            state.advance(BUYER, "bob"),
            Err(ValidationError::InvalidSellerId("bob".to_string()))
        );
        assert!(state.advance(BUYER, "0").is_err());
        assert!(state.advance(BUYER, "-4").is_err());
        assert_eq!(state.advance(BUYER, "7"), Err(ValidationError::SelfDeal));
        assert_eq!(
            expect_advanced(&state, "<@123456789>"),
            CaptureState::AwaitingAmount {
                seller_id: 123456789
            }
        );
    }

    #[test]
    fn test_amount_must_be_positive_and_finite() {
        let state = CaptureState::AwaitingAmount { seller_id: 55 };
        for bad in ["-5", "0", "abc", "NaN", "inf", ""] {
            assert_eq!(
                state.advance(BUYER, bad),
                Err(ValidationError::InvalidAmount(bad.to_string())),
                "input {:?}",
                bad
            );
        }
        assert_eq!(
            expect_advanced(&state, " 500.50 "),
            CaptureState::AwaitingCurrency {
                seller_id: 55,
                amount: 500.5
            }
        );
    }

    #[test]
    fn test_currency_length_limit() {
        let state = CaptureState::AwaitingCurrency {
            seller_id: 55,
            amount: 1.0,
        };
        assert!(state.advance(BUYER, "ABCDEFGHIJK").is_err());
        assert!(state.advance(BUYER, "   ").is_err());

        let next = expect_advanced(&state, "abcdefghij");
        assert_eq!(
            next,
            CaptureState::AwaitingDescription {
                seller_id: 55,
                amount: 1.0,
                currency: "ABCDEFGHIJ".to_string()
            }
        );
    }

    #[test]
    fn test_currency_limit_applies_after_uppercasing() {
        let state = CaptureState::AwaitingCurrency {
            seller_id: 55,
            amount: 1.0,
        };
        // Ten characters that uppercase to twenty
        assert!(state.advance(BUYER, "ßßßßßßßßßß").is_err());
        assert!(state.advance(BUYER, "ﬃﬃﬃﬃ").is_err());

        let next = expect_advanced(&state, "ß");
        assert_eq!(
            next,
            CaptureState::AwaitingDescription {
                seller_id: 55,
                amount: 1.0,
                currency: "SS".to_string()
            }
        );
    }

    #[test]
    fn test_description_kept_verbatim() {
        let state = CaptureState::AwaitingDescription {
            seller_id: 55,
            amount: 1.0,
            currency: "EUR".to_string(),
        };
        match state.advance(BUYER, "  two  books, used ") {
            Ok(Transition::Completed(terms)) => {
                assert_eq!(terms.description, "  two  books, used ")
            }
            other => panic!("expected completion, got {:?}", other),
        }
    }

    #[test]
    fn test_idle_state_does_not_capture() {
        let state = CaptureState::default();
        assert!(!state.is_active());
        assert_eq!(state.step(), None);
        assert_eq!(state.advance(BUYER, "55"), Err(ValidationError::NotCapturing));
    }
}
