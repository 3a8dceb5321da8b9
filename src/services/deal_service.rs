use tracing::{debug, info};

use crate::db::DealStore;
use crate::models::{ApprovalOutcome, Deal, DealId};
use crate::utils::EscrowError;

/// Current state of a deal, visible to its participants only
pub fn view_deal<S>(store: &S, deal_id: DealId, user_id: i64) -> Result<Deal, EscrowError>
where
    S: DealStore + ?Sized,
{
    let deal = store
        .get_deal(deal_id)
        .ok_or(EscrowError::NotFound(deal_id))?;
    deal.view(user_id).cloned()
}

/// Record `user_id`'s approval. Completing the deal is the fund-release signal.
pub fn approve_deal<S>(
    store: &mut S,
    deal_id: DealId,
    user_id: i64,
) -> Result<ApprovalOutcome, EscrowError>
where
    S: DealStore + ?Sized,
{
    let deal = store
        .get_deal_mut(deal_id)
        .ok_or(EscrowError::NotFound(deal_id))?;

    let outcome = deal.approve(user_id)?;
    match outcome {
        ApprovalOutcome::Completed => info!(
            "Deal #{} completed: {} {} released to seller {}",
            deal.id, deal.amount, deal.currency, deal.seller_id
        ),
        ApprovalOutcome::Waiting => debug!(
            "Deal #{} approved by {} (buyer: {}, seller: {})",
            deal.id, user_id, deal.approved_by_buyer, deal.approved_by_seller
        ),
    }
    Ok(outcome)
}

pub fn reject_deal<S>(store: &mut S, deal_id: DealId, user_id: i64) -> Result<(), EscrowError>
where
    S: DealStore + ?Sized,
{
    let deal = store
        .get_deal_mut(deal_id)
        .ok_or(EscrowError::NotFound(deal_id))?;

    let role = deal.reject(user_id)?;
    info!("Deal #{} rejected by {} {}", deal_id, role, user_id);
    Ok(())
}

pub fn list_deals<S>(store: &S, user_id: i64) -> Vec<Deal>
where
    S: DealStore + ?Sized,
{
    store.deals_for_user(user_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryDealStore;
    use crate::models::{DealStatus, NewDeal};

    const BUYER: i64 = 10;
    const SELLER: i64 = 55;

    fn store_with_deal() -> (InMemoryDealStore, DealId) {
        let mut store = InMemoryDealStore::default();
        let deal = store.create_deal(NewDeal {
            buyer_id: BUYER,
            seller_id: SELLER,
            amount: 100.0,
            currency: "USD".to_string(),
            description: "book".to_string(),
        });
        (store, deal.id)
    }

    #[test]
    fn test_buyer_then_seller_completes_deal_1001() {
        let (mut store, id) = store_with_deal();
        assert_eq!(id, 1001);

        assert_eq!(approve_deal(&mut store, id, BUYER), Ok(ApprovalOutcome::Waiting));
        assert_eq!(approve_deal(&mut store, id, SELLER), Ok(ApprovalOutcome::Completed));
        assert_eq!(store.get_deal(id).unwrap().status, DealStatus::Completed);
    }

    #[test]
    fn test_unknown_deal() {
        let (mut store, _) = store_with_deal();
        assert_eq!(approve_deal(&mut store, 4242, BUYER), Err(EscrowError::NotFound(4242)));
        assert_eq!(reject_deal(&mut store, 4242, BUYER), Err(EscrowError::NotFound(4242)));
        assert_eq!(view_deal(&store, 4242, BUYER), Err(EscrowError::NotFound(4242)));
    }

    #[test]
    fn test_non_participant_leaves_deal_untouched() {
        let (mut store, id) = store_with_deal();
        let before = store.get_deal(id).unwrap().clone();

        assert_eq!(
            approve_deal(&mut store, id, 77),
            Err(EscrowError::Unauthorized { deal_id: id })
        );
        assert_eq!(
            reject_deal(&mut store, id, 77),
            Err(EscrowError::Unauthorized { deal_id: id })
        );
        assert_eq!(store.get_deal(id).unwrap(), &before);
    }

    #[test]
    fn test_reject_then_approve_is_invalid() {
        let (mut store, id) = store_with_deal();
        reject_deal(&mut store, id, SELLER).unwrap();

        assert_eq!(
            approve_deal(&mut store, id, BUYER),
            Err(EscrowError::InvalidState {
                deal_id: id,
                status: DealStatus::Rejected
            })
        );
        assert_eq!(store.get_deal(id).unwrap().status, DealStatus::Rejected);
    }

    #[test]
    fn test_view_and_list() {
        let (store, id) = store_with_deal();
        assert_eq!(view_deal(&store, id, SELLER).unwrap().id, id);
        assert_eq!(list_deals(&store, BUYER).len(), 1);
        assert_eq!(list_deals(&store, SELLER).len(), 1);
        assert!(list_deals(&store, 3).is_empty());
    }
}
