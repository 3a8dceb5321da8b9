use crate::models::{Deal, DealId, NewDeal};

pub mod deal;

pub use deal::{InMemoryDealStore, MAX_DEAL_ID_OFFSET};

/// Registry of all deals, the single source of truth for deal state
pub trait DealStore: Send {
    /// Allocate the next id and store a new pending deal. Terms must already be validated.
    fn create_deal(&mut self, terms: NewDeal) -> Deal;

    fn get_deal(&self, deal_id: DealId) -> Option<&Deal>;

    fn get_deal_mut(&mut self, deal_id: DealId) -> Option<&mut Deal>;

    fn deal_count(&self) -> usize;

    /// Deals where the user is buyer or seller, oldest first
    fn deals_for_user(&self, user_id: i64) -> Vec<Deal>;
}
