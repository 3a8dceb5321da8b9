use std::collections::BTreeMap;

use chrono::Utc;

use crate::db::DealStore;
use crate::models::{Deal, DealId, NewDeal};

/// Largest accepted id offset; leaves the id counter room to grow without overflow
pub const MAX_DEAL_ID_OFFSET: DealId = 1_000_000_000_000;

/// Process-lifetime deal store. Ids only grow, so the map's order is insertion order.
pub struct InMemoryDealStore {
    deals: BTreeMap<DealId, Deal>,
    last_id: DealId,
}

impl InMemoryDealStore {
    /// First allocated id is `offset + 1`; the offset is clamped to `0..=MAX_DEAL_ID_OFFSET`
    pub fn with_offset(offset: DealId) -> Self {
        Self {
            deals: BTreeMap::new(),
            last_id: offset.clamp(0, MAX_DEAL_ID_OFFSET),
        }
    }
}

impl Default for InMemoryDealStore {
    fn default() -> Self {
        Self::with_offset(1000)
    }
}

impl DealStore for InMemoryDealStore {
    fn create_deal(&mut self, terms: NewDeal) -> Deal {
        self.last_id += 1;
        let deal = Deal::new(self.last_id, terms, Utc::now());
        self.deals.insert(deal.id, deal.clone());
        deal
    }

    fn get_deal(&self, deal_id: DealId) -> Option<&Deal> {
        self.deals.get(&deal_id)
    }

    fn get_deal_mut(&mut self, deal_id: DealId) -> Option<&mut Deal> {
        self.deals.get_mut(&deal_id)
    }

    fn deal_count(&self) -> usize {
        self.deals.len()
    }

    fn deals_for_user(&self, user_id: i64) -> Vec<Deal> {
        self.deals
            .values()
            .filter(|deal| deal.is_participant(user_id))
            .cloned()
            .collect()
    }
}
