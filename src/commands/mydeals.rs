use crate::db::DealStore;
use crate::models::{Outbound, Reply};
use crate::services::deal_service;

pub fn execute<S>(store: &S, user_id: i64) -> Outbound
where
    S: DealStore + ?Sized,
{
    Outbound::reply(Reply::DealList {
        user_id,
        deals: deal_service::list_deals(store, user_id),
    })
}
