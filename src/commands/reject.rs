use crate::db::DealStore;
use crate::models::{Outbound, Reply};
use crate::services::deal_service;
use crate::utils::parse_deal_id;

pub fn execute<S>(store: &mut S, user_id: i64, args: &[String], prefix: &str) -> Outbound
where
    S: DealStore + ?Sized,
{
    let result = parse_deal_id(args, &format!("{}reject <id>", prefix)).and_then(|deal_id| {
        deal_service::reject_deal(store, deal_id, user_id).map(|_| Reply::Rejected { deal_id })
    });

    match result {
        Ok(reply) => Outbound::reply(reply),
        Err(e) => Outbound::error(e),
    }
}
