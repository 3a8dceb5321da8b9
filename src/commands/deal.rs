use crate::db::DealStore;
use crate::models::{DealAction, Outbound, Reply};
use crate::services::deal_service;
use crate::utils::parse_deal_id;

/// `deal <id>`: show the deal, with Approve / Reject buttons while it is still open
pub fn execute<S>(store: &S, user_id: i64, args: &[String], prefix: &str) -> Outbound
where
    S: DealStore + ?Sized,
{
    let deal = parse_deal_id(args, &format!("{}deal <id>", prefix))
        .and_then(|deal_id| deal_service::view_deal(store, deal_id, user_id));

    match deal {
        Ok(deal) => {
            let buttons = if deal.status.is_terminal() {
                Vec::new()
            } else {
                vec![DealAction::Approve(deal.id), DealAction::Reject(deal.id)]
            };
            Outbound::Reply {
                body: Reply::DealDetails(deal),
                buttons,
            }
        }
        Err(e) => Outbound::error(e),
    }
}
