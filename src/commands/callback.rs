use tracing::debug;

use crate::commands::approve;
use crate::db::DealStore;
use crate::models::{DealAction, Outbound, Reply};
use crate::services::deal_service;

/// Handle an Approve / Reject button press.
/// The acknowledgement comes first so the transport can answer the press right away.
pub fn execute<S>(store: &mut S, token: &str, user_id: i64) -> Vec<Outbound>
where
    S: DealStore + ?Sized,
{
    let Some(action) = DealAction::parse(token) else {
        debug!("Ignoring unknown button token {:?} from {}", token, user_id);
        return vec![Outbound::Acknowledge {
            text: "❌ Unknown action.".to_string(),
            alert: true,
        }];
    };

    let result = match action {
        DealAction::Approve(deal_id) => deal_service::approve_deal(store, deal_id, user_id)
            .map(|outcome| {
                (
                    approve::acknowledge_text(outcome),
                    Reply::Approved { deal_id, outcome },
                )
            }),
        DealAction::Reject(deal_id) => deal_service::reject_deal(store, deal_id, user_id)
            .map(|_| ("❌ Deal rejected!", Reply::Rejected { deal_id })),
    };

    match result {
        Ok((text, reply)) => vec![
            Outbound::Acknowledge {
                text: text.to_string(),
                alert: false,
            },
            Outbound::reply(reply),
        ],
        Err(e) => vec![Outbound::Acknowledge {
            text: format!("❌ {}", e),
            alert: true,
        }],
    }
}
