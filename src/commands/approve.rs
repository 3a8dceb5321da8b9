use crate::db::DealStore;
use crate::models::{ApprovalOutcome, Outbound, Reply};
use crate::services::deal_service;
use crate::utils::parse_deal_id;

pub fn execute<S>(store: &mut S, user_id: i64, args: &[String], prefix: &str) -> Outbound
where
    S: DealStore + ?Sized,
{
    let result = parse_deal_id(args, &format!("{}approve <id>", prefix)).and_then(|deal_id| {
        deal_service::approve_deal(store, deal_id, user_id)
            .map(|outcome| Reply::Approved { deal_id, outcome })
    });

    match result {
        Ok(reply) => Outbound::reply(reply),
        Err(e) => Outbound::error(e),
    }
}

/// Text shown to the user who pressed the Approve button
pub fn acknowledge_text(outcome: ApprovalOutcome) -> &'static str {
    match outcome {
        ApprovalOutcome::Completed => "✅ Deal approved and completed!",
        ApprovalOutcome::Waiting => "✅ Approval recorded!",
    }
}
