use std::collections::HashMap;

use tracing::{debug, info};

use crate::db::DealStore;
use crate::models::{CaptureState, CaptureStep, Reply, Transition};
use crate::utils::EscrowError;

/// Capture state per user id
pub type Sessions = HashMap<i64, CaptureState>;

/// Start (or restart) the guided deal creation for `user_id`
pub fn begin(sessions: &mut Sessions, user_id: i64) -> Reply {
    let previous = sessions.insert(user_id, CaptureState::AwaitingSeller);
    if previous.is_some_and(|state| state.is_active()) {
        debug!("User {} restarted deal creation", user_id);
    }
    Reply::CapturePrompt(CaptureStep::SellerId)
}

/// Drop any capture in progress. Returns true if one was active.
pub fn abandon(sessions: &mut Sessions, user_id: i64) -> bool {
    sessions
        .remove(&user_id)
        .is_some_and(|state| state.is_active())
}

pub fn step_of(sessions: &Sessions, user_id: i64) -> Option<CaptureStep> {
    sessions.get(&user_id).and_then(CaptureState::step)
}

/// Feed a free-text message into the user's capture.
/// Returns None when the user is not creating a deal.
pub fn handle_input<S>(
    sessions: &mut Sessions,
    store: &mut S,
    user_id: i64,
    text: &str,
) -> Option<Reply>
where
    S: DealStore + ?Sized,
{
    // Only active captures live in the map; chatter never inserts an entry
    let state = sessions
        .get_mut(&user_id)
        .filter(|state| state.is_active())?;

    let transition = match state.advance(user_id, text) {
        Ok(transition) => transition,
        Err(e) => {
            debug!("User {} sent invalid {:?}: {}", user_id, state.step(), e);
            return Some(Reply::Error(EscrowError::Validation(e)));
        }
    };

    let reply = match transition {
        Transition::Advanced(next) => {
            *state = next;
            match state.step() {
                Some(step) => Reply::CapturePrompt(step),
                None => {
                    sessions.remove(&user_id);
                    return None;
                }
            }
        }
        Transition::Completed(terms) => {
            sessions.remove(&user_id);
            let deal = store.create_deal(terms);
            info!(
                "Deal #{} created by buyer {} for seller {}: {} {} ({} deals total)",
                deal.id,
                deal.buyer_id,
                deal.seller_id,
                deal.amount,
                deal.currency,
                store.deal_count()
            );
            debug!(
                "Deal #{} snapshot: {}",
                deal.id,
                serde_json::to_string(&deal).unwrap_or_default()
            );
            Reply::DealCreated(deal)
        }
    };

    Some(reply)
}
