use crate::models::Outbound;
use crate::services::capture_service::{self, Sessions};

pub fn execute(sessions: &mut Sessions, user_id: i64) -> Outbound {
    Outbound::reply(capture_service::begin(sessions, user_id))
}
