use crate::models::{Outbound, Reply};

/// `abandoned` tells whether the router dropped an active capture for this command
pub fn execute(abandoned: bool) -> Outbound {
    if abandoned {
        Outbound::reply(Reply::CaptureCancelled)
    } else {
        Outbound::reply(Reply::NothingToCancel)
    }
}
