use crate::models::{Outbound, Reply};

pub fn execute() -> Outbound {
    Outbound::reply(Reply::Help)
}
