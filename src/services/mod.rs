pub mod capture_service;
pub mod deal_service;
pub mod reply_service;
