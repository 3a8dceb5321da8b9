pub mod errors;
pub mod ratelimit;

pub use errors::{ConfigError, EscrowError, ValidationError};
pub use ratelimit::Cooldowns;

use crate::models::DealId;

/// Parse a raw user ID or a mention: `<@123456789>` or `<@!123456789>` -> 123456789
pub fn parse_user_id(input: &str) -> Result<i64, String> {
    let invalid = || "Invalid user ID or mention".to_string();

    let digits = match input.strip_prefix("<@") {
        Some(rest) => {
            let rest = rest.strip_prefix('!').unwrap_or(rest);
            rest.strip_suffix('>').ok_or_else(invalid)?
        }
        None => input,
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    digits.parse::<i64>().map_err(|_| invalid())
}

/// Parse the `<id>` argument of a deal command
pub fn parse_deal_id(args: &[String], usage: &str) -> Result<DealId, EscrowError> {
    let usage_error = || EscrowError::Usage(format!("Please provide a deal ID. Usage: `{}`", usage));

    let raw = args.first().ok_or_else(usage_error)?;
    let raw = raw.trim_start_matches('#');
    match raw.parse::<DealId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(usage_error()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_user_id_accepts_mentions() {
        assert_eq!(parse_user_id("55"), Ok(55));
        assert_eq!(parse_user_id("<@55>"), Ok(55));
        assert_eq!(parse_user_id("<@!55>"), Ok(55));
        assert!(parse_user_id("alice").is_err());
    }

    #[test]
    fn test_parse_user_id_rejects_malformed_mentions() {
        for input in ["<<@@55", "55>", "@!55", "<@55", "<@!!55>", "<55>", "!55", "<@>", "+55", ""] {
            assert!(parse_user_id(input).is_err(), "input {:?}", input);
        }
    }

    #[test]
    fn test_parse_deal_id() {
        assert_eq!(parse_deal_id(&args(&["1001"]), "$deal <id>"), Ok(1001));
        assert_eq!(parse_deal_id(&args(&["#1001"]), "$deal <id>"), Ok(1001));

        for bad in [args(&[]), args(&["0"]), args(&["-3"]), args(&["abc"])] {
            match parse_deal_id(&bad, "$deal <id>") {
                Err(EscrowError::Usage(msg)) => assert!(msg.contains("$deal <id>")),
                other => panic!("expected usage error for {:?}, got {:?}", bad, other),
            }
        }
    }
}
