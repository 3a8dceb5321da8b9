use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Per-user, per-command cooldown tracker
pub struct Cooldowns {
    seconds: u64,
    last_used: HashMap<(i64, String), u64>,
    // When each user was last warned, so a spammed command gets one warning per window
    last_warned: HashMap<(i64, String), u64>,
}

impl Cooldowns {
    pub fn new(seconds: u64) -> Self {
        Self {
            seconds,
            last_used: HashMap::new(),
            last_warned: HashMap::new(),
        }
    }

    /// Check a command against the wall clock
    pub fn check(&mut self, user_id: i64, command: &str) -> Result<(), (u64, bool)> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        self.check_at(user_id, command, now)
    }

    /// Returns Ok(()) and records the use if the cooldown has passed.
    /// Returns Err((remaining_seconds, should_warn)) while still cooling down;
    /// `should_warn` is true only for the first violation in a window.
    pub fn check_at(&mut self, user_id: i64, command: &str, now: u64) -> Result<(), (u64, bool)> {
        if self.seconds == 0 {
            return Ok(());
        }

        let key = (user_id, command.to_string());
        if let Some(&last_time) = self.last_used.get(&key) {
            let elapsed = now.saturating_sub(last_time);
            if elapsed < self.seconds {
                let should_warn = match self.last_warned.get(&key) {
                    Some(&last_warning) => last_warning < last_time,
                    None => true,
                };
                if should_warn {
                    self.last_warned.insert(key, now);
                }
                return Err((self.seconds - elapsed, should_warn));
            }
        }

        self.last_used.insert(key, now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_blocks_repeat_within_window() {
        let mut cooldowns = Cooldowns::new(5);
        assert!(cooldowns.check_at(1, "approve", 100).is_ok());
        assert_eq!(cooldowns.check_at(1, "approve", 102), Err((3, true)));
        // Second violation in the same window stays quiet
        assert_eq!(cooldowns.check_at(1, "approve", 103), Err((2, false)));
        assert!(cooldowns.check_at(1, "approve", 105).is_ok());
    }

    #[test]
    fn test_cooldown_is_per_user_and_command() {
        let mut cooldowns = Cooldowns::new(5);
        assert!(cooldowns.check_at(1, "approve", 100).is_ok());
        assert!(cooldowns.check_at(2, "approve", 100).is_ok());
        assert!(cooldowns.check_at(1, "reject", 100).is_ok());
    }

    #[test]
    fn test_zero_seconds_disables_cooldown() {
        let mut cooldowns = Cooldowns::new(0);
        for _ in 0..10 {
            assert!(cooldowns.check_at(1, "deal", 100).is_ok());
        }
    }
}
