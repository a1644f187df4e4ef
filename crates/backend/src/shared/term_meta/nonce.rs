//! Time-tick nonces for admin forms
//!
//! A token is valid during the tick it was issued in and the following one,
//! so its lifetime is between half and the full configured lifetime.

use sha2::{Digest, Sha256};

const TOKEN_LEN: usize = 10;

#[derive(Clone)]
pub struct NonceService {
    secret: String,
    half_life_secs: i64,
}

impl NonceService {
    pub fn new(secret: impl Into<String>, lifetime_hours: u32) -> Self {
        Self {
            secret: secret.into(),
            half_life_secs: (i64::from(lifetime_hours) * 3600 / 2).max(1),
        }
    }

    pub fn create(&self, action: &str, user_id: &str) -> String {
        self.create_at(chrono::Utc::now().timestamp(), action, user_id)
    }

    pub fn verify(&self, token: &str, action: &str, user_id: &str) -> bool {
        self.verify_at(chrono::Utc::now().timestamp(), token, action, user_id)
    }

    pub fn create_at(&self, now: i64, action: &str, user_id: &str) -> String {
        self.token_for_tick(self.tick(now), action, user_id)
    }

    pub fn verify_at(&self, now: i64, token: &str, action: &str, user_id: &str) -> bool {
        if token.len() != TOKEN_LEN {
            return false;
        }
        let tick = self.tick(now);
        [tick, tick - 1]
            .iter()
            .any(|t| constant_time_eq(token, &self.token_for_tick(*t, action, user_id)))
    }

    fn tick(&self, now: i64) -> i64 {
        // ceil(now / half_life)
        (now + self.half_life_secs - 1).div_euclid(self.half_life_secs)
    }

    fn token_for_tick(&self, tick: i64, action: &str, user_id: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(b"|");
        hasher.update(tick.to_string().as_bytes());
        hasher.update(b"|");
        hasher.update(action.as_bytes());
        hasher.update(b"|");
        hasher.update(user_id.as_bytes());
        let mut hex = format!("{:x}", hasher.finalize());
        hex.truncate(TOKEN_LEN);
        hex
    }
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a
            .bytes()
            .zip(b.bytes())
            .fold(0u8, |acc, (x, y)| acc | (x ^ y))
            == 0
}
