//! Random address and password generation.

use chrono::{DateTime, Utc};

use super::random::RandomSource;
use super::{ADDRESS_LOCAL_LEN, DOMAINS, PASSWORD_LEN, PASSWORD_SYMBOLS};
use crate::model::identity::Identity;

/// Characters allowed in the local part of an address.
pub const LOCAL_PART_CHARSET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

/// Letters and digits allowed in passwords; [`PASSWORD_SYMBOLS`] is appended.
const PASSWORD_ALNUM: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Produces fresh [`Identity`] values.
///
/// Collisions between generated addresses are possible and accepted.
#[derive(Debug, Clone)]
pub struct IdentityGenerator {
    domains: Vec<String>,
    local_len: usize,
    password_len: usize,
    password_charset: Vec<char>,
}

impl Default for IdentityGenerator {
    fn default() -> Self {
        Self::new(DOMAINS.iter().map(|d| d.to_string()).collect())
    }
}

impl IdentityGenerator {
    /// Generator issuing addresses under `domains` (non-empty, without `@`).
    pub fn new(domains: Vec<String>) -> Self {
        Self {
            domains,
            local_len: ADDRESS_LOCAL_LEN,
            password_len: PASSWORD_LEN,
            password_charset: password_charset(),
        }
    }

    /// Generate a new identity stamped with `now`.
    pub fn generate<R: RandomSource + ?Sized>(&self, rng: &mut R, now: DateTime<Utc>) -> Identity {
        let local = random_string(rng, &LOCAL_PART_CHARSET.chars().collect::<Vec<_>>(), self.local_len);
        let domain = &self.domains[rng.index(self.domains.len())];
        let password = random_string(rng, &self.password_charset, self.password_len);

        Identity {
            address: format!("{local}@{domain}"),
            password,
            created_at: now,
        }
    }
}

/// Every character a generated password may contain.
pub fn password_charset() -> Vec<char> {
    PASSWORD_ALNUM.chars().chain(PASSWORD_SYMBOLS.chars()).collect()
}

fn random_string<R: RandomSource + ?Sized>(rng: &mut R, charset: &[char], len: usize) -> String {
    (0..len).map(|_| charset[rng.index(charset.len())]).collect()
}
