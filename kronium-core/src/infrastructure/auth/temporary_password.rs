//! One-time passwords for console-created accounts

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

const LOWER: &[u8] = b"abcdefghijkmnopqrstuvwxyz";
const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const DIGITS: &[u8] = b"23456789";
const SYMBOLS: &[u8] = b"!@#$%*?";

/// Generates temporary passwords handed out once when an admin creates a user.
///
/// Every password holds at least one lowercase letter, uppercase letter,
/// digit and symbol. Look-alike characters (0/O, 1/l/I) are excluded.
#[derive(Debug, Clone)]
pub struct TemporaryPasswordGenerator {
    length: usize,
}

impl TemporaryPasswordGenerator {
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(4),
        }
    }

    pub fn generate(&self) -> String {
        let mut rng = rand::rng();
        let all: Vec<u8> = [LOWER, UPPER, DIGITS, SYMBOLS].concat();

        let mut chars: Vec<u8> = [LOWER, UPPER, DIGITS, SYMBOLS]
            .iter()
            .filter_map(|class| class.choose(&mut rng).copied())
            .collect();
        while chars.len() < self.length {
            chars.push(all[rng.random_range(0..all.len())]);
        }

        // Class-guaranteed characters must not always lead
        chars.shuffle(&mut rng);

        chars.into_iter().map(char::from).collect()
    }
}
