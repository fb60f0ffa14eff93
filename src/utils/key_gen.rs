use std::fmt::Debug;

use rand::{CryptoRng, Rng};

use crate::consts::beacon_const::{KEY_BIT_LENGTH, KEY_LENGTH, KEY_RADIX};

/// Produces beacon keys. Uniqueness is not checked here; the beacon store's
/// unique index on `key` rejects collisions at insert time.
pub trait KeyGenerator: Send + Sync + Debug {
    fn generate(&self) -> String;
}

/// 130 bits from the thread-local CSPRNG, rendered as radix-32 digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomKeyGenerator;

impl KeyGenerator for RandomKeyGenerator {
    fn generate(&self) -> String {
        // panics if the OS entropy source is unavailable
        generate_key(&mut rand::rng())
    }
}

pub fn generate_key<R: Rng + CryptoRng>(rng: &mut R) -> String {
    let low: u128 = rng.random();
    let high = u128::from(rng.random::<u8>() & ((1 << (KEY_BIT_LENGTH - 128)) - 1));
    encode_radix32(high, low)
}

const DIGITS: &[u8; KEY_RADIX as usize] = b"0123456789abcdefghijklmnopqrstuv";

// `high` carries bits 128..130, `low` bits 0..128.
fn encode_radix32(high: u128, low: u128) -> String {
    let mut out = vec![b'0'; KEY_LENGTH];
    let mut rest = low;
    for slot in out.iter_mut().skip(1).rev() {
        *slot = DIGITS[(rest & 0x1f) as usize];
        rest >>= 5;
    }
    // 25 digits consumed 125 bits; the leading digit takes the last 3 low bits and the 2 high bits
    out[0] = DIGITS[((high << 3) | rest) as usize];
    out.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_key_shape() {
        let key = RandomKeyGenerator.generate();
        assert_eq!(key.len(), KEY_LENGTH);
        assert!(key.chars().all(|c| c.is_ascii_digit() || ('a'..='v').contains(&c)));
    }

    #[test]
    fn test_encode_bounds() {
        assert_eq!(encode_radix32(0, 0), "0".repeat(KEY_LENGTH));
        assert_eq!(encode_radix32(0, 31), format!("{}v", "0".repeat(KEY_LENGTH - 1)));
        assert_eq!(encode_radix32(0b11, u128::MAX), "v".repeat(KEY_LENGTH));
        assert_eq!(encode_radix32(0b01, 0), format!("8{}", "0".repeat(KEY_LENGTH - 1)));
    }

    #[test]
    fn test_no_collisions() {
        let generator = RandomKeyGenerator;
        let keys: HashSet<String> = (0..10_000).map(|_| generator.generate()).collect();
        assert_eq!(keys.len(), 10_000);
    }
}
