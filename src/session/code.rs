//! Session code generation.

use rand::Rng;

/// Characters a session code is drawn from.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Number of characters in a session code.
pub const CODE_LENGTH: usize = 5;

/// Draws one candidate code. Uniqueness is the caller's concern.
pub fn random_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..CODE_LENGTH)
        .map(|_| char::from(CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())]))
        .collect()
}
