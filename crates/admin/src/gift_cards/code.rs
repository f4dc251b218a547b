//! Redemption code generation.
//!
//! Codes are 16 characters from an alphabet without look-alike glyphs
//! (no `I`, `O`, `0`, `1`), grouped as `XXXX-XXXX-XXXX-XXXX`. The generator
//! keeps no state and makes no uniqueness promise; the store rejects
//! duplicates.

use rand::Rng;

/// Characters a generated code may contain.
pub const CODE_ALPHABET: &[u8; 32] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Number of characters per group.
pub const GROUP_LEN: usize = 4;

/// Number of groups.
pub const GROUP_COUNT: usize = 4;

/// Length of a generated code including separators.
pub const CODE_LEN: usize = GROUP_LEN * GROUP_COUNT + (GROUP_COUNT - 1);

/// Placeholder shown where no code has been entered yet.
pub const CODE_PLACEHOLDER: &str = "XXXX-XXXX-XXXX-XXXX";

const SEPARATOR: char = '-';

/// Generate a new redemption code using the thread-local RNG.
#[must_use]
pub fn generate_code() -> String {
    generate_code_with(&mut rand::rng())
}

/// Generate a new redemption code from the given RNG.
#[allow(clippy::indexing_slicing)] // index drawn from 0..CODE_ALPHABET.len()
pub fn generate_code_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut code = String::with_capacity(CODE_LEN);
    for group in 0..GROUP_COUNT {
        if group > 0 {
            code.push(SEPARATOR);
        }
        for _ in 0..GROUP_LEN {
            let idx = rng.random_range(0..CODE_ALPHABET.len());
            code.push(char::from(CODE_ALPHABET[idx]));
        }
    }
    code
}

/// Returns true if `code` has exactly the shape of a generated code.
///
/// Manually entered codes are accepted in any shape; this only tells whether
/// a string could have come from [`generate_code`].
#[must_use]
pub fn is_well_formed(code: &str) -> bool {
    let groups: Vec<&str> = code.split(SEPARATOR).collect();
    groups.len() == GROUP_COUNT
        && groups.iter().all(|group| {
            group.len() == GROUP_LEN && group.bytes().all(|b| CODE_ALPHABET.contains(&b))
        })
}
