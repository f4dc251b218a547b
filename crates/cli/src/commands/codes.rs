//! Redemption code commands.
//!
//! # Usage
//!
//! ```bash
//! # Print five fresh codes
//! gd-cli generate --count 5
//!
//! # Verify a code someone typed in
//! gd-cli check ABCD-EFGH-JKLM-NPQR
//! ```

use std::io::Write;

use giftdesk_admin::gift_cards::{generate_code, is_well_formed};
use thiserror::Error;

/// Errors that can occur while running code commands.
#[derive(Debug, Error)]
pub enum CodeError {
    /// Nothing to generate.
    #[error("count must be at least 1")]
    ZeroCount,

    /// The code does not match the generated format.
    #[error("{0} is not a well-formed gift card code")]
    Malformed(String),

    /// Writing the output failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Write `count` freshly generated codes to `out`, one per line.
///
/// # Errors
///
/// Returns `CodeError::ZeroCount` if `count` is zero.
pub fn generate(count: usize, out: &mut impl Write) -> Result<(), CodeError> {
    if count == 0 {
        return Err(CodeError::ZeroCount);
    }

    for _ in 0..count {
        writeln!(out, "{}", generate_code())?;
    }

    tracing::debug!(count, "Generated gift card codes");
    Ok(())
}

/// Check that `code` is in the generated format.
///
/// Surrounding whitespace is ignored; case is not.
///
/// # Errors
///
/// Returns `CodeError::Malformed` if it is not.
pub fn check(code: &str, out: &mut impl Write) -> Result<(), CodeError> {
    let code = code.trim();
    if !is_well_formed(code) {
        return Err(CodeError::Malformed(code.to_string()));
    }

    writeln!(out, "{code}: ok")?;
    Ok(())
}
