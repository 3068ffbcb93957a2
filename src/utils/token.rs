// src/utils/token.rs

use rand::{Rng, distributions::Alphanumeric};

/// Length of candidate session tokens. 16 alphanumeric chars carry ~95 bits
/// of entropy; collisions are treated as negligible and not checked.
pub const SESSION_TOKEN_LEN: usize = 16;

/// Length of admin cookie tokens.
pub const ADMIN_TOKEN_LEN: usize = 32;

/// Generates a URL-safe random token of `len` alphanumeric characters.
///
/// `thread_rng` is a CSPRNG, so these tokens are usable as unguessable
/// capability strings (session links, admin cookies).
pub fn generate_token(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
