//! One-time SSH password generation.

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Length of the generated password.
pub const SECRET_LEN: usize = 64;

/// Generate a fresh random alphanumeric password for the notebook's root user.
#[must_use]
pub fn generate_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SECRET_LEN)
        .map(char::from)
        .collect()
}
