use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Reason the password is unacceptable, if any.
pub fn password_problem(plain: &str) -> Option<&'static str> {
    if plain.chars().count() < MIN_PASSWORD_LEN {
        Some("Password too short")
    } else if plain.trim().is_empty() {
        Some("Password must not be blank")
    } else {
        None
    }
}

/// Argon2id with a fresh random salt, in PHC string form.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| anyhow::anyhow!("hash password: {e}"))
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("parse password hash: {e}"))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
