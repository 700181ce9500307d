/// Password Hashing and Verification
///
/// Passwords are stored as self-describing Argon2id PHC strings
/// (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`), so verification reads
/// every parameter it needs from the verifier itself.

use argon2::password_hash::{self, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::auth::error::{AuthError, AuthResult};

/// Memory cost in KiB (64 MiB).
const MEMORY_COST: u32 = 64 * 1024;
const TIME_COST: u32 = 1;
const PARALLELISM: u32 = 2;
const OUTPUT_LEN: usize = 32;
const SALT_LEN: usize = 16;

fn hasher() -> AuthResult<Argon2<'static>> {
    let params = Params::new(MEMORY_COST, TIME_COST, PARALLELISM, Some(OUTPUT_LEN))
        .map_err(|e| AuthError::Hashing(format!("invalid argon2 parameters: {}", e)))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a plaintext password into a storable verifier
///
/// # Errors
/// Returns `AuthError::EntropyUnavailable` if no salt can be drawn and
/// `AuthError::Hashing` if argon2 rejects its inputs. Both are unexpected.
pub fn hash_password(password: &str) -> AuthResult<String> {
    let mut salt_bytes = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt_bytes)
        .map_err(|e| AuthError::EntropyUnavailable(e.to_string()))?;
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::Hashing(e.to_string()))?;

    hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Verify a plaintext password against a stored verifier
///
/// Returns `Ok(false)` for a plain mismatch. The digest comparison inside
/// `argon2` is constant time.
///
/// # Errors
/// Returns `AuthError::InvalidVerifierFormat` if `verifier` is not a PHC
/// string this crate can evaluate.
pub fn verify_password(password: &str, verifier: &str) -> AuthResult<bool> {
    let parsed = PasswordHash::new(verifier).map_err(|_| AuthError::InvalidVerifierFormat)?;

    // Parameters come from the verifier; `Argon2::default()` only supplies
    // the algorithm implementation.
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(password_hash::Error::Crypto) => Err(AuthError::Hashing(
            "argon2 failed while verifying".to_string(),
        )),
        Err(_) => Err(AuthError::InvalidVerifierFormat),
    }
}
