//! Password hashing utilities

use bcrypt::{hash, verify, DEFAULT_COST};

/// bcrypt ignores everything past 72 bytes; truncate explicitly so the
/// behavior is identical for hashing and verification, and compatible with
/// previously issued hashes.
const BCRYPT_MAX_BYTES: usize = 72;

/// Stored-hash prefix of the deprecated development accounts
/// (`test_hash_<plaintext>`).
const LEGACY_PREFIX: &str = "test_hash_";

fn truncate(password: &str) -> &[u8] {
    let bytes = password.as_bytes();
    &bytes[..bytes.len().min(BCRYPT_MAX_BYTES)]
}

/// Hash a password using bcrypt
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(truncate(password), DEFAULT_COST)
}

/// Verify a password against a bcrypt hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(truncate(password), hash)
}

/// Does the stored hash match the given plaintext under the deprecated
/// `test_hash_<plaintext>` format?
pub fn legacy_hash_matches(password: &str, stored: &str) -> bool {
    stored
        .strip_prefix(LEGACY_PREFIX)
        .is_some_and(|plain| plain == password)
}

/// Stored hash string for a legacy development account.
pub fn legacy_hash(password: &str) -> String {
    format!("{LEGACY_PREFIX}{password}")
}

/// Check a password against a stored hash.
///
/// The legacy fixed-format check runs first (when enabled); only if it does
/// not match is the real bcrypt verifier consulted. Verification errors
/// (e.g. a malformed stored hash) count as a mismatch.
pub fn password_matches(password: &str, stored: &str, allow_legacy: bool) -> bool {
    if allow_legacy && legacy_hash_matches(password, stored) {
        return true;
    }
    verify_password(password, stored).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let password = "secure_password_123";
        let hashed = hash_password(password).unwrap();

        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("wrong_password", &hashed).unwrap());
    }

    #[test]
    fn hashing_is_randomized() {
        let a = hash_password("same input").unwrap();
        let b = hash_password("same input").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same input", &a).unwrap());
        assert!(verify_password("same input", &b).unwrap());
    }

    #[test]
    fn passwords_are_truncated_at_72_bytes() {
        let long = "x".repeat(80);
        let hashed = hash_password(&long).unwrap();

        // Same 72-byte prefix, different tail: still verifies.
        let mut cousin = "x".repeat(72);
        cousin.push_str("yyyyyyyy");
        assert!(verify_password(&cousin, &hashed).unwrap());

        // Different byte inside the first 72: rejected.
        let mut other = "x".repeat(71);
        other.push('z');
        assert!(!verify_password(&other, &hashed).unwrap());
    }

    #[test]
    fn legacy_hash_is_tried_before_bcrypt() {
        let stored = legacy_hash("view123");
        assert!(password_matches("view123", &stored, true));
        assert!(!password_matches("other", &stored, true));
    }

    #[test]
    fn legacy_hash_is_ignored_when_disabled() {
        let stored = legacy_hash("view123");
        // With the shim off the stored value is treated as a (malformed)
        // bcrypt hash and never matches.
        assert!(!password_matches("view123", &stored, false));
    }

    #[test]
    fn bcrypt_still_works_with_legacy_enabled() {
        let hashed = hash_password("observerpass").unwrap();
        assert!(password_matches("observerpass", &hashed, true));
        assert!(!password_matches("wrong", &hashed, true));
    }
}
