//! # Identifier Generation
//!
//! Random identifiers handed out to customers and administrators.
//!
//! ```text
//! ┌──────────────────┬────────────┬────────────┬───────────────────────────┐
//! │ Kind             │ Raw bytes  │ Characters │ Used for                  │
//! ├──────────────────┼────────────┼────────────┼───────────────────────────┤
//! │ public id        │ 6          │ 8          │ shareable customer link   │
//! │ secret           │ 24         │ 32         │ customer capability token │
//! │ admin token      │ 18         │ 24         │ settings / admin access   │
//! └──────────────────┴────────────┴────────────┴───────────────────────────┘
//! ```
//!
//! All bytes come from the operating system CSPRNG and are encoded as
//! URL-safe base64 without `=` padding (some QR readers drop trailing `=`).

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;

/// Length of a public id in characters.
pub const PUBLIC_ID_LEN: usize = 8;

/// Length of a customer secret in characters.
pub const SECRET_LEN: usize = 32;

/// Length of an admin token in characters.
pub const ADMIN_TOKEN_LEN: usize = 24;

/// Source of fresh `(public_id, secret)` pairs.
///
/// The repository takes this as a parameter so collision handling can be
/// exercised with a deterministic source.
pub trait IdGenerator {
    fn public_id(&self) -> String;
    fn secret(&self) -> String;
}

/// Production generator backed by [`OsRng`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn public_id(&self) -> String {
        new_public_id()
    }

    fn secret(&self) -> String {
        new_secret()
    }
}

/// Short URL-safe customer identifier.
pub fn new_public_id() -> String {
    token::<6>()
}

/// Long unguessable customer token.
pub fn new_secret() -> String {
    token::<24>()
}

/// Token protecting administrative actions.
pub fn new_admin_token() -> String {
    token::<18>()
}

fn token<const N: usize>() -> String {
    let mut bytes = [0u8; N];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn is_url_safe(s: &str) -> bool {
        s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    #[test]
    fn test_lengths() {
        assert_eq!(new_public_id().len(), PUBLIC_ID_LEN);
        assert_eq!(new_secret().len(), SECRET_LEN);
        assert_eq!(new_admin_token().len(), ADMIN_TOKEN_LEN);
    }

    #[test]
    fn test_url_safe_without_padding() {
        for _ in 0..200 {
            let id = new_public_id();
            let secret = new_secret();
            assert!(is_url_safe(&id), "{id}");
            assert!(is_url_safe(&secret), "{secret}");
            assert!(!id.contains('='));
            assert!(!secret.contains('='));
        }
    }

    #[test]
    fn test_public_ids_distinct_over_ten_thousand() {
        let ids: HashSet<String> = (0..10_000).map(|_| new_public_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_secret_differs_from_public_id() {
        let ids = RandomIds;
        let public_id = ids.public_id();
        let secret = ids.secret();
        assert!(!secret.starts_with(&public_id));
    }
}
