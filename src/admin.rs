//! Admin access gate.
//!
//! A single shared plaintext passphrase compared against user input.
//! Success yields an explicit session value that command handlers take
//! by value; there is no persisted token and no ambient global state.
//! This is a gate, not a security boundary.

/// Proof that the admin passphrase was entered for this invocation.
#[derive(Debug)]
pub struct AdminSession(());

/// Compare the entered passphrase against the configured one.
pub fn login(input: &str, configured: &str) -> Option<AdminSession> {
    if input == configured {
        Some(AdminSession(()))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_password_grants_session() {
        assert!(login("1234", "1234").is_some());
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        assert!(login("12345", "1234").is_none());
        assert!(login("", "1234").is_none());
    }
}
