use dashmap::DashMap;
use rand::Rng;

/// In-memory one-time codes keyed by phone number.
///
/// Codes have no expiry and no attempt limit; they live until consumed or
/// the process exits, and a reissue for the same phone overwrites the
/// previous code. The store is process-local, so a multi-instance
/// deployment would fragment it.
pub struct OtpStore {
    codes: DashMap<String, String>,
}

impl OtpStore {
    pub fn new() -> Self {
        Self {
            codes: DashMap::new(),
        }
    }

    /// Generates a fresh 6-digit code for `phone`, replacing any pending one.
    pub fn issue(&self, phone: &str) -> String {
        let code = rand::thread_rng().gen_range(100_000..=999_999).to_string();
        self.codes.insert(phone.to_string(), code.clone());
        code
    }

    /// Consumes the pending code for `phone` if it matches `code` exactly.
    /// A mismatch leaves the stored code in place for another attempt.
    pub fn verify(&self, phone: &str, code: &str) -> bool {
        let matched = self
            .codes
            .get(phone)
            .map(|stored| stored.value() == code)
            .unwrap_or(false);

        if matched {
            self.codes.remove(phone);
        }
        matched
    }

    pub fn pending(&self) -> usize {
        self.codes.len()
    }
}

impl Default for OtpStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::OtpStore;

    #[test]
    fn issued_code_is_six_digits() {
        let store = OtpStore::new();
        let code = store.issue("9876543210");
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn correct_code_verifies_exactly_once() {
        let store = OtpStore::new();
        let code = store.issue("9876543210");

        assert!(store.verify("9876543210", &code));
        assert!(!store.verify("9876543210", &code));
        assert_eq!(store.pending(), 0);
    }

    #[test]
    fn wrong_code_leaves_stored_code_intact() {
        let store = OtpStore::new();
        let code = store.issue("9876543210");

        assert!(!store.verify("9876543210", "000000"));
        assert_eq!(store.pending(), 1);
        assert!(store.verify("9876543210", &code));
    }

    #[test]
    fn reissue_overwrites_previous_code() {
        let store = OtpStore::new();
        let first = store.issue("9876543210");
        let second = store.issue("9876543210");

        if first != second {
            assert!(!store.verify("9876543210", &first));
        }
        assert!(store.verify("9876543210", &second));
    }

    #[test]
    fn codes_are_per_phone() {
        let store = OtpStore::new();
        let code = store.issue("9876543210");

        assert!(!store.verify("9123456789", &code));
        assert!(store.verify("9876543210", &code));
    }
}
