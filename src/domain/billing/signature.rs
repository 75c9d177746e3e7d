//! Payment callback signature verification.
//!
//! The gateway signs completion callbacks with HMAC-SHA256 over
//! `external_order_id|payment_id`, keyed with the shared gateway secret and
//! hex encoded. Comparison is constant time.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// Computes and checks callback signatures with the gateway's shared secret.
///
/// The secret is injected at construction; nothing in this module reads
/// ambient configuration.
pub struct CallbackSigner {
    secret: SecretString,
}

impl CallbackSigner {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Expected hex signature for an order/payment pair.
    pub fn compute(&self, external_order_id: &str, payment_id: &str) -> String {
        let payload = format!("{}|{}", external_order_id, payment_id);
        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Verifies a supplied hex signature in constant time.
    ///
    /// Returns false for signatures that are not valid hex.
    pub fn verify(&self, external_order_id: &str, payment_id: &str, supplied: &str) -> bool {
        let supplied = match hex::decode(supplied) {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };
        let expected = match hex::decode(self.compute(external_order_id, payment_id)) {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };
        constant_time_compare(&expected, &supplied)
    }
}

/// Constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "gateway_test_secret";

    fn signer() -> CallbackSigner {
        CallbackSigner::new(SecretString::new(TEST_SECRET.to_string()))
    }

    #[test]
    fn correct_signature_verifies() {
        let signer = signer();
        let sig = signer.compute("order_abc", "pay_123");
        assert!(signer.verify("order_abc", "pay_123", &sig));
    }

    #[test]
    fn single_bit_mutation_fails() {
        let signer = signer();
        let sig = signer.compute("order_abc", "pay_123");

        let mut bytes = hex::decode(&sig).unwrap();
        bytes[0] ^= 0x01;
        let mutated = hex::encode(bytes);

        assert!(!signer.verify("order_abc", "pay_123", &mutated));
    }

    #[test]
    fn signature_is_bound_to_both_ids() {
        let signer = signer();
        let sig = signer.compute("order_abc", "pay_123");
        assert!(!signer.verify("order_abc", "pay_456", &sig));
        assert!(!signer.verify("order_xyz", "pay_123", &sig));
    }

    #[test]
    fn wrong_secret_fails() {
        let sig = signer().compute("order_abc", "pay_123");
        let other = CallbackSigner::new(SecretString::new("other_secret".to_string()));
        assert!(!other.verify("order_abc", "pay_123", &sig));
    }

    #[test]
    fn non_hex_signature_fails_cleanly() {
        assert!(!signer().verify("order_abc", "pay_123", "not-hex!"));
        assert!(!signer().verify("order_abc", "pay_123", ""));
    }
}
