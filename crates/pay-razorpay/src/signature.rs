//! # Checkout Signature Verification
//!
//! Razorpay signs each completed checkout with
//! `HMAC-SHA256(key_secret, "{order_id}|{payment_id}")`, hex-encoded.
//! Recomputing that signature locally and comparing it to the value the
//! browser posted back proves the callback came from Razorpay.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute the expected signature for a completed checkout
pub fn checkout_signature(key_secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(key_secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a supplied signature against the expected one (constant-time)
pub fn verify_checkout_signature(
    key_secret: &str,
    order_id: &str,
    payment_id: &str,
    supplied: &str,
) -> bool {
    let expected = checkout_signature(key_secret, order_id, payment_id);
    constant_time_compare(&expected, supplied)
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_shape() {
        let sig = checkout_signature("secret", "order_abc", "pay_xyz");

        // 32-byte MAC as lowercase hex
        assert_eq!(sig.len(), 64);
        assert!(sig.bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn test_signature_is_deterministic() {
        let a = checkout_signature("secret", "order_abc", "pay_xyz");
        let b = checkout_signature("secret", "order_abc", "pay_xyz");
        assert_eq!(a, b);

        // Any input change produces a different signature
        assert_ne!(a, checkout_signature("other", "order_abc", "pay_xyz"));
        assert_ne!(a, checkout_signature("secret", "order_abd", "pay_xyz"));
        assert_ne!(a, checkout_signature("secret", "order_abc", "pay_xyw"));
    }

    #[test]
    fn test_verify_round_trip() {
        let sig = checkout_signature("secret", "order_abc", "pay_xyz");
        assert!(verify_checkout_signature("secret", "order_abc", "pay_xyz", &sig));
        assert!(!verify_checkout_signature("secret", "order_abc", "pay_xyz", "forged"));

        let mut tampered = sig.clone();
        tampered.replace_range(0..1, if sig.starts_with('0') { "1" } else { "0" });
        assert!(!verify_checkout_signature("secret", "order_abc", "pay_xyz", &tampered));
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc123", "abc123"));
        assert!(!constant_time_compare("abc123", "abc124"));
        assert!(!constant_time_compare("abc", "abcd"));
    }
}
