//! Payment callback signature (HMAC-SHA256)
//!
//! The gateway signs `"{gateway_order_ref}|{gateway_payment_ref}"` with the
//! shared webhook secret and sends the digest as lowercase hex.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn mac_for(secret: &str, gateway_order_ref: &str, gateway_payment_ref: &str) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(gateway_order_ref.as_bytes());
    mac.update(b"|");
    mac.update(gateway_payment_ref.as_bytes());
    Some(mac)
}

/// Hex signature for a reference pair
pub fn sign(secret: &str, gateway_order_ref: &str, gateway_payment_ref: &str) -> String {
    mac_for(secret, gateway_order_ref, gateway_payment_ref)
        .map(|mac| hex::encode(mac.finalize().into_bytes()))
        .unwrap_or_default()
}

/// Constant-time check of a hex signature
pub fn verify(
    secret: &str,
    gateway_order_ref: &str,
    gateway_payment_ref: &str,
    signature: &str,
) -> bool {
    let Ok(sig_bytes) = hex::decode(signature.trim()) else {
        return false;
    };
    mac_for(secret, gateway_order_ref, gateway_payment_ref)
        .is_some_and(|mac| mac.verify_slice(&sig_bytes).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test";

    #[test]
    fn test_sign_and_verify() {
        let sig = sign(SECRET, "order_abc", "pay_xyz");
        assert_eq!(sig.len(), 64);
        assert!(verify(SECRET, "order_abc", "pay_xyz", &sig));
    }

    #[test]
    fn test_message_is_pipe_joined() {
        let mut mac = HmacSha256::new_from_slice(b"key").unwrap();
        mac.update(b"a|b");
        let expected = hex::encode(mac.finalize().into_bytes());
        assert_eq!(sign("key", "a", "b"), expected);
    }

    #[test]
    fn test_single_bit_flip_rejected() {
        let sig = sign(SECRET, "order_abc", "pay_xyz");
        let mut bytes = hex::decode(&sig).unwrap();
        for i in 0..bytes.len() {
            for bit in 0..8 {
                bytes[i] ^= 1 << bit;
                assert!(!verify(SECRET, "order_abc", "pay_xyz", &hex::encode(&bytes)));
                bytes[i] ^= 1 << bit;
            }
        }
    }

    #[test]
    fn test_wrong_inputs_rejected() {
        let sig = sign(SECRET, "order_abc", "pay_xyz");
        assert!(!verify("other", "order_abc", "pay_xyz", &sig));
        assert!(!verify(SECRET, "order_abd", "pay_xyz", &sig));
        assert!(!verify(SECRET, "order_abc", "pay_xyz", "not-hex"));
        assert!(!verify(SECRET, "order_abc", "pay_xyz", ""));
    }
}
