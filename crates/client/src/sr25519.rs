// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Schnorr signatures over Ristretto255 as used by Substrate accounts.

use crate::error::CryptoError;
use schnorrkel::{ExpansionMode, MiniSecretKey, PublicKey, SecretKey, Signature, signing_context};
use std::fmt;

/// Signing context label shared with the runtime.
pub const SIGNING_CONTEXT: &[u8] = b"substrate";

pub const SEED_LEN: usize = 32;
pub const EXPANDED_LEN: usize = 64;

/// An sr25519 key pair. Secret material is wiped when dropped.
#[derive(Clone)]
pub struct Keypair {
    inner: schnorrkel::Keypair,
}

impl Keypair {
    /// Expands a 32 byte mini secret the way Substrate derives account keys.
    pub fn from_seed(seed: &[u8; SEED_LEN]) -> Result<Self, CryptoError> {
        let mini = MiniSecretKey::from_bytes(seed)
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        Ok(Self {
            inner: mini.expand_to_keypair(ExpansionMode::Ed25519),
        })
    }

    /// Uses a 64 byte `scalar ++ nonce` secret as is.
    pub fn from_expanded(secret: &[u8; EXPANDED_LEN]) -> Result<Self, CryptoError> {
        let secret =
            SecretKey::from_bytes(secret).map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        Ok(Self {
            inner: secret.to_keypair(),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        match bytes.len() {
            SEED_LEN => {
                let mut seed = [0u8; SEED_LEN];
                seed.copy_from_slice(bytes);
                Self::from_seed(&seed)
            }
            EXPANDED_LEN => {
                let mut secret = [0u8; EXPANDED_LEN];
                secret.copy_from_slice(bytes);
                Self::from_expanded(&secret)
            }
            other => Err(CryptoError::InvalidKeyLength(other)),
        }
    }

    pub fn generate() -> Self {
        Self {
            inner: schnorrkel::Keypair::generate(),
        }
    }

    pub fn public(&self) -> [u8; 32] {
        self.inner.public.to_bytes()
    }

    /// Signs `message` and checks the result against our own public key
    /// before handing it out.
    pub fn sign(&self, message: &[u8]) -> Result<[u8; 64], CryptoError> {
        let signature = self
            .inner
            .sign(signing_context(SIGNING_CONTEXT).bytes(message));
        self_verify(&self.inner.public, message, &signature)?;
        Ok(signature.to_bytes())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let public = format!("0x{}", hex::encode(self.public()));
        f.debug_struct("Keypair")
            .field("public", &public)
            .finish_non_exhaustive()
    }
}

fn self_verify(public: &PublicKey, message: &[u8], signature: &Signature) -> Result<(), CryptoError> {
    public
        .verify_simple(SIGNING_CONTEXT, message, signature)
        .map_err(|e| {
            tracing::error!(error = %e, "Freshly produced signature failed verification");
            CryptoError::SelfVerificationFailed
        })
}

/// Checks `signature` over `message` for `public`.
pub fn verify(public: &[u8; 32], message: &[u8], signature: &[u8; 64]) -> Result<(), CryptoError> {
    let public =
        PublicKey::from_bytes(public).map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
    let signature = Signature::from_bytes(signature)
        .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
    public
        .verify_simple(SIGNING_CONTEXT, message, &signature)
        .map_err(|_| CryptoError::VerificationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: [u8; 32] = [42; 32];

    #[test]
    fn test_sign_then_verify() {
        let keys = Keypair::from_seed(&SEED).unwrap();
        let message = b"transfer 500 to bob";
        let signature = keys.sign(message).unwrap();
        verify(&keys.public(), message, &signature).unwrap();
    }

    #[test]
    fn test_seed_is_deterministic() {
        let a = Keypair::from_seed(&SEED).unwrap();
        let b = Keypair::from_bytes(&SEED).unwrap();
        assert_eq!(a.public(), b.public());
        assert_ne!(a.public(), Keypair::from_seed(&[7; 32]).unwrap().public());
    }

    #[test]
    fn test_signatures_are_randomised() {
        let keys = Keypair::from_seed(&SEED).unwrap();
        assert_ne!(keys.sign(b"m").unwrap(), keys.sign(b"m").unwrap());
    }

    #[test]
    fn test_flipped_message_bit_fails() {
        let keys = Keypair::from_seed(&SEED).unwrap();
        let message = b"payload".to_vec();
        let signature = keys.sign(&message).unwrap();

        for bit in 0..message.len() * 8 {
            let mut tampered = message.clone();
            tampered[bit / 8] ^= 1 << (bit % 8);
            assert!(verify(&keys.public(), &tampered, &signature).is_err());
        }
    }

    #[test]
    fn test_flipped_signature_bit_fails() {
        let keys = Keypair::from_seed(&SEED).unwrap();
        let signature = keys.sign(b"payload").unwrap();

        for bit in 0..64 * 8 {
            let mut tampered = signature;
            tampered[bit / 8] ^= 1 << (bit % 8);
            assert!(verify(&keys.public(), b"payload", &tampered).is_err());
        }
    }

    #[test]
    fn test_wrong_public_key_fails() {
        let keys = Keypair::from_seed(&SEED).unwrap();
        let other = Keypair::generate();
        let signature = keys.sign(b"payload").unwrap();
        assert!(matches!(
            verify(&other.public(), b"payload", &signature),
            Err(CryptoError::VerificationFailed)
        ));
    }

    #[test]
    fn test_self_verification_rejects_foreign_signature() {
        let keys = Keypair::from_seed(&SEED).unwrap();
        let other = Keypair::generate();
        let signature = other
            .inner
            .sign(signing_context(SIGNING_CONTEXT).bytes(b"payload"));
        assert!(matches!(
            self_verify(&keys.inner.public, b"payload", &signature),
            Err(CryptoError::SelfVerificationFailed)
        ));
    }

    #[test]
    fn test_expanded_key_round_trip() {
        let keys = Keypair::from_seed(&SEED).unwrap();
        let expanded = keys.inner.secret.to_bytes();
        let restored = Keypair::from_expanded(&expanded).unwrap();
        assert_eq!(restored.public(), keys.public());

        let signature = restored.sign(b"m").unwrap();
        verify(&keys.public(), b"m", &signature).unwrap();
    }

    #[test]
    fn test_invalid_key_length() {
        assert!(matches!(
            Keypair::from_bytes(&[1; 33]),
            Err(CryptoError::InvalidKeyLength(33))
        ));
    }

    #[test]
    fn test_context_is_bound() {
        let keys = Keypair::from_seed(&SEED).unwrap();
        let signature = keys
            .inner
            .sign(signing_context(b"other").bytes(b"payload"))
            .to_bytes();
        assert!(verify(&keys.public(), b"payload", &signature).is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let keys = Keypair::from_seed(&SEED).unwrap();
        let printed = format!("{:?}", keys);
        assert!(printed.contains(&hex::encode(keys.public())));
        assert!(!printed.contains("secret"));
    }
}
