//! RSA request signer
//!
//! Produces the detached signature the bank's authorization endpoint expects:
//! PKCS#1 v1.5 padding over a SHA-512 digest, base64-encoded. The key is a
//! PEM file in either PKCS#8 or PKCS#1 encoding. Password-protected keys are
//! not supported.

use std::path::Path;

use anyhow::{Context, Result};
use base64::Engine;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::signature::{SignatureEncoding, Signer};
use rsa::RsaPrivateKey;
use sha2::Sha512;

/// Signature algorithm identifier sent alongside signed requests
pub const SIGNATURE_ALGORITHM: &str = "rsa-sha512";

/// Signs request payloads with an RSA private key
#[derive(Debug)]
pub struct RequestSigner {
    signing_key: SigningKey<Sha512>,
}

impl RequestSigner {
    /// Load the private key from a PEM file
    pub fn from_pem_file(path: &Path) -> Result<Self> {
        let pem = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read private key: {}", path.display()))?;
        Self::from_pem(&pem)
    }

    /// Parse a PEM-encoded private key (PKCS#8 or PKCS#1)
    pub fn from_pem(pem: &str) -> Result<Self> {
        let key = RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .context("Failed to parse RSA private key from PEM")?;

        Ok(Self {
            signing_key: SigningKey::new(key),
        })
    }

    /// Sign a UTF-8 payload, returning the base64-encoded signature
    pub fn sign_payload(&self, payload: &str) -> Result<String> {
        let signature = self
            .signing_key
            .try_sign(payload.as_bytes())
            .context("RSA signing failed")?;

        Ok(base64::engine::general_purpose::STANDARD.encode(signature.to_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use rsa::pkcs1::EncodeRsaPrivateKey;
    use rsa::pkcs1v15::{Signature, VerifyingKey};
    use rsa::pkcs8::{EncodePrivateKey, LineEnding};
    use rsa::signature::Verifier;

    use super::*;

    fn generate_key() -> RsaPrivateKey {
        let mut rng = rand::thread_rng();
        RsaPrivateKey::new(&mut rng, 2048).expect("key generation")
    }

    #[test]
    fn test_sign_and_verify_round_trip() {
        let key = generate_key();
        let pem = key.to_pkcs8_pem(LineEnding::LF).unwrap();
        let signer = RequestSigner::from_pem(&pem).unwrap();

        let payload = r#"{"key":"test-api-key"}"#;
        let encoded = signer.sign_payload(payload).unwrap();

        let raw = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        let signature = Signature::try_from(raw.as_slice()).unwrap();
        let verifying_key = VerifyingKey::<Sha512>::new(key.to_public_key());
        verifying_key
            .verify(payload.as_bytes(), &signature)
            .expect("signature must verify");
    }

    #[test]
    fn test_accepts_pkcs1_pem() {
        let key = generate_key();
        let pem = key.to_pkcs1_pem(LineEnding::LF).unwrap();
        assert!(RequestSigner::from_pem(&pem).is_ok());
    }

    #[test]
    fn test_rejects_invalid_pem() {
        let result = RequestSigner::from_pem("not a pem");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("RSA private key"));
    }

    #[test]
    fn test_missing_key_file() {
        let result = RequestSigner::from_pem_file(Path::new("/nonexistent/key.pem"));
        assert!(result.is_err());
    }
}
