use ed25519_dalek::{Signer, Verifier};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::credential::Credential;
use crate::proof::Proof;

/// Error from a signature suite.
///
/// Anything behind this error prevented verification from completing, so the
/// pipeline escalates it to a fatal outcome. A signature that simply does
/// not match is not an error; suites report that as `Ok(false)`.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("the proof has no proof value")]
    MissingProofValue,

    #[error("malformed proof value: {0}")]
    MalformedProofValue(#[from] multibase::Error),

    #[error("invalid signature length {0}, expected 64 bytes")]
    InvalidSignatureLength(usize),

    #[error("invalid verifying key: {0}")]
    InvalidVerifyingKey(ed25519_dalek::SignatureError),

    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    #[error("cannot serialize the document: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error from a [`Canonicalizer`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct CanonicalizationError(String);

impl CanonicalizationError {
    pub fn new(message: impl ToString) -> Self {
        Self(message.to_string())
    }
}

/// Produces the canonical byte form of a JSON document for hashing.
///
/// RDF canonicalization (URDNA2015) lives outside this workspace; callers
/// that need it implement this trait over their JSON-LD stack.
/// [`JcsCanonicalizer`] covers deployments that sign the JCS form.
pub trait Canonicalizer: Send + Sync {
    fn canonicalize(&self, document: &Value) -> Result<String, CanonicalizationError>;
}

/// RFC 8785 JSON Canonicalization Scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct JcsCanonicalizer;

impl Canonicalizer for JcsCanonicalizer {
    fn canonicalize(&self, document: &Value) -> Result<String, CanonicalizationError> {
        serde_jcs::to_string(document).map_err(CanonicalizationError::new)
    }
}

/// Signature primitive behind the embedded-proof pipeline.
pub trait SignatureSuite: Send + Sync {
    /// Verifies `proof` over `credential` with the given public key.
    ///
    /// `Ok(true)` is a verified signature and `Ok(false)` a clean mismatch;
    /// `Err` is reserved for failures of the process itself.
    fn verify(
        &self,
        public_key: &[u8; 32],
        credential: &Credential,
        proof: &Proof,
    ) -> Result<bool, SignatureError>;
}

/// The `Ed25519Signature2020` cryptosuite.
///
/// The signing input is SHA-256 of the canonical proof configuration
/// followed by SHA-256 of the canonical document, where the configuration is
/// the proof without its `proofValue` and the document is the credential
/// without its `proof`.
pub struct Ed25519Signature2020<C> {
    canonicalizer: C,
}

impl<C> Ed25519Signature2020<C> {
    pub fn new(canonicalizer: C) -> Self {
        Self { canonicalizer }
    }
}

impl<C: Canonicalizer> Ed25519Signature2020<C> {
    /// Signs `credential` under `proof`'s configuration, returning the
    /// multibase-encoded proof value.
    pub fn sign(
        &self,
        signing_key: &ed25519_dalek::SigningKey,
        credential: &Credential,
        proof: &Proof,
    ) -> Result<String, SignatureError> {
        let input = self.signing_input(credential, proof)?;
        let signature = signing_key.sign(&input);
        Ok(multibase::encode(
            multibase::Base::Base58Btc,
            signature.to_bytes(),
        ))
    }

    fn signing_input(
        &self,
        credential: &Credential,
        proof: &Proof,
    ) -> Result<[u8; 64], SignatureError> {
        let mut document = serde_json::to_value(credential)?;
        if let Some(object) = document.as_object_mut() {
            object.remove("proof");
        }

        let mut configuration = serde_json::to_value(proof)?;
        if let Some(object) = configuration.as_object_mut() {
            object.remove("proofValue");
        }

        let configuration_digest =
            Sha256::digest(self.canonicalizer.canonicalize(&configuration)?.as_bytes());
        let document_digest =
            Sha256::digest(self.canonicalizer.canonicalize(&document)?.as_bytes());

        let mut input = [0u8; 64];
        input[..32].copy_from_slice(&configuration_digest);
        input[32..].copy_from_slice(&document_digest);
        Ok(input)
    }
}

impl<C: Canonicalizer> SignatureSuite for Ed25519Signature2020<C> {
    fn verify(
        &self,
        public_key: &[u8; 32],
        credential: &Credential,
        proof: &Proof,
    ) -> Result<bool, SignatureError> {
        let proof_value = proof
            .proof_value
            .as_deref()
            .ok_or(SignatureError::MissingProofValue)?;
        let (_base, signature_bytes) = multibase::decode(proof_value)?;
        let signature_bytes: [u8; 64] = signature_bytes
            .as_slice()
            .try_into()
            .map_err(|_| SignatureError::InvalidSignatureLength(signature_bytes.len()))?;
        let signature = ed25519_dalek::Signature::from_bytes(&signature_bytes);

        let verifying_key = ed25519_dalek::VerifyingKey::from_bytes(public_key)
            .map_err(SignatureError::InvalidVerifyingKey)?;

        let input = self.signing_input(credential, proof)?;
        Ok(verifying_key.verify(&input, &signature).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::Credential;
    use crate::proof::Proof;
    use ed25519_dalek::SigningKey;

    fn credential() -> Credential {
        Credential::from_json(
            r#"{
                "@context": "https://www.w3.org/2018/credentials/v1",
                "type": "VerifiableCredential",
                "issuer": "did:example:issuer",
                "credentialSubject": {"id": "did:example:subject"}
            }"#,
        )
        .unwrap()
    }

    fn assertion_proof() -> Proof {
        let mut proof = Proof::new(crate::proof::ED25519_SIGNATURE_2020_TYPE);
        proof.proof_purpose = Some(crate::proof::ASSERTION_METHOD.to_string());
        proof.verification_method = Some("did:key:z6Mk".to_string());
        proof
    }

    #[test]
    fn sign_then_verify() {
        let signing_key = SigningKey::from_bytes(&[11u8; 32]);
        let suite = Ed25519Signature2020::new(JcsCanonicalizer);
        let credential = credential();

        let mut proof = assertion_proof();
        proof.proof_value = Some(suite.sign(&signing_key, &credential, &proof).unwrap());

        let public_key = signing_key.verifying_key().to_bytes();
        assert!(suite.verify(&public_key, &credential, &proof).unwrap());
    }

    #[test]
    fn tampered_document_fails_cleanly() {
        let signing_key = SigningKey::from_bytes(&[11u8; 32]);
        let suite = Ed25519Signature2020::new(JcsCanonicalizer);
        let mut credential = credential();

        let mut proof = assertion_proof();
        proof.proof_value = Some(suite.sign(&signing_key, &credential, &proof).unwrap());

        credential.issuer = crate::credential::Issuer::Uri("did:example:mallory".to_string());
        let public_key = signing_key.verifying_key().to_bytes();
        assert!(!suite.verify(&public_key, &credential, &proof).unwrap());
    }

    #[test]
    fn wrong_key_fails_cleanly() {
        let signing_key = SigningKey::from_bytes(&[11u8; 32]);
        let other_key = SigningKey::from_bytes(&[12u8; 32]);
        let suite = Ed25519Signature2020::new(JcsCanonicalizer);
        let credential = credential();

        let mut proof = assertion_proof();
        proof.proof_value = Some(suite.sign(&signing_key, &credential, &proof).unwrap());

        let public_key = other_key.verifying_key().to_bytes();
        assert!(!suite.verify(&public_key, &credential, &proof).unwrap());
    }

    #[test]
    fn missing_proof_value_is_an_error() {
        let suite = Ed25519Signature2020::new(JcsCanonicalizer);
        let outcome = suite.verify(&[0u8; 32], &credential(), &assertion_proof());
        assert!(matches!(outcome, Err(SignatureError::MissingProofValue)));
    }

    #[test]
    fn malformed_proof_value_is_an_error() {
        let suite = Ed25519Signature2020::new(JcsCanonicalizer);
        let mut proof = assertion_proof();
        proof.proof_value = Some("not-multibase".to_string());
        assert!(matches!(
            suite.verify(&[0u8; 32], &credential(), &proof),
            Err(SignatureError::MalformedProofValue(_))
        ));
    }

    #[test]
    fn short_signature_is_an_error() {
        let suite = Ed25519Signature2020::new(JcsCanonicalizer);
        let mut proof = assertion_proof();
        proof.proof_value = Some(multibase::encode(multibase::Base::Base58Btc, [1u8; 63]));
        assert!(matches!(
            suite.verify(&[0u8; 32], &credential(), &proof),
            Err(SignatureError::InvalidSignatureLength(63))
        ));
    }
}
