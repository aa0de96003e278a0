use async_trait::async_trait;
use credcheck_core::{Check, Outcome};
use credcheck_multikey::{decode_multikey, MultikeyError};

use crate::credential::Credential;
use crate::error::Rejection;
use crate::loader::DocumentLoader;
use crate::method::{self, ResolvedKey};
use crate::proof::{Proof, ASSERTION_METHOD, ED25519_SIGNATURE_2020_TYPE};
use crate::suite::SignatureSuite;

/// Verifies a credential's embedded `Ed25519Signature2020` proof.
///
/// The pipeline runs five stages, each terminating the check with a precise
/// reason on failure: select the proof, resolve its verification method,
/// decode the key, match the key's controller against the issuer, verify the
/// signature. Only a breakdown of the signature machinery itself escalates
/// past rejection to a fatal outcome.
pub struct EmbeddedProofCheck<L, S> {
    loader: L,
    suite: S,
}

impl<L, S> EmbeddedProofCheck<L, S> {
    pub fn new(loader: L, suite: S) -> Self {
        Self { loader, suite }
    }
}

impl<L, S> EmbeddedProofCheck<L, S>
where
    L: DocumentLoader,
    S: SignatureSuite,
{
    /// Runs the full pipeline once against `credential`.
    pub async fn run(&self, credential: &Credential) -> Outcome {
        match self.verify(credential).await {
            Ok(outcome) => outcome,
            Err(rejection) => Outcome::rejected(rejection),
        }
    }

    async fn verify(&self, credential: &Credential) -> Result<Outcome, Rejection> {
        let proof = select_proof(credential)?;
        let shape = method::classify(verification_method(proof)?)?;
        let resolved = method::resolve(shape, &self.loader).await?;
        let public_key = decode_key(&resolved)?;
        match_controller(credential, &resolved)?;

        match self.suite.verify(&public_key, credential, proof) {
            Ok(true) => Ok(Outcome::Success),
            Ok(false) => Err(Rejection::SignatureMismatch),
            Err(error) => Ok(Outcome::fatal(format!(
                "embedded proof verification failed: {error}"
            ))),
        }
    }
}

/// First proof carrying the accepted type and purpose, in document order.
fn select_proof(credential: &Credential) -> Result<&Proof, Rejection> {
    let mut proofs = credential.proofs().peekable();
    if proofs.peek().is_none() {
        return Err(Rejection::MissingProof);
    }
    proofs
        .find(|proof| {
            proof.is_type(ED25519_SIGNATURE_2020_TYPE) && proof.has_purpose(ASSERTION_METHOD)
        })
        .ok_or(Rejection::NoMatchingProof {
            expected_type: ED25519_SIGNATURE_2020_TYPE,
            expected_purpose: ASSERTION_METHOD,
        })
}

fn verification_method(proof: &Proof) -> Result<&str, Rejection> {
    proof
        .verification_method
        .as_deref()
        .ok_or(Rejection::MissingVerificationMethod)
}

fn decode_key(resolved: &ResolvedKey) -> Result<[u8; 32], Rejection> {
    match decode_multikey(&resolved.public_key_multibase) {
        Ok(key) => Ok(key),
        Err(error @ (MultikeyError::Multibase(_) | MultikeyError::Varint(_))) => {
            Err(Rejection::InvalidPublicKey(error))
        }
        Err(MultikeyError::UnexpectedCodec(_) | MultikeyError::InvalidLength(_)) => {
            Err(Rejection::NotAnEd25519Key)
        }
    }
}

/// A resolved controller must be the credential's issuer; methods that name
/// no controller leave the claim unchecked.
fn match_controller(credential: &Credential, resolved: &ResolvedKey) -> Result<(), Rejection> {
    match &resolved.controller {
        Some(controller) if controller != credential.issuer_id() => {
            Err(Rejection::ControllerMismatch {
                issuer: credential.issuer_id().to_owned(),
            })
        }
        _ => Ok(()),
    }
}

#[async_trait]
impl<L, S> Check for EmbeddedProofCheck<L, S>
where
    L: DocumentLoader,
    S: SignatureSuite,
{
    type Subject = Credential;

    fn id(&self) -> &'static str {
        "embedded-proof"
    }

    async fn run(&self, subject: &Credential) -> Outcome {
        EmbeddedProofCheck::run(self, subject).await
    }
}
