use credcheck_multikey::MultikeyError;

use crate::loader::LoaderError;

/// Why the embedded-proof pipeline refused a credential.
///
/// Every variant renders to the reason string reported to the caller, and
/// every stage of the pipeline maps its failure to exactly one variant.
/// Rejections describe the credential; failures of the verification process
/// itself are escalated separately as fatal outcomes.
#[derive(Debug, thiserror::Error)]
pub enum Rejection {
    #[error("the credential is missing a proof")]
    MissingProof,

    #[error("no proof with type \"{expected_type}\" and proof purpose \"{expected_purpose}\" found")]
    NoMatchingProof {
        expected_type: &'static str,
        expected_purpose: &'static str,
    },

    #[error("the proof is missing a verification method")]
    MissingVerificationMethod,

    #[error("the verification method must be a valid URI: {0}")]
    MalformedMethod(String),

    #[error("the verification method must be a valid URI (missing scheme): {0}")]
    MissingScheme(String),

    /// A `did:` method other than `did:key`.
    #[error("unknown verification method: {0}")]
    UnknownMethod(String),

    /// An absolute URI in a scheme the pipeline has no resolver for.
    #[error("unknown verification method scheme: {0}")]
    UnknownScheme(String),

    /// The document loader failed; its message names the transport problem.
    #[error("invalid verification key URL: {0}")]
    Loader(#[from] LoaderError),

    #[error("key document not found at {0}")]
    KeyDocumentNotFound(String),

    /// The document exists but the expected members are missing or blank.
    #[error("cannot parse key document from {0}")]
    UnparseableKeyDocument(String),

    /// The `publicKeyMultibase` value is not decodable at all.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(MultikeyError),

    /// The value decodes, but not to an Ed25519 public key.
    #[error("verification method does not contain an Ed25519 public key")]
    NotAnEd25519Key,

    #[error("key controller does not match issuer: {issuer}")]
    ControllerMismatch { issuer: String },

    /// The signature is well-formed but does not verify.
    #[error("embedded proof verification failed")]
    SignatureMismatch,
}
