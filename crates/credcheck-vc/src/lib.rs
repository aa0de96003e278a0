//! Embedded-proof verification for W3C Verifiable Credentials.
//!
//! The centerpiece is [`EmbeddedProofCheck`], which verifies a credential's
//! `Ed25519Signature2020` proof end to end: proof selection, verification
//! method resolution (inline fragment keys, `did:key`, or fetched key and
//! controller documents), multikey decoding, controller/issuer matching, and
//! the signature itself. [`CompactionCheck`] separately confirms the
//! credential survives JSON-LD compaction.
//!
//! Both checks report through [`credcheck_core::Outcome`]: rejections carry
//! the exact reason a credential was refused, and only a breakdown of the
//! verification machinery itself is fatal.

pub mod check;
pub mod credential;
mod datetime;
pub mod error;
pub mod loader;
pub mod method;
mod one_or_many;
pub mod proof;
pub mod suite;

pub use check::{CompactionCheck, CompactionError, EmbeddedProofCheck, JsonLdCompactor};
pub use credential::{Credential, Issuer, ObjectWithId};
pub use datetime::VcDateTime;
pub use error::Rejection;
#[cfg(feature = "http")]
pub use loader::HttpDocumentLoader;
pub use loader::{DocumentLoader, LoaderError, StaticDocumentLoader};
pub use method::{ResolvedKey, VerificationMethod};
pub use one_or_many::OneOrMany;
pub use proof::{Proof, ASSERTION_METHOD, ED25519_SIGNATURE_2020_TYPE};
pub use suite::{
    Canonicalizer, Ed25519Signature2020, JcsCanonicalizer, SignatureError, SignatureSuite,
};
