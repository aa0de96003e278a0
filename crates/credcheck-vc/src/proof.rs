use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::datetime::VcDateTime;

/// Proof type accepted by the embedded-proof pipeline.
pub const ED25519_SIGNATURE_2020_TYPE: &str = "Ed25519Signature2020";

/// Proof purpose accepted by the embedded-proof pipeline.
pub const ASSERTION_METHOD: &str = "assertionMethod";

/// A Data Integrity proof embedded in a credential.
///
/// Fields the pipeline does not read are preserved verbatim in
/// `property_set` so the proof re-serializes exactly as it arrived. That
/// matters for signing: the proof configuration is hashed as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proof {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<VcDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(flatten)]
    pub property_set: BTreeMap<String, Value>,
}

impl Proof {
    /// A proof of `type_` with every other field empty.
    pub fn new(type_: impl Into<String>) -> Self {
        Self {
            type_: type_.into(),
            created: None,
            verification_method: None,
            proof_purpose: None,
            proof_value: None,
            challenge: None,
            domain: None,
            property_set: BTreeMap::new(),
        }
    }

    pub fn is_type(&self, type_: &str) -> bool {
        self.type_ == type_
    }

    pub fn has_purpose(&self, purpose: &str) -> bool {
        self.proof_purpose.as_deref() == Some(purpose)
    }
}
