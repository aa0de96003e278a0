use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::datetime::VcDateTime;
use crate::one_or_many::OneOrMany;
use crate::proof::Proof;

/// A verifiable credential, as far as the verification pipeline needs to
/// understand it.
///
/// Only the members the pipeline reads are typed. Everything else, including
/// the credential subject, rides along in `property_set` and re-serializes
/// exactly as it arrived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    #[serde(rename = "@context")]
    pub context: OneOrMany<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub type_: OneOrMany<String>,
    pub issuer: Issuer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuance_date: Option<VcDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof: Option<OneOrMany<Proof>>,
    #[serde(flatten)]
    pub property_set: BTreeMap<String, Value>,
}

impl Credential {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_value(json: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(json)
    }

    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Identifier of the party that issued this credential.
    pub fn issuer_id(&self) -> &str {
        self.issuer.id()
    }

    /// Every embedded proof, in document order.
    pub fn proofs(&self) -> impl Iterator<Item = &Proof> {
        self.proof.iter().flatten()
    }
}

/// The `issuer` member: either a bare URI or an object carrying an `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Issuer {
    Uri(String),
    Object(ObjectWithId),
}

impl Issuer {
    pub fn id(&self) -> &str {
        match self {
            Self::Uri(uri) => uri,
            Self::Object(object) => &object.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectWithId {
    pub id: String,
    #[serde(flatten)]
    pub property_set: BTreeMap<String, Value>,
}
