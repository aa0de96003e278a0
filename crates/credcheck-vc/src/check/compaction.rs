use async_trait::async_trait;
use credcheck_core::{Check, Outcome};
use serde_json::Value;

use crate::credential::Credential;

/// Error raised by a [`JsonLdCompactor`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct CompactionError(String);

impl CompactionError {
    pub fn new(message: impl ToString) -> Self {
        Self(message.to_string())
    }
}

/// JSON-LD compaction service.
///
/// Compaction itself happens outside this workspace; implementations wrap
/// whatever JSON-LD processor the deployment already carries.
#[async_trait]
pub trait JsonLdCompactor: Send + Sync {
    async fn compact(&self, document: &Value, context: &str) -> Result<Value, CompactionError>;
}

/// Confirms the credential survives JSON-LD compaction against a fixed
/// context.
///
/// A document the processor cannot handle at all is a breakdown, not a
/// property of the credential, so failures here are fatal. A compacted `id`
/// differing from the identifier the credential was fetched under is
/// deliberately not reconciled here.
pub struct CompactionCheck<P> {
    compactor: P,
    context: String,
}

impl<P> CompactionCheck<P> {
    pub fn new(compactor: P, context: impl Into<String>) -> Self {
        Self {
            compactor,
            context: context.into(),
        }
    }
}

impl<P: JsonLdCompactor> CompactionCheck<P> {
    pub async fn run(&self, credential: &Credential) -> Outcome {
        let document = match credential.to_json() {
            Ok(document) => document,
            Err(error) => {
                return Outcome::fatal(format!("error while parsing credential: {error}"))
            }
        };
        match self.compactor.compact(&document, &self.context).await {
            Ok(_) => Outcome::Success,
            Err(error) => Outcome::fatal(format!("error while parsing credential: {error}")),
        }
    }
}

#[async_trait]
impl<P: JsonLdCompactor> Check for CompactionCheck<P> {
    type Subject = Credential;

    fn id(&self) -> &'static str {
        "json-ld-compaction"
    }

    async fn run(&self, subject: &Credential) -> Outcome {
        CompactionCheck::run(self, subject).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoCompactor;

    #[async_trait]
    impl JsonLdCompactor for EchoCompactor {
        async fn compact(&self, document: &Value, _context: &str) -> Result<Value, CompactionError> {
            Ok(document.clone())
        }
    }

    struct BrokenCompactor;

    #[async_trait]
    impl JsonLdCompactor for BrokenCompactor {
        async fn compact(&self, _document: &Value, _context: &str) -> Result<Value, CompactionError> {
            Err(CompactionError::new("remote context unreachable"))
        }
    }

    fn credential() -> Credential {
        Credential::from_json(
            r#"{
                "@context": "https://www.w3.org/2018/credentials/v1",
                "type": "VerifiableCredential",
                "issuer": "did:example:issuer"
            }"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn compactable_credential_passes() {
        let check = CompactionCheck::new(EchoCompactor, "https://www.w3.org/2018/credentials/v1");
        assert!(check.run(&credential()).await.is_success());
    }

    #[tokio::test]
    async fn processor_failure_is_fatal() {
        let check = CompactionCheck::new(BrokenCompactor, "https://www.w3.org/2018/credentials/v1");
        let outcome = check.run(&credential()).await;
        assert!(outcome.is_fatal());
        assert_eq!(
            outcome.reason(),
            Some("error while parsing credential: remote context unreachable")
        );
    }
}
