use credcheck_multikey::is_ed25519_multikey;
use iref::IriRefBuf;
use serde_json::Value;

use crate::error::Rejection;
use crate::loader::DocumentLoader;

/// Addressing shapes a verification method URI can take.
///
/// Classification is total: every input maps to exactly one variant or to a
/// typed [`Rejection`], and never depends on anything but the URI itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationMethod {
    /// `<controller>#<publicKeyMultibase>`: the fragment is the key itself.
    FragmentKey {
        controller: String,
        public_key_multibase: String,
    },
    /// `did:key:<publicKeyMultibase>`.
    DidKey { public_key_multibase: String },
    /// An `http(s)` URL naming a key document or a controller document.
    Remote { url: String },
}

/// Key material a verification method resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKey {
    /// Multibase-encoded public key, not yet decoded.
    pub public_key_multibase: String,
    /// Identifier of the key's controller, when the addressing shape names
    /// one. `None` leaves the controller claim unchecked.
    pub controller: Option<String>,
}

/// Classifies a verification method URI into its addressing shape.
pub fn classify(method: &str) -> Result<VerificationMethod, Rejection> {
    let uri = IriRefBuf::new(method.to_owned())
        .map_err(|_| Rejection::MalformedMethod(method.to_owned()))?;

    // A fragment that is itself a well-formed multikey wins over every
    // scheme rule; everything before the '#' names the controller.
    if let Some(fragment) = uri.fragment() {
        if is_ed25519_multikey(fragment.as_str()) {
            let controller = match method.split_once('#') {
                Some((controller, _)) => controller,
                None => "",
            };
            return Ok(VerificationMethod::FragmentKey {
                controller: controller.to_owned(),
                public_key_multibase: fragment.as_str().to_owned(),
            });
        }
    }

    let Some(scheme) = uri.scheme() else {
        return Err(Rejection::MissingScheme(method.to_owned()));
    };

    match scheme.as_str() {
        "did" => {
            // The scheme-specific part is the path plus any query.
            let mut specific = uri.path().as_str().to_owned();
            if let Some(query) = uri.query() {
                specific.push('?');
                specific.push_str(query.as_str());
            }
            match specific.strip_prefix("key:") {
                Some(key) => Ok(VerificationMethod::DidKey {
                    public_key_multibase: key.to_owned(),
                }),
                None => Err(Rejection::UnknownMethod(method.to_owned())),
            }
        }
        "http" | "https" => Ok(VerificationMethod::Remote {
            url: method.to_owned(),
        }),
        other => Err(Rejection::UnknownScheme(other.to_owned())),
    }
}

/// Resolves a classified verification method to key material, fetching
/// remote documents through `loader`.
pub async fn resolve<L>(method: VerificationMethod, loader: &L) -> Result<ResolvedKey, Rejection>
where
    L: DocumentLoader + ?Sized,
{
    match method {
        VerificationMethod::FragmentKey {
            controller,
            public_key_multibase,
        } => Ok(ResolvedKey {
            public_key_multibase,
            controller: Some(controller),
        }),
        VerificationMethod::DidKey {
            public_key_multibase,
        } => Ok(ResolvedKey {
            public_key_multibase,
            controller: None,
        }),
        VerificationMethod::Remote { url } => resolve_remote(&url, loader).await,
    }
}

async fn resolve_remote<L>(url: &str, loader: &L) -> Result<ResolvedKey, Rejection>
where
    L: DocumentLoader + ?Sized,
{
    tracing::debug!(%url, "resolving verification method document");
    let Some(document) = loader.load(url).await? else {
        return Err(Rejection::KeyDocumentNotFound(url.to_owned()));
    };

    match non_blank_str(document.get("controller")) {
        Some(controller) => {
            // Key document: controller and key live at the top level.
            let public_key_multibase = non_blank_str(document.get("publicKeyMultibase"))
                .ok_or_else(|| Rejection::UnparseableKeyDocument(url.to_owned()))?;
            Ok(ResolvedKey {
                public_key_multibase: public_key_multibase.to_owned(),
                controller: Some(controller.to_owned()),
            })
        }
        None => {
            // Controller document: the key hangs off `verificationMethod`.
            let method_object = document
                .get("verificationMethod")
                .and_then(Value::as_object)
                .ok_or_else(|| Rejection::UnparseableKeyDocument(url.to_owned()))?;
            let controller = non_blank_str(method_object.get("controller"))
                .ok_or_else(|| Rejection::UnparseableKeyDocument(url.to_owned()))?;
            let public_key_multibase = non_blank_str(method_object.get("publicKeyMultibase"))
                .ok_or_else(|| Rejection::UnparseableKeyDocument(url.to_owned()))?;
            Ok(ResolvedKey {
                public_key_multibase: public_key_multibase.to_owned(),
                controller: Some(controller.to_owned()),
            })
        }
    }
}

fn non_blank_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}
