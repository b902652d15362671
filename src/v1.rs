//! OAuth 1.0a (RFC 5849) request signing with HMAC-SHA1.

mod signer;
mod values;

pub use signer::{sign_hmac_sha1, signature_base_string, signing_key, SignedContent, Signer};
pub use values::*;

use std::fmt;

/// Consumer and access token pair used to sign every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_token: String,
    access_token_secret: String,
    consumer_key: String,
    consumer_secret: String,
}

impl Credentials {
    /// An access token without secret is passed as an empty `access_token_secret`.
    pub fn new(
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> Self {
        Credentials {
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn access_token_secret(&self) -> &str {
        &self.access_token_secret
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }
}

// never print secrets
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &self.access_token)
            .field("access_token_secret", &"[REDACTED]")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .finish()
    }
}

#[test]
fn test_credentials_debug_redacts_secrets() {
    let credentials = Credentials::new("token", "token-secret", "ck", "consumer-secret");
    let printed = format!("{:?}", credentials);
    assert!(printed.contains("token"));
    assert!(printed.contains("ck"));
    assert!(!printed.contains("token-secret"));
    assert!(!printed.contains("consumer-secret"));
}
