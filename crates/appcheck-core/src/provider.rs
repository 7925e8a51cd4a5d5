//! Attestation providers
//!
//! A provider is either challenge-based (a reCAPTCHA v3 site key) or backed
//! by a custom token source. Callers branch on [`ProviderKind`], never on the
//! concrete provider type.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::ChallengeError;

/// Capability discriminant exposed by every provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind<'a> {
    /// Site-key challenge; the challenge flow must be initialized on activation
    SiteKeyChallenge {
        /// Public site key for the challenge
        site_key: &'a str,
    },
    /// Tokens come from an app-supplied source; nothing to initialize
    CustomToken,
}

impl ProviderKind<'_> {
    /// Short label used in logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::SiteKeyChallenge { .. } => "recaptcha-v3",
            Self::CustomToken => "custom",
        }
    }
}

/// A collaborator able to prove app authenticity.
pub trait AttestationProvider: fmt::Debug + Send + Sync {
    /// Which capability this provider offers
    fn kind(&self) -> ProviderKind<'_>;
}

/// reCAPTCHA v3 site-key provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReCaptchaV3Provider {
    site_key: String,
}

impl ReCaptchaV3Provider {
    /// Create a provider for the given site key
    pub fn new(site_key: impl Into<String>) -> Self {
        Self {
            site_key: site_key.into(),
        }
    }

    /// Public site key
    pub fn site_key(&self) -> &str {
        &self.site_key
    }
}

impl AttestationProvider for ReCaptchaV3Provider {
    fn kind(&self) -> ProviderKind<'_> {
        ProviderKind::SiteKeyChallenge {
            site_key: &self.site_key,
        }
    }
}

/// Token minted by an app-supplied source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomToken {
    /// Raw attestation token
    pub token: String,
    /// Expiry as milliseconds since the Unix epoch
    pub expire_time_millis: u64,
}

/// App-supplied source of attestation tokens.
#[async_trait]
pub trait CustomTokenSource: Send + Sync {
    /// Produce a fresh token
    async fn get_token(&self) -> Result<CustomToken, ChallengeError>;
}

/// Provider backed by a [`CustomTokenSource`].
#[derive(Clone)]
pub struct CustomProvider {
    source: Arc<dyn CustomTokenSource>,
}

impl CustomProvider {
    /// Wrap a token source
    pub fn new(source: Arc<dyn CustomTokenSource>) -> Self {
        Self { source }
    }

    /// Ask the source for a token
    pub async fn get_token(&self) -> Result<CustomToken, ChallengeError> {
        self.source.get_token().await
    }
}

impl fmt::Debug for CustomProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomProvider").finish_non_exhaustive()
    }
}

impl AttestationProvider for CustomProvider {
    fn kind(&self) -> ProviderKind<'_> {
        ProviderKind::CustomToken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedToken;

    #[async_trait]
    impl CustomTokenSource for FixedToken {
        async fn get_token(&self) -> Result<CustomToken, ChallengeError> {
            Ok(CustomToken {
                token: "fake-custom-token".to_string(),
                expire_time_millis: 1,
            })
        }
    }

    #[test]
    fn recaptcha_provider_exposes_site_key() {
        let provider = ReCaptchaV3Provider::new("site-key");
        assert_eq!(
            provider.kind(),
            ProviderKind::SiteKeyChallenge {
                site_key: "site-key"
            }
        );
        assert_eq!(provider.kind().label(), "recaptcha-v3");
    }

    #[tokio::test]
    async fn custom_provider_delegates_to_source() {
        let provider = CustomProvider::new(Arc::new(FixedToken));
        assert_eq!(provider.kind(), ProviderKind::CustomToken);
        let token = provider.get_token().await.unwrap();
        assert_eq!(token.token, "fake-custom-token");
    }
}
