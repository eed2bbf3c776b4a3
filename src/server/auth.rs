// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use axum::http::HeaderMap;
use std::collections::HashSet;
use std::sync::Arc;

use crate::config::AddinConfig;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Decides whether a request may reach the rate fetcher.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, headers: &HeaderMap) -> bool;
}

/// Accepts requests carrying one of the configured keys in `x-api-key`.
#[derive(Debug, Clone, Default)]
pub struct ApiKeyVerifier {
    keys: HashSet<String>,
}

impl ApiKeyVerifier {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }
}

impl CredentialVerifier for ApiKeyVerifier {
    fn verify(&self, headers: &HeaderMap) -> bool {
        headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|key| self.keys.contains(key))
    }
}

/// Used when `addin.require_api_key` is off.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl CredentialVerifier for AllowAll {
    fn verify(&self, _headers: &HeaderMap) -> bool {
        true
    }
}

pub fn verifier_from_config(config: &AddinConfig) -> Arc<dyn CredentialVerifier> {
    if config.require_api_key {
        Arc::new(ApiKeyVerifier::new(config.api_keys.iter().cloned()))
    } else {
        Arc::new(AllowAll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_key(key: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_str(key).unwrap());
        headers
    }

    #[test]
    fn test_api_key_verifier() {
        let verifier = ApiKeyVerifier::new(["secret"]);
        assert!(verifier.verify(&headers_with_key("secret")));
        assert!(!verifier.verify(&headers_with_key("guess")));
        assert!(!verifier.verify(&HeaderMap::new()));
    }

    #[test]
    fn test_no_configured_keys_rejects_everything() {
        let verifier = verifier_from_config(&AddinConfig::default());
        assert!(!verifier.verify(&headers_with_key("")));
        assert!(!verifier.verify(&HeaderMap::new()));
    }

    #[test]
    fn test_auth_disabled_allows_all() {
        let config = AddinConfig {
            require_api_key: false,
            ..AddinConfig::default()
        };
        assert!(verifier_from_config(&config).verify(&HeaderMap::new()));
    }
}
