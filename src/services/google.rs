use crate::{
    config::google::GoogleConfig,
    error::{AppError, AppResult},
};
use anyhow::Context;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

/// Verified claims from a Google ID token. Signature, audience, issuer
/// and expiry have already been checked when this is handed out.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleClaims {
    pub email: String,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Jwks {
    keys: Vec<Jwk>,
}

#[derive(Debug, Deserialize)]
struct Jwk {
    kid: String,
    n: String,
    e: String,
}

/// Verifies Google-issued ID tokens against the provider's published
/// signing keys. The JWKS endpoint is refetched per verification; the
/// signup path is rare enough that key caching is not worth the staleness
/// handling.
#[derive(Clone)]
pub struct GoogleTokenVerifier {
    config: GoogleConfig,
    http: reqwest::Client,
}

impl GoogleTokenVerifier {
    pub fn new(config: GoogleConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Verify an ID token and return its payload claims.
    ///
    /// Any failure attributable to the token itself (garbled JWS, unknown
    /// key id, bad signature, wrong audience or issuer, expired) maps to
    /// `Unauthorized`; a JWKS fetch failure is an internal error.
    pub async fn verify(&self, token: &str) -> AppResult<GoogleClaims> {
        let header = decode_header(token).map_err(|_| AppError::Unauthorized)?;
        let kid = header.kid.ok_or(AppError::Unauthorized)?;

        let jwks = self.fetch_jwks().await?;
        let jwk = jwks
            .keys
            .into_iter()
            .find(|k| k.kid == kid)
            .ok_or(AppError::Unauthorized)?;

        let key =
            DecodingKey::from_rsa_components(&jwk.n, &jwk.e).map_err(|_| AppError::Unauthorized)?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.config.client_id.as_str()]);
        validation.set_issuer(&["https://accounts.google.com", "accounts.google.com"]);

        let data =
            decode::<GoogleClaims>(token, &key, &validation).map_err(|_| AppError::Unauthorized)?;
        Ok(data.claims)
    }

    async fn fetch_jwks(&self) -> AppResult<Jwks> {
        let response = self
            .http
            .get(&self.config.certs_url)
            .send()
            .await
            .context("Failed to fetch Google signing keys")?;
        let jwks = response
            .error_for_status()
            .context("Google signing key endpoint returned an error")?
            .json::<Jwks>()
            .await
            .context("Failed to parse Google signing keys")?;
        Ok(jwks)
    }
}
