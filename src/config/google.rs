use std::env;

const DEFAULT_CERTS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";

/// Google Sign-In configuration. Absent `GOOGLE_CLIENT_ID` means the
/// Google signup path is disabled and the endpoint answers 400.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub certs_url: String,
}

impl GoogleConfig {
    pub fn from_env() -> Option<Self> {
        let client_id = env::var("GOOGLE_CLIENT_ID").ok()?;
        if client_id.trim().is_empty() {
            return None;
        }

        let certs_url =
            env::var("GOOGLE_CERTS_URL").unwrap_or_else(|_| DEFAULT_CERTS_URL.to_string());

        Some(Self {
            client_id,
            certs_url,
        })
    }
}
