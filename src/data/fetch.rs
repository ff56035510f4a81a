//! Model artifact fetch over HTTP.
//!
//! The artifact lives at a fixed URL and is fetched exactly once, at process
//! start. There is no retry, no authentication, and no content negotiation:
//! the fetch either yields a usable model or the process exits.

use reqwest::blocking::Client;

use crate::model::{GbdtModel, ModelLoadError};

/// Built-in artifact location, used when neither `--model-url` nor the
/// `MODEL_URL` environment variable is set.
pub const DEFAULT_MODEL_URL: &str =
    "https://huggingface.co/datasets/ioakowuah/HousingPricePrediction/resolve/main/XGBRegressor.json";

/// Fetches the pretrained model artifact.
#[derive(Debug)]
pub struct ModelClient {
    client: Client,
    url: String,
}

impl ModelClient {
    /// Resolve the artifact URL and build a client.
    ///
    /// Precedence: explicit flag, then `MODEL_URL` (a `.env` file is
    /// honored), then the built-in default.
    pub fn from_env(url_flag: Option<&str>) -> Self {
        dotenvy::dotenv().ok();
        let url = url_flag
            .map(str::to_string)
            .or_else(|| std::env::var("MODEL_URL").ok())
            .unwrap_or_else(|| DEFAULT_MODEL_URL.to_string());
        Self {
            client: Client::new(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and decode the model artifact. One attempt; the caller treats
    /// any failure as fatal.
    pub fn load(&self) -> Result<GbdtModel, ModelLoadError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| ModelLoadError::Http(format!("request to {} failed: {e}", self.url)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ModelLoadError::Status(status.as_u16()));
        }

        let bytes = resp
            .bytes()
            .map_err(|e| ModelLoadError::Http(format!("failed to read artifact body: {e}")))?;

        GbdtModel::decode(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test for URL resolution so the MODEL_URL mutation cannot race
    // another test in the same process.
    #[test]
    fn url_resolution_precedence() {
        unsafe { std::env::remove_var("MODEL_URL") };
        let client = ModelClient::from_env(None);
        assert_eq!(client.url(), DEFAULT_MODEL_URL);

        unsafe { std::env::set_var("MODEL_URL", "http://localhost:9/from-env.json") };
        let client = ModelClient::from_env(None);
        assert_eq!(client.url(), "http://localhost:9/from-env.json");

        let client = ModelClient::from_env(Some("http://localhost:9/from-flag.json"));
        assert_eq!(client.url(), "http://localhost:9/from-flag.json");

        unsafe { std::env::remove_var("MODEL_URL") };
    }
}
