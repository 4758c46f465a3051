// API client module: a small blocking HTTP client that uploads an image to
// the face detection endpoint and decodes the reply into `types`.

use reqwest::blocking::{multipart, Client};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{FaceError, FaceResult};
use crate::types::{DetectResult, Detection};

/// Attributes requested for every detected face.
pub const DETECT_ATTRIBUTES: &str = "gender,age,race,smiling,glass,pose";

/// Name of the multipart field carrying the image.
pub const IMAGE_FIELD: &str = "img";

/// Blocking client for the detection API. Holds the reqwest client and the
/// static configuration; cheap to clone and safe to reuse between calls.
#[derive(Clone)]
pub struct FaceClient {
    client: Client,
    config: ClientConfig,
}

/// Error body the service sends with non-success statuses.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct ApiErrorBody {
    error: String,
    error_code: i64,
}

impl FaceClient {
    pub fn new(config: ClientConfig) -> FaceResult<Self> {
        let client = Client::builder().build()?;
        Ok(FaceClient { client, config })
    }

    /// Create a client configured from `FACEPP_API_*` environment variables.
    pub fn from_env() -> FaceResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Full request URL. Key and secret are inserted verbatim, without any
    /// percent-encoding.
    pub fn detect_url(&self) -> String {
        format!(
            "{}/detection/detect?api_key={}&api_secret={}&attribute={}",
            self.config.server(),
            self.config.api_key,
            self.config.api_secret,
            DETECT_ATTRIBUTES
        )
    }

    /// Same as [`Self::detect_url`] with the secret masked, for logs.
    fn redacted_url(&self) -> String {
        format!(
            "{}/detection/detect?api_key={}&api_secret=***&attribute={}",
            self.config.server(),
            self.config.api_key,
            DETECT_ATTRIBUTES
        )
    }

    /// Upload the image at `path` and decode the detection result.
    ///
    /// The whole file is read before anything goes on the wire, so a missing
    /// or unreadable file fails with [`FaceError::Io`] without a request.
    /// The multipart filename is the path exactly as given.
    pub fn detect_image(&self, path: impl AsRef<Path>) -> FaceResult<Detection> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| FaceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("read {} bytes from {}", data.len(), path.display());

        let part = multipart::Part::bytes(data)
            .file_name(path.to_string_lossy().into_owned())
            .mime_str("application/octet-stream")?;
        let form = multipart::Form::new().part(IMAGE_FIELD, part);

        info!("Address: {}", self.redacted_url());
        let res = self.client.post(self.detect_url()).multipart(form).send()?;

        let status = res.status();
        info!("Response status code: {}", status.as_u16());
        let body = res.bytes()?;

        if !status.is_success() {
            let message = match serde_json::from_slice::<ApiErrorBody>(&body) {
                Ok(err) if !err.error.is_empty() => {
                    format!("{} (code {})", err.error, err.error_code)
                }
                _ => String::from_utf8_lossy(&body).into_owned(),
            };
            warn!("detection failed with status {}: {}", status, message);
            return Err(FaceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        decode_detection(&body)
    }
}

/// Decode a detection response body. Empty or malformed JSON is an error;
/// fields missing from an otherwise valid object are left at zero values.
pub fn decode_detection(body: &[u8]) -> FaceResult<Detection> {
    let raw: DetectResult = serde_json::from_slice(body).map_err(|source| FaceError::Decode {
        source,
        body: String::from_utf8_lossy(body).into_owned(),
    })?;
    debug!(
        "decoded session {} with {} face(s)",
        raw.session_id,
        raw.faces.len()
    );
    Ok(raw.into())
}
