// Client configuration: where the detection API lives and the credentials
// sent with every request. Values come from the environment or from a small
// JSON file in the user's home directory written by the CLI.

use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};

use crate::error::{FaceError, FaceResult};

pub const DEFAULT_API_SERVER: &str = "http://apicn.faceplusplus.com/v2";

const ENV_API_SERVER: &str = "FACEPP_API_SERVER";
const ENV_API_KEY: &str = "FACEPP_API_KEY";
const ENV_API_SECRET: &str = "FACEPP_API_SECRET";

/// Server base URL plus the key/secret pair issued by the service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_server: String,
    pub api_key: String,
    pub api_secret: String,
}

impl ClientConfig {
    pub fn new(
        api_server: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        ClientConfig {
            api_server: api_server.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Read `FACEPP_API_SERVER`, `FACEPP_API_KEY` and `FACEPP_API_SECRET`.
    /// The server falls back to [`DEFAULT_API_SERVER`]; key and secret are
    /// required.
    pub fn from_env() -> FaceResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> FaceResult<Self> {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| FaceError::Config(format!("{} is not set", name)))
        };
        Ok(ClientConfig {
            api_server: lookup(ENV_API_SERVER).unwrap_or_else(|| DEFAULT_API_SERVER.into()),
            api_key: required(ENV_API_KEY)?,
            api_secret: required(ENV_API_SECRET)?,
        })
    }

    /// `~/.faceplus.json`, or `./.faceplus.json` when there is no home dir.
    pub fn default_path() -> PathBuf {
        let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        dir.join(".faceplus.json")
    }

    pub fn load(path: &Path) -> FaceResult<Self> {
        let data = std::fs::read_to_string(path).map_err(|source| FaceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data)
            .map_err(|e| FaceError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn save(&self, path: &Path) -> FaceResult<()> {
        let data = serde_json::to_string_pretty(self)
            .map_err(|e| FaceError::Config(e.to_string()))?;
        let io_err = |source| FaceError::Io {
            path: path.to_path_buf(),
            source,
        };
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        // The file holds the API secret; keep it private to the owner.
        #[cfg(unix)]
        options.mode(0o600);
        let mut file = options.open(path).map_err(io_err)?;
        // `mode` only applies on creation, so tighten files saved earlier too.
        #[cfg(unix)]
        file.set_permissions(std::fs::Permissions::from_mode(0o600))
            .map_err(io_err)?;
        file.write_all(data.as_bytes()).map_err(io_err)
    }

    /// Environment first, then the saved file at [`Self::default_path`].
    pub fn resolve() -> FaceResult<Self> {
        Self::resolve_with(Self::from_env(), &Self::default_path())
    }

    /// A saved file that exists but cannot be loaded reports its own error;
    /// with no file at all the environment error is returned.
    fn resolve_with(from_env: FaceResult<Self>, path: &Path) -> FaceResult<Self> {
        match from_env {
            Ok(cfg) => Ok(cfg),
            Err(env_err) if !path.exists() => Err(env_err),
            Err(_) => Self::load(path),
        }
    }

    /// Server URL without a trailing slash.
    pub fn server(&self) -> &str {
        self.api_server.trim_end_matches('/')
    }
}
