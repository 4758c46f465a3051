// Library root
// -----------
// Client binding for the face detection web API, plus the terminal front
// end the binary (`main.rs`) is built from.
//
// Module responsibilities:
// - `api`: builds the multipart upload, sends it and decodes the reply.
// - `config`: server URL and credentials, from the environment or a file.
// - `error`: the single error type every detection failure maps to.
// - `types`: passive mirror of the response JSON.
// - `ui`: interactive menu and one-shot output, delegating to `api`.
pub mod api;
pub mod config;
pub mod error;
pub mod types;
pub mod ui;

pub use api::{decode_detection, FaceClient};
pub use config::ClientConfig;
pub use error::{FaceError, FaceResult};
pub use types::{Detection, Face, ImageInfo};
