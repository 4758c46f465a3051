// Response schema of the `/detection/detect` endpoint. The structs mirror the
// remote JSON one to one; missing or null fields fall back to zero values
// because the service is trusted to fill them.

use serde::{Deserialize, Deserializer, Serialize};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Raw envelope returned by the detection endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DetectResult {
    #[serde(rename = "face", deserialize_with = "null_as_default")]
    pub faces: Vec<Face>,
    #[serde(deserialize_with = "null_as_default")]
    pub img_height: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub img_width: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub img_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub session_id: String,
    #[serde(rename = "url", deserialize_with = "null_as_default")]
    pub img_url: String,
}

/// One detected face.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Face {
    #[serde(rename = "face_id", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "attribute", deserialize_with = "null_as_default")]
    pub attributes: FaceAttributes,
    #[serde(deserialize_with = "null_as_default")]
    pub position: Position,
    #[serde(deserialize_with = "null_as_default")]
    pub tag: String,
}

/// Estimates computed by the service for a face. Only the attributes listed
/// in the request's `attribute` parameter are filled in.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FaceAttributes {
    #[serde(deserialize_with = "null_as_default")]
    pub age: Age,
    #[serde(deserialize_with = "null_as_default")]
    pub gender: Gender,
    #[serde(deserialize_with = "null_as_default")]
    pub glass: Glass,
    #[serde(deserialize_with = "null_as_default")]
    pub pose: Pose,
    #[serde(deserialize_with = "null_as_default")]
    pub race: Race,
    #[serde(deserialize_with = "null_as_default")]
    pub smiling: Smiling,
}

/// Estimated age, `value` plus or minus `range` years.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(default)]
pub struct Age {
    #[serde(deserialize_with = "null_as_default")]
    pub range: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub value: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Gender {
    #[serde(deserialize_with = "null_as_default")]
    pub confidence: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Glass {
    #[serde(deserialize_with = "null_as_default")]
    pub confidence: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Race {
    #[serde(deserialize_with = "null_as_default")]
    pub confidence: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub value: String,
}

/// Smiling score, 0 to 100.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(default)]
pub struct Smiling {
    #[serde(deserialize_with = "null_as_default")]
    pub value: f64,
}

/// Head pose in degrees.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(default)]
pub struct Pose {
    #[serde(deserialize_with = "null_as_default")]
    pub pitch_angle: Angle,
    #[serde(deserialize_with = "null_as_default")]
    pub roll_angle: Angle,
    #[serde(deserialize_with = "null_as_default")]
    pub yaw_angle: Angle,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(default)]
pub struct Angle {
    #[serde(deserialize_with = "null_as_default")]
    pub value: f64,
}

/// Face box and landmarks. Every coordinate, `width` and `height` are
/// percentages (0 to 100) of the image dimensions.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(default)]
pub struct Position {
    #[serde(deserialize_with = "null_as_default")]
    pub center: Point,
    #[serde(deserialize_with = "null_as_default")]
    pub eye_left: Point,
    #[serde(deserialize_with = "null_as_default")]
    pub eye_right: Point,
    #[serde(deserialize_with = "null_as_default")]
    pub height: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub width: f64,
    // The service spells these "mouse".
    #[serde(rename = "mouse_left", deserialize_with = "null_as_default")]
    pub mouth_left: Point,
    #[serde(rename = "mouse_right", deserialize_with = "null_as_default")]
    pub mouth_right: Point,
    #[serde(deserialize_with = "null_as_default")]
    pub nose: Point,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(default)]
pub struct Point {
    #[serde(deserialize_with = "null_as_default")]
    pub x: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub y: f64,
}

/// Metadata of the uploaded image as seen by the service.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ImageInfo {
    pub id: String,
    pub height: i64,
    pub width: i64,
    pub url: String,
}

/// Result of one detection call.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Detection {
    pub session_id: String,
    pub faces: Vec<Face>,
    pub image: ImageInfo,
}

impl From<DetectResult> for Detection {
    fn from(raw: DetectResult) -> Self {
        Detection {
            session_id: raw.session_id,
            faces: raw.faces,
            image: ImageInfo {
                id: raw.img_id,
                height: raw.img_height,
                width: raw.img_width,
                url: raw.img_url,
            },
        }
    }
}

impl Position {
    /// Face box as `(left, top, width, height)` in pixels for an image of
    /// the given size.
    pub fn pixel_box(&self, img_width: i64, img_height: i64) -> (f64, f64, f64, f64) {
        let (iw, ih) = (img_width as f64, img_height as f64);
        let w = self.width * iw / 100.0;
        let h = self.height * ih / 100.0;
        let left = self.center.x * iw / 100.0 - w / 2.0;
        let top = self.center.y * ih / 100.0 - h / 2.0;
        (left, top, w, h)
    }
}
