// UI layer: a simple interactive menu using `dialoguer`.
// The functions are small and synchronous to make the flow easy to follow.

use crate::api::FaceClient;
use crate::config::{ClientConfig, DEFAULT_API_SERVER};
use crate::types::{Detection, Face};
use anyhow::{Context, Result};
use dialoguer::{Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Main interactive menu. Runs a select loop until the user chooses "Exit".
/// `client` is `None` when no credentials were found at startup; detection
/// stays unavailable until they are set from the menu.
pub fn main_menu(mut client: Option<FaceClient>) -> Result<()> {
    loop {
        let items = vec!["Detect faces in image", "Set credentials", "Exit"];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => {
                let Some(api) = &client else {
                    println!("You should set credentials first.");
                    continue;
                };
                handle_detect(api)?;
            }
            1 => {
                let config = handle_credentials(client.as_ref().map(|c| c.config()))?;
                let path = ClientConfig::default_path();
                config
                    .save(&path)
                    .with_context(|| format!("Saving credentials to {}", path.display()))?;
                println!("Credentials saved to {}", path.display());
                client = Some(FaceClient::new(config)?);
            }
            2 => break,
            _ => {}
        }
    }
    Ok(())
}

/// Prompt for an image path and print what the service found.
fn handle_detect(api: &FaceClient) -> Result<()> {
    let path: String = Input::new().with_prompt("Image file path").interact_text()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message("Detecting...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = api.detect_image(&path);
    spinner.finish_and_clear();

    match result {
        Ok(detection) => print!("{}", format_detection(&detection)),
        Err(e) => println!("Detection failed: {}", e),
    }
    Ok(())
}

/// Collect server URL, key and secret. Current values are offered as
/// defaults, except the secret which is always typed again.
fn handle_credentials(current: Option<&ClientConfig>) -> Result<ClientConfig> {
    let server: String = Input::new()
        .with_prompt("API server")
        .default(
            current
                .map(|c| c.api_server.clone())
                .unwrap_or_else(|| DEFAULT_API_SERVER.into()),
        )
        .interact_text()?;
    let mut key_input = Input::<String>::new();
    key_input.with_prompt("API key");
    if let Some(c) = current {
        key_input.default(c.api_key.clone());
    }
    let key: String = key_input.interact_text()?;
    // `Password` hides input in terminal.
    let secret: String = Password::new().with_prompt("API secret").interact()?;
    Ok(ClientConfig::new(server, key, secret))
}

/// Human readable summary of a detection, one block per face.
pub fn format_detection(detection: &Detection) -> String {
    let img = &detection.image;
    let mut out = format!(
        "Session {}: {} face(s) in {}x{} image {}\n",
        detection.session_id,
        detection.faces.len(),
        img.width,
        img.height,
        img.id
    );
    for (i, face) in detection.faces.iter().enumerate() {
        out.push_str(&format_face(i + 1, face, img.width, img.height));
    }
    out
}

fn format_face(n: usize, face: &Face, img_width: i64, img_height: i64) -> String {
    let a = &face.attributes;
    let p = &face.position;
    let (left, top, w, h) = p.pixel_box(img_width, img_height);
    format!(
        "  #{} {}\n    age {} (+/-{}), gender {} ({:.1}%), race {} ({:.1}%)\n    glass {} ({:.1}%), smiling {:.1}\n    pose pitch {:.1} roll {:.1} yaw {:.1}\n    box {:.0},{:.0} {:.0}x{:.0} px\n",
        n,
        face.id,
        a.age.value,
        a.age.range,
        a.gender.value,
        a.gender.confidence,
        a.race.value,
        a.race.confidence,
        a.glass.value,
        a.glass.confidence,
        a.smiling.value,
        a.pose.pitch_angle.value,
        a.pose.roll_angle.value,
        a.pose.yaw_angle.value,
        left,
        top,
        w,
        h
    )
}
