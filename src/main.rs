// Entrypoint for the CLI application.
// - With image paths as arguments, detect each one and print the result as
//   JSON on stdout (logs go to stderr).
// - Without arguments, hand over to the interactive menu.

use anyhow::Context;
use faceplus_cli::{ui, ClientConfig, FaceClient};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if !paths.is_empty() {
        let config = ClientConfig::resolve().context("No API credentials configured")?;
        let client = FaceClient::new(config)?;
        for path in &paths {
            let detection = client
                .detect_image(path)
                .with_context(|| format!("Detection failed for {}", path))?;
            println!("{}", serde_json::to_string_pretty(&detection)?);
        }
        return Ok(());
    }

    // Credentials are optional here; the menu can collect them.
    let client = ClientConfig::resolve().ok().map(FaceClient::new).transpose()?;
    ui::main_menu(client)?;
    Ok(())
}
