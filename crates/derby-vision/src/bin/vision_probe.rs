//! Send one image to the inference service and print the recognized objects.
//!
//! Usage:
//!   vision-probe <gs://bucket/object>
//!   vision-probe --message <sensor-message.json>

use anyhow::{anyhow, Context};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use derby_models::SensorMessage;
use derby_vision::VisionClient;

enum Target {
    Locator(String),
    Message(SensorMessage),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(e) = run().await {
        error!("vision-probe failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let target = parse_args(std::env::args().skip(1).collect())?;

    let client = VisionClient::from_env().context("failed to configure vision client")?;
    info!(
        endpoint = client.endpoint(),
        simulating = client.is_simulating(),
        "Starting vision-probe"
    );

    let result = match &target {
        Target::Locator(locator) => client.recognize(locator).await?,
        Target::Message(message) => client.recognize_objects(message).await?,
    };

    info!(
        boxes = result.len(),
        categories = ?result.categories(),
        "Recognition complete"
    );
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn parse_args(args: Vec<String>) -> anyhow::Result<Target> {
    match args.as_slice() {
        [flag, path] if flag == "--message" => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read sensor message {}", path))?;
            let message: SensorMessage = serde_json::from_str(&raw)
                .with_context(|| format!("invalid sensor message {}", path))?;
            Ok(Target::Message(message))
        }
        [locator] if !locator.starts_with("--") => Ok(Target::Locator(locator.clone())),
        _ => Err(anyhow!(
            "usage: vision-probe <gs://bucket/object> | vision-probe --message <file.json>"
        )),
    }
}

fn init_tracing() {
    // JSON for production, colored text for dev; stdout is reserved for results
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("derby=info,vision_probe=info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .with(env_filter)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_locator_arg() {
        let target = parse_args(vec!["gs://b/o.jpg".to_string()]).unwrap();
        assert!(matches!(target, Target::Locator(ref l) if l == "gs://b/o.jpg"));
    }

    #[test]
    fn test_parse_message_arg() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"sensors": {{"frontCameraImagePathGCS": "gs://b/o.jpg"}}}}"#
        )
        .unwrap();

        let path = file.path().to_string_lossy().to_string();
        let target = parse_args(vec!["--message".to_string(), path]).unwrap();
        match target {
            Target::Message(message) => {
                assert_eq!(message.front_camera_image(), Some("gs://b/o.jpg"))
            }
            Target::Locator(_) => panic!("expected a sensor message"),
        }
    }

    #[test]
    fn test_parse_rejects_bad_usage() {
        assert!(parse_args(vec![]).is_err());
        assert!(parse_args(vec!["--message".to_string()]).is_err());
        assert!(parse_args(vec!["a".to_string(), "b".to_string()]).is_err());
    }
}
