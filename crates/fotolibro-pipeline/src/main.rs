//! Photobook pipeline binary.
//!
//! Reads a submission manifest (JSON), runs the full pipeline against the
//! Gemini vision service, and writes the resulting album plan to stdout or
//! to the path given as the second argument.
//!
//! Usage: fotolibro-pipeline <manifest.json> [output.json]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fotolibro_pipeline::{Orchestrator, PipelineConfig, PipelineError, PipelineResult, Submission};
use fotolibro_vision::{GeminiVision, PhotoSource, VisionConfig};

/// On-disk submission manifest.
#[derive(Debug, Deserialize)]
struct Manifest {
    client_name: String,
    client_email: String,
    #[serde(default)]
    client_hint: Option<String>,
    #[serde(default)]
    custom_title: Option<String>,
    #[serde(default)]
    style_preference: Option<String>,

    /// Photo paths, resolved relative to the manifest's directory
    photos: Vec<PathBuf>,
}

fn mime_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        _ => "image/jpeg",
    }
}

fn load_submission(manifest_path: &Path) -> PipelineResult<Submission> {
    let raw = std::fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&raw)
        .map_err(|e| PipelineError::manifest(format!("invalid submission manifest: {}", e)))?;

    let base = manifest_path.parent().unwrap_or_else(|| Path::new("."));
    let mut photos = Vec::with_capacity(manifest.photos.len());
    for entry in &manifest.photos {
        let path = if entry.is_absolute() {
            entry.clone()
        } else {
            base.join(entry)
        };
        let data = std::fs::read(&path).map_err(|e| {
            PipelineError::manifest(format!("reading photo {}: {}", path.display(), e))
        })?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| path.display().to_string());
        photos.push(PhotoSource::new(file_name, mime_type_for(&path), data));
    }

    Ok(Submission {
        photos,
        client_name: manifest.client_name,
        client_email: manifest.client_email,
        client_hint: manifest.client_hint,
        custom_title: manifest.custom_title,
        style_preference: manifest.style_preference,
    })
}

async fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let manifest_path = match args.next() {
        Some(p) => PathBuf::from(p),
        None => bail!("usage: fotolibro-pipeline <manifest.json> [output.json]"),
    };
    let output_path = args.next().map(PathBuf::from);

    let submission = load_submission(&manifest_path)?;
    info!(
        client = %submission.client_name,
        photos = submission.photos.len(),
        "Submission loaded"
    );

    let vision_config = VisionConfig::from_env().context("vision configuration")?;
    let service = Arc::new(GeminiVision::new(vision_config)?);
    let orchestrator = Orchestrator::new(service, PipelineConfig::from_env());

    let output = orchestrator.run(submission).await?;
    let json = serde_json::to_string_pretty(&output)?;

    match output_path {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("writing output {}", path.display()))?;
            info!(path = %path.display(), "Album plan written");
        }
        None => println!("{}", json),
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for TLS/HTTPS)
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        error!("Failed to install rustls crypto provider");
        std::process::exit(1);
    }

    // Load environment variables
    dotenvy::dotenv().ok();

    // Colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fotolibro=info"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting fotolibro-pipeline");

    if let Err(e) = run().await {
        error!("Pipeline failed: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_from_extension() {
        assert_eq!(mime_type_for(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_type_for(Path::new("b.webp")), "image/webp");
        assert_eq!(mime_type_for(Path::new("c.jpg")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("noext")), "image/jpeg");
    }

    #[test]
    fn test_load_submission_resolves_relative_photo_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("uno.jpg"), b"fake-jpeg").unwrap();

        let manifest = serde_json::json!({
            "client_name": "Maria",
            "client_email": "maria@example.com",
            "client_hint": "nuestra boda",
            "photos": ["uno.jpg"],
        });
        let manifest_path = dir.path().join("manifest.json");
        std::fs::write(&manifest_path, manifest.to_string()).unwrap();

        let submission = load_submission(&manifest_path).unwrap();
        assert_eq!(submission.client_name, "Maria");
        assert_eq!(submission.client_hint.as_deref(), Some("nuestra boda"));
        assert_eq!(submission.photos.len(), 1);
        assert_eq!(submission.photos[0].file_name, "uno.jpg");
        assert_eq!(submission.photos[0].mime_type, "image/jpeg");
        assert_eq!(submission.photos[0].data, b"fake-jpeg");
    }

    #[test]
    fn test_load_submission_missing_photo_errors() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = serde_json::json!({
            "client_name": "Jon",
            "client_email": "jon@example.com",
            "photos": ["no-existe.jpg"],
        });
        let manifest_path = dir.path().join("manifest.json");
        std::fs::write(&manifest_path, manifest.to_string()).unwrap();

        assert!(load_submission(&manifest_path).is_err());
    }
}
