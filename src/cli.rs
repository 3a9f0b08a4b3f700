use clap::{Args, Parser, Subcommand};
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::constants::{DEFAULT_VERIFY_FILE, DEFAULT_VERIFY_URL, UPLOAD_FIELD};
use crate::models::OcrResponse;

#[derive(Parser)]
#[command(name = "pdf-ocr-mock")]
#[command(author, version, about = "PDF page rasterizer with mock OCR annotations", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve(ServeArgs),

    /// Upload a PDF to a running server and print the result
    VerifyUpload {
        /// PDF to upload
        #[arg(default_value = DEFAULT_VERIFY_FILE)]
        file: PathBuf,
        /// Upload endpoint
        #[arg(long, default_value = DEFAULT_VERIFY_URL)]
        url: String,
    },
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind (overrides HOST)
    #[arg(long)]
    pub host: Option<String>,
    /// Port to listen on (overrides PORT)
    #[arg(long, short)]
    pub port: Option<u16>,
    /// Directory for rendered page images (overrides STATIC_DIR)
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
    /// Directory containing the poppler binaries (overrides POPPLER_PATH)
    #[arg(long)]
    pub poppler_path: Option<PathBuf>,
    /// Verbose logging
    #[arg(long)]
    pub debug: bool,
}

impl ServeArgs {
    pub fn apply(self, mut config: Config) -> Config {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(dir) = self.static_dir {
            config.static_dir = dir;
        }
        if let Some(dir) = self.poppler_path {
            config.poppler_path = Some(dir);
        }
        config.debug |= self.debug;
        config
    }
}

pub fn handle_verify_upload(file: &Path, url: &str) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(verify_upload(file, url));
    Ok(())
}

/// Smoke test against a running server. Failures are printed, never returned.
pub async fn verify_upload(file: &Path, url: &str) {
    if !file.exists() {
        println!("Error: File not found at {}", file.display());
        return;
    }

    println!("Uploading {} to {}...", file.display(), url);

    match post_pdf(file, url).await {
        Ok((status, body)) => {
            for line in report_lines(status, &body) {
                println!("{}", line);
            }
        }
        Err(e) => println!("An error occurred: {}", e),
    }
}

async fn post_pdf(file: &Path, url: &str) -> anyhow::Result<(StatusCode, String)> {
    let bytes = tokio::fs::read(file).await?;
    let filename = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.pdf".to_string());

    let part = Part::bytes(bytes)
        .file_name(filename)
        .mime_str("application/pdf")?;
    let form = Form::new().part(UPLOAD_FIELD, part);

    let resp = reqwest::Client::new().post(url).multipart(form).send().await?;
    let status = resp.status();
    let body = resp.text().await?;
    Ok((status, body))
}

fn report_lines(status: StatusCode, body: &str) -> Vec<String> {
    let mut lines = vec![format!("Status Code: {}", status.as_u16())];

    if status != StatusCode::OK {
        lines.push("Upload failed.".to_string());
        lines.push(body.to_string());
        return lines;
    }

    lines.push("Upload successful!".to_string());
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        lines.push("Error: Could not parse JSON response.".to_string());
        return lines;
    };

    lines.push("Response JSON:".to_string());
    lines.push(serde_json::to_string_pretty(&json).unwrap_or_else(|_| body.to_string()));

    let results = serde_json::from_value::<OcrResponse>(json)
        .map(|r| r.results)
        .unwrap_or_default();
    if results.is_empty() {
        lines.push("\nNo results found in response.".to_string());
        return lines;
    }

    lines.push(format!("\nProcessed {} pages.", results.len()));
    for page in &results {
        lines.push(format!("Page {}: {}", page.page_number, page.image_url));
    }
    lines
}
