use std::path::PathBuf;

use crate::constants;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    /// Directory holding the poppler binaries. `None` resolves `pdftoppm` from `PATH`.
    pub poppler_path: Option<PathBuf>,
    pub render_dpi: u32,
    pub allowed_origins: Vec<String>,
    /// Overrides the scheme and host used when building image URLs.
    pub public_url: Option<String>,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(constants::DEFAULT_PORT);

        Self {
            host,
            port,
            static_dir: PathBuf::from(
                std::env::var("STATIC_DIR").unwrap_or_else(|_| constants::STATIC_DIR.to_string()),
            ),
            poppler_path: std::env::var("POPPLER_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            render_dpi: std::env::var("RENDER_DPI")
                .ok()
                .and_then(|d| d.parse().ok())
                .unwrap_or(constants::DEFAULT_RENDER_DPI),
            allowed_origins: std::env::var("CORS_ORIGINS")
                .map(|list| parse_origins(&list))
                .unwrap_or_else(|_| default_origins()),
            public_url: std::env::var("PUBLIC_URL")
                .ok()
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
            debug: std::env::var("DEBUG")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration rooted at `static_dir` with no environment lookups.
    pub fn local(static_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: constants::DEFAULT_PORT,
            static_dir: static_dir.into(),
            poppler_path: None,
            render_dpi: constants::DEFAULT_RENDER_DPI,
            allowed_origins: default_origins(),
            public_url: None,
            debug: false,
        }
    }

    pub fn log_level(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}

fn default_origins() -> Vec<String> {
    constants::DEV_ORIGINS.iter().map(|o| o.to_string()).collect()
}

fn parse_origins(list: &str) -> Vec<String> {
    list.split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
