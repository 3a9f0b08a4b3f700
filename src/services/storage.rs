use image::{DynamicImage, ImageFormat};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::constants::PAGE_IMAGE_EXT;
use crate::error::AppResult;

/// Flat directory of rendered pages, shared with the static route.
#[derive(Debug, Clone)]
pub struct PageStore {
    static_dir: PathBuf,
}

impl PageStore {
    pub fn new(static_dir: PathBuf) -> Self {
        Self { static_dir }
    }

    /// Creates the directory if needed.
    pub fn open(static_dir: PathBuf) -> AppResult<Self> {
        fs::create_dir_all(&static_dir)?;
        info!("Serving page images from {:?}", static_dir);
        Ok(Self::new(static_dir))
    }

    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }

    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.static_dir.join(filename)
    }

    /// `{uuid}_{page_index}.png`; the uuid keeps concurrent uploads apart.
    pub fn unique_name(page_index: usize) -> String {
        format!("{}_{}.{}", Uuid::new_v4(), page_index, PAGE_IMAGE_EXT)
    }

    /// Writes `image` as PNG under a fresh name and returns that name.
    pub fn save_page(&self, image: &DynamicImage, page_index: usize) -> AppResult<String> {
        let filename = Self::unique_name(page_index);
        let path = self.path_for(&filename);
        image.save_with_format(&path, ImageFormat::Png)?;
        debug!("Saved page {} to {:?}", page_index + 1, path);
        Ok(filename)
    }
}
