use log::{info, warn};
use std::sync::Arc;

use crate::constants::STATIC_ROUTE;
use crate::error::AppResult;
use crate::models::PageResult;
use crate::services::{AnnotationGenerator, PageStore, Rasterizer};

/// Upload pipeline: rasterize, store each page, attach mock OCR data.
#[derive(Clone)]
pub struct OcrService {
    store: PageStore,
    rasterizer: Arc<dyn Rasterizer>,
    annotator: Arc<dyn AnnotationGenerator>,
}

impl OcrService {
    pub fn new(
        store: PageStore,
        rasterizer: Arc<dyn Rasterizer>,
        annotator: Arc<dyn AnnotationGenerator>,
    ) -> Self {
        Self {
            store,
            rasterizer,
            annotator,
        }
    }

    /// Blocking. Pages written before a failing page stay on disk.
    pub fn process(&self, pdf: &[u8], base_url: &str) -> AppResult<Vec<PageResult>> {
        let images = self.rasterizer.rasterize(pdf)?;
        let mut results = Vec::with_capacity(images.len());

        for (index, image) in images.iter().enumerate() {
            let filename = match self.store.save_page(image, index) {
                Ok(name) => name,
                Err(e) => {
                    if index > 0 {
                        warn!(
                            "Saving page {} failed, leaving {} page image(s) from this upload in {:?}",
                            index + 1,
                            index,
                            self.store.static_dir()
                        );
                    }
                    return Err(e);
                }
            };

            let (width, height) = (image.width(), image.height());
            results.push(PageResult {
                page_number: index as u32 + 1,
                image_url: page_url(base_url, &filename),
                width,
                height,
                ocr_data: self.annotator.generate(width, height),
            });
        }

        info!(
            "Processed {} page(s) with {} annotations",
            results.len(),
            self.annotator.generator_id()
        );
        Ok(results)
    }
}

pub fn page_url(base_url: &str, filename: &str) -> String {
    format!("{}{}/{}", base_url.trim_end_matches('/'), STATIC_ROUTE, filename)
}
