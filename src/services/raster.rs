use image::DynamicImage;
use log::{debug, error, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{AppError, AppResult};

const PDFTOPPM: &str = "pdftoppm";
const OUTPUT_PREFIX: &str = "page";

/// Turns PDF bytes into one image per page, in page order.
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, pdf: &[u8]) -> AppResult<Vec<DynamicImage>>;
}

/// Renders through poppler's `pdftoppm`, optionally from a local install directory.
#[derive(Debug, Clone)]
pub struct PopplerRasterizer {
    poppler_path: Option<PathBuf>,
    dpi: u32,
}

impl PopplerRasterizer {
    pub fn new(poppler_path: Option<PathBuf>, dpi: u32) -> Self {
        Self { poppler_path, dpi }
    }

    pub fn executable(&self) -> PathBuf {
        match &self.poppler_path {
            Some(dir) => dir.join(PDFTOPPM),
            None => PathBuf::from(PDFTOPPM),
        }
    }

    fn render_into(&self, pdf_path: &Path, out_dir: &Path) -> AppResult<()> {
        let program = self.executable();
        debug!("Running {:?} on {:?} at {} dpi", program, pdf_path, self.dpi);

        let output = Command::new(&program)
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg(pdf_path)
            .arg(out_dir.join(OUTPUT_PREFIX))
            .output()
            .map_err(|e| AppError::Render(format!("Failed to execute {}: {}", PDFTOPPM, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("pdftoppm failed: {:?}", output);
            return Err(AppError::Render(format!(
                "{} exited with {}: {}",
                PDFTOPPM,
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

impl Rasterizer for PopplerRasterizer {
    fn rasterize(&self, pdf: &[u8]) -> AppResult<Vec<DynamicImage>> {
        let scratch = tempfile::tempdir()?;
        let pdf_path = scratch.path().join("input.pdf");
        fs::write(&pdf_path, pdf)?;

        self.render_into(&pdf_path, scratch.path())?;

        let pages = collect_page_files(scratch.path())?;
        info!("Rasterized {} page(s) from {} bytes", pages.len(), pdf.len());

        pages
            .into_iter()
            .map(|(_, path)| image::open(&path).map_err(AppError::from))
            .collect()
    }
}

/// Lists `page-N.png` outputs in `dir`, ordered by N.
fn collect_page_files(dir: &Path) -> AppResult<Vec<(u32, PathBuf)>> {
    let mut pages = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(number) = page_number_from_file_name(name) {
            pages.push((number, path));
        }
    }
    pages.sort_by_key(|(number, _)| *number);
    Ok(pages)
}

/// poppler zero-pads the page number to the width of the page count
/// (`page-1.png`, `page-01.png`, `page-001.png`).
fn page_number_from_file_name(name: &str) -> Option<u32> {
    let stem = name.strip_suffix(".png")?;
    let digits = stem.strip_prefix(OUTPUT_PREFIX)?.strip_prefix('-')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_number_from_file_name() {
        assert_eq!(page_number_from_file_name("page-1.png"), Some(1));
        assert_eq!(page_number_from_file_name("page-07.png"), Some(7));
        assert_eq!(page_number_from_file_name("page-120.png"), Some(120));
        assert_eq!(page_number_from_file_name("input.pdf"), None);
        assert_eq!(page_number_from_file_name("page-.png"), None);
        assert_eq!(page_number_from_file_name("page-1a.png"), None);
        assert_eq!(page_number_from_file_name("page-2.ppm"), None);
    }

    #[test]
    fn test_collect_page_files_orders_numerically() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["page-10.png", "page-02.png", "page-01.png", "input.pdf"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }

        let pages = collect_page_files(dir.path()).unwrap();
        let numbers: Vec<u32> = pages.iter().map(|(n, _)| *n).collect();
        assert_eq!(numbers, vec![1, 2, 10]);
    }

    #[test]
    fn test_executable_resolution() {
        let local = PopplerRasterizer::new(Some(PathBuf::from("/opt/poppler/bin")), 200);
        assert_eq!(local.executable(), PathBuf::from("/opt/poppler/bin/pdftoppm"));

        let on_path = PopplerRasterizer::new(None, 200);
        assert_eq!(on_path.executable(), PathBuf::from("pdftoppm"));
    }

    #[test]
    fn test_missing_toolchain_is_render_error() {
        let missing = tempfile::tempdir().unwrap();
        let rasterizer = PopplerRasterizer::new(Some(missing.path().join("nope")), 72);

        let err = rasterizer.rasterize(b"%PDF-1.4").unwrap_err();
        assert!(matches!(err, AppError::Render(_)));
        assert!(err.to_string().starts_with("Failed to execute pdftoppm"));
    }

    #[test]
    #[ignore = "requires poppler's pdftoppm on PATH"]
    fn test_renders_generated_pdf() {
        let rasterizer = PopplerRasterizer::new(None, 72);
        let pages = rasterizer.rasterize(&two_page_pdf()).unwrap();

        assert_eq!(pages.len(), 2);
        // 200x100 pt at 72 dpi
        assert_eq!((pages[0].width(), pages[0].height()), (200, 100));
        assert_eq!((pages[1].width(), pages[1].height()), (100, 300));
    }

    #[test]
    #[ignore = "requires poppler's pdftoppm on PATH"]
    fn test_garbage_input_fails() {
        let err = PopplerRasterizer::new(None, 72).rasterize(b"not a pdf").unwrap_err();
        assert!(matches!(err, AppError::Render(_)));
    }

    /// Minimal two-page PDF with a valid xref table.
    fn two_page_pdf() -> Vec<u8> {
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>",
            "<< /Type /Pages /Kids [3 0 R 4 0 R] /Count 2 >>",
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 200 100] >>",
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 100 300] >>",
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }

        let xref = pdf.len();
        pdf.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for offset in offsets {
            pdf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref
            )
            .as_bytes(),
        );
        pdf
    }
}
