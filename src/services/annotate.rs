use rand::Rng;
use rand::seq::SliceRandom;

use crate::constants::{
    MOCK_BOX_HEIGHT, MOCK_BOX_WIDTH, MOCK_MAX_ANNOTATIONS, MOCK_MIN_ANNOTATIONS, MOCK_WORDS,
};
use crate::models::{Annotation, BoundingBox};

/// Produces the `ocr_data` attached to a rendered page.
pub trait AnnotationGenerator: Send + Sync {
    fn generate(&self, width: u32, height: u32) -> Vec<Annotation>;

    fn generator_id(&self) -> &'static str;
}

/// Placeholder OCR: random tokens from a fixed vocabulary in random,
/// always in-bounds, boxes.
#[derive(Debug, Clone, Default)]
pub struct RandomAnnotator;

impl RandomAnnotator {
    pub fn new() -> Self {
        Self
    }
}

impl AnnotationGenerator for RandomAnnotator {
    fn generate(&self, width: u32, height: u32) -> Vec<Annotation> {
        random_annotations(&mut rand::thread_rng(), width, height)
    }

    fn generator_id(&self) -> &'static str {
        "mock-random"
    }
}

pub fn random_annotations<R: Rng + ?Sized>(rng: &mut R, width: u32, height: u32) -> Vec<Annotation> {
    // No box can satisfy left < right <= width on an empty page.
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let count = rng.gen_range(MOCK_MIN_ANNOTATIONS..=MOCK_MAX_ANNOTATIONS);
    (0..count)
        .map(|_| {
            let text = MOCK_WORDS.choose(&mut *rng).copied().unwrap_or("Total");
            let left = rng.gen_range(0..=width.saturating_sub(MOCK_BOX_WIDTH.1));
            let top = rng.gen_range(0..=height.saturating_sub(MOCK_BOX_HEIGHT.1));
            let right = left + rng.gen_range(MOCK_BOX_WIDTH.0..=MOCK_BOX_WIDTH.1);
            let bottom = top + rng.gen_range(MOCK_BOX_HEIGHT.0..=MOCK_BOX_HEIGHT.1);

            Annotation {
                text: text.to_string(),
                bbox: BoundingBox {
                    left,
                    top,
                    right: right.min(width),
                    bottom: bottom.min(height),
                },
            }
        })
        .collect()
}
