use serde::{Deserialize, Serialize};

/// Pixel box on a rendered page, serialized as `[left, top, right, bottom]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u32; 4]", into = "[u32; 4]")]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.left < self.right
            && self.right <= width
            && self.top < self.bottom
            && self.bottom <= height
    }
}

impl From<[u32; 4]> for BoundingBox {
    fn from([left, top, right, bottom]: [u32; 4]) -> Self {
        Self { left, top, right, bottom }
    }
}

impl From<BoundingBox> for [u32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.left, b.top, b.right, b.bottom]
    }
}

/// A mock OCR record: a token and where it "was found".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
    pub bbox: BoundingBox,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult {
    pub page_number: u32,
    pub image_url: String,
    pub width: u32,
    pub height: u32,
    pub ocr_data: Vec<Annotation>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OcrResponse {
    pub results: Vec<PageResult>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_result_wire_shape() {
        let page = PageResult {
            page_number: 1,
            image_url: "http://localhost:5000/static/abc_0.png".to_string(),
            width: 1700,
            height: 2200,
            ocr_data: vec![Annotation {
                text: "Total".to_string(),
                bbox: BoundingBox::from([10, 20, 70, 45]),
            }],
        };

        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            json!({
                "page_number": 1,
                "image_url": "http://localhost:5000/static/abc_0.png",
                "width": 1700,
                "height": 2200,
                "ocr_data": [{ "text": "Total", "bbox": [10, 20, 70, 45] }]
            })
        );
    }

    #[test]
    fn test_bbox_bounds() {
        assert!(BoundingBox::from([0, 0, 100, 50]).fits_within(100, 50));
        assert!(!BoundingBox::from([0, 0, 101, 50]).fits_within(100, 50));
        assert!(!BoundingBox::from([10, 5, 10, 30]).fits_within(100, 50));
    }
}
