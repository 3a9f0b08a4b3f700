// src/constants.rs

pub const STATIC_DIR: &str = "./static";
pub const STATIC_ROUTE: &str = "/static";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_RENDER_DPI: u32 = 200;

// Multipart field carrying the uploaded PDF
pub const UPLOAD_FIELD: &str = "file";

// Stored page name: {uuid}_{page_index}.png
pub const PAGE_IMAGE_EXT: &str = "png";

pub const DEV_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "https://localhost:3000",
    "http://localhost:5173",
];

// Mock annotation vocabulary and box geometry
pub const MOCK_WORDS: &[&str] = &[
    "INVOICE",
    "Total",
    "Amount",
    "Date",
    "123.45",
    "2023-10-27",
    "Vendor",
    "Client",
];
pub const MOCK_MIN_ANNOTATIONS: usize = 5;
pub const MOCK_MAX_ANNOTATIONS: usize = 10;
pub const MOCK_BOX_WIDTH: (u32, u32) = (50, 100);
pub const MOCK_BOX_HEIGHT: (u32, u32) = (20, 50);

pub const DEFAULT_VERIFY_FILE: &str = "January 31.pdf";
pub const DEFAULT_VERIFY_URL: &str = "http://localhost:5000/api/ocr";
