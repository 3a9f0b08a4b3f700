mod ocr;
pub use ocr::*;

mod annotate;
pub use annotate::*;

mod raster;
pub use raster::*;

mod storage;
pub use storage::*;
