mod engine;
mod tsv;

pub use engine::OcrEngine;
pub use tsv::parse_tsv;
