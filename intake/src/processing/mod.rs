mod aggregate;
mod dispatch;
mod processor;

pub mod encoding;
pub mod extractors;

pub use aggregate::{
    aggregate, collect_tables, create_summary, extract_all_text, images_for_ai, AiPayload,
    NamedTable,
};
pub use dispatch::{all_extensions, category_label, detect_category, UNSUPPORTED};
pub use processor::FileProcessor;
