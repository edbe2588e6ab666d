use crate::models::FileCategory;

/// Label reported for file names outside the dispatch table.
pub const UNSUPPORTED: &str = "unsupported";

/// Map a file name to its category by case-insensitive extension match.
pub fn detect_category(filename: &str) -> Option<FileCategory> {
    FileCategory::from_filename(filename)
}

pub fn category_label(filename: &str) -> &'static str {
    detect_category(filename)
        .map(FileCategory::as_str)
        .unwrap_or(UNSUPPORTED)
}

/// Upload allow-list: every extension the dispatcher knows, in table order.
pub fn all_extensions() -> Vec<&'static str> {
    FileCategory::ALL
        .into_iter()
        .flat_map(|category| category.extensions().iter().copied())
        .collect()
}
