use serde::Serialize;

use crate::models::FileCategory;
use crate::processing::all_extensions;

/// One supported category and the extensions routed to it.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct FormatEntry {
    pub category: FileCategory,
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct FormatsResponse {
    pub formats: Vec<FormatEntry>,
    /// Every accepted extension, suitable for a file picker's accept list.
    pub accept: Vec<String>,
}

impl FormatsResponse {
    pub fn supported() -> Self {
        let formats = FileCategory::ALL
            .iter()
            .map(|&category| FormatEntry {
                category,
                extensions: category
                    .extensions()
                    .iter()
                    .map(|ext| ext.to_string())
                    .collect(),
            })
            .collect();

        Self {
            formats,
            accept: all_extensions().into_iter().map(str::to_string).collect(),
        }
    }
}
