use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    Image,
    Pdf,
    Excel,
    Csv,
    Word,
    Text,
}

impl FileCategory {
    /// Every category, in dispatch-table order.
    pub const ALL: [FileCategory; 6] = [
        Self::Image,
        Self::Pdf,
        Self::Excel,
        Self::Csv,
        Self::Word,
        Self::Text,
    ];

    /// Lowercase file extensions routed to this category.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Image => &["jpg", "jpeg", "png", "gif", "bmp", "webp"],
            Self::Pdf => &["pdf"],
            Self::Excel => &["xlsx", "xls"],
            Self::Csv => &["csv", "tsv"],
            Self::Word => &["docx", "doc"],
            Self::Text => &["txt", "md", "json"],
        }
    }

    /// Category for a file name, matched on its lowercased final extension.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = std::path::Path::new(filename)
            .extension()?
            .to_str()?
            .to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.extensions().contains(&ext.as_str()))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Pdf => "pdf",
            Self::Excel => "excel",
            Self::Csv => "csv",
            Self::Word => "word",
            Self::Text => "text",
        }
    }
}

impl std::fmt::Display for FileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FileCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image" => Ok(Self::Image),
            "pdf" => Ok(Self::Pdf),
            "excel" => Ok(Self::Excel),
            "csv" => Ok(Self::Csv),
            "word" => Ok(Self::Word),
            "text" => Ok(Self::Text),
            _ => Err(format!("Unknown file category: {s}")),
        }
    }
}
