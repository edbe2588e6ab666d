use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub extraction: ExtractionConfig,
    pub aggregation: AggregationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_keys: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Files beyond this count in one batch are dropped.
    pub max_files: usize,
    pub max_file_size: usize,
}

/// Per-category extraction limits.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    pub pdf_max_pages: usize,
    pub excel_max_sheets: usize,
    /// Data rows shown in the text preview of CSV and Excel tables.
    pub preview_rows: usize,
    /// Index of the last Word paragraph scanned.
    pub word_max_paragraphs: usize,
    pub text_max_chars: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AggregationConfig {
    pub max_images: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_files: 30,
            max_file_size: 50 * 1024 * 1024,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            pdf_max_pages: 10,
            excel_max_sheets: 3,
            preview_rows: 20,
            word_max_paragraphs: 100,
            text_max_chars: 10_000,
        }
    }
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self { max_images: 5 }
    }
}

impl Default for Config {
    fn default() -> Self {
        let upload = UploadConfig::default();
        let extraction = ExtractionConfig::default();
        let aggregation = AggregationConfig::default();

        Self {
            server: ServerConfig {
                host: env::var("INTAKE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("INTAKE_PORT", 3000),
                api_keys: env::var("INTAKE_API_KEYS")
                    .map(|keys| {
                        keys.split(',')
                            .map(|s| s.trim().to_string())
                            .filter(|s| !s.is_empty())
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            upload: UploadConfig {
                max_files: parse_env_or("INTAKE_MAX_FILES", upload.max_files),
                max_file_size: parse_env_or("INTAKE_MAX_FILE_SIZE", upload.max_file_size),
            },
            extraction: ExtractionConfig {
                pdf_max_pages: parse_env_or("INTAKE_PDF_MAX_PAGES", extraction.pdf_max_pages),
                excel_max_sheets: parse_env_or(
                    "INTAKE_EXCEL_MAX_SHEETS",
                    extraction.excel_max_sheets,
                ),
                preview_rows: parse_env_or("INTAKE_PREVIEW_ROWS", extraction.preview_rows),
                word_max_paragraphs: parse_env_or(
                    "INTAKE_WORD_MAX_PARAGRAPHS",
                    extraction.word_max_paragraphs,
                ),
                text_max_chars: parse_env_or("INTAKE_TEXT_MAX_CHARS", extraction.text_max_chars),
            },
            aggregation: AggregationConfig {
                max_images: parse_env_or("INTAKE_MAX_IMAGES", aggregation.max_images),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
