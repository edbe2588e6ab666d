use std::sync::Arc;

use crate::config::Config;
use crate::processing::FileProcessor;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub processor: FileProcessor,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let processor = FileProcessor::new(config.extraction.clone(), &config.upload);

        Self {
            config: Arc::new(config),
            processor,
        }
    }
}
