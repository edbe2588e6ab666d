pub mod files;
pub mod formats;
pub(crate) mod health;

pub use health::health_check;
