mod common;
mod record;

pub use common::*;
pub use record::*;
