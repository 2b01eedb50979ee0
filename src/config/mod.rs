mod loader;
mod sections;

pub use loader::Config;
pub use sections::{CaptureConfig, FeedConfig, ServiceConfig};
