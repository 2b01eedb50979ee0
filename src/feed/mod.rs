mod mjpeg;
mod source;

pub use mjpeg::MjpegFeed;
pub use source::{FeedFrame, VideoSource};
