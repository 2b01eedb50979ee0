mod capturer;
mod types;

pub use capturer::FrameCapturer;
pub use types::CapturedFrame;
