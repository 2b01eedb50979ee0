use std::sync::Arc;

/// One complete encoded frame lifted from the live feed, exactly as it
/// appeared on the stream.
#[derive(Debug, Clone)]
pub struct FeedFrame {
    pub bytes: Vec<u8>,
    /// 1-based count of frames seen since the reader connected.
    pub sequence: u64,
}

/// A live video source the capturer can snapshot.
///
/// Implementations hand out the most recent complete frame only; there is
/// no history and no queueing. `dimensions` reports the display size when
/// the source knows it ahead of decoding; when it returns `None` the
/// frame's own size is used.
pub trait VideoSource: Send + Sync {
    fn dimensions(&self) -> Option<(u32, u32)>;
    fn latest_frame(&self) -> Option<Arc<FeedFrame>>;
}
