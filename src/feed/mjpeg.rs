use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{debug, info, trace, warn};
use reqwest::blocking::{Client, Response};

use super::source::{FeedFrame, VideoSource};
use crate::config::FeedConfig;

const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];
const JPEG_EOI: [u8; 2] = [0xFF, 0xD9];
const READ_CHUNK: usize = 64 * 1024;

type LatestFrame = Arc<Mutex<Option<Arc<FeedFrame>>>>;

/// Client for the service's `multipart/x-mixed-replace` MJPEG feed.
///
/// A background reader scans the stream for complete JPEG frames and keeps
/// only the newest one in a shared slot; captures always see the most
/// recent picture, never a backlog. The reader reconnects with a delay
/// after stream end or transport errors.
pub struct MjpegFeed {
    latest: LatestFrame,
    display: Option<(u32, u32)>,
    running: Arc<AtomicBool>,
    // Held so the thread has an owner; the reader may be parked in a
    // blocking read, so stop() only flips the flag and never joins.
    _reader: thread::JoinHandle<()>,
}

impl MjpegFeed {
    /// Spawn the background reader for the configured feed URL.
    pub fn connect(config: &FeedConfig) -> Result<Self> {
        let latest: LatestFrame = Arc::new(Mutex::new(None));
        let running = Arc::new(AtomicBool::new(true));

        let reader_latest = Arc::clone(&latest);
        let reader_running = Arc::clone(&running);
        let url = config.url.clone();
        let reopen_delay = Duration::from_millis(config.reopen_delay_ms);

        let reader = thread::Builder::new()
            .name("mjpeg-feed-reader".into())
            .spawn(move || run_reader(url, reopen_delay, reader_latest, reader_running))
            .context("Failed to spawn feed reader thread")?;

        Ok(Self {
            latest,
            display: config.display_dimensions(),
            running,
            _reader: reader,
        })
    }

    /// Block until the feed has produced its first frame, or until
    /// `timeout` elapses. Returns whether a frame is available.
    pub fn wait_for_frame(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.latest_frame().is_some() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(20));
        }
    }

    /// Ask the reader to stop. It exits at the next frame boundary or
    /// read error.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

impl Drop for MjpegFeed {
    fn drop(&mut self) {
        self.stop();
    }
}

impl VideoSource for MjpegFeed {
    fn dimensions(&self) -> Option<(u32, u32)> {
        self.display
    }

    fn latest_frame(&self) -> Option<Arc<FeedFrame>> {
        match self.latest.lock() {
            Ok(slot) => slot.clone(),
            Err(_) => None,
        }
    }
}

fn run_reader(url: String, reopen_delay: Duration, latest: LatestFrame, running: Arc<AtomicBool>) {
    // The feed never ends on its own, so the usual whole-request timeout
    // must stay off; only connecting is bounded.
    let client = match Client::builder()
        .timeout(Option::<Duration>::None)
        .connect_timeout(Duration::from_secs(10))
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            warn!("Failed to build HTTP client for {}: {}", url, err);
            return;
        }
    };

    let mut sequence = 0u64;
    while running.load(Ordering::Relaxed) {
        match client.get(&url).send() {
            Ok(response) if response.status().is_success() => {
                info!("Connected to video feed at {}", url);
                read_stream(response, &latest, &running, &mut sequence);
                if running.load(Ordering::Relaxed) {
                    info!("Video feed ended, reconnecting in {:?}", reopen_delay);
                    thread::sleep(reopen_delay);
                }
            }
            Ok(response) => {
                warn!(
                    "Video feed {} answered with status {}",
                    url,
                    response.status()
                );
                thread::sleep(reopen_delay);
            }
            Err(err) => {
                warn!("Waiting for video feed {}: {}", url, err);
                thread::sleep(reopen_delay);
            }
        }
    }
    debug!("Feed reader stopped");
}

fn read_stream(
    mut response: Response,
    latest: &LatestFrame,
    running: &Arc<AtomicBool>,
    sequence: &mut u64,
) {
    let mut pending = Vec::with_capacity(READ_CHUNK * 2);
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        if !running.load(Ordering::Relaxed) {
            return;
        }
        match response.read(&mut chunk) {
            Ok(0) => return,
            Ok(n) => {
                pending.extend_from_slice(&chunk[..n]);
                while let Some(bytes) = next_jpeg(&mut pending) {
                    *sequence += 1;
                    trace!("feed frame {} ({} bytes)", sequence, bytes.len());
                    let frame = Arc::new(FeedFrame {
                        bytes,
                        sequence: *sequence,
                    });
                    if let Ok(mut slot) = latest.lock() {
                        *slot = Some(frame);
                    }
                }
            }
            Err(err) => {
                warn!("Video feed read error: {}", err);
                return;
            }
        }
    }
}

/// Pull the next complete JPEG out of the pending bytes. Part headers and
/// boundary text between frames are skipped; an incomplete frame stays
/// buffered until the rest arrives.
fn next_jpeg(pending: &mut Vec<u8>) -> Option<Vec<u8>> {
    let Some(start) = find_marker(pending, &JPEG_SOI) else {
        if pending.len() > READ_CHUNK {
            pending.clear();
        }
        return None;
    };

    if start > 0 {
        pending.drain(..start);
    }

    let end = find_marker(pending, &JPEG_EOI)?;
    let cut = (end + 2).min(pending.len());
    let frame = pending[..cut].to_vec();
    pending.drain(..cut);
    Some(frame)
}

fn find_marker(haystack: &[u8], marker: &[u8; 2]) -> Option<usize> {
    haystack.windows(2).position(|window| window == marker)
}
