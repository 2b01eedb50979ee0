use std::fs;
use std::time::Duration;

use measure_station::capture::FrameCapturer;
use measure_station::config::FeedConfig;
use measure_station::feed::MjpegFeed;

// Grab a single still from a running feed and write it to capture.jpg.
fn main() -> anyhow::Result<()> {
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://127.0.0.1:8000/video_feed/".to_string());

    let feed = MjpegFeed::connect(&FeedConfig::new().with_url(url))?;
    anyhow::ensure!(
        feed.wait_for_frame(Duration::from_secs(10)),
        "feed produced no frame within 10s"
    );

    let still = FrameCapturer::new(80).capture(&feed)?;
    fs::write("capture.jpg", &still.jpeg)?;
    println!(
        "wrote capture.jpg ({}x{}, {} bytes)",
        still.width,
        still.height,
        still.jpeg.len()
    );

    Ok(())
}
