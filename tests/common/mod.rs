#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};

use measure_station::capture::FrameCapturer;
use measure_station::feed::{FeedFrame, VideoSource};
use measure_station::measure::MeasurementMode;
use measure_station::render::{GuideOverlay, RenderedMeasurement};
use measure_station::service::MeasureServiceClient;
use measure_station::workflow::{WorkflowController, WorkflowSurface};

/// A video source that always serves the same encoded frame.
pub struct StaticSource {
    frame: Arc<FeedFrame>,
}

impl StaticSource {
    pub fn with_test_frame() -> Self {
        Self {
            frame: test_frame(32, 24),
        }
    }
}

impl VideoSource for StaticSource {
    fn dimensions(&self) -> Option<(u32, u32)> {
        None
    }

    fn latest_frame(&self) -> Option<Arc<FeedFrame>> {
        Some(Arc::clone(&self.frame))
    }
}

pub fn test_frame(width: u32, height: u32) -> Arc<FeedFrame> {
    let raster = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 8) as u8, (y * 8) as u8, 96])
    });
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, 90)
        .encode(raster.as_raw(), width, height, image::ColorType::Rgb8)
        .expect("encode test frame");
    Arc::new(FeedFrame {
        bytes: jpeg,
        sequence: 1,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Measurement(RenderedMeasurement),
    Error(String),
    Success(String),
    Guide(Option<GuideOverlay>),
}

/// Surface that records everything the controller shows.
#[derive(Clone, Default)]
pub struct RecordingSurface {
    events: Arc<Mutex<Vec<SurfaceEvent>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn measurements(&self) -> Vec<RenderedMeasurement> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SurfaceEvent::Measurement(rendered) => Some(rendered),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SurfaceEvent::Error(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SurfaceEvent::Success(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: SurfaceEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl WorkflowSurface for RecordingSurface {
    fn show_measurement(&self, rendered: &RenderedMeasurement) {
        self.push(SurfaceEvent::Measurement(rendered.clone()));
    }

    fn show_error(&self, message: &str) {
        self.push(SurfaceEvent::Error(message.to_string()));
    }

    fn show_success(&self, message: &str) {
        self.push(SurfaceEvent::Success(message.to_string()));
    }

    fn show_guide(&self, guide: Option<GuideOverlay>) {
        self.push(SurfaceEvent::Guide(guide));
    }
}

/// Controller wired to a static frame source and a recording surface.
pub fn build_controller(
    base_url: &str,
    mode: MeasurementMode,
) -> (
    WorkflowController<StaticSource, RecordingSurface>,
    RecordingSurface,
) {
    let surface = RecordingSurface::new();
    let client = MeasureServiceClient::new(base_url, None).expect("build client");
    let controller = WorkflowController::new(
        StaticSource::with_test_frame(),
        FrameCapturer::new(80),
        client,
        surface.clone(),
        mode,
    );
    (controller, surface)
}

/// A base URL nothing is listening on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{}", addr)
}

pub struct StubResponse {
    status: u16,
    body: String,
    delay: Option<Duration>,
}

impl StubResponse {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn with_status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub fields: HashMap<String, String>,
}

impl RecordedRequest {
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or_default()
    }
}

/// Minimal HTTP stub for the measurement service: serves the canned
/// responses in order, one connection each, and records what arrived.
pub struct StubService {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl StubService {
    pub fn start(responses: Vec<StubResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let base_url = format!("http://{}", listener.local_addr().expect("stub address"));
        let requests: Arc<Mutex<Vec<RecordedRequest>>> = Arc::default();

        let thread_requests = Arc::clone(&requests);
        let handle = thread::spawn(move || {
            for response in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                let Some(request) = read_request(&mut stream) else {
                    continue;
                };
                thread_requests.lock().unwrap().push(request);

                if let Some(delay) = response.delay {
                    thread::sleep(delay);
                }
                let payload = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    response.status,
                    reason(response.status),
                    response.body.len(),
                    response.body
                );
                let _ = stream.write_all(payload.as_bytes());
                let _ = stream.flush();
            }
        });

        Self {
            base_url,
            requests,
            handle: Some(handle),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Wait until every canned response has been served, then return the
    /// recorded requests.
    pub fn finish(mut self) -> Vec<RecordedRequest> {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        self.requests.lock().unwrap().clone()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        500 => "Internal Server Error",
        _ => "Stub",
    }
}

fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_subslice(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let wanted = header_end + content_length(&headers);
    while buf.len() < wanted {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let path = headers
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or_default()
        .to_string();
    let body = String::from_utf8_lossy(&buf[header_end..buf.len().min(wanted)]).into_owned();

    Some(RecordedRequest {
        path,
        fields: parse_form(&body),
    })
}

fn content_length(headers: &str) -> usize {
    for line in headers.lines() {
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                return value.trim().parse().unwrap_or(0);
            }
        }
    }
    0
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn parse_form(body: &str) -> HashMap<String, String> {
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            Some((percent_decode(key), percent_decode(value)))
        })
        .collect()
}

fn percent_decode(encoded: &str) -> String {
    let bytes = encoded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => match u8::from_str_radix(&encoded[i + 1..i + 3], 16) {
                Ok(byte) => {
                    out.push(byte);
                    i += 3;
                }
                Err(_) => {
                    out.push(b'%');
                    i += 1;
                }
            },
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}
