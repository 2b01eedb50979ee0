use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// An encoded still image snapshotted from the live feed. Created fresh
/// per operation and discarded once the round trip completes; nothing is
/// cached between operations.
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    pub jpeg: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl CapturedFrame {
    pub fn new(jpeg: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            jpeg,
            width,
            height,
        }
    }

    /// The `image` form field: `data:image/jpeg;base64,<payload>`. The
    /// service splits on the comma and base64-decodes the remainder.
    pub fn to_data_url(&self) -> String {
        let mut url = String::with_capacity(self.jpeg.len() / 3 * 4 + 32);
        url.push_str("data:image/jpeg;base64,");
        STANDARD.encode_string(&self.jpeg, &mut url);
        url
    }
}
