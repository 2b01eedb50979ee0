/// Display structure for one measurement response: an optional heading
/// plus one block per measured object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMeasurement {
    pub heading: Option<String>,
    pub blocks: Vec<MeasurementBlock>,
}

/// One fixed-shape result block. Multi-object results label each block;
/// single-result modes leave the label empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementBlock {
    pub label: Option<String>,
    pub lines: Vec<String>,
}

/// Presentational guide drawn over the feed for the selected mode. Has no
/// interaction with the guard or the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideOverlay {
    AngleLine,
    AreaBox,
}
