mod guides;
mod renderer;
mod types;

pub use guides::guide_overlay;
pub use renderer::render;
pub use types::{GuideOverlay, MeasurementBlock, RenderedMeasurement};
