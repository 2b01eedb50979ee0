use log::{error, info};

use crate::render::{GuideOverlay, RenderedMeasurement};

/// Where workflow outcomes land. The controller never prints or logs an
/// outcome directly; it hands results, failures and guide changes to the
/// surface it was built with.
pub trait WorkflowSurface: Send + Sync {
    /// A completed measurement, ready for display.
    fn show_measurement(&self, rendered: &RenderedMeasurement);

    /// A failed operation. The message is already user-facing text.
    fn show_error(&self, message: &str);

    /// A completed operation that has no measurement to show.
    fn show_success(&self, message: &str);

    /// The guide overlay matching the selected mode, or `None` to clear it.
    fn show_guide(&self, guide: Option<GuideOverlay>);
}

/// Console rendition of the surface: measurements go to stdout, errors
/// and notices through the log.
#[derive(Debug, Default)]
pub struct ConsoleSurface;

impl ConsoleSurface {
    pub fn new() -> Self {
        Self
    }
}

impl WorkflowSurface for ConsoleSurface {
    fn show_measurement(&self, rendered: &RenderedMeasurement) {
        if let Some(heading) = &rendered.heading {
            println!("{}", heading);
        }
        for block in &rendered.blocks {
            match &block.label {
                Some(label) => {
                    println!("{}", label);
                    for line in &block.lines {
                        println!("  {}", line);
                    }
                }
                None => {
                    for line in &block.lines {
                        println!("{}", line);
                    }
                }
            }
        }
    }

    fn show_error(&self, message: &str) {
        error!("{}", message);
    }

    fn show_success(&self, message: &str) {
        info!("{}", message);
    }

    fn show_guide(&self, guide: Option<GuideOverlay>) {
        match guide {
            Some(GuideOverlay::AngleLine) => info!("guide overlay: place the object along the line"),
            Some(GuideOverlay::AreaBox) => info!("guide overlay: fit the object inside the box"),
            None => {}
        }
    }
}
