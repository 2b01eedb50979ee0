mod controller;
mod surface;

pub use controller::{OperationPhase, WorkflowController};
pub use surface::{ConsoleSurface, WorkflowSurface};
