use std::sync::{Mutex, PoisonError};

use log::{debug, info, warn};

use crate::capture::FrameCapturer;
use crate::error::OperationError;
use crate::feed::VideoSource;
use crate::guard::{OperationGuard, OperationKind};
use crate::measure::MeasurementMode;
use crate::render::{self, RenderedMeasurement};
use crate::service::MeasureServiceClient;
use crate::workflow::surface::WorkflowSurface;

/// Where an operation of one kind currently stands. `Done` is transient:
/// the controller passes through it while the outcome is surfaced, then
/// settles back at `Idle` once the latch is free again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationPhase {
    Idle,
    Capturing,
    Awaiting,
    Done,
}

struct PhaseCell(Mutex<OperationPhase>);

impl PhaseCell {
    fn new() -> Self {
        Self(Mutex::new(OperationPhase::Idle))
    }

    fn get(&self) -> OperationPhase {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set(&self, phase: OperationPhase) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = phase;
    }
}

/// Drives a full operation from trigger to surfaced outcome: snapshot the
/// selected mode, take the per-kind latch, capture a frame, submit it and
/// surface whatever comes back. Measurements and calibrations run through
/// the same machinery and block each other only within their own kind.
pub struct WorkflowController<S, O>
where
    S: VideoSource,
    O: WorkflowSurface,
{
    source: S,
    capturer: FrameCapturer,
    client: MeasureServiceClient,
    surface: O,
    guard: OperationGuard,
    selected_mode: Mutex<MeasurementMode>,
    measure_phase: PhaseCell,
    calibrate_phase: PhaseCell,
}

impl<S, O> WorkflowController<S, O>
where
    S: VideoSource,
    O: WorkflowSurface,
{
    pub fn new(
        source: S,
        capturer: FrameCapturer,
        client: MeasureServiceClient,
        surface: O,
        initial_mode: MeasurementMode,
    ) -> Self {
        Self {
            source,
            capturer,
            client,
            surface,
            guard: OperationGuard::new(),
            selected_mode: Mutex::new(initial_mode),
            measure_phase: PhaseCell::new(),
            calibrate_phase: PhaseCell::new(),
        }
    }

    /// The mode the next measurement trigger will snapshot.
    pub fn selected_mode(&self) -> MeasurementMode {
        *self
            .selected_mode
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Switch the active mode and refresh the guide overlay. An operation
    /// already in flight keeps the mode it was triggered with.
    pub fn select_mode(&self, mode: MeasurementMode) {
        *self
            .selected_mode
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = mode;
        info!("measurement mode set to {} ({})", mode, mode.label());
        self.surface.show_guide(render::guide_overlay(mode));
    }

    pub fn phase(&self, kind: OperationKind) -> OperationPhase {
        self.phase_cell(kind).get()
    }

    pub fn is_idle(&self, kind: OperationKind) -> bool {
        self.guard.is_idle(kind)
    }

    /// Capture the current frame and submit it under the selected mode.
    /// A trigger that lands while a measurement is already in flight is
    /// dropped, not queued.
    pub fn trigger_measure(&self) {
        let mode = self.selected_mode();
        if !self.guard.try_acquire(OperationKind::Measure) {
            debug!("measurement already in flight, trigger dropped");
            return;
        }

        let outcome = self.run_measure(mode);
        self.set_phase(OperationKind::Measure, OperationPhase::Done);
        match outcome {
            Ok(rendered) => {
                self.surface.show_measurement(&rendered);
                self.guard.release(OperationKind::Measure);
            }
            Err(err) => {
                // The latch is already free by the time the error shows.
                self.guard.release(OperationKind::Measure);
                self.surface
                    .show_error(&failure_message(OperationKind::Measure, &err));
            }
        }
        self.set_phase(OperationKind::Measure, OperationPhase::Idle);
    }

    /// Capture the current frame and submit it together with the physical
    /// size of the reference object. An empty reference size never reaches
    /// the service: the validation error is surfaced immediately and the
    /// latch is left untouched.
    pub fn trigger_calibrate(&self, reference_size: &str) {
        let reference = reference_size.trim();
        if reference.is_empty() {
            warn!("calibration triggered without a reference size");
            self.surface.show_error("Please enter reference size");
            return;
        }
        if !self.guard.try_acquire(OperationKind::Calibrate) {
            debug!("calibration already in flight, trigger dropped");
            return;
        }

        let outcome = self.run_calibrate(reference);
        self.set_phase(OperationKind::Calibrate, OperationPhase::Done);
        match outcome {
            Ok(()) => {
                self.surface.show_success("Calibration successful!");
                self.guard.release(OperationKind::Calibrate);
            }
            Err(err) => {
                self.guard.release(OperationKind::Calibrate);
                self.surface
                    .show_error(&failure_message(OperationKind::Calibrate, &err));
            }
        }
        self.set_phase(OperationKind::Calibrate, OperationPhase::Idle);
    }

    fn run_measure(&self, mode: MeasurementMode) -> Result<RenderedMeasurement, OperationError> {
        self.set_phase(OperationKind::Measure, OperationPhase::Capturing);
        let frame = self
            .capturer
            .capture(&self.source)
            .map_err(OperationError::from)?;

        self.set_phase(OperationKind::Measure, OperationPhase::Awaiting);
        let result = self.client.submit_measurement(&frame, mode)?;

        Ok(render::render(mode, &result)?)
    }

    fn run_calibrate(&self, reference_size: &str) -> Result<(), OperationError> {
        self.set_phase(OperationKind::Calibrate, OperationPhase::Capturing);
        let frame = self
            .capturer
            .capture(&self.source)
            .map_err(OperationError::from)?;

        self.set_phase(OperationKind::Calibrate, OperationPhase::Awaiting);
        self.client.submit_calibration(&frame, reference_size)
    }

    fn phase_cell(&self, kind: OperationKind) -> &PhaseCell {
        match kind {
            OperationKind::Measure => &self.measure_phase,
            OperationKind::Calibrate => &self.calibrate_phase,
        }
    }

    fn set_phase(&self, kind: OperationKind, phase: OperationPhase) {
        debug!("{} phase -> {:?}", kind, phase);
        self.phase_cell(kind).set(phase);
    }
}

/// User-facing text for a failed operation. Transport faults keep the
/// generic `Error:` prefix so they stay distinguishable from a reason the
/// service reported itself.
fn failure_message(kind: OperationKind, error: &OperationError) -> String {
    match error {
        OperationError::Validation(message) => message.clone(),
        OperationError::Service(reason) => {
            format!("{} failed: {}", kind.failure_prefix(), reason)
        }
        OperationError::Transport(detail) => format!("Error: {}", detail),
        OperationError::Render(render) => {
            format!("{} failed: {}", kind.failure_prefix(), render)
        }
    }
}
