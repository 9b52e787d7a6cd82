//! Pointer-drag state machine for panning the track and drag-zooming from
//! the header strip.
//!
//! Move handlers always recompute from the anchors recorded on pointer-down,
//! so a burst of move events cannot accumulate drift.

use super::document::{PointerDocument, ReleaseSubscription};
use super::viewport::{clamp_zoom, ViewportState};

/// Scroll pixels per pointer pixel while panning.
pub const PAN_SENSITIVITY: f32 = 1.5;
/// Zoom units per pointer pixel while drag-zooming.
pub const ZOOM_SENSITIVITY: f32 = 0.005;

/// Where a pointer-down landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The scrollable track with the bars.
    Track,
    /// The zoom-drag strip in the header.
    ZoomStrip,
}

/// Whether the host should keep dispatching a pointer-down to the elements
/// underneath the one that handled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Panning {
        start_pointer_x: f32,
        anchor_scroll: f32,
    },
    ZoomDragging {
        start_pointer_x: f32,
        initial_zoom: f32,
    },
}

/// What a pointer-move asks the timeline to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragUpdate {
    None,
    /// New (unclamped) scroll offset.
    Scroll(f32),
    /// New clamped zoom level.
    Zoom(f32),
}

/// Cursor the host should show for the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Grab,
    Grabbing,
    ResizeHorizontal,
}

#[derive(Debug)]
pub struct InteractionController {
    state: DragState,
    release: Option<ReleaseSubscription>,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
            release: None,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, DragState::Idle)
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.state, DragState::Panning { .. })
    }

    pub fn is_zooming(&self) -> bool {
        matches!(self.state, DragState::ZoomDragging { .. })
    }

    /// Whether a window-wide release listener is attached.
    pub fn is_listening(&self) -> bool {
        self.release.is_some()
    }

    pub fn cursor(&self) -> CursorHint {
        match self.state {
            DragState::Idle => CursorHint::Grab,
            DragState::Panning { .. } => CursorHint::Grabbing,
            DragState::ZoomDragging { .. } => CursorHint::ResizeHorizontal,
        }
    }

    /// Start a drag. Ignored while another drag is in progress.
    ///
    /// A press on the zoom strip stops propagation, so the same gesture can
    /// never also reach the track and start a pan.
    pub fn pointer_down(
        &mut self,
        target: PointerTarget,
        x: f32,
        viewport: &ViewportState,
        document: &mut PointerDocument,
    ) -> Propagation {
        if !self.is_idle() {
            return Propagation::Stop;
        }
        self.state = match target {
            PointerTarget::Track => DragState::Panning {
                start_pointer_x: x,
                anchor_scroll: viewport.scroll_offset(),
            },
            PointerTarget::ZoomStrip => DragState::ZoomDragging {
                start_pointer_x: x,
                initial_zoom: viewport.zoom_level(),
            },
        };
        self.release = Some(document.subscribe());
        log::debug!("Drag started: {:?}", self.state);
        match target {
            PointerTarget::Track => Propagation::Continue,
            PointerTarget::ZoomStrip => Propagation::Stop,
        }
    }

    pub fn pointer_move(&self, x: f32) -> DragUpdate {
        match self.state {
            DragState::Idle => DragUpdate::None,
            DragState::Panning {
                start_pointer_x,
                anchor_scroll,
            } => {
                let delta = (x - start_pointer_x) * PAN_SENSITIVITY;
                DragUpdate::Scroll(anchor_scroll - delta)
            }
            DragState::ZoomDragging {
                start_pointer_x,
                initial_zoom,
            } => {
                let change = (x - start_pointer_x) * ZOOM_SENSITIVITY;
                DragUpdate::Zoom(clamp_zoom(initial_zoom + change))
            }
        }
    }

    /// Release delivered to the timeline itself. Returns true if a drag ended.
    pub fn pointer_up(&mut self) -> bool {
        self.end_drag()
    }

    /// Pick up a release the document saw elsewhere. Returns true if a drag
    /// ended.
    pub fn poll_release(&mut self) -> bool {
        match &self.release {
            Some(sub) if sub.fired() => self.end_drag(),
            _ => false,
        }
    }

    /// Abandon any drag and detach listeners, e.g. on project switch.
    pub fn cancel(&mut self) {
        self.end_drag();
    }

    fn end_drag(&mut self) -> bool {
        self.release = None;
        let was_dragging = !self.is_idle();
        if was_dragging {
            log::debug!("Drag ended: {:?}", self.state);
        }
        self.state = DragState::Idle;
        was_dragging
    }
}
