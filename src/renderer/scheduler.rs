use std::sync::Arc;

use parking_lot::Mutex;

/// Why a redraw was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeReason {
    ImageLoaded,
    StickersChanged,
    SuggestionsChanged,
}

#[derive(Default)]
struct SchedulerState {
    generation: u64,
    rendered: u64,
    last_reason: Option<ChangeReason>,
    repaint: Option<egui::Context>,
}

/// Explicit redraw contract between scene mutators and the render pipeline.
///
/// Every mutation calls [`RenderScheduler::notify_changed`], which bumps the
/// scene generation and wakes the UI. Clones share the same state, so a handle
/// can be moved onto a worker thread.
#[derive(Clone, Default)]
pub struct RenderScheduler {
    inner: Arc<Mutex<SchedulerState>>,
}

impl std::fmt::Debug for RenderScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("RenderScheduler")
            .field("generation", &state.generation)
            .field("rendered", &state.rendered)
            .field("last_reason", &state.last_reason)
            .finish()
    }
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the egui context that should repaint on change
    pub fn attach(&self, ctx: &egui::Context) {
        self.inner.lock().repaint = Some(ctx.clone());
    }

    /// Record a scene change and schedule a redraw
    pub fn notify_changed(&self, reason: ChangeReason) {
        let repaint = {
            let mut state = self.inner.lock();
            state.generation += 1;
            state.last_reason = Some(reason);
            state.repaint.clone()
        };
        log::trace!("scene changed: {:?}", reason);
        if let Some(ctx) = repaint {
            ctx.request_repaint();
        }
    }

    /// Wake the UI without recording a change (e.g. a background result is ready)
    pub fn wake(&self) {
        let repaint = self.inner.lock().repaint.clone();
        if let Some(ctx) = repaint {
            ctx.request_repaint();
        }
    }

    /// True if a change has been recorded since the last completed render.
    ///
    /// egui repaints the whole UI every frame regardless, so this tracks
    /// whether the frame on screen is stale rather than gating the draw.
    pub fn is_pending(&self) -> bool {
        let state = self.inner.lock();
        state.generation != state.rendered
    }

    /// Mark the current generation as drawn
    pub fn mark_rendered(&self) {
        let mut state = self.inner.lock();
        state.rendered = state.generation;
    }

    pub fn generation(&self) -> u64 {
        self.inner.lock().generation
    }

    /// Most recent change not yet drawn
    pub fn pending_reason(&self) -> Option<ChangeReason> {
        let state = self.inner.lock();
        if state.generation == state.rendered {
            return None;
        }
        state.last_reason
    }
}
