use egui::Pos2;

use super::{TouchEvent, TouchPhase};
use crate::store::GroupDelta;

/// State of the touch interaction in progress
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureSession {
    #[default]
    Idle,
    /// One finger down; `anchor` is the last seen point
    Dragging { anchor: Pos2 },
    /// Two or more fingers down; `baseline` is the last seen distance between the first two
    Pinching { baseline: f32 },
}

/// Turns raw touch events into group translate/scale deltas.
///
/// Classification happens on `Start` only: one point drags, two or more pinch.
/// Both gestures are incremental, so every `Move` reports the change since the
/// previous event rather than since the gesture began.
#[derive(Debug, Default)]
pub struct GestureInterpreter {
    session: GestureSession,
}

impl GestureInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> GestureSession {
        self.session
    }

    /// Feed one event, returning the delta to apply to the sticker group
    pub fn handle(&mut self, event: &TouchEvent) -> Option<GroupDelta> {
        match event.phase {
            TouchPhase::Start => {
                self.begin(&event.points);
                None
            }
            TouchPhase::Move => self.update(&event.points),
            TouchPhase::End => {
                if self.session != GestureSession::Idle {
                    log::debug!("gesture ended from {:?}", self.session);
                }
                self.session = GestureSession::Idle;
                None
            }
        }
    }

    fn begin(&mut self, points: &[Pos2]) {
        self.session = match points {
            [] => GestureSession::Idle,
            [anchor] => GestureSession::Dragging { anchor: *anchor },
            [a, b, ..] => GestureSession::Pinching {
                baseline: a.distance(*b),
            },
        };
        log::debug!("gesture started: {:?}", self.session);
    }

    fn update(&mut self, points: &[Pos2]) -> Option<GroupDelta> {
        match (&mut self.session, points) {
            (GestureSession::Dragging { anchor }, [current]) => {
                let delta = *current - *anchor;
                *anchor = *current;
                Some(GroupDelta::translate(delta))
            }
            (GestureSession::Pinching { baseline }, [a, b, ..]) => {
                let current = a.distance(*b);
                let previous = std::mem::replace(baseline, current);
                if previous == 0.0 {
                    log::debug!("pinch baseline is zero, ignoring move");
                    return None;
                }
                Some(GroupDelta::scale(current / previous))
            }
            // Touch count does not match the active gesture
            _ => None,
        }
    }
}
