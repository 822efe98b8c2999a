use egui::Pos2;

pub mod gestures;
mod tracker;

pub use gestures::{GestureInterpreter, GestureSession};
pub use tracker::TouchTracker;

/// Phase of a touch interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
}

/// A touch input event carrying every currently active touch point
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    /// Active points in the order the fingers landed
    pub points: Vec<Pos2>,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, points: Vec<Pos2>) -> Self {
        Self { phase, points }
    }

    pub fn start(points: impl IntoIterator<Item = Pos2>) -> Self {
        Self::new(TouchPhase::Start, points.into_iter().collect())
    }

    pub fn moved(points: impl IntoIterator<Item = Pos2>) -> Self {
        Self::new(TouchPhase::Move, points.into_iter().collect())
    }

    pub fn end(points: impl IntoIterator<Item = Pos2>) -> Self {
        Self::new(TouchPhase::End, points.into_iter().collect())
    }
}
