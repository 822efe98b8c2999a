use egui::{Event, PointerButton, Pos2, Rect, TouchId};

use super::{TouchEvent, TouchPhase};

/// Converts raw egui input into [`TouchEvent`]s carrying every active touch point.
///
/// Touches must land inside the canvas to be tracked. On devices without a
/// touch screen the primary mouse button acts as a single finger. egui also
/// synthesizes pointer events from touches, so once a touch device has been
/// seen the mouse path is ignored.
#[derive(Debug, Default)]
pub struct TouchTracker {
    active: Vec<(TouchId, Pos2)>,
    touch_device_seen: bool,
    mouse_down: bool,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fingers currently tracked
    #[cfg(test)]
    fn active_count(&self) -> usize {
        if self.mouse_down {
            1
        } else {
            self.active.len()
        }
    }

    /// Process one frame worth of egui events
    pub fn process_events(&mut self, events: &[Event], canvas: Rect) -> Vec<TouchEvent> {
        if events.iter().any(|e| matches!(e, Event::Touch { .. })) {
            self.touch_device_seen = true;
        }

        events
            .iter()
            .filter_map(|event| match event {
                Event::Touch { id, phase, pos, .. } => self.on_touch(*id, *phase, *pos, canvas),
                _ if self.touch_device_seen => None,
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    ..
                } => self.on_mouse_button(*pos, *pressed, canvas),
                Event::PointerMoved(pos) if self.mouse_down => {
                    Some(TouchEvent::new(TouchPhase::Move, vec![*pos]))
                }
                Event::PointerGone if self.mouse_down => {
                    self.mouse_down = false;
                    Some(TouchEvent::new(TouchPhase::End, Vec::new()))
                }
                _ => None,
            })
            .collect()
    }

    fn on_touch(
        &mut self,
        id: TouchId,
        phase: egui::TouchPhase,
        pos: Pos2,
        canvas: Rect,
    ) -> Option<TouchEvent> {
        let tracked = self.active.iter().position(|(touch, _)| *touch == id);
        match (phase, tracked) {
            (egui::TouchPhase::Start, None) => {
                if !canvas.contains(pos) {
                    return None;
                }
                self.active.push((id, pos));
                Some(self.snapshot(TouchPhase::Start))
            }
            (egui::TouchPhase::Start | egui::TouchPhase::Move, Some(index)) => {
                self.active[index].1 = pos;
                Some(self.snapshot(TouchPhase::Move))
            }
            (egui::TouchPhase::End | egui::TouchPhase::Cancel, Some(index)) => {
                self.active.remove(index);
                Some(self.snapshot(TouchPhase::End))
            }
            _ => None,
        }
    }

    fn on_mouse_button(&mut self, pos: Pos2, pressed: bool, canvas: Rect) -> Option<TouchEvent> {
        if pressed && !self.mouse_down && canvas.contains(pos) {
            self.mouse_down = true;
            Some(TouchEvent::new(TouchPhase::Start, vec![pos]))
        } else if !pressed && self.mouse_down {
            self.mouse_down = false;
            Some(TouchEvent::new(TouchPhase::End, Vec::new()))
        } else {
            None
        }
    }

    fn snapshot(&self, phase: TouchPhase) -> TouchEvent {
        TouchEvent::new(phase, self.active.iter().map(|(_, pos)| *pos).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Modifiers, TouchDeviceId, pos2};

    fn touch(id: u64, phase: egui::TouchPhase, pos: Pos2) -> Event {
        Event::Touch {
            device_id: TouchDeviceId(0),
            id: TouchId(id),
            phase,
            pos,
            force: None,
        }
    }

    fn mouse(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn test_second_finger_reports_both_points() {
        let mut tracker = TouchTracker::new();
        let events = tracker.process_events(
            &[
                touch(1, egui::TouchPhase::Start, pos2(1.0, 1.0)),
                touch(2, egui::TouchPhase::Start, pos2(5.0, 5.0)),
            ],
            Rect::EVERYTHING,
        );
        assert_eq!(
            events,
            vec![
                TouchEvent::start([pos2(1.0, 1.0)]),
                TouchEvent::start([pos2(1.0, 1.0), pos2(5.0, 5.0)]),
            ]
        );
        assert_eq!(tracker.active_count(), 2);
    }

    #[test]
    fn test_move_and_end_update_active_set() {
        let mut tracker = TouchTracker::new();
        tracker.process_events(
            &[
                touch(1, egui::TouchPhase::Start, pos2(1.0, 1.0)),
                touch(2, egui::TouchPhase::Start, pos2(5.0, 5.0)),
            ],
            Rect::EVERYTHING,
        );
        let events = tracker.process_events(
            &[
                touch(2, egui::TouchPhase::Move, pos2(7.0, 5.0)),
                touch(1, egui::TouchPhase::End, pos2(1.0, 1.0)),
                touch(2, egui::TouchPhase::Cancel, pos2(7.0, 5.0)),
            ],
            Rect::EVERYTHING,
        );
        assert_eq!(
            events,
            vec![
                TouchEvent::moved([pos2(1.0, 1.0), pos2(7.0, 5.0)]),
                TouchEvent::end([pos2(7.0, 5.0)]),
                TouchEvent::new(TouchPhase::End, vec![]),
            ]
        );
        assert_eq!(tracker.active_count(), 0);
    }

    #[test]
    fn test_touch_outside_canvas_is_ignored() {
        let mut tracker = TouchTracker::new();
        let canvas = Rect::from_min_max(pos2(0.0, 0.0), pos2(10.0, 10.0));
        let events = tracker.process_events(
            &[
                touch(1, egui::TouchPhase::Start, pos2(50.0, 50.0)),
                touch(1, egui::TouchPhase::Move, pos2(5.0, 5.0)),
            ],
            canvas,
        );
        assert!(events.is_empty());
    }

    #[test]
    fn test_mouse_acts_as_single_finger() {
        let mut tracker = TouchTracker::new();
        let events = tracker.process_events(
            &[
                mouse(pos2(2.0, 2.0), true),
                Event::PointerMoved(pos2(4.0, 3.0)),
                mouse(pos2(4.0, 3.0), false),
                Event::PointerMoved(pos2(9.0, 9.0)),
            ],
            Rect::EVERYTHING,
        );
        assert_eq!(
            events,
            vec![
                TouchEvent::start([pos2(2.0, 2.0)]),
                TouchEvent::moved([pos2(4.0, 3.0)]),
                TouchEvent::new(TouchPhase::End, vec![]),
            ]
        );
    }

    #[test]
    fn test_synthesized_pointer_events_are_ignored_after_touch() {
        let mut tracker = TouchTracker::new();
        let events = tracker.process_events(
            &[
                touch(1, egui::TouchPhase::Start, pos2(2.0, 2.0)),
                mouse(pos2(2.0, 2.0), true),
            ],
            Rect::EVERYTHING,
        );
        assert_eq!(events, vec![TouchEvent::start([pos2(2.0, 2.0)])]);
    }
}
