//! Pointer and keyboard mapping
//!
//! Turns winit events into camera moves and [`ControlAction`]s. The HUD gets
//! first refusal on every press; whatever it doesn't claim drives the camera.

use lattice_services::hud::{HudLayout, HudTarget};
use lattice_services::{ControlAction, Scrubber};
use winit::event::{MouseButton, MouseScrollDelta};
use winit::keyboard::{Key, NamedKey};

/// Pixels of smooth scrolling that count as one wheel line.
const PIXELS_PER_LINE: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drag {
    Rotate,
    Pan,
    Scrub,
}

/// What a pointer movement asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEffect {
    Control(ControlAction),
    Rotate { dx: f32, dy: f32 },
    Pan { dx: f32, dy: f32 },
}

#[derive(Debug, Default)]
pub struct Pointer {
    x: f32,
    y: f32,
    drag: Option<(MouseButton, Drag)>,
}

impl Pointer {
    pub fn moved(&mut self, x: f32, y: f32, hud: &HudLayout) -> Option<PointerEffect> {
        let (dx, dy) = (x - self.x, y - self.y);
        self.x = x;
        self.y = y;
        match self.drag? {
            (_, Drag::Rotate) => Some(PointerEffect::Rotate { dx, dy }),
            (_, Drag::Pan) => Some(PointerEffect::Pan { dx, dy }),
            (_, Drag::Scrub) => Some(PointerEffect::Control(ControlAction::ScrubTo(
                hud.slider_fraction(x),
            ))),
        }
    }

    pub fn pressed(&mut self, button: MouseButton, hud: &HudLayout) -> Option<ControlAction> {
        if self.drag.is_some() {
            return None;
        }
        if button == MouseButton::Left {
            match hud.hit(self.x, self.y) {
                Some(HudTarget::PlayButton) => return Some(ControlAction::TogglePlay),
                Some(HudTarget::Slider(fraction)) => {
                    self.drag = Some((button, Drag::Scrub));
                    return Some(ControlAction::ScrubTo(fraction));
                }
                None => {}
            }
        }
        if hud.captures(self.x, self.y) {
            return None;
        }
        self.drag = match button {
            MouseButton::Left => Some((button, Drag::Rotate)),
            MouseButton::Right | MouseButton::Middle => Some((button, Drag::Pan)),
            _ => None,
        };
        None
    }

    pub fn released(&mut self, button: MouseButton) {
        if matches!(self.drag, Some((held, _)) if held == button) {
            self.drag = None;
        }
    }

    /// Lines to dolly for a wheel event, or `None` when the HUD is under the
    /// pointer.
    pub fn wheel(&self, delta: MouseScrollDelta, hud: &HudLayout) -> Option<f32> {
        if hud.captures(self.x, self.y) {
            return None;
        }
        Some(match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
        })
    }
}

/// Space toggles playback; arrows step one scrubber notch, or a whole day
/// with Shift.
pub fn key_action(key: &Key, shift: bool, scrubber: &Scrubber) -> Option<ControlAction> {
    let step = if shift { 1.0 } else { scrubber.step };
    match key {
        Key::Named(NamedKey::Space) => Some(ControlAction::TogglePlay),
        Key::Named(NamedKey::ArrowLeft) => Some(ControlAction::StepDay(-step)),
        Key::Named(NamedKey::ArrowRight) => Some(ControlAction::StepDay(step)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    fn hud() -> HudLayout {
        HudLayout::new(720, 1.0)
    }

    #[test]
    fn drag_in_scene_rotates() {
        let hud = hud();
        let mut pointer = Pointer::default();
        pointer.moved(600.0, 200.0, &hud);
        assert_eq!(pointer.pressed(MouseButton::Left, &hud), None);
        assert_eq!(
            pointer.moved(610.0, 195.0, &hud),
            Some(PointerEffect::Rotate { dx: 10.0, dy: -5.0 })
        );
        pointer.released(MouseButton::Left);
        assert_eq!(pointer.moved(620.0, 195.0, &hud), None);
    }

    #[test]
    fn right_drag_pans() {
        let hud = hud();
        let mut pointer = Pointer::default();
        pointer.moved(600.0, 200.0, &hud);
        pointer.pressed(MouseButton::Right, &hud);
        assert!(matches!(
            pointer.moved(600.0, 210.0, &hud),
            Some(PointerEffect::Pan { .. })
        ));
        // Releasing a different button keeps the drag
        pointer.released(MouseButton::Left);
        assert!(pointer.moved(600.0, 220.0, &hud).is_some());
    }

    #[test]
    fn play_button_toggles() {
        let hud = hud();
        let mut pointer = Pointer::default();
        let b = hud.button;
        pointer.moved(b.x + b.w / 2.0, b.y + b.h / 2.0, &hud);
        assert_eq!(
            pointer.pressed(MouseButton::Left, &hud),
            Some(ControlAction::TogglePlay)
        );
        assert_eq!(pointer.moved(b.x + 1.0, b.y + 1.0, &hud), None);
    }

    #[test]
    fn slider_drag_scrubs_continuously() {
        let hud = hud();
        let mut pointer = Pointer::default();
        let t = hud.track;
        pointer.moved(t.x + t.w * 0.5, t.y + t.h / 2.0, &hud);
        match pointer.pressed(MouseButton::Left, &hud) {
            Some(ControlAction::ScrubTo(f)) => assert!((f - 0.5).abs() < 1e-4),
            other => panic!("unexpected {other:?}"),
        }
        // Leaving the track keeps scrubbing, clamped
        match pointer.moved(t.x + t.w * 2.0, 10.0, &hud) {
            Some(PointerEffect::Control(ControlAction::ScrubTo(f))) => assert_eq!(f, 1.0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn panel_swallows_presses_and_wheel() {
        let hud = hud();
        let mut pointer = Pointer::default();
        let p = hud.panel;
        pointer.moved(p.x + 2.0, p.y + 2.0, &hud);
        assert_eq!(pointer.pressed(MouseButton::Left, &hud), None);
        assert_eq!(pointer.moved(p.x + 3.0, p.y + 3.0, &hud), None);
        assert_eq!(pointer.wheel(MouseScrollDelta::LineDelta(0.0, 1.0), &hud), None);
    }

    #[test]
    fn wheel_units() {
        let hud = hud();
        let mut pointer = Pointer::default();
        pointer.moved(600.0, 100.0, &hud);
        assert_eq!(
            pointer.wheel(MouseScrollDelta::LineDelta(0.0, 2.0), &hud),
            Some(2.0)
        );
        assert_eq!(
            pointer.wheel(
                MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -100.0)),
                &hud
            ),
            Some(-2.0)
        );
    }

    #[test]
    fn keys() {
        let s = Scrubber::default();
        assert_eq!(
            key_action(&Key::Named(NamedKey::Space), false, &s),
            Some(ControlAction::TogglePlay)
        );
        assert_eq!(
            key_action(&Key::Named(NamedKey::ArrowLeft), false, &s),
            Some(ControlAction::StepDay(-0.01))
        );
        assert_eq!(
            key_action(&Key::Named(NamedKey::ArrowRight), true, &s),
            Some(ControlAction::StepDay(1.0))
        );
        assert_eq!(key_action(&Key::Named(NamedKey::Enter), false, &s), None);
    }
}
