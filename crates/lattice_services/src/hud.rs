//! Heads-up display layout
//!
//! Screen-space geometry of the play button and day slider, in physical
//! pixels with the origin at the top-left of the window.

use lattice_core::time::{LATTICE_PERIOD_DAYS, LUNAR_PERIOD_DAYS};

const MARGIN: f32 = 24.0;
const PADDING: f32 = 12.0;
const BUTTON: f32 = 36.0;
const TRACK_WIDTH: f32 = 320.0;
const TRACK_HEIGHT: f32 = 6.0;
const HANDLE: f32 = 14.0;
/// Extra vertical slop so the thin track is easy to grab.
const TRACK_GRAB: f32 = 10.0;

pub const PANEL_COLOR: [f32; 4] = [0.02, 0.04, 0.08, 0.75];
pub const TRACK_COLOR: [f32; 4] = [0.2, 0.25, 0.35, 1.0];
pub const FILL_COLOR: [f32; 4] = [0.2, 0.4, 1.0, 1.0];
pub const HANDLE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const BUTTON_COLOR: [f32; 4] = [0.1, 0.15, 0.25, 1.0];
pub const GLYPH_COLOR: [f32; 4] = [0.85, 0.9, 1.0, 1.0];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.w && y >= self.y && y <= self.y + self.h
    }

    fn inflate(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            x: self.x - dx,
            y: self.y - dy,
            w: self.w + 2.0 * dx,
            h: self.h + 2.0 * dy,
        }
    }
}

/// A filled primitive to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HudShape {
    Rect { rect: Rect, color: [f32; 4] },
    Triangle { points: [[f32; 2]; 3], color: [f32; 4] },
}

/// What a pointer press landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HudTarget {
    PlayButton,
    /// Position along the slider track, `0.0..=1.0`.
    Slider(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudLayout {
    pub panel: Rect,
    pub button: Rect,
    pub track: Rect,
    scale: f32,
}

impl HudLayout {
    /// Layout for a window of `height` physical pixels at `scale` pixels per
    /// logical pixel.
    pub fn new(height: u32, scale: f32) -> Self {
        let s = scale.max(0.1);
        let panel_h = (BUTTON + 2.0 * PADDING) * s;
        let panel = Rect {
            x: MARGIN * s,
            y: height as f32 - MARGIN * s - panel_h,
            w: (BUTTON + TRACK_WIDTH + 3.0 * PADDING) * s,
            h: panel_h,
        };
        let button = Rect {
            x: panel.x + PADDING * s,
            y: panel.y + PADDING * s,
            w: BUTTON * s,
            h: BUTTON * s,
        };
        let track = Rect {
            x: button.x + button.w + PADDING * s,
            y: button.y + (BUTTON - TRACK_HEIGHT) * 0.5 * s,
            w: TRACK_WIDTH * s,
            h: TRACK_HEIGHT * s,
        };
        Self {
            panel,
            button,
            track,
            scale: s,
        }
    }

    pub fn hit(&self, x: f32, y: f32) -> Option<HudTarget> {
        if self.button.contains(x, y) {
            return Some(HudTarget::PlayButton);
        }
        if self.track.inflate(0.0, TRACK_GRAB * self.scale).contains(x, y) {
            return Some(HudTarget::Slider(self.slider_fraction(x)));
        }
        None
    }

    /// Track position under `x`, clamped; used while dragging.
    pub fn slider_fraction(&self, x: f32) -> f32 {
        ((x - self.track.x) / self.track.w).clamp(0.0, 1.0)
    }

    /// Whether the pointer is over any HUD element (and not the scene).
    pub fn captures(&self, x: f32, y: f32) -> bool {
        self.panel.contains(x, y)
    }

    pub fn shapes(&self, fraction: f32, playing: bool) -> Vec<HudShape> {
        let s = self.scale;
        let fraction = fraction.clamp(0.0, 1.0);
        let mut shapes = vec![
            HudShape::Rect {
                rect: self.panel,
                color: PANEL_COLOR,
            },
            HudShape::Rect {
                rect: self.button,
                color: BUTTON_COLOR,
            },
            HudShape::Rect {
                rect: self.track,
                color: TRACK_COLOR,
            },
            HudShape::Rect {
                rect: Rect {
                    w: self.track.w * fraction,
                    ..self.track
                },
                color: FILL_COLOR,
            },
        ];

        let handle_x = self.track.x + self.track.w * fraction;
        let handle_y = self.track.y + self.track.h * 0.5;
        shapes.push(HudShape::Rect {
            rect: Rect {
                x: handle_x - HANDLE * 0.5 * s,
                y: handle_y - HANDLE * 0.5 * s,
                w: HANDLE * s,
                h: HANDLE * s,
            },
            color: HANDLE_COLOR,
        });

        let b = self.button;
        let inset = b.w * 0.3;
        if playing {
            // Pause: two bars
            let bar_w = b.w * 0.14;
            for x in [b.x + inset, b.x + b.w - inset - bar_w] {
                shapes.push(HudShape::Rect {
                    rect: Rect {
                        x,
                        y: b.y + inset,
                        w: bar_w,
                        h: b.h - 2.0 * inset,
                    },
                    color: GLYPH_COLOR,
                });
            }
        } else {
            shapes.push(HudShape::Triangle {
                points: [
                    [b.x + inset, b.y + inset],
                    [b.x + inset, b.y + b.h - inset],
                    [b.x + b.w - inset, b.y + b.h * 0.5],
                ],
                color: GLYPH_COLOR,
            });
        }
        shapes
    }
}

/// Day readout with two decimals.
pub fn day_label(day: f32) -> String {
    format!("Day {day:.2}")
}

/// Window title carrying the readout and both periods.
pub fn window_title(day: f32) -> String {
    format!(
        "3D TEMPORAL LATTICE | {} | Lattice {LATTICE_PERIOD_DAYS:.2} d | Moon {LUNAR_PERIOD_DAYS:.2} d",
        day_label(day)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_and_track_hit() {
        let hud = HudLayout::new(720, 1.0);
        let b = hud.button;
        assert_eq!(hud.hit(b.x + 1.0, b.y + 1.0), Some(HudTarget::PlayButton));

        let t = hud.track;
        match hud.hit(t.x + t.w * 0.25, t.y + t.h * 0.5) {
            Some(HudTarget::Slider(f)) => assert!((f - 0.25).abs() < 1e-4),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(hud.hit(5.0, 5.0), None);
    }

    #[test]
    fn panel_sits_at_bottom_left() {
        let hud = HudLayout::new(720, 2.0);
        assert!((hud.panel.y + hud.panel.h - (720.0 - MARGIN * 2.0)).abs() < 1e-3);
        assert_eq!(hud.panel.x, MARGIN * 2.0);
        assert!(hud.captures(hud.track.x, hud.track.y));
    }

    #[test]
    fn drag_clamps_outside_track() {
        let hud = HudLayout::new(600, 1.0);
        assert_eq!(hud.slider_fraction(-100.0), 0.0);
        assert_eq!(hud.slider_fraction(10_000.0), 1.0);
    }

    #[test]
    fn glyph_follows_play_state() {
        let hud = HudLayout::new(720, 1.0);
        let playing = hud.shapes(0.5, true);
        let paused = hud.shapes(0.5, false);
        assert!(!playing.iter().any(|s| matches!(s, HudShape::Triangle { .. })));
        assert!(paused.iter().any(|s| matches!(s, HudShape::Triangle { .. })));
    }

    #[test]
    fn fill_tracks_fraction() {
        let hud = HudLayout::new(720, 1.0);
        let shapes = hud.shapes(0.5, true);
        match shapes[3] {
            HudShape::Rect { rect, color } => {
                assert_eq!(color, FILL_COLOR);
                assert!((rect.w - hud.track.w * 0.5).abs() < 1e-4);
            }
            _ => panic!("fill should be a rect"),
        }
    }

    #[test]
    fn labels() {
        assert_eq!(day_label(3.14159), "Day 3.14");
        let title = window_title(0.0);
        assert!(title.contains("Day 0.00"));
        assert!(title.contains("Lattice 29.33 d"));
        assert!(title.contains("Moon 29.53 d"));
    }
}
