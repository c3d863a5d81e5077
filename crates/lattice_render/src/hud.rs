//! HUD tessellation
//!
//! Turns pixel-space [`HudShape`]s into NDC triangles.

use crate::gpu::HudVertex;
use lattice_services::hud::HudShape;

fn to_ndc(x: f32, y: f32, width: f32, height: f32) -> [f32; 2] {
    [x / width * 2.0 - 1.0, 1.0 - y / height * 2.0]
}

pub fn tessellate(shapes: &[HudShape], width: u32, height: u32) -> Vec<HudVertex> {
    let (w, h) = (width.max(1) as f32, height.max(1) as f32);
    let mut vertices = Vec::with_capacity(shapes.len() * 6);
    for shape in shapes {
        match *shape {
            HudShape::Rect { rect, color } => {
                let tl = to_ndc(rect.x, rect.y, w, h);
                let tr = to_ndc(rect.x + rect.w, rect.y, w, h);
                let bl = to_ndc(rect.x, rect.y + rect.h, w, h);
                let br = to_ndc(rect.x + rect.w, rect.y + rect.h, w, h);
                for position in [tl, bl, br, tl, br, tr] {
                    vertices.push(HudVertex { position, color });
                }
            }
            HudShape::Triangle { points, color } => {
                for [x, y] in points {
                    vertices.push(HudVertex {
                        position: to_ndc(x, y, w, h),
                        color,
                    });
                }
            }
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_services::hud::{HudLayout, Rect};

    #[test]
    fn full_window_rect_covers_clip_space() {
        let shapes = [HudShape::Rect {
            rect: Rect {
                x: 0.0,
                y: 0.0,
                w: 800.0,
                h: 600.0,
            },
            color: [1.0; 4],
        }];
        let v = tessellate(&shapes, 800, 600);
        assert_eq!(v.len(), 6);
        assert_eq!(v[0].position, [-1.0, 1.0]);
        assert_eq!(v[2].position, [1.0, -1.0]);
    }

    #[test]
    fn layout_tessellates_to_triangles() {
        let hud = HudLayout::new(720, 1.0);
        let v = tessellate(&hud.shapes(0.3, false), 1280, 720);
        assert_eq!(v.len() % 3, 0);
        assert!(v
            .iter()
            .all(|p| p.position.iter().all(|c| (-1.0..=1.0).contains(c))));
    }
}
