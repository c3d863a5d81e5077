//! Background starfield
//!
//! A shell of point stars with perspective size attenuation and a soft fade.

use crate::math::{hsl_to_rgb, srgb_to_linear, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarfieldSpec {
    /// Inner radius of the shell.
    pub radius: f32,
    /// Shell thickness.
    pub depth: f32,
    pub count: usize,
    /// Size multiplier.
    pub factor: f32,
    pub saturation: f32,
}

impl Default for StarfieldSpec {
    fn default() -> Self {
        Self {
            radius: 2500.0,
            depth: 500.0,
            count: 12_000,
            factor: 8.0,
            saturation: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vec3,
    /// Linear RGB.
    pub color: [f32; 3],
    pub size: f32,
}

pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    pub fn generate<R: Rng>(spec: &StarfieldSpec, rng: &mut R) -> Self {
        let count = spec.count.max(1);
        let increment = spec.depth / count as f32;
        let mut radius = spec.radius + spec.depth;

        let stars = (0..spec.count)
            .map(|i| {
                radius -= increment * rng.gen::<f32>();
                let position = random_on_sphere(radius, rng);
                let [r, g, b] = hsl_to_rgb(i as f32 / count as f32, spec.saturation, 0.9);
                Star {
                    position,
                    color: [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b)],
                    size: (0.5 + 0.5 * rng.gen::<f32>()) * spec.factor,
                }
            })
            .collect();

        Self { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}

fn random_on_sphere<R: Rng>(radius: f32, rng: &mut R) -> Vec3 {
    let phi = (1.0 - rng.gen::<f32>() * 2.0).clamp(-1.0, 1.0).acos();
    let theta = rng.gen::<f32>() * TAU;
    Vec3::new(
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
        radius * phi.sin() * theta.cos(),
    )
}

/// Global twinkle multiplier applied to every star's size.
pub fn twinkle(elapsed: f32) -> f32 {
    3.0 + (elapsed + 100.0).sin()
}

/// Soft round falloff; `r` is the distance from the sprite centre in
/// sprite units (0.5 at the edge).
pub fn sprite_fade(r: f32) -> f32 {
    1.0 / (1.0 + (16.0 * (r - 0.25)).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn stars_fill_the_shell() {
        let spec = StarfieldSpec {
            count: 2000,
            ..StarfieldSpec::default()
        };
        let field = Starfield::generate(&spec, &mut StdRng::seed_from_u64(5));
        assert_eq!(field.len(), 2000);
        for star in field.stars() {
            let r = star.position.length();
            assert!(r >= spec.radius - 0.5 && r <= spec.radius + spec.depth + 0.5, "{r}");
            assert!(star.size >= 0.5 * spec.factor && star.size <= spec.factor);
        }
    }

    #[test]
    fn zero_saturation_is_grey() {
        let spec = StarfieldSpec {
            count: 10,
            ..StarfieldSpec::default()
        };
        let field = Starfield::generate(&spec, &mut StdRng::seed_from_u64(1));
        for star in field.stars() {
            assert_eq!(star.color[0], star.color[1]);
            assert_eq!(star.color[1], star.color[2]);
        }
    }

    #[test]
    fn empty_spec_generates_nothing() {
        let spec = StarfieldSpec {
            count: 0,
            ..StarfieldSpec::default()
        };
        assert!(Starfield::generate(&spec, &mut StdRng::seed_from_u64(1)).is_empty());
    }

    #[test]
    fn twinkle_stays_between_two_and_four() {
        for t in [0.0, 1.0, 17.3, 500.0] {
            let k = twinkle(t);
            assert!((2.0..=4.0).contains(&k));
        }
    }

    #[test]
    fn sprite_fade_is_bright_inside_dark_outside() {
        assert!(sprite_fade(0.0) > 0.95);
        assert!((sprite_fade(0.25) - 0.5).abs() < 1e-6);
        assert!(sprite_fade(0.5) < 0.05);
    }
}
