//! Decorative constellations on the outer shell
//!
//! Generated once from an injected random source and never touched again.

use crate::math::Vec3;
use rand::Rng;

pub const DEFAULT_CONSTELLATION_COUNT: usize = 12;
pub const MIN_STARS: usize = 4;
pub const MAX_STARS: usize = 8;

/// Shell radius range for constellation centres.
pub const SHELL_INNER: f32 = 1800.0;
pub const SHELL_DEPTH: f32 = 500.0;
/// Spread of stars around their centre, per axis.
pub const SCATTER: f32 = 300.0;

pub const LINE_OPACITY: f32 = 0.15;

#[derive(Debug, Clone, PartialEq)]
pub struct Constellation {
    pub stars: Vec<Vec3>,
    /// Whether the path is closed back to the first star.
    pub closed: bool,
}

impl Constellation {
    /// Line-list endpoints: the open path, plus the closing edge if any.
    pub fn segments(&self) -> Vec<[Vec3; 2]> {
        let mut segments: Vec<[Vec3; 2]> = self.stars.windows(2).map(|w| [w[0], w[1]]).collect();
        if self.closed {
            if let (Some(&last), Some(&first)) = (self.stars.last(), self.stars.first()) {
                segments.push([last, first]);
            }
        }
        segments
    }
}

pub struct Constellations {
    constellations: Vec<Constellation>,
}

impl Constellations {
    pub fn generate<R: Rng>(count: usize, rng: &mut R) -> Self {
        let constellations = (0..count).map(|_| generate_one(rng)).collect();
        Self { constellations }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Constellation> {
        self.constellations.iter()
    }

    pub fn len(&self) -> usize {
        self.constellations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constellations.is_empty()
    }

    /// All segments flattened into line-list vertices.
    pub fn line_vertices(&self) -> Vec<Vec3> {
        self.constellations
            .iter()
            .flat_map(|c| c.segments())
            .flat_map(|[a, b]| [a, b])
            .collect()
    }
}

fn generate_one<R: Rng>(rng: &mut R) -> Constellation {
    let raw = Vec3::new(
        (rng.gen::<f32>() - 0.5) * 4000.0,
        (rng.gen::<f32>() - 0.5) * 2000.0,
        (rng.gen::<f32>() - 0.5) * 4000.0,
    );
    let direction = raw.try_normalize().unwrap_or(Vec3::Z);
    let center = direction * (SHELL_INNER + rng.gen::<f32>() * SHELL_DEPTH);

    let count = rng.gen_range(MIN_STARS..=MAX_STARS);
    let stars = (0..count)
        .map(|_| {
            center
                + Vec3::new(
                    (rng.gen::<f32>() - 0.5) * SCATTER,
                    (rng.gen::<f32>() - 0.5) * SCATTER,
                    (rng.gen::<f32>() - 0.5) * SCATTER,
                )
        })
        .collect();

    Constellation {
        stars,
        closed: rng.gen_bool(0.5),
    }
}
