//! Galaxy survey legend
//!
//! The dataset tags each survey by colour only. These are the colours the
//! catalogue builder assigns.

use crate::color::parse_css_color;
use lattice_core::scene::GalaxyPoint;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Survey {
    /// Euclid general survey
    Euclid,
    /// JWST early universe
    Jwst,
    /// Rubin time-domain anomalies
    Rubin,
    Other,
}

impl Survey {
    pub const LEGEND: [Survey; 3] = [Survey::Euclid, Survey::Jwst, Survey::Rubin];

    pub fn legend_color(self) -> Option<&'static str> {
        match self {
            Survey::Euclid => Some("#88ccff"),
            Survey::Jwst => Some("#ff4444"),
            Survey::Rubin => Some("#ffcc00"),
            Survey::Other => None,
        }
    }

    /// Classify a linear colour by exact-ish match against the legend.
    pub fn classify(color: [f32; 3]) -> Survey {
        Self::LEGEND
            .into_iter()
            .find(|survey| {
                survey
                    .legend_color()
                    .and_then(parse_css_color)
                    .is_some_and(|legend| {
                        legend
                            .iter()
                            .zip(color.iter())
                            .all(|(a, b)| (a - b).abs() < 1e-3)
                    })
            })
            .unwrap_or(Survey::Other)
    }
}

impl fmt::Display for Survey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Survey::Euclid => "Euclid General Survey",
            Survey::Jwst => "JWST Early Universe",
            Survey::Rubin => "Rubin Time-Domain Anomalies",
            Survey::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Point counts per survey, in legend order followed by `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurveyCounts {
    pub euclid: usize,
    pub jwst: usize,
    pub rubin: usize,
    pub other: usize,
}

impl SurveyCounts {
    pub fn get(&self, survey: Survey) -> usize {
        match survey {
            Survey::Euclid => self.euclid,
            Survey::Jwst => self.jwst,
            Survey::Rubin => self.rubin,
            Survey::Other => self.other,
        }
    }

    pub fn total(&self) -> usize {
        self.euclid + self.jwst + self.rubin + self.other
    }
}

pub fn survey_counts(points: &[GalaxyPoint]) -> SurveyCounts {
    let mut counts = SurveyCounts::default();
    for point in points {
        match Survey::classify(point.color) {
            Survey::Euclid => counts.euclid += 1,
            Survey::Jwst => counts.jwst += 1,
            Survey::Rubin => counts.rubin += 1,
            Survey::Other => counts.other += 1,
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_core::math::Vec3;

    fn point(color: &str) -> GalaxyPoint {
        GalaxyPoint {
            position: Vec3::ZERO,
            color: parse_css_color(color).unwrap(),
            size: 1.0,
        }
    }

    #[test]
    fn counts_by_legend_colour() {
        let points = [
            point("#88ccff"),
            point("#88ccff"),
            point("#ff4444"),
            point("#ffcc00"),
            point("#123456"),
        ];
        let counts = survey_counts(&points);
        assert_eq!(counts.get(Survey::Euclid), 2);
        assert_eq!(counts.get(Survey::Jwst), 1);
        assert_eq!(counts.get(Survey::Rubin), 1);
        assert_eq!(counts.get(Survey::Other), 1);
        assert_eq!(counts.total(), points.len());
    }

    #[test]
    fn legend_names() {
        assert_eq!(Survey::Jwst.to_string(), "JWST Early Universe");
        assert!(Survey::Other.legend_color().is_none());
    }
}
