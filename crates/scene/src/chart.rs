use glam::Vec3;
use serde::{Deserialize, Serialize};
use starlane_common::Color;
use std::path::Path;

/// One star in the chart: display name, color, and cluster position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarSpec {
    pub name: String,
    pub color: Color,
    pub position: Vec3,
}

/// Declarative description of the outer cluster, loadable from JSON.
///
/// The built-in default is five stars on the axes, joined in a loop of
/// hyperlanes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarChart {
    pub stars: Vec<StarSpec>,
    /// Hyperlanes as index pairs into `stars`.
    pub lanes: Vec<[usize; 2]>,
}

/// Errors from loading or validating a chart file.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("lane {lane:?} references star {index}, chart has {count}")]
    LaneOutOfRange {
        lane: [usize; 2],
        index: usize,
        count: usize,
    },
}

impl Default for StarChart {
    fn default() -> Self {
        let star = |name: &str, hex: u32, x: f32, y: f32, z: f32| StarSpec {
            name: name.to_string(),
            color: Color::from_hex(hex),
            position: Vec3::new(x, y, z),
        };
        Self {
            stars: vec![
                star("Alpha", 0xff0000, -5.0, 0.0, 0.0),
                star("Beta", 0x00ff00, 5.0, 0.0, 0.0),
                star("Gamma", 0x0000ff, 0.0, 5.0, 0.0),
                star("Delta", 0xffff00, 0.0, -5.0, 0.0),
                star("Epsilon", 0xff00ff, 0.0, 0.0, -5.0),
            ],
            lanes: vec![[0, 1], [1, 2], [2, 3], [3, 4], [0, 4]],
        }
    }
}

impl StarChart {
    /// Parse a chart from JSON and validate lane indices.
    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        let chart: Self = serde_json::from_str(json)?;
        chart.validate()?;
        Ok(chart)
    }

    /// Load a chart from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChartError> {
        let path = path.as_ref();
        tracing::debug!("loading star chart from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check every lane endpoint references an existing star.
    pub fn validate(&self) -> Result<(), ChartError> {
        let count = self.stars.len();
        for lane in &self.lanes {
            for &index in lane {
                if index >= count {
                    return Err(ChartError::LaneOutOfRange {
                        lane: *lane,
                        index,
                        count,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_chart_is_valid() {
        let chart = StarChart::default();
        assert_eq!(chart.stars.len(), 5);
        assert_eq!(chart.lanes.len(), 5);
        chart.validate().unwrap();
    }

    #[test]
    fn default_chart_cluster_layout() {
        let chart = StarChart::default();
        assert_eq!(chart.stars[0].position, Vec3::new(-5.0, 0.0, 0.0));
        assert_eq!(chart.stars[0].color, Color::from_hex(0xff0000));
        assert_eq!(chart.stars[4].position, Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(chart.lanes[4], [0, 4]);
    }

    #[test]
    fn json_round_trip() {
        let chart = StarChart::default();
        let json = serde_json::to_string(&chart).unwrap();
        let back = StarChart::from_json(&json).unwrap();
        assert_eq!(back.stars.len(), chart.stars.len());
        assert_eq!(back.stars[1].color, chart.stars[1].color);
        assert_eq!(back.lanes, chart.lanes);
    }

    #[test]
    fn from_json_rejects_dangling_lane() {
        let json = r##"{
            "stars": [{"name": "Solo", "color": "#ffffff", "position": [0.0, 0.0, 0.0]}],
            "lanes": [[0, 3]]
        }"##;
        let err = StarChart::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            ChartError::LaneOutOfRange { index: 3, count: 1, .. }
        ));
    }

    #[test]
    fn from_json_rejects_malformed_color() {
        let json = r#"{
            "stars": [{"name": "Solo", "color": "red", "position": [0.0, 0.0, 0.0]}],
            "lanes": []
        }"#;
        assert!(matches!(
            StarChart::from_json(json),
            Err(ChartError::Json(_))
        ));
    }
}
