use serde::Serialize;

use theralink_core::models::risk::{RED_MAX_SCORE, YELLOW_MAX_SCORE};

use crate::view::ScorePoint;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 220.0;
const PADDING: f64 = 28.0;
const MIN_SCORE: f64 = 1.0;
const MAX_SCORE: f64 = 5.0;

/// A plotted check-in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartMarker {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

/// Geometry for the inline SVG wellness trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreChart {
    pub width: f64,
    pub height: f64,
    /// `points` attribute for the SVG polyline.
    pub points: String,
    pub markers: Vec<ChartMarker>,
    /// y of the red/yellow boundary.
    pub red_line_y: f64,
    /// y of the yellow/green boundary.
    pub yellow_line_y: f64,
}

fn y_for(score: f64) -> f64 {
    let clamped = score.clamp(MIN_SCORE, MAX_SCORE);
    let plot_height = HEIGHT - 2.0 * PADDING;
    PADDING + (MAX_SCORE - clamped) / (MAX_SCORE - MIN_SCORE) * plot_height
}

fn x_for(index: usize, count: usize) -> f64 {
    if count <= 1 {
        return WIDTH / 2.0;
    }
    let plot_width = WIDTH - 2.0 * PADDING;
    PADDING + index as f64 * plot_width / (count - 1) as f64
}

impl ScoreChart {
    pub fn from_series(series: &[ScorePoint]) -> Self {
        let markers: Vec<ChartMarker> = series
            .iter()
            .enumerate()
            .map(|(i, p)| ChartMarker {
                x: x_for(i, series.len()),
                y: y_for(p.score),
                label: format!("{}: {:.2}", p.date, p.score),
            })
            .collect();

        let points = markers
            .iter()
            .map(|m| format!("{:.1},{:.1}", m.x, m.y))
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            width: WIDTH,
            height: HEIGHT,
            points,
            markers,
            red_line_y: y_for(RED_MAX_SCORE),
            yellow_line_y: y_for(YELLOW_MAX_SCORE),
        }
    }
}
