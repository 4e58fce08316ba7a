//! Radar-chart normalization of [`StepMetrics`].
//!
//! Scales are calibrated against the prompt's reference ranges: 200 spm caps
//! cadence, 2.5 m caps stride, 500 ms of contact scores zero, 20 cm of
//! oscillation scores zero, 200 ms caps flight time.

use serde::Serialize;

use crate::models::{Language, StepMetrics};

pub const FULL_MARK: f64 = 100.0;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ChartMetric {
    Cadence,
    StrideLength,
    GroundContactTime,
    VerticalOscillation,
    FlightTime,
}

impl ChartMetric {
    pub fn label(&self, language: Language) -> &'static str {
        match (self, language) {
            (ChartMetric::Cadence, Language::Japanese) => "ピッチ",
            (ChartMetric::StrideLength, Language::Japanese) => "ストライド",
            (ChartMetric::GroundContactTime, Language::Japanese) => "接地時間",
            (ChartMetric::VerticalOscillation, Language::Japanese) => "上下動",
            (ChartMetric::FlightTime, Language::Japanese) => "滞空時間",
            (ChartMetric::Cadence, Language::English) => "Cadence",
            (ChartMetric::StrideLength, Language::English) => "Stride",
            (ChartMetric::GroundContactTime, Language::English) => "Ground contact",
            (ChartMetric::VerticalOscillation, Language::English) => "Vertical oscillation",
            (ChartMetric::FlightTime, Language::English) => "Flight time",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub metric: ChartMetric,
    pub label: &'static str,
    pub value: f64,
    pub full_mark: f64,
}

/// The five normalized values in display order.
pub fn normalize(metrics: &StepMetrics) -> [(ChartMetric, f64); 5] {
    [
        (ChartMetric::Cadence, clamp(metrics.cadence / 200.0 * 100.0)),
        (ChartMetric::StrideLength, clamp(metrics.stride_length * 40.0)),
        (
            ChartMetric::GroundContactTime,
            clamp(100.0 - metrics.ground_contact_time / 5.0),
        ),
        (
            ChartMetric::VerticalOscillation,
            clamp(100.0 - metrics.vertical_oscillation * 5.0),
        ),
        (ChartMetric::FlightTime, clamp(metrics.flight_time / 2.0)),
    ]
}

pub fn chart_points(metrics: &StepMetrics, language: Language) -> Vec<ChartPoint> {
    normalize(metrics)
        .into_iter()
        .map(|(metric, value)| ChartPoint {
            metric,
            label: metric.label(language),
            value,
            full_mark: FULL_MARK,
        })
        .collect()
}

fn clamp(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, FULL_MARK)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(cadence: f64, stride: f64, gct: f64, vo: f64, flight: f64) -> StepMetrics {
        StepMetrics {
            cadence,
            stride_length: stride,
            ground_contact_time: gct,
            vertical_oscillation: vo,
            flight_time: flight,
        }
    }

    fn values(m: &StepMetrics) -> Vec<f64> {
        normalize(m).iter().map(|(_, v)| *v).collect()
    }

    #[test]
    fn typical_runner_maps_inside_the_range() {
        let v = values(&metrics(180.0, 1.1, 220.0, 8.0, 130.0));
        assert_eq!(v[0], 90.0);
        assert!((v[1] - 44.0).abs() < 1e-9);
        assert_eq!(v[2], 56.0);
        assert_eq!(v[3], 60.0);
        assert_eq!(v[4], 65.0);
    }

    #[test]
    fn ground_contact_of_250ms_is_strictly_inside_bounds() {
        let v = values(&metrics(0.0, 0.0, 250.0, 0.0, 0.0))[2];
        assert!(v > 0.0 && v < 100.0, "got {v}");
        assert_eq!(v, 50.0);
    }

    #[test]
    fn extremes_are_clamped() {
        let high = values(&metrics(260.0, 4.0, 0.0, 0.0, 400.0));
        assert_eq!(high, vec![100.0, 100.0, 100.0, 100.0, 100.0]);

        let low = values(&metrics(-5.0, 0.0, 900.0, 30.0, 0.0));
        assert_eq!(low, vec![0.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn non_finite_input_renders_as_zero() {
        let v = values(&metrics(f64::NAN, f64::INFINITY, 200.0, 5.0, 100.0));
        assert_eq!(v[0], 0.0);
        assert_eq!(v[1], 0.0);
        assert_eq!(v[2], 60.0);
    }

    #[test]
    fn points_carry_localized_labels() {
        let points = chart_points(&metrics(180.0, 1.0, 200.0, 8.0, 120.0), Language::English);
        assert_eq!(points.len(), 5);
        assert_eq!(points[0].label, "Cadence");
        assert!(points.iter().all(|p| p.full_mark == 100.0));

        let ja = chart_points(&metrics(180.0, 1.0, 200.0, 8.0, 120.0), Language::Japanese);
        assert_eq!(ja[2].label, "接地時間");
    }
}
