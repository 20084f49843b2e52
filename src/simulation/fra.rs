//! # Frequency Response Analysis (FRA) chart data
//!
//! Synthesises a log-spaced magnitude sweep for one transformer: a nominal
//! "healthy" curve with a little noise, and a "current" curve that carries a
//! sinusoidal distortion in the mid band when the transformer is not healthy.
//! Nothing here is a real FRA measurement; it feeds the visualization view.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::domain::{TransformerRecord, TransformerStatus};

pub const SWEEP_START_HZ: f64 = 1.0;
pub const SWEEP_END_HZ: f64 = 1000.0;
pub const SWEEP_RATIO: f64 = 1.1;

/// Band in which non-healthy transformers show a distorted response
pub const ANOMALY_BAND_HZ: (f64, f64) = (100.0, 500.0);

pub const HEALTHY_SERIES: &str = "Healthy Response";
pub const CURRENT_SERIES: &str = "Current Response";

/// Which series the chart should carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FraChartOptions {
    pub show_healthy: bool,
    pub show_current: bool,
}

impl Default for FraChartOptions {
    fn default() -> Self {
        Self {
            show_healthy: true,
            show_current: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraSeries {
    pub label: String,
    pub magnitude_db: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraChart {
    pub transformer_id: String,
    pub transformer_name: String,
    pub status: TransformerStatus,
    pub frequencies_hz: Vec<f64>,
    pub series: Vec<FraSeries>,
    pub summary: String,
}

impl FraChart {
    pub fn series(&self, label: &str) -> Option<&FraSeries> {
        self.series.iter().find(|s| s.label == label)
    }
}

/// Sweep frequencies: 1 Hz, then ×1.1 while not above 1 kHz.
pub fn sweep_frequencies() -> Vec<f64> {
    let mut frequencies = Vec::new();
    let mut f = SWEEP_START_HZ;
    while f <= SWEEP_END_HZ {
        frequencies.push(f);
        f *= SWEEP_RATIO;
    }
    frequencies
}

pub fn summary_for(status: TransformerStatus) -> &'static str {
    match status {
        TransformerStatus::Healthy => "Normal frequency response patterns detected.",
        _ => "Anomalies detected in frequency response.",
    }
}

pub struct FraGenerator<R: Rng = StdRng> {
    rng: R,
}

impl FraGenerator<StdRng> {
    pub fn new(random_seed: Option<u64>) -> Self {
        let rng = match random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl<R: Rng> FraGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn sweep(&mut self, record: &TransformerRecord, options: FraChartOptions) -> FraChart {
        let frequencies = sweep_frequencies();
        let distorted = record.status != TransformerStatus::Healthy;

        let mut healthy = Vec::with_capacity(frequencies.len());
        let mut current = Vec::with_capacity(frequencies.len());
        for &f in &frequencies {
            let nominal = -20.0 * (f / 100.0).log10() + self.rng.gen_range(0.0..2.0);
            let mut measured = nominal;
            if distorted && f > ANOMALY_BAND_HZ.0 && f < ANOMALY_BAND_HZ.1 {
                measured += (f / 50.0).sin() * 5.0;
            }
            healthy.push(nominal);
            current.push(measured + self.rng.gen_range(0.0..1.0));
        }

        let mut series = Vec::with_capacity(2);
        if options.show_healthy {
            series.push(FraSeries {
                label: HEALTHY_SERIES.to_string(),
                magnitude_db: healthy,
            });
        }
        if options.show_current {
            series.push(FraSeries {
                label: CURRENT_SERIES.to_string(),
                magnitude_db: current,
            });
        }

        FraChart {
            transformer_id: record.id.clone(),
            transformer_name: record.name.clone(),
            status: record.status,
            frequencies_hz: frequencies,
            series,
            summary: summary_for(record.status).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::sample_fleet;

    #[test]
    fn test_sweep_frequencies_bounds() {
        let freqs = sweep_frequencies();
        assert_eq!(freqs[0], 1.0);
        assert!(*freqs.last().unwrap() <= 1000.0);
        assert!(freqs.last().unwrap() * SWEEP_RATIO > 1000.0);
        assert!(freqs.windows(2).all(|w| w[1] > w[0]));
        // 1.1^72 ≈ 954, 1.1^73 ≈ 1049
        assert_eq!(freqs.len(), 73);
    }

    #[test]
    fn test_healthy_record_curves_within_noise() {
        let fleet = sample_fleet();
        let mut gen = FraGenerator::new(Some(11));
        let chart = gen.sweep(&fleet[0], FraChartOptions::default());

        let healthy = &chart.series(HEALTHY_SERIES).unwrap().magnitude_db;
        let current = &chart.series(CURRENT_SERIES).unwrap().magnitude_db;
        for (h, c) in healthy.iter().zip(current) {
            assert!(*c >= *h && *c < *h + 1.0);
        }
        assert_eq!(chart.summary, "Normal frequency response patterns detected.");
    }

    #[test]
    fn test_fault_record_shows_mid_band_distortion() {
        let fleet = sample_fleet();
        let mut gen = FraGenerator::new(Some(11));
        let chart = gen.sweep(&fleet[2], FraChartOptions::default());

        let healthy = &chart.series(HEALTHY_SERIES).unwrap().magnitude_db;
        let current = &chart.series(CURRENT_SERIES).unwrap().magnitude_db;
        let max_dev = chart
            .frequencies_hz
            .iter()
            .zip(healthy.iter().zip(current))
            .filter(|(f, _)| **f > 100.0 && **f < 500.0)
            .map(|(_, (h, c))| (c - h).abs())
            .fold(0.0, f64::max);
        assert!(max_dev > 1.0, "max deviation {}", max_dev);
        assert_eq!(chart.summary, "Anomalies detected in frequency response.");
    }

    #[test]
    fn test_nominal_curve_slope() {
        let fleet = sample_fleet();
        let mut gen = FraGenerator::new(Some(2));
        let chart = gen.sweep(&fleet[0], FraChartOptions::default());
        let healthy = &chart.series(HEALTHY_SERIES).unwrap().magnitude_db;
        // -20·log10(1/100) = 40 dB at 1 Hz, plus up to 2 dB noise
        assert!(healthy[0] >= 40.0 && healthy[0] < 42.0);
    }

    #[test]
    fn test_options_select_series() {
        let fleet = sample_fleet();
        let mut gen = FraGenerator::new(Some(5));

        let only_current = gen.sweep(
            &fleet[1],
            FraChartOptions {
                show_healthy: false,
                show_current: true,
            },
        );
        assert_eq!(only_current.series.len(), 1);
        assert_eq!(only_current.series[0].label, CURRENT_SERIES);

        let none = gen.sweep(
            &fleet[1],
            FraChartOptions {
                show_healthy: false,
                show_current: false,
            },
        );
        assert!(none.series.is_empty());
        assert_eq!(none.frequencies_hz.len(), 73);
    }
}
