use crate::catalog;
use crate::types::job::LabeledImage;
use rand::Rng;

/// Hours added per severity-weighted damage observation.
const HOURS_PER_OBSERVATION: f64 = 1.5;
/// Baseline inspection overhead in hours.
const BASE_HOURS: f64 = 1.0;
/// Jitter ceiling, exclusive. Stands in for model variance.
const JITTER_HOURS: f64 = 2.0;
const MAX_HOURS: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateQuote {
    pub hours: f64,
    pub cost: f64,
}

/// Placeholder repair-time estimator. Not a model: a severity-weighted count
/// of the job's labeled photographs plus bounded jitter, priced at the
/// configured labor rate.
#[derive(Clone)]
pub struct RepairEstimator {
    labor_rate: f64,
}

impl RepairEstimator {
    pub fn new(labor_rate: f64) -> Self {
        Self { labor_rate }
    }

    pub fn quote(&self, images: &[LabeledImage]) -> EstimateQuote {
        let weight: f64 = images
            .iter()
            .map(|image| {
                image
                    .severity
                    .as_ref()
                    .map(|s| catalog::severity_weight(&s.name))
                    .unwrap_or(1.0)
            })
            .sum();
        let jitter = rand::thread_rng().gen_range(0.0..JITTER_HOURS);
        let hours = (BASE_HOURS + weight * HOURS_PER_OBSERVATION + jitter).min(MAX_HOURS);
        let hours = round1(hours);
        EstimateQuote {
            hours,
            cost: round2(hours * self.labor_rate),
        }
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
