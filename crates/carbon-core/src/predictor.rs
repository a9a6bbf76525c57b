//! Footprint predictor
//!
//! Owns a feature scaler and a regression model fitted once, lazily, on the
//! first prediction. The training set is synthetic and generated from a
//! seeded PRNG, so every process fits the same model and predictions are
//! reproducible across runs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use linfa::prelude::*;
use linfa_linear::{FittedLinearRegression, LinearRegression};
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::error::PredictorError;

/// Number of synthetic training samples.
const TRAINING_SAMPLES: usize = 1000;

/// PRNG seed for the synthetic training set.
const TRAINING_SEED: u64 = 42;

/// Standard deviation of the additive noise on the synthetic target.
const TARGET_NOISE_STD: f64 = 0.5;

/// Per-category coefficients (kg CO2 per unit per day). These drive both
/// the synthetic target formula and the reported breakdown.
const TRANSPORT_KG_PER_KM: f64 = 0.2;
const ENERGY_KG_PER_KWH: f64 = 0.5;
const FOOD_KG_PER_GRAM: f64 = 0.003;
const WASTE_KG_PER_KG: f64 = 0.5;

/// Daily lifestyle inputs for a footprint estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FootprintInputs {
    /// Distance travelled per day, in km
    pub transportation_km: f64,

    /// Energy usage per day, in kWh
    pub energy_kwh: f64,

    /// Meat consumption per day, in grams
    pub food_meat_grams: f64,

    /// Waste produced per day, in kg
    pub waste_kg: f64,
}

impl FootprintInputs {
    fn as_array(&self) -> [f64; 4] {
        [
            self.transportation_km,
            self.energy_kwh,
            self.food_meat_grams,
            self.waste_kg,
        ]
    }

    /// Fixed-formula per-category decomposition.
    ///
    /// Independent of the fitted model: the regression output and this
    /// breakdown are computed separately and are not reconciled, so they
    /// are usually close but never guaranteed equal.
    pub fn breakdown(&self) -> FootprintBreakdown {
        FootprintBreakdown {
            transportation: self.transportation_km * TRANSPORT_KG_PER_KM,
            energy: self.energy_kwh * ENERGY_KG_PER_KWH,
            food: self.food_meat_grams * FOOD_KG_PER_GRAM,
            waste: self.waste_kg * WASTE_KG_PER_KG,
        }
    }
}

/// Per-category footprint components, in kg CO2 per day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootprintBreakdown {
    pub transportation: f64,
    pub energy: f64,
    pub food: f64,
    pub waste: f64,
}

/// Zero-mean / unit-variance feature scaling, with statistics captured at
/// fit time and reused for every subsequent transform.
#[derive(Debug, Clone)]
struct StandardScaler {
    means: Array1<f64>,
    stds: Array1<f64>,
}

impl StandardScaler {
    fn fit(x: &Array2<f64>) -> Self {
        let means = x
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(x.ncols()));
        let stds = x
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s == 0.0 { 1.0 } else { s });
        Self { means, stds }
    }

    fn transform(&self, x: &Array2<f64>) -> Array2<f64> {
        (x - &self.means) / &self.stds
    }

    fn transform_row(&self, row: [f64; 4]) -> Array1<f64> {
        (Array1::from(row.to_vec()) - &self.means) / &self.stds
    }
}

/// Artifacts of a completed training pass.
struct FittedModel {
    scaler: StandardScaler,
    regression: FittedLinearRegression<f64>,
}

impl FittedModel {
    fn predict(&self, inputs: &FootprintInputs) -> f64 {
        let scaled = self.scaler.transform_row(inputs.as_array());
        self.regression.intercept() + self.regression.params().dot(&scaled)
    }
}

/// Lazily trained footprint predictor.
///
/// Construct one at startup and share it; the fitted scaler/model pair is
/// created on the first [`predict`](Self::predict) call and reused for the
/// process lifetime. Concurrent first calls serialize on the inner lock so
/// exactly one training pass runs.
pub struct FootprintPredictor {
    fitted: RwLock<Option<Arc<FittedModel>>>,
    training_runs: AtomicUsize,
}

impl Default for FootprintPredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl FootprintPredictor {
    /// Create an untrained predictor.
    pub fn new() -> Self {
        Self {
            fitted: RwLock::new(None),
            training_runs: AtomicUsize::new(0),
        }
    }

    /// Estimate the daily footprint in kg CO2, training on first use.
    ///
    /// Inputs are handed to the model as-is; negative or out-of-range
    /// values extrapolate silently. The raw model output is floored at
    /// zero.
    pub fn predict(&self, inputs: &FootprintInputs) -> Result<f64, PredictorError> {
        let fitted = self.fitted()?;
        Ok(fitted.predict(inputs).max(0.0))
    }

    /// Number of training passes that have run. Stays at one once the
    /// first prediction has completed.
    pub fn training_runs(&self) -> usize {
        self.training_runs.load(Ordering::Relaxed)
    }

    fn fitted(&self) -> Result<Arc<FittedModel>, PredictorError> {
        if let Some(fitted) = self
            .fitted
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(Arc::clone(fitted));
        }

        let mut slot = self.fitted.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(fitted) = slot.as_ref() {
            // Another caller finished training while we waited for the lock.
            return Ok(Arc::clone(fitted));
        }

        let fitted = Arc::new(train()?);
        self.training_runs.fetch_add(1, Ordering::Relaxed);
        *slot = Some(Arc::clone(&fitted));
        Ok(fitted)
    }
}

/// Fit the scaler and regression on the deterministic synthetic dataset.
fn train() -> Result<FittedModel, PredictorError> {
    let (features, targets) = synthetic_dataset()?;

    let scaler = StandardScaler::fit(&features);
    let scaled = scaler.transform(&features);

    let dataset = Dataset::new(scaled, targets);
    let regression = LinearRegression::new()
        .fit(&dataset)
        .map_err(|e| PredictorError::Training(e.to_string()))?;

    tracing::info!(samples = TRAINING_SAMPLES, "Fitted footprint regression");

    Ok(FittedModel { scaler, regression })
}

/// Generate the seeded synthetic training set: four uniform feature
/// columns and a linear target with additive Gaussian noise.
fn synthetic_dataset() -> Result<(Array2<f64>, Array1<f64>), PredictorError> {
    let mut rng = StdRng::seed_from_u64(TRAINING_SEED);

    let transportation: Vec<f64> = (0..TRAINING_SAMPLES)
        .map(|_| rng.gen_range(0.0..50.0))
        .collect();
    let energy: Vec<f64> = (0..TRAINING_SAMPLES)
        .map(|_| rng.gen_range(5.0..30.0))
        .collect();
    let food_meat: Vec<f64> = (0..TRAINING_SAMPLES)
        .map(|_| rng.gen_range(0.0..500.0))
        .collect();
    let waste: Vec<f64> = (0..TRAINING_SAMPLES)
        .map(|_| rng.gen_range(0.0..5.0))
        .collect();

    let noise = Normal::new(0.0, TARGET_NOISE_STD)
        .map_err(|e| PredictorError::Training(e.to_string()))?;

    let mut features = Array2::zeros((TRAINING_SAMPLES, 4));
    let mut targets = Array1::zeros(TRAINING_SAMPLES);
    for i in 0..TRAINING_SAMPLES {
        features[(i, 0)] = transportation[i];
        features[(i, 1)] = energy[i];
        features[(i, 2)] = food_meat[i];
        features[(i, 3)] = waste[i];
        targets[i] = transportation[i] * TRANSPORT_KG_PER_KM
            + energy[i] * ENERGY_KG_PER_KWH
            + food_meat[i] * FOOD_KG_PER_GRAM
            + waste[i] * WASTE_KG_PER_KG
            + noise.sample(&mut rng);
    }

    Ok((features, targets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn inputs(t: f64, e: f64, f: f64, w: f64) -> FootprintInputs {
        FootprintInputs {
            transportation_km: t,
            energy_kwh: e,
            food_meat_grams: f,
            waste_kg: w,
        }
    }

    #[test]
    fn test_prediction_is_non_negative() {
        let predictor = FootprintPredictor::new();

        for inputs in [
            inputs(0.0, 0.0, 0.0, 0.0),
            inputs(10.0, 15.0, 200.0, 2.0),
            inputs(100.0, 50.0, 1000.0, 10.0),
        ] {
            let footprint = predictor.predict(&inputs).unwrap();
            assert!(footprint >= 0.0, "negative footprint for {:?}", inputs);
        }
    }

    #[test]
    fn test_prediction_tracks_linear_formula() {
        let predictor = FootprintPredictor::new();

        // Interior point of the training distributions; the synthetic
        // target is linear there, so the fit should land close.
        let footprint = predictor.predict(&inputs(20.0, 15.0, 200.0, 2.0)).unwrap();
        let linear = 20.0 * 0.2 + 15.0 * 0.5 + 200.0 * 0.003 + 2.0 * 0.5;
        assert!(
            (footprint - linear).abs() < 0.5,
            "prediction {} too far from linear value {}",
            footprint,
            linear
        );
    }

    #[test]
    fn test_breakdown_is_exact_and_model_independent() {
        let breakdown = inputs(10.0, 8.0, 300.0, 1.5).breakdown();

        assert_eq!(breakdown.transportation, 2.0);
        assert_eq!(breakdown.energy, 4.0);
        assert_eq!(breakdown.food, 0.9);
        assert_eq!(breakdown.waste, 0.75);
    }

    #[test]
    fn test_breakdown_of_zero_inputs_is_zero() {
        let breakdown = FootprintInputs::default().breakdown();

        assert_eq!(breakdown.transportation, 0.0);
        assert_eq!(breakdown.energy, 0.0);
        assert_eq!(breakdown.food, 0.0);
        assert_eq!(breakdown.waste, 0.0);
    }

    #[test]
    fn test_training_runs_exactly_once() {
        let predictor = FootprintPredictor::new();
        assert_eq!(predictor.training_runs(), 0);

        predictor.predict(&inputs(5.0, 10.0, 100.0, 1.0)).unwrap();
        assert_eq!(predictor.training_runs(), 1);

        predictor.predict(&inputs(30.0, 20.0, 400.0, 3.0)).unwrap();
        assert_eq!(predictor.training_runs(), 1);
    }

    #[test]
    fn test_concurrent_first_calls_train_once() {
        let predictor = Arc::new(FootprintPredictor::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let predictor = Arc::clone(&predictor);
                thread::spawn(move || {
                    predictor
                        .predict(&inputs(i as f64, 10.0, 100.0, 1.0))
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap() >= 0.0);
        }

        assert_eq!(predictor.training_runs(), 1);
    }

    #[test]
    fn test_predictions_are_deterministic_across_instances() {
        let first = FootprintPredictor::new();
        let second = FootprintPredictor::new();
        let point = inputs(12.0, 18.0, 250.0, 2.5);

        assert_eq!(
            first.predict(&point).unwrap(),
            second.predict(&point).unwrap()
        );
    }

    #[test]
    fn test_scaler_statistics() {
        let x = ndarray::arr2(&[[1.0, 10.0], [3.0, 10.0]]);
        let scaler = StandardScaler::fit(&x);

        let scaled = scaler.transform(&x);
        assert_eq!(scaled[(0, 0)], -1.0);
        assert_eq!(scaled[(1, 0)], 1.0);
        // Constant column: std clamps to one, values center to zero.
        assert_eq!(scaled[(0, 1)], 0.0);
        assert_eq!(scaled[(1, 1)], 0.0);
    }
}
