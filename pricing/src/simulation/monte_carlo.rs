use rand::{Rng, SeedableRng};
use rand_hc::Hc128Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::common::{ConfigError, NoteParameters};
use crate::evaluator::{evaluate, EvaluationOutcome};
use crate::path::StepPath;
use crate::schedule::ObservationSchedule;
use crate::simulation::GeometricBrownianMotion;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Generates step-indexed price paths from a random number stream.
pub trait PathSampler {
    fn sample_path<R: Rng + ?Sized>(&self, rn_generator: &mut R, nr_steps: usize) -> StepPath;
}

/// Market model and sampling settings of a Monte Carlo run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    pub nr_paths: usize,
    /// simulation steps per year, 252 for trading days
    pub steps_per_year: usize,
    /// the index level `S0` every path starts from
    pub initial_value: f64,
    /// annual drift of the index
    pub drift: f64,
    /// annual volatility of the index
    pub volatility: f64,
    pub seed: u64,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            nr_paths: 200_000,
            steps_per_year: 252,
            initial_value: 100.0,
            drift: 0.07,
            volatility: 0.18,
            seed: 42,
        }
    }
}

impl MonteCarloConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nr_paths == 0 || self.nr_paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.nr_paths));
        }
        if self.steps_per_year == 0 {
            return Err(ConfigError::InvalidStepsPerYear(self.steps_per_year));
        }
        if !(self.initial_value.is_finite() && self.initial_value > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "initial_value",
                reason: format!("must be positive, got {}", self.initial_value),
            });
        }
        if !self.drift.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "drift",
                reason: format!("must be finite, got {}", self.drift),
            });
        }
        if !(self.volatility.is_finite() && self.volatility >= 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "volatility",
                reason: format!("must be non-negative, got {}", self.volatility),
            });
        }
        Ok(())
    }

    /// step size in years
    pub fn dt(&self) -> f64 {
        1.0 / self.steps_per_year as f64
    }
}

impl From<&MonteCarloConfig> for GeometricBrownianMotion {
    fn from(config: &MonteCarloConfig) -> Self {
        GeometricBrownianMotion::new(
            config.initial_value,
            config.drift,
            config.volatility,
            config.dt(),
        )
    }
}

/// The random stream of path `path_nr`.
///
/// Keyed by the run seed and the path number only, so a path draws the same
/// numbers however the run is split across threads.
pub fn path_generator(seed: u64, path_nr: usize) -> Hc128Rng {
    let mut key = [0u8; 32];
    key[..8].copy_from_slice(&seed.to_le_bytes());
    key[8..16].copy_from_slice(&(path_nr as u64).to_le_bytes());
    Hc128Rng::from_seed(key)
}

/// Evaluates a note over independently simulated paths.
pub struct MonteCarloNoteSimulator<S> {
    config: MonteCarloConfig,
    sampler: S,
}

impl MonteCarloNoteSimulator<GeometricBrownianMotion> {
    /// Simulator drawing GBM paths with the config's drift and volatility.
    pub fn gbm(config: MonteCarloConfig) -> Result<Self, ConfigError> {
        let sampler = GeometricBrownianMotion::from(&config);
        Self::new(config, sampler)
    }
}

impl<S> MonteCarloNoteSimulator<S>
where
    S: PathSampler + Sync,
{
    pub fn new(config: MonteCarloConfig, sampler: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, sampler })
    }

    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    pub fn simulate_path(&self, path_nr: usize, nr_steps: usize) -> StepPath {
        let mut generator = path_generator(self.config.seed, path_nr);
        self.sampler.sample_path(&mut generator, nr_steps)
    }

    /// One outcome per simulated path, in path order.
    ///
    /// The schedule is built once and shared by every path.
    pub fn run(&self, params: &NoteParameters) -> Result<Vec<EvaluationOutcome>, ConfigError> {
        params.validate()?;
        let schedule = ObservationSchedule::for_steps(params, self.config.steps_per_year);
        let nr_steps = schedule.step_count();
        debug!(
            nr_paths = self.config.nr_paths,
            nr_steps,
            seed = self.config.seed,
            "simulating note paths"
        );

        let evaluated: Vec<Option<EvaluationOutcome>> = (0..self.config.nr_paths)
            .into_par_iter()
            .map(|path_nr| {
                let path = self.simulate_path(path_nr, nr_steps);
                evaluate(&path, &schedule, params).ok()
            })
            .collect();

        let outcomes: Vec<EvaluationOutcome> = evaluated.into_iter().flatten().collect();
        let dropped = self.config.nr_paths - outcomes.len();
        if dropped > 0 {
            warn!(dropped, "simulated paths did not reach maturity");
        }
        info!(
            evaluated = outcomes.len(),
            called = outcomes.iter().filter(|o| o.called).count(),
            "monte carlo run finished"
        );
        Ok(outcomes)
    }
}
