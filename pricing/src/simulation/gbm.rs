use rand::Rng;
use rand_distr::StandardNormal;

use crate::path::StepPath;
use crate::simulation::monte_carlo::PathSampler;

/// Model params for the SDE
/// '''math
/// dS_t / S_t = mu dt + sigma dW_t
/// ''', where $dW_t ~ N(0, sqrt(dt))$
/// https://en.wikipedia.org/wiki/Geometric_Brownian_motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometricBrownianMotion {
    initial_value: f64,
    /// drift term
    mu: f64,
    /// volatility
    sigma: f64,
    /// change in time
    dt: f64,
}

impl GeometricBrownianMotion {
    pub fn new(initial_value: f64, drift: f64, vola: f64, dt: f64) -> Self {
        Self {
            initial_value,
            mu: drift,
            dt,
            sigma: vola,
        }
    }

    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Exact log-normal transition over one step.
    pub fn step(&self, st: f64, z: f64) -> f64 {
        let ret = self.dt * (self.mu - self.sigma.powi(2) / 2.0) + self.dt.sqrt() * self.sigma * z;
        st * ret.exp()
    }

    pub fn generate_path(&self, standard_normals: &[f64]) -> Vec<f64> {
        let mut path = Vec::with_capacity(standard_normals.len() + 1);

        let mut curr_p = self.initial_value;
        path.push(curr_p);

        for z in standard_normals {
            curr_p = self.step(curr_p, *z);
            path.push(curr_p);
        }

        path
    }
}

impl PathSampler for GeometricBrownianMotion {
    #[inline]
    fn sample_path<R: Rng + ?Sized>(&self, rn_generator: &mut R, nr_steps: usize) -> StepPath {
        let standard_normals: Vec<f64> = rn_generator
            .sample_iter(StandardNormal)
            .take(nr_steps)
            .collect();

        StepPath::new(self.generate_path(&standard_normals), self.dt)
    }
}
