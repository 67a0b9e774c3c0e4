mod gbm;
pub mod monte_carlo;

pub use gbm::GeometricBrownianMotion;
pub use monte_carlo::{
    path_generator, MonteCarloConfig, MonteCarloNoteSimulator, PathSampler, MAX_PATHS,
};
