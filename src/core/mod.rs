pub mod common;
pub mod distribution;
pub mod grid;
pub mod imageio;
pub mod rng;
pub mod sampler;
