use rayon::prelude::*;

use crate::core::distribution::{sample_uniform, ImageDistribution2D, Sample};
use crate::core::rng::RNG;

/// Draw `count` samples, ordered by request index. Every sample
/// consumes two uniforms from the RNG in sequence regardless of mode,
/// so importance and uniform passes with the same seed see the same
/// draws. The uniforms are drawn up front and only the inversion runs
/// on the rayon pool, keeping results independent of thread count.
pub fn sample_many(
    dist: &ImageDistribution2D, count: usize,
    rng: &mut RNG, importance: bool) -> Vec<Sample> {
    let mut uniforms = Vec::with_capacity(count);

    for _ in 0..count {
        let u_row = rng.uniform_float();
        let u_col = rng.uniform_float();
        uniforms.push((u_row, u_col));
    }

    uniforms
        .par_iter()
        .map(|&(u_row, u_col)| {
            if importance {
                dist.sample(u_row, u_col)
            } else {
                sample_uniform(u_row, u_col)
            }
        })
        .collect()
}
