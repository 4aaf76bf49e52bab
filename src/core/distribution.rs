use std::fmt;

use log::debug;

use crate::core::common::{first_index_at_least, Float};
use crate::core::grid::RgbGrid;

/// The image carries no energy, so no sampling distribution exists.
/// The caller decides whether to fall back to uniform sampling or
/// abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroTotalWeight;

impl fmt::Display for ZeroTotalWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "total importance weight is zero (all-black image)")
    }
}

impl std::error::Error for ZeroTotalWeight {}

/// One importance sample: normalized coordinates in [0, 1)^2 plus the
/// discrete probability mass of the grid cell the sample resolved to.
/// Coordinates are quantized to the working grid; there is no sub-cell
/// jitter, so identical uniforms always land on the cell corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x  : Float,
    pub y  : Float,
    pub pdf: Float
}

/// Uniform bypass: the raw uniforms become the coordinates directly,
/// with unit density. Takes the same `(u_row, u_col)` pair that drives
/// the CDF inversion so the two modes are comparable draw for draw.
pub fn sample_uniform(u_row: Float, u_col: Float) -> Sample {
    Sample { x: u_col, y: u_row, pdf: 1.0 }
}

/// Two-level empirical distribution over a working grid: a marginal
/// CDF over rows and, per row, a conditional CDF over columns. The
/// importance weight of a pixel is `(r + g + b)^2`, a cheap proxy for
/// luminance rather than a photometric formula.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDistribution2D {
    weights        : Vec<Float>,
    total_weight   : Float,
    marginal_cdf   : Vec<Float>,
    conditional_cdf: Vec<Float>,
    width          : usize,
    height         : usize
}

impl ImageDistribution2D {
    /// Build the weight grid and both CDF levels from a working grid.
    /// A pure function of the grid contents: rebuilding from the same
    /// grid yields bit-identical tables. Fails only when the total
    /// weight is zero; a zero-weight row is kept as an all-zero
    /// conditional CDF and resolved during inversion instead.
    pub fn build(grid: &RgbGrid) -> Result<Self, ZeroTotalWeight> {
        let width = grid.width();
        let height = grid.height();

        // Weight extraction, accumulated in row-major order
        let mut weights = Vec::with_capacity(width * height);
        let mut total_weight: Float = 0.0;

        for row in 0..height {
            for col in 0..width {
                let [r, g, b] = grid.pixel(row, col);
                let s = r + g + b;
                weights.push(s * s);
                total_weight += s * s;
            }
        }

        if total_weight == 0.0 {
            return Err(ZeroTotalWeight);
        }

        // Marginal CDF over rows
        let mut marginal_cdf = Vec::with_capacity(height);
        let mut acc = 0.0;

        for row in 0..height {
            let row_total: Float = weights[row * width..(row + 1) * width].iter().sum();
            acc += row_total / total_weight;
            marginal_cdf.push(acc);
        }

        // Conditional CDF over columns, normalized per row. A row with
        // no weight keeps an identically-zero CDF; lookups against it
        // fall back to column 0.
        let mut conditional_cdf = vec![0.0; width * height];

        for row in 0..height {
            let row_weights = &weights[row * width..(row + 1) * width];
            let row_total: Float = row_weights.iter().sum();

            if row_total > 0.0 {
                let mut acc = 0.0;

                for col in 0..width {
                    acc += row_weights[col] / row_total;
                    conditional_cdf[row * width + col] = acc;
                }
            }
        }

        debug!(
            "Built {}x{} image distribution, total weight {}",
            width, height, total_weight);

        Ok(Self {
            weights,
            total_weight,
            marginal_cdf,
            conditional_cdf,
            width,
            height
        })
    }

    pub fn width(&self) -> usize { self.width }

    pub fn height(&self) -> usize { self.height }

    pub fn total_weight(&self) -> Float { self.total_weight }

    pub fn weight(&self, row: usize, col: usize) -> Float {
        assert!(row < self.height && col < self.width);

        self.weights[row * self.width + col]
    }

    pub fn marginal_cdf(&self) -> &[Float] {
        &self.marginal_cdf
    }

    pub fn conditional_cdf(&self, row: usize) -> &[Float] {
        assert!(row < self.height);

        &self.conditional_cdf[row * self.width..(row + 1) * self.width]
    }

    /// Invert one pair of uniforms through the two-level CDF. Row and
    /// column are each the first index whose CDF entry reaches the
    /// uniform; a lookup that finds no such index (rounding left the
    /// CDF top below the uniform, or the selected row has no weight)
    /// resolves to index 0 rather than failing. The returned density is
    /// the probability mass of the resolved cell.
    pub fn sample(&self, u_row: Float, u_col: Float) -> Sample {
        let row = first_index_at_least(&self.marginal_cdf, u_row).unwrap_or(0);
        let col = first_index_at_least(self.conditional_cdf(row), u_col).unwrap_or(0);

        Sample {
            x  : col as Float / self.width as Float,
            y  : row as Float / self.height as Float,
            pdf: self.weights[row * self.width + col] / self.total_weight
        }
    }
}
