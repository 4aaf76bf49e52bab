pub type Float = f32;

pub fn clamp<T>(val: T, low: T, high: T) -> T
where T: PartialOrd
{
    if val < low {
        low
    } else if val > high {
        high
    } else {
        val
    }
}

/// Binary search over a monotonically non-decreasing CDF for the first
/// index whose entry is >= u. Returns None when no entry qualifies,
/// which happens when floating-point rounding leaves the top of the CDF
/// below u, or for an identically-zero CDF with u > 0.
pub fn first_index_at_least(cdf: &[Float], u: Float) -> Option<usize> {
    let mut first = 0;
    let mut len = cdf.len();

    while len > 0 {
        let half = len >> 1;
        let middle = first + half;

        // Bisect range based on whether the middle entry reaches u
        if cdf[middle] < u {
            first = middle + 1;
            len -= half + 1;
        } else {
            len = half;
        }
    }

    if first < cdf.len() { Some(first) } else { None }
}

pub fn gamma_correct(value: Float) -> Float {
    if value <= 0.0031308 {
        return 12.92 * value;
    }

    1.055 * value.powf(1.0 / 2.4) - 0.055
}
