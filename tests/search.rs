
#[cfg(test)]
mod search {
    use envsampler::core::common::{first_index_at_least, Float};
    use envsampler::core::rng::RNG;

    #[test]
    fn first_index_at_least_test() {
        let cdf = [0.1, 0.4, 0.4, 1.0];

        assert_eq!(Some(0), first_index_at_least(&cdf, 0.0));
        assert_eq!(Some(0), first_index_at_least(&cdf, 0.1));
        assert_eq!(Some(1), first_index_at_least(&cdf, 0.2));
        // Ties resolve to the first qualifying index
        assert_eq!(Some(1), first_index_at_least(&cdf, 0.4));
        assert_eq!(Some(3), first_index_at_least(&cdf, 0.5));
        assert_eq!(Some(3), first_index_at_least(&cdf, 1.0));

        // Nothing reaches a value above the CDF top
        assert_eq!(None, first_index_at_least(&cdf, 1.5));
        assert_eq!(None, first_index_at_least(&[], 0.3));

        // Identically-zero CDF qualifies only for u = 0
        assert_eq!(Some(0), first_index_at_least(&[0.0, 0.0, 0.0], 0.0));
        assert_eq!(None, first_index_at_least(&[0.0, 0.0, 0.0], 0.5));
    }

    #[test]
    fn matches_linear_scan() {
        let linear = |cdf: &[Float], u: Float| cdf.iter().position(|&c| c >= u);

        let mut rng = RNG::new(3);

        for n in 1..40 {
            let mut cdf = Vec::with_capacity(n);
            let mut acc = 0.0;

            for _ in 0..n {
                acc += rng.uniform_float();
                cdf.push(acc);
            }

            let top = cdf[n - 1];
            for v in cdf.iter_mut() { *v /= top; }

            for _ in 0..100 {
                let u = rng.uniform_float();
                assert_eq!(linear(&cdf, u), first_index_at_least(&cdf, u));
            }
        }
    }
}
