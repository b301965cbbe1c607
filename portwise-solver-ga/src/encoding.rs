//! Random-key encoding of visiting orders.
//!
//! A candidate holds one key in `[0, 1)` per free stop. Sorting the free
//! stops by key yields the visiting order, so every key vector decodes to a
//! valid permutation and crossover never produces an invalid tour.

use rand::Rng;

/// Keys for one candidate, indexed by free stop.
pub type RandomKeys = Vec<f64>;

/// Decode `keys` into a visiting order of stop indices `1..=keys.len()`.
///
/// The sort is stable, so equal keys keep their stop order. Non-finite keys
/// sort with [`f64::total_cmp`].
///
/// # Examples
///
/// ```
/// use portwise_solver_ga::encoding::decode;
///
/// assert_eq!(decode(&[0.7, 0.1, 0.4]), vec![2, 3, 1]);
/// ```
#[must_use]
pub fn decode(keys: &[f64]) -> Vec<usize> {
    let mut ranked: Vec<(usize, f64)> = keys.iter().copied().enumerate().collect();
    ranked.sort_by(|lhs, rhs| lhs.1.total_cmp(&rhs.1));
    ranked.into_iter().map(|(gene, _)| gene + 1).collect()
}

/// Keys that decode to the request order `1, 2, ..., genes`.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "keys are evenly spaced fractions of the unit interval"
)]
#[expect(
    clippy::cast_precision_loss,
    reason = "stop counts are far below the f64 mantissa"
)]
pub fn as_given_keys(genes: usize) -> RandomKeys {
    let scale = genes.max(1) as f64;
    (0..genes).map(|gene| gene as f64 / scale).collect()
}

/// Uniformly random keys.
pub fn random_keys<G: Rng + ?Sized>(rng: &mut G, genes: usize) -> RandomKeys {
    (0..genes).map(|_| rng.r#gen::<f64>()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    #[rstest]
    #[case(&[], vec![])]
    #[case(&[0.3], vec![1])]
    #[case(&[0.9, 0.2, 0.5, 0.0], vec![4, 2, 3, 1])]
    #[case(&[0.5, 0.5, 0.1], vec![3, 1, 2])]
    fn decodes_by_ascending_key(#[case] keys: &[f64], #[case] order: Vec<usize>) {
        assert_eq!(decode(keys), order);
    }

    #[rstest]
    #[case(1)]
    #[case(5)]
    #[case(12)]
    fn as_given_keys_decode_to_request_order(#[case] genes: usize) {
        let expected: Vec<usize> = (1..=genes).collect();
        assert_eq!(decode(&as_given_keys(genes)), expected);
    }

    #[rstest]
    fn random_keys_stay_in_the_unit_interval() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let keys = random_keys(&mut rng, 64);
        assert_eq!(keys.len(), 64);
        assert!(keys.iter().all(|key| (0.0..1.0).contains(key)));
    }

    proptest! {
        #[test]
        fn decode_always_yields_a_permutation(keys in prop::collection::vec(any::<f64>(), 0..32)) {
            let mut order = decode(&keys);
            order.sort_unstable();
            let expected: Vec<usize> = (1..=keys.len()).collect();
            prop_assert_eq!(order, expected);
        }
    }
}
