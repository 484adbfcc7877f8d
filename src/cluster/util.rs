#[inline]
pub(crate) fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Hashable identity of a coordinate tuple.
///
/// `-0.0` maps to the same key as `0.0` so that hashing agrees with `==`.
/// Callers reject NaN before building keys.
pub(crate) fn value_key(coords: &[f64]) -> Vec<u64> {
    coords
        .iter()
        .map(|&c| if c == 0.0 { 0.0f64.to_bits() } else { c.to_bits() })
        .collect()
}
