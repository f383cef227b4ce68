/// Scales visited by a batch zoom animation.
///
/// Yields `scale`, `scale * factor`, `scale * factor²`, ... for as long as the
/// value is strictly greater than `min_scale`. A start at or below the minimum
/// yields nothing. A factor that does not shrink the scale yields at most the
/// starting scale instead of running forever.
pub fn zoom_sequence(scale: f64, factor: f64, min_scale: f64) -> impl Iterator<Item = f64> {
    let shrinks = factor > 0.0 && factor < 1.0;
    let mut next = Some(scale);

    std::iter::from_fn(move || {
        let current = next.filter(|&current| current > min_scale)?;
        next = shrinks.then_some(current * factor);
        Some(current)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_at_or_below_minimum_yields_nothing() {
        assert_eq!(zoom_sequence(2.0, 0.5, 10.0).count(), 0);
        assert_eq!(zoom_sequence(0.5, 0.5, 0.5).count(), 0);
    }

    #[test]
    fn test_halving_down_to_minimum() {
        let scales: Vec<_> = zoom_sequence(1.0, 0.5, 0.1).collect();

        assert_eq!(scales, vec![1.0, 0.5, 0.25, 0.125]);
    }

    #[test]
    fn test_minimum_itself_is_not_emitted() {
        let scales: Vec<_> = zoom_sequence(1.0, 0.5, 0.25).collect();

        assert_eq!(scales, vec![1.0, 0.5]);
    }

    #[test]
    fn test_non_shrinking_factor_yields_single_frame() {
        assert_eq!(zoom_sequence(1.0, 1.0, 0.5).collect::<Vec<_>>(), vec![1.0]);
        assert_eq!(zoom_sequence(1.0, 1.5, 0.5).count(), 1);
        assert_eq!(zoom_sequence(1.0, 0.0, 0.5).count(), 1);
        assert_eq!(zoom_sequence(0.4, 1.5, 0.5).count(), 0);
    }

    #[test]
    fn test_every_scale_stays_above_minimum() {
        let scales: Vec<_> = zoom_sequence(1.0, 0.9, 1e-3).collect();

        assert!(scales.windows(2).all(|pair| pair[1] < pair[0]));
        assert!(scales.iter().all(|&scale| scale > 1e-3));
        assert!(scales.last().unwrap() * 0.9 <= 1e-3);
    }
}
