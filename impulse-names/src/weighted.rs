//! Rank-weighted random selection.

use rand::Rng;

/// Returns the selection weight of the element at `index`.
#[must_use]
pub fn weight_of(index: usize) -> f64 {
    1.0 / (index as f64 + 1.0)
}

/// Picks one element from `items`, favoring earlier entries.
///
/// The element at index `i` has weight `1 / (i + 1)`; a single uniform draw is
/// taken over the total weight and walked down the cumulative sum. Returns
/// `None` only for an empty slice. If floating-point rounding leaves the draw
/// positive after the last element, the first element is returned.
pub fn select_weighted<'a, T, R: Rng>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }

    let total: f64 = (0..items.len()).map(weight_of).sum();
    let mut remaining = rng.r#gen::<f64>() * total;

    for (i, item) in items.iter().enumerate() {
        remaining -= weight_of(i);
        if remaining <= 0.0 {
            return Some(item);
        }
    }

    items.first()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn empty_slice_yields_none() {
        let mut rng = StdRng::seed_from_u64(1);
        let items: [u32; 0] = [];
        assert!(select_weighted(&mut rng, &items).is_none());
    }

    #[test]
    fn single_element_always_chosen() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            assert_eq!(select_weighted(&mut rng, &["only"]), Some(&"only"));
        }
    }

    #[test]
    fn weights_decrease_with_index() {
        assert_eq!(weight_of(0), 1.0);
        assert_eq!(weight_of(1), 0.5);
        assert!(weight_of(9) < weight_of(8));
    }

    #[test]
    fn first_element_is_most_frequent() {
        let mut rng = StdRng::seed_from_u64(42);
        let items = [0usize, 1, 2, 3, 4, 5, 6, 7];
        let mut counts = [0u32; 8];
        for _ in 0..20_000 {
            let picked = select_weighted(&mut rng, &items).unwrap();
            counts[*picked] += 1;
        }

        // Expected share of index 0 is 1 / H(8) ~ 0.368, of index 7 ~ 0.046.
        assert!(counts[0] > counts[1]);
        assert!(counts[1] > counts[7]);
        assert!(counts.iter().all(|&c| c > 0));
    }
}
