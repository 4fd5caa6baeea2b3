//! Percentage arithmetic shared by both split axes.

const TOTAL: f64 = 100.0;

pub fn equal_split(count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    vec![TOTAL / count as f64; count]
}

/// Rescales `values` to sum to 100 with every entry at least `min`.
///
/// A non-positive sum, or a floor that cannot be honoured for every entry,
/// falls back to an equal split. Excess introduced by flooring small entries
/// is taken proportionally from the entries that sit above the floor.
pub fn normalize_percent(values: &[f64], min: f64) -> Vec<f64> {
    let count = values.len();
    if count == 0 {
        return Vec::new();
    }
    let sum: f64 = values.iter().map(|v| v.max(0.0)).sum();
    if sum <= 0.0 || !sum.is_finite() || min * count as f64 > TOTAL {
        return equal_split(count);
    }
    let mut out: Vec<f64> = values.iter().map(|v| v.max(0.0) / sum * TOTAL).collect();
    // Each round pins at least one more entry to the floor, so `count`
    // rounds are enough.
    for _ in 0..count {
        let pinned: Vec<bool> = out.iter().map(|v| *v <= min).collect();
        let pinned_total = pinned.iter().filter(|p| **p).count() as f64 * min;
        let free_total: f64 = out
            .iter()
            .zip(&pinned)
            .filter(|(_, p)| !**p)
            .map(|(v, _)| *v)
            .sum();
        let target = TOTAL - pinned_total;
        if free_total <= 0.0 {
            return equal_split(count);
        }
        let scale = target / free_total;
        let mut settled = true;
        for (value, is_pinned) in out.iter_mut().zip(&pinned) {
            if *is_pinned {
                *value = min;
            } else {
                *value *= scale;
                if *value < min {
                    settled = false;
                }
            }
        }
        if settled {
            break;
        }
    }
    out
}

/// Moves `delta` percent from cell `index + 1` to cell `index`, keeping both
/// at or above `min`. Cells other than the two neighbours never change.
pub fn shift_divider(values: &mut [f64], index: usize, delta: f64, min: f64) {
    if index + 1 >= values.len() {
        return;
    }
    let mut a = values[index] + delta;
    let mut b = values[index + 1] - delta;
    if a < min {
        b += a - min;
        a = min;
    }
    if b < min {
        a += b - min;
        b = min;
    }
    values[index] = a;
    values[index + 1] = b;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(values: &[f64]) -> f64 {
        values.iter().sum()
    }

    #[test]
    fn normalize_rescales_to_hundred() {
        let out = normalize_percent(&[1.0, 1.0, 2.0], 8.0);
        assert_eq!(out, vec![25.0, 25.0, 50.0]);
    }

    #[test]
    fn normalize_floors_and_keeps_total() {
        let out = normalize_percent(&[1.0, 99.0], 8.0);
        assert!((out[0] - 8.0).abs() < 1e-9);
        assert!((sum(&out) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_falls_back_to_equal_split() {
        assert_eq!(normalize_percent(&[0.0, 0.0], 8.0), vec![50.0, 50.0]);
        assert_eq!(normalize_percent(&[1.0, 2.0], 60.0), vec![50.0, 50.0]);
    }

    #[test]
    fn shift_clamps_at_floor() {
        let mut v = vec![50.0, 50.0];
        shift_divider(&mut v, 0, -48.0, 8.0);
        assert_eq!(v, vec![8.0, 92.0]);
        shift_divider(&mut v, 0, 200.0, 8.0);
        assert_eq!(v, vec![92.0, 8.0]);
    }

    #[test]
    fn shift_leaves_other_cells_alone() {
        let mut v = vec![30.0, 30.0, 40.0];
        shift_divider(&mut v, 1, 5.0, 8.0);
        assert_eq!(v, vec![30.0, 35.0, 35.0]);
        shift_divider(&mut v, 2, 5.0, 8.0);
        assert_eq!(v, vec![30.0, 35.0, 35.0]);
    }
}
