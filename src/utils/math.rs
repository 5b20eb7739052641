//! # Game Mathematics
//!
//! Integer helpers for disc stamping and floored scaling.

/// Offsets `(dx, dy)` of every cell within Euclidean distance `radius` of the
/// origin, row by row from the top-left.
///
/// # Examples
///
/// ```
/// use lettervale::disc_offsets;
///
/// assert_eq!(disc_offsets(0), vec![(0, 0)]);
/// assert_eq!(disc_offsets(1).len(), 5);
/// assert_eq!(disc_offsets(2).len(), 13);
/// ```
pub fn disc_offsets(radius: i32) -> Vec<(i32, i32)> {
    let radius = radius.max(0);
    let mut offsets = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if i64::from(dx).pow(2) + i64::from(dy).pow(2) <= i64::from(radius).pow(2) {
                offsets.push((dx, dy));
            }
        }
    }
    offsets
}

/// `floor(value * numerator / denominator)` without going through floats.
///
/// A zero denominator yields zero.
pub fn scale_floor(value: u32, numerator: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        return 0;
    }
    let scaled = u64::from(value) * u64::from(numerator) / u64::from(denominator);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disc_is_symmetric_and_bounded() {
        let disc = disc_offsets(2);
        for &(dx, dy) in &disc {
            assert!(dx * dx + dy * dy <= 4);
            assert!(disc.contains(&(-dx, -dy)));
        }
        assert!(disc.contains(&(2, 0)));
        assert!(!disc.contains(&(2, 1)));
    }

    #[test]
    fn test_negative_radius_is_a_point() {
        assert_eq!(disc_offsets(-3), vec![(0, 0)]);
    }

    #[test]
    fn test_scale_floor() {
        assert_eq!(scale_floor(5, 6, 5), 6);
        assert_eq!(scale_floor(3, 6, 5), 3);
        assert_eq!(scale_floor(3, 4, 5), 2);
        assert_eq!(scale_floor(7, 1, 0), 0);
        assert_eq!(scale_floor(u32::MAX, 2, 1), u32::MAX);
    }
}
