//! Battery-gated zone admission.

use crate::devices::Zone;

/// Minimum battery level (percent) for each admitted-zone count, highest first.
///
/// Below the last threshold a single zone stays admitted.
const THRESHOLDS: [(u8, usize); 3] = [(60, 4), (40, 3), (30, 2)];

/// Zones admitted when the battery is below every threshold.
pub const MIN_ALLOWED_ZONES: usize = 1;

/// Number of leading zones eligible for interaction at `battery_level`.
///
/// Recomputed from scratch on every call, without hysteresis, so a level
/// oscillating around a threshold flips the count each time.
///
/// # Examples
///
/// ```
/// use home_grid::sim::admission::allowed_zone_count;
///
/// assert_eq!(allowed_zone_count(85), 4);
/// assert_eq!(allowed_zone_count(40), 3);
/// assert_eq!(allowed_zone_count(35), 2);
/// assert_eq!(allowed_zone_count(10), 1);
/// ```
pub fn allowed_zone_count(battery_level: u8) -> usize {
    THRESHOLDS
        .iter()
        .find(|(min, _)| battery_level >= *min)
        .map_or(MIN_ALLOWED_ZONES, |&(_, count)| count)
}

/// Whether the zone at `index` in sequence order is admitted.
pub fn is_zone_admitted(index: usize, battery_level: u8) -> bool {
    index < allowed_zone_count(battery_level)
}

/// The admitted prefix of `zones`.
///
/// Always the first N zones of the sequence, never a re-ranked subset.
pub fn admitted_zones(zones: &[Zone], battery_level: u8) -> &[Zone] {
    let n = allowed_zone_count(battery_level).min(zones.len());
    &zones[..n]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::{ZoneId, ZoneRatings};

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(allowed_zone_count(100), 4);
        assert_eq!(allowed_zone_count(60), 4);
        assert_eq!(allowed_zone_count(59), 3);
        assert_eq!(allowed_zone_count(40), 3);
        assert_eq!(allowed_zone_count(39), 2);
        assert_eq!(allowed_zone_count(30), 2);
        assert_eq!(allowed_zone_count(29), 1);
        assert_eq!(allowed_zone_count(0), 1);
    }

    #[test]
    fn count_is_bounded_and_monotonic() {
        let mut previous = 0;
        for level in 0..=100u8 {
            let n = allowed_zone_count(level);
            assert!((1..=4).contains(&n), "level {level} gave {n}");
            assert!(n >= previous, "count dropped at level {level}");
            previous = n;
        }
    }

    #[test]
    fn oscillation_flips_every_time() {
        for _ in 0..3 {
            assert_eq!(allowed_zone_count(60), 4);
            assert_eq!(allowed_zone_count(50), 3);
        }
    }

    #[test]
    fn admitted_prefix_respects_length() {
        let zones: Vec<Zone> = (0..6)
            .map(|i| Zone::new(ZoneId(i), format!("Z{i}"), "🏠", ZoneRatings::default()))
            .collect();
        let admitted = admitted_zones(&zones, 45);
        assert_eq!(admitted.len(), 3);
        assert_eq!(admitted[0].id, ZoneId(0));
        assert_eq!(admitted[2].id, ZoneId(2));

        assert_eq!(admitted_zones(&zones[..1], 100).len(), 1);
        assert!(admitted_zones(&[], 100).is_empty());
    }

    #[test]
    fn zone_admission_by_index() {
        assert!(is_zone_admitted(0, 0));
        assert!(!is_zone_admitted(1, 0));
        assert!(is_zone_admitted(1, 30));
        assert!(is_zone_admitted(3, 60));
        assert!(!is_zone_admitted(4, 100));
    }
}
