//! Zone classifier
//!
//! A sample belongs to a zone when each of its three axes falls inside the
//! zone's inclusive range for that axis. The three named zones are checked
//! in fixed priority order; anything left over is the ambiguous dead zone
//! separating them.

use crate::config::ConfigError;
use crate::sensor::AccelSample;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Inclusive bounds on one axis (milli-g)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AxisRange {
    pub start: i16,
    pub end: i16,
}

impl AxisRange {
    pub const fn new(start: i16, end: i16) -> Self {
        Self { start, end }
    }

    /// Check if a value lies within the range (inclusive)
    #[inline]
    pub const fn contains(&self, value: i16) -> bool {
        value >= self.start && value <= self.end
    }

    /// Check if two ranges share at least one value
    pub const fn overlaps(&self, other: &AxisRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    pub const fn is_valid(&self) -> bool {
        self.start <= self.end
    }
}

/// Cuboid region of 3-axis accelerometer space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Zone {
    pub x: AxisRange,
    pub y: AxisRange,
    pub z: AxisRange,
}

impl Zone {
    pub const fn new(x: AxisRange, y: AxisRange, z: AxisRange) -> Self {
        Self { x, y, z }
    }

    /// Check if all three axes of the sample fall inside this zone
    #[inline]
    pub const fn contains(&self, sample: &AccelSample) -> bool {
        self.x.contains(sample.x) && self.y.contains(sample.y) && self.z.contains(sample.z)
    }

    /// Check if two zones intersect (every axis overlaps)
    pub const fn overlaps(&self, other: &Zone) -> bool {
        self.x.overlaps(&other.x) && self.y.overlaps(&other.y) && self.z.overlaps(&other.z)
    }

    pub const fn is_valid(&self) -> bool {
        self.x.is_valid() && self.y.is_valid() && self.z.is_valid()
    }
}

/// Classification of a single sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ZoneLabel {
    /// Watch raised toward the face
    Active,
    /// Arm hanging, face down
    InactiveDownward,
    /// Wrist rotated away from the face
    InactiveAway,
    /// Transitional orientation matching no zone
    Ambiguous,
}

/// The three named zones used by the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZoneSet {
    pub active: Zone,
    pub inactive_downward: Zone,
    pub inactive_away: Zone,
}

impl Default for ZoneSet {
    fn default() -> Self {
        Self {
            active: Zone::new(
                AxisRange::new(-400, 400),
                AxisRange::new(-900, 100),
                AxisRange::new(-1100, 0),
            ),
            inactive_downward: Zone::new(
                AxisRange::new(-1200, 1200),
                AxisRange::new(-1300, -1000),
                AxisRange::new(-600, 600),
            ),
            inactive_away: Zone::new(
                AxisRange::new(-1200, 1200),
                AxisRange::new(-700, 700),
                AxisRange::new(200, 1300),
            ),
        }
    }
}

impl ZoneSet {
    /// Classify one sample
    ///
    /// Priority order is Active, then InactiveDownward, then InactiveAway.
    pub fn classify(&self, sample: &AccelSample) -> ZoneLabel {
        if self.active.contains(sample) {
            ZoneLabel::Active
        } else if self.inactive_downward.contains(sample) {
            ZoneLabel::InactiveDownward
        } else if self.inactive_away.contains(sample) {
            ZoneLabel::InactiveAway
        } else {
            ZoneLabel::Ambiguous
        }
    }

    /// Check that every range is well-formed and no two zones intersect
    pub fn validate(&self) -> Result<(), ConfigError> {
        let zones = [&self.active, &self.inactive_downward, &self.inactive_away];

        if zones.iter().any(|z| !z.is_valid()) {
            return Err(ConfigError::InvalidRange);
        }

        for (i, a) in zones.iter().enumerate() {
            for b in &zones[i + 1..] {
                if a.overlaps(b) {
                    return Err(ConfigError::OverlappingZones);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_axis_range_inclusive() {
        let range = AxisRange::new(-400, 400);
        assert!(range.contains(-400));
        assert!(range.contains(400));
        assert!(range.contains(0));
        assert!(!range.contains(401));
        assert!(!range.contains(-401));
    }

    #[test]
    fn test_classify_default_zones() {
        let zones = ZoneSet::default();

        // Face up, slightly tilted toward the wearer
        assert_eq!(
            zones.classify(&AccelSample::new(0, -400, -900)),
            ZoneLabel::Active
        );
        // Arm hanging
        assert_eq!(
            zones.classify(&AccelSample::new(100, -1050, 0)),
            ZoneLabel::InactiveDownward
        );
        // Face turned away
        assert_eq!(
            zones.classify(&AccelSample::new(0, 0, 900)),
            ZoneLabel::InactiveAway
        );
        // Between active and away
        assert_eq!(
            zones.classify(&AccelSample::new(0, 0, 100)),
            ZoneLabel::Ambiguous
        );
    }

    #[test]
    fn test_boundary_is_inside() {
        let zones = ZoneSet::default();
        let corner = AccelSample::new(400, 100, 0);
        assert_eq!(zones.classify(&corner), ZoneLabel::Active);

        let just_outside = AccelSample::new(401, 100, 0);
        assert_ne!(zones.classify(&just_outside), ZoneLabel::Active);
    }

    #[test]
    fn test_priority_order_on_overlap() {
        // Deliberately overlapping zones: active must win
        let everything = Zone::new(
            AxisRange::new(i16::MIN, i16::MAX),
            AxisRange::new(i16::MIN, i16::MAX),
            AxisRange::new(i16::MIN, i16::MAX),
        );
        let zones = ZoneSet {
            active: Zone::new(
                AxisRange::new(0, 10),
                AxisRange::new(0, 10),
                AxisRange::new(0, 10),
            ),
            inactive_downward: everything,
            inactive_away: everything,
        };

        assert_eq!(zones.classify(&AccelSample::new(5, 5, 5)), ZoneLabel::Active);
        assert_eq!(
            zones.classify(&AccelSample::new(50, 5, 5)),
            ZoneLabel::InactiveDownward
        );
        assert_eq!(zones.validate(), Err(ConfigError::OverlappingZones));
    }

    #[test]
    fn test_default_zones_validate() {
        assert_eq!(ZoneSet::default().validate(), Ok(()));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut zones = ZoneSet::default();
        zones.inactive_away.z = AxisRange::new(1300, 200);
        assert_eq!(zones.validate(), Err(ConfigError::InvalidRange));
    }

    proptest! {
        #[test]
        fn prop_classify_total_and_deterministic(x: i16, y: i16, z: i16) {
            let zones = ZoneSet::default();
            let sample = AccelSample::new(x, y, z);
            let first = zones.classify(&sample);
            prop_assert_eq!(first, zones.classify(&sample));

            let expected = if zones.active.contains(&sample) {
                ZoneLabel::Active
            } else if zones.inactive_downward.contains(&sample) {
                ZoneLabel::InactiveDownward
            } else if zones.inactive_away.contains(&sample) {
                ZoneLabel::InactiveAway
            } else {
                ZoneLabel::Ambiguous
            };
            prop_assert_eq!(first, expected);
        }

        #[test]
        fn prop_default_zones_never_overlap(x: i16, y: i16, z: i16) {
            let zones = ZoneSet::default();
            let sample = AccelSample::new(x, y, z);
            let hits = [zones.active, zones.inactive_downward, zones.inactive_away]
                .iter()
                .filter(|zone| zone.contains(&sample))
                .count();
            prop_assert!(hits <= 1);
        }
    }
}
