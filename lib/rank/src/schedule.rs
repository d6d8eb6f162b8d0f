//! Funnel schedule: which prefixes to score on and how hard to prune.

use funnelx_core::{Error, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SCALES: [usize; 3] = [256, 512, 768];
pub const DEFAULT_PRUNE_RATIO: f64 = 0.5;

/// Validated `(scales, prune_ratio)` pair.
///
/// Deserialization goes through [`FunnelSchedule::new`], so a schedule read
/// from JSON is checked the same way as one built in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSchedule")]
pub struct FunnelSchedule {
    scales: Vec<usize>,
    prune_ratio: f64,
}

#[derive(Deserialize)]
struct RawSchedule {
    #[serde(default = "default_scales")]
    scales: Vec<usize>,
    #[serde(default = "default_prune_ratio")]
    prune_ratio: f64,
}

fn default_scales() -> Vec<usize> {
    DEFAULT_SCALES.to_vec()
}

fn default_prune_ratio() -> f64 {
    DEFAULT_PRUNE_RATIO
}

impl TryFrom<RawSchedule> for FunnelSchedule {
    type Error = Error;

    fn try_from(raw: RawSchedule) -> Result<Self> {
        FunnelSchedule::new(raw.scales, raw.prune_ratio)
    }
}

impl Default for FunnelSchedule {
    fn default() -> Self {
        Self {
            scales: default_scales(),
            prune_ratio: DEFAULT_PRUNE_RATIO,
        }
    }
}

impl FunnelSchedule {
    /// Scales are used in the order given; coarse-to-fine is the caller's call.
    pub fn new(scales: Vec<usize>, prune_ratio: f64) -> Result<Self> {
        if scales.is_empty() {
            return Err(Error::InvalidSchedule("scales must not be empty".to_string()));
        }
        if scales.contains(&0) {
            return Err(Error::InvalidSchedule("scales must be positive".to_string()));
        }
        if !(prune_ratio > 0.0 && prune_ratio < 1.0) {
            return Err(Error::InvalidSchedule(format!(
                "prune_ratio must be in (0, 1), got {}",
                prune_ratio
            )));
        }
        Ok(Self {
            scales,
            prune_ratio,
        })
    }

    pub fn scales(&self) -> &[usize] {
        &self.scales
    }

    pub fn prune_ratio(&self) -> f64 {
        self.prune_ratio
    }

    /// Longest prefix any round reads
    pub fn max_dims(&self) -> usize {
        self.scales.iter().copied().max().unwrap_or(0)
    }

    /// Survivors after pruning a round of `current` candidates.
    ///
    /// Truncates toward zero, but never below one.
    pub fn retain_count(&self, current: usize) -> usize {
        ((self.prune_ratio * current as f64) as usize).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let s = FunnelSchedule::default();
        assert_eq!(s.scales(), &[256, 512, 768]);
        assert_eq!(s.prune_ratio(), 0.5);
        assert_eq!(s.max_dims(), 768);
    }

    #[test]
    fn test_rejects_empty_scales() {
        assert!(matches!(
            FunnelSchedule::new(vec![], 0.5),
            Err(Error::InvalidSchedule(_))
        ));
    }

    #[test]
    fn test_rejects_zero_scale() {
        assert!(matches!(
            FunnelSchedule::new(vec![0, 64], 0.5),
            Err(Error::InvalidSchedule(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_ratio() {
        for ratio in [0.0, 1.0, -0.2, 1.5, f64::NAN] {
            assert!(
                FunnelSchedule::new(vec![8], ratio).is_err(),
                "ratio {} accepted",
                ratio
            );
        }
    }

    #[test]
    fn test_unordered_scales_allowed() {
        let s = FunnelSchedule::new(vec![512, 128, 768], 0.5).unwrap();
        assert_eq!(s.max_dims(), 768);
    }

    #[test]
    fn test_retain_count_truncates() {
        let s = FunnelSchedule::new(vec![8], 0.5).unwrap();
        assert_eq!(s.retain_count(4), 2);
        assert_eq!(s.retain_count(5), 2);
        assert_eq!(s.retain_count(128), 64);
    }

    #[test]
    fn test_retain_count_at_least_one() {
        let s = FunnelSchedule::new(vec![8], 0.1).unwrap();
        assert_eq!(s.retain_count(1), 1);
        assert_eq!(s.retain_count(5), 1);
    }

    #[test]
    fn test_retain_count_ratio_near_one() {
        let s = FunnelSchedule::new(vec![8], 0.99).unwrap();
        assert_eq!(s.retain_count(10), 9);
        assert_eq!(s.retain_count(50), 49);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let s: FunnelSchedule = serde_json::from_str("{}").unwrap();
        assert_eq!(s, FunnelSchedule::default());

        let s: FunnelSchedule = serde_json::from_str(r#"{"scales": [64, 128]}"#).unwrap();
        assert_eq!(s.scales(), &[64, 128]);
        assert_eq!(s.prune_ratio(), 0.5);
    }

    #[test]
    fn test_deserialize_validates() {
        let err = serde_json::from_str::<FunnelSchedule>(r#"{"prune_ratio": 1.0}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_serialize_roundtrip_shape() {
        let s = FunnelSchedule::new(vec![32, 64], 0.25).unwrap();
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["scales"], serde_json::json!([32, 64]));
        assert_eq!(json["prune_ratio"], serde_json::json!(0.25));
    }
}
