use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A dense embedding vector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// First `dims` components.
    ///
    /// Fails with [`Error::DimensionMismatch`] when the vector is shorter
    /// than `dims`.
    #[inline]
    pub fn prefix(&self, dims: usize) -> Result<&[f32]> {
        self.data.get(..dims).ok_or(Error::DimensionMismatch {
            required: dims,
            actual: self.data.len(),
        })
    }

    /// Unit-length copy of the first `dims` components.
    pub fn normalized_prefix(&self, dims: usize) -> Result<Vector> {
        normalize_slice(self.prefix(dims)?).map(Vector::new)
    }

    /// Unit-length copy of the whole vector.
    pub fn normalized(&self) -> Result<Vector> {
        self.normalized_prefix(self.dim())
    }

    /// Cosine similarity with another vector of the same length.
    ///
    /// Zero vectors have no direction, so they report
    /// [`Error::DegenerateVector`] instead of a similarity.
    pub fn cosine_similarity(&self, other: &Vector) -> Result<f32> {
        if self.dim() != other.dim() {
            return Err(Error::InvalidDimension {
                expected: self.dim(),
                actual: other.dim(),
            });
        }
        let a = normalize_slice(&self.data)?;
        let b = normalize_slice(&other.data)?;
        Ok(crate::simd::dot_product_simd(&a, &b))
    }
}

impl From<Vec<f32>> for Vector {
    fn from(data: Vec<f32>) -> Self {
        Self::new(data)
    }
}

impl AsRef<[f32]> for Vector {
    fn as_ref(&self) -> &[f32] {
        &self.data
    }
}

/// L2-normalize a slice into a new buffer.
///
/// An empty slice or one with zero norm yields [`Error::DegenerateVector`].
/// The norm is accumulated in `f64`, so any finite nonzero `f32` input
/// normalizes without overflowing or underflowing.
pub fn normalize_slice(values: &[f32]) -> Result<Vec<f32>> {
    let norm = values
        .iter()
        .map(|&x| f64::from(x) * f64::from(x))
        .sum::<f64>()
        .sqrt();
    if norm == 0.0 || !norm.is_finite() {
        return Err(Error::DegenerateVector { dims: values.len() });
    }
    Ok(values.iter().map(|&x| (f64::from(x) / norm) as f32).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let v1 = Vector::new(vec![1.0, 0.0]);
        let v2 = Vector::new(vec![1.0, 0.0]);
        assert!((v1.cosine_similarity(&v2).unwrap() - 1.0).abs() < 1e-6);

        let v3 = Vector::new(vec![1.0, 0.0]);
        let v4 = Vector::new(vec![0.0, 1.0]);
        assert!(v3.cosine_similarity(&v4).unwrap().abs() < 1e-6);
    }

    #[test]
    fn test_cosine_zero_vector() {
        let v1 = Vector::new(vec![0.0, 0.0]);
        let v2 = Vector::new(vec![1.0, 0.0]);
        assert!(matches!(
            v1.cosine_similarity(&v2),
            Err(Error::DegenerateVector { dims: 2 })
        ));
    }

    #[test]
    fn test_cosine_dimension_mismatch() {
        let v1 = Vector::new(vec![1.0, 0.0, 0.0]);
        let v2 = Vector::new(vec![1.0, 0.0]);
        assert!(matches!(
            v1.cosine_similarity(&v2),
            Err(Error::InvalidDimension { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_prefix() {
        let v = Vector::new(vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(v.prefix(2).unwrap(), &[1.0, 2.0]);
        assert_eq!(v.prefix(4).unwrap().len(), 4);
        assert!(matches!(
            v.prefix(5),
            Err(Error::DimensionMismatch { required: 5, actual: 4 })
        ));
    }

    #[test]
    fn test_normalized_prefix() {
        let v = Vector::new(vec![3.0, 4.0, 100.0]);
        let n = v.normalized_prefix(2).unwrap();
        assert_eq!(n.dim(), 2);
        assert!((n.as_slice()[0] - 0.6).abs() < 1e-6);
        assert!((n.as_slice()[1] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_normalized_prefix_zero_head() {
        let v = Vector::new(vec![0.0, 0.0, 1.0]);
        assert!(matches!(
            v.normalized_prefix(2),
            Err(Error::DegenerateVector { dims: 2 })
        ));
        assert!(v.normalized().is_ok());
    }

    #[test]
    fn test_normalize_extreme_magnitudes() {
        for scale in [1e20f32, 1e-25, f32::MAX / 4.0, 1e-40] {
            let n = normalize_slice(&[3.0 * scale, 4.0 * scale]).unwrap();
            assert!((n[0] - 0.6).abs() < 1e-3, "scale {scale}: {n:?}");
            assert!((n[1] - 0.8).abs() < 1e-3, "scale {scale}: {n:?}");
        }
    }

    #[test]
    fn test_normalize_non_finite() {
        assert!(matches!(
            normalize_slice(&[f32::INFINITY, 1.0]),
            Err(Error::DegenerateVector { dims: 2 })
        ));
        assert!(matches!(
            normalize_slice(&[f32::NAN, 1.0]),
            Err(Error::DegenerateVector { dims: 2 })
        ));
        assert!(matches!(normalize_slice(&[]), Err(Error::DegenerateVector { dims: 0 })));
    }

    #[test]
    fn test_serde_transparent() {
        let v: Vector = serde_json::from_str("[0.5, 1.5]").unwrap();
        assert_eq!(v.as_slice(), &[0.5, 1.5]);
        assert_eq!(serde_json::to_string(&v).unwrap(), "[0.5,1.5]");
    }
}
