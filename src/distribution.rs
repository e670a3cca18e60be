use crate::error::{BinScoreError, BsResult};

/// Read-only view of a one-dimensional binned distribution.
///
/// Bins are addressed 1-based: valid indices are `1..=bin_count()`.
/// Implementations may panic on indices outside that range; the scorers
/// never request them.
pub trait BinnedDistribution {
    fn bin_count(&self) -> usize;
    fn content(&self, bin: usize) -> f64;
    fn error(&self, bin: usize) -> f64;
}

impl<T: BinnedDistribution + ?Sized> BinnedDistribution for &T {
    #[inline(always)]
    fn bin_count(&self) -> usize {
        (**self).bin_count()
    }

    #[inline(always)]
    fn content(&self, bin: usize) -> f64 {
        (**self).content(bin)
    }

    #[inline(always)]
    fn error(&self, bin: usize) -> f64 {
        (**self).error(bin)
    }
}

/// Owned histogram: parallel vectors of bin contents and bin errors.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    contents: Vec<f64>,
    errors: Vec<f64>,
}

impl Histogram {
    pub fn new(contents: Vec<f64>, errors: Vec<f64>) -> BsResult<Self> {
        if contents.is_empty() {
            return Err(BinScoreError::Validation(
                "Histogram needs at least one bin".to_string(),
            ));
        }
        if contents.len() != errors.len() {
            return Err(BinScoreError::Validation(format!(
                "Histogram has {} contents but {} errors",
                contents.len(),
                errors.len()
            )));
        }

        for (i, (&c, &e)) in contents.iter().zip(errors.iter()).enumerate() {
            if !c.is_finite() || c < 0.0 {
                return Err(BinScoreError::Validation(format!(
                    "Bin {} has invalid content {}",
                    i + 1,
                    c
                )));
            }
            if !e.is_finite() || e < 0.0 {
                return Err(BinScoreError::Validation(format!(
                    "Bin {} has invalid error {}",
                    i + 1,
                    e
                )));
            }
        }

        Ok(Self { contents, errors })
    }

    /// Counting histogram with Poisson errors (`sqrt(n)` per bin).
    pub fn from_counts(counts: Vec<f64>) -> BsResult<Self> {
        let errors = counts.iter().map(|c| c.max(0.0).sqrt()).collect();
        Self::new(counts, errors)
    }

    /// Copy of bins `offset+1..=N` as a new histogram.
    pub fn slice_from(&self, offset: usize) -> BsResult<Self> {
        if offset >= self.contents.len() {
            return Err(BinScoreError::OffsetOutOfRange {
                offset,
                bin_count: self.contents.len(),
            });
        }
        Ok(Self {
            contents: self.contents[offset..].to_vec(),
            errors: self.errors[offset..].to_vec(),
        })
    }

    pub fn contents(&self) -> &[f64] {
        &self.contents
    }

    pub fn errors(&self) -> &[f64] {
        &self.errors
    }
}

impl BinnedDistribution for Histogram {
    #[inline(always)]
    fn bin_count(&self) -> usize {
        self.contents.len()
    }

    #[inline(always)]
    fn content(&self, bin: usize) -> f64 {
        self.contents[bin - 1]
    }

    #[inline(always)]
    fn error(&self, bin: usize) -> f64 {
        self.errors[bin - 1]
    }
}
