//! Spatial bucketing of contour heights onto pixel columns.

use crate::{ContourError, GeoProfile, Result};

/// Height samples grouped by the pixel column they project into.
///
/// One bucket per pixel of waterway width. A bucket holds every height whose
/// source sample projected into that column; buckets can be empty where the
/// survey spacing is coarser than a pixel, and can hold several values where
/// it is finer. Empty buckets are not interpolated here - filling them is
/// the clearance resolver's job.
#[derive(Debug, Clone)]
pub struct HeightBuckets {
    buckets: Vec<Vec<f64>>,
}

impl HeightBuckets {
    /// Project every profile sample into a pixel bucket.
    ///
    /// The pixel step is `(last.lon - first.lon) / pixel_width`; each sample
    /// except the last lands in `floor((lon - first.lon) / step)`, clamped
    /// to the valid range. The last sample is forced into the last bucket so
    /// index rounding can never leave it one short. Indices are not required
    /// to increase monotonically; geographic noise may fold a sample back
    /// into an earlier column.
    pub fn bucketize(profile: &GeoProfile, pixel_width: usize) -> Result<Self> {
        if pixel_width == 0 {
            return Err(ContourError::ZeroPixelWidth);
        }

        let first = profile.first();
        let last = profile.last();
        let x_width = (last.lon - first.lon) / pixel_width as f64;
        if x_width == 0.0 {
            return Err(ContourError::DegenerateSpan);
        }

        let mut buckets = vec![Vec::new(); pixel_width];
        let samples = profile.samples();

        for sample in &samples[..samples.len() - 1] {
            let raw = ((sample.lon - first.lon) / x_width).floor();
            let index = raw.max(0.0).min((pixel_width - 1) as f64) as usize;
            buckets[index].push(sample.height_m);
        }
        buckets[pixel_width - 1].push(last.height_m);

        Ok(Self { buckets })
    }

    /// Wrap heights that were already grouped by pixel column.
    ///
    /// Unlike [`bucketize`](Self::bucketize), raw buckets may leave any
    /// column empty, including the first.
    pub fn from_raw(buckets: Vec<Vec<f64>>) -> Result<Self> {
        if buckets.is_empty() {
            return Err(ContourError::ZeroPixelWidth);
        }
        Ok(Self { buckets })
    }

    /// Number of buckets (== waterway pixel width).
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Always false; bucketizing requires at least one pixel of width.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// The heights that projected into bucket `index`.
    pub fn heights_at(&self, index: usize) -> &[f64] {
        &self.buckets[index]
    }

    /// The lowest height in bucket `index`, or `None` when it is empty.
    pub fn min_height(&self, index: usize) -> Option<f64> {
        self.buckets[index]
            .iter()
            .copied()
            .fold(None, |lowest, h| match lowest {
                Some(current) => Some(h.min(current)),
                None => Some(h),
            })
    }

    /// Total number of placed samples across all buckets.
    pub fn sample_count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }
}
