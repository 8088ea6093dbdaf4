use super::kernels::FilterKernel;

/// The weight of one source sample in one destination sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contribution {
    /// Byte offset of the source pixel inside a row or column, i.e. `index * channels`.
    pub pixel: usize,
    /// The filter weight applied to every channel of that pixel.
    pub weight: f32,
}

/// Precomputed contributions for every sample of one destination axis.
///
/// Built from the source and destination lengths of a single axis, it maps
/// each destination coordinate to the source samples under the filter
/// footprint. Tables are rebuilt for every resize and never shared.
#[derive(Clone, Debug)]
pub struct ContributionTable {
    contribs: Vec<Vec<Contribution>>,
}

impl ContributionTable {
    /// Compute the contributions for resampling `source_length` samples into `dest_length`.
    ///
    /// When shrinking, the kernel is stretched by `1 / scale` and its weights
    /// divided by the same factor so that every source sample is covered.
    /// Samples falling outside `[0, source_length)` are mirrored back into range.
    ///
    /// # Arguments
    ///
    /// * `source_length` - Number of samples along the source axis, at least 1.
    /// * `dest_length` - Number of samples along the destination axis, at least 1.
    /// * `kernel` - The filter kernel.
    /// * `channels` - Bytes per pixel, used to turn indices into byte offsets.
    ///
    /// # Examples
    ///
    /// ```
    /// use rescale_imgproc::filter::{ContributionTable, FilterKernel};
    ///
    /// let table = ContributionTable::new(4, 4, &FilterKernel::Box, 3);
    ///
    /// assert_eq!(table.len(), 4);
    /// assert_eq!(table.get(2)[0].pixel, 6);
    /// assert_eq!(table.get(2)[0].weight, 1.0);
    /// ```
    pub fn new(
        source_length: usize,
        dest_length: usize,
        kernel: &FilterKernel,
        channels: usize,
    ) -> Self {
        debug_assert!(source_length > 0 && dest_length > 0);

        let scale = dest_length as f32 / source_length as f32;
        let support = kernel.support();

        // widen and flatten the kernel when shrinking
        let (width, filter_scale) = if scale < 1.0 {
            (support / scale, 1.0 / scale)
        } else {
            (support, 1.0)
        };
        let capacity = (width * 2.0 + 1.0) as usize;

        let contribs = (0..dest_length)
            .map(|i| {
                let center = i as f32 / scale;
                let left = (center - width).ceil() as i64;
                let right = (center + width).floor() as i64;

                let mut list = Vec::with_capacity(capacity);
                for j in left..=right {
                    let weight = kernel.weight((center - j as f32) / filter_scale) / filter_scale;
                    list.push(Contribution {
                        pixel: mirror_index(j, source_length) * channels,
                        weight,
                    });
                }
                list
            })
            .collect();

        Self { contribs }
    }

    /// Upper bound on the number of contributions per destination sample,
    /// `ceil(support * 2 * max(1, 1 / scale)) + 1`.
    pub fn bound(source_length: usize, dest_length: usize, support: f32) -> usize {
        let stretch = (source_length as f64 / dest_length as f64).max(1.0);
        (support as f64 * 2.0 * stretch).ceil() as usize + 1
    }

    /// Number of destination samples.
    pub fn len(&self) -> usize {
        self.contribs.len()
    }

    /// Whether the table has no destination samples.
    pub fn is_empty(&self) -> bool {
        self.contribs.is_empty()
    }

    /// The contributions of destination sample `i`.
    pub fn get(&self, i: usize) -> &[Contribution] {
        &self.contribs[i]
    }

    /// Iterate the contribution lists in destination order.
    pub fn iter(&self) -> impl Iterator<Item = &[Contribution]> {
        self.contribs.iter().map(Vec::as_slice)
    }

    /// The longest contribution list in the table.
    pub fn max_contributors(&self) -> usize {
        self.contribs.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Fold an out-of-range sample index back into `[0, len)`.
///
/// Negative indices reflect around the first sample (`-1 -> 1`), indices past
/// the end reflect around the last one, which is repeated (`len -> len - 1`,
/// `len + 1 -> len - 2`). The folding repeats with period `2 * len - 1` so
/// that footprints wider than the source stay in range.
pub fn mirror_index(j: i64, len: usize) -> usize {
    debug_assert!(len > 0);
    let len = len as i64;
    let period = 2 * len - 1;
    let m = j.rem_euclid(period);
    if m >= len {
        (period - m) as usize
    } else {
        m as usize
    }
}
