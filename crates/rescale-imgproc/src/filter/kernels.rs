use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use rescale_image::ImageError;

/// Cubic kernel `2|t|^3 - 3|t|^2 + 1` over `[-1, 1]`.
pub fn cubic(t: f32) -> f32 {
    let t = t.abs();
    if t < 1.0 {
        (2.0 * t - 3.0) * t * t + 1.0
    } else {
        0.0
    }
}

/// Box kernel, `1` over the half-open interval `(-0.5, 0.5]`.
pub fn box_filter(t: f32) -> f32 {
    if t > -0.5 && t <= 0.5 {
        1.0
    } else {
        0.0
    }
}

/// Triangle (tent) kernel over `[-1, 1]`.
pub fn triangle(t: f32) -> f32 {
    let t = t.abs();
    if t < 1.0 {
        1.0 - t
    } else {
        0.0
    }
}

/// Bell kernel, the quadratic B-spline (box convolved three times).
pub fn bell(t: f32) -> f32 {
    let t = t.abs();
    if t < 0.5 {
        0.75 - t * t
    } else if t < 1.5 {
        let t = t - 1.5;
        0.5 * t * t
    } else {
        0.0
    }
}

/// Cubic B-spline kernel (box convolved four times).
pub fn b_spline(t: f32) -> f32 {
    let t = t.abs();
    if t < 1.0 {
        let tt = t * t;
        0.5 * tt * t - tt + 2.0 / 3.0
    } else if t < 2.0 {
        let t = 2.0 - t;
        t * t * t / 6.0
    } else {
        0.0
    }
}

fn sinc(x: f32) -> f32 {
    let x = x * PI;
    if x != 0.0 {
        x.sin() / x
    } else {
        1.0
    }
}

/// Lanczos kernel windowed over three lobes.
pub fn lanczos3(t: f32) -> f32 {
    let t = t.abs();
    if t < 3.0 {
        sinc(t) * sinc(t / 3.0)
    } else {
        0.0
    }
}

const MITCHELL_B: f32 = 1.0 / 3.0;
const MITCHELL_C: f32 = 1.0 / 3.0;

/// Mitchell-Netravali kernel with `B = C = 1/3`.
pub fn mitchell(t: f32) -> f32 {
    let (b, c) = (MITCHELL_B, MITCHELL_C);
    let t = t.abs();
    let tt = t * t;
    if t < 1.0 {
        ((12.0 - 9.0 * b - 6.0 * c) * (t * tt)
            + (-18.0 + 12.0 * b + 6.0 * c) * tt
            + (6.0 - 2.0 * b))
            / 6.0
    } else if t < 2.0 {
        ((-b - 6.0 * c) * (t * tt)
            + (6.0 * b + 30.0 * c) * tt
            + (-12.0 * b - 48.0 * c) * t
            + (8.0 * b + 24.0 * c))
            / 6.0
    } else {
        0.0
    }
}

/// The filter used to weight source samples while resampling.
///
/// Every kernel is symmetric and zero outside `[-support, support]`.
///
/// # Examples
///
/// ```
/// use rescale_imgproc::filter::FilterKernel;
///
/// let kernel: FilterKernel = "lanczos3".parse().unwrap();
/// assert_eq!(kernel.support(), 3.0);
/// assert_eq!(kernel.weight(0.0), 1.0);
/// assert_eq!(FilterKernel::default(), FilterKernel::Bell);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FilterKernel {
    /// Hermite-like cubic, support 1.
    Cubic,
    /// Box, support 0.5.
    Box,
    /// Triangle, support 1.
    Triangle,
    /// Quadratic B-spline, support 1.5.
    #[default]
    Bell,
    /// Cubic B-spline, support 2.
    BSpline,
    /// Lanczos windowed sinc, support 3.
    Lanczos3,
    /// Mitchell-Netravali cubic, support 2.
    Mitchell,
}

impl FilterKernel {
    /// All the available kernels.
    pub const ALL: [FilterKernel; 7] = [
        FilterKernel::Cubic,
        FilterKernel::Box,
        FilterKernel::Triangle,
        FilterKernel::Bell,
        FilterKernel::BSpline,
        FilterKernel::Lanczos3,
        FilterKernel::Mitchell,
    ];

    /// The distance beyond which the kernel weight is zero.
    pub fn support(&self) -> f32 {
        match self {
            FilterKernel::Cubic => 1.0,
            FilterKernel::Box => 0.5,
            FilterKernel::Triangle => 1.0,
            FilterKernel::Bell => 1.5,
            FilterKernel::BSpline => 2.0,
            FilterKernel::Lanczos3 => 3.0,
            FilterKernel::Mitchell => 2.0,
        }
    }

    /// Evaluate the kernel at the signed distance `t`.
    pub fn weight(&self, t: f32) -> f32 {
        match self {
            FilterKernel::Cubic => cubic(t),
            FilterKernel::Box => box_filter(t),
            FilterKernel::Triangle => triangle(t),
            FilterKernel::Bell => bell(t),
            FilterKernel::BSpline => b_spline(t),
            FilterKernel::Lanczos3 => lanczos3(t),
            FilterKernel::Mitchell => mitchell(t),
        }
    }

    /// The canonical name of the kernel, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            FilterKernel::Cubic => "cubic",
            FilterKernel::Box => "box",
            FilterKernel::Triangle => "triangle",
            FilterKernel::Bell => "bell",
            FilterKernel::BSpline => "b-spline",
            FilterKernel::Lanczos3 => "lanczos3",
            FilterKernel::Mitchell => "mitchell",
        }
    }
}

impl fmt::Display for FilterKernel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKernel {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cubic" => Ok(FilterKernel::Cubic),
            "box" => Ok(FilterKernel::Box),
            "triangle" => Ok(FilterKernel::Triangle),
            "bell" => Ok(FilterKernel::Bell),
            "b-spline" | "bspline" => Ok(FilterKernel::BSpline),
            "lanczos3" => Ok(FilterKernel::Lanczos3),
            "mitchell" => Ok(FilterKernel::Mitchell),
            _ => Err(ImageError::UnknownFilter(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kernel_symmetry() {
        // box is half-open and excluded on purpose
        for kernel in FilterKernel::ALL
            .iter()
            .filter(|k| **k != FilterKernel::Box)
        {
            for i in 0..64 {
                let t = i as f32 * 0.07;
                assert_eq!(kernel.weight(t), kernel.weight(-t), "{kernel} at {t}");
            }
        }
    }

    #[test]
    fn test_kernel_zero_outside_support() {
        for kernel in FilterKernel::ALL {
            let s = kernel.support();
            for t in [s + 0.01, s + 1.0, 10.0] {
                assert_eq!(kernel.weight(t), 0.0, "{kernel} at {t}");
                assert_eq!(kernel.weight(-t), 0.0, "{kernel} at {}", -t);
            }
        }
        // closed at the support boundary except for the box upper edge
        for kernel in FilterKernel::ALL
            .iter()
            .filter(|k| **k != FilterKernel::Box)
        {
            assert_eq!(kernel.weight(kernel.support()), 0.0, "{kernel}");
        }
    }

    #[test]
    fn test_box_half_open() {
        assert_eq!(box_filter(0.5), 1.0);
        assert_eq!(box_filter(-0.5), 0.0);
        assert_eq!(box_filter(0.0), 1.0);
    }

    #[test]
    fn test_kernel_values() {
        assert_eq!(cubic(0.0), 1.0);
        assert_relative_eq!(cubic(0.5), 0.5);
        assert_relative_eq!(triangle(0.25), 0.75);
        assert_relative_eq!(bell(0.0), 0.75);
        assert_relative_eq!(bell(1.0), 0.125);
        assert_relative_eq!(b_spline(0.0), 2.0 / 3.0);
        assert_relative_eq!(b_spline(1.0), 1.0 / 6.0);
        assert_eq!(lanczos3(0.0), 1.0);
        assert_relative_eq!(lanczos3(1.0), 0.0, epsilon = 1e-6);
        assert_relative_eq!(mitchell(0.0), 8.0 / 9.0, epsilon = 1e-6);
        assert_relative_eq!(mitchell(1.0), 1.0 / 18.0, epsilon = 1e-6);
    }

    #[test]
    fn test_partition_of_unity() {
        // weights at unit spacing sum to one for every phase
        for kernel in FilterKernel::ALL {
            for phase in [0.0f32, 0.1, 0.25, 0.5, 0.8] {
                let sum: f32 = (-4..=4).map(|k| kernel.weight(k as f32 + phase)).sum();
                assert_relative_eq!(sum, 1.0, epsilon = 1e-2);
            }
        }
    }

    #[test]
    fn test_parse_and_display() -> Result<(), ImageError> {
        for kernel in FilterKernel::ALL {
            assert_eq!(kernel.to_string().parse::<FilterKernel>()?, kernel);
        }
        assert_eq!("Lanczos3".parse::<FilterKernel>()?, FilterKernel::Lanczos3);
        assert_eq!("bspline".parse::<FilterKernel>()?, FilterKernel::BSpline);
        assert_eq!(
            "gaussian".parse::<FilterKernel>(),
            Err(ImageError::UnknownFilter("gaussian".to_string()))
        );
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&FilterKernel::BSpline).unwrap();
        assert_eq!(json, "\"b-spline\"");
        let kernel: FilterKernel = serde_json::from_str("\"mitchell\"").unwrap();
        assert_eq!(kernel, FilterKernel::Mitchell);
    }
}
