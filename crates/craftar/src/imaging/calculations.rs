//! Pure dimension math for query rescaling.

/// Dimensions after scaling so the shorter side equals `min_side`.
///
/// The shorter side lands on `min_side` exactly; the longer side keeps the
/// aspect ratio, rounded to the nearest pixel and never below one. Works the
/// same for upscaling and downscaling.
///
/// # Examples
/// ```
/// # use craftar::imaging::scaled_dimensions;
/// assert_eq!(scaled_dimensions((640, 480), 240), (320, 240));
/// assert_eq!(scaled_dimensions((100, 200), 300), (300, 600));
/// ```
pub fn scaled_dimensions(source: (u32, u32), min_side: u32) -> (u32, u32) {
    let (width, height) = source;
    let shorter = width.min(height).max(1);
    let scale = min_side as f64 / shorter as f64;
    let scaled = |side: u32| ((side as f64 * scale).round() as u32).max(1);

    if width <= height {
        (min_side, scaled(height))
    } else {
        (scaled(width), min_side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_downscale() {
        assert_eq!(scaled_dimensions((640, 480), 240), (320, 240));
    }

    #[test]
    fn portrait_downscale() {
        assert_eq!(scaled_dimensions((480, 640), 240), (240, 320));
    }

    #[test]
    fn square() {
        assert_eq!(scaled_dimensions((1000, 1000), 270), (270, 270));
    }

    #[test]
    fn upscale_matches_downscale_rule() {
        assert_eq!(scaled_dimensions((160, 120), 240), (320, 240));
        assert_eq!(scaled_dimensions((10, 30), 270), (270, 810));
    }

    #[test]
    fn rounds_longer_side() {
        // 1001 * 0.36 = 360.36
        assert_eq!(scaled_dimensions((1001, 750), 270), (360, 270));
        assert_eq!(scaled_dimensions((5, 2), 100), (250, 100));
    }

    #[test]
    fn extreme_aspect_never_collapses() {
        assert_eq!(scaled_dimensions((10_000, 10), 1), (1000, 1));
        assert_eq!(scaled_dimensions((1, 1), 1), (1, 1));
    }
}
