//! Zoom geometry
//!
//! Pure functions computing how far to move the target and how much to
//! scale it so it ends up centered and magnified in the viewport.

use crate::math::{Rect, Size, Vec2};
use crate::options::CustomSize;

/// Inputs to the scale computation that come from the element itself
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetMetrics {
    /// Bounding rect at open time
    pub rect: Rect,
    /// `naturalWidth`/`naturalHeight`
    pub natural: Size,
    /// `data-zooming-width`, when it parses
    pub zooming_width: Option<f64>,
    /// `data-zooming-height`, when it parses
    pub zooming_height: Option<f64>,
}

/// Frozen transform parameters for an open target
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomGeometry {
    pub translate: Vec2,
    pub scale: Vec2,
}

/// Compute translate and scale for `target` in a viewport of `viewport`
pub fn compute(
    target: &TargetMetrics,
    viewport: Size,
    custom_size: Option<CustomSize>,
    scale_base: f64,
) -> ZoomGeometry {
    ZoomGeometry {
        translate: translate_to_center(target.rect, viewport),
        scale: scale_to_fit(target, viewport, custom_size, scale_base),
    }
}

/// Vector from the target's center to the viewport center
pub fn translate_to_center(rect: Rect, viewport: Size) -> Vec2 {
    viewport.center() - rect.center()
}

/// Scale factors, per axis.
///
/// Precedence: explicit zooming size on the element (only when no custom
/// size is configured), then a fixed custom size, then fit-to-window with an
/// optional percentage cap.
pub fn scale_to_fit(
    target: &TargetMetrics,
    viewport: Size,
    custom_size: Option<CustomSize>,
    scale_base: f64,
) -> Vec2 {
    let rendered = target.rect.size();
    if !rendered.is_positive() {
        return Vec2::splat(1.0);
    }

    match (custom_size, target.zooming_width, target.zooming_height) {
        (None, Some(width), Some(height)) => {
            return Vec2::new(width / rendered.width, height / rendered.height);
        }
        (Some(CustomSize::Fixed { width, height }), _, _) => {
            return Vec2::new(width / rendered.width, height / rendered.height);
        }
        _ => {}
    }

    let half_target = rendered.half();
    let edge_to_edge = viewport.center() - half_target;
    let horizontal = edge_to_edge.x / half_target.x;
    let vertical = edge_to_edge.y / half_target.y;
    let scale = scale_base + horizontal.min(vertical);

    if let Some(CustomSize::Percent(pct)) = custom_size {
        let natural = Size::new(
            target.zooming_width.unwrap_or(target.natural.width),
            target.zooming_height.unwrap_or(target.natural.height),
        );
        let max_x = pct.0 * natural.width / (100.0 * rendered.width);
        let max_y = pct.0 * natural.height / (100.0 * rendered.height);

        if scale > max_x || scale > max_y {
            return Vec2::new(max_x, max_y);
        }
    }

    Vec2::splat(scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Percent;

    fn metrics(rect: Rect) -> TargetMetrics {
        TargetMetrics {
            rect,
            natural: rect.size(),
            zooming_width: None,
            zooming_height: None,
        }
    }

    #[test]
    fn test_fit_to_window() {
        let target = metrics(Rect::new(100.0, 100.0, 200.0, 100.0));
        let geometry = compute(&target, Size::new(1000.0, 800.0), None, 0.5);

        assert_eq!(geometry.translate, Vec2::new(300.0, 250.0));
        // min((500 - 100) / 100, (400 - 50) / 50) = 4
        assert_eq!(geometry.scale, Vec2::splat(4.5));
    }

    #[test]
    fn test_zooming_size_attributes() {
        let mut target = metrics(Rect::new(0.0, 0.0, 200.0, 100.0));
        target.zooming_width = Some(800.0);
        target.zooming_height = Some(600.0);
        let scale = scale_to_fit(&target, Size::new(1000.0, 800.0), None, 0.5);
        assert_eq!(scale, Vec2::new(4.0, 6.0));
    }

    #[test]
    fn test_fixed_custom_size_wins_over_attributes() {
        let mut target = metrics(Rect::new(0.0, 0.0, 200.0, 100.0));
        target.zooming_width = Some(800.0);
        target.zooming_height = Some(600.0);
        let custom = CustomSize::Fixed {
            width: 400.0,
            height: 400.0,
        };
        let scale = scale_to_fit(&target, Size::new(1000.0, 800.0), Some(custom), 0.5);
        assert_eq!(scale, Vec2::new(2.0, 4.0));
    }

    #[test]
    fn test_percent_cap() {
        let mut target = metrics(Rect::new(100.0, 100.0, 200.0, 100.0));
        target.natural = Size::new(400.0, 300.0);
        let custom = CustomSize::Percent(Percent(100.0));
        let scale = scale_to_fit(&target, Size::new(1000.0, 800.0), Some(custom), 0.5);
        // Uniform 4.5 exceeds both caps: 400/200 = 2, 300/100 = 3
        assert_eq!(scale, Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_percent_cap_not_reached() {
        let mut target = metrics(Rect::new(100.0, 100.0, 200.0, 100.0));
        target.natural = Size::new(2000.0, 1000.0);
        let custom = CustomSize::Percent(Percent(100.0));
        let scale = scale_to_fit(&target, Size::new(1000.0, 800.0), Some(custom), 0.5);
        assert_eq!(scale, Vec2::splat(4.5));
    }

    #[test]
    fn test_percent_cap_uses_zooming_size() {
        let mut target = metrics(Rect::new(0.0, 0.0, 200.0, 100.0));
        target.natural = Size::new(4000.0, 2000.0);
        target.zooming_width = Some(400.0);
        target.zooming_height = Some(200.0);
        let custom = CustomSize::Percent(Percent(50.0));
        let scale = scale_to_fit(&target, Size::new(1000.0, 800.0), Some(custom), 0.5);
        assert_eq!(scale, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_percent_cap_falls_back_per_axis() {
        let mut target = metrics(Rect::new(0.0, 0.0, 200.0, 100.0));
        target.natural = Size::new(4000.0, 300.0);
        target.zooming_width = Some(400.0);
        let custom = CustomSize::Percent(Percent(100.0));
        let scale = scale_to_fit(&target, Size::new(1000.0, 800.0), Some(custom), 0.5);
        // Width caps at 400/200 from the attribute, height at 300/100 from the image
        assert_eq!(scale, Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_single_zooming_attribute_does_not_fix_scale() {
        let mut target = metrics(Rect::new(100.0, 100.0, 200.0, 100.0));
        target.zooming_width = Some(800.0);
        let scale = scale_to_fit(&target, Size::new(1000.0, 800.0), None, 0.5);
        assert_eq!(scale, Vec2::splat(4.5));
    }

    #[test]
    fn test_degenerate_rect() {
        let target = metrics(Rect::new(0.0, 0.0, 0.0, 0.0));
        let scale = scale_to_fit(&target, Size::new(1000.0, 800.0), None, 0.5);
        assert_eq!(scale, Vec2::splat(1.0));
    }
}
