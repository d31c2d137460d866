//! Viewport transform between timeline milliseconds and pixel columns.
//!
//! This module owns the pan/zoom policy of the timeline:
//! - Converting absolute time positions to pixel columns and back
//! - Anchor-preserving zoom in quarter steps with a floor of 1.0 (full overview)
//! - Wheel panning in tenths of the visible window
//! - Keeping the visible window inside `[0, total_duration]`
//!
//! All functions are synchronous and side-effect free apart from the
//! viewport's own fields, so they can be tested without a GUI.

/// Scale added per wheel notch when zooming.
pub const ZOOM_STEP_PER_NOTCH: f64 = 0.25;

/// Number of wheel notches needed to pan by one full visible window.
pub const PAN_STEPS_PER_WINDOW: f64 = 10.0;

/// Factor applied to wheel deltas when the precise modifier is held.
pub const DEFAULT_PRECISE_MULTIPLIER: f64 = 10.0;

/// Pixel column a zoom step keeps stationary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomAnchor {
    /// A specific pixel column (usually the one under the pointer)
    Pixel(f32),
    /// The middle of the visible area
    Center,
}

/// Pan offset and zoom scale over a media duration.
///
/// Invariants maintained by every mutation:
/// - `scale >= 1.0`
/// - `offset >= 0`
/// - the visible window never runs past `total_duration`, unless the whole
///   duration is shorter than one screen of time (then the window starts at 0)
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Total media duration in milliseconds
    total_duration: i64,
    /// Time at the left edge of the visible area in milliseconds
    offset: i64,
    /// Zoom level (1.0 = whole duration fits the visible width)
    scale: f64,
    /// Width of the visible area in pixels
    visible_width: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    /// Creates an empty viewport (zero duration, zero width).
    pub fn new() -> Self {
        Self {
            total_duration: 0,
            offset: 0,
            scale: 1.0,
            visible_width: 0,
        }
    }

    /// Creates a viewport for a duration and a visible width at full overview.
    pub fn with_size(total_duration: i64, visible_width: i32) -> Self {
        let mut viewport = Self::new();
        viewport.visible_width = visible_width.max(0);
        viewport.set_duration(total_duration);
        viewport
    }

    // ===== Queries =====

    pub fn total_duration(&self) -> i64 {
        self.total_duration
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn visible_width(&self) -> i32 {
        self.visible_width
    }

    /// Returns true when conversions short-circuit to 0 (no duration or no width).
    pub fn is_degenerate(&self) -> bool {
        self.total_duration <= 0 || self.visible_width <= 0
    }

    /// Pixels per millisecond at the current scale.
    pub fn pixels_per_ms(&self) -> f64 {
        self.pixels_per_ms_at(self.scale)
    }

    /// Milliseconds per pixel at the current scale.
    pub fn ms_per_pixel(&self) -> f64 {
        self.ms_per_pixel_at(self.scale)
    }

    fn pixels_per_ms_at(&self, scale: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        (self.visible_width as f64 / self.total_duration as f64) * scale
    }

    fn ms_per_pixel_at(&self, scale: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        (self.total_duration as f64 / self.visible_width as f64) / scale
    }

    /// Length of the visible window in whole milliseconds.
    fn visible_span(&self) -> i64 {
        (self.visible_width as f64 * self.ms_per_pixel()) as i64
    }

    /// Returns the visible time window as `(start, end)` in milliseconds.
    ///
    /// The end is clamped to the total duration so the pair can drive a
    /// scrollbar or an overview strip directly.
    pub fn visible_window(&self) -> (i64, i64) {
        let end = (self.offset + self.visible_span()).min(self.total_duration);
        (self.offset, end.max(self.offset))
    }

    // ===== Conversions =====

    /// Converts an absolute time position to a pixel column.
    ///
    /// Returns 0 for a degenerate viewport. Positions outside the visible
    /// window map to negative columns or columns past `visible_width`.
    pub fn position_to_pixel(&self, position: i64) -> i32 {
        if self.is_degenerate() {
            return 0;
        }
        ((position - self.offset) as f64 * self.pixels_per_ms()).round() as i32
    }

    /// Converts a pixel column to a time position clamped to `[0, total_duration]`.
    pub fn pixel_to_position(&self, pixel: f32) -> i64 {
        self.pixel_to_position_at_scale(pixel, self.scale)
    }

    /// Converts a pixel column to a time position as if the viewport had `scale`,
    /// keeping the current offset.
    ///
    /// # Arguments
    /// * `pixel` - Pixel column relative to the left edge of the timeline
    /// * `scale` - Zoom level to evaluate the mapping at
    pub fn pixel_to_position_at_scale(&self, pixel: f32, scale: f64) -> i64 {
        if self.is_degenerate() {
            return 0;
        }
        let position = (self.offset as f64 + pixel as f64 * self.ms_per_pixel_at(scale)) as i64;
        position.clamp(0, self.total_duration)
    }

    // ===== Mutations =====

    /// Loads a new duration and returns to the full overview.
    pub fn set_duration(&mut self, total_duration: i64) {
        self.total_duration = total_duration.max(0);
        self.offset = 0;
        self.scale = 1.0;
    }

    /// Resizes the visible area, keeping the window in bounds.
    pub fn set_visible_width(&mut self, visible_width: i32) {
        let visible_width = visible_width.max(0);
        if visible_width == self.visible_width {
            return;
        }
        self.visible_width = visible_width;
        self.ensure_offset_in_bounds();
    }

    /// Pans by a number of wheel notches.
    ///
    /// One notch moves a tenth of the visible window; positive notches move
    /// toward the start of the media (wheel up). When `amplified` is set
    /// the delta is multiplied by ten.
    pub fn pan_by(&mut self, delta_notches: f32, amplified: bool) {
        self.pan_by_with_multiplier(delta_notches, amplified, DEFAULT_PRECISE_MULTIPLIER);
    }

    /// Same as [`Viewport::pan_by`] with an explicit amplification factor.
    pub fn pan_by_with_multiplier(&mut self, delta_notches: f32, amplified: bool, multiplier: f64) {
        if self.is_degenerate() {
            return;
        }
        let delta = amplify(delta_notches, amplified, multiplier);
        let step = (self.visible_width as f64 * self.ms_per_pixel()) / PAN_STEPS_PER_WINDOW;

        self.offset = (self.offset - (delta * step) as i64).max(0);
        self.ensure_offset_in_bounds();
        log::debug!("pan by {delta} notches -> offset {}", self.offset);
    }

    /// Zooms by a number of wheel notches, keeping the time under `anchor` in place.
    ///
    /// Each notch adds 0.25 to the scale. The scale never drops below 1.0.
    /// The anchor position is evaluated at the old and the new scale using the
    /// old offset, and the offset is shifted by the difference.
    pub fn zoom_by(&mut self, delta_notches: f32, anchor: ZoomAnchor) {
        let new_scale = (self.scale + delta_notches as f64 * ZOOM_STEP_PER_NOTCH).max(1.0);
        if new_scale == self.scale {
            return;
        }

        if !self.is_degenerate() {
            let anchor_pixel = match anchor {
                ZoomAnchor::Pixel(pixel) => pixel,
                ZoomAnchor::Center => self.visible_width as f32 / 2.0,
            };
            let current_anchor_pos = self.pixel_to_position_at_scale(anchor_pixel, self.scale);
            let new_anchor_pos = self.pixel_to_position_at_scale(anchor_pixel, new_scale);
            self.offset = (self.offset + (current_anchor_pos - new_anchor_pos)).max(0);
        }

        self.scale = new_scale;
        self.ensure_offset_in_bounds();
        log::debug!("zoom to {:.2}x -> offset {}", self.scale, self.offset);
    }

    /// Pulls the offset back so the visible window ends at `total_duration`,
    /// then clamps it to be non-negative.
    pub fn ensure_offset_in_bounds(&mut self) {
        let span = self.visible_span();
        if self.offset + span > self.total_duration {
            self.offset = self.total_duration - span;
        }
        self.offset = self.offset.max(0);
    }

    /// Shows the whole duration.
    pub fn zoom_to_overview(&mut self) {
        self.scale = 1.0;
        self.offset = 0;
    }

    /// Zooms to a target density and centers the window on `center_on`.
    ///
    /// # Arguments
    /// * `target_ms_per_pixel` - Desired milliseconds per pixel (20.0 = 50 px per second)
    /// * `center_on` - Time position to center the new window on
    pub fn zoom_to_density(&mut self, target_ms_per_pixel: f64, center_on: i64) {
        self.offset = 0;
        self.scale = 1.0;
        if self.is_degenerate() || target_ms_per_pixel <= 0.0 {
            return;
        }
        let full_ms_per_pixel = self.total_duration as f64 / self.visible_width as f64;
        self.scale = (full_ms_per_pixel / target_ms_per_pixel).max(1.0);
        self.recenter_on(center_on);
    }

    /// Centers the visible window on a time position.
    pub fn recenter_on(&mut self, position: i64) {
        if self.total_duration <= 0 {
            return;
        }
        let half_window = self.ms_per_pixel() * (self.visible_width / 2) as f64;
        self.offset = position - half_window as i64;
        self.ensure_offset_in_bounds();
    }

    /// Scrolls forward when `position` lies past the right edge of the view.
    ///
    /// The position becomes the new left edge unless that would run the
    /// window past the end of the media, in which case the window is aligned
    /// with the end.
    pub fn auto_scroll_if_out_of_view(&mut self, position: i64) {
        if self.position_to_pixel(position) <= self.visible_width {
            return;
        }
        let span = self.visible_span();
        let mut new_offset = position;
        if new_offset + span > self.total_duration {
            new_offset = self.total_duration - span;
        }
        self.offset = new_offset;
        self.ensure_offset_in_bounds();
    }
}

fn amplify(delta_notches: f32, amplified: bool, multiplier: f64) -> f64 {
    if amplified {
        delta_notches as f64 * multiplier
    } else {
        delta_notches as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::with_size(100_000, 1000)
    }

    #[test]
    fn test_degenerate_duration_maps_to_zero() {
        let vp = Viewport::with_size(0, 1000);
        assert_eq!(vp.position_to_pixel(5000), 0);
        assert_eq!(vp.pixel_to_position(500.0), 0);
    }

    #[test]
    fn test_degenerate_width_maps_to_zero() {
        let vp = Viewport::with_size(10_000, 0);
        assert_eq!(vp.position_to_pixel(5000), 0);
        assert_eq!(vp.pixel_to_position(10.0), 0);
    }

    #[test]
    fn test_overview_mapping() {
        let vp = viewport();
        assert_eq!(vp.position_to_pixel(0), 0);
        assert_eq!(vp.position_to_pixel(50_000), 500);
        assert_eq!(vp.position_to_pixel(100_000), 1000);
        assert_eq!(vp.pixel_to_position(250.0), 25_000);
    }

    #[test]
    fn test_pixel_to_position_clamps() {
        let vp = viewport();
        assert_eq!(vp.pixel_to_position(-40.0), 0);
        assert_eq!(vp.pixel_to_position(5000.0), 100_000);
    }

    #[test]
    fn test_position_to_pixel_rounds() {
        let vp = Viewport::with_size(3000, 1000);
        // 1 ms = 0.333.. px, 2 ms = 0.666.. px
        assert_eq!(vp.position_to_pixel(1), 0);
        assert_eq!(vp.position_to_pixel(2), 1);
    }

    #[test]
    fn test_set_duration_resets_pan_and_zoom() {
        let mut vp = viewport();
        vp.zoom_by(4.0, ZoomAnchor::Pixel(800.0));
        assert!(vp.offset() > 0);
        vp.set_duration(50_000);
        assert_eq!(vp.offset(), 0);
        assert_eq!(vp.scale(), 1.0);
        assert_eq!(vp.total_duration(), 50_000);
    }

    #[test]
    fn test_zoom_keeps_anchor_stationary() {
        let mut vp = viewport();
        let before = vp.pixel_to_position(500.0);
        vp.zoom_by(1.0, ZoomAnchor::Pixel(500.0));
        assert_eq!(vp.scale(), 1.25);
        assert_eq!(vp.offset(), 10_000);
        assert_eq!(vp.pixel_to_position(500.0), before);
    }

    #[test]
    fn test_zoom_center_anchor() {
        let mut vp = viewport();
        vp.zoom_by(4.0, ZoomAnchor::Center);
        assert_eq!(vp.scale(), 2.0);
        assert_eq!(vp.pixel_to_position(500.0), 50_000);
    }

    #[test]
    fn test_zoom_out_floor() {
        let mut vp = viewport();
        vp.zoom_by(-3.0, ZoomAnchor::Center);
        assert_eq!(vp.scale(), 1.0);
        assert_eq!(vp.offset(), 0);

        vp.zoom_by(2.0, ZoomAnchor::Pixel(900.0));
        vp.zoom_by(-10.0, ZoomAnchor::Pixel(900.0));
        assert_eq!(vp.scale(), 1.0);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_zoom_near_end_stays_in_bounds() {
        let mut vp = viewport();
        vp.zoom_by(8.0, ZoomAnchor::Pixel(1000.0));
        let (start, end) = vp.visible_window();
        assert!(start >= 0);
        assert!(end <= 100_000);
        assert_eq!(end, 100_000);
    }

    #[test]
    fn test_pan_moves_by_tenth_of_window() {
        let mut vp = viewport();
        vp.zoom_by(4.0, ZoomAnchor::Pixel(0.0)); // scale 2.0, window 50 s
        assert_eq!(vp.offset(), 0);

        vp.pan_by(-1.0, false);
        assert_eq!(vp.offset(), 5000);

        vp.pan_by(1.0, false);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_pan_amplified_and_clamped() {
        let mut vp = viewport();
        vp.zoom_by(4.0, ZoomAnchor::Pixel(0.0));
        vp.pan_by(-1.0, true);
        // 10 notches would be 50 s, which reaches the end exactly
        assert_eq!(vp.offset(), 50_000);

        vp.pan_by(-5.0, true);
        assert_eq!(vp.offset(), 50_000);

        vp.pan_by(20.0, false);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_pan_at_overview_is_pinned() {
        let mut vp = viewport();
        vp.pan_by(-3.0, false);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_ensure_offset_in_bounds_idempotent() {
        let mut vp = viewport();
        vp.zoom_by(6.0, ZoomAnchor::Pixel(700.0));
        vp.set_visible_width(1400);
        let once = vp.offset();
        vp.ensure_offset_in_bounds();
        assert_eq!(vp.offset(), once);
        vp.ensure_offset_in_bounds();
        assert_eq!(vp.offset(), once);
    }

    #[test]
    fn test_resize_keeps_time_window() {
        let mut vp = viewport();
        vp.zoom_by(4.0, ZoomAnchor::Pixel(1000.0)); // offset 50 s, window 50 s
        assert_eq!(vp.offset(), 50_000);
        vp.set_visible_width(1500);
        assert_eq!(vp.offset(), 50_000);
        assert_eq!(vp.position_to_pixel(100_000), 1500);
    }

    #[test]
    fn test_zoom_to_overview() {
        let mut vp = viewport();
        vp.zoom_by(5.0, ZoomAnchor::Pixel(300.0));
        vp.zoom_to_overview();
        assert_eq!(vp.scale(), 1.0);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_zoom_to_density_centers() {
        let mut vp = viewport();
        vp.zoom_to_density(20.0, 50_000);
        assert_eq!(vp.scale(), 5.0);
        assert!((vp.ms_per_pixel() - 20.0).abs() < 1e-9);
        // window is 20 s wide, centered on 50 s
        assert_eq!(vp.offset(), 40_000);
    }

    #[test]
    fn test_zoom_to_density_never_below_overview() {
        let mut vp = Viewport::with_size(5000, 1000); // 5 ms per pixel already
        vp.zoom_to_density(20.0, 2500);
        assert_eq!(vp.scale(), 1.0);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_recenter_on_clamps_at_edges() {
        let mut vp = viewport();
        vp.zoom_by(4.0, ZoomAnchor::Pixel(0.0));
        vp.recenter_on(1000);
        assert_eq!(vp.offset(), 0);
        vp.recenter_on(99_000);
        assert_eq!(vp.offset(), 50_000);
        vp.recenter_on(60_000);
        assert_eq!(vp.offset(), 35_000);
    }

    #[test]
    fn test_auto_scroll_only_past_right_edge() {
        let mut vp = viewport();
        vp.zoom_by(36.0, ZoomAnchor::Pixel(0.0)); // scale 10.0, window 10 s
        assert_eq!(vp.offset(), 0);

        vp.auto_scroll_if_out_of_view(9000);
        assert_eq!(vp.offset(), 0);

        vp.auto_scroll_if_out_of_view(12_000);
        assert_eq!(vp.offset(), 12_000);

        vp.auto_scroll_if_out_of_view(95_000);
        assert_eq!(vp.offset(), 90_000);
    }

    #[test]
    fn test_round_trip_within_one_pixel() {
        let mut vp = viewport();
        vp.zoom_by(3.0, ZoomAnchor::Pixel(420.0));
        let tolerance = vp.ms_per_pixel().ceil() as i64;
        let (start, end) = vp.visible_window();
        for position in (start..=end).step_by(37) {
            let pixel = vp.position_to_pixel(position);
            let back = vp.pixel_to_position(pixel as f32);
            assert!((back - position).abs() <= tolerance, "{position} -> {pixel} -> {back}");
        }
    }
}
