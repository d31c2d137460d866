//! Time axis layout and timestamp formatting.
//!
//! Pure helpers shared by the renderer and the status bar:
//! - `hh:mm:ss:fff` timestamps for the info area
//! - one tick per second with labels thinned out so they never collide
//! - geometry of the overview strip showing the visible window

use crate::viewport::Viewport;

/// Spacing between ticks in milliseconds.
pub const TICK_INTERVAL_MS: i64 = 1000;

/// A single tick on the time axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Time position in milliseconds
    pub position: i64,
    /// Pixel column relative to the left edge of the timeline
    pub x: f32,
    /// Whether this tick carries a label (and a long tick line)
    pub labeled: bool,
}

/// Formats milliseconds as `hh:mm:ss:fff`.
pub fn format_timestamp(ms: i64) -> String {
    let sign = if ms < 0 { "-" } else { "" };
    let ms = ms.unsigned_abs();
    let hours = ms / 3_600_000;
    let minutes = (ms / 60_000) % 60;
    let seconds = (ms / 1000) % 60;
    let millis = ms % 1000;
    format!("{sign}{hours:02}:{minutes:02}:{seconds:02}:{millis:03}")
}

/// Formats a tick label: `hh:mm:ss` from the first hour on, `mm:ss` before it.
///
/// Exactly one hour already gets the hour field (`01:00:00`), so the label
/// never reads `60:00`.
pub fn format_tick_label(ms: i64) -> String {
    let total_seconds = ms.max(0) / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds / 60) % 60;
    let seconds = total_seconds % 60;
    if ms >= 3_600_000 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Number of seconds between two labeled ticks so that labels of width
/// `label_width_px` keep at least one label width of space between them.
pub fn seconds_per_label(viewport: &Viewport, label_width_px: f32) -> i64 {
    let pixels_per_second = viewport.pixels_per_ms() * 1000.0;
    if pixels_per_second <= 0.0 {
        return 1;
    }
    ((label_width_px as f64 * 2.0) / pixels_per_second).ceil().max(1.0) as i64
}

/// Lays out the one-second ticks that fall inside the visible window.
///
/// # Arguments
/// * `viewport` - Current viewport
/// * `label_width_px` - Width of the widest label, used to thin out labels
pub fn layout_ticks(viewport: &Viewport, label_width_px: f32) -> Vec<Tick> {
    if viewport.is_degenerate() {
        return Vec::new();
    }
    let every = seconds_per_label(viewport, label_width_px);
    let (start, end) = viewport.visible_window();
    let pixels_per_ms = viewport.pixels_per_ms();

    let first = (start / TICK_INTERVAL_MS) * TICK_INTERVAL_MS;
    let last = end.min(viewport.total_duration());

    (first..=last)
        .step_by(TICK_INTERVAL_MS as usize)
        .map(|position| Tick {
            position,
            x: ((position - viewport.offset()) as f64 * pixels_per_ms) as f32,
            labeled: (position / TICK_INTERVAL_MS) % every == 0,
        })
        .collect()
}

/// Returns the visible window as a pixel span `(left, right)` over a strip of
/// `strip_width` pixels representing the whole duration.
pub fn overview_span(viewport: &Viewport, strip_width: f32) -> Option<(f32, f32)> {
    if viewport.total_duration() <= 0 {
        return None;
    }
    let (start, end) = viewport.visible_window();
    let duration = viewport.total_duration() as f32;
    Some((
        start as f32 / duration * strip_width,
        end as f32 / duration * strip_width,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::ZoomAnchor;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "00:00:00:000");
        assert_eq!(format_timestamp(61_005), "00:01:01:005");
        assert_eq!(format_timestamp(3_723_456), "01:02:03:456");
        assert_eq!(format_timestamp(-1500), "-00:00:01:500");
    }

    #[test]
    fn test_format_tick_label() {
        assert_eq!(format_tick_label(65_000), "01:05");
        assert_eq!(format_tick_label(3_599_000), "59:59");
        assert_eq!(format_tick_label(3_600_000), "01:00:00");
        assert_eq!(format_tick_label(3_661_000), "01:01:01");
    }

    #[test]
    fn test_labels_thinned_at_overview() {
        // 10 minutes over 600 px: 1 px per second
        let vp = Viewport::with_size(600_000, 600);
        assert_eq!(seconds_per_label(&vp, 30.0), 60);

        let ticks = layout_ticks(&vp, 30.0);
        assert_eq!(ticks.len(), 601);
        assert!(ticks[0].labeled);
        assert!(!ticks[1].labeled);
        assert!(ticks[60].labeled);
        assert_eq!(ticks[60].x, 60.0);
    }

    #[test]
    fn test_every_second_labeled_when_zoomed() {
        let mut vp = Viewport::with_size(60_000, 600);
        vp.zoom_by(36.0, ZoomAnchor::Pixel(0.0)); // scale 10: 100 px per second
        assert_eq!(seconds_per_label(&vp, 30.0), 1);

        let ticks = layout_ticks(&vp, 30.0);
        assert!(ticks.iter().all(|t| t.labeled));
        assert_eq!(ticks.first().map(|t| t.position), Some(0));
        assert_eq!(ticks.last().map(|t| t.position), Some(6000));
    }

    #[test]
    fn test_no_ticks_for_degenerate_viewport() {
        let vp = Viewport::with_size(0, 600);
        assert!(layout_ticks(&vp, 30.0).is_empty());
        assert_eq!(overview_span(&vp, 600.0), None);
    }

    #[test]
    fn test_overview_span() {
        let mut vp = Viewport::with_size(100_000, 1000);
        assert_eq!(overview_span(&vp, 500.0), Some((0.0, 500.0)));
        vp.zoom_by(4.0, ZoomAnchor::Pixel(1000.0));
        assert_eq!(overview_span(&vp, 500.0), Some((250.0, 500.0)));
    }
}
