//! Pointer-driven resizing of selection boundaries.
//!
//! Hit tests are pure functions over the current viewport and selection
//! snapshot. The controller itself only remembers which boundary is being
//! dragged.

use crate::selection::SelectionSet;
use crate::viewport::Viewport;

/// Default hit-test distance in pixels (platform drag-recognition width).
pub const DEFAULT_DRAG_THRESHOLD_PX: f32 = 4.0;

/// Which end of a range is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryKind {
    Start,
    End,
}

/// Drag session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { boundary: BoundaryKind, index: usize },
}

/// Mouse cursor the host should show over the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorShape {
    #[default]
    Default,
    ResizeHorizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Returns true if `pixel` is within `threshold` pixels of the column
/// `reference` maps to.
pub fn is_near(pixel: f32, reference: i64, viewport: &Viewport, threshold: f32) -> bool {
    (pixel - viewport.position_to_pixel(reference) as f32).abs() < threshold
}

/// Finds the boundary under `pixel`.
///
/// All starts are checked before any end, in start order, so when two
/// boundaries are within the threshold the first start wins.
pub fn find_boundary_hit(
    pixel: f32,
    selections: &SelectionSet,
    viewport: &Viewport,
    threshold: f32,
) -> Option<(BoundaryKind, usize)> {
    find_start_hit(pixel, selections, viewport, threshold)
        .map(|index| (BoundaryKind::Start, index))
        .or_else(|| find_end_hit(pixel, selections, viewport, threshold).map(|index| (BoundaryKind::End, index)))
}

fn find_start_hit(pixel: f32, selections: &SelectionSet, viewport: &Viewport, threshold: f32) -> Option<usize> {
    selections.iter().position(|r| is_near(pixel, r.start, viewport, threshold))
}

fn find_end_hit(pixel: f32, selections: &SelectionSet, viewport: &Viewport, threshold: f32) -> Option<usize> {
    selections.iter().position(|r| is_near(pixel, r.end, viewport, threshold))
}

/// True if a press at `pixel` would grab some range's start.
pub fn is_drag_start_possible(pixel: f32, selections: &SelectionSet, viewport: &Viewport, threshold: f32) -> bool {
    find_start_hit(pixel, selections, viewport, threshold).is_some()
}

/// True if `pixel` is over some range's end.
pub fn is_drag_end_possible(pixel: f32, selections: &SelectionSet, viewport: &Viewport, threshold: f32) -> bool {
    find_end_hit(pixel, selections, viewport, threshold).is_some()
}

/// State machine translating pointer events into boundary resizes.
///
/// `Idle -> Dragging` on a single primary press near a boundary,
/// `Dragging -> Idle` on release (reporting the release position) or on
/// pointer leave (silently).
#[derive(Debug, Clone)]
pub struct DragController {
    state: DragState,
    threshold: f32,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD_PX)
    }
}

impl DragController {
    pub fn new(threshold: f32) -> Self {
        Self {
            state: DragState::Idle,
            threshold,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold;
    }

    /// Drops any drag session without reporting it.
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }

    /// Keeps the dragged range when a range is inserted at `inserted`.
    pub fn range_inserted(&mut self, inserted: usize) {
        if let DragState::Dragging { boundary, index } = self.state {
            if inserted <= index {
                self.state = DragState::Dragging { boundary, index: index + 1 };
            }
        }
    }

    /// Handles a pointer move and returns the cursor to show.
    ///
    /// While dragging, the pointer column is converted to a time position and
    /// applied to the dragged boundary. The clamp result is ignored: the
    /// clamped boundary itself is the feedback.
    pub fn pointer_move(&mut self, pixel: f32, viewport: &Viewport, selections: &mut SelectionSet) -> CursorShape {
        match self.state {
            DragState::Dragging { boundary, index } => {
                let position = viewport.pixel_to_position(pixel);
                match boundary {
                    BoundaryKind::Start => selections.set_start(index, position),
                    BoundaryKind::End => selections.set_end(index, position),
                };
                CursorShape::ResizeHorizontal
            }
            DragState::Idle => {
                if find_boundary_hit(pixel, selections, viewport, self.threshold).is_some() {
                    CursorShape::ResizeHorizontal
                } else {
                    CursorShape::Default
                }
            }
        }
    }

    /// Handles a button press. Returns true if a drag session started.
    ///
    /// Only a single click of the primary button can start a drag.
    pub fn pointer_down(
        &mut self,
        pixel: f32,
        button: PointerButton,
        clicks: u32,
        viewport: &Viewport,
        selections: &SelectionSet,
    ) -> bool {
        if button != PointerButton::Primary || clicks != 1 {
            return false;
        }
        match find_boundary_hit(pixel, selections, viewport, self.threshold) {
            Some((boundary, index)) => {
                log::debug!("drag {boundary:?} of selection {index} started");
                self.state = DragState::Dragging { boundary, index };
                true
            }
            None => false,
        }
    }

    /// Handles a button release.
    ///
    /// # Returns
    /// The time position under the pointer if a drag session just ended,
    /// `None` if no drag was in progress.
    pub fn pointer_up(&mut self, pixel: f32, viewport: &Viewport) -> Option<i64> {
        if !self.is_dragging() {
            return None;
        }
        self.state = DragState::Idle;
        let position = viewport.pixel_to_position(pixel);
        log::debug!("drag released at {position} ms");
        Some(position)
    }

    /// Aborts a drag session when the pointer leaves the timeline.
    pub fn pointer_leave(&mut self) {
        if self.is_dragging() {
            log::debug!("drag aborted by pointer leave");
        }
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::TimeRange;

    // 1 px = 100 ms
    fn setup() -> (Viewport, SelectionSet) {
        let viewport = Viewport::with_size(100_000, 1000);
        let mut selections = SelectionSet::new();
        selections.add(10_000, 20_000); // px 100..200
        selections.add(20_300, 30_000); // px 203..300
        (viewport, selections)
    }

    #[test]
    fn test_is_near_threshold_is_exclusive() {
        let (viewport, _) = setup();
        assert!(is_near(103.9, 10_000, &viewport, 4.0));
        assert!(!is_near(104.0, 10_000, &viewport, 4.0));
        assert!(is_near(96.5, 10_000, &viewport, 4.0));
    }

    #[test]
    fn test_hit_prefers_starts_over_ends() {
        let (viewport, selections) = setup();
        // px 201 is near end of range 0 (200) and start of range 1 (203)
        assert_eq!(
            find_boundary_hit(201.0, &selections, &viewport, 4.0),
            Some((BoundaryKind::Start, 1))
        );
        assert_eq!(
            find_boundary_hit(198.0, &selections, &viewport, 4.0),
            Some((BoundaryKind::End, 0))
        );
        assert_eq!(find_boundary_hit(150.0, &selections, &viewport, 4.0), None);
    }

    #[test]
    fn test_drag_possible_predicates() {
        let (viewport, selections) = setup();
        assert!(is_drag_start_possible(101.0, &selections, &viewport, 4.0));
        assert!(!is_drag_end_possible(101.0, &selections, &viewport, 4.0));
        assert!(is_drag_end_possible(299.0, &selections, &viewport, 4.0));
    }

    #[test]
    fn test_hover_cursor_without_state_change() {
        let (viewport, mut selections) = setup();
        let mut drag = DragController::default();
        assert_eq!(drag.pointer_move(100.0, &viewport, &mut selections), CursorShape::ResizeHorizontal);
        assert_eq!(drag.pointer_move(150.0, &viewport, &mut selections), CursorShape::Default);
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_only_single_primary_click_starts_drag() {
        let (viewport, selections) = setup();
        let mut drag = DragController::default();
        assert!(!drag.pointer_down(100.0, PointerButton::Middle, 1, &viewport, &selections));
        assert!(!drag.pointer_down(100.0, PointerButton::Primary, 2, &viewport, &selections));
        assert!(!drag.pointer_down(150.0, PointerButton::Primary, 1, &viewport, &selections));
        assert_eq!(drag.state(), DragState::Idle);

        assert!(drag.pointer_down(100.0, PointerButton::Primary, 1, &viewport, &selections));
        assert_eq!(
            drag.state(),
            DragState::Dragging { boundary: BoundaryKind::Start, index: 0 }
        );
    }

    #[test]
    fn test_drag_end_clamps_against_next_start() {
        let (viewport, mut selections) = setup();
        let mut drag = DragController::default();
        assert!(drag.pointer_down(299.0, PointerButton::Primary, 1, &viewport, &selections));

        assert_eq!(drag.pointer_move(400.0, &viewport, &mut selections), CursorShape::ResizeHorizontal);
        assert_eq!(selections.get(1), Some(&TimeRange::new(20_300, 40_000)));

        assert_eq!(drag.pointer_up(400.0, &viewport), Some(40_000));
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_drag_start_clamps_to_previous_end() {
        let (viewport, mut selections) = setup();
        let mut drag = DragController::default();
        assert!(drag.pointer_down(204.0, PointerButton::Primary, 1, &viewport, &selections));
        drag.pointer_move(50.0, &viewport, &mut selections);
        assert_eq!(selections.get(1).map(|r| r.start), Some(20_001));
    }

    #[test]
    fn test_pointer_up_without_drag_reports_nothing() {
        let (viewport, _) = setup();
        let mut drag = DragController::default();
        assert_eq!(drag.pointer_up(100.0, &viewport), None);
    }

    #[test]
    fn test_pointer_leave_aborts() {
        let (viewport, mut selections) = setup();
        let mut drag = DragController::default();
        drag.pointer_down(100.0, PointerButton::Primary, 1, &viewport, &selections);
        drag.pointer_move(90.0, &viewport, &mut selections);
        drag.pointer_leave();
        assert!(!drag.is_dragging());
        assert_eq!(drag.pointer_up(90.0, &viewport), None);
        assert_eq!(selections.get(0).map(|r| r.start), Some(9000));
    }

    #[test]
    fn test_range_inserted_shifts_drag_index() {
        let (viewport, selections) = setup();
        let mut drag = DragController::default();
        drag.pointer_down(100.0, PointerButton::Primary, 1, &viewport, &selections);
        let DragState::Dragging { boundary, index } = drag.state() else {
            panic!("drag did not start");
        };

        drag.range_inserted(index + 1);
        assert_eq!(drag.state(), DragState::Dragging { boundary, index });

        drag.range_inserted(index);
        assert_eq!(drag.state(), DragState::Dragging { boundary, index: index + 1 });

        drag.reset();
        drag.range_inserted(0);
        assert_eq!(drag.state(), DragState::Idle);
    }
}
