//! Timeline interaction core.
//!
//! [`Timeline`] composes the viewport, the selection set and the drag
//! controller, and adds what the hosting window needs around them:
//! - the playhead position and the hover position
//! - the pending "new selection start" marker
//! - input dispatch for pointer and wheel events
//! - notifications to any number of listeners
//! - the keyframe overlay handle
//!
//! Everything here runs on the UI thread. Only the keyframe buffer is shared
//! with other threads.

use std::sync::mpsc::Receiver;

use crate::config::TimelineConfig;
use crate::drag::{self, CursorShape, DragController, DragState, PointerButton};
use crate::events::{Observers, SubscriptionId, TimelineEvent};
use crate::keyframes::{Keyframe, KeyframeBuffer};
use crate::selection::SelectionSet;
use crate::viewport::{Viewport, ZoomAnchor};

/// Keyboard modifiers held during an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Amplifies wheel steps (Shift)
    pub precise: bool,
    /// Switches the wheel from panning to zooming (Ctrl / Cmd)
    pub zoom: bool,
}

/// A pointer event in timeline coordinates (`x` relative to the left edge).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub button: PointerButton,
    /// 1 for a single click, 2 for a double click
    pub clicks: u32,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// A single primary-button event at `x`.
    pub fn primary(x: f32) -> Self {
        Self {
            x,
            button: PointerButton::Primary,
            clicks: 1,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_button(x: f32, button: PointerButton) -> Self {
        Self {
            button,
            ..Self::primary(x)
        }
    }
}

/// A mouse-wheel step. Positive notches mean wheel up / away from the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub notches: f32,
    pub modifiers: Modifiers,
}

/// What a click at the hovered position would do; the host turns it into a tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineHint {
    MoveClipStart,
    MoveClipEnd,
    SetClipStartHere,
    SetClipEndHere,
}

/// The timeline interaction core.
#[derive(Debug)]
pub struct Timeline {
    viewport: Viewport,
    selections: SelectionSet,
    drag: DragController,
    config: TimelineConfig,
    /// Current playhead position in milliseconds
    position: i64,
    /// Time under the pointer, if the pointer is over the timeline
    hover_position: Option<i64>,
    /// Half-committed selection waiting for its end
    new_selection_start: Option<i64>,
    cursor: CursorShape,
    keyframes: KeyframeBuffer,
    observers: Observers<TimelineEvent>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(TimelineConfig::default())
    }
}

impl Timeline {
    pub fn new(config: TimelineConfig) -> Self {
        Self {
            viewport: Viewport::new(),
            selections: SelectionSet::new(),
            drag: DragController::new(config.drag_threshold_px),
            config,
            position: 0,
            hover_position: None,
            new_selection_start: None,
            cursor: CursorShape::Default,
            keyframes: KeyframeBuffer::new(),
            observers: Observers::new(),
        }
    }

    /// Uses an existing keyframe buffer (typically one with a repaint signal).
    pub fn with_keyframe_buffer(mut self, keyframes: KeyframeBuffer) -> Self {
        self.keyframes = keyframes;
        self
    }

    // ===== Queries =====

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selections(&self) -> &SelectionSet {
        &self.selections
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    pub fn position(&self) -> i64 {
        self.position
    }

    pub fn hover_position(&self) -> Option<i64> {
        self.hover_position
    }

    pub fn new_selection_start(&self) -> Option<i64> {
        self.new_selection_start
    }

    pub fn cursor(&self) -> CursorShape {
        self.cursor
    }

    pub fn keyframes(&self) -> &KeyframeBuffer {
        &self.keyframes
    }

    pub fn position_to_pixel(&self, position: i64) -> i32 {
        self.viewport.position_to_pixel(position)
    }

    pub fn pixel_to_position(&self, pixel: f32) -> i64 {
        self.viewport.pixel_to_position(pixel)
    }

    pub fn is_drag_start_possible(&self, pixel: f32) -> bool {
        drag::is_drag_start_possible(pixel, &self.selections, &self.viewport, self.drag.threshold())
    }

    pub fn is_drag_end_possible(&self, pixel: f32) -> bool {
        drag::is_drag_end_possible(pixel, &self.selections, &self.viewport, self.drag.threshold())
    }

    /// Picks the tooltip for the current hover position.
    ///
    /// Later rules win: a boundary grab hint is replaced by a "set clip"
    /// hint when a click would also start or finish a selection there.
    pub fn hint(&self) -> Option<TimelineHint> {
        let hover = self.hover_position?;
        let pixel = self.viewport.position_to_pixel(hover) as f32;
        let mut hint = None;

        if self.is_drag_start_possible(pixel) {
            hint = Some(TimelineHint::MoveClipStart);
        }
        if self.is_drag_end_possible(pixel) {
            hint = Some(TimelineHint::MoveClipEnd);
        }

        match self.new_selection_start {
            None if self.selections.can_start_at(hover) => hint = Some(TimelineHint::SetClipStartHere),
            Some(start) if hover > start && self.selections.can_add(start, hover) => {
                hint = Some(TimelineHint::SetClipEndHere)
            }
            _ => {}
        }
        hint
    }

    // ===== Notifications =====

    pub fn subscribe(&mut self, listener: impl FnMut(&TimelineEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Subscribes a channel; drain it after each input call to react with `&mut self`.
    pub fn event_channel(&mut self) -> Receiver<TimelineEvent> {
        self.observers.channel()
    }

    fn emit(&mut self, event: TimelineEvent) {
        self.observers.notify(&event);
    }

    fn set_hover_position(&mut self, hover: Option<i64>) {
        if self.hover_position == hover {
            return;
        }
        self.hover_position = hover;
        self.emit(TimelineEvent::HoverPositionChanged(hover));
    }

    fn request_position_change(&mut self, position: i64) {
        self.emit(TimelineEvent::PositionChangeRequested(position));
    }

    // ===== Host commands =====

    /// Loads a new media duration: full overview, no selections, playhead at 0.
    pub fn set_duration(&mut self, total_duration: i64) {
        log::info!("timeline duration set to {total_duration} ms");
        self.viewport.set_duration(total_duration);
        self.drag.reset();
        self.new_selection_start = None;
        self.position = 0;
        self.cursor = CursorShape::Default;
        self.set_hover_position(None);
        self.clear_selections();
    }

    /// Resizes the timeline area.
    pub fn set_visible_width(&mut self, visible_width: i32) {
        self.viewport.set_visible_width(visible_width);
    }

    /// Moves the playhead and scrolls forward if it left the view.
    pub fn set_current_position(&mut self, position: i64) {
        self.position = position;
        if self.config.follow_playhead {
            self.viewport.auto_scroll_if_out_of_view(position);
        }
    }

    pub fn set_config(&mut self, config: TimelineConfig) {
        self.drag.set_threshold(config.drag_threshold_px);
        self.config = config;
    }

    pub fn register_new_selection_start(&mut self, position: i64) {
        self.new_selection_start = Some(position);
    }

    /// Turns the pending start and `position` into a selection.
    ///
    /// The pending marker is consumed even when the range is rejected.
    /// Returns true if a selection was added.
    pub fn register_new_selection_end(&mut self, position: i64) -> bool {
        match self.new_selection_start.take() {
            Some(start) => self.add_selection(start, position),
            None => false,
        }
    }

    pub fn cancel_new_selection(&mut self) {
        self.new_selection_start = None;
    }

    pub fn add_selection(&mut self, start: i64, end: i64) -> bool {
        let added = self.selections.add(start, end);
        if added {
            if let Some(inserted) = self.selections.iter().position(|r| r.start == start) {
                self.drag.range_inserted(inserted);
            }
            log::debug!("selection [{start}, {end}] added");
            self.emit(TimelineEvent::SelectionsChanged);
        }
        added
    }

    pub fn set_selection_start(&mut self, index: usize, start: i64) -> bool {
        self.selections.set_start(index, start)
    }

    pub fn set_selection_end(&mut self, index: usize, end: i64) -> bool {
        self.selections.set_end(index, end)
    }

    /// Deletes selection `index`; panics if out of range.
    pub fn delete_selection(&mut self, index: usize) {
        self.drag.reset();
        self.selections.delete(index);
        self.emit(TimelineEvent::SelectionsChanged);
    }

    pub fn clear_selections(&mut self) {
        self.drag.reset();
        self.selections.clear();
        self.emit(TimelineEvent::SelectionsChanged);
    }

    pub fn zoom_to_overview(&mut self) {
        self.viewport.zoom_to_overview();
    }

    /// Zooms to the configured density around the playhead.
    pub fn zoom_auto(&mut self) {
        self.viewport
            .zoom_to_density(self.config.auto_zoom_ms_per_pixel, self.position);
    }

    pub fn recenter_on_current_position(&mut self) {
        self.viewport.recenter_on(self.position);
    }

    pub fn go_to_position(&mut self, position: i64) {
        self.viewport.recenter_on(position);
    }

    pub fn register_keyframes(&self, keyframes: Vec<Keyframe>) {
        self.keyframes.replace_all(keyframes);
    }

    pub fn clear_keyframes(&self) {
        self.keyframes.clear();
    }

    // ===== Input =====

    pub fn pointer_move(&mut self, event: PointerEvent) {
        let hover = self.viewport.pixel_to_position(event.x);
        self.set_hover_position(Some(hover));
        self.cursor = self
            .drag
            .pointer_move(event.x, &self.viewport, &mut self.selections);
    }

    pub fn pointer_down(&mut self, event: PointerEvent) {
        if self.drag.pointer_down(
            event.x,
            event.button,
            event.clicks,
            &self.viewport,
            &self.selections,
        ) {
            self.cursor = CursorShape::ResizeHorizontal;
        }
    }

    /// Ends a drag, or handles a plain click.
    ///
    /// - After a drag: requests a seek to the release position
    /// - Single primary click: requests a seek to the clicked position
    /// - Single middle click: registers a new selection start, or completes
    ///   the pending one
    pub fn pointer_up(&mut self, event: PointerEvent) {
        if let Some(released_at) = self.drag.pointer_up(event.x, &self.viewport) {
            if self.config.seek_on_drag_release {
                self.request_position_change(released_at);
            }
            return;
        }

        if event.clicks != 1 {
            return;
        }
        let position = self.viewport.pixel_to_position(event.x);
        match event.button {
            PointerButton::Primary => self.request_position_change(position),
            PointerButton::Middle => match self.new_selection_start {
                None if self.selections.can_start_at(position) => {
                    self.register_new_selection_start(position);
                }
                Some(start) if self.selections.can_add(start, position) => {
                    self.register_new_selection_end(position);
                }
                _ => {}
            },
            PointerButton::Secondary => {}
        }
    }

    pub fn pointer_leave(&mut self) {
        self.set_hover_position(None);
        self.drag.pointer_leave();
        self.cursor = CursorShape::Default;
    }

    /// Pans, or zooms when the zoom modifier is held.
    ///
    /// The zoom anchor is the pixel of the last hovered position, or the
    /// middle of the view when nothing is hovered. The hover position is
    /// cleared first because the content under the pointer moves.
    pub fn wheel(&mut self, event: WheelEvent) {
        let hovered = self.hover_position;
        self.set_hover_position(None);

        let notches = if event.modifiers.precise {
            event.notches * self.config.precise_multiplier as f32
        } else {
            event.notches
        };

        if event.modifiers.zoom {
            let anchor = match hovered {
                Some(position) => ZoomAnchor::Pixel(self.viewport.position_to_pixel(position) as f32),
                None => ZoomAnchor::Center,
            };
            self.viewport.zoom_by(notches, anchor);
        } else {
            self.viewport.pan_by(notches, false);
        }
    }
}
