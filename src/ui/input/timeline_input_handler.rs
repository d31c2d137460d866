//! Timeline input handling.
//!
//! Translates egui pointer, wheel and keyboard input into the timeline's
//! input events and commands:
//! - Pointer move: hover tracking and boundary dragging
//! - Primary click: seek; primary drag on a boundary: resize the selection
//! - Middle click: set clip start, then clip end
//! - Wheel: pan; Ctrl/Cmd + wheel: zoom; Shift: ten times the step
//! - Keyboard shortcuts (see [`shortcut_commands`])

use eframe::egui;
use vcutter::{CursorShape, DragState, Modifiers, PointerButton, PointerEvent, Timeline, WheelEvent};
use crate::app::TimelineCommand;

/// Points of smooth scrolling that count as one wheel notch
const POINTS_PER_NOTCH: f32 = 50.0;

/// Notches per page for page-wise wheels
const NOTCHES_PER_PAGE: f32 = 10.0;

fn modifiers(m: &egui::Modifiers) -> Modifiers {
    Modifiers {
        precise: m.shift,
        zoom: m.ctrl || m.command,
    }
}

fn pointer_button(button: egui::PointerButton) -> Option<PointerButton> {
    match button {
        egui::PointerButton::Primary => Some(PointerButton::Primary),
        egui::PointerButton::Secondary => Some(PointerButton::Secondary),
        egui::PointerButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

/// Converts a wheel delta into notches; positive means wheel up.
pub fn wheel_notches(unit: egui::MouseWheelUnit, delta: egui::Vec2) -> f32 {
    // Shift + wheel arrives as horizontal scrolling on some platforms
    let amount = if delta.y != 0.0 { delta.y } else { delta.x };
    match unit {
        egui::MouseWheelUnit::Point => amount / POINTS_PER_NOTCH,
        egui::MouseWheelUnit::Line => amount,
        egui::MouseWheelUnit::Page => amount * NOTCHES_PER_PAGE,
    }
}

/// Feeds this frame's pointer and wheel input to the timeline.
///
/// # Arguments
/// * `ctx` - The egui context for input access
/// * `rect` - Screen rectangle of the timeline; pixel 0 is its left edge
/// * `timeline` - Timeline receiving the events
pub fn handle_timeline_input(ctx: &egui::Context, rect: egui::Rect, timeline: &mut Timeline) {
    let (events, pointer_pos, mods) = ctx.input(|i| (i.events.clone(), i.pointer.latest_pos(), i.modifiers));
    let mods = modifiers(&mods);

    let inside = pointer_pos.is_some_and(|pos| rect.contains(pos));
    if !inside {
        if timeline.hover_position().is_some() || timeline.drag_state() != DragState::Idle {
            timeline.pointer_leave();
        }
        return;
    }

    for event in events {
        match event {
            egui::Event::PointerMoved(pos) => {
                timeline.pointer_move(PointerEvent {
                    x: pos.x - rect.left(),
                    button: PointerButton::Primary,
                    clicks: 0,
                    modifiers: mods,
                });
            }
            egui::Event::PointerButton { pos, button, pressed, .. } => {
                let Some(button) = pointer_button(button) else {
                    continue;
                };
                let clicks = if pressed {
                    1
                } else {
                    ctx.input(|i| {
                        if i.pointer.button_double_clicked(to_egui(button)) {
                            2
                        } else if i.pointer.button_clicked(to_egui(button)) {
                            1
                        } else {
                            0
                        }
                    })
                };
                let event = PointerEvent {
                    x: pos.x - rect.left(),
                    button,
                    clicks,
                    modifiers: mods,
                };
                if pressed {
                    timeline.pointer_down(event);
                } else {
                    timeline.pointer_up(event);
                }
            }
            egui::Event::MouseWheel { unit, delta, .. } => {
                let notches = wheel_notches(unit, delta);
                if notches != 0.0 {
                    timeline.wheel(WheelEvent { notches, modifiers: mods });
                }
            }
            egui::Event::PointerGone => timeline.pointer_leave(),
            _ => {}
        }
    }

    if timeline.cursor() == CursorShape::ResizeHorizontal {
        ctx.set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
    }
}

fn to_egui(button: PointerButton) -> egui::PointerButton {
    match button {
        PointerButton::Primary => egui::PointerButton::Primary,
        PointerButton::Secondary => egui::PointerButton::Secondary,
        PointerButton::Middle => egui::PointerButton::Middle,
    }
}

/// Maps this frame's key presses to timeline commands.
///
/// | Key | Command |
/// |---|---|
/// | Space | play / pause |
/// | I / O | clip start / end at the playhead |
/// | Escape | cancel the pending clip start |
/// | Delete | delete the clip under the playhead |
/// | Z / X / C | auto zoom / overview / recenter |
///
/// Nothing is returned while a text field has keyboard focus.
pub fn shortcut_commands(ctx: &egui::Context) -> Vec<TimelineCommand> {
    if ctx.wants_keyboard_input() {
        return Vec::new();
    }

    const SHORTCUTS: [(egui::Key, TimelineCommand); 8] = [
        (egui::Key::Space, TimelineCommand::TogglePlayback),
        (egui::Key::I, TimelineCommand::MarkStart),
        (egui::Key::O, TimelineCommand::MarkEnd),
        (egui::Key::Escape, TimelineCommand::CancelPending),
        (egui::Key::Delete, TimelineCommand::DeleteAtPlayhead),
        (egui::Key::Z, TimelineCommand::ZoomAuto),
        (egui::Key::X, TimelineCommand::ZoomOverview),
        (egui::Key::C, TimelineCommand::Recenter),
    ];

    ctx.input(|i| {
        SHORTCUTS
            .iter()
            .filter(|(key, _)| i.key_pressed(*key))
            .map(|(_, command)| *command)
            .collect()
    })
}
