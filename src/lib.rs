pub mod config;
pub mod drag;
pub mod events;
pub mod keyframe_reader;
pub mod keyframes;
pub mod selection;
pub mod theme;
pub mod time_axis;
pub mod timeline;
pub mod viewport;

// Export the interaction core
pub use timeline::{Modifiers, PointerEvent, Timeline, TimelineHint, WheelEvent};
pub use viewport::{Viewport, ZoomAnchor};
pub use selection::{SelectionSet, TimeRange};
pub use drag::{BoundaryKind, CursorShape, DragController, DragState, PointerButton};
pub use events::{Observers, SubscriptionId, TimelineEvent};
pub use config::TimelineConfig;

// Export keyframe support
pub use keyframes::{Keyframe, KeyframeBuffer, RepaintSignal};
pub use keyframe_reader::{FfprobeKeyframeReader, KeyframeList, KeyframeSource, VirtualKeyframeSource};

// Export theme support
pub use theme::{Theme, ThemeColors, ThemeManager, hex_to_color32, with_alpha};
