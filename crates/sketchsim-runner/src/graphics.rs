//! Display capability consumed by sketches.
//!
//! The harness does not render anything. Sketches draw through the
//! [`Graphics`] trait, and [`RecordingGraphics`] keeps the calls so a run can
//! be inspected or asserted on.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::trace;

/// Handle to a created shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub u32);

/// Primitive shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// Filled or outlined rectangle.
    Rect,
    /// Circle or ellipse.
    Arc,
    /// Text label.
    Label,
}

/// Geometric or visual property of a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    /// Horizontal position in pixels.
    X(i32),
    /// Vertical position in pixels.
    Y(i32),
    /// Width in pixels.
    Width(i32),
    /// Height in pixels.
    Height(i32),
    /// Corner radius in pixels.
    Radius(i32),
    /// RGB color.
    Color(u32),
    /// 0 is transparent, 255 opaque.
    Opacity(u8),
    /// Label text.
    Text(String),
}

/// Which numeric property an animation drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatedProperty {
    /// Horizontal position.
    X,
    /// Vertical position.
    Y,
    /// Width.
    Width,
    /// Height.
    Height,
    /// Opacity.
    Opacity,
}

/// A repeating, time-bounded tween of one property.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    /// Property being driven.
    pub property: AnimatedProperty,
    /// Start value.
    pub from: i32,
    /// End value.
    pub to: i32,
    /// Duration of one pass in milliseconds.
    pub duration_ms: u32,
    /// Number of repeats. `None` repeats forever.
    pub repeat: Option<u32>,
    /// Whether each pass plays back in reverse after reaching `to`.
    pub playback: bool,
    /// Pause between repeats in milliseconds.
    pub repeat_delay_ms: u32,
}

impl Animation {
    /// A one-shot tween from `from` to `to`.
    pub fn new(property: AnimatedProperty, from: i32, to: i32, duration_ms: u32) -> Self {
        Animation {
            property,
            from,
            to,
            duration_ms,
            repeat: Some(0),
            playback: false,
            repeat_delay_ms: 0,
        }
    }

    /// Repeat indefinitely.
    pub fn forever(mut self) -> Self {
        self.repeat = None;
        self
    }

    /// Play each pass back in reverse.
    pub fn with_playback(mut self) -> Self {
        self.playback = true;
        self
    }

    /// Pause between repeats.
    pub fn with_repeat_delay(mut self, ms: u32) -> Self {
        self.repeat_delay_ms = ms;
        self
    }
}

/// The drawing surface a sketch renders to.
pub trait Graphics: Send {
    /// Create a shape, optionally inside `parent`.
    fn create_shape(&mut self, parent: Option<ShapeId>, kind: ShapeKind) -> ShapeId;

    /// Set one property of a shape.
    fn set_property(&mut self, shape: ShapeId, property: Property);

    /// Start a tween on a shape.
    fn animate(&mut self, shape: ShapeId, animation: Animation);
}

/// Shared surface, so the caller can inspect it while a sketch draws.
impl<G: Graphics> Graphics for Arc<Mutex<G>> {
    fn create_shape(&mut self, parent: Option<ShapeId>, kind: ShapeKind) -> ShapeId {
        self.lock().unwrap_or_else(PoisonError::into_inner).create_shape(parent, kind)
    }

    fn set_property(&mut self, shape: ShapeId, property: Property) {
        self.lock().unwrap_or_else(PoisonError::into_inner).set_property(shape, property)
    }

    fn animate(&mut self, shape: ShapeId, animation: Animation) {
        self.lock().unwrap_or_else(PoisonError::into_inner).animate(shape, animation)
    }
}

/// One recorded graphics call.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphicsCall {
    /// A shape was created.
    Create {
        /// New shape.
        id: ShapeId,
        /// Parent container.
        parent: Option<ShapeId>,
        /// Shape kind.
        kind: ShapeKind,
    },
    /// A property was set.
    Set(ShapeId, Property),
    /// An animation was started.
    Animate(ShapeId, Animation),
}

/// [`Graphics`] implementation that records calls instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingGraphics {
    next_id: u32,
    calls: Vec<GraphicsCall>,
}

impl RecordingGraphics {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> &[GraphicsCall] {
        &self.calls
    }

    /// Number of shapes created.
    pub fn shape_count(&self) -> usize {
        self.next_id as usize
    }
}

impl Graphics for RecordingGraphics {
    fn create_shape(&mut self, parent: Option<ShapeId>, kind: ShapeKind) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        trace!("[GFX] create {:?} {:?} in {:?}", kind, id, parent);
        self.calls.push(GraphicsCall::Create { id, parent, kind });
        id
    }

    fn set_property(&mut self, shape: ShapeId, property: Property) {
        trace!("[GFX] set {:?} {:?}", shape, property);
        self.calls.push(GraphicsCall::Set(shape, property));
    }

    fn animate(&mut self, shape: ShapeId, animation: Animation) {
        trace!("[GFX] animate {:?} {:?}", shape, animation);
        self.calls.push(GraphicsCall::Animate(shape, animation));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_calls_in_order() {
        let mut gfx = RecordingGraphics::new();
        let screen = gfx.create_shape(None, ShapeKind::Rect);
        let dot = gfx.create_shape(Some(screen), ShapeKind::Arc);
        gfx.set_property(dot, Property::Color(0x00ff00));
        gfx.animate(
            dot,
            Animation::new(AnimatedProperty::Opacity, 0, 255, 800)
                .forever()
                .with_playback()
                .with_repeat_delay(200),
        );

        assert_eq!(gfx.shape_count(), 2);
        assert_eq!(gfx.calls().len(), 4);
        assert_eq!(
            gfx.calls()[1],
            GraphicsCall::Create {
                id: ShapeId(1),
                parent: Some(ShapeId(0)),
                kind: ShapeKind::Arc
            }
        );
        match &gfx.calls()[3] {
            GraphicsCall::Animate(id, anim) => {
                assert_eq!(*id, dot);
                assert_eq!(anim.repeat, None);
                assert!(anim.playback);
                assert_eq!(anim.repeat_delay_ms, 200);
            }
            other => panic!("unexpected call {:?}", other),
        }
    }
}
