//! Input abstraction layer.
//!
//! Normalizes touch, stylus and mouse events into a unified `InputEvent`
//! enum consumed by tools and controllers. Coordinates are in whatever
//! space the receiving surface uses; the surface converts before routing.

use ink_core::model::Point;

/// The device behind a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PointerKind {
    #[default]
    Touch,
    Stylus,
    Mouse,
}

/// A normalized input event from any pointing device.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (touch start, pencil contact, mouse down).
    PointerDown {
        x: f32,
        y: f32,
        /// Milliseconds, monotonic within a session.
        timestamp: u64,
        /// 0.0 .. 1.0 when the device reports it.
        pressure: Option<f32>,
        kind: PointerKind,
    },

    PointerMove {
        x: f32,
        y: f32,
        timestamp: u64,
        pressure: Option<f32>,
        kind: PointerKind,
    },

    PointerUp { x: f32, y: f32 },

    /// The platform took the pointer away (gesture recognizer, app switch).
    PointerCancel,

    /// Two-finger pan started.
    PanBegin,

    /// Cumulative translation since `PanBegin`.
    PanUpdate { translation_x: f32, translation_y: f32 },

    PanEnd,
}

impl InputEvent {
    pub fn pointer_down(x: f32, y: f32, timestamp: u64) -> Self {
        Self::PointerDown {
            x,
            y,
            timestamp,
            pressure: None,
            kind: PointerKind::Touch,
        }
    }

    pub fn pointer_move(x: f32, y: f32, timestamp: u64) -> Self {
        Self::PointerMove {
            x,
            y,
            timestamp,
            pressure: None,
            kind: PointerKind::Touch,
        }
    }

    pub fn pointer_up(x: f32, y: f32) -> Self {
        Self::PointerUp { x, y }
    }

    pub fn pan_update(translation_x: f32, translation_y: f32) -> Self {
        Self::PanUpdate {
            translation_x,
            translation_y,
        }
    }

    /// Same event from a stylus with the given pressure. No effect on
    /// events that carry no device data.
    pub fn with_stylus(mut self, pressure: f32) -> Self {
        if let Self::PointerDown {
            pressure: p, kind, ..
        }
        | Self::PointerMove {
            pressure: p, kind, ..
        } = &mut self
        {
            *p = Some(pressure.clamp(0.0, 1.0));
            *kind = PointerKind::Stylus;
        }
        self
    }

    /// Extract position if this is a pointer event.
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y } => Some((*x, *y)),
            _ => None,
        }
    }

    /// Same event at another position. Used to convert between spaces.
    pub fn with_position(&self, nx: f32, ny: f32) -> Self {
        let mut event = self.clone();
        if let Self::PointerDown { x, y, .. }
        | Self::PointerMove { x, y, .. }
        | Self::PointerUp { x, y } = &mut event
        {
            *x = nx;
            *y = ny;
        }
        event
    }

    /// The stroke sample this event describes, for down and move events.
    pub fn sample(&self) -> Option<Point> {
        match self {
            Self::PointerDown {
                x,
                y,
                timestamp,
                pressure,
                ..
            }
            | Self::PointerMove {
                x,
                y,
                timestamp,
                pressure,
                ..
            } => {
                let p = Point::new(*x, *y).with_time(*timestamp);
                Some(match pressure {
                    Some(pressure) => p.with_pressure(*pressure),
                    None => p,
                })
            }
            _ => None,
        }
    }

    pub fn pointer_kind(&self) -> Option<PointerKind> {
        match self {
            Self::PointerDown { kind, .. } | Self::PointerMove { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn is_pan(&self) -> bool {
        matches!(
            self,
            Self::PanBegin | Self::PanUpdate { .. } | Self::PanEnd
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_carries_metadata() {
        let e = InputEvent::pointer_move(3.0, 4.0, 120).with_stylus(1.7);
        let p = e.sample().unwrap();
        assert_eq!((p.x, p.y, p.t, p.pressure), (3.0, 4.0, Some(120), Some(1.0)));
        assert_eq!(e.pointer_kind(), Some(PointerKind::Stylus));
        assert!(InputEvent::pointer_up(1.0, 1.0).sample().is_none());
    }

    #[test]
    fn repositioning_keeps_the_rest() {
        let e = InputEvent::pointer_down(1.0, 2.0, 9).with_position(10.0, 20.0);
        assert_eq!(e.position(), Some((10.0, 20.0)));
        assert_eq!(e.sample().and_then(|p| p.t), Some(9));
        assert_eq!(InputEvent::PanBegin.with_position(1.0, 1.0), InputEvent::PanBegin);
    }
}
