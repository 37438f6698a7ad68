//! Viewport math between screen space and board space.
//!
//! Rendering translates by `pan` and then scales by `zoom` with the origin
//! at board (0,0); these helpers are the inverse transforms plus the
//! zoom-toward-cursor pan correction.

use crate::models::board::Position;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 3.0;

/// Wheel deltas are in pixels; this converts them to zoom increments.
pub const WHEEL_ZOOM_FACTOR: f64 = 0.001;

pub fn clamp_zoom(zoom: f64) -> f64 {
    if !zoom.is_finite() {
        return 1.0;
    }
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Map a screen point to board space. `origin` is the viewport's top-left
/// in screen coordinates.
pub fn screen_to_board(screen: Position, origin: Position, pan: Position, zoom: f64) -> Position {
    Position {
        x: (screen.x - origin.x - pan.x) / zoom,
        y: (screen.y - origin.y - pan.y) / zoom,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomUpdate {
    pub zoom: f64,
    pub pan: Position,
}

/// Apply a zoom delta keeping the board point under `cursor` fixed.
/// `cursor` is viewport-relative (screen point minus origin).
pub fn zoom_at_cursor(zoom: f64, pan: Position, delta: f64, cursor: Position) -> ZoomUpdate {
    let new_zoom = clamp_zoom(zoom + delta);
    let scale = new_zoom / zoom;
    ZoomUpdate {
        zoom: new_zoom,
        pan: Position {
            x: cursor.x - (cursor.x - pan.x) * scale,
            y: cursor.y - (cursor.y - pan.y) * scale,
        },
    }
}

/// Plain (unmodified) wheel input pans instead of zooming.
pub fn wheel_pan(pan: Position, delta: Position) -> Position {
    Position {
        x: pan.x - delta.x,
        y: pan.y - delta.y,
    }
}
