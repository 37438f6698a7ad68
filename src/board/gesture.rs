//! Pointer and keyboard gesture state machines for the canvas.
//!
//! The controller owns only transient gesture state (what the pointer is in
//! the middle of doing); durable board state is mutated exclusively through
//! the named operations on [`BoardState`]. Pointer release is the single
//! terminator for every gesture, so hosts should feed `pointer_up` from a
//! global release listener to avoid stuck drags when the pointer leaves the
//! window.

use uuid::Uuid;

use crate::board::camera;
use crate::board::state::BoardState;
use crate::models::board::{Position, Size, Tool};

/// A drawn section below this extent (board units, each axis) is discarded
/// on release.
pub const MIN_DRAWN_SECTION_EXTENT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Shift/meta clicks extend the selection instead of replacing it.
    fn extends_selection(&self) -> bool {
        self.shift || self.meta
    }

    /// Ctrl or meta, the platform shortcut modifier.
    fn platform(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// What the pointer landed on, as resolved by the host's hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Background,
    Item(Uuid),
    Section(Uuid),
}

impl PointerTarget {
    fn id(&self) -> Option<Uuid> {
        match self {
            PointerTarget::Background => None,
            PointerTarget::Item(id) | PointerTarget::Section(id) => Some(*id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionPreview {
    pub position: Position,
    pub size: Size,
}

#[derive(Debug, Clone, PartialEq)]
enum Gesture {
    Idle,
    Dragging {
        pointer_start: Position,
        /// Board-space start position of every dragged entity, snapshotted
        /// at drag start so relative offsets survive the whole gesture.
        starts: Vec<(Uuid, Position)>,
    },
    Panning {
        pointer_start: Position,
        pan_start: Position,
    },
    DrawingSection {
        anchor: Position,
        preview: SectionPreview,
    },
}

#[derive(Debug)]
pub struct GestureController {
    gesture: Gesture,
    /// Viewport top-left in screen coordinates.
    origin: Position,
}

impl GestureController {
    pub fn new(origin: Position) -> Self {
        Self {
            gesture: Gesture::Idle,
            origin,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.gesture, Gesture::Idle)
    }

    /// Live preview rectangle while a section is being drawn.
    pub fn section_preview(&self) -> Option<SectionPreview> {
        match &self.gesture {
            Gesture::DrawingSection { preview, .. } => Some(*preview),
            _ => None,
        }
    }

    pub fn set_origin(&mut self, origin: Position) {
        self.origin = origin;
    }

    pub fn pointer_down(
        &mut self,
        state: &mut BoardState,
        screen: Position,
        button: PointerButton,
        modifiers: Modifiers,
        target: PointerTarget,
    ) {
        match target.id() {
            None => self.background_down(state, screen, button),
            Some(id) => {
                if modifiers.extends_selection() {
                    state.toggle_selected(id);
                } else if !state.is_selected(id) {
                    state.select_only(id);
                }
                self.begin_drag(state, screen, id);
            }
        }
    }

    fn background_down(&mut self, state: &mut BoardState, screen: Position, button: PointerButton) {
        if state.active_tool == Tool::Section && button == PointerButton::Primary {
            let anchor = self.screen_to_board(state, screen);
            self.gesture = Gesture::DrawingSection {
                anchor,
                preview: SectionPreview {
                    position: anchor,
                    size: Size::new(0.0, 0.0),
                },
            };
            return;
        }

        state.clear_selection();

        if button == PointerButton::Middle || state.active_tool == Tool::Pan {
            self.gesture = Gesture::Panning {
                pointer_start: screen,
                pan_start: state.pan,
            };
        }
    }

    fn begin_drag(&mut self, state: &BoardState, screen: Position, id: Uuid) {
        let drag_ids: Vec<Uuid> = if state.is_selected(id) {
            state.selected_ids.clone()
        } else {
            vec![id]
        };
        let starts = drag_ids
            .into_iter()
            .filter_map(|id| state.position_of(id).map(|position| (id, position)))
            .collect();
        self.gesture = Gesture::Dragging {
            pointer_start: screen,
            starts,
        };
    }

    pub fn pointer_move(&mut self, state: &mut BoardState, screen: Position) {
        let board = self.screen_to_board(state, screen);
        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Panning {
                pointer_start,
                pan_start,
            } => {
                // Pan follows the pointer 1:1 in screen pixels, unscaled.
                state.set_pan(Position::new(
                    pan_start.x + (screen.x - pointer_start.x),
                    pan_start.y + (screen.y - pointer_start.y),
                ));
            }
            Gesture::Dragging {
                pointer_start,
                starts,
            } => {
                let dx = (screen.x - pointer_start.x) / state.zoom;
                let dy = (screen.y - pointer_start.y) / state.zoom;
                for (id, start) in starts.iter() {
                    // Entities deleted mid-drag simply stop following.
                    state.set_position(*id, Position::new(start.x + dx, start.y + dy));
                }
            }
            Gesture::DrawingSection { anchor, preview } => {
                *preview = SectionPreview {
                    position: Position::new(anchor.x.min(board.x), anchor.y.min(board.y)),
                    size: Size::new((board.x - anchor.x).abs(), (board.y - anchor.y).abs()),
                };
            }
        }
    }

    /// End the active gesture. A drawn section is committed only when both
    /// extents exceed the threshold; sub-threshold drags create nothing.
    pub fn pointer_up(&mut self, state: &mut BoardState) {
        let finished = std::mem::replace(&mut self.gesture, Gesture::Idle);
        if let Gesture::DrawingSection { preview, .. } = finished {
            if preview.size.width > MIN_DRAWN_SECTION_EXTENT
                && preview.size.height > MIN_DRAWN_SECTION_EXTENT
            {
                state.add_section_rect(preview.position, preview.size);
            }
        }
    }

    /// Wheel input: zoom toward the cursor with the platform modifier held,
    /// otherwise pan.
    pub fn wheel(
        &mut self,
        state: &mut BoardState,
        screen: Position,
        delta: Position,
        modifiers: Modifiers,
    ) {
        if modifiers.platform() {
            let cursor = Position::new(screen.x - self.origin.x, screen.y - self.origin.y);
            let update = camera::zoom_at_cursor(
                state.zoom,
                state.pan,
                -delta.y * camera::WHEEL_ZOOM_FACTOR,
                cursor,
            );
            state.set_zoom(update.zoom);
            state.set_pan(update.pan);
        } else {
            state.set_pan(camera::wheel_pan(state.pan, delta));
        }
    }

    /// Global keyboard shortcuts; suppressed entirely while a text input
    /// has focus.
    pub fn key_down(
        &mut self,
        state: &mut BoardState,
        key: Key,
        modifiers: Modifiers,
        text_input_focused: bool,
    ) {
        if text_input_focused {
            return;
        }
        match key {
            Key::Delete | Key::Backspace => state.remove_selected(),
            Key::Escape => state.clear_selection(),
            Key::Char('v') => state.set_active_tool(Tool::Select),
            Key::Char('h') => state.set_active_tool(Tool::Pan),
            // Plain `s` only; ctrl/cmd+s belongs to the browser.
            Key::Char('s') if !modifiers.platform() => state.set_active_tool(Tool::Section),
            Key::Char(_) => {}
        }
    }

    fn screen_to_board(&self, state: &BoardState, screen: Position) -> Position {
        camera::screen_to_board(screen, self.origin, state.pan, state.zoom)
    }
}
