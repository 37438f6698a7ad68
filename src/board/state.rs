//! The board-state container: items, sections, viewport and selection.
//!
//! All mutation goes through the named operations below so that invariants
//! (zoom bounds, section references, selection membership) hold after every
//! call. Serialization skips session-local fields, which makes the struct
//! double as the persisted snapshot document.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::board::camera;
use crate::models::board::{
    BoardItem, DEFAULT_SECTION_SIZE, Position, SECTION_COLORS, Section, Size, Tool,
};
use crate::models::product::ProductRecord;

pub const DEFAULT_BOARD_NAME: &str = "My Clothing Board";

/// Sections cannot be resized below this; resize input is clamped, not
/// rejected.
pub const MIN_SECTION_SIZE: Size = Size {
    width: 200.0,
    height: 100.0,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoardState {
    pub items: Vec<BoardItem>,
    pub sections: Vec<Section>,
    pub zoom: f64,
    pub pan: Position,
    /// Selection order matters: it is the multi-drag anchor resolution
    /// order. Session-local, not persisted.
    #[serde(skip)]
    pub selected_ids: Vec<Uuid>,
    pub board_name: String,
    #[serde(skip)]
    pub active_tool: Tool,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            sections: Vec::new(),
            zoom: 1.0,
            pan: Position::default(),
            selected_ids: Vec::new(),
            board_name: DEFAULT_BOARD_NAME.to_string(),
            active_tool: Tool::default(),
        }
    }
}

impl BoardState {
    /// Repair a state that came from an untrusted snapshot: clamp the
    /// viewport and drop dangling section references.
    pub fn sanitize(&mut self) {
        self.zoom = camera::clamp_zoom(self.zoom);
        if !self.pan.x.is_finite() || !self.pan.y.is_finite() {
            self.pan = Position::default();
        }
        if self.board_name.trim().is_empty() {
            self.board_name = DEFAULT_BOARD_NAME.to_string();
        }
        let section_ids: Vec<Uuid> = self.sections.iter().map(|section| section.id).collect();
        for item in &mut self.items {
            if let Some(section_id) = item.section_id {
                if !section_ids.contains(&section_id) {
                    item.section_id = None;
                }
            }
        }
    }

    // --- Items ---

    pub fn add_item(
        &mut self,
        product: ProductRecord,
        url: impl Into<String>,
        position: Position,
    ) -> &BoardItem {
        self.items.push(BoardItem::new(product, url, position));
        self.items.last().expect("just pushed")
    }

    pub fn remove_item(&mut self, id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        if removed {
            self.selected_ids.retain(|selected| *selected != id);
        }
        removed
    }

    pub fn update_item_position(&mut self, id: Uuid, position: Position) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.position = position;
                true
            }
            None => false,
        }
    }

    pub fn update_item_size(&mut self, id: Uuid, size: Size) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.size = size;
                true
            }
            None => false,
        }
    }

    /// Assign (or clear, with `None`) an item's section. Fails when either
    /// the item or a non-null target section does not exist.
    pub fn assign_item_to_section(&mut self, item_id: Uuid, section_id: Option<Uuid>) -> bool {
        if let Some(section_id) = section_id {
            if !self.has_section(section_id) {
                return false;
            }
        }
        match self.items.iter_mut().find(|item| item.id == item_id) {
            Some(item) => {
                item.section_id = section_id;
                true
            }
            None => false,
        }
    }

    // --- Sections ---

    pub fn add_section(&mut self, position: Position) -> &Section {
        self.add_section_rect(position, DEFAULT_SECTION_SIZE)
    }

    /// New sections cycle through the pastel palette so adjacent groups are
    /// visually distinct by default.
    pub fn add_section_rect(&mut self, position: Position, size: Size) -> &Section {
        let mut section = Section::new(position, size);
        section.color = SECTION_COLORS[self.sections.len() % SECTION_COLORS.len()].to_string();
        self.sections.push(section);
        self.sections.last().expect("just pushed")
    }

    /// Remove a section, nulling out `section_id` on every item that
    /// referenced it. Items themselves are kept.
    pub fn remove_section(&mut self, id: Uuid) -> bool {
        let before = self.sections.len();
        self.sections.retain(|section| section.id != id);
        let removed = self.sections.len() != before;
        if removed {
            for item in &mut self.items {
                if item.section_id == Some(id) {
                    item.section_id = None;
                }
            }
            self.selected_ids.retain(|selected| *selected != id);
        }
        removed
    }

    pub fn update_section_position(&mut self, id: Uuid, position: Position) -> bool {
        match self.sections.iter_mut().find(|section| section.id == id) {
            Some(section) => {
                section.position = position;
                true
            }
            None => false,
        }
    }

    pub fn update_section_size(&mut self, id: Uuid, size: Size) -> bool {
        match self.sections.iter_mut().find(|section| section.id == id) {
            Some(section) => {
                section.size = Size {
                    width: size.width.max(MIN_SECTION_SIZE.width),
                    height: size.height.max(MIN_SECTION_SIZE.height),
                };
                true
            }
            None => false,
        }
    }

    pub fn update_section_title(&mut self, id: Uuid, title: impl Into<String>) -> bool {
        match self.sections.iter_mut().find(|section| section.id == id) {
            Some(section) => {
                section.title = title.into();
                true
            }
            None => false,
        }
    }

    pub fn update_section_color(&mut self, id: Uuid, color: impl Into<String>) -> bool {
        match self.sections.iter_mut().find(|section| section.id == id) {
            Some(section) => {
                section.color = color.into();
                true
            }
            None => false,
        }
    }

    pub fn toggle_section_collapsed(&mut self, id: Uuid) -> bool {
        match self.sections.iter_mut().find(|section| section.id == id) {
            Some(section) => {
                section.collapsed = !section.collapsed;
                true
            }
            None => false,
        }
    }

    // --- Viewport ---

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = camera::clamp_zoom(zoom);
    }

    pub fn set_pan(&mut self, pan: Position) {
        self.pan = pan;
    }

    // --- Selection ---

    pub fn select_only(&mut self, id: Uuid) {
        self.selected_ids.clear();
        self.toggle_selected(id);
    }

    /// Toggle membership, preserving selection order for the remaining ids.
    /// Ids not on the board are ignored.
    pub fn toggle_selected(&mut self, id: Uuid) {
        if self.selected_ids.contains(&id) {
            self.selected_ids.retain(|selected| *selected != id);
        } else if self.contains(id) {
            self.selected_ids.push(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_ids.clear();
    }

    pub fn is_selected(&self, id: Uuid) -> bool {
        self.selected_ids.contains(&id)
    }

    /// Delete every selected item and section (with the usual cascade).
    pub fn remove_selected(&mut self) {
        for id in std::mem::take(&mut self.selected_ids) {
            self.remove_item(id);
            self.remove_section(id);
        }
    }

    // --- Tool / name ---

    pub fn set_active_tool(&mut self, tool: Tool) {
        self.active_tool = tool;
    }

    pub fn set_board_name(&mut self, name: impl Into<String>) {
        self.board_name = name.into();
    }

    // --- Lookups shared by gestures and the HTTP layer ---

    pub fn has_item(&self, id: Uuid) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn has_section(&self, id: Uuid) -> bool {
        self.sections.iter().any(|section| section.id == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.has_item(id) || self.has_section(id)
    }

    /// Position of an item or section, whichever owns the id.
    pub fn position_of(&self, id: Uuid) -> Option<Position> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.position)
            .or_else(|| {
                self.sections
                    .iter()
                    .find(|section| section.id == id)
                    .map(|section| section.position)
            })
    }

    /// Move an item or section; ids that are gone (e.g. deleted mid-drag)
    /// are a no-op.
    pub fn set_position(&mut self, id: Uuid, position: Position) -> bool {
        self.update_item_position(id, position) || self.update_section_position(id, position)
    }
}
