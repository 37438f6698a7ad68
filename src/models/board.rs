use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::product::ProductRecord;

pub const DEFAULT_ITEM_SIZE: Size = Size {
    width: 220.0,
    height: 300.0,
};
pub const DEFAULT_SECTION_SIZE: Size = Size {
    width: 400.0,
    height: 300.0,
};
pub const DEFAULT_SECTION_TITLE: &str = "New Section";
pub const DEFAULT_SECTION_COLOR: &str = "#f0f9ff";

/// Items added without a source URL (manual entry) carry this marker.
pub const MANUAL_ITEM_URL: &str = "#";
pub const MANUAL_ITEM_STORE: &str = "Manual";

/// Pastel palette cycled through as sections are created. Arbitrary color
/// strings are still accepted on update.
pub const SECTION_COLORS: [&str; 8] = [
    "#f0f9ff", "#fef3c7", "#dcfce7", "#fce7f3", "#ede9fe", "#fff7ed", "#f0fdf4", "#fdf2f8",
];

/// A point in board space (or screen space, depending on context).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Current interpretation mode for pointer gestures on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[default]
    Select,
    Pan,
    Section,
}

/// A product card placed on the board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardItem {
    pub id: Uuid,
    pub url: String,
    #[serde(flatten)]
    pub product: ProductRecord,
    pub position: Position,
    pub size: Size,
    /// Weak reference: cleared (not cascaded into a delete) when the section
    /// goes away.
    pub section_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl BoardItem {
    pub fn new(product: ProductRecord, url: impl Into<String>, position: Position) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            product,
            position,
            size: DEFAULT_ITEM_SIZE,
            section_id: None,
            created_at: Utc::now(),
        }
    }
}

/// A resizable, collapsible rectangular grouping region.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: Uuid,
    pub title: String,
    pub position: Position,
    pub size: Size,
    pub color: String,
    pub collapsed: bool,
    pub created_at: DateTime<Utc>,
}

impl Section {
    pub fn new(position: Position, size: Size) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: DEFAULT_SECTION_TITLE.to_string(),
            position,
            size,
            color: DEFAULT_SECTION_COLOR.to_string(),
            collapsed: false,
            created_at: Utc::now(),
        }
    }
}
