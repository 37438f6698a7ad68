use serde::Deserialize;
use uuid::Uuid;

use crate::models::board::{Position, Size};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub title: String,
    pub price: Option<String>,
    pub currency: Option<String>,
    pub image_url: Option<String>,
    pub store: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    pub url: Option<String>,
    pub position: Position,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub position: Option<Position>,
    pub size: Option<Size>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignSectionRequest {
    /// `null` detaches the item from its section.
    pub section_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSectionRequest {
    pub position: Position,
    pub size: Option<Size>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSectionRequest {
    pub position: Option<Position>,
    pub size: Option<Size>,
    pub title: Option<String>,
    pub color: Option<String>,
    pub collapsed: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ViewportRequest {
    pub zoom: f64,
    pub pan: Position,
}

#[derive(Debug, Deserialize)]
pub struct RenameBoardRequest {
    pub name: String,
}
