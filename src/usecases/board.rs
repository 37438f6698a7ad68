//! Board mutations behind the HTTP API.
//!
//! Every write goes: lock the board, apply one named state operation,
//! persist the snapshot while still holding the lock. That serializes
//! snapshot writes and keeps the file consistent with memory.

use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::board::state::BoardState;
use crate::dto::board::{
    AssignSectionRequest, CreateItemRequest, CreateSectionRequest, RenameBoardRequest,
    UpdateItemRequest, UpdateSectionRequest, ViewportRequest,
};
use crate::error::{AppError, AppResult};
use crate::extract::urls;
use crate::models::board::{
    BoardItem, DEFAULT_SECTION_SIZE, MANUAL_ITEM_STORE, MANUAL_ITEM_URL, Section,
};
use crate::models::product::{DEFAULT_CURRENCY, PRICE_NOT_FOUND, ProductRecord};
use crate::services::store::SnapshotStore;

pub type SharedBoard = Arc<Mutex<BoardState>>;

pub struct BoardService;

impl BoardService {
    pub async fn snapshot(board: &SharedBoard) -> BoardState {
        board.lock().await.clone()
    }

    pub async fn create_item(
        board: &SharedBoard,
        store: &SnapshotStore,
        req: CreateItemRequest,
    ) -> AppResult<BoardItem> {
        let title = req.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::ValidationError("Title is required".to_string()));
        }
        validate_position(&req.position)?;

        let url = match req.url.filter(|url| !url.trim().is_empty()) {
            Some(url) => url,
            None => MANUAL_ITEM_URL.to_string(),
        };
        let store_name = match req.store.filter(|name| !name.trim().is_empty()) {
            Some(name) => name,
            None if url == MANUAL_ITEM_URL => MANUAL_ITEM_STORE.to_string(),
            None => urls::extract_domain(&url),
        };

        let product = ProductRecord {
            title,
            price: req.price.unwrap_or_else(|| PRICE_NOT_FOUND.to_string()),
            currency: req.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            image_url: req.image_url.unwrap_or_default(),
            store: store_name,
            sizes: req.sizes,
            colors: req.colors,
            description: req.description.unwrap_or_default(),
        };

        let mut state = board.lock().await;
        let item = state.add_item(product, url, req.position).clone();
        store.save(&state).await?;
        Ok(item)
    }

    pub async fn update_item(
        board: &SharedBoard,
        store: &SnapshotStore,
        item_id: Uuid,
        req: UpdateItemRequest,
    ) -> AppResult<BoardItem> {
        if let Some(position) = &req.position {
            validate_position(position)?;
        }
        if let Some(size) = &req.size {
            validate_size(size)?;
        }

        let mut state = board.lock().await;
        if !state.has_item(item_id) {
            return Err(AppError::NotFound("Item not found".to_string()));
        }
        if let Some(position) = req.position {
            state.update_item_position(item_id, position);
        }
        if let Some(size) = req.size {
            state.update_item_size(item_id, size);
        }
        let item = state
            .items
            .iter()
            .find(|item| item.id == item_id)
            .cloned()
            .ok_or_else(|| AppError::Internal("Item vanished during update".to_string()))?;
        store.save(&state).await?;
        Ok(item)
    }

    pub async fn assign_section(
        board: &SharedBoard,
        store: &SnapshotStore,
        item_id: Uuid,
        req: AssignSectionRequest,
    ) -> AppResult<()> {
        let mut state = board.lock().await;
        if !state.has_item(item_id) {
            return Err(AppError::NotFound("Item not found".to_string()));
        }
        if !state.assign_item_to_section(item_id, req.section_id) {
            return Err(AppError::NotFound("Section not found".to_string()));
        }
        store.save(&state).await?;
        Ok(())
    }

    pub async fn remove_item(
        board: &SharedBoard,
        store: &SnapshotStore,
        item_id: Uuid,
    ) -> AppResult<()> {
        let mut state = board.lock().await;
        if !state.remove_item(item_id) {
            return Err(AppError::NotFound("Item not found".to_string()));
        }
        store.save(&state).await?;
        Ok(())
    }

    pub async fn create_section(
        board: &SharedBoard,
        store: &SnapshotStore,
        req: CreateSectionRequest,
    ) -> AppResult<Section> {
        validate_position(&req.position)?;
        let size = req.size.unwrap_or(DEFAULT_SECTION_SIZE);
        validate_size(&size)?;

        let mut state = board.lock().await;
        let section = state.add_section_rect(req.position, size).clone();
        store.save(&state).await?;
        Ok(section)
    }

    pub async fn update_section(
        board: &SharedBoard,
        store: &SnapshotStore,
        section_id: Uuid,
        req: UpdateSectionRequest,
    ) -> AppResult<Section> {
        if let Some(position) = &req.position {
            validate_position(position)?;
        }
        if let Some(size) = &req.size {
            validate_size(size)?;
        }

        let mut state = board.lock().await;
        if !state.has_section(section_id) {
            return Err(AppError::NotFound("Section not found".to_string()));
        }
        if let Some(position) = req.position {
            state.update_section_position(section_id, position);
        }
        if let Some(size) = req.size {
            state.update_section_size(section_id, size);
        }
        if let Some(title) = req.title {
            state.update_section_title(section_id, title);
        }
        if let Some(color) = req.color {
            state.update_section_color(section_id, color);
        }
        if let Some(collapsed) = req.collapsed {
            let section = state
                .sections
                .iter()
                .find(|section| section.id == section_id);
            if section.map(|section| section.collapsed) != Some(collapsed) {
                state.toggle_section_collapsed(section_id);
            }
        }
        let section = state
            .sections
            .iter()
            .find(|section| section.id == section_id)
            .cloned()
            .ok_or_else(|| AppError::Internal("Section vanished during update".to_string()))?;
        store.save(&state).await?;
        Ok(section)
    }

    pub async fn remove_section(
        board: &SharedBoard,
        store: &SnapshotStore,
        section_id: Uuid,
    ) -> AppResult<()> {
        let mut state = board.lock().await;
        if !state.remove_section(section_id) {
            return Err(AppError::NotFound("Section not found".to_string()));
        }
        store.save(&state).await?;
        Ok(())
    }

    pub async fn set_viewport(
        board: &SharedBoard,
        store: &SnapshotStore,
        req: ViewportRequest,
    ) -> AppResult<()> {
        if !req.zoom.is_finite() {
            return Err(AppError::ValidationError("Zoom must be finite".to_string()));
        }
        validate_position(&req.pan)?;

        let mut state = board.lock().await;
        state.set_zoom(req.zoom);
        state.set_pan(req.pan);
        store.save(&state).await?;
        Ok(())
    }

    pub async fn rename(
        board: &SharedBoard,
        store: &SnapshotStore,
        req: RenameBoardRequest,
    ) -> AppResult<()> {
        let name = req.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::ValidationError(
                "Board name is required".to_string(),
            ));
        }

        let mut state = board.lock().await;
        state.set_board_name(name);
        store.save(&state).await?;
        Ok(())
    }
}

fn validate_position(position: &crate::models::board::Position) -> AppResult<()> {
    if !position.x.is_finite() || !position.y.is_finite() {
        return Err(AppError::ValidationError(
            "Coordinates must be finite".to_string(),
        ));
    }
    Ok(())
}

fn validate_size(size: &crate::models::board::Size) -> AppResult<()> {
    if !size.width.is_finite() || !size.height.is_finite() || size.width < 0.0 || size.height < 0.0
    {
        return Err(AppError::ValidationError(
            "Size must be finite and non-negative".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::board::Position;

    fn fixture() -> (SharedBoard, SnapshotStore) {
        let path = std::env::temp_dir().join(format!("board-{}.json", Uuid::new_v4()));
        (
            Arc::new(Mutex::new(BoardState::default())),
            SnapshotStore::new(path),
        )
    }

    fn manual_item(position: Position) -> CreateItemRequest {
        CreateItemRequest {
            title: "Linen shirt".to_string(),
            price: None,
            currency: None,
            image_url: None,
            store: None,
            description: None,
            sizes: Vec::new(),
            colors: Vec::new(),
            url: None,
            position,
        }
    }

    #[tokio::test]
    async fn manual_items_get_marker_url_and_store() {
        let (board, store) = fixture();
        let item = BoardService::create_item(&board, &store, manual_item(Position::new(5.0, 5.0)))
            .await
            .unwrap();

        assert_eq!(item.url, MANUAL_ITEM_URL);
        assert_eq!(item.product.store, MANUAL_ITEM_STORE);
        assert_eq!(item.product.price, PRICE_NOT_FOUND);
        assert!(BoardService::snapshot(&board).await.has_item(item.id));
    }

    #[tokio::test]
    async fn items_with_a_url_derive_their_store_from_it() {
        let (board, store) = fixture();
        let mut req = manual_item(Position::default());
        req.url = Some("https://www.zara.com/shirt".to_string());
        let item = BoardService::create_item(&board, &store, req).await.unwrap();
        assert_eq!(item.product.store, "zara.com");
    }

    #[tokio::test]
    async fn blank_titles_are_rejected() {
        let (board, store) = fixture();
        let mut req = manual_item(Position::default());
        req.title = "  ".to_string();
        let result = BoardService::create_item(&board, &store, req).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn non_finite_coordinates_are_rejected() {
        let (board, store) = fixture();
        let req = manual_item(Position::new(f64::NAN, 0.0));
        let result = BoardService::create_item(&board, &store, req).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn updating_a_missing_item_is_not_found() {
        let (board, store) = fixture();
        let result = BoardService::update_item(
            &board,
            &store,
            Uuid::new_v4(),
            UpdateItemRequest {
                position: Some(Position::default()),
                size: None,
            },
        )
        .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn assigning_to_an_unknown_section_is_not_found() {
        let (board, store) = fixture();
        let item = BoardService::create_item(&board, &store, manual_item(Position::default()))
            .await
            .unwrap();
        let result = BoardService::assign_section(
            &board,
            &store,
            item.id,
            AssignSectionRequest {
                section_id: Some(Uuid::new_v4()),
            },
        )
        .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn section_updates_apply_all_provided_fields() {
        let (board, store) = fixture();
        let section = BoardService::create_section(
            &board,
            &store,
            CreateSectionRequest {
                position: Position::default(),
                size: None,
            },
        )
        .await
        .unwrap();

        let updated = BoardService::update_section(
            &board,
            &store,
            section.id,
            UpdateSectionRequest {
                position: None,
                size: None,
                title: Some("Shoes".to_string()),
                color: Some("#fef3c7".to_string()),
                collapsed: Some(true),
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.title, "Shoes");
        assert_eq!(updated.color, "#fef3c7");
        assert!(updated.collapsed);

        // Idempotent: setting collapsed=true again does not toggle it back.
        let again = BoardService::update_section(
            &board,
            &store,
            section.id,
            UpdateSectionRequest {
                position: None,
                size: None,
                title: None,
                color: None,
                collapsed: Some(true),
            },
        )
        .await
        .unwrap();
        assert!(again.collapsed);
    }

    #[tokio::test]
    async fn viewport_updates_clamp_zoom_and_persist() {
        let (board, store) = fixture();
        BoardService::set_viewport(
            &board,
            &store,
            ViewportRequest {
                zoom: 9.0,
                pan: Position::new(-40.0, 12.0),
            },
        )
        .await
        .unwrap();

        let state = BoardService::snapshot(&board).await;
        assert_eq!(state.zoom, 3.0);
        assert_eq!(state.pan.x, -40.0);

        let reloaded = store.load().await;
        assert_eq!(reloaded.zoom, 3.0);
    }

    #[tokio::test]
    async fn rename_trims_and_rejects_blank_names() {
        let (board, store) = fixture();
        BoardService::rename(
            &board,
            &store,
            RenameBoardRequest {
                name: "  Capsule wardrobe  ".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(
            BoardService::snapshot(&board).await.board_name,
            "Capsule wardrobe"
        );

        let result = BoardService::rename(
            &board,
            &store,
            RenameBoardRequest {
                name: " ".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn removing_a_section_detaches_its_items() {
        let (board, store) = fixture();
        let item = BoardService::create_item(&board, &store, manual_item(Position::default()))
            .await
            .unwrap();
        let section = BoardService::create_section(
            &board,
            &store,
            CreateSectionRequest {
                position: Position::default(),
                size: None,
            },
        )
        .await
        .unwrap();
        BoardService::assign_section(
            &board,
            &store,
            item.id,
            AssignSectionRequest {
                section_id: Some(section.id),
            },
        )
        .await
        .unwrap();

        BoardService::remove_section(&board, &store, section.id)
            .await
            .unwrap();

        let state = BoardService::snapshot(&board).await;
        assert!(state.has_item(item.id));
        assert!(state.items[0].section_id.is_none());
        assert!(state.sections.is_empty());
    }
}
