use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{delete, get, patch, post, put},
};
use tower_http::cors::{Any, CorsLayer};

use crate::{
    api::http::{board as board_http, health as health_http, scrape as scrape_http},
    app::state::AppState,
    telemetry,
};

const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

pub fn build_router(state: AppState) -> Router {
    let mut cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let origin =
        std::env::var("CORS_ALLOW_ORIGIN").unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string());
    cors = if origin == "*" {
        cors.allow_origin(Any)
    } else {
        match origin.parse::<HeaderValue>() {
            Ok(value) => cors.allow_origin(value),
            Err(_) => {
                tracing::warn!(origin, "Invalid CORS origin, allowing any");
                cors.allow_origin(Any)
            }
        }
    };

    Router::new()
        .route("/api/health", get(health_http::health_handle))
        .route("/api/scrape", post(scrape_http::scrape_handle))
        .route("/api/board", get(board_http::get_board_handle))
        .route("/api/board/items", post(board_http::create_item_handle))
        .route(
            "/api/board/items/{item_id}",
            patch(board_http::update_item_handle),
        )
        .route(
            "/api/board/items/{item_id}",
            delete(board_http::delete_item_handle),
        )
        .route(
            "/api/board/items/{item_id}/section",
            put(board_http::assign_section_handle),
        )
        .route(
            "/api/board/sections",
            post(board_http::create_section_handle),
        )
        .route(
            "/api/board/sections/{section_id}",
            patch(board_http::update_section_handle),
        )
        .route(
            "/api/board/sections/{section_id}",
            delete(board_http::delete_section_handle),
        )
        .route(
            "/api/board/viewport",
            put(board_http::set_viewport_handle),
        )
        .route("/api/board/name", put(board_http::rename_board_handle))
        .layer(middleware::from_fn(telemetry::request_logging_middleware))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header::CONTENT_TYPE};
    use serde_json::{Value, json};
    use tower::util::ServiceExt;

    use crate::board::state::BoardState;
    use crate::services::store::SnapshotStore;

    fn test_router() -> Router {
        let path = std::env::temp_dir().join(format!("router-{}.json", uuid::Uuid::new_v4()));
        let state = AppState::new(BoardState::default(), SnapshotStore::new(path)).unwrap();
        build_router(state)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let router = test_router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn scrape_rejects_invalid_urls_with_error_envelope() {
        let router = test_router();
        let response = router
            .oneshot(json_request(
                "POST",
                "/api/scrape",
                json!({ "url": "not a url" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn item_lifecycle_round_trips_through_the_api() {
        let router = test_router();

        let created = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/board/items",
                json!({
                    "title": "Wool coat",
                    "price": "$240",
                    "position": { "x": 12.0, "y": 34.0 }
                }),
            ))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let item = body_json(created).await;
        let item_id = item["id"].as_str().unwrap().to_string();
        assert_eq!(item["title"], "Wool coat");
        assert_eq!(item["url"], "#");
        assert_eq!(item["store"], "Manual");

        let board = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/board")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(board.status(), StatusCode::OK);
        let board = body_json(board).await;
        assert_eq!(board["items"].as_array().unwrap().len(), 1);
        assert_eq!(board["boardName"], "My Clothing Board");

        let moved = router
            .clone()
            .oneshot(json_request(
                "PATCH",
                &format!("/api/board/items/{item_id}"),
                json!({ "position": { "x": 99.0, "y": 1.0 } }),
            ))
            .await
            .unwrap();
        assert_eq!(moved.status(), StatusCode::OK);
        let moved = body_json(moved).await;
        assert_eq!(moved["position"]["x"], 99.0);

        let deleted = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/board/items/{item_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

        let missing = router
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/board/items/{item_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn sections_can_group_items_over_http() {
        let router = test_router();

        let section = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/board/sections",
                json!({ "position": { "x": 0.0, "y": 0.0 } }),
            ))
            .await
            .unwrap();
        assert_eq!(section.status(), StatusCode::CREATED);
        let section = body_json(section).await;
        let section_id = section["id"].as_str().unwrap().to_string();
        assert_eq!(section["title"], "New Section");

        let item = body_json(
            router
                .clone()
                .oneshot(json_request(
                    "POST",
                    "/api/board/items",
                    json!({ "title": "Boots", "position": { "x": 1.0, "y": 2.0 } }),
                ))
                .await
                .unwrap(),
        )
        .await;
        let item_id = item["id"].as_str().unwrap().to_string();

        let assigned = router
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/board/items/{item_id}/section"),
                json!({ "sectionId": section_id }),
            ))
            .await
            .unwrap();
        assert_eq!(assigned.status(), StatusCode::NO_CONTENT);

        let renamed = router
            .clone()
            .oneshot(json_request(
                "PATCH",
                &format!("/api/board/sections/{section_id}"),
                json!({ "title": "Footwear", "collapsed": true }),
            ))
            .await
            .unwrap();
        assert_eq!(renamed.status(), StatusCode::OK);
        let renamed = body_json(renamed).await;
        assert_eq!(renamed["title"], "Footwear");
        assert_eq!(renamed["collapsed"], true);

        let removed = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/board/sections/{section_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(removed.status(), StatusCode::NO_CONTENT);

        let board = body_json(
            router
                .oneshot(
                    Request::builder()
                        .uri("/api/board")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(board["items"][0]["sectionId"], Value::Null);
        assert!(board["sections"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn viewport_and_name_endpoints_validate_input() {
        let router = test_router();

        let ok = router
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/board/viewport",
                json!({ "zoom": 1.4, "pan": { "x": 10.0, "y": -5.0 } }),
            ))
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::NO_CONTENT);

        let blank = router
            .oneshot(json_request("PUT", "/api/board/name", json!({ "name": " " })))
            .await
            .unwrap();
        assert_eq!(blank.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
