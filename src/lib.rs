//! Moodboard server: heuristic product-metadata extraction plus a canvas
//! board engine.
//!
//! The binary wires [`app::run`] to an axum service; the `board`, `extract`
//! and `models` modules are usable as a library by canvas hosts that drive
//! the gesture and camera APIs directly.

pub mod api;
pub mod app;
pub mod board;
pub mod dto;
pub mod error;
pub mod extract;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod usecases;
