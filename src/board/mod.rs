pub mod camera;
pub mod gesture;
pub mod state;
