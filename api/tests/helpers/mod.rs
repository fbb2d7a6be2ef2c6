pub mod app;

pub use app::{make_test_app, send};
pub use fixtures::{World, seed_world};
