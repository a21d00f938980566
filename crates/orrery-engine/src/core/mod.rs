pub mod scene;
pub mod time;
pub mod transform;
