pub mod collision;
pub mod effects;
pub mod render;
pub mod ship;
pub mod stepper;
