pub mod belt;
pub mod door;
pub mod orbit;
pub mod ship;
pub mod target;
