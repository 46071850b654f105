pub mod board;
pub mod direction;
pub mod session;
pub mod shift;
pub mod spawner;
pub mod tile;
