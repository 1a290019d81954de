pub mod animation;
pub mod drag;
pub mod layout;
pub mod piece;
pub mod spawn;
