pub mod layout;
pub mod render;

pub use layout::*;
pub use render::*;
