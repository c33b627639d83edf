// ============================================================================
// DOM MODULE - Helpers para manipulación DOM
// ============================================================================

pub mod builder;
pub mod element;
pub mod events;
pub mod surface;

#[cfg(test)]
pub(crate) mod testing;

pub use builder::*;
pub use element::*;
pub use events::*;
pub use surface::*;
