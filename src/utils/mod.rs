// Utils compartidos

pub mod constants;
pub mod timers;
pub mod zxing_ffi;

pub use constants::*;
pub use timers::*;
