pub mod action;
pub mod session;

pub use action::{Action, NextActions, Verb};
pub use session::{Message, SessionState, Severity, User, Voucher};
