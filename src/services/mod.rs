pub mod action_dispatcher;
pub mod api_client;
pub mod session_client;

pub use action_dispatcher::{expand_url, resolve, ActionCall, ActionDispatcher};
pub use api_client::{absolute_url, ApiClient, HttpReply, HttpTransport, PreparedRequest};
pub use session_client::{RoundTrip, SessionClient};
