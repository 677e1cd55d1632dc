pub mod group;
pub mod state;
pub mod text;
pub mod thread;

pub use group::{RunGroup, SessionGroup, group_by_session, session_display_name, short_id};
pub use state::{RefreshMode, Render, Transition, UiEvent, ViewState, reduce};
pub use thread::{ThreadLayout, message_role};
