//! HTTP surface of the logs viewer.
//!
//! Three routes, all re-deriving their state from disk on every request:
//!
//! | Route | Method | Response |
//! |---|---|---|
//! | `/logs` | any | viewer page (HTML with inline script) |
//! | `/logs/api?type=payload\|raw&limit=N` | GET | `{file, total, entries}` |
//! | `/logs/api/clear?type=payload\|raw\|all` | POST | `{success, deleted}` / `{success: false, error}` |

mod error;
pub mod plugin;
mod routes;

pub use error::ClearFailure;
pub use plugin::{
    API_PATH, CLEAR_PATH, DEFAULT_BASE_URL, HttpRoute, LogsViewerPlugin, PluginApi, RouterHost,
    VIEWER_PATH,
};

/// Router serving the plugin's routes, as the standalone host mounts them.
pub fn router(plugin: &LogsViewerPlugin) -> axum::Router {
    let mut host = RouterHost::new();
    plugin.register(&mut host);
    host.into_router()
}
