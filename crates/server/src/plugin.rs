//! Plugin registration.
//!
//! The viewer does not run a server of its own. A host hands it a
//! [`PluginApi`] and the plugin contributes its three routes through it.
//! [`RouterHost`] is the in-process host used by the standalone binary and
//! by tests.

use axum::{
    Router,
    routing::{MethodRouter, any, get},
};
use logs_viewer_core::LogFiles;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::routes;

pub const VIEWER_PATH: &str = "/logs";
pub const API_PATH: &str = "/logs/api";
pub const CLEAR_PATH: &str = "/logs/api/clear";

/// Where the host serves the viewer when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://localhost:8004";

/// A route contributed to the host, with its state already bound.
pub struct HttpRoute {
    pub path: &'static str,
    pub handler: MethodRouter,
}

/// What a host offers to plugins: route registration and a logger.
pub trait PluginApi {
    fn register_http_route(&mut self, route: HttpRoute);

    fn log_info(&self, message: &str) {
        tracing::info!("{message}");
    }
}

/// The logs viewer plugin.
#[derive(Debug, Clone)]
pub struct LogsViewerPlugin {
    files: LogFiles,
    base_url: String,
}

impl LogsViewerPlugin {
    pub const ID: &'static str = "logs-viewer";
    pub const NAME: &'static str = "Logs Viewer";
    pub const DESCRIPTION: &'static str =
        "Web UI for viewing LLM payload logs and raw streams";

    pub fn new(files: LogFiles) -> Self {
        Self {
            files,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Base URL announced in the startup log line.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn files(&self) -> &LogFiles {
        &self.files
    }

    pub fn routes(&self) -> Vec<HttpRoute> {
        vec![
            HttpRoute {
                path: VIEWER_PATH,
                handler: any(routes::viewer::page),
            },
            HttpRoute {
                path: API_PATH,
                handler: get(routes::logs::list_entries)
                    .layer(permissive_cors())
                    .with_state(self.files.clone()),
            },
            HttpRoute {
                path: CLEAR_PATH,
                handler: any(routes::clear::clear)
                    .layer(permissive_cors())
                    .with_state(self.files.clone()),
            },
        ]
    }

    pub fn register<A: PluginApi + ?Sized>(&self, api: &mut A) {
        let routes = self.routes();
        let count = routes.len();
        for route in routes {
            api.register_http_route(route);
        }

        api.log_info(&format!(
            "[{}] Plugin registered: {count} http routes",
            Self::ID
        ));
        api.log_info(&format!(
            "[{}] Logs viewer available at: {}{VIEWER_PATH}",
            Self::ID,
            self.base_url
        ));
    }
}

fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// In-process host that collects registered routes into an axum [`Router`].
#[derive(Default)]
pub struct RouterHost {
    router: Router,
}

impl RouterHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_router(self) -> Router {
        self.router.layer(TraceLayer::new_for_http())
    }
}

impl PluginApi for RouterHost {
    fn register_http_route(&mut self, route: HttpRoute) {
        let router = std::mem::take(&mut self.router);
        self.router = router.route(route.path, route.handler);
    }
}
