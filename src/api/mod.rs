//! REST API over a simulated scenario.
//!
//! Endpoints:
//! - `GET /summary` — monthly table and payback of the loaded scenario
//! - `GET /detail` — hourly trace of the detail month, optional `from`/`to`
//! - `POST /simulate` — simulates a scenario sent as JSON and returns the result

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::config::ScenarioConfig;
use crate::error::ValidationError;
use crate::sim::runner::{Projection, SimulationOutput};

/// Immutable application state shared across all request handlers.
///
/// Built once from the scenario simulated at startup and wrapped in `Arc`.
/// `POST /simulate` does not replace it.
pub struct AppState {
    /// Scenario the state was simulated from.
    pub scenario: ScenarioConfig,
    pub output: SimulationOutput,
    pub projection: Projection,
}

impl AppState {
    /// Simulates `scenario` and keeps the result.
    ///
    /// # Errors
    ///
    /// Returns the scenario's first [`ValidationError`].
    pub fn from_scenario(scenario: ScenarioConfig) -> Result<Self, ValidationError> {
        let output = scenario.run()?;
        let projection = output.projection(scenario.economics.installation_cost);
        Ok(Self {
            scenario,
            output,
            projection,
        })
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/summary", get(handlers::get_summary))
        .route("/detail", get(handlers::get_detail))
        .route("/simulate", post(handlers::post_simulate))
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
