//! Terminal workspace using ratatui.
//!
//! The workspace is a small set of screens: a landing page with the input
//! mode cards and session history, plus one screen per input mode. All async
//! work (summarize calls, the sample fetch) is spawned onto the runtime and
//! completions come back through the app's event channel, so the interface
//! stays responsive while a request is in flight.

pub mod app;
mod screens;

use std::sync::Arc;

use crate::client::HttpAnalysisClient;
use crate::config::Config;

use app::App;

/// Runs the TUI until the user quits.
pub async fn run(config: &Config) -> anyhow::Result<()> {
    let client = Arc::new(HttpAnalysisClient::new(config.server.base_url.clone())?);

    let mut terminal = ratatui::init();
    let result = App::new(client).run(&mut terminal).await;
    ratatui::restore();
    result
}
