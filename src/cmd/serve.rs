//! Dashboard API server: `hireboard serve`.

use std::sync::Arc;

use anyhow::Result;

use hireboard::board_config::BoardConfig;
use hireboard::dashboard::{AppState, ServerConfig, start_server};
use hireboard::pipeline::Board;
use hireboard::store::open_store;

pub async fn cmd_serve(config: &BoardConfig, port: Option<u16>, dev: bool) -> Result<()> {
    let store = open_store(config)?;
    let state = Arc::new(AppState::new(
        store,
        Board::with_headers(config.headers()),
        config.upcoming_limit(),
    ));

    start_server(
        ServerConfig {
            port: port.unwrap_or_else(|| config.port()),
            dev_mode: dev,
        },
        state,
    )
    .await
}
