pub mod board_config;
pub mod dashboard;
pub mod errors;
pub mod logging;
pub mod pipeline;
pub mod store;
pub mod util;
