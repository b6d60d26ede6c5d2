//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module       | Commands handled                                  |
//! |--------------|---------------------------------------------------|
//! | `board`      | `Board show`, `Board move`                        |
//! | `candidates` | `Candidates list`                                 |
//! | `metrics`    | `Metrics`                                         |
//! | `openings`   | `Openings list/create/update/delete`              |
//! | `interviews` | `Interviews`                                      |
//! | `seed`       | `Seed`                                            |
//! | `serve`      | `Serve`                                           |
//! | `config`     | `Config`                                          |

pub mod board;
pub mod candidates;
pub mod config;
pub mod interviews;
pub mod metrics;
pub mod openings;
pub mod seed;
pub mod serve;

pub use board::{cmd_board_move, cmd_board_show};
pub use candidates::cmd_candidates_list;
pub use config::cmd_config;
pub use interviews::cmd_interviews;
pub use metrics::cmd_metrics;
pub use openings::cmd_openings;
pub use seed::cmd_seed;
pub use serve::cmd_serve;
