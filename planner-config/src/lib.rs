//! Configuration for planner
//!
//! Values are layered with figment, later sources overriding earlier ones:
//!
//! 1. Built-in defaults (`db_dir = "db"`, `out_dir = "out"`)
//! 2. `planner.toml`, `planner.yaml`, `planner.json` in the working directory
//! 3. `PLANNER_*` environment variables (`PLANNER_DB_DIR`, `PLANNER_OUT_DIR`, `PLANNER_ACTOR`)
//!
//! Command line flags are applied on top by the caller.

mod config;
mod error;

pub use config::{PlannerConfig, CONFIG_FILE_STEM, ENV_PREFIX};
pub use error::{ConfigError, ConfigResult};
