//! mod `api` provides the topmost fundamental APIs for users using sentinel-flow.
//! Users should initialize Sentinel before loading Sentinel rules. Sentinel support three ways to perform initialization:
//!
//!  1. `init_default()`, using default config to initialize.
//!  2. `init_with_config(config_entity: config::ConfigEntity)`, using customized config entity to initialize.
//!  3. `init_with_config_file(config_path: &mut String)`, using yaml file to initialize.
//!
//! Then check the resource by `check()` or `EntryBuilder`.

mod base;
mod init;
mod slot_chain;

pub use base::*;
pub use init::*;
pub use slot_chain::*;
