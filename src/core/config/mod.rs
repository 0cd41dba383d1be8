//! Global configurations, resolved from the defaults, a YAML file and the system environment.

mod base;
pub mod constant;
mod entity;

pub use base::*;
pub use constant::*;
pub use entity::*;
