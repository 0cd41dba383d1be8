//! # Sentinel Flow
//!
//! The flow control core of Sentinel. Given a resource name and a batch count,
//! it decides whether the request passes, gets blocked, or should wait for a while,
//! based on the live statistics of the resource and a set of hot-reloadable flow rules.
//!
//! Generally, there are several steps when using it:
//! 1. Initialize configurations, see `api::init_default()`.
//! 2. Publish the statistic nodes of your resources, see `stat::register_resource_node()`.
//! 3. Load the flow rules defined for each resource, see `flow::load_rules()`.
//! 4. Check the resource at the entry point of the protected logic.
//!
//! ```rust
//! use sentinel_flow::{api, flow};
//! use std::sync::Arc;
//!
//! api::init_default().unwrap_or_else(|err| sentinel_flow::logging::error!("{:?}", err));
//! flow::load_rules(vec![Arc::new(flow::Rule {
//!     resource: "example".into(),
//!     threshold: 10.0,
//!     metric_type: flow::MetricType::Qps,
//!     control_behavior: flow::ControlBehavior::Reject,
//!     ..Default::default()
//! })])
//! .unwrap();
//! if api::check("example", 1).is_pass() {
//!     // The request is allowed to be processed.
//! } else {
//!     // The request is blocked.
//! }
//! ```
//!
//! Rules can also be delivered by a dynamic datasource. Replace the rule property with
//! `flow::register_rule_property()`, or feed JSON payloads through `datasource::new_flow_rule_handler()`.

/// Sentinel API
pub mod api;
/// Core implementations, including the rule manager of flow control,
/// the statistic node storage and the global configurations.
pub mod core;
/// Property publishers and handlers used to deliver rules dynamically.
pub mod datasource;
/// Adapters for different logging crates.
pub mod logging;
// Utility functions.
pub mod utils;

// re-export precludes
pub use crate::core::*;
pub use api::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
