pub mod base;
// global configurations
pub mod config;
// rule check slots
pub mod flow;
// statistic nodes of resources
pub mod stat;
