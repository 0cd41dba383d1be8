//! Fundamental types shared by the core components,
//! including the check results, the block errors, the statistic node contract and the entry context.

mod block_error;
pub mod constant;
mod context;
mod resource;
mod result;
mod rule;
mod slot_chain;
mod stat;

pub use block_error::*;
pub use constant::*;
pub use context::*;
pub use resource::*;
pub use result::*;
pub use rule::*;
pub use slot_chain::*;
pub use stat::*;
