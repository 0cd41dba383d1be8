//! Package flow implements the flow shaping control.
//!
//! The traffic shaping `Controller` of a rule consists of two parts: `Calculator` and `Checker`
//!
//!  1. `Calculator` calculates the actual traffic shaping token threshold. Currently, Sentinel supports the Direct strategy.
//!  2. `Checker` performs checking logic according to current metrics and the traffic shaping strategy, then yield the token result. Currently, Sentinel supports the Reject control behavior.
//!
//! Besides, Sentinel supports customized controllers. User could call function `set_traffic_shaping_generator()` to register the generator of a `ControlBehavior::Custom` behavior
//! and call function `remove_traffic_shaping_generator()` to unregister it.
//! There are a few notes users need to be aware of:
//!
//!  1. Users can not override the generators of the reserved control behaviors.
//!  2. The generators are called with the write lock of the rule manager held, they should not call the functions of this module.
//!  3. A change of the generators takes effect on the next rule update.
//!

pub mod rule;
pub mod rule_manager;
pub mod slot;
pub mod traffic_shaping;

pub use rule::*;
pub use rule_manager::*;
pub use slot::*;
pub use traffic_shaping::*;
