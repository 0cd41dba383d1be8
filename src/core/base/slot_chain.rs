use super::{EntryContext, TokenResult};
use std::sync::Arc;

/// SlotChain sorts all its slots by ascending order value.
pub trait BaseSlot: Send + Sync {
    /// order returns the sort value of the slot.
    fn order(&self) -> u32 {
        0
    }
}

/// RuleCheckSlot is rule based checking strategy
/// All checking rule must implement this interface.
pub trait RuleCheckSlot: BaseSlot {
    // check function does some validation
    // It can break off the slot pipeline
    // The result is also recorded in the context
    fn check(&self, ctx: &mut EntryContext) -> TokenResult {
        ctx.rule_check_result.clone()
    }
}

/// SlotChain holds the rule check slots, in ascending order by `RuleCheckSlot::order()`.
#[derive(Default)]
pub struct SlotChain {
    pub(crate) rule_checks: Vec<Arc<dyn RuleCheckSlot>>,
}

impl SlotChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// add_rule_check_slot is non-thread safe, guard the chain by a lock when sharing it.
    pub fn add_rule_check_slot(&mut self, s: Arc<dyn RuleCheckSlot>) {
        self.rule_checks.push(s);
        self.rule_checks.sort_by_key(|a| a.order());
    }

    /// Runs the rule check slots in order and stops at the first blocked one.
    pub fn entry(&self, ctx: &mut EntryContext) -> TokenResult {
        for s in &self.rule_checks {
            let res = s.check(ctx);
            if res.is_blocked() {
                ctx.rule_check_result = res.clone();
                return res;
            }
        }
        ctx.rule_check_result = TokenResult::new_pass();
        TokenResult::new_pass()
    }
}
