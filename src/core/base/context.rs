//! Context
//!
use super::{ResourceWrapper, StatNode, TokenResult};
use crate::utils::time::curr_time_millis;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct EntryContext {
    /// Use to calculate RT
    pub(crate) start_time: u64,
    pub(crate) res: ResourceWrapper,
    pub(crate) stat_node: Option<Arc<dyn StatNode>>,
    pub(crate) input: SentinelInput,
    /// the result of rule slots check
    pub(crate) rule_check_result: TokenResult,
}

impl EntryContext {
    pub fn new() -> Self {
        Self {
            start_time: curr_time_millis(),
            ..Self::default()
        }
    }

    pub fn start_time(&self) -> u64 {
        self.start_time
    }

    pub fn set_resource(&mut self, res: ResourceWrapper) {
        self.res = res;
    }

    pub fn resource(&self) -> &ResourceWrapper {
        &self.res
    }

    pub fn set_stat_node(&mut self, stat_node: Option<Arc<dyn StatNode>>) {
        self.stat_node = stat_node;
    }

    pub fn stat_node(&self) -> Option<Arc<dyn StatNode>> {
        self.stat_node.clone()
    }

    pub fn set_input(&mut self, input: SentinelInput) {
        self.input = input;
    }

    pub fn input(&self) -> &SentinelInput {
        &self.input
    }

    pub fn set_result(&mut self, result: TokenResult) {
        self.rule_check_result = result;
    }

    pub fn result(&self) -> &TokenResult {
        &self.rule_check_result
    }

    pub fn is_blocked(&self) -> bool {
        self.rule_check_result.is_blocked()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentinelInput {
    pub(crate) batch_count: u32,
    pub(crate) flag: i32,
}

impl Default for SentinelInput {
    fn default() -> Self {
        SentinelInput {
            batch_count: 1,
            flag: 0,
        }
    }
}

impl SentinelInput {
    pub fn new(batch_count: u32, flag: i32) -> Self {
        Self { batch_count, flag }
    }

    pub fn batch_count(&self) -> u32 {
        self.batch_count
    }

    pub fn flag(&self) -> i32 {
        self.flag
    }

    pub fn reset(&mut self) {
        *self = SentinelInput::default();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::base::BlockType;

    #[test]
    fn is_blocked() {
        let mut ctx = EntryContext::new();
        assert!(!ctx.is_blocked());
        ctx.set_result(TokenResult::new_blocked(BlockType::Flow));
        assert!(ctx.is_blocked());
    }

    #[test]
    fn input_defaults() {
        let mut input = SentinelInput::new(5, 2);
        assert_eq!(input.batch_count(), 5);
        assert_eq!(input.flag(), 2);
        input.reset();
        assert_eq!(input, SentinelInput::default());
        assert_eq!(input.batch_count(), 1);
    }
}
