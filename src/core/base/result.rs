//! Result
//!
use super::{BlockError, SentinelRule, Snapshot};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    /// sentinel internal error
    Unknown,
    Flow,
    CircuitBreaking,
}

impl Default for BlockType {
    fn default() -> Self {
        Self::Unknown
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// `TokenResult` is the outcome of a rule check.
/// `Wait` carries the milliseconds the caller should wait before going on.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenResult {
    Pass,
    Blocked(BlockError),
    Wait(u64),
}

impl Default for TokenResult {
    fn default() -> Self {
        TokenResult::Pass
    }
}

impl TokenResult {
    pub fn new_pass() -> Self {
        Self::default()
    }

    pub fn new_should_wait(wait_ms: u64) -> Self {
        Self::Wait(wait_ms)
    }

    pub fn new_blocked(block_type: BlockType) -> Self {
        Self::Blocked(BlockError::new(block_type))
    }

    pub fn new_blocked_with_msg(block_type: BlockType, block_msg: String) -> Self {
        Self::Blocked(BlockError::new_with_msg(block_type, block_msg))
    }

    pub fn new_blocked_with_cause(
        block_type: BlockType,
        block_msg: String,
        rule: Arc<dyn SentinelRule>,
        snapshot_value: Arc<Snapshot>,
    ) -> Self {
        Self::Blocked(BlockError::new_with_cause(
            block_type,
            block_msg,
            rule,
            snapshot_value,
        ))
    }

    pub fn reset_to_pass(&mut self) {
        *self = Self::new_pass();
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked(_))
    }

    pub fn is_wait(&self) -> bool {
        matches!(self, Self::Wait(_))
    }

    pub fn block_err(&self) -> Option<BlockError> {
        match self {
            Self::Blocked(err) => Some(err.clone()),
            _ => None,
        }
    }

    pub fn wait_ms(&self) -> u64 {
        match self {
            Self::Wait(ms) => *ms,
            _ => 0,
        }
    }
}

impl fmt::Display for TokenResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenResult::Pass => write!(f, "TokenResult::Pass"),
            TokenResult::Blocked(block_err) => write!(f, "TokenResult::Blocked: {}", block_err),
            TokenResult::Wait(wait_ms) => write!(f, "TokenResult::Wait: {} ms", wait_ms),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn status() {
        let pass = TokenResult::new_pass();
        assert!(pass.is_pass());
        assert!(pass.block_err().is_none());
        assert_eq!(pass.wait_ms(), 0);

        let wait = TokenResult::new_should_wait(50);
        assert!(wait.is_wait());
        assert_eq!(wait.wait_ms(), 50);

        let mut blocked = TokenResult::new_blocked_with_msg(BlockType::Flow, "Flow".into());
        assert!(blocked.is_blocked());
        assert_eq!(blocked.block_err().unwrap().block_type(), BlockType::Flow);
        blocked.reset_to_pass();
        assert!(blocked.is_pass());
    }

    #[test]
    fn display() {
        assert_eq!(TokenResult::new_pass().to_string(), "TokenResult::Pass");
        assert_eq!(
            TokenResult::new_should_wait(10).to_string(),
            "TokenResult::Wait: 10 ms"
        );
        assert_eq!(
            TokenResult::new_blocked_with_msg(BlockType::Flow, "Flow".into()).to_string(),
            "TokenResult::Blocked: SentinelBlockError: Flow, message: Flow"
        );
        assert_eq!(BlockType::CircuitBreaking.to_string(), "CircuitBreaking");
    }
}
