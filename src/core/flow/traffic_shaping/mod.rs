//! Traffic Shaping Policy

/// Default calculator and checker
pub mod default;

pub use default::*;

use super::Rule;
use crate::base::{StatNode, TokenResult};
use std::fmt;
use std::sync::Arc;

/// Traffic Shaping `Calculator` calculates the actual traffic shaping threshold
/// based on the threshold of rule and the traffic shaping strategy.
pub trait Calculator: Send + Sync + fmt::Debug {
    fn calculate_allowed_threshold(
        &self,
        stat_node: Option<Arc<dyn StatNode>>,
        batch_count: u32,
        flag: i32,
    ) -> f64;
}

/// Traffic Shaping `Checker` performs checking according to current metrics and the traffic
/// shaping strategy, then yield the token result.
/// A missing statistic node must never lead to a blocked result.
pub trait Checker: Send + Sync + fmt::Debug {
    fn do_check(
        &self,
        stat_node: Option<Arc<dyn StatNode>>,
        batch_count: u32,
        threshold: f64,
    ) -> TokenResult;
}

/// `Controller` binds a rule to the calculator and checker of its control behavior.
/// It is immutable once built, a rule update always generates new controllers.
#[derive(Debug)]
pub struct Controller {
    rule: Arc<Rule>,
    calculator: Box<dyn Calculator>,
    checker: Box<dyn Checker>,
}

impl Controller {
    pub fn new(
        rule: Arc<Rule>,
        calculator: Box<dyn Calculator>,
        checker: Box<dyn Checker>,
    ) -> Self {
        Controller {
            rule,
            calculator,
            checker,
        }
    }

    pub fn rule(&self) -> &Arc<Rule> {
        &self.rule
    }

    pub fn calculator(&self) -> &dyn Calculator {
        self.calculator.as_ref()
    }

    pub fn checker(&self) -> &dyn Checker {
        self.checker.as_ref()
    }

    pub fn can_pass(
        &self,
        stat_node: Option<Arc<dyn StatNode>>,
        batch_count: u32,
        flag: i32,
    ) -> TokenResult {
        let allowed_threshold =
            self.calculator
                .calculate_allowed_threshold(stat_node.clone(), batch_count, flag);
        self.checker
            .do_check(stat_node, batch_count, allowed_threshold)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::{BlockType, MockStatNode};
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingChecker {
        thresholds: Mutex<Vec<f64>>,
    }

    impl Checker for RecordingChecker {
        fn do_check(
            &self,
            stat_node: Option<Arc<dyn StatNode>>,
            _batch_count: u32,
            threshold: f64,
        ) -> TokenResult {
            self.thresholds.lock().unwrap().push(threshold);
            match stat_node {
                Some(_) => TokenResult::new_blocked(BlockType::Flow),
                None => TokenResult::new_pass(),
            }
        }
    }

    #[derive(Debug)]
    struct HalfCalculator(f64);

    impl Calculator for HalfCalculator {
        fn calculate_allowed_threshold(
            &self,
            _stat_node: Option<Arc<dyn StatNode>>,
            _batch_count: u32,
            _flag: i32,
        ) -> f64 {
            self.0 / 2.0
        }
    }

    #[derive(Debug)]
    struct SharedChecker(Arc<RecordingChecker>);

    impl Checker for SharedChecker {
        fn do_check(
            &self,
            stat_node: Option<Arc<dyn StatNode>>,
            batch_count: u32,
            threshold: f64,
        ) -> TokenResult {
            self.0.do_check(stat_node, batch_count, threshold)
        }
    }

    #[test]
    fn checker_gets_calculated_threshold() {
        let recorder = Arc::new(RecordingChecker::default());
        let tc = Controller::new(
            Arc::new(Rule {
                resource: "abc".into(),
                threshold: 10.0,
                ..Default::default()
            }),
            Box::new(HalfCalculator(10.0)),
            Box::new(SharedChecker(recorder.clone())),
        );
        assert!(tc.can_pass(None, 1, 0).is_pass());
        let node: Arc<dyn StatNode> = Arc::new(MockStatNode::new());
        assert!(tc.can_pass(Some(node), 1, 0).is_blocked());
        assert_eq!(*recorder.thresholds.lock().unwrap(), vec![5.0, 5.0]);
        assert_eq!(tc.rule().resource, "abc");
    }
}
