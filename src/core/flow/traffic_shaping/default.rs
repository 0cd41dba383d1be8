use super::{Calculator, Checker, Rule};
use crate::base::{BlockType, StatNode, TokenResult};
use crate::flow::MetricType;
use std::sync::Arc;

/// Provide a determined threshold
#[derive(Debug)]
pub struct DirectCalculator {
    threshold: f64,
}

impl DirectCalculator {
    pub fn new(threshold: f64) -> Self {
        DirectCalculator { threshold }
    }
}

impl Calculator for DirectCalculator {
    fn calculate_allowed_threshold(
        &self,
        _stat_node: Option<Arc<dyn StatNode>>,
        _batch_count: u32,
        _flag: i32,
    ) -> f64 {
        self.threshold
    }
}

/// Directly reject
#[derive(Debug)]
pub struct RejectChecker {
    rule: Arc<Rule>,
}

impl RejectChecker {
    pub fn new(rule: Arc<Rule>) -> Self {
        RejectChecker { rule }
    }
}

impl Checker for RejectChecker {
    fn do_check(
        &self,
        stat_node: Option<Arc<dyn StatNode>>,
        batch_count: u32,
        threshold: f64,
    ) -> TokenResult {
        let stat_node = match stat_node {
            Some(stat_node) => stat_node,
            None => return TokenResult::new_pass(),
        };
        let cur_count = match self.rule.metric_type {
            MetricType::Concurrency => stat_node.current_concurrency() as f64,
            MetricType::Qps => stat_node.pass_qps(),
        };
        if cur_count + batch_count as f64 > threshold {
            TokenResult::new_blocked_with_cause(
                BlockType::Flow,
                "Flow".into(),
                self.rule.clone(),
                Arc::new(cur_count),
            )
        } else {
            TokenResult::new_pass()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::MockStatNode;

    fn reject_checker(metric_type: MetricType) -> RejectChecker {
        RejectChecker::new(Arc::new(Rule {
            resource: "abc".into(),
            metric_type,
            threshold: 10.0,
            ..Default::default()
        }))
    }

    #[test]
    fn direct_threshold() {
        let calculator = DirectCalculator::new(100.0);
        assert!((calculator.calculate_allowed_threshold(None, 50, 1) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn reject_without_node() {
        let checker = reject_checker(MetricType::Qps);
        assert!(checker.do_check(None, 100, 10.0).is_pass());
    }

    #[test]
    fn reject_qps() {
        let checker = reject_checker(MetricType::Qps);
        let mut node = MockStatNode::new();
        node.expect_pass_qps().return_const(9.0f64);
        node.expect_current_concurrency().never();
        let node: Arc<dyn StatNode> = Arc::new(node);
        assert!(checker.do_check(Some(node.clone()), 1, 10.0).is_pass());

        let result = checker.do_check(Some(node), 2, 10.0);
        assert!(result.is_blocked());
        let block_err = result.block_err().unwrap();
        assert_eq!(block_err.block_type(), BlockType::Flow);
        assert_eq!(block_err.block_msg(), "Flow");
        assert_eq!(block_err.triggered_rule().unwrap().resource_name(), "abc");
        let value = block_err.triggered_value().unwrap();
        assert_eq!(value.as_ref().as_any().downcast_ref::<f64>(), Some(&9.0));
    }

    #[test]
    fn reject_concurrency() {
        let checker = reject_checker(MetricType::Concurrency);
        let mut node = MockStatNode::new();
        node.expect_current_concurrency().return_const(10u32);
        node.expect_pass_qps().never();
        let node: Arc<dyn StatNode> = Arc::new(node);
        assert!(checker.do_check(Some(node.clone()), 1, 10.0).is_blocked());
        assert!(checker.do_check(Some(node), 1, 11.0).is_pass());
    }
}
