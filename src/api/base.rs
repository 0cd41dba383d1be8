use super::global_slot_chain;
use crate::base::{
    EntryContext, ResourceType, ResourceWrapper, SentinelInput, SlotChain, StatNode, TokenResult,
    TrafficType,
};
use crate::{stat, Error, Result};
use std::sync::Arc;

// EntryBuilder is the basic API of Sentinel.
pub struct EntryBuilder {
    resource_name: String,
    resource_type: ResourceType,
    traffic_type: TrafficType,
    batch_count: u32,
    flag: i32,
    stat_node: Option<Arc<dyn StatNode>>,
    slot_chain: Arc<SlotChain>,
}

impl EntryBuilder {
    pub fn new(resource_name: String) -> Self {
        EntryBuilder {
            resource_name,
            resource_type: ResourceType::default(),
            traffic_type: TrafficType::default(),
            batch_count: 1,
            flag: 0,
            stat_node: None,
            slot_chain: global_slot_chain(),
        }
    }

    /// `build()` would consume EntryBuilder.
    /// The statistic node registered for the resource is used, unless one is given by `with_stat_node()`.
    /// A blocked check returns the `BlockError` as the error.
    pub fn build(self) -> Result<EntryContext> {
        let mut ctx = EntryContext::new();
        let resource_name = &self.resource_name;
        let stat_node = match self.stat_node {
            Some(stat_node) => Some(stat_node),
            None => stat::get_resource_node(resource_name),
        };
        ctx.set_resource(ResourceWrapper::new(
            self.resource_name,
            self.resource_type,
            self.traffic_type,
        ));
        ctx.set_input(SentinelInput::new(self.batch_count, self.flag));
        ctx.set_stat_node(stat_node);

        match self.slot_chain.entry(&mut ctx) {
            TokenResult::Blocked(block_err) => Err(Error::new(block_err)),
            _ => Ok(ctx),
        }
    }

    pub fn with_resource_type(mut self, resource_type: ResourceType) -> Self {
        self.resource_type = resource_type;
        self
    }

    pub fn with_traffic_type(mut self, traffic_type: TrafficType) -> Self {
        self.traffic_type = traffic_type;
        self
    }

    pub fn with_batch_count(mut self, batch_count: u32) -> Self {
        self.batch_count = batch_count;
        self
    }

    pub fn with_flag(mut self, flag: i32) -> Self {
        self.flag = flag;
        self
    }

    pub fn with_stat_node(mut self, stat_node: Arc<dyn StatNode>) -> Self {
        self.stat_node = Some(stat_node);
        self
    }

    pub fn with_slot_chain(mut self, slot_chain: Arc<SlotChain>) -> Self {
        self.slot_chain = slot_chain;
        self
    }
}

/// `check` is the admission gate of a resource,
/// it checks the flow rules of the resource against its registered statistic node.
pub fn check(resource: &str, batch_count: u32) -> TokenResult {
    match EntryBuilder::new(resource.into())
        .with_batch_count(batch_count)
        .build()
    {
        Ok(ctx) => ctx.result().clone(),
        Err(err) => match err.downcast::<crate::base::BlockError>() {
            Ok(block_err) => TokenResult::Blocked(block_err),
            Err(_) => TokenResult::new_pass(),
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::base::{BaseSlot, BlockError, BlockType, MockStatNode, RuleCheckSlot};
    use crate::flow;
    use crate::utils::test_lock;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct RecordingSlot {
        block: bool,
        calls: AtomicUsize,
    }

    impl BaseSlot for RecordingSlot {}

    impl RuleCheckSlot for RecordingSlot {
        fn check(&self, ctx: &mut EntryContext) -> TokenResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(ctx.input().batch_count(), 3);
            assert_eq!(ctx.input().flag(), 7);
            assert_eq!(*ctx.resource().flow_type(), TrafficType::Inbound);
            if self.block {
                TokenResult::new_blocked_with_msg(BlockType::Flow, "Flow".into())
            } else {
                TokenResult::new_pass()
            }
        }
    }

    fn chain_of(slot: Arc<RecordingSlot>) -> Arc<SlotChain> {
        let mut sc = SlotChain::new();
        sc.add_rule_check_slot(slot);
        Arc::new(sc)
    }

    #[test]
    fn pass() {
        let slot = Arc::new(RecordingSlot {
            block: false,
            calls: AtomicUsize::new(0),
        });
        let ctx = EntryBuilder::new("abc".into())
            .with_traffic_type(TrafficType::Inbound)
            .with_batch_count(3)
            .with_flag(7)
            .with_slot_chain(chain_of(slot.clone()))
            .build()
            .unwrap();
        assert_eq!(ctx.resource().name(), "abc");
        assert!(ctx.result().is_pass());
        assert_eq!(slot.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn block() {
        let slot = Arc::new(RecordingSlot {
            block: true,
            calls: AtomicUsize::new(0),
        });
        let err = EntryBuilder::new("abc".into())
            .with_traffic_type(TrafficType::Inbound)
            .with_batch_count(3)
            .with_flag(7)
            .with_slot_chain(chain_of(slot.clone()))
            .build()
            .unwrap_err();
        let block_err = err.downcast_ref::<BlockError>().unwrap();
        assert_eq!(block_err.block_type(), BlockType::Flow);
        assert_eq!(slot.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn check_registered_node() {
        let _guard = test_lock();
        let mut node = MockStatNode::new();
        node.expect_current_concurrency().return_const(4u32);
        stat::register_resource_node("api_check_abc".into(), Arc::new(node));
        flow::load_rules(vec![Arc::new(flow::Rule {
            resource: "api_check_abc".into(),
            metric_type: flow::MetricType::Concurrency,
            threshold: 5.0,
            ..Default::default()
        })])
        .unwrap();

        assert!(check("api_check_abc", 1).is_pass());
        let r = check("api_check_abc", 2);
        assert!(r.is_blocked());
        assert_eq!(r.block_err().unwrap().block_msg(), "Flow");
        assert!(check("api_check_unknown", 100).is_pass());

        flow::clear_rules().unwrap();
        stat::remove_resource_node("api_check_abc");
    }
}
