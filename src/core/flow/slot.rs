use super::*;
use crate::{
    base::{BaseSlot, EntryContext, RuleCheckSlot, StatNode, TokenResult},
    logging, stat, utils,
};
use lazy_static::lazy_static;
use std::sync::Arc;

const RULE_CHECK_SLOT_ORDER: u32 = 2000;

/// A RuleSlot for flow related metrics
pub struct Slot {}

lazy_static! {
    pub static ref DEFAULT_SLOT: Arc<Slot> = Arc::new(Slot {});
}

pub fn default_slot() -> Arc<Slot> {
    DEFAULT_SLOT.clone()
}

impl BaseSlot for Slot {
    fn order(&self) -> u32 {
        RULE_CHECK_SLOT_ORDER
    }
}

impl RuleCheckSlot for Slot {
    fn check(&self, ctx: &mut EntryContext) -> TokenResult {
        let tcs = get_traffic_controller_list_for(ctx.resource().name());
        let input = *ctx.input();
        let r = check_controllers(&tcs, ctx.stat_node(), input.batch_count(), input.flag());
        ctx.set_result(r);
        ctx.result().clone()
    }
}

/// `check` evaluates the flow rules of the resource against the given statistic node.
pub fn check(res: &str, batch_count: u32, stat_node: Option<Arc<dyn StatNode>>) -> TokenResult {
    let tcs = get_traffic_controller_list_for(res);
    check_controllers(&tcs, stat_node, batch_count, 0)
}

/// `check_controllers` checks the controllers in order.
/// The first blocked result is returned at once,
/// a result asking to wait sleeps the current thread and goes on with the rest.
pub fn check_controllers(
    tcs: &[Arc<Controller>],
    stat_node: Option<Arc<dyn StatNode>>,
    batch_count: u32,
    flag: i32,
) -> TokenResult {
    for tc in tcs {
        let r = can_pass_check(tc, stat_node.clone(), batch_count, flag);
        match r {
            TokenResult::Pass => {}
            TokenResult::Blocked(_) => return r,
            TokenResult::Wait(ms_to_wait) => {
                if ms_to_wait > 0 {
                    utils::sleep_for_ms(ms_to_wait);
                }
            }
        }
    }
    TokenResult::new_pass()
}

fn can_pass_check(
    tc: &Controller,
    given_node: Option<Arc<dyn StatNode>>,
    batch_count: u32,
    flag: i32,
) -> TokenResult {
    if tc.rule().cluster_mode {
        // cluster token server is not supported, fall back to the local check
        logging::debug!(
            "[FlowSlot] Cluster mode is not supported, check in local, rule {}",
            tc.rule()
        );
    }
    check_in_local(tc, given_node, batch_count, flag)
}

fn select_node_by_rel_strategy(
    rule: &Rule,
    given_node: Option<Arc<dyn StatNode>>,
) -> Option<Arc<dyn StatNode>> {
    match rule.relation_strategy {
        RelationStrategy::AssociatedResource => stat::get_resource_node(&rule.ref_resource),
        RelationStrategy::Direct => given_node,
    }
}

fn check_in_local(
    tc: &Controller,
    given_node: Option<Arc<dyn StatNode>>,
    batch_count: u32,
    flag: i32,
) -> TokenResult {
    match select_node_by_rel_strategy(tc.rule(), given_node) {
        Some(node) => tc.can_pass(Some(node), batch_count, flag),
        None => {
            logging::FREQUENT_ERROR_ONCE.call_once(|| {
                logging::error!(
                    "None statistics node for flow rule in FlowSlot.can_pass_check() {}",
                    tc.rule()
                );
            });
            TokenResult::new_pass()
        }
    }
}
