use super::*;
use crate::{
    datasource::{PropertyListener, PropertyPublisher, PropertyValue, SentinelProperty},
    logging, utils, Error, Result,
};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// ControllerGenfn represents the Traffic Controller generator function of a specific control behavior.
pub type ControllerGenfn = dyn Send + Sync + Fn(Arc<Rule>) -> Result<Arc<Controller>>;

/// ControllerMap represents the map storage for Controller.
pub type ControllerMap = HashMap<String, Vec<Arc<Controller>>>;

const INVALID_TYPE_ERROR: &str = "invalid type, expected Vec<Arc<flow::Rule>>";

/// The generators and the controllers share one lock,
/// so that a rule reload never observes a half updated registry.
struct FlowState {
    generators: HashMap<ControlBehavior, Arc<ControllerGenfn>>,
    // replaced as a whole on each update
    controllers: Arc<ControllerMap>,
}

impl FlowState {
    fn new() -> Self {
        // Initialize the traffic shaping controller generator map for existing control behaviors.
        let mut generators: HashMap<ControlBehavior, Arc<ControllerGenfn>> = HashMap::new();
        generators.insert(ControlBehavior::Reject, Arc::new(gen_direct_reject));
        FlowState {
            generators,
            controllers: Arc::new(ControllerMap::new()),
        }
    }
}

lazy_static! {
    static ref FLOW_STATE: RwLock<FlowState> = RwLock::new(FlowState::new());
    static ref RULE_LISTENER: Arc<dyn PropertyListener> = Arc::new(RulePropertyListener {});
    static ref RULE_PROPERTY: RwLock<Arc<dyn PropertyPublisher>> = {
        let property: Arc<dyn PropertyPublisher> = Arc::new(SentinelProperty::new());
        property.add_listener(RULE_LISTENER.clone());
        RwLock::new(property)
    };
}

#[inline]
fn read_state() -> RwLockReadGuard<'static, FlowState> {
    FLOW_STATE
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[inline]
fn write_state() -> RwLockWriteGuard<'static, FlowState> {
    FLOW_STATE
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[inline]
fn current_property() -> Arc<dyn PropertyPublisher> {
    RULE_PROPERTY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

fn gen_direct_reject(rule: Arc<Rule>) -> Result<Arc<Controller>> {
    let calculator = Box::new(DirectCalculator::new(rule.threshold));
    let checker = Box::new(RejectChecker::new(Arc::clone(&rule)));
    Ok(Arc::new(Controller::new(rule, calculator, checker)))
}

/// RulePropertyListener rebuilds the controllers once the flow rules are updated.
pub struct RulePropertyListener {}

impl PropertyListener for RulePropertyListener {
    fn on_config_update(&self, value: Option<&PropertyValue>, _flag: i32) -> Result<()> {
        // `None` is also not allowed here
        let rules = value
            .and_then(|value| value.downcast_ref::<Vec<Arc<Rule>>>())
            .ok_or_else(|| Error::msg(INVALID_TYPE_ERROR))?;
        let start = utils::curr_time_nanos();
        let mut state = write_state();
        let controllers = build_flow_map(rules, &state.generators);
        log_rule_update(&controllers);
        state.controllers = Arc::new(controllers);
        drop(state);
        logging::debug!(
            "[FlowRuleManager] Time statistic(ns) for updating flow rule, time cost {}",
            utils::curr_time_nanos() - start
        );
        Ok(())
    }
}

fn log_rule_update(map: &ControllerMap) {
    if map.is_empty() {
        logging::info!("[FlowRuleManager] Flow rules were cleared")
    } else {
        logging::info!(
            "[FlowRuleManager] Flow rules were loaded: {:?}",
            map.values()
                .flatten()
                .map(|tc| tc.rule().to_string())
                .collect::<Vec<_>>()
        )
    }
}

/// `build_flow_map` builds the controllers of the valid rules, grouped by resource.
/// The controllers of a resource keep the order of their rules.
/// The rules are never modified, a rule with empty `limit_origin` is cloned to fill the default origin.
pub fn build_flow_map(
    rules: &[Arc<Rule>],
    generators: &HashMap<ControlBehavior, Arc<ControllerGenfn>>,
) -> ControllerMap {
    let mut m = ControllerMap::new();
    for rule in rules {
        if let Err(err) = rule.is_valid() {
            logging::warn!(
                "[FlowRuleManager] Ignoring invalid flow rule {}, reason: {:?}",
                rule,
                err
            );
            continue;
        }
        let rule = if rule.limit_origin.is_empty() {
            Arc::new(Rule {
                limit_origin: LIMIT_ORIGIN_DEFAULT.into(),
                ..(**rule).clone()
            })
        } else {
            Arc::clone(rule)
        };
        let generator = match generators.get(&rule.control_behavior) {
            Some(generator) => generator,
            None => {
                logging::warn!(
                    "[FlowRuleManager] Ignoring the rule due to unsupported control behavior {}",
                    rule
                );
                continue;
            }
        };
        match (**generator)(Arc::clone(&rule)) {
            Ok(tc) => m.entry(rule.resource.clone()).or_insert_with(Vec::new).push(tc),
            Err(err) => logging::error!(
                "[FlowRuleManager] Ignoring the rule, failed to generate the controller of {}, reason: {:?}",
                rule,
                err
            ),
        }
    }
    m
}

/// `load_rules` loads the given flow rules to the rule manager, while all previous rules will be replaced.
/// The rules are delivered by the current rule property, see `register_rule_property`.
// This func acquires the write lock on the global flow state through the listener,
// please release your locks before calling this func
pub fn load_rules(rules: Vec<Arc<Rule>>) -> Result<bool> {
    let property = current_property();
    let value: Arc<PropertyValue> = Arc::new(rules);
    property.update_value(Some(value), 0)
}

/// `set_traffic_shaping_generator` sets the traffic controller generator for the given control behavior.
/// Note that modifying the generator of default control behaviors is not allowed.
// This func acquires the write lock on the global flow state,
// please release your lock on it before calling this func
pub fn set_traffic_shaping_generator(
    control_behavior: ControlBehavior,
    generator: Box<ControllerGenfn>,
) -> Result<()> {
    if control_behavior.is_reserved() {
        return Err(Error::msg(
            "Default control behaviors are not allowed to be modified.",
        ));
    }
    write_state()
        .generators
        .insert(control_behavior, Arc::from(generator));
    Ok(())
}

/// `remove_traffic_shaping_generator` removes the traffic controller generator of the given control behavior.
/// Note that removing the generator of default control behaviors is not allowed.
// This func acquires the write lock on the global flow state,
// please release your lock on it before calling this func
pub fn remove_traffic_shaping_generator(control_behavior: ControlBehavior) -> Result<()> {
    if control_behavior.is_reserved() {
        return Err(Error::msg(
            "Default control behaviors are not allowed to be removed.",
        ));
    }
    write_state().generators.remove(&control_behavior);
    Ok(())
}

/// `register_rule_property` replaces the publisher the flow rules come from.
/// The listener is detached from the former publisher.
pub fn register_rule_property(property: Arc<dyn PropertyPublisher>) -> Result<()> {
    let mut current = RULE_PROPERTY
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if Arc::as_ptr(&*current) as *const () == Arc::as_ptr(&property) as *const () {
        return Ok(());
    }
    current.remove_listener(&*RULE_LISTENER);
    property.add_listener(RULE_LISTENER.clone());
    *current = property;
    Ok(())
}

/// `get_rules` returns all the rules in effect, with the default origin filled.
/// It doesn't take effect for flow module if user changes the rule.
pub fn get_rules() -> Vec<Arc<Rule>> {
    let controllers = Arc::clone(&read_state().controllers);
    controllers
        .values()
        .flatten()
        .map(|tc| Arc::clone(tc.rule()))
        .collect()
}

/// `get_rules_of_resource` returns specific resource's rules in effect.
pub fn get_rules_of_resource(res: &str) -> Vec<Arc<Rule>> {
    get_traffic_controller_list_for(res)
        .iter()
        .map(|tc| Arc::clone(tc.rule()))
        .collect()
}

/// clear_rules clears all the rules in flow module.
pub fn clear_rules() -> Result<bool> {
    load_rules(Vec::new())
}

// The read lock is only held for cloning the list.
pub fn get_traffic_controller_list_for(name: &str) -> Vec<Arc<Controller>> {
    read_state()
        .controllers
        .get(name)
        .cloned()
        .unwrap_or_default()
}
