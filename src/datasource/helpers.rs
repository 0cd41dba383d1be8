use super::*;
use crate::flow;

/// new_flow_rule_handler creates the handler which parses the flow rules in JSON
/// and loads them by `flow::load_rules`.
pub fn new_flow_rule_handler() -> DefaultPropertyHandler<flow::Rule> {
    DefaultPropertyHandler::new(rule_json_array_parser::<flow::Rule>, flow::load_rules)
}
