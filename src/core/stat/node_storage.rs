use crate::base::StatNode;
use crate::{config, logging};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

type ResourceNodeMap = HashMap<String, Arc<dyn StatNode>>;

lazy_static! {
    static ref RESOURCE_NODE_MAP: RwLock<ResourceNodeMap> = RwLock::new(ResourceNodeMap::new());
}

// resource_node_list returns the slice of all existing resource nodes.
pub fn resource_node_list() -> Vec<Arc<dyn StatNode>> {
    let res_map = RESOURCE_NODE_MAP
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    res_map.values().cloned().collect()
}

pub fn get_resource_node(res_name: &str) -> Option<Arc<dyn StatNode>> {
    let res_map = RESOURCE_NODE_MAP
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    res_map.get(res_name).cloned()
}

/// register_resource_node publishes the statistic node of a resource,
/// the node previously registered under the same name is returned.
pub fn register_resource_node(
    res_name: String,
    node: Arc<dyn StatNode>,
) -> Option<Arc<dyn StatNode>> {
    let mut res_map = RESOURCE_NODE_MAP
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let max_amount = config::max_resource_amount();
    if !res_map.contains_key(&res_name) && res_map.len() >= max_amount {
        logging::warn!(
            "[register_resource_node] Resource amount exceeds the threshold {}",
            max_amount
        );
    }
    res_map.insert(res_name, node)
}

pub fn remove_resource_node(res_name: &str) -> Option<Arc<dyn StatNode>> {
    RESOURCE_NODE_MAP
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .remove(res_name)
}

pub fn reset_resource_map() {
    RESOURCE_NODE_MAP
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clear();
}

#[cfg(test)]
mod test {
    #![allow(clippy::vtable_address_comparisons)]

    use super::*;
    use crate::base::MockStatNode;
    use crate::utils::test_lock;

    #[test]
    fn register_and_get() {
        let _guard = test_lock();
        let node: Arc<dyn StatNode> = Arc::new(MockStatNode::new());
        assert!(register_resource_node("node_storage_abc".into(), node.clone()).is_none());
        let got = get_resource_node("node_storage_abc").unwrap();
        assert!(Arc::ptr_eq(&got, &node));

        let other: Arc<dyn StatNode> = Arc::new(MockStatNode::new());
        let prev = register_resource_node("node_storage_abc".into(), other.clone()).unwrap();
        assert!(Arc::ptr_eq(&prev, &node));
        assert!(Arc::ptr_eq(
            &get_resource_node("node_storage_abc").unwrap(),
            &other
        ));

        assert!(remove_resource_node("node_storage_abc").is_some());
        assert!(get_resource_node("node_storage_abc").is_none());
        assert!(remove_resource_node("node_storage_abc").is_none());
    }

    #[test]
    fn list_and_reset() {
        let _guard = test_lock();
        reset_resource_map();
        register_resource_node("node_storage_a".into(), Arc::new(MockStatNode::new()));
        register_resource_node("node_storage_b".into(), Arc::new(MockStatNode::new()));
        assert_eq!(resource_node_list().len(), 2);
        reset_resource_map();
        assert!(resource_node_list().is_empty());
    }
}
