use crate::{base::SentinelRule, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// The origin label of rules that do not restrict the caller.
pub const LIMIT_ORIGIN_DEFAULT: &str = "default";
pub const LIMIT_ORIGIN_OTHER: &str = "other";

/// MetricType represents the target metric of the rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricType {
    /// Concurrency represents the number of in-flight requests.
    Concurrency,
    /// Qps represents the number of passed requests per second.
    Qps,
}

impl Default for MetricType {
    fn default() -> MetricType {
        MetricType::Qps
    }
}

/// RelationStrategy indicates the flow control strategy based on the relation of invocations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationStrategy {
    /// Direct means flow control by current resource directly.
    Direct,
    /// AssociatedResource means flow control by the associated resource rather than current resource.
    AssociatedResource,
}

impl Default for RelationStrategy {
    fn default() -> RelationStrategy {
        RelationStrategy::Direct
    }
}

/// ControlBehavior selects the traffic shaping algorithm of the rule.
/// The named variants are reserved by Sentinel, user defined behaviors are `Custom`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlBehavior {
    Reject,
    WarmUp,
    /// Throttling indicates that pending requests will be throttled,
    /// wait in queue (until free capacity is available)
    Throttling,
    WarmUpThrottling,
    Custom(u8),
}

impl Default for ControlBehavior {
    fn default() -> ControlBehavior {
        ControlBehavior::Reject
    }
}

impl ControlBehavior {
    /// Reserved behaviors can not be registered or removed by users.
    pub fn is_reserved(&self) -> bool {
        !matches!(self, ControlBehavior::Custom(_))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClusterThresholdMode {
    /// The threshold is the average of the local thresholds.
    AvgLocalThreshold,
    GlobalThreshold,
}

impl Default for ClusterThresholdMode {
    fn default() -> ClusterThresholdMode {
        ClusterThresholdMode::AvgLocalThreshold
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterRuleConfig {
    pub threshold_type: ClusterThresholdMode,
}

/// Rule describes the strategy of flow control.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Rule {
    /// `id` represents the unique ID of the rule, 0 means absent.
    /// It is required by the cluster mode.
    pub id: u64,
    /// `resource` represents the resource name.
    pub resource: String,
    /// `limit_origin` is the caller this rule applies to, `LIMIT_ORIGIN_DEFAULT` when left empty.
    #[serde(rename = "limitApp")]
    pub limit_origin: String,
    #[serde(rename = "grade")]
    pub metric_type: MetricType,
    #[serde(rename = "count")]
    pub threshold: f64,
    #[serde(rename = "strategy")]
    pub relation_strategy: RelationStrategy,
    pub control_behavior: ControlBehavior,
    /// `ref_resource` is the associated resource, used only with `RelationStrategy::AssociatedResource`.
    pub ref_resource: String,
    pub warm_up_period_sec: u32,
    pub max_queueing_time_ms: u32,
    pub cluster_mode: bool,
    pub cluster_config: ClusterRuleConfig,
}

impl Rule {
    pub fn is_valid(&self) -> Result<()> {
        if self.resource.is_empty() {
            return Err(Error::msg("empty resource name"));
        }
        // `!(x >= 0.0)` also rejects NaN
        if !(self.threshold >= 0.0) {
            return Err(Error::msg("negative threshold"));
        }
        if self.relation_strategy == RelationStrategy::AssociatedResource {
            if self.ref_resource.is_empty() {
                return Err(Error::msg("ref_resource must be non empty when relation_strategy is RelationStrategy::AssociatedResource"));
            }
            if self.ref_resource == self.resource {
                return Err(Error::msg(
                    "ref_resource must not be the resource of the rule itself",
                ));
            }
        }
        if self.cluster_mode && self.id == 0 {
            return Err(Error::msg("id must be positive in cluster mode"));
        }
        match self.control_behavior {
            ControlBehavior::WarmUp => {
                if self.warm_up_period_sec == 0 {
                    return Err(Error::msg("warm_up_period_sec must be great than 0"));
                }
            }
            ControlBehavior::WarmUpThrottling => {
                if self.warm_up_period_sec == 0 {
                    return Err(Error::msg("warm_up_period_sec must be great than 0"));
                }
                if self.max_queueing_time_ms == 0 {
                    return Err(Error::msg("max_queueing_time_ms must be great than 0"));
                }
            }
            _ => {}
        }
        Ok(())
    }
}

impl SentinelRule for Rule {
    fn resource_name(&self) -> String {
        self.resource.clone()
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.resource == other.resource
            && self.limit_origin == other.limit_origin
            && self.metric_type == other.metric_type
            && self.threshold.to_bits() == other.threshold.to_bits()
            && self.relation_strategy == other.relation_strategy
            && self.control_behavior == other.control_behavior
            && self.ref_resource == other.ref_resource
            && self.warm_up_period_sec == other.warm_up_period_sec
            && self.max_queueing_time_ms == other.max_queueing_time_ms
            && self.cluster_mode == other.cluster_mode
            && self.cluster_config == other.cluster_config
    }
}

impl Eq for Rule {}

impl Hash for Rule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.resource.hash(state);
        self.limit_origin.hash(state);
        self.metric_type.hash(state);
        self.threshold.to_bits().hash(state);
        self.relation_strategy.hash(state);
        self.control_behavior.hash(state);
        self.ref_resource.hash(state);
        self.warm_up_period_sec.hash(state);
        self.max_queueing_time_ms.hash(state);
        self.cluster_mode.hash(state);
        self.cluster_config.hash(state);
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(fmtted) => write!(f, "{}", fmtted),
            Err(_) => write!(
                f,
                "Rule{{resource={}, threshold={}, metric_type={:?}, control_behavior={:?}}}",
                self.resource, self.threshold, self.metric_type, self.control_behavior
            ),
        }
    }
}
