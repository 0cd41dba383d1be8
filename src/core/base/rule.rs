use std::fmt;

/// `SentinelRule` is the common interface of the rules,
/// a rule is always bound to a resource.
pub trait SentinelRule: fmt::Debug + fmt::Display + Send + Sync {
    fn resource_name(&self) -> String;
}
