// default 10000 resources at most
pub const DEFAULT_MAX_RESOURCE_AMOUNT: usize = 10000;
