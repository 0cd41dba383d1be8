pub mod helpers;
pub mod property;

pub use helpers::*;
pub use property::*;

use crate::base::SentinelRule;
use crate::Result;
use serde::de::DeserializeOwned;
use std::any::Any;
use std::sync::{Arc, Mutex};
