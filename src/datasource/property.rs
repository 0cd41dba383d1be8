use super::*;

/// The value delivered by a property publisher, listeners downcast it to the type they expect.
pub type PropertyValue = dyn Any + Send + Sync;

/// PropertyListener is notified by the publisher once the property is updated.
pub trait PropertyListener: Send + Sync {
    /// `value` is `None` when the publisher delivers nothing.
    fn on_config_update(&self, value: Option<&PropertyValue>, flag: i32) -> Result<()>;
}

/// PropertyPublisher is the source of the property, e.g., the rules of a module.
pub trait PropertyPublisher: Send + Sync {
    fn add_listener(&self, listener: Arc<dyn PropertyListener>);
    fn remove_listener(&self, listener: &Arc<dyn PropertyListener>);
    /// update_value publishes the value to all the listeners,
    /// the returned value indicates whether the listeners have been notified.
    fn update_value(&self, value: Option<Arc<PropertyValue>>, flag: i32) -> Result<bool>;
}

#[inline]
fn same_listener(a: &Arc<dyn PropertyListener>, b: &Arc<dyn PropertyListener>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

/// SentinelProperty is the in-process PropertyPublisher,
/// it notifies the listeners in the registration order and keeps the last value accepted by all of them.
#[derive(Default)]
pub struct SentinelProperty {
    value: Mutex<Option<Arc<PropertyValue>>>,
    listeners: Mutex<Vec<Arc<dyn PropertyListener>>>,
}

impl SentinelProperty {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> Option<Arc<PropertyValue>> {
        self.value
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl PropertyPublisher for SentinelProperty {
    fn add_listener(&self, listener: Arc<dyn PropertyListener>) {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if listeners.iter().any(|l| same_listener(l, &listener)) {
            return;
        }
        listeners.push(listener);
    }

    fn remove_listener(&self, listener: &Arc<dyn PropertyListener>) {
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .retain(|l| !same_listener(l, listener));
    }

    fn update_value(&self, value: Option<Arc<PropertyValue>>, flag: i32) -> Result<bool> {
        // the listeners may call back into the publisher
        let listeners = self
            .listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        let mut first_err = None;
        for listener in listeners {
            if let Err(err) = listener.on_config_update(value.as_deref(), flag) {
                crate::logging::warn!(
                    "[SentinelProperty] Fail to notify the listener, reason: {:?}",
                    err
                );
                if first_err.is_none() {
                    first_err = Some(err);
                }
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => {
                *self
                    .value
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner()) = value;
                Ok(true)
            }
        }
    }
}

/// PropertyConverter func is to convert source message string to the specific property, that is, the sentinel rules.
/// if succeed to convert src, return Ok(Property)
/// if not, return the detailed error when convert src.
pub type PropertyConverter<P> = fn(src: &str) -> Result<Vec<Arc<P>>>;

// `rule_json_array_parser` provide JSON as the default serialization for list of rules
pub fn rule_json_array_parser<P: SentinelRule + DeserializeOwned>(
    src: &str,
) -> Result<Vec<Arc<P>>> {
    let rules: Vec<P> = serde_json::from_str(src)?;
    Ok(rules.into_iter().map(Arc::new).collect())
}

/// PropertyUpdater func is to update the specific properties to downstream.
pub type PropertyUpdater<P> = fn(rule: Vec<Arc<P>>) -> Result<bool>;

pub trait PropertyHandler<P: SentinelRule>: Send + Sync {
    // check whether the current src is consistent with the last loaded property
    fn is_property_consistent(&self, rules: &[Arc<P>]) -> bool;
    // handle the current property
    fn handle(&mut self, src: Option<&str>) -> Result<bool>;
    // update sentinel rules
    fn load(&mut self, rules: Vec<Arc<P>>) -> Result<bool>;
}

/// DefaultPropertyHandler encapsulate the Converter and updater of property.
/// One DefaultPropertyHandler instance is to handle one property type.
/// DefaultPropertyHandler should check whether current property is consistent with last update property
/// converter convert the message to the specific property
/// updater update the specific property to downstream.
pub struct DefaultPropertyHandler<P: SentinelRule + PartialEq + DeserializeOwned> {
    last_update_property: Option<Vec<Arc<P>>>,
    converter: PropertyConverter<P>,
    updater: PropertyUpdater<P>,
}

impl<P: SentinelRule + PartialEq + DeserializeOwned> DefaultPropertyHandler<P> {
    pub fn new(converter: PropertyConverter<P>, updater: PropertyUpdater<P>) -> Self {
        Self {
            converter,
            updater,
            last_update_property: None,
        }
    }
}

impl<P: SentinelRule + PartialEq + DeserializeOwned> PropertyHandler<P>
    for DefaultPropertyHandler<P>
{
    fn is_property_consistent(&self, rules: &[Arc<P>]) -> bool {
        matches!(&self.last_update_property, Some(last) if last.as_slice() == rules)
    }

    fn handle(&mut self, src: Option<&str>) -> Result<bool> {
        let rules = match src {
            Some(src) if !crate::utils::is_blank(src) => (self.converter)(src)?,
            _ => Vec::new(),
        };
        if self.is_property_consistent(&rules) {
            return Ok(false);
        }
        self.load(rules)
    }

    // only a successful update is remembered, so a failed one can be retried
    fn load(&mut self, rules: Vec<Arc<P>>) -> Result<bool> {
        let updated = (self.updater)(rules.clone())?;
        self.last_update_property = Some(rules);
        Ok(updated)
    }
}
