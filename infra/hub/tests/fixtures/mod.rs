use plinth_domain::value::{ConfigMap, Value};
use plinth_hub::{AsyncConfigSource, ConfigSource, HubError};

/// In-memory synchronous source with a fixed name.
pub struct MapSource {
    name: &'static str,
    values: ConfigMap,
}

impl MapSource {
    pub fn new(name: &'static str, pairs: &[(&str, &str)]) -> Self {
        let values = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), Value::from(*value)))
            .collect();
        Self { name, values }
    }
}

impl ConfigSource for MapSource {
    fn name(&self) -> &str {
        self.name
    }

    fn get_value(&self, key: &str) -> Result<Option<Value>, HubError> {
        Ok(self.values.get(key).cloned())
    }

    fn load(&self) -> Result<ConfigMap, HubError> {
        Ok(self.values.clone())
    }
}

/// Source whose backend is permanently down.
pub struct BrokenSource;

impl ConfigSource for BrokenSource {
    fn name(&self) -> &str {
        "broken"
    }

    fn get_value(&self, _key: &str) -> Result<Option<Value>, HubError> {
        Err(HubError::SourceFailed { message: "backend unavailable".into(), context: None })
    }

    fn load(&self) -> Result<ConfigMap, HubError> {
        Err(HubError::SourceFailed { message: "backend unavailable".into(), context: None })
    }
}

/// In-memory asynchronous source.
pub struct AsyncMapSource {
    name: &'static str,
    values: ConfigMap,
}

impl AsyncMapSource {
    pub fn new(name: &'static str, pairs: &[(&str, &str)]) -> Self {
        let values = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), Value::from(*value)))
            .collect();
        Self { name, values }
    }
}

#[async_trait::async_trait]
impl AsyncConfigSource for AsyncMapSource {
    fn name(&self) -> &str {
        self.name
    }

    async fn get_value(&self, key: &str) -> Result<Option<Value>, HubError> {
        Ok(self.values.get(key).cloned())
    }

    async fn load(&self) -> Result<ConfigMap, HubError> {
        Ok(self.values.clone())
    }
}
