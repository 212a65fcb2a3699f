use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::error::{RemapError, Result};

/// Root JSON object of a metadata file, owned for the whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub data: Map<String, Value>,
}

impl Document {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.data)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemapSummary {
    pub annotations: usize,
    /// `None` when `videos` was not an array and was carried over as-is.
    pub images: Option<usize>,
    pub passthrough_keys: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub document: Document,
    pub summary: RemapSummary,
}

impl TryFrom<Value> for Document {
    type Error = RemapError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(data) => Ok(Self { data }),
            _ => Err(RemapError::schema("sentences", "document root (not a JSON object)")),
        }
    }
}
