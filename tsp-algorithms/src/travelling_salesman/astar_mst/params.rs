use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Params {
    /// Stop after this many state expansions and report the search as aborted.
    /// Unset searches until a tour is proven optimal.
    #[serde(default)]
    pub max_expansions: Option<u64>,
}

impl Params {
    /// Start from defaults and overlay the user keys that name a parameter.
    /// Numeric values given as strings are accepted. If the merged map does
    /// not deserialize, defaults are used.
    pub fn initialize(hyperparameters: &Option<Map<String, Value>>) -> Self {
        let Some(map) = hyperparameters else {
            return Self::default();
        };

        let mut merged = match serde_json::to_value(Self::default()) {
            Ok(Value::Object(obj)) => obj,
            _ => Map::new(),
        };
        for (k, v) in map {
            if !merged.contains_key(k) {
                log::warn!("ignoring unknown hyperparameter '{}'", k);
                continue;
            }
            let v = match v {
                Value::String(s) => s.parse::<u64>().map(Value::from).unwrap_or(v.clone()),
                _ => v.clone(),
            };
            merged.insert(k.clone(), v);
        }

        serde_json::from_value(Value::Object(merged)).unwrap_or_else(|e| {
            log::warn!("invalid hyperparameters ({}), using defaults", e);
            Self::default()
        })
    }
}
