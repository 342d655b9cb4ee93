//! Static payloads: the current weather reading and the function specification
//! describing how to ask for it.
//!
//! current_weather()               -> WeatherReading
//! current_weather_specification() -> FunctionSpecification
//!
//! Field order in the structs is the key order on output.
//!
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Provider name a host uses to address this function.
pub const FUNCTION_NAME: &str = "get_current_weather";

/// A (fictitious) current weather observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub location: String,
    pub temperature: String,
    /// Serialized as `null` when absent.
    #[serde(default)]
    pub unit: Option<String>,
    pub forecast: Vec<String>,
}

/// Function-calling descriptor: name, description and a JSON-Schema-like
/// parameter shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSpecification {
    pub name: String,
    pub description: String,
    pub parameters: ParameterSchema,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSchema {
    #[serde(rename = "type")]
    pub kind: String,
    pub required: Vec<String>,
    pub properties: IndexMap<String, PropertySchema>,
}

/// Schema fragment for a single property. Absent optionals are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,
}

impl PropertySchema {
    /// Plain string property.
    pub fn string() -> Self {
        Self {
            kind: "string".to_string(),
            description: None,
            allowed: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_allowed<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }
}

/// The reading printed when the function is called.
pub fn current_weather() -> WeatherReading {
    WeatherReading {
        location: "Boston, MA".to_string(),
        temperature: "72".to_string(),
        unit: None,
        forecast: vec!["sunny".to_string(), "windy".to_string()],
    }
}

/// The descriptor printed for the specification keyword.
pub fn current_weather_specification() -> FunctionSpecification {
    let mut properties = IndexMap::new();
    properties.insert(
        "location".to_string(),
        PropertySchema::string().with_description("The city and state, e.g. San Francisco, CA"),
    );
    properties.insert(
        "unit".to_string(),
        PropertySchema::string().with_allowed(["celsius", "fahrenheit"]),
    );

    FunctionSpecification {
        name: FUNCTION_NAME.to_string(),
        description: "Get the current weather in a given location".to_string(),
        parameters: ParameterSchema {
            kind: "object".to_string(),
            required: vec!["location".to_string()],
            properties,
        },
    }
}
