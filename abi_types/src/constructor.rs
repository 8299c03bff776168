use crate::types::{ParamType, TypeParseError, DEFAULT_MAX_DEPTH};
use serde_derive::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/* One constructor parameter as declared in a contract interface description */
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
pub struct ConstructorInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /* Raw type signature; parsed only when encoding so bad types fail loudly */
    #[serde(rename = "type")]
    pub ty: String,
}

impl ConstructorInput {
    pub fn new(name: Option<&str>, ty: &str) -> Self {
        Self {
            name: name.map(str::to_string),
            ty: ty.to_string(),
        }
    }

    /// Read one `inputs` entry. Returns `None` for entries that are not objects
    /// or carry no string `type`; a non-string `name` is dropped.
    pub fn from_json(entry: &JsonValue) -> Option<Self> {
        let entry = entry.as_object()?;
        let ty = entry.get("type")?.as_str()?;
        let name = entry.get("name").and_then(JsonValue::as_str);
        Some(Self::new(name, ty))
    }

    pub fn param_type(&self) -> Result<ParamType, TypeParseError> {
        self.param_type_with_max_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn param_type_with_max_depth(&self, max_depth: usize) -> Result<ParamType, TypeParseError> {
        ParamType::parse_with_max_depth(&self.ty, max_depth)
    }
}
