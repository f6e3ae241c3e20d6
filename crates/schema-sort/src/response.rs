use crate::introspection::Data;
use crate::raw::Members;
use crate::RawMap;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

/// <https://spec.graphql.org/October2021/#sec-Response-Format>
///
/// Every member is optional so that a response round-trips with exactly the
/// keys it arrived with. `errors` and `extensions` keep their source order,
/// and the values inside `extensions` keep their exact text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Option<Vec<Error>>>,

    /// `Some(None)` if the server answered `"data": null`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Option<Data>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Option<RawMap>>,

    #[serde(flatten)]
    pub unknown: RawMap,
}

/// <https://spec.graphql.org/October2021/#sec-Errors.Error-result-format>
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Error {
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<Option<Vec<Location>>>,

    /// Absent for request errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Option<Vec<PathElement>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Option<RawMap>>,

    #[serde(flatten)]
    pub unknown: RawMap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,

    #[serde(flatten)]
    pub unknown: RawMap,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathElement {
    Field(String),
    ListItem(usize),
}

impl<'de> Deserialize<'de> for Response {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut members = Members::deserialize(deserializer)?;
        Ok(Self {
            errors: members.nullable("errors")?,
            data: members.nullable("data")?,
            extensions: members.nullable("extensions")?,
            unknown: members.into_unknown(),
        })
    }
}

impl<'de> Deserialize<'de> for Error {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut members = Members::deserialize(deserializer)?;
        Ok(Self {
            message: members.required("message")?,
            locations: members.nullable("locations")?,
            path: members.nullable("path")?,
            extensions: members.nullable("extensions")?,
            unknown: members.into_unknown(),
        })
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut members = Members::deserialize(deserializer)?;
        Ok(Self {
            line: members.required("line")?,
            column: members.required("column")?,
            unknown: members.into_unknown(),
        })
    }
}

impl Response {
    /// The `__schema` member of `data`, if the response carries one.
    pub fn schema(&self) -> Option<&crate::Schema> {
        self.data.as_ref()?.as_ref()?.schema.as_ref()
    }

    pub fn schema_mut(&mut self) -> Option<&mut crate::Schema> {
        self.data.as_mut()?.as_mut()?.schema.as_mut()
    }

    /// Errors reported by the server, in the order it reported them.
    pub fn errors(&self) -> &[Error] {
        match &self.errors {
            Some(Some(errors)) => errors,
            _ => &[],
        }
    }
}

impl Error {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: None,
            path: None,
            extensions: None,
            unknown: RawMap::new(),
        }
    }
}
