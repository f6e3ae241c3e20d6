//! Lossless decoding of JSON objects.
//!
//! Each object is first read as a map of raw member texts. Members the model
//! knows are then parsed from their text; all others stay raw, so numbers,
//! escapes and whitespace inside them are written back byte for byte.

use indexmap::IndexMap;
use serde::de;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::value::RawValue;
use std::fmt;
use std::marker::PhantomData;

/// A JSON value kept exactly as it was received.
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawJson(Box<RawValue>);

/// Members of a JSON object, in the order they were received.
pub type RawMap = IndexMap<String, RawJson>;

impl RawJson {
    /// Wrap a JSON text, which must hold exactly one value.
    pub fn from_string(json: String) -> Result<Self, serde_json::Error> {
        RawValue::from_string(json).map(Self)
    }

    /// The value's text, as received.
    pub fn get(&self) -> &str {
        self.0.get()
    }

    pub fn is_null(&self) -> bool {
        self.get() == "null"
    }
}

/// Compares the texts: `1.0` and `1.00` are different values here.
impl PartialEq for RawJson {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl Eq for RawJson {}

impl fmt::Debug for RawJson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.get())
    }
}

impl fmt::Display for RawJson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.get())
    }
}

/// The members of an object being decoded. Known members are taken out one
/// by one; what remains is the object's `unknown` map.
///
/// Only works on top of `serde_json`, which is the one deserializer able to
/// hand out raw values.
pub(crate) struct Members<E> {
    members: RawMap,
    error: PhantomData<E>,
}

impl<E: de::Error> Members<E> {
    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Self, E>
    where
        D: Deserializer<'de, Error = E>,
    {
        Ok(Self {
            members: RawMap::deserialize(deserializer)?,
            error: PhantomData,
        })
    }

    pub(crate) fn required<T: DeserializeOwned>(&mut self, key: &'static str) -> Result<T, E> {
        match self.members.shift_remove(key) {
            Some(raw) => parse(key, &raw),
            None => Err(E::missing_field(key)),
        }
    }

    /// A member the introspection schema declares non-null. `None` if it is
    /// absent; a `null` is left among the unknown members.
    pub(crate) fn non_null<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, E> {
        if self.members.get(key).map_or(true, RawJson::is_null) {
            return Ok(None);
        }
        self.members
            .shift_remove(key)
            .map(|raw| parse(key, &raw))
            .transpose()
    }

    /// A nullable member: `None` if absent, `Some(None)` if `null`.
    pub(crate) fn nullable<T: DeserializeOwned>(
        &mut self,
        key: &str,
    ) -> Result<Option<Option<T>>, E> {
        self.members
            .shift_remove(key)
            .map(|raw| parse(key, &raw))
            .transpose()
    }

    pub(crate) fn into_unknown(self) -> RawMap {
        self.members
    }
}

fn parse<T: DeserializeOwned, E: de::Error>(key: &str, raw: &RawJson) -> Result<T, E> {
    serde_json::from_str(raw.get()).map_err(|error| E::custom(format_args!("`{key}`: {error}")))
}
