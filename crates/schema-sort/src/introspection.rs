//! Typed view of the `data` member of an introspection response.
//!
//! Members that are nullable in the introspection schema are
//! `Option<Option<T>>`: `None` when the key is absent, `Some(None)` when it is
//! `null`. Members that can never be `null` are plain `Option<T>`, only absent
//! when the query did not select them; a server that sends `null` for one of
//! them anyway gets it back among the unknown members. Keys the model does
//! not know about are kept, text untouched, in each object's `unknown` map and
//! written back after the known ones.

use crate::raw::Members;
use crate::RawMap;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use std::fmt;

/// The `data` member: either a `__schema` introspection or a federation
/// `_service` descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Data {
    #[serde(rename = "__schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,

    #[serde(rename = "_service", skip_serializing_if = "Option::is_none")]
    pub service: Option<Option<Service>>,

    #[serde(flatten)]
    pub unknown: RawMap,
}

/// `_service { sdl }` as exposed by federated subgraphs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdl: Option<Option<String>>,

    #[serde(flatten)]
    pub unknown: RawMap,
}

/// <https://spec.graphql.org/October2021/#sec-The-__Schema-Type>
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_type: Option<RootOperationType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mutation_type: Option<Option<RootOperationType>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_type: Option<Option<RootOperationType>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<NamedType>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub directives: Option<Vec<Directive>>,

    #[serde(flatten)]
    pub unknown: RawMap,
}

/// `queryType { name }` and friends: a reference by name, never expanded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RootOperationType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub unknown: RawMap,
}

/// <https://spec.graphql.org/October2021/#sec-The-__Type-Type>
///
/// The same shape serves top-level types ([`NamedType`]) and type references
/// ([`WrappedType`]). Only references carry `ofType`; the parameter `W`
/// decides which.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Type<W> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<TypeKind>,

    /// `null` for LIST and NON_NULL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Option<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,

    #[serde(rename = "specifiedByURL", skip_serializing_if = "Option::is_none")]
    pub specified_by_url: Option<Option<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_one_of: Option<Option<bool>>,

    // OBJECT and INTERFACE only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Option<Vec<Field>>>,

    // OBJECT and INTERFACE only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interfaces: Option<Option<Vec<WrappedType>>>,

    // INTERFACE and UNION only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub possible_types: Option<Option<Vec<WrappedType>>>,

    // ENUM only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Option<Vec<EnumValue>>>,

    // INPUT_OBJECT only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_fields: Option<Option<Vec<InputValue>>>,

    #[serde(flatten)]
    pub wrapping: W,

    #[serde(flatten)]
    pub unknown: RawMap,
}

/// A top-level entry of `__schema.types`.
pub type NamedType = Type<Named>;

/// A type reference, possibly wrapped in LIST and NON_NULL layers.
pub type WrappedType = Type<Wrapped>;

/// Wrapping of a top-level type: there is none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Named {}

/// Wrapping of a type reference: the `ofType` it modifies, if any.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Wrapped {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub of_type: Option<Option<Box<WrappedType>>>,
}

/// Access to the `ofType` link of a [`Type`], whichever its wrapping.
pub trait TypeWrapping {
    fn of_type(&self) -> Option<&WrappedType>;

    fn of_type_mut(&mut self) -> Option<&mut WrappedType>;
}

impl TypeWrapping for Named {
    fn of_type(&self) -> Option<&WrappedType> {
        None
    }

    fn of_type_mut(&mut self) -> Option<&mut WrappedType> {
        None
    }
}

impl TypeWrapping for Wrapped {
    fn of_type(&self) -> Option<&WrappedType> {
        self.of_type.as_ref()?.as_deref()
    }

    fn of_type_mut(&mut self) -> Option<&mut WrappedType> {
        self.of_type.as_mut()?.as_deref_mut()
    }
}

impl<W> Type<W> {
    pub fn name(&self) -> Option<&str> {
        self.name.as_ref()?.as_deref()
    }
}

impl WrappedType {
    /// A bare reference such as `{"kind": "SCALAR", "name": "String", "ofType": null}`.
    pub fn named(kind: TypeKind, name: impl Into<String>) -> Self {
        Self::with_wrapping(
            kind,
            Some(name.into()),
            Wrapped {
                of_type: Some(None),
            },
        )
    }

    /// Wrap `self` in a LIST layer.
    pub fn list(self) -> Self {
        Self::wrap(TypeKind::List, self)
    }

    /// Wrap `self` in a NON_NULL layer.
    pub fn non_null(self) -> Self {
        Self::wrap(TypeKind::NonNull, self)
    }

    fn wrap(kind: TypeKind, inner: Self) -> Self {
        Self::with_wrapping(
            kind,
            None,
            Wrapped {
                of_type: Some(Some(Box::new(inner))),
            },
        )
    }

    fn with_wrapping(kind: TypeKind, name: Option<String>, wrapping: Wrapped) -> Self {
        Self {
            kind: Some(kind),
            name: Some(name),
            description: None,
            specified_by_url: None,
            is_one_of: None,
            fields: None,
            interfaces: None,
            possible_types: None,
            enum_values: None,
            input_fields: None,
            wrapping,
            unknown: RawMap::new(),
        }
    }

    /// The innermost named type, found by following `ofType` links.
    pub fn innermost(&self) -> &WrappedType {
        let mut ty = self;
        while let Some(of_type) = ty.wrapping.of_type() {
            ty = of_type;
        }
        ty
    }
}

/// Renders GraphQL type syntax, such as `[String!]!`.
impl fmt::Display for WrappedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, self.wrapping.of_type()) {
            (Some(TypeKind::NonNull), Some(inner)) => write!(f, "{inner}!"),
            (Some(TypeKind::List), Some(inner)) => write!(f, "[{inner}]"),
            _ => f.write_str(self.name().unwrap_or("?")),
        }
    }
}

/// <https://spec.graphql.org/October2021/#sec-The-__Field-Type>
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<InputValue>>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<WrappedType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deprecated: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation_reason: Option<Option<String>>,

    #[serde(flatten)]
    pub unknown: RawMap,
}

/// <https://spec.graphql.org/October2021/#sec-The-__InputValue-Type>
///
/// Used for field arguments, directive arguments and input object fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<WrappedType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Option<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deprecated: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation_reason: Option<Option<String>>,

    #[serde(flatten)]
    pub unknown: RawMap,
}

/// <https://spec.graphql.org/October2021/#sec-The-__EnumValue-Type>
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deprecated: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation_reason: Option<Option<String>>,

    #[serde(flatten)]
    pub unknown: RawMap,
}

/// <https://spec.graphql.org/October2021/#sec-The-__Directive-Type>
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Directive {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_repeatable: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<DirectiveLocation>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<InputValue>>,

    #[serde(flatten)]
    pub unknown: RawMap,
}

impl<'de> Deserialize<'de> for Data {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut members = Members::deserialize(deserializer)?;
        Ok(Self {
            schema: members.non_null("__schema")?,
            service: members.nullable("_service")?,
            unknown: members.into_unknown(),
        })
    }
}

impl<'de> Deserialize<'de> for Service {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut members = Members::deserialize(deserializer)?;
        Ok(Self {
            sdl: members.nullable("sdl")?,
            unknown: members.into_unknown(),
        })
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut members = Members::deserialize(deserializer)?;
        Ok(Self {
            description: members.nullable("description")?,
            query_type: members.non_null("queryType")?,
            mutation_type: members.nullable("mutationType")?,
            subscription_type: members.nullable("subscriptionType")?,
            types: members.non_null("types")?,
            directives: members.non_null("directives")?,
            unknown: members.into_unknown(),
        })
    }
}

impl<'de> Deserialize<'de> for RootOperationType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut members = Members::deserialize(deserializer)?;
        Ok(Self {
            name: members.non_null("name")?,
            unknown: members.into_unknown(),
        })
    }
}

// `ofType` on a top-level type is not part of the model and stays unknown.
impl<'de> Deserialize<'de> for NamedType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Type::from_members(Members::deserialize(deserializer)?, Named {})
    }
}

impl<'de> Deserialize<'de> for WrappedType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut members = Members::deserialize(deserializer)?;
        let wrapping = Wrapped {
            of_type: members.nullable("ofType")?,
        };
        Type::from_members(members, wrapping)
    }
}

impl<W> Type<W> {
    fn from_members<E: serde::de::Error>(mut members: Members<E>, wrapping: W) -> Result<Self, E> {
        Ok(Self {
            kind: members.non_null("kind")?,
            name: members.nullable("name")?,
            description: members.nullable("description")?,
            specified_by_url: members.nullable("specifiedByURL")?,
            is_one_of: members.nullable("isOneOf")?,
            fields: members.nullable("fields")?,
            interfaces: members.nullable("interfaces")?,
            possible_types: members.nullable("possibleTypes")?,
            enum_values: members.nullable("enumValues")?,
            input_fields: members.nullable("inputFields")?,
            wrapping,
            unknown: members.into_unknown(),
        })
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut members = Members::deserialize(deserializer)?;
        Ok(Self {
            name: members.non_null("name")?,
            description: members.nullable("description")?,
            args: members.non_null("args")?,
            ty: members.non_null("type")?,
            is_deprecated: members.non_null("isDeprecated")?,
            deprecation_reason: members.nullable("deprecationReason")?,
            unknown: members.into_unknown(),
        })
    }
}

impl<'de> Deserialize<'de> for InputValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut members = Members::deserialize(deserializer)?;
        Ok(Self {
            name: members.non_null("name")?,
            description: members.nullable("description")?,
            ty: members.non_null("type")?,
            default_value: members.nullable("defaultValue")?,
            is_deprecated: members.non_null("isDeprecated")?,
            deprecation_reason: members.nullable("deprecationReason")?,
            unknown: members.into_unknown(),
        })
    }
}

impl<'de> Deserialize<'de> for EnumValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut members = Members::deserialize(deserializer)?;
        Ok(Self {
            name: members.non_null("name")?,
            description: members.nullable("description")?,
            is_deprecated: members.non_null("isDeprecated")?,
            deprecation_reason: members.nullable("deprecationReason")?,
            unknown: members.into_unknown(),
        })
    }
}

impl<'de> Deserialize<'de> for Directive {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut members = Members::deserialize(deserializer)?;
        Ok(Self {
            name: members.non_null("name")?,
            description: members.nullable("description")?,
            is_repeatable: members.non_null("isRepeatable")?,
            locations: members.non_null("locations")?,
            args: members.non_null("args")?,
            unknown: members.into_unknown(),
        })
    }
}

/// Declares a string-backed enum whose unrecognized tokens are kept verbatim.
macro_rules! string_enum {
    (
        $(#[$attr:meta])*
        pub enum $name:ident {
            $($variant:ident => $token:literal,)*
        }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)*
            /// A token this crate does not know, kept as it was received.
            Other(String),
        }

        impl $name {
            /// The token as it appears on the wire.
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $token,)*
                    Self::Other(token) => token.as_str(),
                }
            }
        }

        impl From<String> for $name {
            fn from(token: String) -> Self {
                match token.as_str() {
                    $($token => Self::$variant,)*
                    _ => Self::Other(token),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(token) => token,
                    known => known.as_str().to_owned(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum! {
    /// <https://spec.graphql.org/October2021/#sec-Type-Kinds>
    pub enum TypeKind {
        Scalar => "SCALAR",
        Object => "OBJECT",
        Interface => "INTERFACE",
        Union => "UNION",
        Enum => "ENUM",
        InputObject => "INPUT_OBJECT",
        List => "LIST",
        NonNull => "NON_NULL",
    }
}

string_enum! {
    /// <https://spec.graphql.org/October2021/#DirectiveLocation>
    pub enum DirectiveLocation {
        Query => "QUERY",
        Mutation => "MUTATION",
        Subscription => "SUBSCRIPTION",
        Field => "FIELD",
        FragmentDefinition => "FRAGMENT_DEFINITION",
        FragmentSpread => "FRAGMENT_SPREAD",
        InlineFragment => "INLINE_FRAGMENT",
        VariableDefinition => "VARIABLE_DEFINITION",
        Schema => "SCHEMA",
        Scalar => "SCALAR",
        Object => "OBJECT",
        FieldDefinition => "FIELD_DEFINITION",
        ArgumentDefinition => "ARGUMENT_DEFINITION",
        Interface => "INTERFACE",
        Union => "UNION",
        Enum => "ENUM",
        EnumValue => "ENUM_VALUE",
        InputObject => "INPUT_OBJECT",
        InputFieldDefinition => "INPUT_FIELD_DEFINITION",
    }
}
