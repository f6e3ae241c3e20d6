//! Canonical ordering of an introspection response.
//!
//! Every sibling collection reachable from `__schema` is sorted by name,
//! ordinal and ascending. Sorting is stable, so siblings sharing a name keep
//! the order they arrived in. `ofType` chains, `errors` and `extensions` are
//! never reordered.

use crate::introspection::Directive;
use crate::introspection::DirectiveLocation;
use crate::introspection::EnumValue;
use crate::introspection::Field;
use crate::introspection::InputValue;
use crate::introspection::Schema;
use crate::introspection::Type;
use crate::introspection::TypeWrapping;
use crate::introspection::WrappedType;
use crate::response::Response;

/// Sort every sibling collection of `response`.
///
/// A pure permutation: the result holds the same elements with the same
/// values, only in canonical order.
pub fn canonicalize(mut response: Response) -> Response {
    response.canonicalize();
    response
}

/// The key a collection element is ordered by.
pub(crate) trait SortKey {
    fn sort_key(&self) -> Option<&str>;
}

impl<W> SortKey for Type<W> {
    fn sort_key(&self) -> Option<&str> {
        self.name()
    }
}

impl SortKey for Field {
    fn sort_key(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl SortKey for InputValue {
    fn sort_key(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl SortKey for EnumValue {
    fn sort_key(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl SortKey for Directive {
    fn sort_key(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl SortKey for DirectiveLocation {
    fn sort_key(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

// `str` ordering is byte-wise, and `None` (no name) sorts first.
fn sort_by_name<T: SortKey>(items: &mut [T]) {
    items.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}

/// The collection behind a nullable member, if there is one.
fn present<T>(member: &mut Option<Option<Vec<T>>>) -> &mut [T] {
    match member {
        Some(Some(items)) => items,
        _ => &mut [],
    }
}

impl Response {
    /// Sort every sibling collection in place. See [`canonicalize`].
    pub fn canonicalize(&mut self) {
        if let Some(schema) = self.schema_mut() {
            schema.canonicalize()
        }
    }
}

impl Schema {
    pub fn canonicalize(&mut self) {
        if let Some(directives) = &mut self.directives {
            sort_by_name(directives);
            for directive in directives {
                directive.canonicalize();
            }
        }
        if let Some(types) = &mut self.types {
            sort_by_name(types);
            for ty in types {
                ty.canonicalize();
            }
        }
    }
}

impl Directive {
    pub fn canonicalize(&mut self) {
        if let Some(args) = &mut self.args {
            sort_input_values(args);
        }
        if let Some(locations) = &mut self.locations {
            sort_by_name(locations);
        }
    }
}

impl<W: TypeWrapping> Type<W> {
    /// Sort the members of this type, then those of every type it wraps.
    ///
    /// The `ofType` chain is walked, not reordered: `[String!]!` stays
    /// `NON_NULL(LIST(NON_NULL(String)))`.
    pub fn canonicalize(&mut self) {
        self.sort_members();
        let mut next = self.wrapping.of_type_mut();
        while let Some(ty) = next {
            ty.sort_members();
            next = ty.wrapping.of_type_mut();
        }
    }

    fn sort_members(&mut self) {
        let fields = present(&mut self.fields);
        sort_by_name(fields);
        for field in fields {
            field.canonicalize();
        }

        for references in [&mut self.interfaces, &mut self.possible_types] {
            let references = present(references);
            sort_by_name(references);
            for ty in references {
                ty.canonicalize();
            }
        }

        sort_by_name(present(&mut self.enum_values));

        sort_input_values(present(&mut self.input_fields));
    }
}

impl Field {
    pub fn canonicalize(&mut self) {
        if let Some(args) = &mut self.args {
            sort_input_values(args);
        }
        if let Some(ty) = &mut self.ty {
            ty.canonicalize();
        }
    }
}

fn sort_input_values(values: &mut [InputValue]) {
    sort_by_name(values);
    for value in values {
        if let Some(ty) = &mut value.ty {
            WrappedType::canonicalize(ty);
        }
    }
}
