use crate::introspection::Directive;
use crate::introspection::Field;
use crate::introspection::InputValue;
use crate::introspection::Type;
use crate::introspection::TypeWrapping;
use crate::response::Response;
use crate::sort::SortKey;
use std::collections::HashSet;
use std::fmt;

/// Two or more siblings of one collection share a name.
///
/// Sorting keeps such siblings in their input order, but a schema should not
/// contain them in the first place.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Duplicate {
    /// Dotted path to the collection, such as `__schema.types[Query].fields`
    pub collection: String,
    pub name: String,
}

impl fmt::Display for Duplicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "duplicate name `{}` in {}", self.name, self.collection)
    }
}

/// Report every collection of `response` in which a name occurs more than once.
///
/// Each duplicated name is reported once per collection, in document order.
pub fn find_duplicates(response: &Response) -> Vec<Duplicate> {
    let mut found = Vec::new();
    let Some(schema) = response.schema() else {
        return found;
    };
    if let Some(directives) = &schema.directives {
        let path = "__schema.directives";
        check(directives, path, &mut found);
        for directive in directives {
            directive_duplicates(directive, &member(path, directive), &mut found);
        }
    }
    if let Some(types) = &schema.types {
        let path = "__schema.types";
        check(types, path, &mut found);
        for ty in types {
            type_duplicates(ty, &member(path, ty), &mut found);
        }
    }
    found
}

fn directive_duplicates(directive: &Directive, path: &str, found: &mut Vec<Duplicate>) {
    if let Some(args) = &directive.args {
        input_value_duplicates(args, &format!("{path}.args"), found);
    }
    if let Some(locations) = &directive.locations {
        check(locations, &format!("{path}.locations"), found);
    }
}

fn type_duplicates<W: TypeWrapping>(ty: &Type<W>, path: &str, found: &mut Vec<Duplicate>) {
    if let Some(Some(fields)) = &ty.fields {
        let path = format!("{path}.fields");
        check(fields, &path, found);
        for field in fields {
            field_duplicates(field, &member(&path, field), found);
        }
    }
    for (key, references) in [
        ("interfaces", &ty.interfaces),
        ("possibleTypes", &ty.possible_types),
    ] {
        if let Some(Some(references)) = references {
            let path = format!("{path}.{key}");
            check(references, &path, found);
            for reference in references {
                type_duplicates(reference, &member(&path, reference), found);
            }
        }
    }
    if let Some(Some(values)) = &ty.enum_values {
        check(values, &format!("{path}.enumValues"), found);
    }
    if let Some(Some(values)) = &ty.input_fields {
        input_value_duplicates(values, &format!("{path}.inputFields"), found);
    }
    if let Some(of_type) = ty.wrapping.of_type() {
        type_duplicates(of_type, &format!("{path}.ofType"), found);
    }
}

fn field_duplicates(field: &Field, path: &str, found: &mut Vec<Duplicate>) {
    if let Some(args) = &field.args {
        input_value_duplicates(args, &format!("{path}.args"), found);
    }
    if let Some(ty) = &field.ty {
        type_duplicates(ty, &format!("{path}.type"), found);
    }
}

fn input_value_duplicates(values: &[InputValue], path: &str, found: &mut Vec<Duplicate>) {
    check(values, path, found);
    for value in values {
        if let Some(ty) = &value.ty {
            type_duplicates(ty, &format!("{}.type", member(path, value)), found);
        }
    }
}

fn member(path: &str, item: &impl SortKey) -> String {
    format!("{path}[{}]", item.sort_key().unwrap_or("?"))
}

fn check<T: SortKey>(items: &[T], collection: &str, found: &mut Vec<Duplicate>) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for name in items.iter().filter_map(SortKey::sort_key) {
        if !seen.insert(name) && reported.insert(name) {
            found.push(Duplicate {
                collection: collection.to_owned(),
                name: name.to_owned(),
            })
        }
    }
}
