use expect_test::expect;
use expect_test::expect_file;
use pretty_assertions::assert_eq;
use schema_sort::canonicalize;
use schema_sort::decode;
use schema_sort::encode;
use schema_sort::Field;
use schema_sort::NamedType;
use schema_sort::Response;
use schema_sort::Type;
use schema_sort::TypeWrapping;
use std::collections::BTreeMap;

const INTROSPECTION: &str = include_str!("fixtures/introspection.json");

fn sorted(payload: &str) -> String {
    String::from_utf8(schema_sort::sort_payload(payload.as_bytes()).unwrap()).unwrap()
}

fn types(response: &Response) -> &[NamedType] {
    response.schema().unwrap().types.as_deref().unwrap()
}

fn ty<'a>(response: &'a Response, name: &str) -> &'a NamedType {
    types(response)
        .iter()
        .find(|ty| ty.name() == Some(name))
        .unwrap()
}

fn fields<W>(ty: &Type<W>) -> &[Field] {
    match &ty.fields {
        Some(Some(fields)) => fields,
        _ => &[],
    }
}

fn field<'a, W>(ty: &'a Type<W>, name: &str) -> &'a Field {
    fields(ty)
        .iter()
        .find(|field| field.name.as_deref() == Some(name))
        .unwrap()
}

fn names<'a, T: 'a>(items: impl IntoIterator<Item = &'a T>, name: impl Fn(&T) -> Option<&str>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| name(item).unwrap_or_default().to_owned())
        .collect()
}

#[test]
fn it_sorts_a_full_introspection() {
    let actual = String::from_utf8(schema_sort::sort_payload_pretty(INTROSPECTION.as_bytes()).unwrap())
        .unwrap();
    expect_file!["fixtures/introspection.sorted.json"].assert_eq(&actual);
}

#[test]
fn it_is_idempotent() {
    let once = canonicalize(decode(INTROSPECTION.as_bytes()).unwrap());
    let twice = canonicalize(once.clone());
    assert_eq!(once, twice);
    assert_eq!(encode(&once).unwrap(), encode(&twice).unwrap());
}

/// Reverse every sortable collection, recursively.
fn permute(response: &mut Response) {
    fn permute_type<W: TypeWrapping>(ty: &mut Type<W>) {
        if let Some(Some(fields)) = &mut ty.fields {
            fields.reverse();
            for field in fields {
                if let Some(args) = &mut field.args {
                    args.reverse();
                }
            }
        }
        for references in [&mut ty.interfaces, &mut ty.possible_types] {
            if let Some(Some(references)) = references {
                references.reverse();
                references.iter_mut().for_each(permute_type);
            }
        }
        if let Some(Some(values)) = &mut ty.enum_values {
            values.reverse();
        }
        if let Some(Some(values)) = &mut ty.input_fields {
            values.reverse();
        }
    }

    let schema = response.schema_mut().unwrap();
    let types = schema.types.as_mut().unwrap();
    types.reverse();
    types.rotate_left(3);
    types.iter_mut().for_each(permute_type);
    let directives = schema.directives.as_mut().unwrap();
    directives.swap(0, 2);
    for directive in directives {
        directive.args.as_mut().unwrap().reverse();
        directive.locations.as_mut().unwrap().reverse();
    }
}

#[test]
fn it_ignores_the_input_order() {
    let original = decode(INTROSPECTION.as_bytes()).unwrap();
    let mut permuted = original.clone();
    permute(&mut permuted);
    assert_ne!(original, permuted);

    let original = encode(&canonicalize(original)).unwrap();
    let permuted = encode(&canonicalize(permuted)).unwrap();
    assert_eq!(
        String::from_utf8(original).unwrap(),
        String::from_utf8(permuted).unwrap()
    );
}

/// Every sortable collection, keyed by its path, with its names sorted.
fn collections(response: &Response) -> BTreeMap<String, Vec<String>> {
    fn add<'a>(
        found: &mut BTreeMap<String, Vec<String>>,
        path: String,
        names: impl IntoIterator<Item = Option<&'a str>>,
    ) {
        let mut names: Vec<String> = names
            .into_iter()
            .map(|name| name.unwrap_or_default().to_owned())
            .collect();
        names.sort();
        found.insert(path, names);
    }

    fn walk_type<W: TypeWrapping>(
        found: &mut BTreeMap<String, Vec<String>>,
        path: &str,
        ty: &Type<W>,
    ) {
        if let Some(Some(fields)) = &ty.fields {
            add(found, format!("{path}.fields"), fields.iter().map(|f| f.name.as_deref()));
            for field in fields {
                let path = format!("{path}.fields[{}]", field.name.as_deref().unwrap_or_default());
                let args = field.args.iter().flatten();
                add(found, format!("{path}.args"), args.map(|a| a.name.as_deref()));
            }
        }
        for (key, references) in [
            ("interfaces", &ty.interfaces),
            ("possibleTypes", &ty.possible_types),
        ] {
            if let Some(Some(references)) = references {
                add(found, format!("{path}.{key}"), references.iter().map(|r| r.name()));
            }
        }
        if let Some(Some(values)) = &ty.enum_values {
            add(found, format!("{path}.enumValues"), values.iter().map(|v| v.name.as_deref()));
        }
        if let Some(Some(values)) = &ty.input_fields {
            add(found, format!("{path}.inputFields"), values.iter().map(|v| v.name.as_deref()));
        }
    }

    let mut found = BTreeMap::new();
    let schema = response.schema().unwrap();
    let types = schema.types.iter().flatten();
    add(&mut found, "types".into(), types.clone().map(|ty| ty.name()));
    for ty in types {
        walk_type(&mut found, &format!("types[{}]", ty.name().unwrap()), ty);
    }
    let directives = schema.directives.iter().flatten();
    add(&mut found, "directives".into(), directives.clone().map(|d| d.name.as_deref()));
    for directive in directives {
        let path = format!("directives[{}]", directive.name.as_deref().unwrap());
        let args = directive.args.iter().flatten();
        add(&mut found, format!("{path}.args"), args.map(|a| a.name.as_deref()));
        let locations = directive.locations.iter().flatten();
        add(&mut found, format!("{path}.locations"), locations.map(|l| Some(l.as_str())));
    }
    found
}

#[test]
fn it_preserves_every_element() {
    let before = decode(INTROSPECTION.as_bytes()).unwrap();
    let after = canonicalize(before.clone());

    let expected = collections(&before);
    for suffix in [
        ".fields",
        ".args",
        ".interfaces",
        ".possibleTypes",
        ".enumValues",
        ".inputFields",
        ".locations",
    ] {
        assert!(
            expected.keys().any(|path| path.ends_with(suffix)),
            "fixture has no {suffix}"
        );
    }
    assert_eq!(collections(&after), expected);

    assert_eq!(
        encode(&before).unwrap().len(),
        encode(&after).unwrap().len()
    );
}

#[test]
fn it_keeps_the_wrapping_order() {
    let response = canonicalize(decode(INTROSPECTION.as_bytes()).unwrap());

    let user = ty(&response, "User");
    let roles = field(user, "roles").ty.as_ref().unwrap();
    assert_eq!(roles.to_string(), "[Role!]!");
    assert_eq!(roles.innermost().name(), Some("Role"));

    let query = ty(&response, "Query");
    let users = field(query, "users");
    assert_eq!(users.ty.as_ref().unwrap().to_string(), "[User!]!");
    let search = field(query, "search");
    assert_eq!(search.ty.as_ref().unwrap().to_string(), "[SearchResult]!");
}

#[test]
fn it_orders_directives_by_name() {
    let actual = sorted(
        r#"{"data":{"__schema":{"directives":[{"name":"skip"},{"name":"include"},{"name":"deprecated"}]}}}"#,
    );
    expect![[r#"{"data":{"__schema":{"directives":[{"name":"deprecated"},{"name":"include"},{"name":"skip"}]}}}"#]]
        .assert_eq(&actual);
}

#[test]
fn it_orders_field_arguments() {
    let response = canonicalize(
        decode(
            br#"{"data":{"__schema":{"types":[{"kind":"OBJECT","name":"Query","fields":[
                {"name":"users","args":[{"name":"limit"},{"name":"after"}]},
                {"name":"posts","args":[]},
                {"name":"viewer","args":[]}
            ]}]}}}"#,
        )
        .unwrap(),
    );

    let query = ty(&response, "Query");
    assert_eq!(
        names(fields(query), |field| field.name.as_deref()),
        ["posts", "users", "viewer"]
    );
    let args = field(query, "users").args.as_deref().unwrap();
    assert_eq!(names(args, |arg| arg.name.as_deref()), ["after", "limit"]);
}

#[test]
fn it_keeps_absent_members_absent() {
    let output: serde_json::Value = serde_json::from_str(&sorted(INTROSPECTION)).unwrap();
    let user = output["data"]["__schema"]["types"]
        .as_array()
        .unwrap()
        .iter()
        .find(|ty| ty["name"] == "User")
        .unwrap();
    let user_fields = user["fields"].as_array().unwrap();
    let name = user_fields.iter().find(|f| f["name"] == "name").unwrap();
    let id = user_fields.iter().find(|f| f["name"] == "id").unwrap();

    assert!(name.get("deprecationReason").is_none());
    assert!(id.get("deprecationReason").unwrap().is_null());
    assert!(user.get("isOneOf").is_none());
}

#[test]
fn it_leaves_extensions_untouched() {
    let tracing = r#"{"tracing":{"version":1,"startTime":"2023-05-01T10:00:00.000Z","endTime":"2023-05-01T10:00:00.012Z","duration":42,"execution":{"resolvers":[{"path":["b"],"startOffset":2},{"path":["a"],"startOffset":1}]}}}"#;
    let payload = format!(r#"{{"extensions":{tracing},"data":{{"__schema":{{"types":[{{"name":"b"}},{{"name":"a"}}]}}}}}}"#);

    let actual = sorted(&payload);
    assert_eq!(
        actual,
        format!(r#"{{"data":{{"__schema":{{"types":[{{"name":"a"}},{{"name":"b"}}]}}}},"extensions":{tracing}}}"#)
    );
}

#[test]
fn it_keeps_errors_in_server_order() {
    let payload = r#"{"errors":[{"message":"second"},{"message":"first"}],"data":{"__schema":{"types":[]}}}"#;
    assert_eq!(sorted(payload), payload);
}

#[test]
fn it_keeps_extension_numbers_as_written() {
    let payload = r#"{"data":{"__schema":{"types":[{"name":"b"},{"name":"a"}]}},"extensions":{"tracing":{"version":1,"duration":1.50,"x":1e3,"big":123456789012345678901234}}}"#;
    expect![[r#"{"data":{"__schema":{"types":[{"name":"a"},{"name":"b"}]}},"extensions":{"tracing":{"version":1,"duration":1.50,"x":1e3,"big":123456789012345678901234}}}"#]]
        .assert_eq(&sorted(payload));
}

#[test]
fn it_keeps_unknown_members_of_error_locations() {
    let payload = r#"{"errors":[{"message":"m","locations":[{"line":1,"column":2,"source":"x"}]}],"data":null}"#;
    assert_eq!(sorted(payload), payload);
}
