use libfuzzer_sys::arbitrary::Result;
use libfuzzer_sys::arbitrary::Unstructured;
use serde_json::json;
use serde_json::Value;

const KINDS: &[&str] = &[
    "SCALAR",
    "OBJECT",
    "INTERFACE",
    "UNION",
    "ENUM",
    "INPUT_OBJECT",
    "LIST",
    "NON_NULL",
];

const LOCATIONS: &[&str] = &["QUERY", "FIELD", "OBJECT", "FIELD_DEFINITION", "SCALAR"];

/// Generate an arbitrary introspection payload with short, colliding names so
/// that ties and byte-wise ordering get exercised.
pub fn generate_introspection(input: &[u8]) -> Result<Vec<u8>> {
    drop(env_logger::try_init());

    let mut u = Unstructured::new(input);
    let types = list(&mut u, 8, named_type)?;
    let directives = list(&mut u, 4, |u| {
        Ok(json!({
            "name": name(u)?,
            "isRepeatable": u.arbitrary::<bool>()?,
            "locations": list(u, 4, |u| Ok(json!(u.choose(LOCATIONS)?)))?,
            "args": list(u, 3, input_value)?,
        }))
    })?;
    let payload = json!({
        "data": {
            "__schema": {
                "queryType": { "name": "Query" },
                "types": types,
                "directives": directives,
            }
        }
    });
    Ok(payload.to_string().into_bytes())
}

/// Log the payload that failed, and save it into files.
pub fn log_payload(payload: &[u8], errors: &str) {
    log::debug!("writing test case to test_case.json ...");
    if let Err(error) = std::fs::write("test_case.json", payload)
        .and_then(|()| std::fs::write("test_case_error.log", errors))
    {
        log::warn!("could not write test case: {error}");
    }
}

fn list(
    u: &mut Unstructured<'_>,
    max: usize,
    mut item: impl FnMut(&mut Unstructured<'_>) -> Result<Value>,
) -> Result<Value> {
    let len = u.int_in_range(0..=max)?;
    let items = (0..len).map(|_| item(u)).collect::<Result<Vec<_>>>()?;
    Ok(Value::Array(items))
}

fn name(u: &mut Unstructured<'_>) -> Result<String> {
    let names = ["a", "b", "B", "_a", "__a", "Ä", "ab", "aB"];
    Ok(u.choose(&names)?.to_string())
}

fn type_ref(u: &mut Unstructured<'_>) -> Result<Value> {
    let mut ty = json!({ "kind": u.choose(&KINDS[..6])?, "name": name(u)?, "ofType": null });
    for _ in 0..u.int_in_range(0..=3)? {
        let kind = u.choose(&KINDS[6..])?;
        ty = json!({ "kind": kind, "name": null, "ofType": ty });
    }
    Ok(ty)
}

fn input_value(u: &mut Unstructured<'_>) -> Result<Value> {
    Ok(json!({ "name": name(u)?, "type": type_ref(u)?, "defaultValue": null }))
}

fn named_type(u: &mut Unstructured<'_>) -> Result<Value> {
    Ok(json!({
        "kind": u.choose(&KINDS[..6])?,
        "name": name(u)?,
        "fields": list(u, 4, |u| {
            Ok(json!({
                "name": name(u)?,
                "args": list(u, 3, input_value)?,
                "type": type_ref(u)?,
                "isDeprecated": u.arbitrary::<bool>()?,
            }))
        })?,
        "interfaces": list(u, 2, type_ref)?,
        "possibleTypes": list(u, 2, type_ref)?,
        "enumValues": list(u, 3, |u| Ok(json!({ "name": name(u)?, "isDeprecated": false })))?,
        "inputFields": list(u, 3, input_value)?,
    }))
}
