//! Reserved primitive type library and final document assembly.
//!
//! The scalar `$defs` mirror the source configuration format, where every
//! scalar may also appear string-encoded (quoted). `u32` and `bool` therefore
//! accept both the native JSON type and its string form.
use serde_json::{json, Map, Value};

/// Document-level title of the emitted schema.
pub const DOC_TITLE: &str = "UniFi config.gateway.json";

const IPV4_PATTERN: &str =
    r"((25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9])\.){3,3}(25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9])";

const IPV6_PATTERN: &str = r"(([0-9a-fA-F]{1,4}:){7,7}[0-9a-fA-F]{1,4}|([0-9a-fA-F]{1,4}:){1,7}:|([0-9a-fA-F]{1,4}:){1,6}:[0-9a-fA-F]{1,4}|([0-9a-fA-F]{1,4}:){1,5}(:[0-9a-fA-F]{1,4}){1,2}|([0-9a-fA-F]{1,4}:){1,4}(:[0-9a-fA-F]{1,4}){1,3}|([0-9a-fA-F]{1,4}:){1,3}(:[0-9a-fA-F]{1,4}){1,4}|([0-9a-fA-F]{1,4}:){1,2}(:[0-9a-fA-F]{1,4}){1,5}|[0-9a-fA-F]{1,4}:((:[0-9a-fA-F]{1,4}){1,6})|:((:[0-9a-fA-F]{1,4}){1,7}|:)|fe80:(:[0-9a-fA-F]{0,4}){0,4}%[0-9a-zA-Z]{1,}|::(ffff(:0{1,4}){0,1}:){0,1}((25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9])\.){3,3}(25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9])|([0-9a-fA-F]{1,4}:){1,4}:((25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9])\.){3,3}(25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9]))";

/// The fixed primitive schema table attached once at the document root.
/// Node type declarations reference these by name via `#/$defs/<name>`.
pub fn primitive_defs() -> Value {
    json!({
        "txt": { "type": "string" },
        "u32": {
            "oneOf": [
                { "type": "integer" },
                { "type": "string", "pattern": r"^\d+$" },
            ]
        },
        "bool": {
            "oneOf": [
                { "type": "boolean" },
                { "type": "string", "enum": ["true", "false"] },
            ]
        },
        "macaddr": { "type": "string" },
        "ipv4": { "type": "string", "pattern": IPV4_PATTERN },
        "ipv6": { "type": "string", "pattern": IPV6_PATTERN },
        // TODO: bound the mask length in the net patterns
        "ipv4net": { "type": "string", "pattern": format!(r"{IPV4_PATTERN}/(\d+)") },
        "ipv6net": { "type": "string", "pattern": format!(r"{IPV6_PATTERN}/(\d+)") },
    })
}

/// Merge the title and the primitive defs into the root fragment, after the
/// root's own keys.
pub fn into_document(root: Map<String, Value>) -> Value {
    let mut doc = root;
    doc.insert("title".into(), Value::from(DOC_TITLE));
    doc.insert("$defs".into(), primitive_defs());
    Value::Object(doc)
}

// ------------------------------- Tests ------------------------------------ //
