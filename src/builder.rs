//! Recursive schema derivation over a template tree.
//!
//! Each directory is one configuration keyword. Its schema is the join of:
//! - one `$ref` alternative per declared type in its `node.def`,
//! - a container alternative if it has subdirectories (named children become
//!   `properties`, a `node.tag` child becomes `additionalProperties`), always
//!   paired with the empty-value sentinel `^''$`,
//! with a `multi:` marker wrapping the resolved result into an array schema.
//!
//! Each call is a pure function of its subtree; no state crosses siblings.
use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use serde_json::{json, Map, Value};

use crate::nodedef::{parse_def, NodeDef};

// ----------------------------- Conventions -------------------------------- //

/// Reserved definition filename inside every keyword directory.
pub const NODE_DEF_FILE: &str = "node.def";
/// Reserved subdirectory name marking "any key matches this child schema".
pub const TAG_DIR: &str = "node.tag";
/// Sentinel for "key present, no value": a literal pair of single quotes.
pub const EMPTY_VALUE_PATTERN: &str = "^''$";

// ------------------------------- Errors ----------------------------------- //

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("failed to list template directory `{}`: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read definition file `{}`: {source}", path.display())]
    ReadDef {
        path: PathBuf,
        source: std::io::Error,
    },
}

// ------------------------------- Builder ---------------------------------- //

/// Build the schema fragment for one keyword directory, recursively.
///
/// Never fails on missing type information — a node with neither declared
/// types nor children degrades to an open schema and a stderr warning.
/// Filesystem errors are fatal: a silently incomplete schema is worse than
/// no schema.
pub fn build_node(path: &Path) -> Result<Map<String, Value>, BuildError> {
    let def = read_def(path)?;

    let mut schema = Map::new();
    if let Some(help) = &def.help {
        schema.insert("description".into(), Value::from(help.as_str()));
    }

    // declared types first, in declaration order
    let mut alternatives: Vec<Value> = def
        .types
        .iter()
        .map(|t| json!({ "$ref": format!("#/$defs/{t}") }))
        .collect();

    let subdirs = list_subdirs(path)?;
    if !subdirs.is_empty() {
        alternatives.push(container_alternative(&subdirs)?);
    }

    match alternatives.len() {
        0 => {
            eprintln!(
                "{} no type for \"{}\"",
                "warning:".yellow().bold(),
                path.display()
            );
        }
        1 => {
            // single alternative: merged in place, no oneOf wrapper
            if let Value::Object(only) = alternatives.remove(0) {
                schema.extend(only);
            }
        }
        _ => {
            schema.insert("oneOf".into(), Value::Array(alternatives));
        }
    }

    if def.multi {
        let mut array = Map::new();
        array.insert("type".into(), json!("array"));
        array.insert("items".into(), Value::Object(schema));
        return Ok(array);
    }

    Ok(schema)
}

/// The container alternative: an object schema over the subdirectories,
/// paired with the empty-value sentinel.
fn container_alternative(subdirs: &[(String, PathBuf)]) -> Result<Value, BuildError> {
    let mut properties = Map::new();
    let mut wildcard = None;

    for (name, child) in subdirs {
        let fragment = Value::Object(build_node(child)?);
        if name == TAG_DIR {
            // a tag child stands for any instance key, never a named property
            wildcard = Some(fragment);
        } else {
            properties.insert(name.clone(), fragment);
        }
    }

    let mut object = Map::new();
    object.insert("type".into(), json!("object"));
    if !properties.is_empty() {
        object.insert("properties".into(), Value::Object(properties));
    }
    if let Some(wildcard) = wildcard {
        object.insert("additionalProperties".into(), wildcard);
    }

    Ok(json!({
        "oneOf": [
            Value::Object(object),
            { "type": "string", "pattern": EMPTY_VALUE_PATTERN },
        ]
    }))
}

// --------------------------- Filesystem view ------------------------------ //

fn read_def(path: &Path) -> Result<NodeDef, BuildError> {
    let def_path = path.join(NODE_DEF_FILE);
    if !def_path.is_file() {
        return Ok(NodeDef::default());
    }
    let text = fs::read_to_string(&def_path).map_err(|source| BuildError::ReadDef {
        path: def_path,
        source,
    })?;
    Ok(parse_def(&text))
}

/// Immediate subdirectories (following symlinks), sorted by name so the
/// output document is deterministic across runs and platforms.
fn list_subdirs(path: &Path) -> Result<Vec<(String, PathBuf)>, BuildError> {
    let read_dir_err = |source| BuildError::ReadDir {
        path: path.to_path_buf(),
        source,
    };

    let mut subdirs = Vec::new();
    for entry in fs::read_dir(path).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let child = entry.path();
        if child.is_dir() {
            let name = entry.file_name().to_string_lossy().into_owned();
            subdirs.push((name, child));
        }
    }
    subdirs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(subdirs)
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Materialize a tree as `(relative dir, optional node.def text)` pairs.
    fn make_tree(spec: &[(&str, Option<&str>)]) -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        for (rel, def) in spec {
            let dir = tmp.path().join(rel);
            fs::create_dir_all(&dir).unwrap();
            if let Some(text) = def {
                fs::write(dir.join(NODE_DEF_FILE), text).unwrap();
            }
        }
        tmp
    }

    fn build(tmp: &tempfile::TempDir) -> Value {
        Value::Object(build_node(tmp.path()).unwrap())
    }

    #[test]
    fn leaf_with_single_type_is_bare_ref() {
        let tmp = make_tree(&[(".", Some("type: u32\n"))]);
        assert_eq!(build(&tmp), json!({ "$ref": "#/$defs/u32" }));
    }

    #[test]
    fn leaf_with_many_types_is_one_of_in_declaration_order() {
        let tmp = make_tree(&[(".", Some("type: ipv4, ipv6\n"))]);
        assert_eq!(
            build(&tmp),
            json!({ "oneOf": [
                { "$ref": "#/$defs/ipv4" },
                { "$ref": "#/$defs/ipv6" },
            ]})
        );
    }

    #[test]
    fn children_only_node_is_exactly_the_container_alternation() {
        let tmp = make_tree(&[("port", Some("type: u32\n"))]);
        assert_eq!(
            build(&tmp),
            json!({ "oneOf": [
                {
                    "type": "object",
                    "properties": { "port": { "$ref": "#/$defs/u32" } },
                },
                { "type": "string", "pattern": EMPTY_VALUE_PATTERN },
            ]})
        );
    }

    #[test]
    fn types_precede_container_alternative() {
        let tmp = make_tree(&[
            (".", Some("type: txt, bool\n")),
            ("address", Some("type: ipv4\n")),
        ]);
        let schema = build(&tmp);
        let arms = schema["oneOf"].as_array().unwrap();
        assert_eq!(arms.len(), 3);
        assert_eq!(arms[0], json!({ "$ref": "#/$defs/txt" }));
        assert_eq!(arms[1], json!({ "$ref": "#/$defs/bool" }));
        // last arm is the container/sentinel pair
        assert_eq!(arms[2]["oneOf"][1]["pattern"], EMPTY_VALUE_PATTERN);
        assert!(arms[2]["oneOf"][0]["properties"]["address"].is_object());
    }

    #[test]
    fn tag_child_becomes_additional_properties_only() {
        let tmp = make_tree(&[
            ("node.tag", Some("type: txt\n")),
            ("node.tag/mtu", Some("type: u32\n")),
        ]);
        let schema = build(&tmp);
        let object = &schema["oneOf"][0];
        assert!(object.get("properties").is_none());
        let wildcard = &object["additionalProperties"];
        assert_eq!(wildcard["oneOf"][0], json!({ "$ref": "#/$defs/txt" }));
    }

    #[test]
    fn multi_wraps_the_resolved_fragment_last() {
        let with_multi = make_tree(&[
            (".", Some("type: ipv4net, ipv6net\nmulti:\n")),
            ("next-hop", Some("type: ipv4\n")),
        ]);
        let without_multi = make_tree(&[
            (".", Some("type: ipv4net, ipv6net\n")),
            ("next-hop", Some("type: ipv4\n")),
        ]);

        let wrapped = build(&with_multi);
        assert_eq!(wrapped["type"], "array");
        // items is the already-resolved alternation, not per-arm arrays
        assert_eq!(wrapped["items"], build(&without_multi));
    }

    #[test]
    fn schema_less_node_degrades_instead_of_failing() {
        let tmp = make_tree(&[(".", None)]);
        assert_eq!(build(&tmp), json!({}));
    }

    #[test]
    fn schema_less_leaf_does_not_poison_siblings() {
        let tmp = make_tree(&[("broken", None), ("port", Some("type: u32\n"))]);
        let schema = build(&tmp);
        let props = &schema["oneOf"][0]["properties"];
        assert_eq!(props["broken"], json!({}));
        assert_eq!(props["port"], json!({ "$ref": "#/$defs/u32" }));
    }

    #[test]
    fn help_sits_beside_the_alternation() {
        let tmp = make_tree(&[
            (".", Some("type: txt\nhelp: Interface description\n")),
            ("vif", Some("type: u32\n")),
        ]);
        let schema = build(&tmp);
        assert_eq!(schema["description"], "Interface description");
        assert_eq!(schema["oneOf"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn help_travels_into_items_under_multi() {
        let tmp = make_tree(&[(".", Some("type: u32\nhelp: Port list\nmulti:\n"))]);
        let schema = build(&tmp);
        assert_eq!(schema["items"]["description"], "Port list");
        assert!(schema.get("description").is_none());
    }

    #[test]
    fn missing_root_directory_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let err = build_node(&tmp.path().join("no-such-tree")).unwrap_err();
        assert!(matches!(err, BuildError::ReadDir { .. }));
    }
}
