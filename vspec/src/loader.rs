//! vspec loader.
//!
//! A vspec file is a YAML mapping from dot-qualified node names to attribute
//! mappings. Lines of the form `#include <file> [<prefix>]` splice another
//! vspec file in place, prefixing each of its keys with `<prefix>.`.
//! A key that appears more than once is an overlay: later attributes replace
//! earlier ones. Instance declarations are not expanded.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::error::VspecError;
use crate::tree::{DataTypeTag, Leaf, LeafRole, NodeBody, NodeId, SchemaTree};

const INCLUDE_DIRECTIVE: &str = "#include";

/// Loads the vspec file at `path`, resolving includes against the including
/// file's directory and then `include_dirs` in order.
///
/// # Errors
///
/// Returns a [`VspecError`] for unreadable or malformed files, unresolvable or
/// cyclic includes, and nodes that cannot be placed in the tree.
pub fn load_tree(path: &Path, include_dirs: &[PathBuf]) -> Result<SchemaTree, VspecError> {
    let mut entries = Entries::default();
    let mut loader = Loader {
        include_dirs,
        stack: Vec::new(),
    };
    loader.collect(path, None, &mut entries)?;
    let tree = build(entries)?;
    tracing::info!(
        path = %path.display(),
        nodes = tree.len(),
        "loaded vspec tree"
    );
    Ok(tree)
}

/// Flattened `(qualified name, attributes)` list in source order.
#[derive(Default)]
struct Entries {
    order: Vec<(String, Mapping)>,
    index: HashMap<String, usize>,
}

impl Entries {
    fn upsert(&mut self, name: String, attrs: Mapping) {
        match self.index.get(&name) {
            Some(&i) => {
                let existing = &mut self.order[i].1;
                for (k, v) in attrs {
                    existing.insert(k, v);
                }
            }
            None => {
                self.index.insert(name.clone(), self.order.len());
                self.order.push((name, attrs));
            }
        }
    }
}

struct Loader<'a> {
    include_dirs: &'a [PathBuf],
    stack: Vec<PathBuf>,
}

impl Loader<'_> {
    fn collect(
        &mut self,
        path: &Path,
        prefix: Option<&str>,
        entries: &mut Entries,
    ) -> Result<(), VspecError> {
        let canonical = fs::canonicalize(path).map_err(|source| VspecError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if self.stack.contains(&canonical) {
            return Err(VspecError::CyclicInclude { path: canonical });
        }
        self.stack.push(canonical);
        tracing::debug!(
            path = %path.display(),
            prefix = prefix.unwrap_or(""),
            "reading vspec file"
        );

        let text = fs::read_to_string(path).map_err(|source| VspecError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut segment = String::new();
        for (i, line) in text.lines().enumerate() {
            let Some(args) = include_args(line) else {
                segment.push_str(line);
                segment.push('\n');
                continue;
            };
            parse_segment(path, &segment, prefix, entries)?;
            segment.clear();

            let mut args = args.split_whitespace();
            let file = args.next().ok_or_else(|| VspecError::MalformedInclude {
                path: path.to_path_buf(),
                line: i + 1,
            })?;
            let nested = match (prefix, args.next()) {
                (Some(outer), Some(inner)) => Some(format!("{outer}.{inner}")),
                (Some(outer), None) => Some(outer.to_owned()),
                (None, inner) => inner.map(str::to_owned),
            };
            let resolved = self.resolve_include(path, file)?;
            self.collect(&resolved, nested.as_deref(), entries)?;
        }
        parse_segment(path, &segment, prefix, entries)?;

        self.stack.pop();
        Ok(())
    }

    fn resolve_include(&self, including: &Path, file: &str) -> Result<PathBuf, VspecError> {
        let local = including
            .parent()
            .map_or_else(|| PathBuf::from(file), |dir| dir.join(file));
        std::iter::once(local)
            .chain(self.include_dirs.iter().map(|dir| dir.join(file)))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| VspecError::IncludeNotFound {
                file: file.to_owned(),
                searched: self
                    .include_dirs
                    .iter()
                    .map(|d| d.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Returns the argument part of an `#include` line, or `None` for any other line.
fn include_args(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix(INCLUDE_DIRECTIVE)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest)
    } else {
        None
    }
}

fn parse_segment(
    path: &Path,
    segment: &str,
    prefix: Option<&str>,
    entries: &mut Entries,
) -> Result<(), VspecError> {
    if segment.trim().is_empty() {
        return Ok(());
    }
    let value: Value = serde_yaml::from_str(segment).map_err(|source| VspecError::Yaml {
        path: path.to_path_buf(),
        source,
    })?;
    let mapping = match value {
        Value::Null => return Ok(()),
        Value::Mapping(m) => m,
        _ => {
            return Err(VspecError::Malformed {
                path: path.to_path_buf(),
                reason: "top level must be a mapping of node names".to_owned(),
            })
        }
    };
    for (key, attrs) in mapping {
        let Value::String(key) = key else {
            return Err(VspecError::Malformed {
                path: path.to_path_buf(),
                reason: "node names must be strings".to_owned(),
            });
        };
        let attrs = match attrs {
            Value::Mapping(m) => m,
            Value::Null => Mapping::new(),
            _ => {
                return Err(VspecError::Malformed {
                    path: path.to_path_buf(),
                    reason: format!("node {key} must map to attributes"),
                })
            }
        };
        let name = match prefix {
            Some(p) => format!("{p}.{key}"),
            None => key,
        };
        entries.upsert(name, attrs);
    }
    Ok(())
}

fn build(entries: Entries) -> Result<SchemaTree, VspecError> {
    let roots = entries
        .order
        .iter()
        .filter(|(name, _)| !name.contains('.'))
        .count();
    if roots != 1 {
        return Err(VspecError::RootCount { found: roots });
    }

    let mut tree: Option<SchemaTree> = None;
    let mut ids: HashMap<String, NodeId> = HashMap::new();

    for (qualified, attrs) in &entries.order {
        let body = node_body(qualified, attrs)?;
        let description = scalar(qualified, attrs, "description")?.unwrap_or_default();

        let Some((parent_name, name)) = qualified.rsplit_once('.') else {
            if !matches!(body, NodeBody::Branch) {
                return Err(VspecError::RootNotBranch {
                    node: qualified.clone(),
                });
            }
            let root = SchemaTree::new(qualified.clone(), description);
            ids.insert(qualified.clone(), root.root());
            tree = Some(root);
            continue;
        };

        let (Some(tree), Some(&parent)) = (tree.as_mut(), ids.get(parent_name)) else {
            return Err(VspecError::MissingParent {
                node: qualified.clone(),
                parent: parent_name.to_owned(),
            });
        };
        let id = match body {
            NodeBody::Branch => tree.add_branch(parent, name, description)?,
            NodeBody::Leaf(leaf) => tree.add_leaf(parent, name, leaf, description)?,
        };
        ids.insert(qualified.clone(), id);
    }

    tree.ok_or(VspecError::RootCount { found: 0 })
}

fn node_body(node: &str, attrs: &Mapping) -> Result<NodeBody, VspecError> {
    let kind = scalar(node, attrs, "type")?.ok_or_else(|| VspecError::MissingType {
        node: node.to_owned(),
    })?;
    let role = match kind.as_str() {
        "branch" => return Ok(NodeBody::Branch),
        "attribute" => LeafRole::Attribute,
        "sensor" => LeafRole::Sensor,
        "actuator" => LeafRole::Actuator,
        other => {
            return Err(VspecError::UnknownNodeType {
                node: node.to_owned(),
                value: other.to_owned(),
            })
        }
    };

    let allowed = match list(node, attrs, "allowed")? {
        Some(labels) => Some(labels),
        None => list(node, attrs, "enum")?,
    };
    Ok(NodeBody::Leaf(Leaf {
        role,
        datatype: scalar(node, attrs, "datatype")?.map(|t| DataTypeTag::parse(&t)),
        unit: scalar(node, attrs, "unit")?,
        min: scalar(node, attrs, "min")?,
        max: scalar(node, attrs, "max")?,
        allowed,
        default: scalar(node, attrs, "default")?,
    }))
}

/// Reads a scalar attribute in its textual form.
fn scalar(node: &str, attrs: &Mapping, field: &str) -> Result<Option<String>, VspecError> {
    match attrs.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => scalar_text(value).map(Some).ok_or_else(|| VspecError::InvalidField {
            node: node.to_owned(),
            field: field.to_owned(),
        }),
    }
}

fn list(node: &str, attrs: &Mapping, field: &str) -> Result<Option<Vec<String>>, VspecError> {
    let invalid = || VspecError::InvalidField {
        node: node.to_owned(),
        field: field.to_owned(),
    };
    match attrs.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Sequence(items)) => items
            .iter()
            .map(|item| scalar_text(item).ok_or_else(invalid))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(_) => Err(invalid()),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn include_directive_detection() {
        assert_eq!(
            include_args("#include Cabin.vspec Vehicle.Cabin"),
            Some(" Cabin.vspec Vehicle.Cabin")
        );
        assert_eq!(include_args("  #include"), Some(""));
        assert_eq!(include_args("#includes are described below"), None);
        assert_eq!(include_args("# plain comment"), None);
    }

    #[test]
    fn overlay_replaces_attributes() {
        let mut entries = Entries::default();
        let first: Mapping = serde_yaml::from_str("type: sensor\nunit: km").unwrap_or_default();
        let second: Mapping = serde_yaml::from_str("unit: m").unwrap_or_default();
        entries.upsert("Vehicle.Odometer".into(), first);
        entries.upsert("Vehicle.Odometer".into(), second);
        assert_eq!(entries.order.len(), 1);
        let attrs = &entries.order[0].1;
        assert_eq!(attrs.get("unit"), Some(&Value::String("m".into())));
        assert_eq!(attrs.get("type"), Some(&Value::String("sensor".into())));
    }

    #[test]
    fn numeric_scalars_keep_text() {
        let attrs: Mapping =
            serde_yaml::from_str("min: -40\nmax: 300\nallowed: [1, 'two']").unwrap_or_default();
        assert_eq!(scalar("n", &attrs, "min").ok().flatten().as_deref(), Some("-40"));
        assert_eq!(scalar("n", &attrs, "max").ok().flatten().as_deref(), Some("300"));
        assert_eq!(
            list("n", &attrs, "allowed").ok().flatten(),
            Some(vec!["1".to_owned(), "two".to_owned()])
        );
    }

    #[test]
    fn unknown_type_is_rejected() {
        let attrs: Mapping = serde_yaml::from_str("type: rbranch").unwrap_or_default();
        assert!(matches!(
            node_body("Vehicle.X", &attrs),
            Err(VspecError::UnknownNodeType { .. })
        ));
    }
}
