//! Read-modify-write access to the JSON and JSON5 files of a native project
//!
//! JSON5 sources are parsed leniently and always written back as strict,
//! two-space indented JSON. Comments and original formatting are not kept.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::ManifestError;

fn read_text(path: &Path) -> Result<String, ManifestError> {
    if !path.exists() {
        return Err(ManifestError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|e| ManifestError::io(path, e))
}

/// Parse a strict JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ManifestError> {
    let content = read_text(path)?;
    serde_json::from_str(&content).map_err(|source| ManifestError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a JSON5 file (comments, trailing commas, unquoted keys allowed)
pub fn read_json5<T: DeserializeOwned>(path: &Path) -> Result<T, ManifestError> {
    let content = read_text(path)?;
    json5::from_str(&content).map_err(|e| ManifestError::Json5 {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write `value` as two-space indented JSON
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<(), ManifestError> {
    let rendered = serde_json::to_string_pretty(value).map_err(|source| ManifestError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, rendered).map_err(|e| ManifestError::io(path, e))
}

/// Write `value` as tab indented JSON followed by a newline
pub fn write_json_tabs<T: Serialize>(path: &Path, value: &T) -> Result<(), ManifestError> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|source| ManifestError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    buffer.push(b'\n');
    fs::write(path, buffer).map_err(|e| ManifestError::io(path, e))
}

/// Walk `keys` from `root`, creating empty objects where a key is missing
fn object_at_mut<'a>(
    root: &'a mut Value,
    keys: &[&str],
    path: &Path,
) -> Result<&'a mut Map<String, Value>, ManifestError> {
    let mut current = root;
    for (depth, key) in keys.iter().enumerate() {
        let map = current.as_object_mut().ok_or_else(|| {
            ManifestError::invalid(
                path,
                format!("expected an object at '{}'", keys[..depth].join(".")),
            )
        })?;
        current = map
            .entry((*key).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
    current.as_object_mut().ok_or_else(|| {
        ManifestError::invalid(path, format!("expected an object at '{}'", keys.join(".")))
    })
}

/// Walk `keys` from `root` to an array, creating it if missing
fn array_at_mut<'a>(
    root: &'a mut Value,
    keys: &[&str],
    path: &Path,
) -> Result<&'a mut Vec<Value>, ManifestError> {
    let Some((last, parents)) = keys.split_last() else {
        return root
            .as_array_mut()
            .ok_or_else(|| ManifestError::invalid(path, "expected a top-level array"));
    };
    object_at_mut(root, parents, path)?
        .entry((*last).to_string())
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or_else(|| {
            ManifestError::invalid(path, format!("expected an array at '{}'", keys.join(".")))
        })
}

/// A JSON or JSON5 file loaded for in-place edits
#[derive(Debug, Clone)]
pub struct JsonDocument {
    path: PathBuf,
    value: Value,
}

impl JsonDocument {
    /// Load a JSON5 file
    pub fn open_json5(path: &Path) -> Result<Self, ManifestError> {
        debug!("Reading JSON5 document {:?}", path);
        Ok(JsonDocument {
            path: path.to_path_buf(),
            value: read_json5(path)?,
        })
    }

    /// Load a strict JSON file
    pub fn open_json(path: &Path) -> Result<Self, ManifestError> {
        debug!("Reading JSON document {:?}", path);
        Ok(JsonDocument {
            path: path.to_path_buf(),
            value: read_json(path)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Write the document back to where it was read from, as strict JSON
    pub fn save(&self) -> Result<(), ManifestError> {
        debug!("Writing document {:?}", self.path);
        write_json_pretty(&self.path, &self.value)
    }

    /// `dependencies[name] = spec`, overwriting any previous value
    pub fn set_dependency(&mut self, name: &str, spec: &str) -> Result<(), ManifestError> {
        object_at_mut(&mut self.value, &["dependencies"], &self.path)?
            .insert(name.to_string(), Value::String(spec.to_string()));
        Ok(())
    }

    /// Add `name` to `buildOption.arkOptions.runtimeOnly.packages` unless it is
    /// already listed. Returns whether it was added.
    pub fn add_runtime_only_package(&mut self, name: &str) -> Result<bool, ManifestError> {
        let packages = array_at_mut(
            &mut self.value,
            &["buildOption", "arkOptions", "runtimeOnly", "packages"],
            &self.path,
        )?;
        if packages.iter().any(|p| p.as_str() == Some(name)) {
            return Ok(false);
        }
        packages.push(Value::String(name.to_string()));
        Ok(true)
    }

    /// Register `{name, srcPath}` in `modules`, replacing the source path of an
    /// existing module with the same name
    pub fn upsert_module(&mut self, name: &str, src_path: &str) -> Result<(), ManifestError> {
        let modules = array_at_mut(&mut self.value, &["modules"], &self.path)?;
        let existing = modules
            .iter()
            .position(|m| m.get("name").and_then(Value::as_str) == Some(name));
        match existing {
            Some(index) => {
                if let Some(module) = modules[index].as_object_mut() {
                    module.insert("srcPath".to_string(), Value::String(src_path.to_string()));
                }
            }
            None => modules.push(json!({ "name": name, "srcPath": src_path })),
        }
        Ok(())
    }

    /// Number of entries in `modules`
    pub fn module_count(&self) -> usize {
        self.value
            .get("modules")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Set `app.bundleName`
    pub fn set_bundle_name(&mut self, bundle_name: &str) -> Result<(), ManifestError> {
        object_at_mut(&mut self.value, &["app"], &self.path)?.insert(
            "bundleName".to_string(),
            Value::String(bundle_name.to_string()),
        );
        Ok(())
    }

    /// Overwrite the value of the first `{name, value}` record in `string`
    /// whose name is `key`. Returns whether a record matched.
    pub fn set_string_resource(&mut self, key: &str, value: &str) -> Result<bool, ManifestError> {
        let records = self
            .value
            .get_mut("string")
            .and_then(Value::as_array_mut)
            .ok_or_else(|| ManifestError::invalid(&self.path, "expected a 'string' array"))?;
        for record in records.iter_mut() {
            if record.get("name").and_then(Value::as_str) == Some(key) {
                if let Some(record) = record.as_object_mut() {
                    record.insert("value".to_string(), Value::String(value.to_string()));
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}
