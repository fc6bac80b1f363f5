//! Value file loading

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;
use std::path::Path;

use super::format::ConfigFormat;
use crate::error::{Error, Result};
use crate::value::HpValue;

/// Flat name -> value mapping, in file order
struct ValueFile(Vec<(String, HpValue)>);

impl<'de> Deserialize<'de> for ValueFile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ValueFileVisitor;

        impl<'de> Visitor<'de> for ValueFileVisitor {
            type Value = ValueFile;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of field names to scalar values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<ValueFile, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, value)) = map.next_entry::<String, HpValue>()? {
                    entries.push((name, value));
                }
                Ok(ValueFile(entries))
            }

            // An empty YAML document
            fn visit_unit<E: serde::de::Error>(self) -> std::result::Result<ValueFile, E> {
                Ok(ValueFile(Vec::new()))
            }
        }

        deserializer.deserialize_any(ValueFileVisitor)
    }
}

/// Read field assignments from a YAML or JSON file
///
/// The values are not checked against any schema; pass them to
/// [`Hyperparams::new`](crate::Hyperparams::new) or use
/// [`Hyperparams::from_file`](crate::Hyperparams::from_file).
pub fn load_values(path: impl AsRef<Path>) -> Result<Vec<(String, HpValue)>> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    let file: ValueFile = match format {
        ConfigFormat::Json => serde_json::from_str(&content).map_err(|e| Error::Serialization {
            message: format!("{}: JSON deserialization failed: {e}", path.display()),
        })?,
        ConfigFormat::Yaml => serde_yaml::from_str(&content).map_err(|e| Error::Serialization {
            message: format!("{}: YAML deserialization failed: {e}", path.display()),
        })?,
    };
    tracing::debug!(path = %path.display(), fields = file.0.len(), "loaded value file");
    Ok(file.0)
}
