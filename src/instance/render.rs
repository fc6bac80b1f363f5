//! Text renderings of an instance, fields in declaration order

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

use super::Hyperparams;
use crate::error::{Error, Result};

/// Indent used when none is requested
pub const DEFAULT_INDENT: usize = 4;

impl Serialize for Hyperparams {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl Hyperparams {
    /// JSON with the default indent
    pub fn to_json(&self) -> Result<String> {
        self.to_json_with_indent(DEFAULT_INDENT)
    }

    /// JSON with `indent` spaces per level; `0` renders compact
    pub fn to_json_with_indent(&self, indent: usize) -> Result<String> {
        if indent == 0 {
            return serde_json::to_string(self).map_err(serialization);
        }
        let pad = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(pad.as_bytes());
        let mut out = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut ser).map_err(serialization)?;
        String::from_utf8(out).map_err(serialization)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(serialization)
    }
}

fn serialization(e: impl fmt::Display) -> Error {
    Error::Serialization { message: e.to_string() }
}

impl fmt::Display for Hyperparams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
