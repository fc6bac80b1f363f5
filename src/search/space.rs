//! Search-space descriptions

use rand::Rng;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value::HpValue;

/// Distribution a tunable field is sampled from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchSpace {
    /// Continuous range [low, high]
    Uniform { low: f64, high: f64 },
    /// Continuous range [low, high], sampled in log space
    LogUniform { low: f64, high: f64 },
    /// Integer range [low, high)
    RandInt { low: i64, high: i64 },
    /// Uniform choice over a finite set
    Choice { values: Vec<HpValue> },
    /// Exhaustive sweep over a finite set
    Grid { values: Vec<HpValue> },
}

impl SearchSpace {
    pub fn choice<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<HpValue>,
    {
        SearchSpace::Choice { values: values.into_iter().map(Into::into).collect() }
    }

    /// Sample a random value from this space
    ///
    /// An empty choice or grid yields `HpValue::Null`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> HpValue {
        match self {
            SearchSpace::Uniform { low, high } => {
                let (lo, hi) = ordered(*low, *high);
                HpValue::Float((lo + rng.random::<f64>() * (hi - lo)).min(hi))
            }
            SearchSpace::LogUniform { low, high } => {
                let (lo, hi) = ordered(*low, *high);
                let log_low = lo.max(f64::MIN_POSITIVE).ln();
                let log_high = hi.max(f64::MIN_POSITIVE).ln();
                let log_val = log_low + rng.random::<f64>() * (log_high - log_low);
                // Rounding in exp() can step outside the bounds
                HpValue::Float(log_val.exp().max(lo).min(hi))
            }
            SearchSpace::RandInt { low, high } => {
                if high <= low {
                    return HpValue::Int(*low);
                }
                let range = high.abs_diff(*low);
                let offset = ((rng.random::<f64>() * range as f64).floor() as u64).min(range - 1);
                HpValue::Int(low.wrapping_add_unsigned(offset))
            }
            SearchSpace::Choice { values } | SearchSpace::Grid { values } => {
                if values.is_empty() {
                    return HpValue::Null;
                }
                let idx = (rng.random::<f64>() * values.len() as f64).floor() as usize;
                values[idx.min(values.len() - 1)].clone()
            }
        }
    }

    /// Check if a value lies in this space
    pub fn contains(&self, value: &HpValue) -> bool {
        match (self, value) {
            (
                SearchSpace::Uniform { low, high } | SearchSpace::LogUniform { low, high },
                HpValue::Float(v),
            ) => {
                let (lo, hi) = ordered(*low, *high);
                *v >= lo && *v <= hi
            }
            (SearchSpace::RandInt { low, high }, HpValue::Int(v)) => *v >= *low && *v < *high,
            (SearchSpace::Choice { values } | SearchSpace::Grid { values }, v) => values.contains(v),
            _ => false,
        }
    }
}

/// Bounds as (min, max); inverted ranges are accepted
fn ordered(low: f64, high: f64) -> (f64, f64) {
    if low <= high {
        (low, high)
    } else {
        (high, low)
    }
}

/// One entry of an exported space: a distribution or a pinned value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SpaceEntry {
    Search(SearchSpace),
    Fixed(HpValue),
}

/// Ordered field name -> entry mapping handed to a search engine
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSpace {
    entries: Vec<(String, SpaceEntry)>,
}

impl ParamSpace {
    /// Create an empty parameter space
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry
    pub fn insert(&mut self, name: &str, entry: SpaceEntry) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = entry,
            None => self.entries.push((name.to_string(), entry)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&SpaceEntry> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SpaceEntry)> {
        self.entries.iter().map(|(n, e)| (n.as_str(), e))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Draw one concrete configuration; pinned entries are copied through
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec<(String, HpValue)> {
        self.entries
            .iter()
            .map(|(name, entry)| {
                let value = match entry {
                    SpaceEntry::Search(space) => space.sample(rng),
                    SpaceEntry::Fixed(value) => value.clone(),
                };
                (name.clone(), value)
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::Serialization { message: e.to_string() })
    }
}

impl Serialize for ParamSpace {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, entry) in &self.entries {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}
