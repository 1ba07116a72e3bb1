//! Phase 2: Dataset Merging
//!
//! Combines every fragment file of one dataset into a [`MergedDataset`].
//!
//! ## Process
//!
//! Files are visited in the order discovery returned them. For each file:
//!
//! 1.  **Parse**: the file must hold a JSON array of objects.
//! 2.  **Validate**: when the dataset has a schema, the whole array is checked
//!     against it. One violation rejects the file, and with it the dataset.
//! 3.  **Key**: every record must carry a truthy value under the key field.
//! 4.  **Deduplicate**: a key already seen in this merge is fatal when the
//!     duplicate policy is enforced. Under the permissive policy the later
//!     record replaces the earlier one.
//!
//! The result is ordered by key, never by file order. Key provenance
//! (`<file> record <n>`) is tracked for diagnostics only and dropped when the
//! merge returns.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::dataset::DuplicatePolicy;
use crate::error::{Error, Result};
use crate::schema::DatasetSchema;

/// Identity of a record within a dataset.
///
/// Keys of different JSON types order as booleans, then numbers, then
/// strings. Integers are kept exactly, so distinct integers beyond the `f64`
/// mantissa stay distinct. Numbers compare by exact value across `Int` and
/// `Float`, and strings by their UTF-8 bytes.
#[derive(Debug, Clone)]
pub enum RecordKey {
    Bool(bool),
    Int(i128),
    Float(f64),
    String(String),
}

/// Outcome of reading the key field of one record.
enum KeyLookup {
    Present(RecordKey),
    Missing,
    Unsupported(String),
}

impl RecordKey {
    fn lookup(record: &serde_json::Map<String, Value>, key_field: &str) -> KeyLookup {
        match record.get(key_field) {
            None | Some(Value::Null) => KeyLookup::Missing,
            Some(Value::Bool(false)) => KeyLookup::Missing,
            Some(Value::Bool(true)) => KeyLookup::Present(RecordKey::Bool(true)),
            Some(Value::String(s)) if s.is_empty() => KeyLookup::Missing,
            Some(Value::String(s)) => KeyLookup::Present(RecordKey::String(s.clone())),
            Some(Value::Number(n)) => match Self::from_number(n) {
                Some(key) if key.is_zero() => KeyLookup::Missing,
                Some(key) => KeyLookup::Present(key),
                None => KeyLookup::Unsupported(n.to_string()),
            },
            Some(other @ (Value::Array(_) | Value::Object(_))) => {
                KeyLookup::Unsupported(other.to_string())
            }
        }
    }

    fn from_number(n: &serde_json::Number) -> Option<RecordKey> {
        if let Some(i) = n.as_i64() {
            Some(RecordKey::Int(i128::from(i)))
        } else if let Some(u) = n.as_u64() {
            Some(RecordKey::Int(i128::from(u)))
        } else {
            n.as_f64().map(RecordKey::Float)
        }
    }

    fn is_zero(&self) -> bool {
        match self {
            RecordKey::Int(i) => *i == 0,
            RecordKey::Float(f) => *f == 0.0,
            _ => false,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            RecordKey::Bool(_) => 0,
            RecordKey::Int(_) | RecordKey::Float(_) => 1,
            RecordKey::String(_) => 2,
        }
    }
}

/// Exact comparison of an integer with a float.
fn cmp_int_float(int: i128, float: f64) -> Ordering {
    // 2^127: every finite f64 at or beyond it lies outside the i128 range.
    const BOUND: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;
    if float.is_nan() || float >= BOUND {
        return Ordering::Less;
    }
    if float < -BOUND {
        return Ordering::Greater;
    }
    let whole = float.trunc();
    match int.cmp(&(whole as i128)) {
        Ordering::Equal => whole.total_cmp(&float),
        unequal => unequal,
    }
}

impl Ord for RecordKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (RecordKey::Bool(a), RecordKey::Bool(b)) => a.cmp(b),
            (RecordKey::Int(a), RecordKey::Int(b)) => a.cmp(b),
            (RecordKey::Float(a), RecordKey::Float(b)) => a.total_cmp(b),
            (RecordKey::Int(a), RecordKey::Float(b)) => cmp_int_float(*a, *b),
            (RecordKey::Float(a), RecordKey::Int(b)) => cmp_int_float(*b, *a).reverse(),
            (RecordKey::String(a), RecordKey::String(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for RecordKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for RecordKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RecordKey {}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Bool(b) => write!(f, "{b}"),
            RecordKey::Int(n) => write!(f, "{n}"),
            RecordKey::Float(n) => write!(f, "{n}"),
            RecordKey::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RecordKey {
    fn from(value: &str) -> Self {
        RecordKey::String(value.to_string())
    }
}

/// Key-sorted, deduplicated records of one dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedDataset {
    key_field: String,
    records: BTreeMap<RecordKey, Value>,
}

impl MergedDataset {
    pub fn new(key_field: impl Into<String>) -> Self {
        Self {
            key_field: key_field.into(),
            records: BTreeMap::new(),
        }
    }

    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    /// Records in ascending key order.
    pub fn records(&self) -> impl Iterator<Item = &Value> {
        self.records.values()
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &RecordKey> {
        self.records.keys()
    }

    /// Record whose key is the string `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.records.get(&RecordKey::from(key))
    }

    pub fn get_key(&self, key: &RecordKey) -> Option<&Value> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Value> {
        self.records.into_values().collect()
    }
}

impl Serialize for MergedDataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.records.values())
    }
}

/// Merge `files` into one dataset keyed by `key_field`.
///
/// When `schema` is present every file is validated against it before any of
/// its records are admitted.
pub fn merge(
    files: &[PathBuf],
    key_field: &str,
    schema: Option<&DatasetSchema>,
    policy: DuplicatePolicy,
) -> Result<MergedDataset> {
    let mut merged = MergedDataset::new(key_field);
    let mut provenance: BTreeMap<RecordKey, String> = BTreeMap::new();

    for path in files {
        info!("Opening {}", path.display());
        let document = read_document(path)?;

        if let Some(schema) = schema {
            debug!("Validating {} against {}", path.display(), schema.path().display());
            if let Err(violations) = schema.validate(&document) {
                return Err(Error::SchemaValidation {
                    dataset: schema.kind().name().to_string(),
                    path: path.clone(),
                    violations,
                });
            }
        }

        for (idx, record) in into_objects(document).into_iter().enumerate() {
            let ordinal = idx + 1;

            let key = match RecordKey::lookup(&record, key_field) {
                KeyLookup::Present(key) => key,
                KeyLookup::Missing => {
                    return Err(Error::MissingKey {
                        key_field: key_field.to_string(),
                        path: path.clone(),
                        ordinal,
                    })
                }
                KeyLookup::Unsupported(value) => {
                    return Err(Error::InvalidKey {
                        key_field: key_field.to_string(),
                        path: path.clone(),
                        ordinal,
                        value,
                    })
                }
            };

            let here = format!("{} record {}", path.display(), ordinal);
            if let Some(previous) = provenance.get(&key) {
                match policy {
                    DuplicatePolicy::Enforced => {
                        return Err(Error::DuplicateKey {
                            key_field: key_field.to_string(),
                            key: key.to_string(),
                            path: path.clone(),
                            ordinal,
                            previous: previous.clone(),
                        });
                    }
                    DuplicatePolicy::Permissive => {
                        warn!("{key_field}={key} from {previous} replaced by {here}");
                    }
                }
            }

            debug!("{key_field}={key} defined in {here}");
            provenance.insert(key.clone(), here);
            merged.records.insert(key, Value::Object(record));
        }
    }

    Ok(merged)
}

/// Read a fragment file, checking it is an array of objects.
fn read_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|source| Error::SourceRead {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_error = |message: String| Error::SourceParse {
        path: path.to_path_buf(),
        message,
    };

    let document: Value =
        serde_json::from_str(&content).map_err(|e| parse_error(format!("invalid JSON: {e}")))?;
    let Some(entries) = document.as_array() else {
        return Err(parse_error("expected a JSON array at the top level".to_string()));
    };
    if let Some(idx) = entries.iter().position(|entry| !entry.is_object()) {
        return Err(parse_error(format!("record {} is not a JSON object", idx + 1)));
    }
    Ok(document)
}

fn into_objects(document: Value) -> Vec<serde_json::Map<String, Value>> {
    match document {
        Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::Object(record) => Some(record),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}
