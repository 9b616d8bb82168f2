//! Values held by the parsed metadata tree.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{MetaError, MetaResult};

/// One scope of the metadata document, keys kept in document order.
pub type Tree = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    /// a GROUP or OBJECT scope
    Group(Tree),
}

impl Value {
    /// numeric view of the value, integers widened to f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Tree> {
        match self {
            Value::Group(tree) => Some(tree),
            _ => None,
        }
    }

    /// text of a scalar or list; `None` for groups
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Group(_) => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
            Value::Group(tree) => write!(f, "<group of {} keys>", tree.len()),
        }
    }
}

/// Walks `path` from `root`, descending through groups.
///
/// A missing key fails with [`MetaError::MissingField`] carrying the path up to and
/// including that key; descending through a non-group fails with [`MetaError::FieldType`].
pub fn lookup<'a>(root: &'a Tree, path: &[&str]) -> MetaResult<&'a Value> {
    let (last, parents) = match path.split_last() {
        Some(split) => split,
        None => {
            return Err(MetaError::MissingField {
                path: String::new(),
            })
        }
    };

    let mut current = root;
    for (depth, key) in parents.iter().enumerate() {
        let value = current.get(*key).ok_or_else(|| MetaError::MissingField {
            path: path[..=depth].join("/"),
        })?;
        current = value.as_group().ok_or_else(|| MetaError::FieldType {
            path: path[..=depth].join("/"),
            expected: "a group",
        })?;
    }

    current.get(*last).ok_or_else(|| MetaError::MissingField {
        path: path.join("/"),
    })
}

pub fn lookup_group<'a>(root: &'a Tree, path: &[&str]) -> MetaResult<&'a Tree> {
    lookup(root, path)?
        .as_group()
        .ok_or_else(|| MetaError::FieldType {
            path: path.join("/"),
            expected: "a group",
        })
}
