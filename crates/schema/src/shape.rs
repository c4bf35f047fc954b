//! Unnamed structural types.
//!
//! Inference runs in two passes. This one walks the JSON value and computes
//! its shape, merging array elements. Struct names are only assigned
//! afterwards, once every array has been unified.

use crate::{InferenceError, SolType, UnsupportedReason};
use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Shape {
    Scalar(SolType),
    Object(Vec<(String, Shape)>),
    Array(Box<Shape>),
}

impl Shape {
    /// Shapes of the non-null fields of `object`, in insertion order.
    pub(crate) fn of_object(
        object: &Map<String, Value>,
        path: &str,
    ) -> Result<Vec<(String, Self)>, InferenceError> {
        object
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| {
                Self::of_value(value, &field_path(path, key)).map(|shape| (key.clone(), shape))
            })
            .collect()
    }

    fn of_value(value: &Value, path: &str) -> Result<Self, InferenceError> {
        match value {
            Value::String(_) => Ok(Self::Scalar(SolType::String)),
            Value::Bool(_) => Ok(Self::Scalar(SolType::Bool)),
            Value::Number(number) => Self::of_number(number, path),
            Value::Object(object) => Self::of_object(object, path).map(Self::Object),
            Value::Array(items) => Self::of_array(items, path),
            Value::Null => Err(InferenceError::unsupported(path, UnsupportedReason::Null)),
        }
    }

    fn of_number(number: &Number, path: &str) -> Result<Self, InferenceError> {
        if let Some(value) = number.as_u64() {
            Ok(Self::Scalar(SolType::uint_for(value)))
        } else if let Some(value) = number.as_i64() {
            Ok(Self::Scalar(SolType::int_for(value)))
        } else {
            Err(InferenceError::unsupported(path, UnsupportedReason::NonInteger))
        }
    }

    fn of_array(items: &[Value], path: &str) -> Result<Self, InferenceError> {
        let (first, rest) = items
            .split_first()
            .ok_or_else(|| InferenceError::unsupported(path, UnsupportedReason::EmptyArray))?;

        let mut element = Self::of_value(first, &index_path(path, 0))?;
        for (offset, item) in rest.iter().enumerate() {
            let item_path = index_path(path, offset + 1);
            let shape = Self::of_value(item, &item_path)?;
            element = element.merge(shape).ok_or_else(|| {
                InferenceError::unsupported(&item_path, UnsupportedReason::MixedArray)
            })?;
        }
        Ok(Self::Array(Box::new(element)))
    }

    /// Unify two element shapes. Integers widen to hold both values, objects
    /// must have identical keys in identical order.
    fn merge(self, other: Self) -> Option<Self> {
        match (self, other) {
            (Self::Scalar(left), Self::Scalar(right)) => {
                merge_scalars(left, right).map(Self::Scalar)
            }
            (Self::Array(left), Self::Array(right)) => {
                (*left).merge(*right).map(|shape| Self::Array(Box::new(shape)))
            }
            (Self::Object(left), Self::Object(right)) => {
                if left.len() != right.len() {
                    return None;
                }
                left.into_iter()
                    .zip(right)
                    .map(|((key, left), (other_key, right))| {
                        if key != other_key {
                            return None;
                        }
                        left.merge(right).map(|shape| (key, shape))
                    })
                    .collect::<Option<Vec<_>>>()
                    .map(Self::Object)
            }
            _ => None,
        }
    }
}

fn merge_scalars(left: SolType, right: SolType) -> Option<SolType> {
    match (left, right) {
        (SolType::Uint(a), SolType::Uint(b)) => Some(SolType::Uint(a.max(b))),
        (SolType::Int(a), SolType::Int(b)) => Some(SolType::Int(a.max(b))),
        // an unsigned value needs one more byte once it shares a signed type
        (SolType::Uint(u), SolType::Int(i)) | (SolType::Int(i), SolType::Uint(u)) => {
            Some(SolType::Int(i.max(u + 8).min(256)))
        }
        (left, right) if left == right => Some(left),
        _ => None,
    }
}

fn field_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}
