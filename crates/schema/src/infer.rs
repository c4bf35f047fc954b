use crate::{shape::Shape, FieldDef, InferenceError, SolType, TypeSchema};
use serde_json::Value;

/// The result of [`infer_types`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredTypes {
    /// Name of the root struct type.
    pub primary_type: String,
    /// All struct types, including the primary type.
    pub types: TypeSchema,
}

/// Infer the EIP-712 types describing `value`, rooted at `primary_type`.
///
/// - strings map to `string`, booleans to `bool`
/// - integers map to the smallest `uintN` (or `intN` if negative) holding them
/// - objects become struct types named `<parent>_<key>`
/// - arrays become `T[]` of their unified element type
/// - `null` fields are omitted
///
/// Field order follows the insertion order of `value`.
pub fn infer_types(value: &Value, primary_type: &str) -> Result<InferredTypes, InferenceError> {
    let object = value.as_object().ok_or(InferenceError::NotAnObject)?;
    let shape = Shape::of_object(object, "")?;

    let mut types = TypeSchema::default();
    let fields = resolve_fields(&mut types, primary_type, shape);
    types.insert(primary_type.to_string(), fields);

    Ok(InferredTypes { primary_type: primary_type.to_string(), types })
}

fn resolve_fields(
    types: &mut TypeSchema,
    owner: &str,
    fields: Vec<(String, Shape)>,
) -> Vec<FieldDef> {
    fields
        .into_iter()
        .map(|(key, shape)| {
            let ty = resolve(types, owner, &key, shape);
            FieldDef::new(key, ty)
        })
        .collect()
}

fn resolve(types: &mut TypeSchema, owner: &str, key: &str, shape: Shape) -> SolType {
    match shape {
        Shape::Scalar(ty) => ty,
        Shape::Array(element) => SolType::Array(Box::new(resolve(types, owner, key, *element))),
        Shape::Object(fields) => {
            let base = format!("{owner}_{}", sanitize(key));
            let fields = resolve_fields(types, &base, fields);
            SolType::Struct(types.declare(base, fields))
        }
    }
}

/// Replace every character that is not valid in a Solidity identifier.
fn sanitize(key: &str) -> String {
    key.chars().map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' }).collect()
}
