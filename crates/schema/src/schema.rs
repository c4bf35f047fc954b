use crate::SolType;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// A single member of an EIP-712 struct type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FieldDef {
    /// The member name, taken verbatim from the JSON key.
    pub name: String,
    /// The member type.
    #[serde(rename = "type")]
    pub ty: SolType,
}

impl FieldDef {
    /// Create a new field descriptor.
    pub fn new(name: impl Into<String>, ty: SolType) -> Self {
        Self { name: name.into(), ty }
    }

    fn to_json(&self) -> Value {
        let mut object = Map::with_capacity(2);
        object.insert("name".to_string(), Value::String(self.name.clone()));
        object.insert("type".to_string(), Value::String(self.ty.to_string()));
        Value::Object(object)
    }
}

/// EIP-712 type definitions, keyed by type name.
///
/// Serializes to the `types` object of an `eth_signTypedData_v4` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TypeSchema(BTreeMap<String, Vec<FieldDef>>);

impl TypeSchema {
    /// Get the fields of a type.
    pub fn get(&self, name: &str) -> Option<&[FieldDef]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// True if the type is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of defined types.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no types are defined.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the type definitions, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FieldDef])> {
        self.0.iter().map(|(name, fields)| (name.as_str(), fields.as_slice()))
    }

    /// Render as the JSON `types` object.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(name, fields)| {
                    (name.clone(), Value::Array(fields.iter().map(FieldDef::to_json).collect()))
                })
                .collect(),
        )
    }

    /// The EIP-712 `encodeType` string of `primary_type`: the primary type
    /// followed by every referenced struct type, sorted by name.
    pub fn encode_type(&self, primary_type: &str) -> Option<String> {
        let mut deps = BTreeSet::new();
        self.collect_deps(primary_type, &mut deps)?;
        deps.remove(primary_type);

        let mut out = self.encode_single(primary_type)?;
        for dep in deps {
            out.push_str(&self.encode_single(dep)?);
        }
        Some(out)
    }

    fn encode_single(&self, name: &str) -> Option<String> {
        let members = self
            .get(name)?
            .iter()
            .map(|field| format!("{} {}", field.ty, field.name))
            .collect::<Vec<_>>()
            .join(",");
        Some(format!("{name}({members})"))
    }

    fn collect_deps<'a>(&'a self, name: &'a str, deps: &mut BTreeSet<&'a str>) -> Option<()> {
        if !deps.insert(name) {
            return Some(());
        }
        for field in self.get(name)? {
            if let Some(dep) = field.ty.struct_name() {
                self.collect_deps(dep, deps)?;
            }
        }
        Some(())
    }

    /// Register a struct type under `base`, or under the first free
    /// `base_N` if `base` already holds a different definition. Returns the
    /// name the definition is stored under.
    pub(crate) fn declare(&mut self, base: String, fields: Vec<FieldDef>) -> String {
        let mut name = base.clone();
        let mut suffix = 2usize;
        loop {
            match self.0.get(&name) {
                None => {
                    self.0.insert(name.clone(), fields);
                    return name;
                }
                Some(existing) if *existing == fields => return name,
                Some(_) => {
                    name = format!("{base}_{suffix}");
                    suffix += 1;
                }
            }
        }
    }

    pub(crate) fn insert(&mut self, name: String, fields: Vec<FieldDef>) {
        self.0.insert(name, fields);
    }
}
