//! Record introspection: which key each field travels under.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use shapeform_core::{Def, Shape, ShapeId};
use tracing::debug;

use crate::descriptor::{self, TypeDescriptor};
use crate::SchemaError;

static SCHEMAS: LazyLock<RwLock<HashMap<ShapeId, Arc<Schema>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// A declared field and the key it travels under.
#[derive(Debug)]
pub struct FieldMapping {
    /// The record declaring the field.
    pub owner: &'static Shape,
    /// Position among the record's fields.
    pub index: usize,
    /// The field's name in code.
    pub name: &'static str,
    /// The key on the wire: the rename if one was given, else the name.
    pub wire_key: &'static str,
    /// Whether the field's text is already wire-encoded.
    pub encoded: bool,
    /// How the field's value is laid out.
    pub descriptor: Arc<TypeDescriptor>,
}

/// The field collecting keys that match no declared field.
#[derive(Debug)]
pub struct AdditionalPropertiesSlot {
    /// Position among the record's fields.
    pub index: usize,
    /// The field's name in code.
    pub name: &'static str,
    /// How each collected value is laid out.
    pub value: Arc<TypeDescriptor>,
}

/// The wire layout of a record.
#[derive(Debug)]
pub struct Schema {
    owner: &'static Shape,
    fields: Vec<FieldMapping>,
    by_key: HashMap<&'static str, usize>,
    additional: Option<AdditionalPropertiesSlot>,
}

impl Schema {
    /// The record this schema describes.
    pub fn owner(&self) -> &'static Shape {
        self.owner
    }

    /// Declared fields in declaration order, without the additional-properties slot.
    pub fn fields(&self) -> &[FieldMapping] {
        &self.fields
    }

    /// The field travelling under `wire_key`.
    pub fn field(&self, wire_key: &str) -> Option<&FieldMapping> {
        self.by_key.get(wire_key).map(|&at| &self.fields[at])
    }

    /// The additional-properties slot, if the record has one.
    pub fn additional(&self) -> Option<&AdditionalPropertiesSlot> {
        self.additional.as_ref()
    }

    /// Number of fields the record declares, the slot included.
    pub fn field_count(&self) -> usize {
        self.fields.len() + usize::from(self.additional.is_some())
    }
}

/// Returns the schema of a record type, building it on first use.
///
/// Built once per type and shared. Concurrent first uses may each build it;
/// one result wins and the rest are dropped.
pub fn schema_of(shape: &'static Shape) -> Result<Arc<Schema>, SchemaError> {
    let cached = SCHEMAS.read().get(&shape.id()).cloned();
    if let Some(schema) = cached {
        return Ok(schema);
    }

    let schema = Arc::new(introspect(shape)?);
    debug!(
        shape = %shape,
        fields = schema.fields.len(),
        additional = schema.additional.is_some(),
        "built schema"
    );
    Ok(SCHEMAS.write().entry(shape.id()).or_insert(schema).clone())
}

fn introspect(owner: &'static Shape) -> Result<Schema, SchemaError> {
    let Def::Record(record) = owner.def else {
        return Err(SchemaError::UnsupportedShape {
            shape: owner,
            reason: "only records have a schema",
        });
    };

    let mut fields: Vec<FieldMapping> = Vec::with_capacity(record.fields.len());
    let mut by_key = HashMap::with_capacity(record.fields.len());
    let mut additional: Option<AdditionalPropertiesSlot> = None;

    for (index, field) in record.fields.iter().enumerate() {
        if field.is_additional() {
            if let Some(first) = &additional {
                return Err(SchemaError::MultipleAdditionalProperties {
                    shape: owner,
                    first: first.name,
                    second: field.name,
                });
            }
            additional = Some(additional_slot(owner, index, field.name, field.shape())?);
            continue;
        }

        let wire_key = field.wire_key();
        if let Some(&at) = by_key.get(wire_key) {
            let first: &FieldMapping = &fields[at];
            return Err(SchemaError::DuplicateKey {
                shape: owner,
                key: wire_key,
                first: first.name,
                second: field.name,
            });
        }
        by_key.insert(wire_key, fields.len());
        fields.push(FieldMapping {
            owner,
            index,
            name: field.name,
            wire_key,
            encoded: field.is_encoded(),
            descriptor: descriptor::resolve(field.shape())?,
        });
    }

    Ok(Schema {
        owner,
        fields,
        by_key,
        additional,
    })
}

fn additional_slot(
    owner: &'static Shape,
    index: usize,
    name: &'static str,
    shape: &'static Shape,
) -> Result<AdditionalPropertiesSlot, SchemaError> {
    let invalid = |reason| SchemaError::InvalidAdditionalPropertiesShape {
        shape: owner,
        field: name,
        reason,
    };
    let descriptor = descriptor::resolve(shape).map_err(|_| invalid("has an unsupported type"))?;
    let TypeDescriptor::Map { key, value } = &*descriptor else {
        return Err(invalid("must be a map"));
    };
    if !key.is_text() {
        return Err(invalid("must have text keys"));
    }
    Ok(AdditionalPropertiesSlot {
        index,
        name,
        value: value.clone(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use super::*;
    use shapeform_core::{Formable, Loose, record};
    use shapeform_testhelpers::test;

    #[derive(Debug, Default)]
    struct Profile {
        name: String,
        age: u8,
        tags: Vec<String>,
        extra: HashMap<String, Loose>,
    }

    record!(Profile {
        #[form(rename = "n")]
        name: String,
        age: u8,
        tags: Vec<String>,
        #[form(additional)]
        extra: HashMap<String, Loose>,
    });

    #[derive(Debug, Default)]
    struct Clash {
        first: String,
        second: String,
    }

    record!(Clash {
        #[form(rename = "dup")]
        first: String,
        #[form(rename = "dup")]
        second: String,
    });

    #[derive(Debug, Default)]
    struct TwoSlots {
        a: HashMap<String, String>,
        b: HashMap<String, String>,
    }

    record!(TwoSlots {
        #[form(additional)]
        a: HashMap<String, String>,
        #[form(additional)]
        b: HashMap<String, String>,
    });

    #[derive(Debug, Default)]
    struct NumericSlot {
        rest: BTreeMap<u32, String>,
    }

    record!(NumericSlot {
        #[form(additional)]
        rest: BTreeMap<u32, String>,
    });

    #[derive(Debug, Default)]
    struct ListSlot {
        rest: Vec<String>,
    }

    record!(ListSlot {
        #[form(additional)]
        rest: Vec<String>,
    });

    #[test]
    fn fields_map_to_wire_keys() {
        let schema = schema_of(Profile::SHAPE).unwrap();
        let keys: Vec<_> = schema.fields().iter().map(|f| f.wire_key).collect();
        assert_eq!(keys, ["n", "age", "tags"]);
        assert_eq!(schema.field("n").map(|f| f.name), Some("name"));
        assert!(schema.field("name").is_none());
        assert_eq!(schema.field_count(), 4);

        let slot = schema.additional().unwrap();
        assert_eq!((slot.index, slot.name), (3, "extra"));
        assert!(matches!(*slot.value, TypeDescriptor::Raw));
    }

    #[test]
    fn schema_is_built_once() {
        let first = schema_of(Profile::SHAPE).unwrap();
        let second = schema_of(Profile::SHAPE).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let err = schema_of(Clash::SHAPE).unwrap_err();
        assert!(
            matches!(
                err,
                SchemaError::DuplicateKey {
                    key: "dup",
                    first: "first",
                    second: "second",
                    ..
                }
            ),
            "{err:?}"
        );
        // failures are not cached
        assert_eq!(schema_of(Clash::SHAPE).unwrap_err(), err);
    }

    #[test]
    fn one_slot_per_record() {
        let err = schema_of(TwoSlots::SHAPE).unwrap_err();
        assert!(
            matches!(
                err,
                SchemaError::MultipleAdditionalProperties {
                    first: "a",
                    second: "b",
                    ..
                }
            ),
            "{err:?}"
        );
    }

    #[test]
    fn slot_must_be_text_keyed_map() {
        for shape in [NumericSlot::SHAPE, ListSlot::SHAPE] {
            let err = schema_of(shape).unwrap_err();
            assert!(
                matches!(err, SchemaError::InvalidAdditionalPropertiesShape { .. }),
                "{err:?}"
            );
        }
    }

    #[test]
    fn non_records_have_no_schema() {
        let err = schema_of(<Vec<u8> as Formable>::SHAPE).unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedShape { .. }));
    }
}
