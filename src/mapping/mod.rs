//! Index mapping declarations
//!
//! Declares how the store should index the fields of a storage path: a
//! named-field → field-type map serialized as `{"properties": {...}}`.
//! Field names are unique; insertion order is irrelevant.

use std::collections::BTreeMap;

use serde::Serialize;

/// Field-type tokens the engine indexes by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Date,
    GeoPoint,
    String,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Boolean,
    Null,
}

impl FieldType {
    /// Returns the wire token for this field type
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Date => "date",
            FieldType::GeoPoint => "geo_point",
            FieldType::String => "string",
            FieldType::Byte => "byte",
            FieldType::Short => "short",
            FieldType::Integer => "integer",
            FieldType::Long => "long",
            FieldType::Float => "float",
            FieldType::Double => "double",
            FieldType::Boolean => "boolean",
            FieldType::Null => "null",
        }
    }
}

/// One field declaration: `{"type": token}`.
#[derive(Debug, Clone, Serialize)]
struct FieldSpec {
    #[serde(rename = "type")]
    field_type: FieldType,
}

/// Chainable builder for a storage path's mapping declaration.
///
/// ```
/// use typesearch::{FieldType, MappingBuilder};
///
/// let json = MappingBuilder::new()
///     .add_mapping("location", FieldType::GeoPoint)
///     .to_json()
///     .unwrap();
/// assert_eq!(json, r#"{"properties":{"location":{"type":"geo_point"}}}"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MappingBuilder {
    properties: BTreeMap<String, FieldSpec>,
}

impl MappingBuilder {
    /// Returns an empty mapping declaration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the index type for a named field. Re-declaring a field
    /// overwrites its previous type.
    pub fn add_mapping(mut self, field: &str, field_type: FieldType) -> Self {
        self.properties
            .insert(field.to_owned(), FieldSpec { field_type });
        self
    }

    /// Serializes the declaration for the engine's mapping endpoint.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        #[derive(Serialize)]
        struct MappingRequest<'a> {
            properties: &'a BTreeMap<String, FieldSpec>,
        }
        serde_json::to_string(&MappingRequest {
            properties: &self.properties,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_match_the_engine_vocabulary() {
        assert_eq!(FieldType::GeoPoint.as_str(), "geo_point");
        assert_eq!(FieldType::Boolean.as_str(), "boolean");
        assert_eq!(
            serde_json::to_string(&FieldType::GeoPoint).unwrap(),
            r#""geo_point""#
        );
    }

    #[test]
    fn declarations_nest_under_properties() {
        let json = MappingBuilder::new()
            .add_mapping("price", FieldType::Double)
            .add_mapping("name", FieldType::String)
            .to_json()
            .unwrap();
        assert_eq!(
            json,
            r#"{"properties":{"name":{"type":"string"},"price":{"type":"double"}}}"#
        );
    }

    #[test]
    fn redeclaring_a_field_overwrites_it() {
        let json = MappingBuilder::new()
            .add_mapping("price", FieldType::Float)
            .add_mapping("price", FieldType::Double)
            .to_json()
            .unwrap();
        assert_eq!(json, r#"{"properties":{"price":{"type":"double"}}}"#);
    }
}
