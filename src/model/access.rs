//! The capabilities the extraction pipeline needs from a loaded model.

use indexmap::IndexMap;
use std::fmt;

use super::MaterialAssignment;
use crate::error::AccessError;
use crate::parser::{StepHeader, StepValue};

/// Model-local entity handle (the `#123` instance number).
pub type EntityId = u64;

/// Quantity kinds a unit scale can be computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Length,
    Area,
    Volume,
}

impl UnitKind {
    /// The `IfcUnitEnum` value declaring this kind.
    #[must_use]
    pub fn unit_type(self) -> &'static str {
        match self {
            UnitKind::Length => "LENGTHUNIT",
            UnitKind::Area => "AREAUNIT",
            UnitKind::Volume => "VOLUMEUNIT",
        }
    }

    /// Dimension exponent applied to SI prefixes.
    #[must_use]
    pub fn power(self) -> i32 {
        match self {
            UnitKind::Length => 1,
            UnitKind::Area => 2,
            UnitKind::Volume => 3,
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnitKind::Length => "length",
            UnitKind::Area => "area",
            UnitKind::Volume => "volume",
        })
    }
}

/// Result of reading a named attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Attribute<'a> {
    /// The entity's type does not define this attribute.
    Absent,
    /// Defined but not set (`$`).
    Unset,
    Value(&'a StepValue),
}

impl<'a> Attribute<'a> {
    #[must_use]
    pub fn value(self) -> Option<&'a StepValue> {
        match self {
            Attribute::Value(v) => Some(v),
            Attribute::Absent | Attribute::Unset => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> Option<&'a str> {
        self.value().and_then(StepValue::as_str)
    }

    #[must_use]
    pub fn as_f64(self) -> Option<f64> {
        self.value().and_then(StepValue::as_f64)
    }

    #[must_use]
    pub fn as_reference(self) -> Option<EntityId> {
        self.value().and_then(StepValue::as_reference)
    }

    /// String value, or empty when absent or unset.
    #[must_use]
    pub fn text(self) -> String {
        self.as_str().unwrap_or_default().to_string()
    }
}

/// A named bag of values: a property set or a quantity set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySet {
    pub name: String,
    pub values: IndexMap<String, StepValue>,
}

/// Read-only access to an already-loaded building model.
pub trait ModelAccess {
    /// Declared schema identifier, e.g. `IFC4`.
    fn schema(&self) -> &str;

    fn header(&self) -> &StepHeader;

    /// All entities of `tag` including subtypes, in model order.
    ///
    /// Returns [`AccessError::UnknownEntityType`] when the tag does not exist
    /// in this schema version, distinct from `Ok` with no matches.
    fn entities_of_type(&self, tag: &str) -> Result<Vec<EntityId>, AccessError>;

    /// Entity-type tag, e.g. `IfcPipeSegment`.
    fn ifc_type(&self, id: EntityId) -> Option<&str>;

    fn attribute(&self, id: EntityId, name: &str) -> Attribute<'_>;

    /// Containing spatial-structure node.
    fn container(&self, id: EntityId) -> Option<EntityId>;

    /// Type object assigned to an occurrence.
    fn type_definition(&self, id: EntityId) -> Option<EntityId>;

    fn material(&self, id: EntityId) -> Result<Option<MaterialAssignment>, AccessError>;

    fn property_sets(&self, id: EntityId) -> Vec<PropertySet>;

    fn quantity_sets(&self, id: EntityId) -> Vec<PropertySet>;

    /// Factor converting values of `kind` to metres, square metres or cubic metres.
    fn unit_scale(&self, kind: UnitKind) -> Result<f64, AccessError>;
}
