pub mod access;
pub mod element;
pub mod material;
pub mod project;
pub mod summary;
pub mod value;

pub use access::{Attribute, EntityId, ModelAccess, PropertySet, UnitKind};
pub use element::{Element, MepElement, Opening, SystemType};
pub use material::{Material, MaterialAssignment, MaterialLayerSet, MaterialProfileSet, MaterialUsage};
pub use project::{
    Building, ExtractionResult, FileHeader, ProjectInfo, Site, Space, SpatialStructure, Storey,
};
pub use summary::QuantitySummary;
pub use value::{ToValue, Value};
