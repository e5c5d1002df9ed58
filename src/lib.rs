//! # IFC Quantities
//!
//! Extracts quote-ready quantities from IFC building models.
//!
//! ## Features
//!
//! - Parse IFC files (IFC2x3 and IFC4 schemas)
//! - Spatial structure, spaces, structural elements and openings
//! - MEP elements classified into building-service systems
//! - Material usage and a quantity summary, normalised to SI units
//! - Export to JSON
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use ifc_quantities::config::Config;
//! use ifc_quantities::extract::extract_file;
//!
//! let result = extract_file(Path::new("model.ifc"), &Config::default()).expect("Failed to extract");
//! println!("Elements: {}", result.quantity_summary.total_elements);
//! println!("Pipe length: {} m", result.quantity_summary.total_pipe_length);
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod model;
pub mod parser;
