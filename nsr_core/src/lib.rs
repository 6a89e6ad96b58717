//! # nsr_core - Column Interaction Surface Engine
//!
//! `nsr_core` generates the biaxial φPn–φMnx–φMny interaction surface of
//! tied rectangular reinforced-concrete columns per the Colombian code
//! NSR-10 (Title C), together with the NSR-10 load combinations that turn
//! service actions into demands. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types with codes and hints
//!
//! ## Quick Start
//!
//! ```rust
//! use nsr_core::calculations::{generate_interaction_surface, SweepOptions};
//! use nsr_core::project::GlobalSettings;
//!
//! let column = GlobalSettings::default().new_column("C-1", 40.0, 50.0, 3, 1);
//! let surface = generate_interaction_surface(&column, &SweepOptions::default()).unwrap();
//! println!("{}", surface.message);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Interaction surface generator and its building blocks
//! - [`loads`] - NSR-10 load types, combinations and column load cases
//! - [`materials`] - Concrete and reinforcing steel properties
//! - [`project`] - Project container, settings and surface cache
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod loads;
pub mod materials;
pub mod project;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{generate_interaction_surface, ColumnInput, InteractionSurface, SweepOptions};
pub use errors::{CalcError, CalcResult};
pub use project::{GlobalSettings, Project, ProjectMetadata, SurfaceCache};
