//! # Materials
//!
//! Concrete and reinforcing-steel properties used by the NSR-10 column
//! engine.
//!
//! ## Example
//!
//! ```rust
//! use nsr_core::materials::{beta1, RebarSize, ES_MPA};
//!
//! let a_over_c = beta1(28.0);
//! let bar = RebarSize::No6;
//! println!("β1 = {a_over_c}, {bar} area = {:.1} mm², Es = {ES_MPA} MPa", bar.area_mm2());
//! ```

pub mod concrete;
pub mod rebar;

pub use concrete::{beta1, pure_axial_capacity_n, EPSILON_CU, STRESS_BLOCK_INTENSITY};
pub use rebar::{bar_area_mm2, yield_strain, RebarSize, DEFAULT_FY_MPA, ES_MPA};
