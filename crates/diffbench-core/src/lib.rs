//! Diffusion problem construction and the solver executable's data contract.
//!
//! `special` and `system` build problem instances, `input` encodes them for
//! the solver, `solution` decodes what it writes back.

pub mod input;
pub mod solution;
pub mod special;
pub mod system;
