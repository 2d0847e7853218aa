//! Core building blocks: options and configuration (`params`), file name derivation
//! (`naming`), defaulting (`defaults`) and command construction (`command`). These are
//! pure primitives consumed by the high-level `api` module.
pub mod command;
pub mod defaults;
pub mod naming;
pub mod params;
