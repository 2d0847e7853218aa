//! I/O layer: running external executables (`process`) and the filesystem side of a
//! job (`fsops`): scratch workspace, compression and relocation of artifacts.
pub mod process;
pub use process::run_external;

pub mod fsops;
pub use fsops::{ScratchDir, compress, relocate};
