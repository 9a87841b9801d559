//! The functional core: pure transforms from parsed inputs to generated
//! artifacts. Nothing in here touches the filesystem.
pub mod clangd;
pub mod classifier;
pub mod color;
pub mod combine;
pub mod compare;
pub mod coverage;
pub mod grammar;
pub mod readme;
pub mod scope_name;
pub mod settings;
pub mod theme;
pub mod tokens;

pub use classifier::Classifier;
