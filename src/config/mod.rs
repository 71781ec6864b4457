pub mod options;
pub use options::{ParamDefaults, RootOptions, TreeOptions};
