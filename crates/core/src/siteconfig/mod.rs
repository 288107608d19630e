pub mod call;
pub mod directives;
#[cfg(feature = "loader")]
pub mod loader;
pub mod parser;
pub mod processing;
pub mod registry;

pub use call::{Call, parse_call};
pub use directives::{BoolField, Directive, MultiField, Replacements, SiteConfig, StringField};
#[cfg(feature = "loader")]
pub use loader::{ConfigLoader, LoadFailure, LoadReport, LoaderConfig, LoaderConfigBuilder};
pub use parser::ConfigParser;
pub use processing::TextReplacer;
pub use registry::SiteConfigRegistry;
