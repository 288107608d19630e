//! Parser and loader for FTR-style site extraction configs.
//!
//! A site config is a line-oriented text file describing how to pull an
//! article out of one site's pages: selectors for title, body, author and
//! date, elements to strip, string replacements, request headers and login
//! parameters. Selectors are stored as opaque strings for an extractor to use.
//!
//! # Example
//!
//! ```rust
//! use siteconf_core::ConfigParser;
//!
//! let config = ConfigParser::parse_string(
//!     "title: //h1\nhttp_header(Cookie): consent=yes\nfind_string: <p />\nreplace_string: <br />\n",
//! );
//!
//! assert_eq!(config.title, vec!["//h1"]);
//! assert_eq!(config.http_headers["Cookie"], " consent=yes");
//! assert_eq!(config.string_replacer.get(" <p />"), Some(" <br />"));
//! ```

pub mod error;
pub mod siteconfig;

pub use error::{Result, SiteconfError};
#[cfg(feature = "loader")]
pub use siteconfig::{ConfigLoader, LoadFailure, LoadReport, LoaderConfig, LoaderConfigBuilder};
pub use siteconfig::{ConfigParser, SiteConfig, SiteConfigRegistry, TextReplacer, parse_call};
