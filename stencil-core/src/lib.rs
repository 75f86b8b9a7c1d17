//! STENCIL Core - Shared Types
//!
//! Pure data structures with no engine behavior. The engine crate and the
//! test utilities depend on this crate; it depends on nothing internal.

pub mod error;
pub mod expression;
pub mod output_format;
pub mod settings;
pub mod version;

pub use error::{InvalidSettingError, VersionError, VersionParseError};
pub use expression::{Expression, SourceLocation};
pub use output_format::{
    builtin_output_format, HtmlOutputFormat, OutputFormat, PlainTextOutputFormat,
    RtfOutputFormat, UndefinedOutputFormat, XmlOutputFormat, BUILTIN_OUTPUT_FORMAT_NAMES,
};
pub use settings::{AutoEscapingPolicy, NamingConvention, SettingEnum, TagSyntax};
pub use version::{Version, MAX_MINOR_OR_MICRO, VERSION_2_3_21, VERSION_3_0_0, VERSION_INT_3_0_0};
