//! STENCIL Engine - Configuration Façade
//!
//! Validates everything a caller can hand the engine before it is stored:
//! the incompatible-improvements version is gated against what this build
//! supports, and enumerated settings are checked against their legal codes.
//! Rejected input leaves existing state untouched.
//!
//! ```
//! use stencil_engine::{ConfigurationBuilder, EngineInstallation, TagSyntax, VERSION_3_0_0};
//!
//! let installation = EngineInstallation::current();
//! let cfg = ConfigurationBuilder::new(VERSION_3_0_0)
//!     .tag_syntax(TagSyntax::SquareBracket)
//!     .build(&installation)
//!     .unwrap();
//! assert_eq!(cfg.template_exception_handler().name(), "rethrow");
//! ```

pub mod builder;
pub mod cache;
pub mod configuration;
pub mod diagnostics;
pub mod error;
pub mod exception;
pub mod handler;
pub mod installation;
pub mod settings;
pub mod template;
pub mod validation;

pub(crate) mod internal;

pub use builder::{ConfigurationBuilder, TemplateBuilder};
pub use cache::{cache_storage_from_setting, CacheStorage, MruCacheStorage, StrongCacheStorage};
pub use configuration::{
    Configuration, AUTO_ESCAPING_POLICY_KEY, CACHE_STORAGE_KEY, INCOMPATIBLE_IMPROVEMENTS_KEY,
    NAMING_CONVENTION_KEY, OUTPUT_FORMAT_KEY, TAG_SYNTAX_KEY, TEMPLATE_EXCEPTION_HANDLER_KEY,
};
pub use diagnostics::describe;
pub use error::{EngineError, EngineResult, SettingError};
pub use exception::TemplateException;
pub use handler::{
    handler_by_name, DebugHandler, HtmlDebugHandler, IgnoreHandler, RethrowHandler,
    TemplateExceptionHandler,
};
pub use installation::{
    check_version_supported, EngineInstallation, INSTALLED_VERSION, MINIMUM_SUPPORTED_VERSION,
};
pub use settings::{SettingsFile, DEFAULT_VALUE, ENV_PREFIX};
pub use template::Template;
pub use validation::{validate_auto_escaping_policy, validate_naming_convention, validate_tag_syntax};

// Re-export core types for convenience
pub use stencil_core::{
    builtin_output_format, AutoEscapingPolicy, Expression, HtmlOutputFormat, InvalidSettingError,
    NamingConvention, OutputFormat, PlainTextOutputFormat, RtfOutputFormat, SettingEnum,
    SourceLocation, TagSyntax, UndefinedOutputFormat, Version, VersionError, VersionParseError,
    XmlOutputFormat, BUILTIN_OUTPUT_FORMAT_NAMES, VERSION_2_3_21, VERSION_3_0_0,
    VERSION_INT_3_0_0,
};
