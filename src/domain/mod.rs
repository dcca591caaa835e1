pub mod command;
pub mod constant;
pub mod error;
pub mod language;

pub use error::I18nError;
pub use language::LanguageCode;
