mod helpers;
mod messages;
mod secret;

pub use helpers::{env_or_default, parse_boolean_flag};
pub use messages::{Locale, LocaleParseError, MessageCatalog, UNKNOWN_SERVICE_ERROR};
pub use secret::Secret;
