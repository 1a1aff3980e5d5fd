//! Pure gateway rules and types: sessions, route classification, upstream
//! failure taxonomy, locale wording, and the result envelope.
//!
//! Nothing in this module touches the network or the framework; inbound and
//! outbound adapters translate to and from these types.

pub mod auth;
pub mod envelope;
pub mod error;
pub mod locale;
pub mod routes;
pub mod session;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::envelope::Envelope;
pub use self::error::{ClassifiedError, MessageSet, UpstreamErrorKind, UpstreamFailure, classify};
pub use self::locale::Locale;
pub use self::routes::{GuardDecision, RouteClass, classify_path, decide, is_boundary_excluded};
pub use self::session::{GuardianProfile, GuardianSession};
