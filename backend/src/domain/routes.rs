//! Table-driven path classification and the navigation guard decision.
//!
//! The path lists are plain ordered data so the match rule stays a single
//! reusable predicate: the root path matches exactly, every other entry
//! matches by prefix.

/// Path guardians are sent to when no session credential is present.
pub const LOGIN_PATH: &str = "/login";
/// Default dashboard page for authenticated guardians.
pub const DASHBOARD_PATH: &str = "/activities";

const ROOT_PATH: &str = "/";

/// Screens that require an authenticated session.
pub const PROTECTED_PATHS: &[&str] = &[
    "/activities",
    "/devoir",
    "/annual-program",
    "/time-slots",
    "/absences",
    "/points",
    "/report",
    "/messages",
    "/profile",
    "/students",
    "/invoices",
    "/policy",
    ROOT_PATH,
];

/// Screens only reachable without a session.
pub const AUTH_PATHS: &[&str] = &[LOGIN_PATH];

/// Prefixes resolved at the network boundary before guard logic runs: the API
/// surface, health probes, and static assets are never subject to auth
/// decisions.
pub const BOUNDARY_EXCLUDED_PREFIXES: &[&str] = &["/api", "/health", "/static", "/favicon.ico"];

/// Classification of a requested path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Requires a session credential.
    Protected,
    /// Only reachable while logged out (the login screen).
    AuthOnly,
    /// Passed through regardless of session state.
    Public,
}

/// Terminal outcome of a guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectToDashboard,
}

fn matches_entry(entry: &str, path: &str) -> bool {
    if entry == ROOT_PATH {
        path == ROOT_PATH
    } else {
        path == entry || path.starts_with(entry)
    }
}

/// Classify a path against the static tables.
pub fn classify_path(path: &str) -> RouteClass {
    if AUTH_PATHS.iter().any(|entry| path.starts_with(entry)) {
        return RouteClass::AuthOnly;
    }
    if PROTECTED_PATHS
        .iter()
        .any(|entry| matches_entry(entry, path))
    {
        return RouteClass::Protected;
    }
    RouteClass::Public
}

/// Evaluate the guard for one navigation.
///
/// Pure function of the requested path and credential presence; the only
/// terminal outcomes are the three [`GuardDecision`] variants.
pub fn decide(path: &str, credential_present: bool) -> GuardDecision {
    match (credential_present, classify_path(path)) {
        (false, RouteClass::Protected) => GuardDecision::RedirectToLogin,
        (true, RouteClass::AuthOnly) => GuardDecision::RedirectToDashboard,
        (true, _) if path == ROOT_PATH => GuardDecision::RedirectToDashboard,
        _ => GuardDecision::Allow,
    }
}

/// Whether the boundary matcher excludes this path from guard evaluation.
pub fn is_boundary_excluded(path: &str) -> bool {
    BOUNDARY_EXCLUDED_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}
