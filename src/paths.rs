//! Fixed route targets shared by the gatekeeper, the dashboard and the server.

pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const DASHBOARD: &str = "/dashboard";
pub const LOGOUT: &str = "/logout";
pub const HEALTH: &str = "/health";

/// Paths under this prefix are API calls and get the bearer header injected.
pub const API_PREFIX: &str = "/api/";

/// Auth-entry pages, matched exactly.
pub const AUTH_ENTRY: [&str; 2] = [LOGIN, REGISTER];

/// Default protected prefixes, matched with `starts_with`.
pub const DEFAULT_PROTECTED: [&str; 2] = ["/dashboard", "/profile"];
