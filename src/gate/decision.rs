//! Path classification and the gatekeeper decision.

use crate::paths;

/// Coarse category of a request path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathClass {
    /// Starts with one of the protected prefixes.
    Protected,
    /// Exactly `/login` or `/register`.
    AuthEntry,
    /// Under `/api/`.
    Api,
    Other,
}

/// What the gatekeeper does with a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    RedirectToDashboard,
    RedirectToLogin,
    Forward,
    /// Forward with `Authorization: Bearer <token>` set from the request token.
    ForwardWithAuthorization,
}

/// Protected prefixes plus the fixed auth-entry and API rules.
#[derive(Clone, Debug)]
pub struct GatePolicy {
    protected_prefixes: Vec<String>,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self::new(paths::DEFAULT_PROTECTED.iter().map(ToString::to_string))
    }
}

impl GatePolicy {
    /// Build a policy from protected prefixes. Blank entries are dropped.
    #[must_use]
    pub fn new<I, S>(protected_prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let protected_prefixes = protected_prefixes
            .into_iter()
            .map(Into::into)
            .map(|prefix: String| prefix.trim().to_string())
            .filter(|prefix| !prefix.is_empty())
            .collect();

        Self { protected_prefixes }
    }

    #[must_use]
    pub fn protected_prefixes(&self) -> &[String] {
        &self.protected_prefixes
    }

    #[must_use]
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    #[must_use]
    pub fn is_auth_entry(path: &str) -> bool {
        paths::AUTH_ENTRY.contains(&path)
    }

    #[must_use]
    pub fn is_api(path: &str) -> bool {
        path.starts_with(paths::API_PREFIX)
    }

    /// Classify a path. Auth-entry wins over protected, protected over API.
    #[must_use]
    pub fn classify(&self, path: &str) -> PathClass {
        if Self::is_auth_entry(path) {
            PathClass::AuthEntry
        } else if self.is_protected(path) {
            PathClass::Protected
        } else if Self::is_api(path) {
            PathClass::Api
        } else {
            PathClass::Other
        }
    }
}

/// Decide the outcome for `path` given only whether a token is present.
///
/// The rules are evaluated in order, so a path that is both protected and
/// under `/api/` is redirected when anonymous and gets the header otherwise.
#[must_use]
pub fn decide(policy: &GatePolicy, path: &str, token_present: bool) -> Decision {
    if token_present && GatePolicy::is_auth_entry(path) {
        return Decision::RedirectToDashboard;
    }

    if !token_present && policy.is_protected(path) {
        return Decision::RedirectToLogin;
    }

    if token_present && GatePolicy::is_api(path) {
        return Decision::ForwardWithAuthorization;
    }

    Decision::Forward
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_prefix_without_token_redirects_to_login() {
        let policy = GatePolicy::default();
        for path in ["/dashboard", "/dashboard/settings", "/profile", "/profiles"] {
            assert_eq!(decide(&policy, path, false), Decision::RedirectToLogin, "{path}");
        }
    }

    #[test]
    fn protected_prefix_with_token_forwards() {
        let policy = GatePolicy::default();
        assert_eq!(decide(&policy, "/dashboard", true), Decision::Forward);
    }

    #[test]
    fn auth_entry_with_token_redirects_to_dashboard() {
        let policy = GatePolicy::default();
        assert_eq!(decide(&policy, "/login", true), Decision::RedirectToDashboard);
        assert_eq!(decide(&policy, "/register", true), Decision::RedirectToDashboard);
    }

    #[test]
    fn auth_entry_is_exact_match() {
        let policy = GatePolicy::default();
        assert_eq!(decide(&policy, "/login/help", true), Decision::Forward);
        assert_eq!(decide(&policy, "/login", false), Decision::Forward);
    }

    #[test]
    fn api_with_token_gets_authorization() {
        let policy = GatePolicy::default();
        assert_eq!(
            decide(&policy, "/api/profile", true),
            Decision::ForwardWithAuthorization
        );
        assert_eq!(decide(&policy, "/api/profile", false), Decision::Forward);
        // "/api" alone is not under the prefix
        assert_eq!(decide(&policy, "/api", true), Decision::Forward);
    }

    #[test]
    fn protected_api_path_follows_rule_order() {
        let policy = GatePolicy::new(["/api/private"]);
        assert_eq!(
            decide(&policy, "/api/private/x", false),
            Decision::RedirectToLogin
        );
        assert_eq!(
            decide(&policy, "/api/private/x", true),
            Decision::ForwardWithAuthorization
        );
    }

    #[test]
    fn custom_prefixes_replace_defaults() {
        let policy = GatePolicy::new(["/admin", "  ", "/billing "]);
        assert_eq!(policy.protected_prefixes(), ["/admin", "/billing"]);
        assert_eq!(decide(&policy, "/dashboard", false), Decision::Forward);
        assert_eq!(decide(&policy, "/billing/2024", false), Decision::RedirectToLogin);
    }

    #[test]
    fn classify_paths() {
        let policy = GatePolicy::default();
        assert_eq!(policy.classify("/login"), PathClass::AuthEntry);
        assert_eq!(policy.classify("/register"), PathClass::AuthEntry);
        assert_eq!(policy.classify("/dashboard/x"), PathClass::Protected);
        assert_eq!(policy.classify("/api/users"), PathClass::Api);
        assert_eq!(policy.classify("/"), PathClass::Other);
    }
}
