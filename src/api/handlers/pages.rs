//! Auth-entry pages. The login and registration flows belong to the external
//! auth service; these pages only give the redirects somewhere to land.

use axum::response::Html;

use super::page;

pub async fn login() -> Html<String> {
    Html(page("Login", "<h1>Login</h1><p>Sign in to continue.</p>"))
}

pub async fn register() -> Html<String> {
    Html(page("Register", "<h1>Register</h1><p>Create an account to continue.</p>"))
}
