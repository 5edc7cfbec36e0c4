//! Pages
//!
//! Minimal server-rendered pages sitting behind the inbound gate. Forms
//! post to the JSON auth endpoints and follow the callback on success.

use std::sync::Arc;

use auth::application::{InboundGate, ValidateSessionUseCase};
use auth::config::AuthConfig;
use auth::domain::CredentialStore;
use auth::models::AuthUser;
use auth::presentation::AuthAppState;
use auth::presentation::cookies::{read_cookie_pair, render_writes};
use auth::AuthResult;
use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderMap, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;

pub fn router<S>(store: Arc<S>, config: Arc<AuthConfig>) -> Router
where
    S: CredentialStore + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(root::<S>))
        .route("/dashboard", get(dashboard::<S>))
        .route("/auth/login", get(login_page::<S>))
        .route("/auth/register", get(register_page::<S>))
        .with_state(AuthAppState { store, config })
}

/// GET /
///
/// Only reached with a cookie present; the gate sends everyone else to login.
async fn root<S>(State(state): State<AuthAppState<S>>) -> Redirect
where
    S: CredentialStore + Send + Sync + 'static,
{
    Redirect::to(&state.config.gate.landing_path)
}

/// GET /dashboard
///
/// Cookie presence got the visitor past the gate; the session itself is
/// checked here. A rejected session is logged out and sent to login; an
/// unreachable store is a 502 that leaves the cookies alone.
async fn dashboard<S>(
    State(state): State<AuthAppState<S>>,
    uri: Uri,
    headers: HeaderMap,
) -> AuthResult<Response>
where
    S: CredentialStore + Send + Sync + 'static,
{
    let cookies = read_cookie_pair(&headers, &state.config);

    let output = ValidateSessionUseCase::new(state.store.clone())
        .execute(&cookies)
        .await?;

    let set_cookies = render_writes(&state.config, &output.writes)?;

    Ok(match output.session {
        Some(validated) => (set_cookies, Html(render_dashboard(&validated.user))).into_response(),
        None => {
            let location = InboundGate::new(state.config.clone()).login_location(uri.path());
            (set_cookies, Redirect::to(&location)).into_response()
        }
    })
}

#[derive(Debug, Deserialize)]
struct CallbackQuery {
    #[serde(rename = "callbackUrl")]
    callback_url: Option<String>,
}

/// GET /auth/login
async fn login_page<S>(
    State(state): State<AuthAppState<S>>,
    Query(query): Query<CallbackQuery>,
) -> Html<String>
where
    S: CredentialStore + Send + Sync + 'static,
{
    let next = safe_callback(query.callback_url.as_deref(), &state.config);
    Html(render_form("Sign in", "/api/auth/login", &next, "/auth/register", "Create an account"))
}

/// GET /auth/register
async fn register_page<S>(
    State(state): State<AuthAppState<S>>,
    Query(query): Query<CallbackQuery>,
) -> Html<String>
where
    S: CredentialStore + Send + Sync + 'static,
{
    let next = safe_callback(query.callback_url.as_deref(), &state.config);
    Html(render_form("Create account", "/api/auth/register", &next, "/auth/login", "Sign in instead"))
}

/// Local absolute paths only; anything else falls back to the landing page
fn safe_callback(callback: Option<&str>, config: &AuthConfig) -> String {
    match callback {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => config.gate.landing_path.clone(),
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON string literal safe to embed in a `<script>` block
fn script_string(raw: &str) -> String {
    serde_json::Value::from(raw)
        .to_string()
        .replace('<', "\\u003c")
}

fn render_dashboard(user: &AuthUser) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Dashboard</title></head>
<body>
<h1>Dashboard</h1>
<p>Signed in as <strong>{email}</strong></p>
<ul id="todos"></ul>
<button id="logout">Sign out</button>
<script>
fetch("/api/todos").then(r => r.ok ? r.json() : []).then(todos => {{
  const list = document.getElementById("todos");
  for (const todo of todos) {{
    const item = document.createElement("li");
    item.textContent = todo.title ?? todo.text ?? JSON.stringify(todo);
    list.appendChild(item);
  }}
}});
document.getElementById("logout").onclick = async () => {{
  await fetch("/api/auth/logout", {{ method: "POST" }});
  location.href = "/auth/login";
}};
</script>
</body>
</html>"#,
        email = escape_html(&user.email),
    )
}

fn render_form(title: &str, action: &str, next: &str, alt_href: &str, alt_label: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
<h1>{title}</h1>
<form id="auth-form">
  <input name="email" type="email" placeholder="Email" required>
  <input name="password" type="password" placeholder="Password" minlength="8" required>
  <button type="submit">{title}</button>
</form>
<p id="error" role="alert"></p>
<a href="{alt_href}">{alt_label}</a>
<script>
document.getElementById("auth-form").onsubmit = async (event) => {{
  event.preventDefault();
  const form = new FormData(event.target);
  const response = await fetch({action}, {{
    method: "POST",
    headers: {{ "Content-Type": "application/json" }},
    body: JSON.stringify({{ email: form.get("email"), password: form.get("password") }}),
  }});
  if (response.ok) {{
    location.href = {next};
  }} else {{
    const body = await response.json().catch(() => ({{}}));
    document.getElementById("error").textContent = body.error ?? "Something went wrong";
  }}
}};
</script>
</body>
</html>"#,
        title = escape_html(title),
        action = script_string(action),
        next = script_string(next),
        alt_href = escape_html(alt_href),
        alt_label = escape_html(alt_label),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_callback() {
        let config = AuthConfig::default();

        assert_eq!(safe_callback(Some("/dashboard/x"), &config), "/dashboard/x");
        assert_eq!(safe_callback(None, &config), "/dashboard");
        assert_eq!(safe_callback(Some("https://evil.test"), &config), "/dashboard");
        assert_eq!(safe_callback(Some("//evil.test"), &config), "/dashboard");
        assert_eq!(safe_callback(Some("/\\evil.test"), &config), "/dashboard");
    }

    #[test]
    fn test_script_string_cannot_close_script() {
        let rendered = script_string("/x</script><script>alert(1)");
        assert!(!rendered.contains("</script>"));
        assert!(rendered.starts_with('"'));
    }

    #[test]
    fn test_dashboard_escapes_email() {
        let user = AuthUser {
            id: "usr_1".into(),
            email: "<b>@x.io".into(),
            name: None,
            email_verified: false,
            image: None,
            created_at: None,
            updated_at: None,
        };
        let html = render_dashboard(&user);
        assert!(html.contains("&lt;b&gt;@x.io"));
    }
}
