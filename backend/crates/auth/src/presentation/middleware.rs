//! Inbound Gate Middleware
//!
//! Applies [`InboundGate`] decisions to page requests.

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use platform::client::extract_client_ip;
use platform::cookie::sets_cookie;
use std::net::SocketAddr;

use crate::application::inbound_gate::{GateDecision, InboundGate};
use crate::domain::entity::{CookieKind, CookiePair};
use crate::presentation::cookies::{read_cookie_pair, render_reassert};

/// Use with `axum::middleware::from_fn_with_state(gate, inbound_gate)`
pub async fn inbound_gate(
    State(gate): State<InboundGate>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let cookies = read_cookie_pair(req.headers(), gate.config());
    let decision = gate.decide(req.uri().path(), &cookies);

    if decision != GateDecision::Bypass {
        let direct_ip = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip());
        let client_ip = extract_client_ip(req.headers(), direct_ip);

        tracing::debug!(
            path = %req.uri().path(),
            cookies = ?cookies.state(),
            client_ip = ?client_ip,
            decision = ?decision,
            "Inbound gate"
        );
    }

    match decision {
        GateDecision::Bypass | GateDecision::Allow => next.run(req).await,
        GateDecision::RedirectToLogin { location }
        | GateDecision::RedirectToLanding { location } => {
            Redirect::to(&location).into_response()
        }
        GateDecision::AllowAndReassert => {
            let mut response = next.run(req).await;
            // A page that already wrote the session cookie (e.g. cleared it) has the last word
            let config = gate.config();
            let page_wrote_session =
                sets_cookie(response.headers(), config.cookie_name(CookieKind::Session));
            let pending = if page_wrote_session {
                CookiePair::default()
            } else {
                cookies
            };
            match render_reassert(config, &pending) {
                Ok(set_cookies) => {
                    // Append so the page's own Set-Cookie headers survive
                    for (name, value) in set_cookies.iter() {
                        response.headers_mut().append(name.clone(), value.clone());
                    }
                }
                Err(e) => tracing::warn!(error = %e, "Cookie re-assertion skipped"),
            }
            response
        }
    }
}
