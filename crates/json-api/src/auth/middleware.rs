//! Auth middleware.
//!
//! Resolves the bearer ID token to a [`SessionData`] once per request and
//! stores it in the depot for handlers.

use jobsender_app::cloud::CloudError;
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use crate::extensions::*;

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid Authorization header"));
        ctrl.skip_rest();

        return;
    };

    let state = match depot.state_or_500() {
        Ok(state) => state,
        Err(status) => {
            res.render(status);
            ctrl.skip_rest();

            return;
        }
    };

    let session = match state.app.identity.authenticate(token).await {
        Ok(session) => session,
        Err(CloudError::Unauthenticated) => {
            res.render(StatusError::unauthorized().brief("Invalid ID token"));
            ctrl.skip_rest();

            return;
        }
        Err(source) => {
            error!("failed to validate id token: {source}");

            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    if !session.is_verified {
        res.render(StatusError::forbidden().brief("Email address is not verified"));
        ctrl.skip_rest();

        return;
    }

    depot.insert_session(session);

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
