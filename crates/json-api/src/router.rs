//! App Router

use salvo::Router;

use crate::{auth, contractors, groups, owners, timesheets};

/// Routes invoked by the scheduler and the task queue.
pub fn trigger_router() -> Router {
    Router::with_path("timesheets")
        .push(Router::with_path("request").post(timesheets::request::handler))
        .push(Router::with_path("aggregate").post(timesheets::aggregate::handler))
}

/// Routes that require a verified owner session.
pub fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("owners")
                .post(owners::create::handler)
                .push(
                    Router::with_path("me")
                        .get(owners::get::handler)
                        .put(owners::update::handler)
                        .delete(owners::delete::handler),
                ),
        )
        .push(
            Router::with_path("groups")
                .post(groups::create::handler)
                .push(
                    Router::with_path("{group}")
                        .get(groups::get::handler)
                        .put(groups::update::handler)
                        .delete(groups::delete::handler)
                        .push(Router::with_path("timesheets").get(timesheets::index::handler))
                        .push(
                            Router::with_path("contractors")
                                .get(contractors::index::handler)
                                .post(contractors::create::handler)
                                .push(
                                    Router::with_path("{contractor}")
                                        .get(contractors::get::handler)
                                        .put(contractors::update::handler)
                                        .delete(contractors::delete::handler)
                                        .push(
                                            Router::with_path("timesheets")
                                                .get(timesheets::contractor_index::handler),
                                        ),
                                ),
                        ),
                ),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{prelude::*, test::TestClient};

    use crate::test_helpers::Mocks;

    use super::*;

    #[expect(clippy::panic, reason = "exercises the panic boundary")]
    #[handler]
    async fn explode() -> &'static str {
        panic!("handler exploded")
    }

    #[tokio::test]
    async fn test_panicking_handler_returns_500() {
        let router = Router::new()
            .hoop(CatchPanic::new())
            .push(Router::with_path("boom").get(explode));

        let service = Service::new(router);

        let res = TestClient::get("http://example.com/boom").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn test_app_routes_require_a_session() {
        let service = Mocks::default().into_public_service(app_router());

        let res = TestClient::get("http://example.com/owners/me")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn test_trigger_routes_skip_authentication() {
        let service = Mocks::default().into_public_service(trigger_router());

        let res = TestClient::post("http://example.com/timesheets/request")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
