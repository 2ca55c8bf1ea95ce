//! Orchestrator probes.
//!
//! Liveness only reports that the process answers HTTP. Readiness asks the
//! city info store for its city count, so a node whose database is
//! unreachable drops out of rotation until the store recovers.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, get, web};
use tracing::warn;

use crate::inbound::http::state::HttpState;

fn probe_response(status: StatusCode) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness probe: 200 while the store answers, 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Store reachable; ready for traffic"),
        (status = 503, description = "Store unreachable")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HttpState>) -> HttpResponse {
    match state.repository.city_count().await {
        Ok(_) => probe_response(StatusCode::OK),
        Err(error) => {
            warn!(%error, "readiness check failed");
            probe_response(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Liveness probe: 200 whenever the process can serve a request.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses((status = 200, description = "Process is alive"))
)]
#[get("/health/live")]
pub async fn live() -> HttpResponse {
    probe_response(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::{App, test};
    use rstest::rstest;

    use crate::domain::CityInfoRepository;
    use crate::domain::ports::{CityInfoStoreError, MockCityInfoStore};
    use crate::outbound::notification::LocalNotificationSink;

    fn state_with(store: MockCityInfoStore) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            CityInfoRepository::new(Arc::new(store)),
            Arc::new(LocalNotificationSink::new("from@test", "to@test")),
        ))
    }

    async fn get_status(store: MockCityInfoStore, uri: &str) -> (StatusCode, Option<String>) {
        let app = test::init_service(
            App::new()
                .app_data(state_with(store))
                .service(ready)
                .service(live),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let cache = res
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        (res.status(), cache)
    }

    #[rstest]
    #[case(Ok(3), StatusCode::OK)]
    #[case(Ok(0), StatusCode::OK)]
    #[case(Err(CityInfoStoreError::connection("refused")), StatusCode::SERVICE_UNAVAILABLE)]
    #[actix_web::test]
    async fn readiness_follows_store_reachability(
        #[case] count: Result<u64, CityInfoStoreError>,
        #[case] expected: StatusCode,
    ) {
        let mut store = MockCityInfoStore::new();
        store
            .expect_count_cities()
            .times(1)
            .returning(move || count.clone());

        let (status, cache) = get_status(store, "/health/ready").await;
        assert_eq!(status, expected);
        assert_eq!(cache.as_deref(), Some("no-store"));
    }

    #[actix_web::test]
    async fn liveness_does_not_touch_the_store() {
        let mut store = MockCityInfoStore::new();
        store.expect_count_cities().never();

        let (status, _) = get_status(store, "/health/live").await;
        assert_eq!(status, StatusCode::OK);
    }
}
