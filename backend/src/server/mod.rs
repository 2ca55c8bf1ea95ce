//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::StartupError;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use city_info::Trace;
use city_info::config::AppSettings;
#[cfg(debug_assertions)]
use city_info::doc::ApiDoc;
use city_info::inbound::http::configure_api;
use city_info::inbound::http::health::{live, ready};
use city_info::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Resolve settings into a ready-to-serve configuration.
///
/// Runs migrations and seeding as configured, so the store is usable before
/// the listener opens.
///
/// # Errors
/// Returns [`StartupError`] when settings are invalid or an adapter cannot
/// be built.
pub async fn bootstrap(settings: &AppSettings) -> Result<ServerConfig, StartupError> {
    let bind_addr = settings.bind_addr()?;
    let http_state = state_builders::build_http_state(settings).await?;
    Ok(ServerConfig::new(bind_addr, http_state))
}

fn build_app(http_state: web::Data<HttpState>) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(http_state)
        .wrap(Trace)
        .service(web::scope("/api").configure(configure_api))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server from the resolved configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        http_state,
    } = config;

    let server = HttpServer::new(move || build_app(http_state.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "listening");
    Ok(server)
}
