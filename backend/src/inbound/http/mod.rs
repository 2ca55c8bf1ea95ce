//! HTTP inbound adapter exposing the cities REST API.
//!
//! Handlers are registered under the `/api` scope by the server; health
//! probes sit at the root.

pub mod cities;
pub mod dto;
pub mod error;
pub mod health;
pub mod negotiate;
pub mod patch;
pub mod payload;
pub mod points_of_interest;
pub mod state;

pub use error::ApiResult;

use actix_web::web;

/// Register every cities API handler on `config`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use city_info::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api").configure(configure_api));
/// ```
pub fn configure_api(config: &mut web::ServiceConfig) {
    config
        .service(cities::list_cities)
        .service(cities::get_city)
        .service(points_of_interest::list_points_of_interest)
        .service(points_of_interest::get_point_of_interest)
        .service(points_of_interest::create_point_of_interest)
        .service(points_of_interest::update_point_of_interest)
        .service(points_of_interest::partially_update_point_of_interest)
        .service(points_of_interest::delete_point_of_interest);
}
