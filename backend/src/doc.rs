//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the DTO and error schemas. Swagger UI serves it in debug builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::dto::{
    CityDto, CityWithoutPointsOfInterestDto, PointOfInterestDto, PointOfInterestForCreationDto,
    PointOfInterestForUpdateDto,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "City info API",
        description = "Cities and their points of interest."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::cities::list_cities,
        crate::inbound::http::cities::get_city,
        crate::inbound::http::points_of_interest::list_points_of_interest,
        crate::inbound::http::points_of_interest::get_point_of_interest,
        crate::inbound::http::points_of_interest::create_point_of_interest,
        crate::inbound::http::points_of_interest::update_point_of_interest,
        crate::inbound::http::points_of_interest::partially_update_point_of_interest,
        crate::inbound::http::points_of_interest::delete_point_of_interest,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        CityDto,
        CityWithoutPointsOfInterestDto,
        PointOfInterestDto,
        PointOfInterestForCreationDto,
        PointOfInterestForUpdateDto,
    )),
    tags(
        (name = "cities", description = "City lookups"),
        (name = "points of interest", description = "Points of interest nested under a city"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;
