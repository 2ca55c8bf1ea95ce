//! City read endpoints.
//!
//! ```text
//! GET /api/cities
//! GET /api/cities/{id}?includePointsOfInterest=true
//! ```

use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{CityId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{CityDto, CityWithoutPointsOfInterestDto};
use crate::inbound::http::negotiate::Representation;
use crate::inbound::http::state::HttpState;

/// Query string for `GET /api/cities/{id}`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CityQuery {
    /// Embed the city's points of interest in the response.
    #[serde(default)]
    pub include_points_of_interest: bool,
}

/// List every city, ordered by name.
#[utoipa::path(
    get,
    path = "/api/cities",
    responses(
        (status = 200, description = "Cities ordered by name", body = [CityWithoutPointsOfInterestDto]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cities"],
    operation_id = "listCities"
)]
#[get("/cities")]
pub async fn list_cities(
    state: web::Data<HttpState>,
    representation: Representation,
) -> ApiResult<HttpResponse> {
    let cities: Vec<CityWithoutPointsOfInterestDto> = state
        .repository
        .cities()
        .await?
        .into_iter()
        .map(CityWithoutPointsOfInterestDto::from)
        .collect();
    representation.render_list(
        HttpResponse::Ok(),
        "ArrayOfCityWithoutPointsOfInterestDto",
        "CityWithoutPointsOfInterestDto",
        &cities,
    )
}

/// Fetch one city, optionally with its points of interest.
///
/// The response is a `CityDto` when `includePointsOfInterest` is true and a
/// `CityWithoutPointsOfInterestDto` otherwise.
#[utoipa::path(
    get,
    path = "/api/cities/{id}",
    params(
        ("id" = i32, Path, description = "City identifier"),
        CityQuery
    ),
    responses(
        (status = 200, description = "City", body = CityDto),
        (status = 404, description = "City not found"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["cities"],
    operation_id = "getCity"
)]
#[get("/cities/{id}")]
pub async fn get_city(
    state: web::Data<HttpState>,
    representation: Representation,
    path: web::Path<CityId>,
    query: web::Query<CityQuery>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let include_points_of_interest = query.include_points_of_interest;
    let city = state
        .repository
        .city(id, include_points_of_interest)
        .await?
        .ok_or_else(|| Error::not_found(format!("city {id} not found")))?;

    if include_points_of_interest {
        representation.render(HttpResponse::Ok(), "CityDto", &CityDto::from(city))
    } else {
        representation.render(
            HttpResponse::Ok(),
            "CityWithoutPointsOfInterestDto",
            &CityWithoutPointsOfInterestDto::from(city),
        )
    }
}
