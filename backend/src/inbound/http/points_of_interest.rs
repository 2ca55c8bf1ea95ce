//! Point-of-interest endpoints nested under a city.
//!
//! ```text
//! GET    /api/cities/{cityId}/pointsofinterest
//! GET    /api/cities/{cityId}/pointsofinterest/{id}
//! POST   /api/cities/{cityId}/pointsofinterest
//! PUT    /api/cities/{cityId}/pointsofinterest/{id}
//! PATCH  /api/cities/{cityId}/pointsofinterest/{id}
//! DELETE /api/cities/{cityId}/pointsofinterest/{id}
//! ```
//!
//! Mutations validate the payload before checking that the addressed city and
//! point exist. `PATCH` is the exception: the patch can only be validated once
//! it has been applied to the stored point.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, delete, get, patch, post, put, web};
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::domain::ports::Notification;
use crate::domain::{
    ChangeSet, CityId, CityInfoRepository, Error, PointOfInterest, PointOfInterestId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{
    PointOfInterestDto, PointOfInterestForCreationDto, PointOfInterestForUpdateDto,
};
use crate::inbound::http::negotiate::Representation;
use crate::inbound::http::patch::{apply_patch, parse_patch};
use crate::inbound::http::payload::parse_json_body;
use crate::inbound::http::state::HttpState;

/// Route name used to build `Location` headers for created points.
pub const GET_POINT_OF_INTEREST_ROUTE: &str = "get_point_of_interest";

const DELETED_SUBJECT: &str = "Point of interest deleted";

fn city_not_found(city_id: CityId) -> Error {
    Error::not_found(format!("city {city_id} not found"))
}

fn point_not_found(city_id: CityId, id: PointOfInterestId) -> Error {
    Error::not_found(format!(
        "point of interest {id} not found in city {city_id}"
    ))
}

fn save_failed(operation: &'static str) -> Error {
    Error::internal(format!("changes to {operation} were not saved"))
}

async fn ensure_city_exists(repository: &CityInfoRepository, city_id: CityId) -> ApiResult<()> {
    if repository.city_exists(city_id).await? {
        Ok(())
    } else {
        Err(city_not_found(city_id))
    }
}

async fn find_point(
    repository: &CityInfoRepository,
    city_id: CityId,
    id: PointOfInterestId,
) -> ApiResult<PointOfInterest> {
    ensure_city_exists(repository, city_id).await?;
    repository
        .point_of_interest(city_id, id)
        .await?
        .ok_or_else(|| point_not_found(city_id, id))
}

async fn save_update(
    repository: &CityInfoRepository,
    point: PointOfInterest,
) -> ApiResult<HttpResponse> {
    let (city_id, id) = (point.city_id, point.id);
    let mut changes = ChangeSet::new();
    repository.update_point_of_interest(&mut changes, point);
    if !repository.save(changes).await.is_success() {
        error!(
            city_id,
            point_of_interest_id = id,
            "unable to save changes to an updated point of interest"
        );
        return Err(save_failed("an updated point of interest"));
    }
    Ok(HttpResponse::NoContent().finish())
}

/// List the points of interest of a city.
#[utoipa::path(
    get,
    path = "/api/cities/{cityId}/pointsofinterest",
    params(("cityId" = i32, Path, description = "City identifier")),
    responses(
        (status = 200, description = "Points of interest in store order", body = [PointOfInterestDto]),
        (status = 404, description = "City not found"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["points of interest"],
    operation_id = "listPointsOfInterest"
)]
#[get("/cities/{city_id}/pointsofinterest")]
pub async fn list_points_of_interest(
    state: web::Data<HttpState>,
    representation: Representation,
    path: web::Path<CityId>,
) -> ApiResult<HttpResponse> {
    let city_id = path.into_inner();
    let log_fault = |err: &Error| {
        error!(
            city_id,
            error = %err,
            "exception while getting points of interest for city"
        );
    };

    if !state
        .repository
        .city_exists(city_id)
        .await
        .inspect_err(log_fault)?
    {
        info!(
            city_id,
            "city wasn't found when accessing points of interest"
        );
        return Err(city_not_found(city_id));
    }

    let points: Vec<PointOfInterestDto> = state
        .repository
        .points_of_interest(city_id)
        .await
        .inspect_err(log_fault)?
        .into_iter()
        .map(PointOfInterestDto::from)
        .collect();
    representation.render_list(
        HttpResponse::Ok(),
        "ArrayOfPointOfInterestDto",
        "PointOfInterestDto",
        &points,
    )
}

/// Fetch one point of interest.
#[utoipa::path(
    get,
    path = "/api/cities/{cityId}/pointsofinterest/{id}",
    params(
        ("cityId" = i32, Path, description = "City identifier"),
        ("id" = i32, Path, description = "Point-of-interest identifier")
    ),
    responses(
        (status = 200, description = "Point of interest", body = PointOfInterestDto),
        (status = 404, description = "City or point of interest not found"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["points of interest"],
    operation_id = "getPointOfInterest"
)]
#[get("/cities/{city_id}/pointsofinterest/{id}", name = "get_point_of_interest")]
pub async fn get_point_of_interest(
    state: web::Data<HttpState>,
    representation: Representation,
    path: web::Path<(CityId, PointOfInterestId)>,
) -> ApiResult<HttpResponse> {
    let (city_id, id) = path.into_inner();
    let point = find_point(&state.repository, city_id, id).await?;
    representation.render(
        HttpResponse::Ok(),
        "PointOfInterestDto",
        &PointOfInterestDto::from(point),
    )
}

/// Create a point of interest under a city.
///
/// Responds with the created representation and a `Location` header pointing
/// at [`get_point_of_interest`].
#[utoipa::path(
    post,
    path = "/api/cities/{cityId}/pointsofinterest",
    params(("cityId" = i32, Path, description = "City identifier")),
    request_body = PointOfInterestForCreationDto,
    responses(
        (status = 201, description = "Created", body = PointOfInterestDto,
            headers(("Location" = String, description = "URL of the created point of interest"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "City not found"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["points of interest"],
    operation_id = "createPointOfInterest"
)]
#[post("/cities/{city_id}/pointsofinterest")]
pub async fn create_point_of_interest(
    req: HttpRequest,
    state: web::Data<HttpState>,
    representation: Representation,
    path: web::Path<CityId>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let city_id = path.into_inner();
    let payload: PointOfInterestForCreationDto = parse_json_body(&body)?;
    payload.validate()?;
    ensure_city_exists(&state.repository, city_id).await?;

    let mut changes = ChangeSet::new();
    state
        .repository
        .add_point_of_interest(&mut changes, city_id, payload.into());
    let outcome = state.repository.save(changes).await;
    if !outcome.is_success() {
        error!(city_id, "changes were not saved to the database");
        return Err(save_failed("a new point of interest"));
    }
    let created = outcome
        .inserted()
        .first()
        .cloned()
        .ok_or_else(|| Error::internal("store did not return the created point of interest"))?;

    let location = req
        .url_for(
            GET_POINT_OF_INTEREST_ROUTE,
            [city_id.to_string(), created.id.to_string()],
        )
        .map_err(|err| Error::internal(format!("failed to build location: {err}")))?;
    info!(
        city_id,
        point_of_interest_id = created.id,
        "point of interest created"
    );

    let mut builder = HttpResponse::Created();
    builder.insert_header((header::LOCATION, location.as_str()));
    representation.render(builder, "PointOfInterestDto", &PointOfInterestDto::from(created))
}

/// Replace a point of interest.
#[utoipa::path(
    put,
    path = "/api/cities/{cityId}/pointsofinterest/{id}",
    params(
        ("cityId" = i32, Path, description = "City identifier"),
        ("id" = i32, Path, description = "Point-of-interest identifier")
    ),
    request_body = PointOfInterestForUpdateDto,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "City or point of interest not found"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["points of interest"],
    operation_id = "updatePointOfInterest"
)]
#[put("/cities/{city_id}/pointsofinterest/{id}")]
pub async fn update_point_of_interest(
    state: web::Data<HttpState>,
    path: web::Path<(CityId, PointOfInterestId)>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let (city_id, id) = path.into_inner();
    let payload: PointOfInterestForUpdateDto = parse_json_body(&body)?;
    payload.validate()?;

    let mut point = find_point(&state.repository, city_id, id).await?;
    payload.apply_to(&mut point);
    save_update(&state.repository, point).await
}

/// Partially update a point of interest with a JSON Patch document.
#[utoipa::path(
    patch,
    path = "/api/cities/{cityId}/pointsofinterest/{id}",
    params(
        ("cityId" = i32, Path, description = "City identifier"),
        ("id" = i32, Path, description = "Point-of-interest identifier")
    ),
    request_body(content = Object, description = "RFC 6902 operations against the update representation",
        content_type = "application/json-patch+json"),
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Invalid patch or resulting entity", body = Error),
        (status = 404, description = "City or point of interest not found"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["points of interest"],
    operation_id = "patchPointOfInterest"
)]
#[patch("/cities/{city_id}/pointsofinterest/{id}")]
pub async fn partially_update_point_of_interest(
    state: web::Data<HttpState>,
    path: web::Path<(CityId, PointOfInterestId)>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let (city_id, id) = path.into_inner();
    let patch = parse_patch(&body)?;

    let mut point = find_point(&state.repository, city_id, id).await?;
    let patched = apply_patch(&PointOfInterestForUpdateDto::from(&point), &patch)?;
    patched.validate()?;
    patched.apply_to(&mut point);
    save_update(&state.repository, point).await
}

/// Delete a point of interest and notify operators.
///
/// A failed or slow notification is logged and otherwise ignored; the
/// request waits at most [`HttpState::notification_timeout`] for the sink.
#[utoipa::path(
    delete,
    path = "/api/cities/{cityId}/pointsofinterest/{id}",
    params(
        ("cityId" = i32, Path, description = "City identifier"),
        ("id" = i32, Path, description = "Point-of-interest identifier")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "City or point of interest not found"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["points of interest"],
    operation_id = "deletePointOfInterest"
)]
#[delete("/cities/{city_id}/pointsofinterest/{id}")]
pub async fn delete_point_of_interest(
    state: web::Data<HttpState>,
    path: web::Path<(CityId, PointOfInterestId)>,
) -> ApiResult<HttpResponse> {
    let (city_id, id) = path.into_inner();
    let point = find_point(&state.repository, city_id, id).await?;

    let mut changes = ChangeSet::new();
    state
        .repository
        .delete_point_of_interest(&mut changes, &point);

    let notification = Notification::new(
        DELETED_SUBJECT,
        format!(
            "Point of interest {} with id {} was deleted.",
            point.name, point.id
        ),
    );
    match timeout(
        state.notification_timeout,
        state.notifications.send(&notification),
    )
    .await
    {
        Ok(Ok(())) => {}
        Ok(Err(err)) => warn!(
            city_id,
            point_of_interest_id = id,
            error = %err,
            "deletion notification was not delivered"
        ),
        Err(_) => warn!(
            city_id,
            point_of_interest_id = id,
            timeout = ?state.notification_timeout,
            "deletion notification timed out"
        ),
    }

    if !state.repository.save(changes).await.is_success() {
        error!(
            city_id,
            point_of_interest_id = id,
            "unable to save the deletion of a point of interest"
        );
        return Err(save_failed("a deleted point of interest"));
    }
    Ok(HttpResponse::NoContent().finish())
}
