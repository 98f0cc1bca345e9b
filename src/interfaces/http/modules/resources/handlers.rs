//! Resource HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::domain::{RepositoryProvider, Resource, ResourceStatus};
use crate::interfaces::http::common::{error_status, ApiResponse, EmptyData, ValidatedJson};
use crate::interfaces::http::modules::reservations::dto::{ListReservationsQuery, ReservationDto};

use super::dto::*;

/// Application state for resource handlers.
#[derive(Clone)]
pub struct ResourceAppState {
    pub repos: Arc<dyn RepositoryProvider>,
}

#[utoipa::path(
    get,
    path = "/api/v1/resources",
    tag = "Resources",
    responses(
        (status = 200, description = "All registered resources", body = ApiResponse<Vec<ResourceDto>>)
    )
)]
pub async fn list_resources(
    State(state): State<ResourceAppState>,
) -> Result<Json<ApiResponse<Vec<ResourceDto>>>, (StatusCode, Json<ApiResponse<Vec<ResourceDto>>>)>
{
    let resources = state.repos.resources().find_all().await.map_err(|e| {
        (
            error_status(&e),
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    let dtos: Vec<ResourceDto> = resources.iter().map(ResourceDto::from_domain).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/resources/{resource_id}",
    tag = "Resources",
    params(("resource_id" = String, Path, description = "Resource ID")),
    responses(
        (status = 200, description = "Resource details", body = ApiResponse<ResourceDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_resource(
    State(state): State<ResourceAppState>,
    Path(resource_id): Path<String>,
) -> Result<Json<ApiResponse<ResourceDto>>, (StatusCode, Json<ApiResponse<ResourceDto>>)> {
    let resource = state
        .repos
        .resources()
        .find_by_id(&resource_id)
        .await
        .map_err(|e| (error_status(&e), Json(ApiResponse::error(e.to_string()))))?;

    let Some(resource) = resource else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!(
                "Resource '{}' not found",
                resource_id
            ))),
        ));
    };

    Ok(Json(ApiResponse::success(ResourceDto::from_domain(
        &resource,
    ))))
}

#[utoipa::path(
    post,
    path = "/api/v1/resources",
    tag = "Resources",
    request_body = CreateResourceRequest,
    responses(
        (status = 201, description = "Resource registered", body = ApiResponse<ResourceDto>),
        (status = 409, description = "Resource ID already taken"),
        (status = 422, description = "Invalid request body")
    )
)]
pub async fn create_resource(
    State(state): State<ResourceAppState>,
    ValidatedJson(request): ValidatedJson<CreateResourceRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<ResourceDto>>),
    (StatusCode, Json<ApiResponse<ResourceDto>>),
> {
    let resource = Resource::new(
        request.id,
        request.name,
        request.description,
        request.capacity,
    );
    let dto = ResourceDto::from_domain(&resource);

    state
        .repos
        .resources()
        .save(resource)
        .await
        .map_err(|e| (error_status(&e), Json(ApiResponse::error(e.to_string()))))?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(dto))))
}

#[utoipa::path(
    put,
    path = "/api/v1/resources/{resource_id}/status",
    tag = "Resources",
    params(("resource_id" = String, Path, description = "Resource ID")),
    request_body = UpdateResourceStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ResourceDto>),
        (status = 400, description = "Unknown status value"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_resource_status(
    State(state): State<ResourceAppState>,
    Path(resource_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateResourceStatusRequest>,
) -> Result<Json<ApiResponse<ResourceDto>>, (StatusCode, Json<ApiResponse<ResourceDto>>)> {
    let Some(status) = ResourceStatus::from_str(&request.status) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!(
                "Unknown status '{}' (expected 'available' or 'unavailable')",
                request.status
            ))),
        ));
    };

    let resource = state
        .repos
        .resources()
        .set_status(&resource_id, status)
        .await
        .map_err(|e| (error_status(&e), Json(ApiResponse::error(e.to_string()))))?;

    Ok(Json(ApiResponse::success(ResourceDto::from_domain(
        &resource,
    ))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/resources/{resource_id}",
    tag = "Resources",
    params(("resource_id" = String, Path, description = "Resource ID")),
    responses(
        (status = 200, description = "Resource and its reservations removed", body = ApiResponse<EmptyData>),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_resource(
    State(state): State<ResourceAppState>,
    Path(resource_id): Path<String>,
) -> Result<Json<ApiResponse<EmptyData>>, (StatusCode, Json<ApiResponse<EmptyData>>)> {
    state
        .repos
        .resources()
        .delete(&resource_id)
        .await
        .map_err(|e| (error_status(&e), Json(ApiResponse::error(e.to_string()))))?;

    Ok(Json(ApiResponse::success(EmptyData {})))
}

#[utoipa::path(
    get,
    path = "/api/v1/resources/{resource_id}/reservations",
    tag = "Resources",
    params(
        ("resource_id" = String, Path, description = "Resource ID"),
        ListReservationsQuery
    ),
    responses(
        (status = 200, description = "Reservations for the resource", body = ApiResponse<Vec<ReservationDto>>),
        (status = 400, description = "Unknown status filter"),
        (status = 404, description = "Resource not found")
    )
)]
pub async fn list_resource_reservations(
    State(state): State<ResourceAppState>,
    Path(resource_id): Path<String>,
    Query(query): Query<ListReservationsQuery>,
) -> Result<
    Json<ApiResponse<Vec<ReservationDto>>>,
    (StatusCode, Json<ApiResponse<Vec<ReservationDto>>>),
> {
    let status = query
        .parse_status()
        .map_err(|message| (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message))))?;

    let resource = state
        .repos
        .resources()
        .find_by_id(&resource_id)
        .await
        .map_err(|e| (error_status(&e), Json(ApiResponse::error(e.to_string()))))?;
    if resource.is_none() {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!(
                "Resource '{}' not found",
                resource_id
            ))),
        ));
    }

    let reservations = state
        .repos
        .reservations()
        .find_for_resource(&resource_id, status)
        .await
        .map_err(|e| (error_status(&e), Json(ApiResponse::error(e.to_string()))))?;

    let dtos: Vec<ReservationDto> = reservations.iter().map(ReservationDto::from_domain).collect();
    Ok(Json(ApiResponse::success(dtos)))
}
