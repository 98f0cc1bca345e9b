//! Reservation HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::application::BookingService;
use crate::domain::booking::{schedule, BookingError, BookingRequest, Decision};
use crate::domain::{InsertOutcome, RepositoryProvider};
use crate::interfaces::http::common::{error_status, ApiResponse, ValidatedJson};

use super::dto::*;

/// Application state for reservation handlers.
#[derive(Clone)]
pub struct ReservationAppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub booking: Arc<BookingService>,
}

/// Builds a domain booking request from wall-clock wire fields.
fn booking_request(
    resource_id: &str,
    date: &str,
    start_time: &str,
    end_time: &str,
    utc_offset_minutes: i32,
    occupancy: u32,
) -> Result<BookingRequest, BookingError> {
    let window = schedule::window_from_parts(date, start_time, end_time, utc_offset_minutes)?;
    BookingRequest::new(resource_id, window, occupancy)
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Slot claimed; reservation stored as pending", body = ApiResponse<CreateReservationResponse>),
        (status = 409, description = "Rules rejected the candidate", body = ApiResponse<CreateReservationResponse>),
        (status = 400, description = "Malformed date, time or offset"),
        (status = 404, description = "Resource not found"),
        (status = 422, description = "Invalid request body")
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationAppState>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> Result<
    (StatusCode, Json<ApiResponse<CreateReservationResponse>>),
    (StatusCode, Json<ApiResponse<CreateReservationResponse>>),
> {
    let candidate = booking_request(
        &request.resource_id,
        &request.date,
        &request.start_time,
        &request.end_time,
        request.utc_offset_minutes,
        request.occupancy,
    )
    .map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    let outcome = state
        .booking
        .request_booking(&candidate, &request.requester)
        .await
        .map_err(|e| (error_status(&e), Json(ApiResponse::error(e.to_string()))))?;

    match outcome {
        InsertOutcome::Inserted(reservation) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(CreateReservationResponse {
                decision: "accepted".to_string(),
                reason: None,
                message: Some("Reservation created, awaiting approval".to_string()),
                reservation: Some(ReservationDto::from_domain(&reservation)),
            })),
        )),
        InsertOutcome::Rejected(reason) => Ok((
            StatusCode::CONFLICT,
            Json(ApiResponse::success(CreateReservationResponse {
                decision: "rejected".to_string(),
                reason: Some(reason.as_str().to_string()),
                message: Some(reason.message().to_string()),
                reservation: None,
            })),
        )),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/check",
    tag = "Reservations",
    request_body = CheckAvailabilityRequest,
    responses(
        (status = 200, description = "Advisory availability verdict", body = ApiResponse<AvailabilityResponse>),
        (status = 400, description = "Malformed date, time or offset"),
        (status = 404, description = "Resource not found"),
        (status = 422, description = "Invalid request body")
    )
)]
pub async fn check_availability(
    State(state): State<ReservationAppState>,
    ValidatedJson(request): ValidatedJson<CheckAvailabilityRequest>,
) -> Result<Json<ApiResponse<AvailabilityResponse>>, (StatusCode, Json<ApiResponse<AvailabilityResponse>>)>
{
    let candidate = booking_request(
        &request.resource_id,
        &request.date,
        &request.start_time,
        &request.end_time,
        request.utc_offset_minutes,
        request.occupancy,
    )
    .map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    let report = state
        .booking
        .check_availability(&candidate)
        .await
        .map_err(|e| (error_status(&e), Json(ApiResponse::error(e.to_string()))))?;

    let (available, reason, message) = match report.decision {
        Decision::Accepted => (true, None, None),
        Decision::Rejected(r) => (
            false,
            Some(r.as_str().to_string()),
            Some(r.message().to_string()),
        ),
    };

    Ok(Json(ApiResponse::success(AvailabilityResponse {
        available,
        reason,
        message,
        conflicts: report
            .conflicts
            .iter()
            .map(ReservationDto::from_domain)
            .collect(),
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    params(ListReservationsQuery),
    responses(
        (status = 200, description = "All reservations", body = ApiResponse<Vec<ReservationDto>>),
        (status = 400, description = "Unknown status filter")
    )
)]
pub async fn list_reservations(
    State(state): State<ReservationAppState>,
    Query(query): Query<ListReservationsQuery>,
) -> Result<
    Json<ApiResponse<Vec<ReservationDto>>>,
    (StatusCode, Json<ApiResponse<Vec<ReservationDto>>>),
> {
    let status = query
        .parse_status()
        .map_err(|message| (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message))))?;

    let reservations = state
        .repos
        .reservations()
        .find_all()
        .await
        .map_err(|e| (error_status(&e), Json(ApiResponse::error(e.to_string()))))?;

    let dtos: Vec<ReservationDto> = reservations
        .iter()
        .filter(|r| status.map_or(true, |s| r.status == s))
        .map(ReservationDto::from_domain)
        .collect();

    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{reservation_id}",
    tag = "Reservations",
    params(("reservation_id" = String, Path, description = "Reservation ID (UUID)")),
    responses(
        (status = 200, description = "Reservation details", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_reservation(
    State(state): State<ReservationAppState>,
    Path(reservation_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let reservation = state
        .repos
        .reservations()
        .find_by_id(reservation_id)
        .await
        .map_err(|e| (error_status(&e), Json(ApiResponse::error(e.to_string()))))?;

    let Some(reservation) = reservation else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!(
                "Reservation {} not found",
                reservation_id
            ))),
        ));
    };

    Ok(Json(ApiResponse::success(ReservationDto::from_domain(
        &reservation,
    ))))
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{reservation_id}/approve",
    tag = "Reservations",
    params(("reservation_id" = String, Path, description = "Reservation ID (UUID)")),
    responses(
        (status = 200, description = "Reservation approved", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Reservation already decided")
    )
)]
pub async fn approve_reservation(
    State(state): State<ReservationAppState>,
    Path(reservation_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let reservation = state
        .booking
        .approve(reservation_id)
        .await
        .map_err(|e| (error_status(&e), Json(ApiResponse::error(e.to_string()))))?;

    Ok(Json(ApiResponse::success(ReservationDto::from_domain(
        &reservation,
    ))))
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{reservation_id}/decline",
    tag = "Reservations",
    params(("reservation_id" = String, Path, description = "Reservation ID (UUID)")),
    responses(
        (status = 200, description = "Reservation declined, slot released", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Reservation already decided")
    )
)]
pub async fn decline_reservation(
    State(state): State<ReservationAppState>,
    Path(reservation_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let reservation = state
        .booking
        .decline(reservation_id)
        .await
        .map_err(|e| (error_status(&e), Json(ApiResponse::error(e.to_string()))))?;

    Ok(Json(ApiResponse::success(ReservationDto::from_domain(
        &reservation,
    ))))
}
