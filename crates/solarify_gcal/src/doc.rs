// File: crates/solarify_gcal/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{
    AvailabilityQuery, AvailabilityResponse, BookingResponse, CancelBookingResponse,
    CreateBookingRequest, SlotView,
};
use solarify_db::models::Booking;

#[utoipa::path(
    get,
    path = "/gcal/availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Slot grid for the date; empty on closed days", body = AvailabilityResponse),
        (status = 400, description = "Malformed date")
    )
)]
fn doc_get_availability_handler() {}

#[utoipa::path(
    post,
    path = "/gcal/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 200, description = "Appointment booked", body = BookingResponse),
        (status = 400, description = "Invalid booking payload"),
        (status = 502, description = "Calendar service failure")
    )
)]
fn doc_create_booking_handler() {}

#[utoipa::path(
    get,
    path = "/gcal/admin/bookings",
    responses(
        (status = 200, description = "All bookings, newest first", body = Vec<Booking>),
        (status = 401, description = "No valid session")
    )
)]
fn doc_list_bookings_handler() {}

#[utoipa::path(
    delete,
    path = "/gcal/admin/bookings/{id}",
    params(("id" = i64, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Cancellation result", body = CancelBookingResponse),
        (status = 401, description = "No valid session"),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Booking already cancelled")
    )
)]
fn doc_cancel_booking_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_get_availability_handler,
        doc_create_booking_handler,
        doc_list_bookings_handler,
        doc_cancel_booking_handler
    ),
    components(
        schemas(
            AvailabilityResponse,
            SlotView,
            CreateBookingRequest,
            BookingResponse,
            CancelBookingResponse,
            Booking
        )
    ),
    tags(
        (name = "gcal", description = "Appointment booking API")
    ),
    servers(
        (url = "/api", description = "Solarify API server")
    )
)]
pub struct GcalApiDoc;
