use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::error::BookingError;
use super::wire::{
    ConflictCheckBody, ConflictCheckResponse, ErrorBody, ReservationBody, ReservationRecord,
};
use super::ReservationApi;
use crate::models::equipment::Equipment;
use crate::models::interval::TimeInterval;
use crate::models::reservation::{BookingRequest, EquipmentId, Reservation, ReservationId};
use crate::models::settings::ClientSettings;
use crate::utils::date;

const FALLBACK_ERROR_MESSAGE: &str = "Request failed";

/// Blocking JSON-over-HTTP client for the reservation backend.
///
/// Every call is a single attempt; failures are returned to the caller
/// without retrying.
pub struct HttpReservationApi {
    client: Client,
    base_url: String,
    token: Option<String>,
    max_response_bytes: usize,
}

impl HttpReservationApi {
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        settings.validate().map_err(|err| anyhow::anyhow!(err))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .context("Failed to build reservation API HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.base_url().to_string(),
            token: settings.token().map(str::to_string),
            max_response_bytes: 2 * 1024 * 1024,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn range_query(range: &TimeInterval) -> String {
        format!(
            "start={}&end={}",
            urlencoding::encode(&date::to_iso(range.start())),
            urlencoding::encode(&date::to_iso(range.end()))
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, BookingError> {
        let response = self.authorized(request).send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());

        if status == StatusCode::UNAUTHORIZED {
            return Err(BookingError::Unauthorized(message));
        }

        Err(BookingError::Api {
            status: status.as_u16(),
            message,
        })
    }

    fn read_json<T: DeserializeOwned>(&self, response: Response) -> Result<T, BookingError> {
        if let Some(content_length) = response.content_length() {
            if content_length as usize > self.max_response_bytes {
                return Err(BookingError::InvalidResponse(format!(
                    "Response too large ({} bytes > {} bytes)",
                    content_length, self.max_response_bytes
                )));
            }
        }

        let bytes = response.bytes()?;
        if bytes.len() > self.max_response_bytes {
            return Err(BookingError::InvalidResponse(format!(
                "Response too large ({} bytes > {} bytes)",
                bytes.len(),
                self.max_response_bytes
            )));
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BookingError> {
        let url = self.endpoint(path);
        log::debug!("GET {}", url);
        let response = self.send(self.client.get(url))?;
        self.read_json(response)
    }

    fn into_reservations(records: Vec<ReservationRecord>) -> Result<Vec<Reservation>, BookingError> {
        records
            .into_iter()
            .map(|record| Reservation::try_from(record).map_err(BookingError::InvalidResponse))
            .collect()
    }

    fn into_reservation(record: ReservationRecord) -> Result<Reservation, BookingError> {
        Reservation::try_from(record).map_err(BookingError::InvalidResponse)
    }
}

impl ReservationApi for HttpReservationApi {
    fn list_equipment(&self) -> Result<Vec<Equipment>, BookingError> {
        self.get_json("/equipment")
    }

    fn fetch_reservations(
        &self,
        equipment_id: EquipmentId,
        range: &TimeInterval,
    ) -> Result<Vec<Reservation>, BookingError> {
        let path = format!(
            "/reservations/equipment/{}?{}",
            equipment_id,
            Self::range_query(range)
        );
        let records: Vec<ReservationRecord> = self.get_json(&path)?;

        // The endpoint may return the full history; keep only the window.
        let reservations = Self::into_reservations(records)?
            .into_iter()
            .filter(|reservation| reservation.interval.overlaps(range))
            .collect();

        Ok(reservations)
    }

    fn fetch_reservations_in_range(
        &self,
        range: &TimeInterval,
    ) -> Result<Vec<Reservation>, BookingError> {
        let path = format!("/reservations/range?{}", Self::range_query(range));
        let records: Vec<ReservationRecord> = self.get_json(&path)?;
        Self::into_reservations(records)
    }

    fn check_conflict(
        &self,
        equipment_id: EquipmentId,
        candidate: &TimeInterval,
        exclude_id: Option<ReservationId>,
    ) -> Result<bool, BookingError> {
        let body = ConflictCheckBody::new(equipment_id, candidate, exclude_id);
        log::debug!(
            "Checking conflict for equipment {} {}..{}",
            equipment_id,
            body.start_time,
            body.end_time
        );

        let request = self
            .client
            .post(self.endpoint("/reservations/check-conflict"))
            .json(&body);
        let response: ConflictCheckResponse = self.read_json(self.send(request)?)?;
        Ok(response.has_conflict)
    }

    fn create_reservation(&self, request: &BookingRequest) -> Result<Reservation, BookingError> {
        let body = ReservationBody::from(request);
        let http_request = self.client.post(self.endpoint("/reservations")).json(&body);
        let record: ReservationRecord = self.read_json(self.send(http_request)?)?;
        Self::into_reservation(record)
    }

    fn update_reservation(
        &self,
        id: ReservationId,
        request: &BookingRequest,
    ) -> Result<Reservation, BookingError> {
        let body = ReservationBody::from(request);
        let http_request = self
            .client
            .put(self.endpoint(&format!("/reservations/{}", id)))
            .json(&body);
        let record: ReservationRecord = self.read_json(self.send(http_request)?)?;
        Self::into_reservation(record)
    }

    fn cancel_reservation(&self, id: ReservationId) -> Result<(), BookingError> {
        let request = self
            .client
            .patch(self.endpoint(&format!("/reservations/{}/cancel", id)));
        self.send(request)?;
        Ok(())
    }
}
