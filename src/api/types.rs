//! API request and response types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::devices::{DeviceId, ZoneId, ZoneRatings};
use crate::sim::EnergyError;
use crate::sim::types::ZoneConsumption;

/// Battery level with the admission it implies.
#[derive(Debug, Serialize)]
pub struct BatteryResponse {
    pub level: u8,
    pub allowed_zone_count: usize,
    /// Whether a decrease is waiting for a device choice.
    pub decrease_pending: bool,
}

/// Absolute battery write. Out-of-range values are clamped.
#[derive(Debug, Deserialize)]
pub struct SetBatteryRequest {
    pub level: i64,
}

/// Total draw and per-zone breakdown.
#[derive(Debug, Serialize)]
pub struct ConsumptionResponse {
    pub total_w: u64,
    pub zones: Vec<ZoneConsumption>,
}

/// New zone payload.
#[derive(Debug, Deserialize)]
pub struct NewZoneRequest {
    pub name: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default)]
    pub ratings: Option<ZoneRatings>,
}

fn default_icon() -> String {
    "🏠".to_string()
}

/// Id of a freshly created zone.
#[derive(Debug, Serialize)]
pub struct ZoneCreated {
    pub id: ZoneId,
}

/// Id of a freshly created device.
#[derive(Debug, Serialize)]
pub struct DeviceCreated {
    pub id: DeviceId,
}

/// Device update: explicit state, or toggle when `on` is omitted.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDeviceRequest {
    #[serde(default)]
    pub on: Option<bool>,
}

/// Device chosen to shed for a pending decrease.
#[derive(Debug, Deserialize)]
pub struct ChoiceRequest {
    pub zone_id: ZoneId,
    pub device_id: DeviceId,
}

/// Result of cancelling a pending decrease.
#[derive(Debug, Serialize)]
pub struct CancelResponse {
    /// `false` when nothing was pending.
    pub cancelled: bool,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Household error carried to the HTTP layer.
#[derive(Debug)]
pub struct ApiError(pub EnergyError);

impl From<EnergyError> for ApiError {
    fn from(e: EnergyError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            EnergyError::ZoneNotFound(_) | EnergyError::DeviceNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            EnergyError::DecisionPending | EnergyError::NoPendingDecrease => StatusCode::CONFLICT,
            EnergyError::ZeroConsumption
            | EnergyError::EmptyName
            | EnergyError::DuplicateId(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_mapping() {
        assert_eq!(
            ApiError(EnergyError::ZoneNotFound(ZoneId(1))).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError(EnergyError::DecisionPending).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError(EnergyError::NoPendingDecrease).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError(EnergyError::ZeroConsumption).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(EnergyError::DuplicateId(7)).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn update_request_defaults_to_toggle() {
        let req: Result<UpdateDeviceRequest, _> = serde_json::from_str("{}");
        assert_eq!(req.ok().and_then(|r| r.on), None);
        let req: Result<UpdateDeviceRequest, _> = serde_json::from_str(r#"{"on":true}"#);
        assert_eq!(req.ok().and_then(|r| r.on), Some(true));
    }
}
