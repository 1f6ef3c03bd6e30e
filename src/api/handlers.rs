//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::{info, warn};

use super::AppState;
use super::types::{
    ApiError, BatteryResponse, CancelResponse, ChoiceRequest, ConsumptionResponse,
    DeviceCreated, NewZoneRequest, SetBatteryRequest, UpdateDeviceRequest, ZoneCreated,
};
use crate::devices::{Device, DeviceId, DeviceTypeInfo, NewDevice, Zone, ZoneId};
use crate::sim::{EnergyError, Household};
use crate::sim::deficit::DecreaseOutcome;
use crate::sim::estimate::EnergyReport;
use crate::sim::types::HouseholdSnapshot;

type ApiResult<T> = Result<T, ApiError>;

fn battery_response(h: &Household) -> BatteryResponse {
    BatteryResponse {
        level: h.battery_level(),
        allowed_zone_count: h.allowed_zone_count(),
        decrease_pending: h.is_decrease_pending(),
    }
}

/// `GET /state` → full household snapshot.
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<HouseholdSnapshot> {
    Json(state.household.lock().await.snapshot())
}

/// `GET /zones` → zones with their devices, in admission order.
pub async fn list_zones(State(state): State<Arc<AppState>>) -> Json<Vec<Zone>> {
    Json(state.household.lock().await.zones().to_vec())
}

/// `POST /zones` → 201 + new zone id.
pub async fn add_zone(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewZoneRequest>,
) -> ApiResult<(StatusCode, Json<ZoneCreated>)> {
    let mut h = state.household.lock().await;
    let id = h.add_zone(&req.name, &req.icon, req.ratings.unwrap_or_default())?;
    info!(zone = %id, name = %req.name, "zone added");
    Ok((StatusCode::CREATED, Json(ZoneCreated { id })))
}

/// `DELETE /zones/{zone_id}` → removed zone.
pub async fn remove_zone(
    State(state): State<Arc<AppState>>,
    Path(zone_id): Path<u64>,
) -> ApiResult<Json<Zone>> {
    let zone = state.household.lock().await.remove_zone(ZoneId(zone_id))?;
    info!(zone = %zone.id, devices = zone.devices.len(), "zone removed");
    Ok(Json(zone))
}

/// `POST /zones/{zone_id}/devices` → 201 + new device id.
pub async fn add_device(
    State(state): State<Arc<AppState>>,
    Path(zone_id): Path<u64>,
    Json(req): Json<NewDevice>,
) -> ApiResult<(StatusCode, Json<DeviceCreated>)> {
    let kind = req.kind;
    let id = state
        .household
        .lock()
        .await
        .add_device(ZoneId(zone_id), req)?;
    info!(zone = zone_id, device = %id, %kind, "device added");
    Ok((StatusCode::CREATED, Json(DeviceCreated { id })))
}

/// `PATCH /zones/{zone_id}/devices/{device_id}` → updated device.
///
/// `{"on": bool}` sets the power state; `{}` toggles it.
pub async fn update_device(
    State(state): State<Arc<AppState>>,
    Path((zone_id, device_id)): Path<(u64, u64)>,
    Json(req): Json<UpdateDeviceRequest>,
) -> ApiResult<Json<Device>> {
    let (zone_id, device_id) = (ZoneId(zone_id), DeviceId(device_id));
    let mut h = state.household.lock().await;
    let on = match req.on {
        Some(on) => h.set_device_power(zone_id, device_id, on)?.on,
        None => h.toggle_device(zone_id, device_id)?,
    };
    info!(zone = %zone_id, device = %device_id, on, "device power changed");
    let device = h
        .zone(zone_id)
        .and_then(|z| z.device(device_id))
        .cloned()
        .ok_or(EnergyError::DeviceNotFound {
            zone: zone_id,
            device: device_id,
        })?;
    Ok(Json(device))
}

/// `DELETE /zones/{zone_id}/devices/{device_id}` → removed device.
pub async fn remove_device(
    State(state): State<Arc<AppState>>,
    Path((zone_id, device_id)): Path<(u64, u64)>,
) -> ApiResult<Json<Device>> {
    let device = state
        .household
        .lock()
        .await
        .remove_device(ZoneId(zone_id), DeviceId(device_id))?;
    info!(zone = zone_id, device = device_id, "device removed");
    Ok(Json(device))
}

/// `GET /device-types` → the fixed catalog.
pub async fn device_types(State(state): State<Arc<AppState>>) -> Json<Vec<DeviceTypeInfo>> {
    Json(state.household.lock().await.device_types())
}

/// `GET /battery` → level and allowed zone count.
pub async fn get_battery(State(state): State<Arc<AppState>>) -> Json<BatteryResponse> {
    Json(battery_response(&*state.household.lock().await))
}

/// `POST /battery` → absolute write, clamped into [0, 100].
pub async fn set_battery(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetBatteryRequest>,
) -> ApiResult<Json<BatteryResponse>> {
    let mut h = state.household.lock().await;
    let clamped = h.set_battery_level(req.level)?;
    if clamped {
        warn!(requested = req.level, level = h.battery_level(), "battery level clamped");
    }
    info!(level = h.battery_level(), "battery level set");
    Ok(Json(battery_response(&h)))
}

/// `POST /battery/increase` → one step up, never gated.
pub async fn increase_battery(State(state): State<Arc<AppState>>) -> Json<BatteryResponse> {
    let mut h = state.household.lock().await;
    let level = h.request_battery_increase();
    info!(level, "battery increased");
    Json(battery_response(&h))
}

/// `POST /battery/decrease` → committed, or pending with the choice menu.
///
/// 409 if a decrease is already pending.
pub async fn decrease_battery(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DecreaseOutcome>> {
    let outcome = state.household.lock().await.request_battery_decrease()?;
    match &outcome {
        DecreaseOutcome::Committed { battery_level } => {
            info!(level = battery_level, "battery decreased");
        }
        DecreaseOutcome::PendingChoice { choices } => {
            info!(choices = choices.len(), "battery decrease awaiting device choice");
        }
    }
    Ok(Json(outcome))
}

/// `POST /deficit/choice` → shed the device, commit the decrease.
pub async fn choose_device(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChoiceRequest>,
) -> ApiResult<Json<BatteryResponse>> {
    let mut h = state.household.lock().await;
    let level = h.choose_device_to_shed(req.zone_id, req.device_id)?;
    info!(zone = %req.zone_id, device = %req.device_id, level, "device shed, decrease committed");
    Ok(Json(battery_response(&h)))
}

/// `POST /deficit/cancel` → discard a pending decrease.
pub async fn cancel_deficit(State(state): State<Arc<AppState>>) -> Json<CancelResponse> {
    let cancelled = state.household.lock().await.cancel_deficit();
    if cancelled {
        info!("pending battery decrease cancelled");
    }
    Json(CancelResponse { cancelled })
}

/// `GET /consumption` → total and per-zone active draw.
pub async fn get_consumption(State(state): State<Arc<AppState>>) -> Json<ConsumptionResponse> {
    let h = state.household.lock().await;
    Json(ConsumptionResponse {
        total_w: h.total_consumption_w(),
        zones: h.zone_consumption(),
    })
}

/// `GET /report` → estimator projections.
pub async fn get_report(State(state): State<Arc<AppState>>) -> Json<EnergyReport> {
    Json(state.household.lock().await.report())
}
