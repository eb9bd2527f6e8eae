//! services/api/src/web/pages.rs
//!
//! Axum handlers for the page-config route families: payment pricing, the
//! AI-learning catalog, and the online/offline/hybrid course pages. Each
//! handler converts its own failures into the response envelope; nothing
//! escapes to a generic error handler.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{Map, Value};
use std::sync::Arc;

use techpro_core::domain::{Batch, PageId};
use techpro_core::ports::{
    AccessFeePatch, AiCoursePatch, BatchFeePatch, NewHybridCourse, NewOfflineCourse,
    NewOnlineCourse, OfflineCoursePatch, OnlineCoursePatch, PageInfoPatch, PaymentPatch,
    SeatStatsPatch, SubscriptionPatch,
};

use crate::web::envelope::{fail, port_failure, Envelope, Failure};
use crate::web::state::AppState;

const INVALID_PAGE_ID: &str = "Invalid page ID. Use: pay, pay1, pay2, or online";

fn payment_page(page_id: &str) -> Result<PageId, Failure> {
    match page_id.parse::<PageId>() {
        Ok(page) if page.is_payment_page() => Ok(page),
        _ => Err(fail(StatusCode::BAD_REQUEST, INVALID_PAGE_ID)),
    }
}

/// Pulls the `batches` array out of a `{"batches": [...]}` body, rejecting
/// anything that is not an array.
fn parse_batches(mut body: Map<String, Value>) -> Result<Vec<Batch>, Failure> {
    match body.remove("batches") {
        Some(value @ Value::Array(_)) => serde_json::from_value(value)
            .map_err(|_| fail(StatusCode::BAD_REQUEST, "Invalid batch entry")),
        _ => Err(fail(StatusCode::BAD_REQUEST, "Batches must be an array")),
    }
}

//=========================================================================================
// Payment config
//=========================================================================================

pub async fn get_all_payment_configs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let all = state
        .configs
        .get_all_payment()
        .await
        .map_err(|e| port_failure(e, "Failed to read payment configurations"))?;
    Ok(Json(Envelope::data(all)))
}

pub async fn get_payment_config(
    State(state): State<Arc<AppState>>,
    Path(page_id): Path<String>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let page = payment_page(&page_id)?;
    let config = state.configs.get_page(page).await.map_err(|e| {
        port_failure(
            e,
            &format!("Failed to read payment configuration for {}", page),
        )
    })?;
    Ok(Json(Envelope::data(config).with_page_id(page.as_str())))
}

pub async fn update_payment_config(
    State(state): State<Arc<AppState>>,
    Path(page_id): Path<String>,
    Json(patch): Json<PaymentPatch>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let page = payment_page(&page_id)?;
    let updated = state.configs.update_payment(page, patch).await.map_err(|e| {
        port_failure(
            e,
            &format!("Failed to update payment configuration for {}", page),
        )
    })?;
    Ok(Json(Envelope::data(updated).with_message(format!(
        "Payment configuration for {} updated successfully",
        page
    ))))
}

//=========================================================================================
// AI Learning config
//=========================================================================================

pub async fn get_ailearning_config(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let config = state
        .configs
        .get_page(PageId::AiLearning)
        .await
        .map_err(|e| port_failure(e, "Failed to read AI learning configuration"))?;
    Ok(Json(Envelope::data(config)))
}

pub async fn update_ai_subscription(
    State(state): State<Arc<AppState>>,
    Json(patch): Json<SubscriptionPatch>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let subscription = state
        .configs
        .update_ai_subscription(patch)
        .await
        .map_err(|e| port_failure(e, "Failed to update subscription"))?;
    Ok(Json(
        Envelope::data(subscription).with_message("Subscription updated successfully"),
    ))
}

pub async fn update_ai_course(
    State(state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
    Json(patch): Json<AiCoursePatch>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let course = state
        .configs
        .update_ai_course(&course_id, patch)
        .await
        .map_err(|e| port_failure(e, "Failed to update course"))?;
    Ok(Json(Envelope::data(course).with_message(format!(
        "Course '{}' updated successfully",
        course_id
    ))))
}

//=========================================================================================
// Online config
//=========================================================================================

pub async fn get_online_config(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let config = state
        .configs
        .get_page(PageId::Online)
        .await
        .map_err(|e| port_failure(e, "Failed to read online configuration"))?;
    Ok(Json(Envelope::data(config)))
}

pub async fn update_online_batches(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let batches = parse_batches(body)?;
    let updated = state
        .configs
        .replace_batches(PageId::Online, batches)
        .await
        .map_err(|e| port_failure(e, "Failed to update batches"))?;
    Ok(Json(
        Envelope::data(updated).with_message("Batches updated successfully"),
    ))
}

pub async fn update_access_fee(
    State(state): State<Arc<AppState>>,
    Json(patch): Json<AccessFeePatch>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let fee = state
        .configs
        .update_access_fee(patch)
        .await
        .map_err(|e| port_failure(e, "Failed to update access fee"))?;
    Ok(Json(
        Envelope::data(fee).with_message("Access fee updated successfully"),
    ))
}

pub async fn update_online_course(
    State(state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
    Json(patch): Json<OnlineCoursePatch>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let course = state
        .configs
        .update_online_course(&course_id, patch)
        .await
        .map_err(|e| port_failure(e, "Failed to update course"))?;
    Ok(Json(Envelope::data(course).with_message(format!(
        "Course '{}' updated successfully",
        course_id
    ))))
}

pub async fn create_online_course(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let new: NewOnlineCourse = parse_new_course(body)?;
    let course = state
        .configs
        .add_online_course(new)
        .await
        .map_err(|e| port_failure(e, "Failed to add course"))?;
    Ok(Json(Envelope::data(course).with_message("Course added")))
}

pub async fn delete_online_course(
    State(state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let removed = state
        .configs
        .delete_online_course(&course_id)
        .await
        .map_err(|e| port_failure(e, "Failed to delete course"))?;
    Ok(Json(Envelope::data(removed).with_message("Course deleted")))
}

pub async fn create_online_batch(
    State(state): State<Arc<AppState>>,
    Json(batch): Json<Batch>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let added = state
        .configs
        .add_online_batch(batch)
        .await
        .map_err(|e| port_failure(e, "Failed to add batch"))?;
    Ok(Json(Envelope::data(added).with_message("Batch added")))
}

//=========================================================================================
// Offline config
//=========================================================================================

pub async fn get_offline_config(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let config = state
        .configs
        .get_page(PageId::Offline)
        .await
        .map_err(|e| port_failure(e, "Failed to read offline configuration"))?;
    Ok(Json(Envelope::data(config)))
}

pub async fn update_batch_fee(
    State(state): State<Arc<AppState>>,
    Json(patch): Json<BatchFeePatch>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let fee = state
        .configs
        .update_batch_fee(patch)
        .await
        .map_err(|e| port_failure(e, "Failed to update batch fee"))?;
    Ok(Json(Envelope::data(fee).with_message("Batch fee updated")))
}

pub async fn update_offline_stats(
    State(state): State<Arc<AppState>>,
    Json(patch): Json<SeatStatsPatch>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let stats = state
        .configs
        .update_stats(patch)
        .await
        .map_err(|e| port_failure(e, "Failed to update stats"))?;
    Ok(Json(Envelope::data(stats).with_message("Stats updated")))
}

pub async fn update_offline_batches(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let batches = parse_batches(body)?;
    let updated = state
        .configs
        .replace_batches(PageId::Offline, batches)
        .await
        .map_err(|e| port_failure(e, "Failed to update batches"))?;
    Ok(Json(
        Envelope::data(updated).with_message("Batches updated successfully"),
    ))
}

pub async fn update_offline_course(
    State(state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
    Json(patch): Json<OfflineCoursePatch>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let course = state
        .configs
        .update_offline_course(&course_id, patch)
        .await
        .map_err(|e| port_failure(e, "Failed to update course"))?;
    Ok(Json(Envelope::data(course).with_message("Course updated")))
}

pub async fn create_offline_course(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let new: NewOfflineCourse = parse_new_course(body)?;
    let course = state
        .configs
        .add_offline_course(new)
        .await
        .map_err(|e| port_failure(e, "Failed to add course"))?;
    Ok(Json(Envelope::data(course).with_message("Course added")))
}

//=========================================================================================
// Hybrid config
//=========================================================================================

pub async fn get_hybrid_config(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let config = state
        .configs
        .get_page(PageId::Hybrid)
        .await
        .map_err(|e| port_failure(e, "Failed to read hybrid configuration"))?;
    Ok(Json(Envelope::data(config)))
}

pub async fn update_page_info(
    State(state): State<Arc<AppState>>,
    Json(patch): Json<PageInfoPatch>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let info = state
        .configs
        .update_page_info(patch)
        .await
        .map_err(|e| port_failure(e, "Failed to update page info"))?;
    Ok(Json(Envelope::data(info).with_message("Page info updated")))
}

pub async fn update_hybrid_batches(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let batches = parse_batches(body)?;
    let updated = state
        .configs
        .replace_batches(PageId::Hybrid, batches)
        .await
        .map_err(|e| port_failure(e, "Failed to update batches"))?;
    Ok(Json(
        Envelope::data(updated).with_message("Batches updated successfully"),
    ))
}

pub async fn update_hybrid_course(
    State(state): State<Arc<AppState>>,
    Path(course_id): Path<String>,
    Json(patch): Json<Map<String, Value>>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let course = state
        .configs
        .update_hybrid_course(&course_id, patch)
        .await
        .map_err(|e| port_failure(e, "Failed to update course"))?;
    Ok(Json(Envelope::data(course).with_message("Course updated")))
}

pub async fn create_hybrid_course(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<Envelope<impl serde::Serialize>>, Failure> {
    let new: NewHybridCourse = parse_new_course(body)?;
    let course = state
        .configs
        .add_hybrid_course(new)
        .await
        .map_err(|e| port_failure(e, "Failed to add course"))?;
    Ok(Json(Envelope::data(course).with_message("Course added")))
}

/// New-course bodies share one rule: `name` must be a non-empty string, and
/// everything else is optional. Parsing through a raw map first lets the
/// missing-name case report the fixed message instead of a serde error.
fn parse_new_course<T: serde::de::DeserializeOwned>(
    body: Map<String, Value>,
) -> Result<T, Failure> {
    let has_name = body
        .get("name")
        .and_then(Value::as_str)
        .is_some_and(|n| !n.is_empty());
    if !has_name {
        return Err(fail(StatusCode::BAD_REQUEST, "Course name is required"));
    }
    serde_json::from_value(Value::Object(body))
        .map_err(|e| fail(StatusCode::BAD_REQUEST, format!("Invalid course payload: {}", e)))
}
