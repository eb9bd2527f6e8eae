//! crates/techpro_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of how the documents are actually persisted or how
//! email leaves the system.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::domain::{
    AccessFee, AiCourse, Batch, BatchFee, DashboardStats, HybridCourse, NewUser, OfflineCourse,
    OnlineCourse, PageConfig, PageId, PageInfo, PublicUser, SeatStats, Student, Subscription,
    User, VerifyOutcome,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from the backing storage.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    Invalid(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Storage error: {0}")]
    Storage(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Patch types (partial updates - only fields present in the request apply)
//=========================================================================================

/// Covers both pricing models: the one-time fields for the Pay pages and the
/// subscription fields for the Online page. The store applies the subset that
/// matches the page being updated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPatch {
    pub original_price: Option<f64>,
    pub discount: Option<f64>,
    pub total_amount: Option<f64>,
    pub discount_label: Option<String>,
    pub course_name: Option<String>,
    pub course_duration: Option<String>,
    pub price: Option<f64>,
    pub period: Option<String>,
    pub description: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionPatch {
    pub price: Option<f64>,
    pub period: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessFeePatch {
    pub price: Option<f64>,
    pub period: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchFeePatch {
    pub price: Option<f64>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatStatsPatch {
    pub available: Option<u32>,
    pub fast_filling: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageInfoPatch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineCoursePatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub duration: Option<String>,
    pub batch_count: Option<u32>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AiCoursePatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub duration: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfflineCoursePatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub room: Option<String>,
    pub price: Option<f64>,
    pub total_seats: Option<u32>,
    pub enrolled_seats: Option<u32>,
    pub duration: Option<String>,
    pub instructor: Option<String>,
}

//=========================================================================================
// New-course payloads (id is derived from the name, everything else defaults)
//=========================================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOnlineCourse {
    pub name: String,
    pub price: Option<f64>,
    pub duration: Option<String>,
    pub batch_count: Option<u32>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOfflineCourse {
    pub name: String,
    pub category: Option<String>,
    pub room: Option<String>,
    pub price: Option<f64>,
    pub total_seats: Option<u32>,
    pub duration: Option<String>,
    pub instructor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHybridCourse {
    pub name: String,
    pub instructor: Option<String>,
    pub level: Option<String>,
    pub fee: Option<f64>,
    pub online_percent: Option<f64>,
    pub offline_percent: Option<f64>,
    pub start_date: Option<String>,
}

/// Result summary of a bulk student import.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationSummary {
    pub migrated_count: usize,
    pub total_students: usize,
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Keyed repository for the per-page config documents.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn get_page(&self, page: PageId) -> PortResult<PageConfig>;

    /// All payment-family documents keyed by page id; pages whose file cannot
    /// be read come back as `None` rather than failing the whole call.
    async fn get_all_payment(&self) -> PortResult<BTreeMap<&'static str, Option<PageConfig>>>;

    /// Partial merge of pricing fields into a payment page's document.
    async fn update_payment(&self, page: PageId, patch: PaymentPatch) -> PortResult<PageConfig>;

    async fn update_ai_subscription(&self, patch: SubscriptionPatch) -> PortResult<Subscription>;
    async fn update_ai_course(&self, course_id: &str, patch: AiCoursePatch)
        -> PortResult<AiCourse>;

    async fn update_online_course(
        &self,
        course_id: &str,
        patch: OnlineCoursePatch,
    ) -> PortResult<OnlineCourse>;
    async fn add_online_course(&self, new: NewOnlineCourse) -> PortResult<OnlineCourse>;
    /// Removes the course and every batch scheduled against it.
    async fn delete_online_course(&self, course_id: &str) -> PortResult<OnlineCourse>;
    async fn add_online_batch(&self, batch: Batch) -> PortResult<Batch>;

    async fn update_offline_course(
        &self,
        course_id: &str,
        patch: OfflineCoursePatch,
    ) -> PortResult<OfflineCourse>;
    async fn add_offline_course(&self, new: NewOfflineCourse) -> PortResult<OfflineCourse>;

    /// Applies arbitrary fields from the request onto the course; `id` is
    /// always preserved.
    async fn update_hybrid_course(
        &self,
        course_id: &str,
        patch: Map<String, Value>,
    ) -> PortResult<HybridCourse>;
    async fn add_hybrid_course(&self, new: NewHybridCourse) -> PortResult<HybridCourse>;

    /// Full replace of a page's batch list (online, offline, hybrid).
    async fn replace_batches(&self, page: PageId, batches: Vec<Batch>) -> PortResult<Vec<Batch>>;

    async fn update_access_fee(&self, patch: AccessFeePatch) -> PortResult<AccessFee>;
    async fn update_batch_fee(&self, patch: BatchFeePatch) -> PortResult<BatchFee>;
    async fn update_stats(&self, patch: SeatStatsPatch) -> PortResult<SeatStats>;
    async fn update_page_info(&self, patch: PageInfoPatch) -> PortResult<PageInfo>;
}

/// Flat-file collection of student records.
#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn list(&self) -> PortResult<Vec<Student>>;
    async fn get(&self, id: &str) -> PortResult<Student>;

    /// Creates a record with a fresh `YYMMnnnn` id and prepends it.
    async fn create(&self, fields: Map<String, Value>) -> PortResult<Student>;

    /// Bulk import. Records whose email already exists are skipped; the rest
    /// get ids synthesized from their own `timestamp` field when parseable.
    async fn migrate(&self, records: Vec<Map<String, Value>>) -> PortResult<MigrationSummary>;

    /// Partial overwrite; the id itself is immutable.
    async fn update(&self, id: &str, fields: Map<String, Value>) -> PortResult<Student>;

    /// Removes and returns the record.
    async fn delete(&self, id: &str) -> PortResult<Student>;

    async fn dashboard_stats(&self) -> PortResult<DashboardStats>;
}

/// Flat-file collection of user accounts with the email-verification
/// lifecycle.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `Conflict` when the email is already registered. Returns
    /// the stored record including its fresh verification token.
    async fn signup(&self, new_user: NewUser) -> PortResult<User>;

    /// Marks the matching account verified and nulls its token. Idempotent
    /// for already-verified accounts.
    async fn verify_token(&self, token: &str) -> PortResult<VerifyOutcome>;

    /// `Unauthorized` when the email is unknown or the password does not
    /// verify against the stored hash.
    async fn login(&self, email: &str, password: &str) -> PortResult<PublicUser>;

    async fn list(&self) -> PortResult<Vec<PublicUser>>;
}

/// Outbound email. Sending is best-effort: a failed send is reported as
/// `false` and logged by the adapter, never bubbled up as an error.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> bool;
}
