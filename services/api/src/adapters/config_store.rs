//! services/api/src/adapters/config_store.rs
//!
//! File-backed implementation of the `ConfigStore` port. Every page document
//! lives in its own `config-<page>.json` file under the data directory, and
//! every mutation is a read-modify-write guarded by that page's mutex, so two
//! admin requests against the same page cannot drop each other's update.

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::Mutex;

use techpro_core::domain::{
    AccessFee, AiCourse, Batch, BatchFee, HybridConfig, HybridCourse, HybridOfflineSchedule,
    HybridOnlineSchedule, OfflineConfig, OfflineCourse, OnlineConfig, OnlineCourse, PageConfig,
    PageId, PageInfo, PaymentConfig, SeatStats, Subscription,
};
use techpro_core::domain::{slugify, AiLearningConfig};
use techpro_core::ports::{
    AccessFeePatch, AiCoursePatch, BatchFeePatch, ConfigStore, NewHybridCourse, NewOfflineCourse,
    NewOnlineCourse, OfflineCoursePatch, OnlineCoursePatch, PageInfoPatch, PaymentPatch,
    PortError, PortResult, SeatStatsPatch, SubscriptionPatch,
};

use super::file::{read_json, write_json};

/// Stock image used for hybrid courses until the admin uploads one.
const HYBRID_COURSE_IMAGE: &str = "https://lh3.googleusercontent.com/aida-public/AB6AXuDLm39_AyR6rQo5vyxLxJv45wqd9ZwS9l5_Lb3wE4NI-S5Gipje6WYgyAG4fQXMHF3YjsnBk2gGWV_26wyJtwATnwcme11hNMVOQ-nQcx2nGfDGVwu9KNuecm09YEfczzZjIxf9AoAXGIkKCy9TJYE_lD2l8jw55EEdhQcQko_I2CJ7l4vcreo37RXUVdlVpBZGvEi9Fi0yIFxq6E41_My7B-JSbbh4OQJHln_GT-2bYbXMlF2K3jgWNCLlGjMz2OL5ajDIQuYyvCw";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A config-page store backed by one JSON file per page.
pub struct JsonConfigStore {
    dir: PathBuf,
    // One lock per page file, in PageId::ALL order.
    locks: [Mutex<()>; 7],
}

impl JsonConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            locks: Default::default(),
        }
    }

    fn lock(&self, page: PageId) -> &Mutex<()> {
        let idx = match page {
            PageId::Pay => 0,
            PageId::Pay1 => 1,
            PageId::Pay2 => 2,
            PageId::Online => 3,
            PageId::AiLearning => 4,
            PageId::Offline => 5,
            PageId::Hybrid => 6,
        };
        &self.locks[idx]
    }

    fn path(&self, page: PageId) -> PathBuf {
        self.dir.join(page.file_name())
    }

    async fn load<T: DeserializeOwned>(&self, page: PageId) -> PortResult<T> {
        read_json(&self.path(page)).await
    }

    /// Read-modify-write of one page document under its lock. The closure's
    /// result is returned after a successful write-back.
    async fn with_doc<T, R, F>(&self, page: PageId, mutate: F) -> PortResult<R>
    where
        T: DeserializeOwned + Serialize,
        F: FnOnce(&mut T) -> PortResult<R>,
    {
        let _guard = self.lock(page).lock().await;
        let mut doc: T = self.load(page).await?;
        let out = mutate(&mut doc)?;
        write_json(&self.path(page), &doc).await?;
        Ok(out)
    }

    async fn load_page(&self, page: PageId) -> PortResult<PageConfig> {
        Ok(match page {
            PageId::Pay | PageId::Pay1 | PageId::Pay2 => {
                PageConfig::Payment(self.load(page).await?)
            }
            PageId::Online => PageConfig::Online(self.load(page).await?),
            PageId::AiLearning => PageConfig::AiLearning(self.load(page).await?),
            PageId::Offline => PageConfig::Offline(self.load(page).await?),
            PageId::Hybrid => PageConfig::Hybrid(self.load(page).await?),
        })
    }
}

fn course_not_found(course_id: &str) -> PortError {
    PortError::NotFound(format!("Course '{}' not found", course_id))
}

/// Fresh id for a batch added through the single-batch endpoint.
fn new_batch_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

//=========================================================================================
// ConfigStore implementation
//=========================================================================================

#[async_trait]
impl ConfigStore for JsonConfigStore {
    async fn get_page(&self, page: PageId) -> PortResult<PageConfig> {
        let _guard = self.lock(page).lock().await;
        self.load_page(page).await
    }

    async fn get_all_payment(&self) -> PortResult<BTreeMap<&'static str, Option<PageConfig>>> {
        let mut all = BTreeMap::new();
        for page in PageId::PAYMENT_PAGES {
            let _guard = self.lock(page).lock().await;
            all.insert(page.as_str(), self.load_page(page).await.ok());
        }
        Ok(all)
    }

    async fn update_payment(&self, page: PageId, patch: PaymentPatch) -> PortResult<PageConfig> {
        match page {
            // Subscription model for the Online page; the fields live at the
            // top of the same document the course catalog lives in.
            PageId::Online => {
                self.with_doc::<OnlineConfig, _, _>(page, |cfg| {
                    if patch.price.is_some() {
                        cfg.price = patch.price;
                    }
                    if let Some(period) = patch.period {
                        cfg.period = Some(period);
                    }
                    if let Some(description) = patch.description {
                        cfg.description = Some(description);
                    }
                    if let Some(title) = patch.title {
                        cfg.title = Some(title);
                    }
                    Ok(PageConfig::Online(cfg.clone()))
                })
                .await
            }
            // One-time payment model for Pay, Pay1, Pay2.
            PageId::Pay | PageId::Pay1 | PageId::Pay2 => {
                self.with_doc::<PaymentConfig, _, _>(page, |cfg| {
                    if patch.original_price.is_some() {
                        cfg.original_price = patch.original_price;
                    }
                    if patch.discount.is_some() {
                        cfg.discount = patch.discount;
                    }
                    if patch.total_amount.is_some() {
                        cfg.total_amount = patch.total_amount;
                    }
                    if let Some(label) = patch.discount_label {
                        cfg.discount_label = Some(label);
                    }
                    if let Some(name) = patch.course_name {
                        cfg.course_name = Some(name);
                    }
                    if let Some(duration) = patch.course_duration {
                        cfg.course_duration = Some(duration);
                    }
                    Ok(PageConfig::Payment(cfg.clone()))
                })
                .await
            }
            _ => Err(PortError::Invalid(
                "Invalid page ID. Use: pay, pay1, pay2, or online".to_string(),
            )),
        }
    }

    async fn update_ai_subscription(&self, patch: SubscriptionPatch) -> PortResult<Subscription> {
        self.with_doc::<AiLearningConfig, _, _>(PageId::AiLearning, |cfg| {
            let sub = cfg.subscription.get_or_insert_with(Subscription::default);
            if patch.price.is_some() {
                sub.price = patch.price;
            }
            if let Some(period) = patch.period {
                sub.period = Some(period);
            }
            Ok(sub.clone())
        })
        .await
    }

    async fn update_ai_course(
        &self,
        course_id: &str,
        patch: AiCoursePatch,
    ) -> PortResult<AiCourse> {
        self.with_doc::<AiLearningConfig, _, _>(PageId::AiLearning, |cfg| {
            let course = cfg
                .courses
                .iter_mut()
                .find(|c| c.id == course_id)
                .ok_or_else(|| course_not_found(course_id))?;
            if let Some(name) = patch.name {
                course.name = name;
            }
            if let Some(category) = patch.category {
                course.category = Some(category);
            }
            if let Some(description) = patch.description {
                course.description = Some(description);
            }
            if patch.price.is_some() {
                course.price = patch.price;
            }
            if let Some(duration) = patch.duration {
                course.duration = Some(duration);
            }
            if let Some(link) = patch.link {
                course.link = Some(link);
            }
            Ok(course.clone())
        })
        .await
    }

    async fn update_online_course(
        &self,
        course_id: &str,
        patch: OnlineCoursePatch,
    ) -> PortResult<OnlineCourse> {
        self.with_doc::<OnlineConfig, _, _>(PageId::Online, |cfg| {
            let course = cfg
                .courses
                .iter_mut()
                .find(|c| c.id == course_id)
                .ok_or_else(|| course_not_found(course_id))?;
            if let Some(name) = patch.name {
                course.name = name;
            }
            if let Some(price) = patch.price {
                course.price = price;
            }
            if let Some(duration) = patch.duration {
                course.duration = duration;
            }
            if let Some(batch_count) = patch.batch_count {
                course.batch_count = batch_count;
            }
            if let Some(icon) = patch.icon {
                course.icon = icon;
            }
            if let Some(color) = patch.color {
                course.color = color;
            }
            Ok(course.clone())
        })
        .await
    }

    async fn add_online_course(&self, new: NewOnlineCourse) -> PortResult<OnlineCourse> {
        self.with_doc::<OnlineConfig, _, _>(PageId::Online, |cfg| {
            let course = OnlineCourse {
                id: slugify(&new.name),
                name: new.name,
                icon: new.icon.unwrap_or_else(|| "school".to_string()),
                color: new.color.unwrap_or_else(|| "blue".to_string()),
                price: new.price.unwrap_or(0.0),
                duration: new.duration.unwrap_or_else(|| "3 Months".to_string()),
                batch_count: new.batch_count.unwrap_or(1),
                extra: Map::new(),
            };
            cfg.courses.push(course.clone());
            Ok(course)
        })
        .await
    }

    async fn delete_online_course(&self, course_id: &str) -> PortResult<OnlineCourse> {
        self.with_doc::<OnlineConfig, _, _>(PageId::Online, |cfg| {
            let idx = cfg
                .courses
                .iter()
                .position(|c| c.id == course_id)
                .ok_or_else(|| course_not_found(course_id))?;
            let removed = cfg.courses.remove(idx);
            // Deleting a course takes its scheduled batches with it.
            cfg.batches
                .retain(|b| b.course_id.as_deref() != Some(course_id));
            Ok(removed)
        })
        .await
    }

    async fn add_online_batch(&self, mut batch: Batch) -> PortResult<Batch> {
        self.with_doc::<OnlineConfig, _, _>(PageId::Online, |cfg| {
            let course_id = batch
                .course_id
                .as_deref()
                .ok_or_else(|| PortError::Invalid("courseId is required".to_string()))?;
            if !cfg.courses.iter().any(|c| c.id == course_id) {
                return Err(course_not_found(course_id));
            }
            batch.id = Some(new_batch_id());
            cfg.batches.push(batch.clone());
            Ok(batch)
        })
        .await
    }

    async fn update_offline_course(
        &self,
        course_id: &str,
        patch: OfflineCoursePatch,
    ) -> PortResult<OfflineCourse> {
        self.with_doc::<OfflineConfig, _, _>(PageId::Offline, |cfg| {
            let course = cfg
                .courses
                .iter_mut()
                .find(|c| c.id == course_id)
                .ok_or_else(|| course_not_found(course_id))?;
            if let Some(name) = patch.name {
                course.name = name;
            }
            if let Some(category) = patch.category {
                course.category = category;
            }
            if let Some(room) = patch.room {
                course.room = room;
            }
            if let Some(price) = patch.price {
                course.price = price;
            }
            if let Some(total_seats) = patch.total_seats {
                course.total_seats = total_seats;
            }
            if let Some(enrolled_seats) = patch.enrolled_seats {
                course.enrolled_seats = enrolled_seats;
            }
            if let Some(duration) = patch.duration {
                course.duration = duration;
            }
            if let Some(instructor) = patch.instructor {
                course.instructor = instructor;
            }
            Ok(course.clone())
        })
        .await
    }

    async fn add_offline_course(&self, new: NewOfflineCourse) -> PortResult<OfflineCourse> {
        self.with_doc::<OfflineConfig, _, _>(PageId::Offline, |cfg| {
            let course = OfflineCourse {
                id: slugify(&new.name),
                name: new.name,
                category: new.category.unwrap_or_else(|| "General".to_string()),
                room: new.room.unwrap_or_else(|| "TBD".to_string()),
                price: new.price.unwrap_or(0.0),
                total_seats: new.total_seats.unwrap_or(30),
                enrolled_seats: 0,
                duration: new.duration.unwrap_or_else(|| "3 Months".to_string()),
                instructor: new.instructor.unwrap_or_else(|| "TBD".to_string()),
                extra: Map::new(),
            };
            cfg.courses.push(course.clone());
            Ok(course)
        })
        .await
    }

    async fn update_hybrid_course(
        &self,
        course_id: &str,
        patch: Map<String, Value>,
    ) -> PortResult<HybridCourse> {
        self.with_doc::<HybridConfig, _, _>(PageId::Hybrid, |cfg| {
            let idx = cfg
                .courses
                .iter()
                .position(|c| c.id == course_id)
                .ok_or_else(|| course_not_found(course_id))?;

            // The hybrid admin form patches arbitrary keys, so the update is
            // a JSON-level merge with the id pinned.
            let mut value = serde_json::to_value(&cfg.courses[idx])
                .map_err(|e| PortError::Storage(e.to_string()))?;
            if let Value::Object(obj) = &mut value {
                for (key, val) in patch {
                    if key != "id" {
                        obj.insert(key, val);
                    }
                }
            }
            let updated: HybridCourse = serde_json::from_value(value)
                .map_err(|e| PortError::Invalid(format!("invalid course fields: {}", e)))?;
            cfg.courses[idx] = updated.clone();
            Ok(updated)
        })
        .await
    }

    async fn add_hybrid_course(&self, new: NewHybridCourse) -> PortResult<HybridCourse> {
        self.with_doc::<HybridConfig, _, _>(PageId::Hybrid, |cfg| {
            let level = new.level.unwrap_or_else(|| "Beginner".to_string());
            let level_color = if level == "Advanced" { "purple" } else { "green" };
            let course = HybridCourse {
                id: slugify(&new.name),
                name: new.name,
                instructor: new.instructor.unwrap_or_else(|| "TBD".to_string()),
                level_color: level_color.to_string(),
                level,
                start_date: new.start_date.unwrap_or_else(|| "TBD".to_string()),
                online_percent: new.online_percent.unwrap_or(50.0),
                offline_percent: new.offline_percent.unwrap_or(50.0),
                fee: new.fee.unwrap_or(999.0),
                image: HYBRID_COURSE_IMAGE.to_string(),
                online_schedule: HybridOnlineSchedule {
                    days: "TBD".to_string(),
                    time: "TBD".to_string(),
                    description: "Online Sessions".to_string(),
                    platform: "Zoom".to_string(),
                    platform_note: "Recordings available".to_string(),
                },
                offline_schedule: HybridOfflineSchedule {
                    days: "TBD".to_string(),
                    time: "TBD".to_string(),
                    description: "Lab Sessions".to_string(),
                    location: "TBD".to_string(),
                    location_note: "Main Campus".to_string(),
                },
                extra: Map::new(),
            };
            cfg.courses.push(course.clone());
            Ok(course)
        })
        .await
    }

    async fn replace_batches(&self, page: PageId, batches: Vec<Batch>) -> PortResult<Vec<Batch>> {
        match page {
            PageId::Online => {
                self.with_doc::<OnlineConfig, _, _>(page, |cfg| {
                    cfg.batches = batches;
                    Ok(cfg.batches.clone())
                })
                .await
            }
            PageId::Offline => {
                self.with_doc::<OfflineConfig, _, _>(page, |cfg| {
                    cfg.batches = batches;
                    Ok(cfg.batches.clone())
                })
                .await
            }
            PageId::Hybrid => {
                self.with_doc::<HybridConfig, _, _>(page, |cfg| {
                    cfg.batches = batches;
                    Ok(cfg.batches.clone())
                })
                .await
            }
            _ => Err(PortError::Invalid(format!(
                "Page '{}' has no batch list",
                page
            ))),
        }
    }

    async fn update_access_fee(&self, patch: AccessFeePatch) -> PortResult<AccessFee> {
        self.with_doc::<OnlineConfig, _, _>(PageId::Online, |cfg| {
            let fee = cfg.access_fee.get_or_insert_with(AccessFee::default);
            if patch.price.is_some() {
                fee.price = patch.price;
            }
            if let Some(period) = patch.period {
                fee.period = Some(period);
            }
            if let Some(description) = patch.description {
                fee.description = Some(description);
            }
            Ok(fee.clone())
        })
        .await
    }

    async fn update_batch_fee(&self, patch: BatchFeePatch) -> PortResult<BatchFee> {
        self.with_doc::<OfflineConfig, _, _>(PageId::Offline, |cfg| {
            let fee = cfg.batch_fee.get_or_insert_with(BatchFee::default);
            if patch.price.is_some() {
                fee.price = patch.price;
            }
            if let Some(currency) = patch.currency {
                fee.currency = Some(currency);
            }
            Ok(fee.clone())
        })
        .await
    }

    async fn update_stats(&self, patch: SeatStatsPatch) -> PortResult<SeatStats> {
        self.with_doc::<OfflineConfig, _, _>(PageId::Offline, |cfg| {
            let stats = cfg.stats.get_or_insert_with(SeatStats::default);
            if patch.available.is_some() {
                stats.available = patch.available;
            }
            if patch.fast_filling.is_some() {
                stats.fast_filling = patch.fast_filling;
            }
            Ok(stats.clone())
        })
        .await
    }

    async fn update_page_info(&self, patch: PageInfoPatch) -> PortResult<PageInfo> {
        self.with_doc::<HybridConfig, _, _>(PageId::Hybrid, |cfg| {
            let info = cfg.page_info.get_or_insert_with(PageInfo::default);
            if let Some(title) = patch.title {
                info.title = Some(title);
            }
            if let Some(subtitle) = patch.subtitle {
                info.subtitle = Some(subtitle);
            }
            Ok(info.clone())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn seed(dir: &std::path::Path, page: PageId, contents: &str) {
        tokio::fs::write(dir.join(page.file_name()), contents)
            .await
            .expect("seed config file");
    }

    #[tokio::test]
    async fn payment_put_merges_only_submitted_fields() {
        let tmp = tempdir().expect("tempdir");
        seed(
            tmp.path(),
            PageId::Pay,
            r#"{"originalPrice": 4999.0, "discountLabel": "Early bird", "courseName": "Full Stack"}"#,
        )
        .await;
        let store = JsonConfigStore::new(tmp.path());

        let patch = PaymentPatch {
            total_amount: Some(2999.0),
            discount: Some(40.0),
            ..Default::default()
        };
        store.update_payment(PageId::Pay, patch).await.expect("update");

        match store.get_page(PageId::Pay).await.expect("get") {
            PageConfig::Payment(cfg) => {
                assert_eq!(cfg.total_amount, Some(2999.0));
                assert_eq!(cfg.discount, Some(40.0));
                // Untouched fields survive the merge.
                assert_eq!(cfg.original_price, Some(4999.0));
                assert_eq!(cfg.discount_label.as_deref(), Some("Early bird"));
                assert_eq!(cfg.course_name.as_deref(), Some("Full Stack"));
            }
            other => panic!("expected payment config, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_config_file_is_a_read_failure_not_autocreate() {
        let tmp = tempdir().expect("tempdir");
        let store = JsonConfigStore::new(tmp.path());
        assert!(matches!(
            store.get_page(PageId::Online).await,
            Err(PortError::Storage(_))
        ));
        assert!(!tmp.path().join(PageId::Online.file_name()).exists());
    }

    #[tokio::test]
    async fn new_online_course_gets_slug_id_and_defaults() {
        let tmp = tempdir().expect("tempdir");
        seed(tmp.path(), PageId::Online, r#"{"courses": [], "batches": []}"#).await;
        let store = JsonConfigStore::new(tmp.path());

        let course = store
            .add_online_course(NewOnlineCourse {
                name: "Cyber Security!".to_string(),
                price: None,
                duration: None,
                batch_count: None,
                icon: None,
                color: None,
            })
            .await
            .expect("add course");

        assert_eq!(course.id, "cyber-security");
        assert_eq!(course.price, 0.0);
        assert_eq!(course.duration, "3 Months");
        assert_eq!(course.batch_count, 1);
        assert_eq!(course.icon, "school");
        assert_eq!(course.color, "blue");
    }

    #[tokio::test]
    async fn slug_collisions_are_not_deduped() {
        let tmp = tempdir().expect("tempdir");
        seed(tmp.path(), PageId::Online, r#"{"courses": [], "batches": []}"#).await;
        let store = JsonConfigStore::new(tmp.path());

        for name in ["Cyber Security", "cyber-security!"] {
            store
                .add_online_course(NewOnlineCourse {
                    name: name.to_string(),
                    price: None,
                    duration: None,
                    batch_count: None,
                    icon: None,
                    color: None,
                })
                .await
                .expect("add course");
        }

        match store.get_page(PageId::Online).await.expect("get") {
            PageConfig::Online(cfg) => {
                assert_eq!(cfg.courses.len(), 2);
                assert_eq!(cfg.courses[0].id, cfg.courses[1].id);
            }
            other => panic!("expected online config, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn deleting_a_course_removes_its_batches() {
        let tmp = tempdir().expect("tempdir");
        seed(
            tmp.path(),
            PageId::Online,
            r#"{
                "courses": [
                    {"id": "rust", "name": "Rust", "icon": "code", "color": "orange",
                     "price": 99.0, "duration": "3 Months", "batchCount": 2},
                    {"id": "go", "name": "Go", "icon": "code", "color": "cyan",
                     "price": 89.0, "duration": "3 Months", "batchCount": 1}
                ],
                "batches": [
                    {"id": "1", "courseId": "rust", "faculty": "A"},
                    {"id": "2", "courseId": "go", "faculty": "B"},
                    {"id": "3", "courseId": "rust", "faculty": "C"}
                ]
            }"#,
        )
        .await;
        let store = JsonConfigStore::new(tmp.path());

        let removed = store.delete_online_course("rust").await.expect("delete");
        assert_eq!(removed.name, "Rust");

        match store.get_page(PageId::Online).await.expect("get") {
            PageConfig::Online(cfg) => {
                assert_eq!(cfg.courses.len(), 1);
                assert_eq!(cfg.batches.len(), 1);
                assert_eq!(cfg.batches[0].course_id.as_deref(), Some("go"));
            }
            other => panic!("expected online config, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unknown_course_update_is_not_found() {
        let tmp = tempdir().expect("tempdir");
        seed(tmp.path(), PageId::Online, r#"{"courses": [], "batches": []}"#).await;
        let store = JsonConfigStore::new(tmp.path());

        let err = store
            .update_online_course("nope", OnlineCoursePatch::default())
            .await
            .expect_err("should be not found");
        assert!(matches!(err, PortError::NotFound(_)));
    }

    #[tokio::test]
    async fn hybrid_course_patch_merges_arbitrary_fields_but_keeps_id() {
        let tmp = tempdir().expect("tempdir");
        seed(tmp.path(), PageId::Hybrid, r#"{"courses": [], "batches": []}"#).await;
        let store = JsonConfigStore::new(tmp.path());

        store
            .add_hybrid_course(NewHybridCourse {
                name: "Data Engineering".to_string(),
                instructor: None,
                level: Some("Advanced".to_string()),
                fee: None,
                online_percent: None,
                offline_percent: None,
                start_date: None,
            })
            .await
            .expect("add course");

        let mut patch = Map::new();
        patch.insert("id".to_string(), Value::String("hijacked".to_string()));
        patch.insert("fee".to_string(), Value::from(1299.0));
        patch.insert("mentor".to_string(), Value::String("Priya".to_string()));

        let updated = store
            .update_hybrid_course("data-engineering", patch)
            .await
            .expect("update");
        assert_eq!(updated.id, "data-engineering");
        assert_eq!(updated.fee, 1299.0);
        assert_eq!(updated.level_color, "purple");
        assert_eq!(updated.extra.get("mentor"), Some(&Value::String("Priya".into())));
    }

    #[tokio::test]
    async fn batches_replace_wholesale() {
        let tmp = tempdir().expect("tempdir");
        seed(
            tmp.path(),
            PageId::Offline,
            r#"{"courses": [], "batches": [{"id": "old", "courseId": "x"}]}"#,
        )
        .await;
        let store = JsonConfigStore::new(tmp.path());

        let replaced = store
            .replace_batches(
                PageId::Offline,
                vec![Batch {
                    id: Some("b1".to_string()),
                    course_id: Some("rust".to_string()),
                    faculty: Some("Dr. Rao".to_string()),
                    day: Some("Mon".to_string()),
                    start_time: Some("10:00".to_string()),
                    end_time: Some("12:00".to_string()),
                    duration: Some("2 Hours".to_string()),
                    extra: Map::new(),
                }],
            )
            .await
            .expect("replace");
        assert_eq!(replaced.len(), 1);
        assert_eq!(replaced[0].id.as_deref(), Some("b1"));
    }
}
