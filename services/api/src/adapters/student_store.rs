//! services/api/src/adapters/student_store.rs
//!
//! File-backed implementation of the `StudentStore` port. The whole registry
//! lives in one `students.json` file that is auto-created empty on first use,
//! and every operation is a read-modify-write under a single mutex.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tokio::sync::Mutex;

use techpro_core::domain::{DashboardStats, Student};
use techpro_core::ports::{MigrationSummary, PortError, PortResult, StudentStore};

use super::file::{read_json, write_json};

//=========================================================================================
// On-disk document
//=========================================================================================

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StudentsFile {
    #[serde(default)]
    students: Vec<Student>,
    #[serde(default)]
    last_updated: Option<DateTime<Utc>>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

pub struct JsonStudentStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonStudentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join("students.json"),
            lock: Mutex::new(()),
        }
    }

    /// Reads the registry, creating an empty one when the file is missing.
    /// A file that exists but fails to parse is a storage error, never
    /// silently treated as empty.
    async fn read(&self) -> PortResult<StudentsFile> {
        if tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| PortError::Storage(e.to_string()))?
        {
            read_json(&self.path).await
        } else {
            let empty = StudentsFile::default();
            write_json(&self.path, &empty).await?;
            Ok(empty)
        }
    }

    async fn write(&self, mut file: StudentsFile) -> PortResult<()> {
        file.last_updated = Some(Utc::now());
        write_json(&self.path, &file).await
    }
}

/// Next id in the `YYMMnnnn` scheme: the month bucket of `at` plus one past
/// the highest sequence already used in that bucket. Buckets restart at 0001,
/// so two different months may both contain a `...0001`.
fn next_id(students: &[Student], at: DateTime<Utc>) -> String {
    let bucket = at.format("%y%m").to_string();
    let max_sequence = students
        .iter()
        .filter(|s| s.id.starts_with(&bucket))
        .filter_map(|s| s.sequence())
        .max()
        .unwrap_or(0);
    format!("{}{:04}", bucket, max_sequence + 1)
}

fn now_stamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The id and timestamps are owned by the store; whatever the caller
/// submitted under those keys is dropped before the merge.
fn strip_managed_keys(fields: &mut Map<String, Value>) {
    fields.remove("id");
    fields.remove("createdAt");
    fields.remove("updatedAt");
}

//=========================================================================================
// StudentStore implementation
//=========================================================================================

#[async_trait]
impl StudentStore for JsonStudentStore {
    async fn list(&self) -> PortResult<Vec<Student>> {
        let _guard = self.lock.lock().await;
        Ok(self.read().await?.students)
    }

    async fn get(&self, id: &str) -> PortResult<Student> {
        let _guard = self.lock.lock().await;
        self.read()
            .await?
            .students
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| PortError::NotFound("Student not found".to_string()))
    }

    async fn create(&self, mut fields: Map<String, Value>) -> PortResult<Student> {
        let _guard = self.lock.lock().await;
        let mut file = self.read().await?;

        strip_managed_keys(&mut fields);
        let stamp = now_stamp();
        let student = Student {
            id: next_id(&file.students, Utc::now()),
            created_at: Some(stamp.clone()),
            updated_at: Some(stamp),
            fields,
        };

        // Newest first, matching how the admin table is rendered.
        file.students.insert(0, student.clone());
        self.write(file).await?;
        Ok(student)
    }

    async fn migrate(&self, records: Vec<Map<String, Value>>) -> PortResult<MigrationSummary> {
        let _guard = self.lock.lock().await;
        let mut file = self.read().await?;
        let mut migrated_count = 0;

        for mut record in records {
            let email = record.get("email").and_then(Value::as_str).map(String::from);
            // Dedup by email against everything already in the registry,
            // including records imported earlier in this same batch.
            let exists = file
                .students
                .iter()
                .any(|s| s.email() == email.as_deref());
            if exists {
                continue;
            }

            let raw_timestamp = record
                .get("timestamp")
                .and_then(Value::as_str)
                .map(String::from);
            let record_date = raw_timestamp
                .as_deref()
                .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
                .map(|d| d.with_timezone(&Utc))
                .unwrap_or_else(Utc::now);

            strip_managed_keys(&mut record);
            let student = Student {
                id: next_id(&file.students, record_date),
                created_at: Some(raw_timestamp.unwrap_or_else(now_stamp)),
                updated_at: Some(now_stamp()),
                fields: record,
            };
            file.students.push(student);
            migrated_count += 1;
        }

        let total_students = file.students.len();
        self.write(file).await?;
        Ok(MigrationSummary {
            migrated_count,
            total_students,
        })
    }

    async fn update(&self, id: &str, mut fields: Map<String, Value>) -> PortResult<Student> {
        let _guard = self.lock.lock().await;
        let mut file = self.read().await?;

        let student = file
            .students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| PortError::NotFound("Student not found".to_string()))?;

        strip_managed_keys(&mut fields);
        for (key, value) in fields {
            student.fields.insert(key, value);
        }
        student.updated_at = Some(now_stamp());

        let updated = student.clone();
        self.write(file).await?;
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> PortResult<Student> {
        let _guard = self.lock.lock().await;
        let mut file = self.read().await?;

        let idx = file
            .students
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| PortError::NotFound("Student not found".to_string()))?;
        let removed = file.students.remove(idx);
        self.write(file).await?;
        Ok(removed)
    }

    async fn dashboard_stats(&self) -> PortResult<DashboardStats> {
        let _guard = self.lock.lock().await;
        let file = self.read().await?;
        Ok(DashboardStats::from_students(&file.students))
    }
}
