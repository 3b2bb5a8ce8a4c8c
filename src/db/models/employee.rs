//! Employee Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Employee ID type
pub type EmployeeId = RecordId;

/// Employee model matching the SurrealDB `employee` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<EmployeeId>,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub designation: String,
    pub gender: String,
    pub course: Vec<String>,
    /// Fully-qualified URL of the uploaded image, if any
    #[serde(default)]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Create employee payload
#[derive(Debug, Clone)]
pub struct EmployeeCreate {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub designation: String,
    pub gender: String,
    pub course: Vec<String>,
    pub image: Option<String>,
}

/// Update employee payload
///
/// Absent fields are left untouched; in particular `image` is only
/// replaced when a new reference is supplied.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmployeeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// One page of a filtered employee listing
#[derive(Debug, Clone)]
pub struct EmployeePage {
    pub employees: Vec<Employee>,
    /// Total records matching the filter (across all pages)
    pub total: usize,
    /// ceil(total / limit)
    pub total_pages: usize,
    /// 1-based page number this listing corresponds to
    pub page: usize,
}
