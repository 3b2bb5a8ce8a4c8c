//! Employee API Handlers
//!
//! Create and update accept `multipart/form-data` so an image can ride
//! along with the text fields; the image file goes through the
//! [`ImageStore`](crate::services::ImageStore) before the record is
//! persisted.

use axum::{
    Json,
    extract::{Extension, Multipart, Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Employee, EmployeeCreate, EmployeeUpdate};
use crate::db::repository::EmployeeRepository;
use crate::services::UploadedFile;
use crate::utils::validation::{self, EmployeeForm};
use crate::utils::{AppError, AppResult};

/// Multipart field name for the image file
const IMAGE_FIELD: &str = "image";

/// List query parameters
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub search: Option<String>,
}

/// Paginated listing response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListResponse {
    pub employees: Vec<Employee>,
    pub total_pages: usize,
    pub current_page: usize,
}

/// Mutation response carrying the affected record
#[derive(Debug, Serialize)]
pub struct EmployeeEnvelope {
    pub message: String,
    pub employee: Employee,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Read employee fields and the optional image file out of a multipart body
///
/// Unknown fields are ignored; `course` may repeat (both `course` and
/// `course[]` spellings are accepted).
async fn read_employee_form(
    multipart: &mut Multipart,
) -> AppResult<(EmployeeForm, Option<UploadedFile>)> {
    let mut form = EmployeeForm::default();
    let mut image = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(|s| s.to_string()) else {
            continue;
        };

        match name.as_str() {
            IMAGE_FIELD => {
                let filename = field.file_name().map(|s| s.to_string()).unwrap_or_default();
                let content_type = field.content_type().map(|s| s.to_string());
                let data = field.bytes().await?.to_vec();

                // 浏览器在未选择文件时会提交一个空文件域
                if filename.is_empty() && data.is_empty() {
                    continue;
                }
                image = Some(UploadedFile {
                    filename,
                    content_type,
                    data,
                });
            }
            "name" => form.name = Some(field.text().await?),
            "email" => form.email = Some(field.text().await?),
            "mobile" => form.mobile = Some(field.text().await?),
            "designation" => form.designation = Some(field.text().await?),
            "gender" => form.gender = Some(field.text().await?),
            "course" | "course[]" => form.course.push(field.text().await?),
            _ => {}
        }
    }

    Ok((form, image))
}

fn clean_courses(course: Vec<String>) -> Vec<String> {
    course
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

/// POST /api/employees - 创建员工
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<EmployeeEnvelope>)> {
    let (form, image) = read_employee_form(&mut multipart).await?;

    let errors = validation::validate_employee_create(&form);
    if !errors.is_empty() {
        return Err(AppError::FieldValidation(errors));
    }

    let image_url = match &image {
        Some(file) => Some(state.image_store.save(file)?),
        None => None,
    };

    // Validation above guarantees the required fields are present
    let data = EmployeeCreate {
        name: form.name.unwrap_or_default(),
        email: form.email.unwrap_or_default(),
        mobile: form.mobile.unwrap_or_default(),
        designation: form.designation.unwrap_or_default(),
        gender: form.gender.unwrap_or_default(),
        course: clean_courses(form.course),
        image: image_url,
    };

    let repo = EmployeeRepository::new(state.get_db());
    let employee = repo.create(data).await?;

    tracing::info!(
        employee_email = %employee.email,
        operator = %current_user.username,
        "Employee created"
    );

    Ok((
        StatusCode::CREATED,
        Json(EmployeeEnvelope {
            message: "Employee created successfully".to_string(),
            employee,
        }),
    ))
}

/// GET /api/employees - 分页列表，支持按姓名搜索
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<EmployeeListResponse>> {
    let repo = EmployeeRepository::new(state.get_db());
    let page = repo
        .list(
            query.page.unwrap_or(1),
            query.limit.unwrap_or(10),
            query.search.as_deref().unwrap_or(""),
        )
        .await?;

    Ok(Json(EmployeeListResponse {
        employees: page.employees,
        total_pages: page.total_pages,
        current_page: page.page,
    }))
}

/// GET /api/employees/{id} - 获取单个员工
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Employee>> {
    let repo = EmployeeRepository::new(state.get_db());
    let employee = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {} not found", id)))?;
    Ok(Json(employee))
}

/// PUT /api/employees/{id} - 更新员工
///
/// 未提交的字段保持不变；只有携带新图片时才替换图片引用。
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> AppResult<Json<EmployeeEnvelope>> {
    let (form, image) = read_employee_form(&mut multipart).await?;

    let errors = validation::validate_employee_update(&form);
    if !errors.is_empty() {
        return Err(AppError::FieldValidation(errors));
    }

    let image_url = match &image {
        Some(file) => Some(state.image_store.save(file)?),
        None => None,
    };

    let course = if form.course.is_empty() {
        None
    } else {
        Some(clean_courses(form.course))
    };

    let data = EmployeeUpdate {
        name: form.name,
        email: form.email,
        mobile: form.mobile,
        designation: form.designation,
        gender: form.gender,
        course,
        image: image_url,
    };

    let repo = EmployeeRepository::new(state.get_db());
    let employee = repo.update(&id, data).await?;

    tracing::info!(
        employee_id = %id,
        operator = %current_user.username,
        "Employee updated"
    );

    Ok(Json(EmployeeEnvelope {
        message: "Employee updated successfully".to_string(),
        employee,
    }))
}

/// DELETE /api/employees/{id} - 删除员工
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let repo = EmployeeRepository::new(state.get_db());
    let employee = repo.delete(&id).await?;

    tracing::info!(
        employee_id = %id,
        employee_email = %employee.email,
        operator = %current_user.username,
        "Employee deleted"
    );

    Ok(Json(MessageResponse {
        message: "Employee deleted successfully".to_string(),
    }))
}
