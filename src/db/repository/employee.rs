//! Employee Repository

use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Employee, EmployeeCreate, EmployeePage, EmployeeUpdate};

const TABLE: &str = "employee";

#[derive(serde::Deserialize)]
struct CountRow {
    count: usize,
}

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find employee by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        let rid = parse_record_id(TABLE, id)?;
        let employee: Option<Employee> = self.base.db().select(rid).await?;
        Ok(employee)
    }

    /// Find employee by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// Create a new employee
    ///
    /// The email pre-check produces a friendly error; the UNIQUE index on
    /// `employee.email` remains the authoritative guard under races.
    pub async fn create(&self, data: EmployeeCreate) -> RepoResult<Employee> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already exists",
                data.email
            )));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE employee SET
                    name = $name,
                    email = $email,
                    mobile = $mobile,
                    designation = $designation,
                    gender = $gender,
                    course = $course,
                    image = $image,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("email", data.email))
            .bind(("mobile", data.mobile))
            .bind(("designation", data.designation))
            .bind(("gender", data.gender))
            .bind(("course", data.course))
            .bind(("image", data.image))
            .bind(("created_at", Utc::now()))
            .await?;

        let created: Option<Employee> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))
    }

    /// List employees with pagination and optional name search
    ///
    /// `page` is 1-based; a non-empty `search` filters by case-insensitive
    /// substring match on the name.
    pub async fn list(&self, page: usize, limit: usize, search: &str) -> RepoResult<EmployeePage> {
        let page = page.max(1);
        let limit = limit.max(1);
        let start = (page - 1) * limit;
        let needle = search.trim().to_lowercase();

        let mut result = self
            .base
            .db()
            .query(
                r#"SELECT * FROM employee
                    WHERE $needle = '' OR string::contains(string::lowercase(name), $needle)
                    ORDER BY created_at ASC
                    LIMIT $limit START $start"#,
            )
            .query(
                r#"SELECT count() AS count FROM employee
                    WHERE $needle = '' OR string::contains(string::lowercase(name), $needle)
                    GROUP ALL"#,
            )
            .bind(("needle", needle))
            .bind(("limit", limit as i64))
            .bind(("start", start as i64))
            .await?;

        let employees: Vec<Employee> = result.take(0)?;
        let rows: Vec<CountRow> = result.take(1)?;
        let total = rows.first().map(|r| r.count).unwrap_or(0);

        Ok(EmployeePage {
            employees,
            total,
            total_pages: total.div_ceil(limit),
            page,
        })
    }

    /// Update an employee
    ///
    /// Absent fields are retained; the image reference in particular is
    /// only replaced when the payload carries a new one.
    pub async fn update(&self, id: &str, data: EmployeeUpdate) -> RepoResult<Employee> {
        let rid = parse_record_id(TABLE, id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))?;

        // Check duplicate email if changing
        if let Some(ref new_email) = data.email
            && new_email != &existing.email
            && self.find_by_email(new_email).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already exists",
                new_email
            )));
        }

        let updated: Option<Employee> = self.base.db().update(rid).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))
    }

    /// Delete an employee, returning the removed record
    pub async fn delete(&self, id: &str) -> RepoResult<Employee> {
        let rid = parse_record_id(TABLE, id)?;
        let deleted: Option<Employee> = self.base.db().delete(rid).await?;
        deleted.ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn repo() -> EmployeeRepository {
        let service = DbService::in_memory().await.expect("in-memory db");
        EmployeeRepository::new(service.db)
    }

    fn sample(name: &str, email: &str) -> EmployeeCreate {
        EmployeeCreate {
            name: name.to_string(),
            email: email.to_string(),
            mobile: "5551234567".to_string(),
            designation: "Engineer".to_string(),
            gender: "F".to_string(),
            course: vec!["MCA".to_string()],
            image: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = repo().await;
        let created = repo.create(sample("Alice", "a@x.com")).await.expect("create");
        let id = created.id.as_ref().expect("id assigned").to_string();

        let found = repo
            .find_by_id(&id)
            .await
            .expect("lookup")
            .expect("employee exists");
        assert_eq!(found.email, "a@x.com");
        assert_eq!(found.course, vec!["MCA".to_string()]);
    }

    #[tokio::test]
    async fn test_duplicate_email_creates_nothing() {
        let repo = repo().await;
        repo.create(sample("Alice", "a@x.com")).await.expect("create");

        let err = repo.create(sample("Bob", "a@x.com")).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));

        let page = repo.list(1, 10, "").await.expect("list");
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_pagination() {
        let repo = repo().await;
        for i in 0..25 {
            repo.create(sample(&format!("Employee {i}"), &format!("e{i}@x.com")))
                .await
                .expect("create");
        }

        let page = repo.list(3, 10, "").await.expect("list");
        assert_eq!(page.employees.len(), 5);
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 3);

        let first = repo.list(1, 10, "").await.expect("list");
        assert_eq!(first.employees.len(), 10);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let repo = repo().await;
        repo.create(sample("Alice Johnson", "a@x.com")).await.expect("create");
        repo.create(sample("Bob Smith", "b@x.com")).await.expect("create");
        repo.create(sample("alison", "c@x.com")).await.expect("create");

        let page = repo.list(1, 10, "ALI").await.expect("list");
        assert_eq!(page.total, 2);

        let page = repo.list(1, 10, "smith").await.expect("list");
        assert_eq!(page.total, 1);
        assert_eq!(page.employees[0].email, "b@x.com");
    }

    #[tokio::test]
    async fn test_update_retains_image_unless_replaced() {
        let repo = repo().await;
        let mut data = sample("Alice", "a@x.com");
        data.image = Some("http://localhost:5000/uploads/image-1.png".to_string());
        let created = repo.create(data).await.expect("create");
        let id = created.id.as_ref().expect("id").to_string();

        // No new image: reference is retained
        let updated = repo
            .update(
                &id,
                EmployeeUpdate {
                    designation: Some("Manager".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect("update");
        assert_eq!(updated.designation, "Manager");
        assert_eq!(
            updated.image.as_deref(),
            Some("http://localhost:5000/uploads/image-1.png")
        );

        // New image: reference is replaced
        let updated = repo
            .update(
                &id,
                EmployeeUpdate {
                    image: Some("http://localhost:5000/uploads/image-2.png".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect("update");
        assert_eq!(
            updated.image.as_deref(),
            Some("http://localhost:5000/uploads/image-2.png")
        );
    }

    #[tokio::test]
    async fn test_update_rejects_email_of_another_employee() {
        let repo = repo().await;
        repo.create(sample("Alice", "a@x.com")).await.expect("create");
        let bob = repo.create(sample("Bob", "b@x.com")).await.expect("create");
        let bob_id = bob.id.as_ref().expect("id").to_string();

        let err = repo
            .update(
                &bob_id,
                EmployeeUpdate {
                    email: Some("a@x.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));

        // Re-submitting the employee's own email is not a conflict
        let updated = repo
            .update(
                &bob_id,
                EmployeeUpdate {
                    email: Some("b@x.com".to_string()),
                    name: Some("Robert".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect("update");
        assert_eq!(updated.name, "Robert");
    }

    #[tokio::test]
    async fn test_delete_then_lookup_is_not_found() {
        let repo = repo().await;
        let created = repo.create(sample("Alice", "a@x.com")).await.expect("create");
        let id = created.id.as_ref().expect("id").to_string();

        repo.delete(&id).await.expect("delete");
        assert!(repo.find_by_id(&id).await.expect("lookup").is_none());

        let err = repo.delete(&id).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let repo = repo().await;
        let err = repo
            .update("employee:missing", EmployeeUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
