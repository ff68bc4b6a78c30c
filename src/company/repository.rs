use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, instrument, warn};

use super::models::CompanyModel;
use crate::shared::AppError;

/// Trait for company repository operations
#[async_trait]
pub trait CompanyRepository {
    async fn create_company(&self, company: &CompanyModel) -> Result<(), AppError>;
    async fn get_company(&self, company_id: &str) -> Result<Option<CompanyModel>, AppError>;
    async fn update_company(&self, company: &CompanyModel) -> Result<(), AppError>;
    async fn delete_company(&self, company_id: &str) -> Result<(), AppError>;
}

fn duplicate_name(name: &str) -> AppError {
    AppError::Conflict(format!("Company name '{}' already exists", name))
}

/// In-memory implementation of CompanyRepository for development and testing
///
/// Enforces the same primary key and unique name constraints as the
/// `companies` table. Data is lost when the application restarts.
pub struct InMemoryCompanyRepository {
    companies: Mutex<HashMap<String, CompanyModel>>,
}

impl Default for InMemoryCompanyRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCompanyRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            companies: Mutex::new(HashMap::new()),
        }
    }

    /// Creates an in-memory repository with pre-populated companies
    pub fn with_companies(companies: Vec<CompanyModel>) -> Self {
        let company_map = companies
            .into_iter()
            .map(|company| (company.id.clone(), company))
            .collect();

        Self {
            companies: Mutex::new(company_map),
        }
    }

    /// Returns the current number of companies in the repository
    pub fn company_count(&self) -> usize {
        self.companies.lock().map(|c| c.len()).unwrap_or(0)
    }

    fn companies(&self) -> Result<MutexGuard<'_, HashMap<String, CompanyModel>>, AppError> {
        self.companies
            .lock()
            .map_err(|_| AppError::Internal("Company store lock poisoned".to_string()))
    }
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    #[instrument(skip(self, company))]
    async fn create_company(&self, company: &CompanyModel) -> Result<(), AppError> {
        debug!(company_id = %company.id, name = %company.name, "Creating company in memory");

        let mut companies = self.companies()?;
        if companies.contains_key(&company.id) {
            warn!(company_id = %company.id, "Company id already exists in memory");
            return Err(AppError::DatabaseError(
                "Company already exists".to_string(),
            ));
        }
        if companies.values().any(|c| c.name == company.name) {
            warn!(name = %company.name, "Company name already exists in memory");
            return Err(duplicate_name(&company.name));
        }
        companies.insert(company.id.clone(), company.clone());

        debug!(company_id = %company.id, "Company created successfully in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_company(&self, company_id: &str) -> Result<Option<CompanyModel>, AppError> {
        debug!(company_id = %company_id, "Fetching company from memory");

        let company = self.companies()?.get(company_id).cloned();

        match &company {
            Some(c) => debug!(company_id = %company_id, name = %c.name, "Company found in memory"),
            None => debug!(company_id = %company_id, "Company not found in memory"),
        }

        Ok(company)
    }

    #[instrument(skip(self, company))]
    async fn update_company(&self, company: &CompanyModel) -> Result<(), AppError> {
        debug!(company_id = %company.id, "Updating company in memory");

        let mut companies = self.companies()?;
        if !companies.contains_key(&company.id) {
            warn!(company_id = %company.id, "Company not found for update in memory");
            return Err(AppError::NotFound("Company not found".to_string()));
        }
        if companies
            .values()
            .any(|c| c.id != company.id && c.name == company.name)
        {
            warn!(name = %company.name, "Company name already taken in memory");
            return Err(duplicate_name(&company.name));
        }
        companies.insert(company.id.clone(), company.clone());

        debug!(company_id = %company.id, "Company updated successfully in memory");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_company(&self, company_id: &str) -> Result<(), AppError> {
        debug!(company_id = %company_id, "Deleting company from memory");

        if self.companies()?.remove(company_id).is_none() {
            warn!(company_id = %company_id, "Company not found for deletion in memory");
            return Err(AppError::NotFound("Company not found".to_string()));
        }

        debug!(company_id = %company_id, "Company deleted successfully from memory");
        Ok(())
    }
}

/// PostgreSQL implementation of company repository
pub struct PostgresCompanyRepository {
    pool: PgPool,
}

impl PostgresCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the companies table if it does not exist yet
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        debug!("Ensuring companies table exists");

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS companies (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                description TEXT NOT NULL DEFAULT '',
                employees BIGINT NOT NULL,
                registered BOOLEAN NOT NULL,
                "type" TEXT NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create companies table");
            AppError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }
}

/// Maps unique violations on `name` to Conflict, everything else to DatabaseError
fn map_write_error(e: sqlx::Error, company: &CompanyModel) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            warn!(name = %company.name, "Company name already exists in database");
            duplicate_name(&company.name)
        }
        _ => {
            warn!(error = %e, company_id = %company.id, "Failed to write company to database");
            AppError::DatabaseError(e.to_string())
        }
    }
}

#[async_trait]
impl CompanyRepository for PostgresCompanyRepository {
    #[instrument(skip(self, company))]
    async fn create_company(&self, company: &CompanyModel) -> Result<(), AppError> {
        debug!(company_id = %company.id, name = %company.name, "Creating company in database");

        sqlx::query(
            r#"INSERT INTO companies (id, name, description, employees, registered, "type") VALUES ($1, $2, $3, $4, $5, $6)"#,
        )
        .bind(&company.id)
        .bind(&company.name)
        .bind(&company.description)
        .bind(company.employees)
        .bind(company.registered)
        .bind(&company.company_type)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, company))?;

        debug!(company_id = %company.id, "Company created successfully in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_company(&self, company_id: &str) -> Result<Option<CompanyModel>, AppError> {
        debug!(company_id = %company_id, "Fetching company from database");

        let company = sqlx::query_as::<_, CompanyModel>(
            r#"SELECT id, name, description, employees, registered, "type" FROM companies WHERE id = $1"#,
        )
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, company_id = %company_id, "Failed to fetch company from database");
            AppError::DatabaseError(e.to_string())
        })?;

        match &company {
            Some(c) => debug!(company_id = %company_id, name = %c.name, "Company found in database"),
            None => debug!(company_id = %company_id, "Company not found in database"),
        }

        Ok(company)
    }

    #[instrument(skip(self, company))]
    async fn update_company(&self, company: &CompanyModel) -> Result<(), AppError> {
        debug!(company_id = %company.id, "Updating company in database");

        let result = sqlx::query(
            r#"UPDATE companies SET name = $2, description = $3, employees = $4, registered = $5, "type" = $6 WHERE id = $1"#,
        )
        .bind(&company.id)
        .bind(&company.name)
        .bind(&company.description)
        .bind(company.employees)
        .bind(company.registered)
        .bind(&company.company_type)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, company))?;

        if result.rows_affected() == 0 {
            warn!(company_id = %company.id, "Company not found for update");
            return Err(AppError::NotFound("Company not found".to_string()));
        }

        debug!(company_id = %company.id, "Company updated successfully in database");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_company(&self, company_id: &str) -> Result<(), AppError> {
        debug!(company_id = %company_id, "Deleting company from database");

        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(company_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, company_id = %company_id, "Failed to delete company from database");
                AppError::DatabaseError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            warn!(company_id = %company_id, "Company not found for deletion");
            return Err(AppError::NotFound("Company not found".to_string()));
        }

        debug!(company_id = %company_id, "Company deleted successfully from database");
        Ok(())
    }
}
