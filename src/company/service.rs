use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{models::CompanyModel, repository::CompanyRepository, types::CompanyInput};
use crate::shared::AppError;

fn not_found() -> AppError {
    AppError::NotFound("Company not found".to_string())
}

/// Service for handling company business logic
pub struct CompanyService {
    repository: Arc<dyn CompanyRepository + Send + Sync>,
}

impl CompanyService {
    pub fn new(repository: Arc<dyn CompanyRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Creates a new company with a generated ID
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CompanyInput) -> Result<CompanyModel, AppError> {
        input.validate_for_create()?;

        let company = CompanyModel::new(input);
        debug!(company_id = %company.id, "Generated company ID");

        self.repository.create_company(&company).await?;

        info!(company_id = %company.id, name = %company.name, "Company created");
        Ok(company)
    }

    /// Replaces every mutable field of an existing company with `input`,
    /// zero values included
    #[instrument(skip(self, input))]
    pub async fn patch_by_id(
        &self,
        company_id: &str,
        input: CompanyInput,
    ) -> Result<CompanyModel, AppError> {
        let mut company = self.get_by_id(company_id).await?;
        company.apply(input);

        self.repository.update_company(&company).await?;

        info!(company_id = %company.id, "Company updated");
        Ok(company)
    }

    /// Deletes a company. Any store failure is reported as NotFound.
    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, company_id: &str) -> Result<(), AppError> {
        self.repository
            .delete_company(company_id)
            .await
            .map_err(|e| {
                warn!(company_id = %company_id, error = %e, "Company delete failed");
                not_found()
            })?;

        info!(company_id = %company_id, "Company deleted");
        Ok(())
    }

    /// Fetches a company. Any store failure is reported as NotFound.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, company_id: &str) -> Result<CompanyModel, AppError> {
        match self.repository.get_company(company_id).await {
            Ok(Some(company)) => Ok(company),
            Ok(None) => {
                debug!(company_id = %company_id, "Company does not exist");
                Err(not_found())
            }
            Err(e) => {
                warn!(company_id = %company_id, error = %e, "Company lookup failed");
                Err(not_found())
            }
        }
    }
}
