use std::sync::Arc;
use tracing::{info, instrument, warn};

use models::company;
use super::domain::{CompanyPatch, NewCompany};
use super::repository::CompanyRepository;
use crate::errors::ServiceError;

/// Company business rules: required name, unique name, delete only what exists.
pub struct CompanyService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: CompanyRepository + ?Sized> CompanyService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<company::Model>, ServiceError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: i64) -> Result<company::Model, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("company", id))
    }

    /// Create a company; the store assigns the id.
    ///
    /// # Examples
    /// ```
    /// use service::company::{domain::NewCompany, repository::mock::MockCompanyRepository, service::CompanyService};
    /// use std::sync::Arc;
    /// let svc = CompanyService::new(Arc::new(MockCompanyRepository::default()));
    /// let input = NewCompany { name: Some("Acme".into()), sector: Some("Tech".into()), ..Default::default() };
    /// let created = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(created.id, 1);
    /// assert_eq!(created.name, "Acme");
    /// ```
    #[instrument(skip(self, input), fields(name = ?input.name))]
    pub async fn create(&self, input: NewCompany) -> Result<company::Model, ServiceError> {
        let name = company::validate_name(input.name.as_deref())?;
        if let Some(id) = input.id {
            info!(client_id = id, "ignoring client-supplied company id");
        }
        // Fast path; the unique constraint still decides concurrent inserts.
        if self.repo.exists_by_name(name).await? {
            warn!(%name, "company name already taken");
            return Err(ServiceError::duplicate_name(name));
        }
        let created = self.repo.create(name, input.sector.clone(), input.country.clone()).await?;
        info!(id = created.id, "company created");
        Ok(created)
    }

    #[instrument(skip(self, patch), fields(id = id))]
    pub async fn update(&self, id: i64, patch: CompanyPatch) -> Result<company::Model, ServiceError> {
        let updated = self.repo.update(id, &patch).await?;
        info!(id = updated.id, "company updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(id = id))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if !self.repo.exists_by_id(id).await? {
            return Err(ServiceError::not_found("company", id));
        }
        if !self.repo.delete(id).await? {
            // Removed between the existence check and the delete.
            return Err(ServiceError::not_found("company", id));
        }
        info!(id, "company deleted");
        Ok(())
    }
}
