use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::company;
use super::domain::CompanyPatch;
use crate::errors::ServiceError;

/// Data access for the `company` table.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<company::Model>, ServiceError>;
    async fn get(&self, id: i64) -> Result<Option<company::Model>, ServiceError>;
    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError>;
    async fn exists_by_name(&self, name: &str) -> Result<bool, ServiceError>;
    async fn create(&self, name: &str, sector: Option<String>, country: Option<String>) -> Result<company::Model, ServiceError>;
    /// Read, name-check and write as one unit. Unknown id is `NotFound`,
    /// a rename onto a taken name is `Conflict`.
    async fn update(&self, id: i64, patch: &CompanyPatch) -> Result<company::Model, ServiceError>;
    /// `Ok(false)` when nothing was deleted; `Referenced` when other rows point here.
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmCompanyRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl CompanyRepository for SeaOrmCompanyRepository {
    async fn list(&self) -> Result<Vec<company::Model>, ServiceError> {
        crate::db::company_store::list_companies(&self.db).await
    }

    async fn get(&self, id: i64) -> Result<Option<company::Model>, ServiceError> {
        crate::db::company_store::get_company(&self.db, id).await
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(crate::db::company_store::get_company(&self.db, id).await?.is_some())
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, ServiceError> {
        crate::db::company_store::name_taken(&self.db, name).await
    }

    async fn create(&self, name: &str, sector: Option<String>, country: Option<String>) -> Result<company::Model, ServiceError> {
        crate::db::company_store::create_company(&self.db, name, sector, country).await
    }

    async fn update(&self, id: i64, patch: &CompanyPatch) -> Result<company::Model, ServiceError> {
        crate::db::company_store::update_company(&self.db, id, patch).await
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        crate::db::company_store::delete_company(&self.db, id).await
    }
}

/// In-memory repository for tests and doc examples.
///
/// Enforces name uniqueness and lets tests mark ids as referenced, standing
/// in for the database constraints.
pub mod mock {
    use super::*;
    use std::collections::{BTreeMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct State {
        rows: BTreeMap<i64, company::Model>,
        referenced: HashSet<i64>,
        last_id: i64,
    }

    #[derive(Default)]
    pub struct MockCompanyRepository {
        state: Mutex<State>,
        calls: AtomicUsize,
    }

    impl MockCompanyRepository {
        /// Number of repository calls served so far.
        pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }

        /// Make deletes of `id` fail as a referential violation.
        pub async fn mark_referenced(&self, id: i64) {
            self.state.lock().await.referenced.insert(id);
        }

        fn touch(&self) { self.calls.fetch_add(1, Ordering::SeqCst); }
    }

    #[async_trait]
    impl CompanyRepository for MockCompanyRepository {
        async fn list(&self) -> Result<Vec<company::Model>, ServiceError> {
            self.touch();
            Ok(self.state.lock().await.rows.values().cloned().collect())
        }

        async fn get(&self, id: i64) -> Result<Option<company::Model>, ServiceError> {
            self.touch();
            Ok(self.state.lock().await.rows.get(&id).cloned())
        }

        async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
            self.touch();
            Ok(self.state.lock().await.rows.contains_key(&id))
        }

        async fn exists_by_name(&self, name: &str) -> Result<bool, ServiceError> {
            self.touch();
            Ok(self.state.lock().await.rows.values().any(|c| c.name == name))
        }

        async fn create(&self, name: &str, sector: Option<String>, country: Option<String>) -> Result<company::Model, ServiceError> {
            self.touch();
            let mut state = self.state.lock().await;
            if state.rows.values().any(|c| c.name == name) {
                return Err(ServiceError::duplicate_name(name));
            }
            state.last_id += 1;
            let row = company::Model { id: state.last_id, name: name.to_string(), sector, country };
            state.rows.insert(row.id, row.clone());
            Ok(row)
        }

        async fn update(&self, id: i64, patch: &CompanyPatch) -> Result<company::Model, ServiceError> {
            self.touch();
            let mut state = self.state.lock().await;
            let current = state.rows.get(&id).cloned().ok_or_else(|| ServiceError::not_found("company", id))?;
            let changes = patch.resolve(&current);
            if let Some(name) = changes.rename.as_deref() {
                if state.rows.values().any(|c| c.name == name) {
                    return Err(ServiceError::duplicate_name(name));
                }
            }
            let updated = changes.apply(current);
            state.rows.insert(id, updated.clone());
            Ok(updated)
        }

        async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
            self.touch();
            let mut state = self.state.lock().await;
            if state.referenced.contains(&id) {
                return Err(ServiceError::Referenced(format!("company {} is referenced by stock_market", id)));
            }
            Ok(state.rows.remove(&id).is_some())
        }
    }
}
