use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryOrder, TransactionTrait};
use models::company;
use crate::company::domain::CompanyPatch;
use crate::errors::ServiceError;

/// List companies in insertion (id) order.
pub async fn list_companies<C: ConnectionTrait>(db: &C) -> Result<Vec<company::Model>, ServiceError> {
    Ok(company::Entity::find().order_by_asc(company::Column::Id).all(db).await?)
}

/// Get company by id.
pub async fn get_company<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<company::Model>, ServiceError> {
    Ok(company::Entity::find_by_id(id).one(db).await?)
}

/// Exact, case-sensitive name lookup.
pub async fn name_taken<C: ConnectionTrait>(db: &C, name: &str) -> Result<bool, ServiceError> {
    Ok(company::exists_by_name(db, name).await?)
}

/// Insert a company; a unique violation surfaces as `ServiceError::Conflict`.
pub async fn create_company<C: ConnectionTrait>(
    db: &C,
    name: &str,
    sector: Option<String>,
    country: Option<String>,
) -> Result<company::Model, ServiceError> {
    Ok(company::create(db, name, sector, country).await?)
}

/// Apply a patch inside one transaction: read, check the new name, write.
pub async fn update_company(db: &DatabaseConnection, id: i64, patch: &CompanyPatch) -> Result<company::Model, ServiceError> {
    let txn = db.begin().await?;
    let current = company::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("company", id))?;

    let changes = patch.resolve(&current);
    if changes.is_empty() {
        txn.commit().await?;
        return Ok(current);
    }
    if let Some(name) = changes.rename.as_deref() {
        if company::exists_by_name(&txn, name).await? {
            return Err(ServiceError::duplicate_name(name));
        }
    }

    let updated = save_company(&txn, changes.apply(current)).await?;
    txn.commit().await?;
    Ok(updated)
}

/// Write every column of a merged row. The unique constraint on `name` still
/// applies here, so a rename racing another writer comes back as `Conflict`.
pub(crate) async fn save_company<C: ConnectionTrait>(db: &C, merged: company::Model) -> Result<company::Model, ServiceError> {
    let am = company::ActiveModel::from(merged).reset_all();
    Ok(am.update(db).await?)
}

/// Hard delete; `Ok(false)` when no row had that id.
pub async fn delete_company<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool, ServiceError> {
    let res = company::Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use uuid::Uuid;

    #[tokio::test]
    async fn company_store_crud() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };

        let name = format!("store_company_{}", Uuid::new_v4());
        let created = create_company(&db, &name, Some("Tech".into()), None).await?;
        assert_eq!(get_company(&db, created.id).await?, Some(created.clone()));
        assert!(name_taken(&db, &name).await?);
        assert!(list_companies(&db).await?.iter().any(|c| c.id == created.id));

        let patch = CompanyPatch { country: Some(" FR ".into()), ..Default::default() };
        let updated = update_company(&db, created.id, &patch).await?;
        assert_eq!(updated.name, name);
        assert_eq!(updated.sector.as_deref(), Some("Tech"));
        assert_eq!(updated.country.as_deref(), Some("FR"));

        assert!(delete_company(&db, created.id).await?);
        assert!(!delete_company(&db, created.id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn rename_onto_taken_name_conflicts_and_rolls_back() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };

        let a = create_company(&db, &format!("store_a_{}", Uuid::new_v4()), None, None).await?;
        let b = create_company(&db, &format!("store_b_{}", Uuid::new_v4()), None, None).await?;

        let patch = CompanyPatch { name: Some(b.name.clone()), sector: Some("Retail".into()), ..Default::default() };
        let err = update_company(&db, a.id, &patch).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(get_company(&db, a.id).await?, Some(a.clone()));

        delete_company(&db, a.id).await?;
        delete_company(&db, b.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn write_of_taken_name_is_conflict_from_the_constraint() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };

        let a = create_company(&db, &format!("store_race_a_{}", Uuid::new_v4()), Some("Tech".into()), None).await?;
        let b = create_company(&db, &format!("store_race_b_{}", Uuid::new_v4()), None, None).await?;

        // name taken after any pre-check would have passed
        let merged = company::Model { name: b.name.clone(), ..a.clone() };
        let err = save_company(&db, merged).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(get_company(&db, a.id).await?, Some(a.clone()));

        let err = create_company(&db, &b.name, None, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        delete_company(&db, a.id).await?;
        delete_company(&db, b.id).await?;
        Ok(())
    }

    #[tokio::test]
    async fn update_of_unknown_id_is_not_found() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };

        let err = update_company(&db, i64::MAX, &CompanyPatch::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }
}
