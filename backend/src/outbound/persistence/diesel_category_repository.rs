//! PostgreSQL-backed `CategoryRepository` implementation using Diesel ORM.
//!
//! Each mutation is a single statement, so it is committed before the call
//! returns.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CategoryPersistenceError, CategoryRepository};
use crate::domain::{Category, CategoryId, CategoryName, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CategoryRow, CategoryUpdate};
use super::pool::DbPool;
use super::schema::categories;

/// Diesel-backed implementation of the [`CategoryRepository`] port.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    /// Wrap a shared connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> CategoryPersistenceError {
    map_diesel_error(
        error,
        CategoryPersistenceError::query,
        CategoryPersistenceError::connection,
    )
}

fn row_to_category(row: CategoryRow) -> Result<Category, CategoryPersistenceError> {
    let name = CategoryName::new(&row.name).map_err(|err| {
        CategoryPersistenceError::query(format!("stored category {} is invalid: {err}", row.id))
    })?;
    Ok(Category::from_parts(
        CategoryId::from_uuid(row.id),
        name,
        UserId::from_uuid(row.owner_id),
        row.created_at,
    ))
}

fn category_to_row(category: &Category) -> CategoryRow {
    CategoryRow {
        id: *category.id().as_uuid(),
        owner_id: *category.owner().as_uuid(),
        name: category.name().as_str().to_owned(),
        created_at: category.created_at(),
    }
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn list_by_owner(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Category>, CategoryPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CategoryPersistenceError::connection))?;
        let rows: Vec<CategoryRow> = categories::table
            .filter(categories::owner_id.eq(owner.as_uuid()))
            .order((categories::created_at.asc(), categories::id.asc()))
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_error)?;
        rows.into_iter().map(row_to_category).collect()
    }

    async fn find_by_id(
        &self,
        owner: &UserId,
        id: &CategoryId,
    ) -> Result<Option<Category>, CategoryPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CategoryPersistenceError::connection))?;
        categories::table
            .filter(categories::id.eq(id.as_uuid()))
            .filter(categories::owner_id.eq(owner.as_uuid()))
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?
            .map(row_to_category)
            .transpose()
    }

    async fn insert(&self, category: &Category) -> Result<(), CategoryPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CategoryPersistenceError::connection))?;
        diesel::insert_into(categories::table)
            .values(&category_to_row(category))
            .execute(&mut conn)
            .await
            .map_err(map_error)?;
        Ok(())
    }

    async fn update(&self, category: &Category) -> Result<(), CategoryPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CategoryPersistenceError::connection))?;
        let changes = CategoryUpdate {
            name: category.name().as_str(),
        };
        let updated = diesel::update(
            categories::table
                .filter(categories::id.eq(category.id().as_uuid()))
                .filter(categories::owner_id.eq(category.owner().as_uuid())),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map_err(map_error)?;
        if updated == 0 {
            return Err(CategoryPersistenceError::query("category row vanished before update"));
        }
        Ok(())
    }

    async fn remove(&self, category: &Category) -> Result<(), CategoryPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CategoryPersistenceError::connection))?;
        diesel::delete(
            categories::table
                .filter(categories::id.eq(category.id().as_uuid()))
                .filter(categories::owner_id.eq(category.owner().as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_round_trip_through_domain() {
        let category = Category::new(
            UserId::random(),
            CategoryName::new("Family").expect("name"),
        );
        let restored = row_to_category(category_to_row(&category)).expect("valid row");
        assert_eq!(restored, category);
    }

    #[test]
    fn blank_stored_names_are_query_errors() {
        let mut row = category_to_row(&Category::new(
            UserId::random(),
            CategoryName::new("Family").expect("name"),
        ));
        row.name = String::new();
        assert!(matches!(
            row_to_category(row),
            Err(CategoryPersistenceError::Query { .. })
        ));
    }
}
