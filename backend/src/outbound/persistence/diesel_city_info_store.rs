//! PostgreSQL-backed `CityInfoStore` adapter.
//!
//! Reads go through short-lived pooled connections. Writes staged in a
//! `ChangeSet` are applied inside one transaction so a failed change leaves
//! the database untouched.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{CityInfoStore, CityInfoStoreError};
use crate::domain::{
    ChangeSet, City, CityId, NewCity, PendingChange, PointOfInterest, PointOfInterestId,
    SaveReport,
};

use super::models::{
    CityRow, NewCityRow, NewPointOfInterestRow, PointOfInterestRow, PointOfInterestUpdate,
};
use super::pool::{DbPool, PoolError};
use super::schema::{cities, points_of_interest};

/// Diesel-backed implementation of [`CityInfoStore`].
#[derive(Clone)]
pub struct DieselCityInfoStore {
    pool: DbPool,
}

impl DieselCityInfoStore {
    /// Create a store over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CityInfoStoreError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    CityInfoStoreError::connection(message)
}

fn map_diesel_error(error: diesel::result::Error) -> CityInfoStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CityInfoStoreError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            CityInfoStoreError::query("referenced city does not exist")
        }
        DieselError::NotFound => CityInfoStoreError::query("record not found"),
        _ => CityInfoStoreError::query("database error"),
    }
}

fn affected_rows(count: usize) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

fn point_from_row(row: PointOfInterestRow) -> PointOfInterest {
    PointOfInterest {
        id: row.id,
        city_id: row.city_id,
        name: row.name,
        description: row.description,
    }
}

fn city_from_row(row: CityRow, points: Vec<PointOfInterestRow>) -> City {
    City {
        id: row.id,
        name: row.name,
        description: row.description,
        points_of_interest: points.into_iter().map(point_from_row).collect(),
    }
}

#[async_trait]
impl CityInfoStore for DieselCityInfoStore {
    async fn list_cities(&self) -> Result<Vec<City>, CityInfoStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CityRow> = cities::table
            .order((cities::name.asc(), cities::id.asc()))
            .select(CityRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows
            .into_iter()
            .map(|row| city_from_row(row, Vec::new()))
            .collect())
    }

    async fn find_city(
        &self,
        id: CityId,
        include_points_of_interest: bool,
    ) -> Result<Option<City>, CityInfoStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let Some(row) = cities::table
            .find(id)
            .select(CityRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
        else {
            return Ok(None);
        };

        let points = if include_points_of_interest {
            points_of_interest::table
                .filter(points_of_interest::city_id.eq(id))
                .order(points_of_interest::id.asc())
                .select(PointOfInterestRow::as_select())
                .load(&mut conn)
                .await
                .map_err(map_diesel_error)?
        } else {
            Vec::new()
        };
        Ok(Some(city_from_row(row, points)))
    }

    async fn list_points_of_interest(
        &self,
        city_id: CityId,
    ) -> Result<Vec<PointOfInterest>, CityInfoStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PointOfInterestRow> = points_of_interest::table
            .filter(points_of_interest::city_id.eq(city_id))
            .order(points_of_interest::id.asc())
            .select(PointOfInterestRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(point_from_row).collect())
    }

    async fn find_point_of_interest(
        &self,
        city_id: CityId,
        id: PointOfInterestId,
    ) -> Result<Option<PointOfInterest>, CityInfoStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<PointOfInterestRow> = points_of_interest::table
            .filter(points_of_interest::city_id.eq(city_id))
            .filter(points_of_interest::id.eq(id))
            .select(PointOfInterestRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(point_from_row))
    }

    async fn city_exists(&self, id: CityId) -> Result<bool, CityInfoStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(cities::table.find(id)))
            .get_result::<bool>(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn count_cities(&self) -> Result<u64, CityInfoStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = cities::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        u64::try_from(count).map_err(|err| CityInfoStoreError::query(err.to_string()))
    }

    async fn insert_city(&self, city: &NewCity) -> Result<City, CityInfoStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (row, points) = conn
            .transaction(|conn| {
                async move {
                    let row: CityRow = diesel::insert_into(cities::table)
                        .values(&NewCityRow {
                            name: city.name.as_str(),
                            description: city.description.as_deref(),
                        })
                        .returning(CityRow::as_returning())
                        .get_result(conn)
                        .await?;

                    let new_points: Vec<NewPointOfInterestRow<'_>> = city
                        .points_of_interest
                        .iter()
                        .map(|point| NewPointOfInterestRow {
                            city_id: row.id,
                            name: point.name.as_str(),
                            description: point.description.as_deref(),
                        })
                        .collect();
                    let points: Vec<PointOfInterestRow> = if new_points.is_empty() {
                        Vec::new()
                    } else {
                        diesel::insert_into(points_of_interest::table)
                            .values(&new_points)
                            .returning(PointOfInterestRow::as_returning())
                            .get_results(conn)
                            .await?
                    };
                    Ok::<_, diesel::result::Error>((row, points))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(city_from_row(row, points))
    }

    async fn save(&self, changes: ChangeSet) -> Result<SaveReport, CityInfoStoreError> {
        if changes.is_empty() {
            return Ok(SaveReport::default());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                let mut report = SaveReport::default();
                for change in changes {
                    match change {
                        PendingChange::Add { city_id, point } => {
                            let row: PointOfInterestRow =
                                diesel::insert_into(points_of_interest::table)
                                    .values(&NewPointOfInterestRow {
                                        city_id,
                                        name: point.name.as_str(),
                                        description: point.description.as_deref(),
                                    })
                                    .returning(PointOfInterestRow::as_returning())
                                    .get_result(conn)
                                    .await?;
                            report.affected += 1;
                            report.inserted.push(point_from_row(row));
                        }
                        PendingChange::Update(point) => {
                            let count = diesel::update(
                                points_of_interest::table
                                    .filter(points_of_interest::id.eq(point.id))
                                    .filter(points_of_interest::city_id.eq(point.city_id)),
                            )
                            .set(&PointOfInterestUpdate {
                                name: point.name.as_str(),
                                description: point.description.as_deref(),
                            })
                            .execute(conn)
                            .await?;
                            report.affected += affected_rows(count);
                        }
                        PendingChange::Remove { city_id, id } => {
                            let count = diesel::delete(
                                points_of_interest::table
                                    .filter(points_of_interest::id.eq(id))
                                    .filter(points_of_interest::city_id.eq(city_id)),
                            )
                            .execute(conn)
                            .await?;
                            report.affected += affected_rows(count);
                        }
                    }
                }
                Ok::<_, diesel::result::Error>(report)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
