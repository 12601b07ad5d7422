//! SeaORM implementation of ParkingSpotRepository

use async_trait::async_trait;
use log::{debug, info};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{DomainError, DomainResult, ParkingSpot, ParkingSpotRepository, ParkingType};
use crate::infrastructure::database::entities::parking_spot;

pub struct SeaOrmParkingSpotRepository {
    db: DatabaseConnection,
}

impl SeaOrmParkingSpotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert the given spots when the lot has none yet.
    ///
    /// Returns how many spots were inserted.
    pub async fn provision(&self, spots: &[ParkingSpot]) -> DomainResult<usize> {
        let existing = parking_spot::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)?;
        if existing > 0 || spots.is_empty() {
            return Ok(0);
        }

        let models = spots.iter().map(|spot| parking_spot::ActiveModel {
            parking_number: Set(spot.id),
            available: Set(spot.available),
            parking_type: Set(spot.parking_type.as_str().to_string()),
        });
        parking_spot::Entity::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        info!("Provisioned {} parking spots", spots.len());
        Ok(spots.len())
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(super) fn model_to_domain(s: parking_spot::Model) -> DomainResult<ParkingSpot> {
    Ok(ParkingSpot {
        id: s.parking_number,
        parking_type: s.parking_type.parse()?,
        available: s.available,
    })
}

pub(super) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

// ── ParkingSpotRepository impl ──────────────────────────────────

#[async_trait]
impl ParkingSpotRepository for SeaOrmParkingSpotRepository {
    async fn find_next_available(&self, parking_type: ParkingType) -> DomainResult<Option<i32>> {
        let model = parking_spot::Entity::find()
            .filter(parking_spot::Column::Available.eq(true))
            .filter(parking_spot::Column::ParkingType.eq(parking_type.as_str()))
            .order_by_asc(parking_spot::Column::ParkingNumber)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(|s| s.parking_number))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ParkingSpot>> {
        let model = parking_spot::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn update_availability(&self, spot: &ParkingSpot) -> DomainResult<bool> {
        debug!("Updating parking spot {}: available={}", spot.id, spot.available);
        let result = parking_spot::Entity::update_many()
            .col_expr(parking_spot::Column::Available, Expr::value(spot.available))
            .filter(parking_spot::Column::ParkingNumber.eq(spot.id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected == 1)
    }

    async fn count_available(&self, parking_type: ParkingType) -> DomainResult<u64> {
        parking_spot::Entity::find()
            .filter(parking_spot::Column::Available.eq(true))
            .filter(parking_spot::Column::ParkingType.eq(parking_type.as_str()))
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}
