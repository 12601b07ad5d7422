//! SeaORM implementation of TicketRepository

use async_trait::async_trait;
use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use super::parking_spot_repository::db_err;
use crate::domain::{DomainError, DomainResult, ParkingSpot, Ticket, TicketRepository};
use crate::infrastructure::database::entities::{parking_spot, ticket};

pub struct SeaOrmTicketRepository {
    db: DatabaseConnection,
}

impl SeaOrmTicketRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn price_to_cents(price: Decimal) -> DomainResult<i64> {
    (price * Decimal::ONE_HUNDRED)
        .round()
        .to_i64()
        .ok_or_else(|| DomainError::Validation(format!("Price out of range: {}", price)))
}

fn cents_to_price(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// A ticket carries its spot as it was during the visit: occupied.
fn model_to_domain(
    t: ticket::Model,
    spot: Option<parking_spot::Model>,
) -> DomainResult<Ticket> {
    let spot = spot.ok_or_else(|| {
        DomainError::Storage(format!(
            "Ticket {} references unknown parking spot {}",
            t.id, t.parking_number
        ))
    })?;
    let parking_spot = ParkingSpot::new(t.parking_number, spot.parking_type.parse()?, false);

    Ok(Ticket {
        id: t.id,
        parking_spot,
        vehicle_reg_number: t.vehicle_reg_number,
        price: cents_to_price(t.price_cents),
        in_time: t.in_time,
        out_time: t.out_time,
    })
}

// ── TicketRepository impl ───────────────────────────────────────

#[async_trait]
impl TicketRepository for SeaOrmTicketRepository {
    async fn save(&self, mut t: Ticket) -> DomainResult<Ticket> {
        debug!("Saving ticket for vehicle {}", t.vehicle_reg_number);

        let model = ticket::ActiveModel {
            id: NotSet,
            parking_number: Set(t.parking_spot.id),
            vehicle_reg_number: Set(t.vehicle_reg_number.clone()),
            price_cents: Set(price_to_cents(t.price)?),
            in_time: Set(t.in_time),
            out_time: Set(t.out_time),
        };
        let saved = model.insert(&self.db).await.map_err(db_err)?;
        t.id = saved.id;
        Ok(t)
    }

    async fn find_open_by_vehicle(&self, vehicle_reg_number: &str) -> DomainResult<Option<Ticket>> {
        let found = ticket::Entity::find()
            .filter(ticket::Column::VehicleRegNumber.eq(vehicle_reg_number))
            .filter(ticket::Column::OutTime.is_null())
            .order_by_desc(ticket::Column::InTime)
            .order_by_desc(ticket::Column::Id)
            .find_also_related(parking_spot::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        found.map(|(t, spot)| model_to_domain(t, spot)).transpose()
    }

    async fn update(&self, t: &Ticket) -> DomainResult<bool> {
        debug!("Updating ticket: {}", t.id);

        let changes = ticket::ActiveModel {
            price_cents: Set(price_to_cents(t.price)?),
            out_time: Set(t.out_time),
            ..Default::default()
        };
        // only an open ticket may be closed
        let result = ticket::Entity::update_many()
            .set(changes)
            .filter(ticket::Column::Id.eq(t.id))
            .filter(ticket::Column::OutTime.is_null())
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected == 1)
    }

    async fn find_all_by_vehicle(&self, vehicle_reg_number: &str) -> DomainResult<Vec<Ticket>> {
        let found = ticket::Entity::find()
            .filter(ticket::Column::VehicleRegNumber.eq(vehicle_reg_number))
            .find_also_related(parking_spot::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        found
            .into_iter()
            .map(|(t, spot)| model_to_domain(t, spot))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn price_is_stored_in_cents() {
        assert_eq!(price_to_cents(Decimal::from_str("1.43").unwrap()).unwrap(), 143);
        assert_eq!(price_to_cents(Decimal::from_str("1.5").unwrap()).unwrap(), 150);
        assert_eq!(price_to_cents(Decimal::ZERO).unwrap(), 0);
    }

    #[test]
    fn cents_read_back_with_two_decimals() {
        let price = cents_to_price(143);
        assert_eq!(price, Decimal::from_str("1.43").unwrap());
        assert_eq!(price.scale(), 2);
    }
}
