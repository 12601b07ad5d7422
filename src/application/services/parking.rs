//! Parking service: processes vehicles entering and leaving the lot
//!
//! Entry allocates a spot and opens a ticket, exit closes the ticket with
//! its fare and frees the spot. The ticket store is the only record of which
//! vehicles are parked.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use super::{FareCalculatorService, UserSurveyService};
use crate::application::ports::InputReader;
use crate::domain::{
    DomainError, DomainResult, FareRates, ParkingSpot, ParkingType, RepositoryProvider, Ticket,
};

/// Outcome of a successful entry
#[derive(Debug, Clone)]
pub struct EntryReceipt {
    pub ticket: Ticket,
    /// Vehicle has a completed previous visit and will get the discount
    pub recurring_user: bool,
}

/// Outcome of a successful exit
#[derive(Debug, Clone)]
pub struct ExitReceipt {
    pub ticket: Ticket,
    /// Fare was discounted
    pub recurring_user: bool,
    /// Spot was marked available again. The ticket is closed either way.
    pub spot_released: bool,
}

pub struct ParkingService {
    input: Box<dyn InputReader>,
    fare_calculator: FareCalculatorService,
    user_survey: UserSurveyService,
    repos: Arc<dyn RepositoryProvider>,
}

impl ParkingService {
    pub fn new(
        input: Box<dyn InputReader>,
        fare_calculator: FareCalculatorService,
        repos: Arc<dyn RepositoryProvider>,
    ) -> Self {
        Self {
            input,
            fare_calculator,
            user_survey: UserSurveyService::new(repos.clone()),
            repos,
        }
    }

    pub fn fare_rates(&self) -> &FareRates {
        self.fare_calculator.rates()
    }

    /// Free spots of one vehicle type
    pub async fn available_spots(&self, parking_type: ParkingType) -> DomainResult<u64> {
        self.repos.parking_spots().count_available(parking_type).await
    }

    /// Park an incoming vehicle.
    ///
    /// Reads the vehicle type and registration number, occupies the next
    /// free spot and saves a ticket with the current in time.
    pub async fn process_incoming_vehicle(&mut self) -> DomainResult<EntryReceipt> {
        let result = self.park_incoming_vehicle().await;
        if let Err(e) = &result {
            if e.is_business_outcome() {
                warn!("Incoming vehicle not parked: {}", e);
            } else {
                error!("Unable to process incoming vehicle: {}", e);
            }
        }
        result
    }

    async fn park_incoming_vehicle(&mut self) -> DomainResult<EntryReceipt> {
        let mut parking_spot = self.next_parking_spot_if_available().await?;
        let vehicle_reg_number = self.input.read_vehicle_registration_number()?;

        if let Some(open) = self
            .repos
            .tickets()
            .find_open_by_vehicle(&vehicle_reg_number)
            .await?
        {
            return Err(DomainError::VehicleAlreadyParked(
                vehicle_reg_number,
                open.parking_spot.id,
            ));
        }

        // allot this parking space and mark its availability as false
        parking_spot.occupy();
        if !self.repos.parking_spots().update_availability(&parking_spot).await? {
            return Err(DomainError::SpotUpdateFailed(parking_spot.id));
        }

        let ticket = match self
            .repos
            .tickets()
            .save(Ticket::open(parking_spot.clone(), vehicle_reg_number.as_str()))
            .await
        {
            Ok(ticket) => ticket,
            Err(e) => {
                self.restore_spot(parking_spot).await;
                return Err(e);
            }
        };
        info!(
            "Vehicle {} parked in spot {} at {}",
            ticket.vehicle_reg_number, ticket.parking_spot.id, ticket.in_time
        );

        let recurring_user = self.user_survey.is_recurring_user(&vehicle_reg_number).await;
        if recurring_user {
            info!("Recurring user incoming: {}", vehicle_reg_number);
        }

        Ok(EntryReceipt {
            ticket,
            recurring_user,
        })
    }

    /// Next free spot for the vehicle type typed by the operator.
    ///
    /// Nothing is reserved: the spot stays available until the entry
    /// commits it.
    pub async fn next_parking_spot_if_available(&mut self) -> DomainResult<ParkingSpot> {
        let parking_type = self.vehicle_type()?;
        match self.repos.parking_spots().find_next_available(parking_type).await? {
            Some(id) if id > 0 => Ok(ParkingSpot::new(id, parking_type, true)),
            _ => Err(DomainError::ParkingFull(parking_type)),
        }
    }

    fn vehicle_type(&mut self) -> DomainResult<ParkingType> {
        let selection = self.input.read_selection()?;
        ParkingType::from_selection(selection)
    }

    /// Undo the occupation of a spot whose ticket could not be written
    async fn restore_spot(&self, mut parking_spot: ParkingSpot) {
        parking_spot.release();
        match self.repos.parking_spots().update_availability(&parking_spot).await {
            Ok(true) => warn!("Spot {} released after failed ticket write", parking_spot.id),
            Ok(false) => error!("Spot {} vanished while being released", parking_spot.id),
            Err(e) => error!("Unable to release spot {}: {}", parking_spot.id, e),
        }
    }

    /// Let a parked vehicle out.
    ///
    /// Closes its open ticket with the fare owed and, once the ticket is
    /// stored, frees the spot.
    pub async fn process_exiting_vehicle(&mut self) -> DomainResult<ExitReceipt> {
        let result = self.release_exiting_vehicle().await;
        if let Err(e) = &result {
            if e.is_business_outcome() {
                warn!("Exiting vehicle not processed: {}", e);
            } else {
                error!("Unable to process exiting vehicle: {}", e);
            }
        }
        result
    }

    async fn release_exiting_vehicle(&mut self) -> DomainResult<ExitReceipt> {
        let vehicle_reg_number = self.input.read_vehicle_registration_number()?;
        let mut ticket = self
            .repos
            .tickets()
            .find_open_by_vehicle(&vehicle_reg_number)
            .await?
            .ok_or_else(|| DomainError::TicketNotFound(vehicle_reg_number.clone()))?;

        // history is read before the current ticket closes so it never counts itself
        let recurring_user = self.user_survey.is_recurring_user(&vehicle_reg_number).await;

        ticket.out_time = Some(Utc::now());
        let price = self.fare_calculator.calculate_ticket_fare(&ticket, recurring_user)?;
        ticket.price = price;

        if !self.repos.tickets().update(&ticket).await? {
            return Err(DomainError::TicketUpdateFailed(ticket.id));
        }

        // the ticket is closed from here on, a stuck spot must not hide the fare
        let mut parking_spot = ticket.parking_spot.clone();
        parking_spot.release();
        let spot_released = match self.repos.parking_spots().update_availability(&parking_spot).await {
            Ok(true) => {
                ticket.parking_spot = parking_spot;
                true
            }
            Ok(false) => {
                error!(
                    "Spot {} stays occupied after ticket {} closed",
                    parking_spot.id, ticket.id
                );
                false
            }
            Err(e) => {
                error!("Unable to release spot {}: {}", parking_spot.id, e);
                false
            }
        };

        info!(
            "Vehicle {} left spot {}, fare {}{}",
            ticket.vehicle_reg_number,
            ticket.parking_spot.id,
            ticket.price,
            if recurring_user { " (recurring discount)" } else { "" }
        );

        Ok(ExitReceipt {
            ticket,
            recurring_user,
            spot_released,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────
