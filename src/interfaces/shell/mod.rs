//! Interactive parking shell
//!
//! Menu loop driving the [`ParkingService`] from a terminal:
//!
//! ```text
//! 1 New Vehicle Entering - Allocate Parking Space
//! 2 Vehicle Exiting - Generate Ticket Price
//! 3 Shutdown System
//! ```

mod prompt;

pub use prompt::PromptingInput;

use std::io::{BufRead, Write};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use crate::application::{EntryReceipt, ExitReceipt, ParkingService};
use crate::domain::{DomainError, ParkingType};
use crate::infrastructure::ConsoleInputReader;
use crate::support::errors::{AppError, InfraError};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Menu actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    Incoming,
    Exiting,
    Shutdown,
}

impl MenuOption {
    fn from_selection(selection: u32) -> Option<Self> {
        match selection {
            1 => Some(Self::Incoming),
            2 => Some(Self::Exiting),
            3 => Some(Self::Shutdown),
            _ => None,
        }
    }
}

pub struct Shell<R, W> {
    menu: ConsoleInputReader<R>,
    out: W,
    service: ParkingService,
    discount_percent: Decimal,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(menu: ConsoleInputReader<R>, out: W, service: ParkingService) -> Self {
        let discount_percent = service.fare_rates().recurring_discount_percent;
        Self {
            menu,
            out,
            service,
            discount_percent,
        }
    }

    /// Run until the operator shuts the system down or input ends
    pub async fn run(&mut self) -> Result<(), AppError> {
        info!("Parking shell started");
        self.say("Welcome to Parking System!")?;
        self.print_status().await?;

        loop {
            self.print_menu()?;
            let option = match self.menu.read_menu_option() {
                Ok(Some(selection)) => MenuOption::from_selection(selection),
                Ok(None) => {
                    debug!("Input closed, leaving shell");
                    break;
                }
                Err(AppError::Infra(e)) => {
                    error!("Unable to read menu option: {}", e);
                    return Err(e.into());
                }
                Err(AppError::Domain(_)) => None,
            };

            match option {
                Some(MenuOption::Incoming) => self.incoming_vehicle().await?,
                Some(MenuOption::Exiting) => self.exiting_vehicle().await?,
                Some(MenuOption::Shutdown) => {
                    self.say("Exiting from the system!")?;
                    break;
                }
                None => self.say(
                    "Unsupported option. Please enter a number corresponding to the provided menu",
                )?,
            }
        }

        info!("Parking shell stopped");
        Ok(())
    }

    async fn incoming_vehicle(&mut self) -> Result<(), AppError> {
        match self.service.process_incoming_vehicle().await {
            Ok(receipt) => self.print_entry(&receipt),
            Err(e) => self.print_failure(&e),
        }
    }

    async fn exiting_vehicle(&mut self) -> Result<(), AppError> {
        match self.service.process_exiting_vehicle().await {
            Ok(receipt) => self.print_exit(&receipt),
            Err(e) => self.print_failure(&e),
        }
    }

    async fn print_status(&mut self) -> Result<(), AppError> {
        let car = self.service.available_spots(ParkingType::Car).await?;
        let bike = self.service.available_spots(ParkingType::Bike).await?;
        self.say(&format!("Available spots - CAR:{} BIKE:{}", car, bike))
    }

    fn print_menu(&mut self) -> Result<(), AppError> {
        self.say("Please select an option. Simply enter the number to choose an action")?;
        self.say("1 New Vehicle Entering - Allocate Parking Space")?;
        self.say("2 Vehicle Exiting - Generate Ticket Price")?;
        self.say("3 Shutdown System")
    }

    fn print_entry(&mut self, receipt: &EntryReceipt) -> Result<(), AppError> {
        let ticket = &receipt.ticket;
        self.say("Generated Ticket and saved in DB")?;
        if receipt.recurring_user {
            self.say(&format!(
                "Welcome back! As a recurring user of our parking lot, you'll benefit from a {}% discount.",
                self.discount_percent.normalize()
            ))?;
        }
        self.say(&format!(
            "Please park your vehicle in spot number:{}",
            ticket.parking_spot.id
        ))?;
        self.say(&format!(
            "Recorded in-time for vehicle number:{} is:{}",
            ticket.vehicle_reg_number,
            format_time(&ticket.in_time)
        ))
    }

    fn print_exit(&mut self, receipt: &ExitReceipt) -> Result<(), AppError> {
        let ticket = &receipt.ticket;
        self.say(&format!("Please pay the parking fare:{}", ticket.price))?;
        let out_time = ticket.out_time.as_ref().map(format_time).unwrap_or_default();
        self.say(&format!(
            "Recorded out-time for vehicle number:{} is:{}",
            ticket.vehicle_reg_number, out_time
        ))?;
        if !receipt.spot_released {
            warn!("Spot {} left occupied", ticket.parking_spot.id);
            self.say(&format!(
                "Unable to free spot number:{}. Please contact the attendant",
                ticket.parking_spot.id
            ))?;
        }
        Ok(())
    }

    fn print_failure(&mut self, e: &DomainError) -> Result<(), AppError> {
        let message = match e {
            DomainError::ParkingFull(_) | DomainError::VehicleAlreadyParked(..) => e.to_string(),
            DomainError::TicketNotFound(reg) => {
                format!("No parked vehicle found for registration number:{}", reg)
            }
            DomainError::InvalidVehicleType(_) | DomainError::UnsupportedParkingType(_) => {
                "Incorrect input provided".to_string()
            }
            DomainError::InvalidRegistration(_) => "Invalid input provided".to_string(),
            DomainError::TicketUpdateFailed(_) => {
                "Unable to update ticket information. Error occurred".to_string()
            }
            _ => "Unable to process the vehicle. Error occurred".to_string(),
        };
        self.say(&message)
    }

    fn say(&mut self, line: &str) -> Result<(), AppError> {
        writeln!(self.out, "{}", line).map_err(InfraError::from)?;
        self.out.flush().map_err(InfraError::from)?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

fn format_time(time: &DateTime<Utc>) -> String {
    time.format(TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    use crate::application::FareCalculatorService;
    use crate::domain::RepositoryProvider;
    use crate::infrastructure::InMemoryStorage;

    fn shell(script: &str, storage: Arc<InMemoryStorage>) -> Shell<Cursor<Vec<u8>>, Vec<u8>> {
        let menu = ConsoleInputReader::new(Cursor::new(script.as_bytes().to_vec()));
        let repos: Arc<dyn RepositoryProvider> = storage;
        let service = ParkingService::new(
            Box::new(menu.clone()),
            FareCalculatorService::default(),
            repos,
        );
        Shell::new(menu, Vec::new(), service)
    }

    fn output(shell: Shell<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(shell.into_output()).unwrap()
    }

    #[tokio::test]
    async fn shutdown_option_ends_the_loop() {
        let mut shell = shell("3\n", Arc::new(InMemoryStorage::provisioned(3, 2)));
        shell.run().await.unwrap();

        let out = output(shell);
        assert!(out.starts_with("Welcome to Parking System!\nAvailable spots - CAR:3 BIKE:2\n"));
        assert!(out.contains("3 Shutdown System"));
        assert!(out.ends_with("Exiting from the system!\n"));
    }

    #[tokio::test]
    async fn end_of_input_ends_the_loop() {
        let mut shell = shell("", Arc::new(InMemoryStorage::provisioned(3, 2)));
        shell.run().await.unwrap();
        assert!(!output(shell).contains("Exiting from the system!"));
    }

    #[tokio::test]
    async fn unknown_option_is_reported() {
        let mut shell = shell("7\nabc\n3\n", Arc::new(InMemoryStorage::provisioned(3, 2)));
        shell.run().await.unwrap();

        let out = output(shell);
        assert_eq!(
            out.matches("Unsupported option. Please enter a number corresponding to the provided menu")
                .count(),
            2
        );
    }

    #[tokio::test]
    async fn entering_car_prints_spot_and_in_time() {
        let storage = Arc::new(InMemoryStorage::provisioned(3, 2));
        let mut shell = shell("1\n1\nABCDEF\n3\n", storage.clone());
        shell.run().await.unwrap();

        let out = output(shell);
        assert!(out.contains("Generated Ticket and saved in DB"));
        assert!(out.contains("Please park your vehicle in spot number:1"));
        assert!(out.contains("Recorded in-time for vehicle number:ABCDEF is:"));
        assert!(!out.contains("Welcome back!"));
        assert!(!storage.spot(1).unwrap().available);
    }

    #[tokio::test]
    async fn entry_then_exit_prints_free_fare() {
        let storage = Arc::new(InMemoryStorage::provisioned(3, 2));
        let mut shell = shell("1\n2\nBIKE01\n2\nBIKE01\n3\n", storage.clone());
        shell.run().await.unwrap();

        let out = output(shell);
        assert!(out.contains("Please park your vehicle in spot number:4"));
        assert!(out.contains("Please pay the parking fare:0"));
        assert!(out.contains("Recorded out-time for vehicle number:BIKE01 is:"));
        assert!(storage.spot(4).unwrap().available);
    }

    #[tokio::test]
    async fn returning_vehicle_is_welcomed() {
        let storage = Arc::new(InMemoryStorage::provisioned(3, 2));
        let mut shell = shell("1\n1\nABCDEF\n2\nABCDEF\n1\n1\nABCDEF\n3\n", storage);
        shell.run().await.unwrap();

        let out = output(shell);
        assert_eq!(
            out.matches(
                "Welcome back! As a recurring user of our parking lot, you'll benefit from a 5% discount."
            )
            .count(),
            1
        );
    }

    #[tokio::test]
    async fn welcome_back_follows_the_saved_ticket() {
        let storage = Arc::new(InMemoryStorage::provisioned(3, 2));
        let mut shell = shell("1\n1\nABCDEF\n2\nABCDEF\n1\n1\nABCDEF\n3\n", storage);
        shell.run().await.unwrap();

        let out = output(shell);
        let welcome = out.find("Welcome back!").unwrap();
        let saved = out.rfind("Generated Ticket and saved in DB").unwrap();
        let spot = out.rfind("Please park your vehicle in spot number:").unwrap();
        assert!(saved < welcome);
        assert!(welcome < spot);
    }

    #[tokio::test]
    async fn second_entry_of_parked_vehicle_is_refused() {
        let storage = Arc::new(InMemoryStorage::provisioned(3, 2));
        let mut shell = shell("1\n1\nABCDEF\n1\n1\nABCDEF\n3\n", storage.clone());
        shell.run().await.unwrap();

        let out = output(shell);
        assert!(out.contains("Vehicle ABCDEF is already parked in spot 1"));
        assert_eq!(storage.ticket_count(), 1);
        assert!(storage.spot(2).unwrap().available);
    }

    /// Reader whose every read fails
    struct BrokenPipe;

    impl std::io::Read for BrokenPipe {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdin gone"))
        }
    }

    impl BufRead for BrokenPipe {
        fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdin gone"))
        }

        fn consume(&mut self, _amt: usize) {}
    }

    #[tokio::test]
    async fn failing_input_stops_the_shell() {
        let menu = ConsoleInputReader::new(BrokenPipe);
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryStorage::provisioned(3, 2));
        let service = ParkingService::new(
            Box::new(menu.clone()),
            FareCalculatorService::default(),
            repos,
        );
        let mut shell = Shell::new(menu, Vec::new(), service);

        let err = shell.run().await.unwrap_err();

        assert!(matches!(err, AppError::Infra(InfraError::Io(_))));
    }

    #[tokio::test]
    async fn failures_are_reported_and_loop_continues() {
        let storage = Arc::new(InMemoryStorage::provisioned(0, 2));
        let mut shell = shell("1\n1\n2\nNOPE\n1\n9\n3\n", storage);
        shell.run().await.unwrap();

        let out = output(shell);
        assert!(out.contains("No CAR parking spot available, parking slots might be full"));
        assert!(out.contains("No parked vehicle found for registration number:NOPE"));
        assert!(out.contains("Incorrect input provided"));
        assert!(out.ends_with("Exiting from the system!\n"));
    }
}
