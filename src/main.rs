// Equipment Booking
// Command-line entry point

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Duration, Local, NaiveDate, NaiveTime};

use equipment_booking::models::interval::TimeInterval;
use equipment_booking::models::reservation::{EquipmentId, ReservationId};
use equipment_booking::services::api::{
    equipment_or_empty, BookingError, HttpReservationApi, ReservationApi,
};
use equipment_booking::services::settings::{SettingsService, ENV_TOKEN};
use equipment_booking::services::submission::{BookingForm, SubmissionFlow};
use equipment_booking::ui::calendar::calendar_entries;
use equipment_booking::ui::grid_text::render_grid;
use equipment_booking::ui::BookingPanel;
use equipment_booking::utils::date;

const USAGE: &str = "\
Usage:
  equipment-booking equipment
  equipment-booking grid <equipment-id> [YYYY-MM-DD]
  equipment-booking calendar [YYYY-MM-DD] [equipment-id]
  equipment-booking book <equipment-id> <YYYY-MM-DD> <HH:MM> <minutes> [purpose...]
  equipment-booking cancel <reservation-id>";

const CALENDAR_DAYS: i64 = 7;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        println!("{}", USAGE);
        return Ok(());
    };

    let settings_service = SettingsService::from_default_location();
    let settings = settings_service.load()?;
    let api = HttpReservationApi::new(&settings)?;
    log::info!("Using reservation backend at {}", api.base_url());

    let result = match command.as_str() {
        "equipment" => list_equipment(&api),
        "grid" => show_grid(&api, &args[1..], settings.grid_days),
        "calendar" => show_calendar(&api, &args[1..]),
        "book" => book(&api, &args[1..]),
        "cancel" => cancel(&api, &args[1..]),
        other => Err(anyhow!("Unknown command '{}'\n{}", other, USAGE)),
    };

    if let Err(err) = &result {
        if let Some(BookingError::Unauthorized(_)) = err.downcast_ref::<BookingError>() {
            if let Err(clear_err) = settings_service.clear_token() {
                log::warn!("Failed to clear stored token: {}", clear_err);
            }
            eprintln!("Session expired. Set {} and retry.", ENV_TOKEN);
        }
    }

    result
}

fn parse_equipment_id(arg: Option<&String>) -> Result<EquipmentId> {
    let raw = arg.ok_or_else(|| anyhow!("Missing equipment id\n{}", USAGE))?;
    raw.parse::<EquipmentId>()
        .with_context(|| format!("Invalid equipment id '{}'", raw))
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("Invalid date '{}'", raw))
}

fn list_equipment(api: &HttpReservationApi) -> Result<()> {
    let equipment = equipment_or_empty(api);
    if equipment.is_empty() {
        println!("No equipment available.");
        return Ok(());
    }

    for item in equipment {
        let marker = if item.is_bookable() { "" } else { " (maintenance)" };
        println!(
            "{:>4}  {}{}  {}",
            item.id,
            item.name,
            marker,
            item.location.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

fn show_grid(api: &HttpReservationApi, args: &[String], grid_days: u32) -> Result<()> {
    let equipment_id = parse_equipment_id(args.first())?;
    let start = match args.get(1) {
        Some(raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };

    let panel = BookingPanel::open(api, equipment_id, start, grid_days)?;
    print!("{}", render_grid(panel.grid(), None));
    println!(
        "{} of {} slots free",
        panel.grid().available_count(),
        panel.grid().cells().len()
    );
    if !panel.is_bookable() {
        println!("{} is under maintenance; booking is disabled.", panel.equipment().name);
    }
    Ok(())
}

fn show_calendar(api: &HttpReservationApi, args: &[String]) -> Result<()> {
    let start = match args.first() {
        Some(raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };
    let equipment_filter = match args.get(1) {
        Some(_) => Some(parse_equipment_id(args.get(1))?),
        None => None,
    };

    let range_start = date::start_of_day(start)
        .ok_or_else(|| anyhow!("{} has no local midnight", start))?;
    let range = TimeInterval::new(range_start, range_start + Duration::days(CALENDAR_DAYS))
        .map_err(|e| anyhow!(e))?;

    let entries = calendar_entries(api, &range, equipment_filter)?;
    if entries.is_empty() {
        println!("No reservations.");
    }
    for entry in entries {
        println!(
            "{}  {:>3} min  {:<9}  {}",
            date::format_short(entry.interval.start()),
            entry.interval.duration_minutes(),
            entry.status.label(),
            entry.title
        );
    }
    Ok(())
}

fn confirm_past_start(interval: &TimeInterval) -> bool {
    print!(
        "{} is in the past. Book anyway? [y/N] ",
        date::format_short(interval.start())
    );
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes"),
        Err(_) => false,
    }
}

fn book(api: &HttpReservationApi, args: &[String]) -> Result<()> {
    if args.len() < 4 {
        bail!("Missing booking arguments\n{}", USAGE);
    }

    let equipment_id = parse_equipment_id(args.first())?;
    let day = parse_date(&args[1])?;
    let start_time = NaiveTime::parse_from_str(&args[2], "%H:%M")
        .with_context(|| format!("Invalid start time '{}'", args[2]))?;
    let minutes: u32 = args[3]
        .parse()
        .with_context(|| format!("Invalid duration '{}'", args[3]))?;
    let purpose = args[4..].join(" ");

    let equipment = api
        .list_equipment()?
        .into_iter()
        .find(|item| item.id == equipment_id)
        .ok_or_else(|| anyhow!("Equipment {} not found", equipment_id))?;
    if !equipment.is_bookable() {
        bail!("{} is under maintenance and cannot be booked", equipment.name);
    }

    let form = BookingForm::new(equipment_id)
        .with_slot(day, start_time, minutes)
        .with_purpose(purpose);

    match SubmissionFlow::new(api).submit(&form, confirm_past_start) {
        Ok(reservation) => {
            println!(
                "Reserved #{} {} ({} min, {})",
                reservation.id,
                date::format_short(reservation.interval.start()),
                reservation.interval.duration_minutes(),
                reservation.status.label()
            );
            Ok(())
        }
        Err(err) if err.is_recoverable() => {
            println!("Booking not submitted: {}", err);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn cancel(api: &HttpReservationApi, args: &[String]) -> Result<()> {
    let raw = args
        .first()
        .ok_or_else(|| anyhow!("Missing reservation id\n{}", USAGE))?;
    let id = raw
        .parse::<ReservationId>()
        .with_context(|| format!("Invalid reservation id '{}'", raw))?;

    SubmissionFlow::new(api).cancel(id)?;
    println!("Reservation #{} cancelled.", id);
    Ok(())
}
