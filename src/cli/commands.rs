use chrono::NaiveDate;

use crate::ledger::{PaymentStatus, Week};
use crate::store::LedgerStore;

use super::output;
use super::table::{Table, TableColumn};
use super::CliError;

pub fn add_week(store: &LedgerStore, args: &[String]) -> Result<(), CliError> {
    let start_date = parse_date(args.first(), "add-week <start-date>")?;
    let week = store.add_week(start_date)?;
    output::success(format!(
        "Added {} ({} to {})",
        week.name, week.start_date, week.end_date
    ));
    Ok(())
}

pub fn add_session(store: &LedgerStore, args: &[String]) -> Result<(), CliError> {
    const USAGE: &str = "add-session <week> <date> <number> <paid|not-paid> [notes...]";
    let week_name = args.first().ok_or_else(|| CliError::usage(USAGE))?;
    let date = parse_date(args.get(1), USAGE)?;
    let number = parse_number(args.get(2), USAGE)?;
    let status = parse_status(args.get(3), USAGE)?;
    let notes = args.get(4..).unwrap_or(&[]).join(" ");
    let session = store.add_session(week_name, date, number, status, &notes)?;
    output::success(format!(
        "Added session {} to {} ({})",
        session.session_number,
        week_name,
        session.payment_status.label()
    ));
    Ok(())
}

pub fn set_payment(store: &LedgerStore, args: &[String]) -> Result<(), CliError> {
    const USAGE: &str = "set-payment <week> <number> <paid|not-paid>";
    let week_name = args.first().ok_or_else(|| CliError::usage(USAGE))?;
    let number = parse_number(args.get(1), USAGE)?;
    let status = parse_status(args.get(2), USAGE)?;
    let session = store.set_session_payment_status(week_name, number, status)?;
    output::success(format!(
        "Session {} in {} is now {}",
        session.session_number,
        week_name,
        session.payment_status.label()
    ));
    Ok(())
}

/// Lists every week with its sessions, the "All Weeks and Sessions" view.
pub fn weeks(store: &LedgerStore, _args: &[String]) -> Result<(), CliError> {
    let weeks = store.weeks()?;
    if weeks.is_empty() {
        output::info("The ledger contains no weeks yet.");
        return Ok(());
    }
    for week in &weeks {
        print_week_card(week);
        if week.sessions.is_empty() {
            output::info("  (no sessions)");
        } else {
            println!("{}", session_table(week).render());
        }
        println!();
    }
    Ok(())
}

pub fn summary(store: &LedgerStore, _args: &[String]) -> Result<(), CliError> {
    let totals = store.summary()?;
    output::section("Statistics");
    output::info(format!("Total sessions held:        {}", totals.total_sessions));
    output::info(format!("Total payments made:        R{}", totals.total_paid));
    output::info(format!("Total outstanding payments: R{}", totals.total_outstanding));
    Ok(())
}

pub fn current(store: &LedgerStore, _args: &[String]) -> Result<(), CliError> {
    let week = store.get_current_week()?;
    output::section("Current Week Details");
    print_week_card(&week);
    if !week.sessions.is_empty() {
        println!("{}", session_table(&week).render());
    }
    Ok(())
}

/// The dashboard view: statistics, outstanding breakdown, weekly summary,
/// current week details, and per-week payment breakdowns.
pub fn dashboard(store: &LedgerStore, args: &[String]) -> Result<(), CliError> {
    summary(store, args)?;
    println!();

    let weeks = store.weeks()?;
    let outstanding = store.outstanding_weeks()?;
    if !outstanding.is_empty() {
        output::section("Outstanding Payments Breakdown");
        for week in &outstanding {
            output::warning(format!("{}: R{}", week.name, week.total_outstanding_amount));
        }
        println!();
    }

    if weeks.is_empty() {
        output::info("The ledger contains no weeks yet.");
        return Ok(());
    }

    output::section("Weekly Summary");
    let mut table = Table::new(vec![
        TableColumn::left("Week"),
        TableColumn::left("Start"),
        TableColumn::left("End"),
        TableColumn::right("Sessions"),
        TableColumn::right("Paid"),
        TableColumn::right("Outstanding"),
        TableColumn::left("Status"),
    ]);
    let mut cumulative = 0.0;
    let mut breakdown = Table::new(vec![
        TableColumn::left("Week"),
        TableColumn::right("Sessions"),
        TableColumn::right("Paid"),
        TableColumn::right("Outstanding"),
        TableColumn::right("Cumulative Paid"),
    ]);
    for week in &weeks {
        table.push_row(vec![
            week.name.clone(),
            week.start_date.to_string(),
            week.end_date.to_string(),
            week.sessions.len().to_string(),
            format!("R{}", week.total_paid_amount),
            format!("R{}", week.total_outstanding_amount),
            week.status.label().to_string(),
        ]);
        cumulative += week.total_paid_amount;
        breakdown.push_row(vec![
            week.name.clone(),
            week.sessions.len().to_string(),
            format!("R{}", week.total_paid_amount),
            format!("R{}", week.total_outstanding_amount),
            format!("R{}", cumulative),
        ]);
    }
    println!("{}", table.render());
    println!();

    current(store, args)?;
    println!();

    output::section("Payments Per Week");
    println!("{}", breakdown.render());
    Ok(())
}

fn print_week_card(week: &Week) {
    output::info(format!("{} ({} || {})", week.name, week.start_date, week.end_date));
    output::info(format!(
        "  Status: {}  Paid: R{}  Outstanding: R{}  Sessions: {} ({} paid)",
        week.status.label(),
        week.total_paid_amount,
        week.total_outstanding_amount,
        week.sessions.len(),
        week.paid_sessions(),
    ));
}

fn session_table(week: &Week) -> Table {
    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::right("#"),
        TableColumn::left("Payment"),
        TableColumn::right("Paid"),
        TableColumn::right("Outstanding"),
        TableColumn::left("Notes"),
    ]);
    for session in &week.sessions {
        table.push_row(vec![
            session.date.to_string(),
            session.session_number.to_string(),
            session.payment_status.label().to_string(),
            format!("R{}", session.paid_amount),
            format!("R{}", session.outstanding_amount),
            session.notes.clone(),
        ]);
    }
    table
}

fn parse_date(raw: Option<&String>, usage: &str) -> Result<NaiveDate, CliError> {
    let raw = raw.ok_or_else(|| CliError::usage(usage))?;
    if raw == "today" {
        return Ok(chrono::Utc::now().date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| CliError::Usage(format!("invalid date `{}` (expected YYYY-MM-DD)", raw)))
}

fn parse_number(raw: Option<&String>, usage: &str) -> Result<u32, CliError> {
    let raw = raw.ok_or_else(|| CliError::usage(usage))?;
    raw.parse()
        .map_err(|_| CliError::Usage(format!("invalid session number `{}`", raw)))
}

fn parse_status(raw: Option<&String>, usage: &str) -> Result<PaymentStatus, CliError> {
    let raw = raw.ok_or_else(|| CliError::usage(usage))?;
    raw.parse().map_err(CliError::Usage)
}
