//! Frontdesk command-line front end.
//!
//! # Responsibility
//! - Collect and validate form input, then call the core service.
//! - Render collections and the home summary as plain text.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};
use frontdesk_core::db::open_db;
use frontdesk_core::{
    init_logging, AppConfig, Appointment, AppointmentDraft, Department, EmployeeDraft,
    EmployeePatch, LogNotifier, NotificationStatus, PersistentStore, ReceptionService, RecordId,
    SnapshotStore, SqliteSnapshotStore, SystemClock, VisitorDraft, DEFAULT_OFFICE_TIME,
};
use std::path::PathBuf;

mod forms;
mod image;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Parser)]
#[command(version, about = "Reception desk: visitors, appointments and employees")]
struct Cli {
    /// TOML config file; defaults apply when it does not exist.
    #[arg(short, long, default_value = "frontdesk.toml")]
    config: PathBuf,

    /// Overrides `data_path` from the config file.
    #[arg(short, long)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Home summary: totals and latest activity.
    Status,

    #[command(subcommand)]
    Visitor(VisitorCommand),

    #[command(subcommand)]
    Appointment(AppointmentCommand),

    #[command(subcommand)]
    Employee(EmployeeCommand),

    /// Show or hide the employee panel.
    Panel,
}

#[derive(Subcommand)]
enum VisitorCommand {
    Add(VisitorFields),
    Edit {
        id: RecordId,
        #[command(flatten)]
        fields: VisitorEdits,
    },
    Delete {
        id: RecordId,
    },
    List,
}

#[derive(Args)]
struct VisitorFields {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    reason: String,
    /// Visit time, e.g. 2026-10-18T14:30.
    #[arg(long, value_parser = parse_date_arg)]
    date: NaiveDateTime,
    /// Department or employee being visited.
    #[arg(long)]
    with: String,
}

#[derive(Args)]
struct VisitorEdits {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    reason: Option<String>,
    #[arg(long, value_parser = parse_date_arg)]
    date: Option<NaiveDateTime>,
    #[arg(long)]
    with: Option<String>,
}

#[derive(Subcommand)]
enum AppointmentCommand {
    Add(AppointmentFields),
    Edit {
        id: RecordId,
        #[command(flatten)]
        fields: AppointmentEdits,
    },
    /// Mark completed; it is removed once the grace period passes.
    Complete {
        id: RecordId,
    },
    Delete {
        id: RecordId,
    },
    List,
}

#[derive(Args)]
struct AppointmentFields {
    #[arg(long)]
    visitor: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    reason: String,
    #[arg(long, value_parser = parse_date_arg)]
    date: NaiveDateTime,
    /// Employee name.
    #[arg(long)]
    with: String,
    /// Employee id, used when `link_mode = "by_id"`.
    #[arg(long)]
    employee_id: Option<RecordId>,
}

#[derive(Args)]
struct AppointmentEdits {
    #[arg(long)]
    visitor: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    reason: Option<String>,
    #[arg(long, value_parser = parse_date_arg)]
    date: Option<NaiveDateTime>,
    #[arg(long)]
    with: Option<String>,
    #[arg(long)]
    employee_id: Option<RecordId>,
}

#[derive(Subcommand)]
enum EmployeeCommand {
    Add(EmployeeFields),
    Edit {
        id: RecordId,
        #[command(flatten)]
        fields: EmployeeEdits,
    },
    Delete {
        id: RecordId,
    },
    List,
    #[command(subcommand)]
    Image(ImageCommand),
}

#[derive(Args)]
struct EmployeeFields {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    address: String,
    #[arg(long)]
    mobile: String,
    #[arg(long)]
    email: String,
    /// One of IT, Finance, HR, Admin, Sales.
    #[arg(long)]
    department: Option<Department>,
    #[arg(long, default_value = DEFAULT_OFFICE_TIME)]
    office_time: String,
    /// Profile picture file.
    #[arg(long)]
    image: Option<PathBuf>,
}

#[derive(Args)]
struct EmployeeEdits {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    mobile: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    department: Option<Department>,
    #[arg(long)]
    office_time: Option<String>,
    #[arg(long)]
    image: Option<PathBuf>,
}

#[derive(Subcommand)]
enum ImageCommand {
    Set { id: RecordId, path: PathBuf },
    Clear { id: RecordId },
}

fn parse_date_arg(value: &str) -> Result<NaiveDateTime, String> {
    forms::parse_date_time(value)
        .ok_or_else(|| format!("`{value}` is not a date-time like 2026-10-18T14:30"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config).context("could not load config")?;
    if let Some(data) = cli.data {
        config.data_path = data;
    }
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir).context("could not start logging")?;
    }

    let conn = open_db(&config.data_path)
        .with_context(|| format!("could not open `{}`", config.data_path.display()))?;
    let store = PersistentStore::open(
        SqliteSnapshotStore::new(&conn),
        SystemClock,
        config.store_options(),
    );
    let mut service = ReceptionService::new(store);
    if config.notifications {
        service = service.with_notifier(LogNotifier);
    }
    service
        .sweep_completed_appointments()
        .context("could not remove completed appointments")?;

    match cli.command {
        Commands::Status => {
            print_status(&service);
            Ok(())
        }
        Commands::Visitor(command) => {
            run_visitor(&mut service, command).context("could not run `visitor`")
        }
        Commands::Appointment(command) => {
            run_appointment(&mut service, command).context("could not run `appointment`")
        }
        Commands::Employee(command) => {
            run_employee(&mut service, command).context("could not run `employee`")
        }
        Commands::Panel => {
            let open = service.toggle_employee_panel()?;
            println!("Employee panel {}.", if open { "opened" } else { "closed" });
            Ok(())
        }
    }
}

fn run_visitor<S: SnapshotStore>(
    service: &mut ReceptionService<S>,
    command: VisitorCommand,
) -> Result<()> {
    match command {
        VisitorCommand::Add(fields) => {
            let draft = VisitorDraft {
                id: None,
                name: fields.name,
                email: fields.email,
                phone_number: fields.phone,
                visit_reason: fields.reason,
                visit_date: fields.date,
                appointment_with: fields.with,
            };
            forms::check_visitor_draft(&draft)?;
            let id = service.add_visitor(draft)?;
            println!("Visitor added successfully! id={id}");
        }
        VisitorCommand::Edit { id, fields } => {
            let Some(mut record) = service.store().visitor(id).cloned() else {
                println!("No visitor with id {id}.");
                return Ok(());
            };
            if let Some(name) = fields.name {
                record.name = name;
            }
            if let Some(email) = fields.email {
                record.email = email;
            }
            if let Some(phone) = fields.phone {
                record.phone_number = phone;
            }
            if let Some(reason) = fields.reason {
                record.visit_reason = reason;
            }
            if let Some(date) = fields.date {
                record.visit_date = date;
            }
            if let Some(with) = fields.with {
                record.appointment_with = with;
            }
            forms::check_visitor(&record)?;
            service.edit_visitor(record)?;
            println!("Visitor updated successfully!");
        }
        VisitorCommand::Delete { id } => {
            report_change(service.delete_visitor(id)?, "Visitor deleted successfully!", id);
        }
        VisitorCommand::List => {
            let store = service.store();
            println!("Total visitors: {}", store.visitor_total());
            for (index, visitor) in store.visitors().iter().enumerate() {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    index + 1,
                    visitor.id,
                    visitor.name,
                    visitor.email,
                    visitor.phone_number,
                    visitor.visit_reason,
                    list_date(visitor.visit_date),
                    visitor.appointment_with
                );
            }
        }
    }
    Ok(())
}

fn run_appointment<S: SnapshotStore>(
    service: &mut ReceptionService<S>,
    command: AppointmentCommand,
) -> Result<()> {
    match command {
        AppointmentCommand::Add(fields) => {
            let draft = AppointmentDraft {
                id: None,
                visitor_name: fields.visitor,
                phone_number: fields.phone,
                reason: fields.reason,
                date: fields.date,
                appointment_with: fields.with,
                employee_id: fields.employee_id,
                department: None,
            };
            forms::check_appointment_draft(&draft)?;
            let outcome = service.schedule_appointment(draft)?;
            println!("Appointment added successfully! id={}", outcome.appointment_id);
            if let NotificationStatus::Failed(err) = outcome.notification {
                eprintln!("warning: appointment saved but notification failed: {err}");
            }
        }
        AppointmentCommand::Edit { id, fields } => {
            let Some(mut record) = service.store().appointment(id).cloned() else {
                println!("No appointment with id {id}.");
                return Ok(());
            };
            apply_appointment_edits(&mut record, fields);
            forms::check_appointment(&record)?;
            service.edit_appointment(record)?;
            println!("Appointment updated successfully!");
        }
        AppointmentCommand::Complete { id } => {
            if service.complete_appointment(id)? {
                println!("Appointment marked as completed!");
            } else {
                println!("No open appointment with id {id}.");
            }
        }
        AppointmentCommand::Delete { id } => {
            report_change(
                service.delete_appointment(id)?,
                "Appointment deleted successfully!",
                id,
            );
        }
        AppointmentCommand::List => {
            let store = service.store();
            println!("Total appointments: {}", store.appointment_total());
            for (index, appointment) in store.active_appointments().enumerate() {
                let department = appointment
                    .department
                    .or_else(|| {
                        store
                            .linked_employee(appointment)
                            .and_then(|employee| employee.department)
                    })
                    .map_or_else(|| NOT_AVAILABLE.to_string(), |dept| dept.to_string());
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{} ({})",
                    index + 1,
                    appointment.id,
                    appointment.visitor_name,
                    appointment.phone_number,
                    appointment.reason,
                    list_date(appointment.date),
                    appointment.appointment_with,
                    department
                );
            }
        }
    }
    Ok(())
}

fn apply_appointment_edits(record: &mut Appointment, fields: AppointmentEdits) {
    if let Some(visitor) = fields.visitor {
        record.visitor_name = visitor;
    }
    if let Some(phone) = fields.phone {
        record.phone_number = phone;
    }
    if let Some(reason) = fields.reason {
        record.reason = reason;
    }
    if let Some(date) = fields.date {
        record.date = date;
    }
    if let Some(with) = fields.with {
        record.appointment_with = with;
    }
    if fields.employee_id.is_some() {
        record.employee_id = fields.employee_id;
    }
}

fn run_employee<S: SnapshotStore>(
    service: &mut ReceptionService<S>,
    command: EmployeeCommand,
) -> Result<()> {
    match command {
        EmployeeCommand::Add(fields) => {
            let image = fields
                .image
                .as_deref()
                .map(image::load_data_url)
                .transpose()?;
            let draft = EmployeeDraft {
                name: fields.name,
                address: fields.address,
                mobile_number: fields.mobile,
                email: fields.email,
                department: fields.department,
                office_time: fields.office_time,
                image,
            };
            forms::check_employee_draft(&draft)?;
            let id = service.add_employee(draft)?;
            println!("Employee added successfully! id={id}");
        }
        EmployeeCommand::Edit { id, fields } => {
            let image = fields
                .image
                .as_deref()
                .map(image::load_data_url)
                .transpose()?;
            let patch = EmployeePatch {
                name: fields.name,
                address: fields.address,
                mobile_number: fields.mobile,
                email: fields.email,
                department: fields.department,
                office_time: fields.office_time,
                image,
                ..EmployeePatch::new(id)
            };
            forms::check_employee_patch(&patch)?;
            if service.edit_employee(patch)? {
                println!("Employee updated successfully!");
            } else {
                println!("No employee with id {id}.");
            }
        }
        EmployeeCommand::Delete { id } => {
            report_change(service.delete_employee(id)?, "Employee deleted successfully!", id);
        }
        EmployeeCommand::List => {
            let store = service.store();
            println!("Total employees: {}", store.employee_total());
            for (index, employee) in store.employees().iter().enumerate() {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    index + 1,
                    employee.id,
                    employee.name,
                    employee.address,
                    employee.mobile_number,
                    employee.email,
                    employee.office_time,
                    employee
                        .department
                        .map_or(NOT_AVAILABLE, Department::as_str),
                    if employee.image.is_some() { "image" } else { "-" }
                );
            }
        }
        EmployeeCommand::Image(ImageCommand::Set { id, path }) => {
            let data_url = image::load_data_url(&path)?;
            report_change(
                service.update_employee_image(id, data_url)?,
                "Employee image updated.",
                id,
            );
        }
        EmployeeCommand::Image(ImageCommand::Clear { id }) => {
            report_change(
                service.remove_employee_image(id)?,
                "Employee image removed.",
                id,
            );
        }
    }
    Ok(())
}

fn print_status<S: SnapshotStore>(service: &ReceptionService<S>) {
    let store = service.store();
    let summary = store.activity_summary();

    println!("frontdesk {}", frontdesk_core::core_version());
    println!("Visitors:     {}", store.visitor_total());
    println!("Appointments: {}", store.active_appointments().count());
    println!("Employees:    {}", store.employee_total());
    println!(
        "Employee panel: {}",
        if store.is_employee_panel_open() { "open" } else { "closed" }
    );

    if !summary.latest_visitor_name.is_empty() {
        println!(
            "A new visitor, {}, has just checked in!",
            summary.latest_visitor_name
        );
    }
    if let Some(appointment) = summary.latest_appointment {
        println!(
            "An appointment is set with {} on {} at {}.",
            appointment.appointment_with,
            frontdesk_core::notify::format_notice_date(appointment.date),
            frontdesk_core::notify::format_notice_time(appointment.date)
        );
    }
    if let Some(employee) = summary.latest_employee {
        println!("{} has joined the team.", employee.name);
    }
}

fn report_change(applied: bool, message: &str, id: RecordId) {
    if applied {
        println!("{message}");
    } else {
        println!("Nothing changed: no record with id {id}.");
    }
}

/// List-view date, e.g. `Oct 18, 2026 (14:30)`.
fn list_date(value: NaiveDateTime) -> String {
    value.format("%b %d, %Y (%H:%M)").to_string()
}
