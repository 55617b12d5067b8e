//! CSV export of live records.

use desk_core::{Error, Result};
use store::{assets, employees, tickets, Db};
use telemetry::metrics;

/// Export live assets as CSV, headers matching the import contract.
pub async fn export_assets(db: &Db) -> Result<String> {
    let rows = assets::list(db).await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["tag", "name", "brand", "vendor", "division", "assigned_to"])
        .map_err(|e| Error::internal(format!("csv write: {e}")))?;

    for asset in &rows {
        writer
            .write_record([
                asset.tag.as_str(),
                asset.name.as_str(),
                asset.brand.as_deref().unwrap_or(""),
                asset.vendor.as_deref().unwrap_or(""),
                asset.division.as_deref().unwrap_or(""),
                asset.assigned_to.as_deref().unwrap_or(""),
            ])
            .map_err(|e| Error::internal(format!("csv write: {e}")))?;
    }

    metrics().exports_served.inc();
    finish(writer)
}

/// Export live employees as CSV, headers matching the import contract.
pub async fn export_employees(db: &Db) -> Result<String> {
    let rows = employees::list(db).await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["nik", "name", "division", "email"])
        .map_err(|e| Error::internal(format!("csv write: {e}")))?;

    for employee in &rows {
        writer
            .write_record([
                employee.nik.as_str(),
                employee.name.as_str(),
                employee.division.as_deref().unwrap_or(""),
                employee.email.as_deref().unwrap_or(""),
            ])
            .map_err(|e| Error::internal(format!("csv write: {e}")))?;
    }

    metrics().exports_served.inc();
    finish(writer)
}

/// Export all tickets with their current status.
pub async fn export_tickets(db: &Db) -> Result<String> {
    let rows = tickets::list(db).await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["id", "subject", "status", "created_at"])
        .map_err(|e| Error::internal(format!("csv write: {e}")))?;

    for ticket in &rows {
        writer
            .write_record([
                ticket.id.to_string().as_str(),
                ticket.subject.as_str(),
                ticket.status.as_str(),
                ticket.created_at.to_rfc3339().as_str(),
            ])
            .map_err(|e| Error::internal(format!("csv write: {e}")))?;
    }

    metrics().exports_served.inc();
    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::internal(format!("csv flush: {e}")))?;
    String::from_utf8(bytes).map_err(|e| Error::internal(format!("csv utf-8: {e}")))
}
