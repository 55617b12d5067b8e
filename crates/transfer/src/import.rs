//! CSV import: per-row validation, chunked upserts, skip-and-report.

use desk_core::{Error, Result};
use serde::{Deserialize, Serialize};
use store::assets::NewAsset;
use store::employees::NewEmployee;
use store::{assets, employees, Db};
use telemetry::metrics;
use tracing::info;
use validator::Validate;

/// Rows per transaction. Throughput only; a failed row never aborts a chunk.
const IMPORT_CHUNK_SIZE: usize = 500;

/// One skipped row and why.
#[derive(Debug, Clone, Serialize)]
pub struct RowFailure {
    /// 1-based line number in the uploaded file (line 1 is the header).
    pub row: usize,
    pub reason: String,
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub total: usize,
    pub imported: usize,
    pub failures: Vec<RowFailure>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
struct AssetImportRow {
    #[validate(length(min = 1, message = "tag is required"))]
    tag: String,
    #[validate(length(min = 1, message = "name is required"))]
    name: String,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    vendor: Option<String>,
    #[serde(default)]
    division: Option<String>,
    #[serde(default)]
    assigned_to: Option<String>,
}

impl From<AssetImportRow> for NewAsset {
    fn from(row: AssetImportRow) -> Self {
        NewAsset {
            tag: row.tag,
            name: row.name,
            brand: normalize(row.brand),
            vendor: normalize(row.vendor),
            division: normalize(row.division),
            assigned_to: normalize(row.assigned_to),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
struct EmployeeImportRow {
    #[validate(length(min = 1, message = "nik is required"))]
    nik: String,
    #[validate(length(min = 1, message = "name is required"))]
    name: String,
    #[serde(default)]
    division: Option<String>,
    #[validate(email(message = "invalid email"))]
    #[serde(default)]
    email: Option<String>,
}

impl From<EmployeeImportRow> for NewEmployee {
    fn from(row: EmployeeImportRow) -> Self {
        NewEmployee {
            nik: row.nik,
            name: row.name,
            division: normalize(row.division),
            email: normalize(row.email),
        }
    }
}

fn normalize(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

/// Parse and validate every row up front, independently.
fn parse_rows<R>(data: &[u8]) -> (Vec<(usize, R)>, Vec<RowFailure>)
where
    R: for<'de> Deserialize<'de> + Validate,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut valid = Vec::new();
    let mut failures = Vec::new();

    for (i, record) in reader.deserialize::<R>().enumerate() {
        let line = i + 2; // header occupies line 1
        match record {
            Err(e) => failures.push(RowFailure {
                row: line,
                reason: e.to_string(),
            }),
            Ok(row) => match row.validate() {
                Err(e) => failures.push(RowFailure {
                    row: line,
                    reason: e.to_string(),
                }),
                Ok(()) => valid.push((line, row)),
            },
        }
    }

    (valid, failures)
}

/// Import assets, upserting by tag. Rows assigning the asset to a
/// non-existent employee are skipped and reported.
pub async fn import_assets(db: &Db, data: &[u8]) -> Result<ImportReport> {
    let (valid, mut failures) = parse_rows::<AssetImportRow>(data);
    let total = valid.len() + failures.len();
    let mut imported = 0usize;

    for chunk in valid.chunks(IMPORT_CHUNK_SIZE) {
        let mut tx = db.pool().begin().await.map_err(Error::database)?;

        for (line, row) in chunk {
            if let Some(nik) = row.assigned_to.as_deref().filter(|s| !s.is_empty()) {
                if !employees::nik_exists(&mut *tx, nik).await? {
                    failures.push(RowFailure {
                        row: *line,
                        reason: format!("assigned employee {nik} does not exist"),
                    });
                    continue;
                }
            }

            assets::upsert_by_tag(&mut *tx, &NewAsset::from(row.clone())).await?;
            imported += 1;
        }

        tx.commit().await.map_err(Error::database)?;
    }

    metrics().import_rows_accepted.inc_by(imported as u64);
    metrics().import_rows_rejected.inc_by(failures.len() as u64);
    info!(total, imported, rejected = failures.len(), "Asset import complete");

    Ok(ImportReport {
        total,
        imported,
        failures,
    })
}

/// Import employees, upserting by nik.
pub async fn import_employees(db: &Db, data: &[u8]) -> Result<ImportReport> {
    let (valid, mut failures) = parse_rows::<EmployeeImportRow>(data);
    let total = valid.len() + failures.len();
    let mut imported = 0usize;

    for chunk in valid.chunks(IMPORT_CHUNK_SIZE) {
        let mut tx = db.pool().begin().await.map_err(Error::database)?;

        for (_line, row) in chunk {
            employees::upsert_by_nik(&mut *tx, &NewEmployee::from(row.clone())).await?;
            imported += 1;
        }

        tx.commit().await.map_err(Error::database)?;
    }

    metrics().import_rows_accepted.inc_by(imported as u64);
    metrics().import_rows_rejected.inc_by(failures.len() as u64);
    info!(total, imported, rejected = failures.len(), "Employee import complete");

    Ok(ImportReport {
        total,
        imported,
        failures,
    })
}
