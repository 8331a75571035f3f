//! Bulk import command implementation.
//!
//! Every valid row becomes one independent create call. The calls run
//! concurrently and are reported as they complete; a failed row never stops
//! the others.

use std::future::Future;

use futures::stream::{FuturesUnordered, StreamExt};
use ic_client::{api, classify, ApiClient, ClientResult, Notice, Operation};
use ic_sheet::import::parse_rows;
use ic_sheet::{reader, Entity, GroupImportRow, ImportRow, RoleImportRow, RowIssue, SheetRow, UserImportRow};
use tracing::{info as trace_info, warn};

use crate::cli::ImportArgs;
use crate::output::{error, info, notify, success, warning};
use crate::CliError;

use super::group::create_group;

/// A row whose create call failed.
#[derive(Debug, Clone)]
pub struct FailedRow {
    /// Sheet row number.
    pub row: usize,
    /// Qualified record name.
    pub label: String,
    /// Classified failure.
    pub notice: Notice,
}

/// Import statistics.
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Names of created records, in completion order.
    pub created: Vec<String>,
    /// Rows whose create call failed, in completion order.
    pub failed: Vec<FailedRow>,
    /// Rows that failed validation and were not sent.
    pub skipped: Vec<RowIssue>,
    /// Non-fatal follow-up problems (role assignments).
    pub warnings: Vec<Notice>,
}

impl ImportReport {
    /// Total rows considered.
    #[must_use]
    pub fn total(&self) -> usize {
        self.created.len() + self.failed.len() + self.skipped.len()
    }
}

/// Runs the import command.
pub async fn run_import(args: ImportArgs, client: &ApiClient) -> crate::CliResult<()> {
    let entity = Entity::from(args.entity);
    let rows = reader::read_file(&args.file)?;

    info(&format!(
        "Importing {} {} row(s) from '{}'...",
        rows.len(),
        entity,
        args.file.display()
    ));

    if args.dry_run {
        return preview(entity, &rows);
    }

    let report = import_rows(client, entity, &rows).await;

    for issue in &report.skipped {
        warning(&format!("Skipped {issue}"));
    }
    for failed in &report.failed {
        error(&format!("Row {} ({}): {}", failed.row, failed.label, failed.notice));
    }
    for notice in &report.warnings {
        notify(notice);
    }

    println!();
    success("Import complete!");
    println!(
        "  {}: {} created, {} failed, {} skipped",
        entity,
        report.created.len(),
        report.failed.len(),
        report.skipped.len()
    );

    if report.failed.is_empty() {
        Ok(())
    } else {
        Err(CliError::Validation(format!(
            "{} of {} row(s) could not be imported",
            report.failed.len(),
            report.total()
        )))
    }
}

/// Validates rows and submits one create call per valid row.
pub async fn import_rows(client: &ApiClient, entity: Entity, rows: &[SheetRow]) -> ImportReport {
    match entity {
        Entity::User => {
            submit(rows, Operation::AddUser, |row: UserImportRow| async move {
                api::users::create(client, &row.to_request()).await.map(|_| Vec::new())
            })
            .await
        }
        Entity::Group => {
            submit(rows, Operation::CreateGroup, |row: GroupImportRow| async move {
                create_group(client, &row.to_request(), &row.roles)
                    .await
                    .map(|(_, warnings)| warnings)
            })
            .await
        }
        Entity::Role => {
            submit(rows, Operation::CreateRole, |row: RoleImportRow| async move {
                api::roles::create(client, &row.to_request()).await.map(|_| Vec::new())
            })
            .await
        }
    }
}

async fn submit<R, F, Fut>(rows: &[SheetRow], operation: Operation, create: F) -> ImportReport
where
    R: ImportRow,
    F: Fn(R) -> Fut,
    Fut: Future<Output = ClientResult<Vec<Notice>>>,
{
    let (valid, skipped) = parse_rows::<R>(rows);
    let mut report = ImportReport {
        skipped,
        ..ImportReport::default()
    };

    let mut pending: FuturesUnordered<_> = valid
        .into_iter()
        .map(|row| {
            let number = row.row_number();
            let label = row.label();
            let call = create(row);
            async move { (number, label, call.await) }
        })
        .collect();

    while let Some((row, label, result)) = pending.next().await {
        match result {
            Ok(warnings) => {
                trace_info!(row, label = %label, "created");
                report.created.push(label);
                report.warnings.extend(warnings);
            }
            Err(e) => {
                warn!(row, label = %label, error = %e, "create failed");
                report.failed.push(FailedRow {
                    row,
                    label,
                    notice: classify(&e, operation),
                });
            }
        }
    }

    report
}

/// Prints the payload each valid row would send.
fn preview(entity: Entity, rows: &[SheetRow]) -> crate::CliResult<()> {
    let (payloads, issues) = match entity {
        Entity::User => payloads::<UserImportRow>(rows)?,
        Entity::Group => payloads::<GroupImportRow>(rows)?,
        Entity::Role => payloads::<RoleImportRow>(rows)?,
    };

    for (row, payload) in &payloads {
        println!("# row {row}");
        println!("{}", serde_json::to_string_pretty(payload)?);
    }
    for issue in &issues {
        warning(&format!("Skipped {issue}"));
    }
    success(&format!(
        "Dry run: {} row(s) valid, {} skipped",
        payloads.len(),
        issues.len()
    ));
    Ok(())
}

/// Builds the create payloads of valid rows, with passwords masked.
pub fn payloads<R: ImportRow>(rows: &[SheetRow]) -> crate::CliResult<(Vec<(usize, serde_json::Value)>, Vec<RowIssue>)> {
    let (valid, issues) = parse_rows::<R>(rows);
    let mut payloads = Vec::with_capacity(valid.len());
    for row in &valid {
        let mut payload = serde_json::to_value(row.to_request())?;
        if let Some(password) = payload.get_mut("password") {
            *password = serde_json::Value::String("****".to_string());
        }
        payloads.push((row.row_number(), payload));
    }
    Ok((payloads, issues))
}

#[cfg(test)]
mod tests {
    use ic_sheet::reader::{read_bytes, SourceFormat};

    use super::*;

    #[test]
    fn dry_run_payloads_mask_passwords() {
        let data = "userName,domain,newPassword,passwordOption\nalice,LDAP,Secret#1,create-password\n,primary,,\n";
        let rows = read_bytes(data.as_bytes(), SourceFormat::Csv).unwrap();
        let (payloads, issues) = payloads::<UserImportRow>(&rows).unwrap();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].1["userName"], "LDAP/alice");
        assert_eq!(payloads[0].1["password"], "****");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].row, 3);
    }

    #[test]
    fn report_total() {
        let report = ImportReport {
            created: vec!["a".to_string(), "b".to_string()],
            skipped: vec![RowIssue {
                row: 4,
                column: "roleName".to_string(),
                message: "missing".to_string(),
            }],
            ..ImportReport::default()
        };
        assert_eq!(report.total(), 3);
    }
}
