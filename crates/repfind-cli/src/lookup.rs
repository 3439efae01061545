//! The lookup run: source -> concurrent registry search -> writers.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use repfind_client::config::list_field_cap;
use repfind_client::{RegistryClient, RegistryConfig};

use crate::{report, source};

/// Arguments for a lookup run.
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Comma-separated list of INNs to look up.
    #[arg(short = 'i', long = "inn", value_name = "LIST", conflicts_with = "workbook")]
    pub inn: Option<String>,

    /// Path to the source XLSX workbook holding the INNs.
    #[arg(short = 'x', long, value_name = "PATH", requires = "range")]
    pub workbook: Option<PathBuf>,

    /// Worksheet name (defaults to the first sheet).
    #[arg(short, long, value_name = "NAME", requires = "workbook")]
    pub sheet: Option<String>,

    /// A1-style range holding the INN column, e.g. A1:A100.
    #[arg(short, long, value_name = "RANGE", requires = "workbook")]
    pub range: Option<String>,

    /// Write results into the source workbook, this many columns to the
    /// right of each INN cell.
    #[arg(long, value_name = "COLS", requires = "workbook")]
    pub offset: Option<u32>,

    /// Keep at most N phone numbers and e-mail addresses per company
    /// (non-positive means unlimited).
    #[arg(short, long, value_name = "N")]
    pub max: Option<i64>,

    /// Path for CSV output (with header).
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

/// Execute a lookup run.
///
/// Returns the process exit code: 0 on success. Aggregate problems
/// (no identifiers, no matches at all) are errors; a lookup that merely
/// missed some identifiers is not.
pub async fn run_lookup(args: &LookupArgs) -> Result<u8> {
    let plan = source::resolve(args)?;
    if plan.identifiers.is_empty() {
        bail!("the identifier list is empty");
    }
    tracing::info!(count = plan.identifiers.len(), "collected identifiers");

    let mut config = RegistryConfig::from_env().context("registry configuration")?;
    if let Some(max) = args.max {
        config.max_list_fields = list_field_cap(max);
    }

    let client = RegistryClient::new(config)?;
    let results = client.search_batch(&plan.identifiers).await;

    let found = results.iter().flatten().count();
    if found == 0 {
        bail!(
            "none of the {} identifiers matched a registered company",
            results.len()
        );
    }

    if let Some(offset) = args.offset {
        let workbook = plan
            .workbook
            .as_ref()
            .context("--offset needs a workbook source")?;
        let written = report::write_workbook(workbook, offset, &results)
            .with_context(|| format!("writing results into {}", workbook.path.display()))?;
        println!("Workbook updated: {} ({written} rows)", workbook.path.display());
    }

    if let Some(out) = &args.out {
        let written = report::write_csv(out, &results)
            .with_context(|| format!("writing results to {}", out.display()))?;
        println!("CSV written: {} ({written} rows)", out.display());
    }

    println!("Matched {found} of {} companies", results.len());
    Ok(0)
}
