use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{info, info_span, trace};

use triage_ingest::read_customer_csv;
use triage_model::{MissingValuePolicy, PipelineOptions};
use triage_query::{CRITICAL_EXPORT_FILE, export_critical_csv};
use triage_report::{build_customer_insights, build_health_insights};
use triage_transform::enrich_customers;

use triage_cli::logging::redact_value;
use triage_cli::pipeline::RegistrySession;

use crate::cli::{CustomersArgs, HealthArgs, InputPolicyArgs, RegistryArgs};
use crate::types::{CustomerRun, HealthRun, RegistryRun, StageCounts};

pub fn run_customers(args: &CustomersArgs) -> Result<CustomerRun> {
    let span = info_span!("customers", source = %args.csv.display());
    let _guard = span.enter();
    let start = Instant::now();

    let options = PipelineOptions::new().with_as_of(args.as_of);
    let as_of = options
        .as_of
        .unwrap_or_else(|| Local::now().date_naive());
    let records = read_customer_csv(&args.csv)
        .with_context(|| format!("load customers from {}", args.csv.display()))?;
    let records = enrich_customers(records);
    let insights = build_customer_insights(&records, as_of);
    info!(
        records = insights.total,
        %as_of,
        duration_ms = start.elapsed().as_millis(),
        "customer insights complete"
    );
    Ok(CustomerRun {
        source: args.csv.clone(),
        insights,
    })
}

pub fn run_health(args: &HealthArgs) -> Result<HealthRun> {
    let span = info_span!("health", source = %args.csv.display());
    let _guard = span.enter();

    let options = pipeline_options(&args.inputs)
        .with_histogram_bins(args.bins)
        .with_preview_rows(args.preview_rows);
    let mut session = open_session(&args.csv, options)?;
    let sanitize = session.sanitize().context("sanitize blood pressure")?;
    let classify = session.classify().context("classify risk")?;
    let insights = build_health_insights(
        session.records(),
        session.options().histogram_bins,
        session.options().preview_rows,
    );
    Ok(HealthRun {
        source: args.csv.clone(),
        stages: StageCounts::new(session.records().len(), sanitize, classify),
        insights,
    })
}

pub fn run_registry(args: &RegistryArgs) -> Result<RegistryRun> {
    let span = info_span!("registry", source = %args.csv.display());
    let _guard = span.enter();
    let start = Instant::now();

    let mut session = open_session(&args.csv, pipeline_options(&args.inputs))?;
    session.process().context("process health registry")?;
    let demographics = session.demographics().context("demographics query")?;
    let critical = session.critical().context("critical export query")?;
    for row in critical.rows() {
        trace!(patient_id = %redact_value(&row.patient_id), "critical patient");
    }

    let export = if args.dry_run {
        info!("dry run: export skipped");
        None
    } else {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| default_export_path(&args.csv));
        export_critical_csv(&critical, &path)
            .with_context(|| format!("write {}", path.display()))?;
        Some(path)
    };

    let stages = StageCounts::new(
        session.records().len(),
        session.sanitize_report().unwrap_or_default(),
        session.classify_report().unwrap_or_default(),
    );
    info!(
        records = stages.records,
        critical = critical.len(),
        duration_ms = start.elapsed().as_millis(),
        "registry pipeline complete"
    );
    Ok(RegistryRun {
        source: args.csv.clone(),
        stage: session.stage(),
        stages,
        demographics,
        critical: critical.rows().to_vec(),
        export,
    })
}

fn pipeline_options(inputs: &InputPolicyArgs) -> PipelineOptions {
    let policy = if inputs.strict_inputs {
        MissingValuePolicy::Reject
    } else {
        MissingValuePolicy::Unknown
    };
    PipelineOptions::new().with_missing_values(policy)
}

fn open_session(path: &Path, options: PipelineOptions) -> Result<RegistrySession> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let source_name = path.display().to_string();
    RegistrySession::upload(&source_name, &bytes, options)
        .with_context(|| format!("load patients from {source_name}"))
}

/// `critical_patients.csv` in the directory of the input file.
fn default_export_path(input: &Path) -> PathBuf {
    input
        .parent()
        .map_or_else(|| PathBuf::from(CRITICAL_EXPORT_FILE), |dir| dir.join(CRITICAL_EXPORT_FILE))
}
