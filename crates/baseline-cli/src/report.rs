//! Minimal stdout rendering of a run: one line per violation, or JSON.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use baseline_analysis::{RunSummary, ViolationRecord};
use baseline_core::errors::{BaselineErrorCode, PipelineResult};
use baseline_core::types::policy::CompliancePolicy;

#[derive(Serialize)]
struct JsonReport<'a> {
    policy: String,
    violations: &'a [ViolationRecord],
    summary: &'a RunSummary,
    errors: Vec<String>,
}

pub fn write_text(
    out: &mut impl Write,
    result: &PipelineResult<Vec<ViolationRecord>>,
    summary: &RunSummary,
) -> Result<()> {
    for violation in &result.data {
        writeln!(out, "{violation}")?;
    }
    for error in &result.errors {
        writeln!(out, "skipped: {}", error.tagged())?;
    }
    writeln!(out, "{summary}")?;
    Ok(())
}

pub fn write_json(
    out: &mut impl Write,
    policy: &CompliancePolicy,
    result: &PipelineResult<Vec<ViolationRecord>>,
    summary: &RunSummary,
) -> Result<()> {
    let report = JsonReport {
        policy: policy.to_string(),
        violations: &result.data,
        summary,
        errors: result.errors.iter().map(|e| e.tagged()).collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}
