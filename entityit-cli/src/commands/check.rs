use super::{report_diagnostics, Overrides};
use anyhow::Result;
use entityit_core::config::EntityItConfig;
use entityit_core::ProcessReport;

pub fn run(overrides: &Overrides) -> Result<()> {
    let config = overrides.load_and_init()?;
    let report = check(&config)?;
    println!("Checked {} declarations", report.generated.len() + report.diagnostics.len());
    report_diagnostics(&report)
}

/// Plan and render every declaration in memory.
pub fn check(config: &EntityItConfig) -> Result<ProcessReport> {
    super::generate::generate(config, true)
}
