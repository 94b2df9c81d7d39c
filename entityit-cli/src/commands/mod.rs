pub mod check;
pub mod generate;

use anyhow::{bail, Result};
use entityit_core::config::{EntityItConfig, CONFIG_FILE};
use entityit_core::logging::init_logging;
use entityit_core::ProcessReport;
use std::path::PathBuf;

/// Command-line values that take priority over the config chain.
#[derive(Debug, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub src: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub rustfmt: bool,
}

impl Overrides {
    /// Defaults, config file, environment, then flags.
    pub fn load(&self) -> Result<EntityItConfig> {
        let mut config = match &self.config {
            Some(path) if !path.exists() => bail!("config file {} not found", path.display()),
            Some(path) => EntityItConfig::load_from(path)?,
            None => EntityItConfig::load_from(CONFIG_FILE)?,
        };

        if let Some(src) = &self.src {
            config.output.src_dir = src.clone();
            // Generated modules live next to their declarations unless told otherwise.
            if self.out.is_none() {
                config.output.out_dir = src.clone();
            }
        }
        if let Some(out) = &self.out {
            config.output.out_dir = out.clone();
        }
        if self.rustfmt {
            config.output.rustfmt = true;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn load_and_init(&self) -> Result<EntityItConfig> {
        let config = self.load()?;
        init_logging(&config.logging)?;
        Ok(config)
    }
}

/// Print every diagnostic and fail when there is at least one.
pub fn report_diagnostics(report: &ProcessReport) -> Result<()> {
    for diagnostic in &report.diagnostics {
        eprintln!("  {}", diagnostic);
    }
    if !report.is_success() {
        bail!("{} declaration(s) could not be generated", report.diagnostics.len());
    }
    Ok(())
}
