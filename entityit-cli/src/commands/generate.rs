use super::{report_diagnostics, Overrides};
use anyhow::{Context, Result};
use entityit_core::config::EntityItConfig;
use entityit_core::inspector::SourceInspector;
use entityit_core::render::{FsRenderer, MemoryRenderer};
use entityit_core::{EntityProcessor, ProcessReport};

pub fn run(overrides: &Overrides, dry_run: bool) -> Result<()> {
    let config = overrides.load_and_init()?;
    let report = generate(&config, dry_run)?;

    println!(
        "{} {} entities ({} files)",
        if dry_run { "Planned" } else { "Generated" },
        report.generated.len(),
        report.generated_files()
    );
    report_diagnostics(&report)
}

pub fn generate(config: &EntityItConfig, dry_run: bool) -> Result<ProcessReport> {
    let src_dir = &config.output.src_dir;
    let inspector = SourceInspector::from_dir(src_dir)
        .with_context(|| format!("Failed to inspect {}", src_dir.display()))?;
    let processor = EntityProcessor::new(config.generator.clone());

    if dry_run {
        let mut renderer = MemoryRenderer::new();
        let report = processor.process(&inspector, &mut renderer)?;
        for path in renderer.files().keys() {
            println!("  would write {}", config.output.out_dir.join(path).display());
        }
        return Ok(report);
    }

    let mut renderer = FsRenderer::new(&config.output.out_dir)
        .with_module_index(config.output.module_index)
        .with_rustfmt(config.output.rustfmt);
    let report = processor
        .process(&inspector, &mut renderer)
        .with_context(|| format!("Failed to write into {}", config.output.out_dir.display()))?;
    log::debug!("Wrote {} files", renderer.written().len());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    const MODEL: &str = r#"
        #[derive(entityit_macros::Entity)]
        pub struct User {
            #[entity(not_null)]
            id: Option<String>,
            age: u32,
        }

        #[derive(entityit_macros::Entity)]
        pub struct Session {
            handle: std::fs::File,
        }
    "#;

    fn project(root: &Path) -> EntityItConfig {
        let src = root.join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("lib.rs"), "pub mod model;\n").unwrap();
        fs::write(src.join("model.rs"), MODEL).unwrap();

        let mut config = EntityItConfig::default();
        config.output.src_dir = src.clone();
        config.output.out_dir = src;
        config
    }

    #[test]
    fn generate_writes_entities_and_reports_failures() {
        let tmp = tempfile::tempdir().unwrap();
        let config = project(tmp.path());

        let report = generate(&config, false).unwrap();
        assert_eq!(report.generated.len(), 1);
        assert_eq!(report.diagnostics.len(), 1);
        assert!(report_diagnostics(&report).is_err());

        let entity = fs::read_to_string(tmp.path().join("src/model/entity/user_entity.rs")).unwrap();
        assert!(entity.contains("UserEntity"));
        assert!(tmp.path().join("src/model/entity/mod.rs").exists());
        assert!(!tmp.path().join("src/model/entity/session_entity.rs").exists());
    }

    #[test]
    fn dry_run_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let config = project(tmp.path());

        let report = generate(&config, true).unwrap();
        assert_eq!(report.generated.len(), 1);
        assert!(!tmp.path().join("src/model/entity").exists());
    }

    #[test]
    fn missing_source_dir_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = EntityItConfig::default();
        config.output.src_dir = tmp.path().join("nowhere");
        let err = generate(&config, true).unwrap_err();
        assert!(format!("{err:#}").contains("nowhere"));
    }
}
