//! Driver package command implementation
//!
//! Resolves the site settings from the command line and `winstage.yaml`,
//! then hands the staging plan to [`crate::drivers::stage`]. The platform
//! connection is only opened once the file system gates have passed.

use std::path::PathBuf;

use console::Style;
use tracing::debug;

use crate::cli::DriverPackageArgs;
use crate::config::{self, Config};
use crate::drivers::{self, StagingPlan, VersionLabel};
use crate::error::{self, Result};
use crate::event_log::EventLog;
use crate::platform::PowerShellClient;
use crate::ui;

/// Settings the stager cannot run without
#[derive(Debug, Clone, PartialEq, Eq)]
struct SiteSettings {
    source_root: PathBuf,
    package_root: PathBuf,
    site_code: String,
    distribution_point_group: String,
    log_file: Option<PathBuf>,
}

impl SiteSettings {
    /// Merge command line overrides over the config file
    fn resolve(args: &DriverPackageArgs, config: &Config) -> Result<Self> {
        let source_root = args
            .source_root
            .clone()
            .or_else(|| config.drivers.source_root.clone())
            .ok_or_else(|| missing("drivers.source_root", "--source-root"))?;
        let package_root = args
            .package_root
            .clone()
            .or_else(|| config.drivers.package_root.clone())
            .ok_or_else(|| missing("drivers.package_root", "--package-root"))?;
        let site_code = args
            .site_code
            .clone()
            .or_else(|| config.platform.site_code.clone())
            .filter(|code| !code.trim().is_empty())
            .ok_or_else(|| missing("platform.site_code", "--site-code"))?;
        let distribution_point_group = args
            .distribution_point_group
            .clone()
            .or_else(|| config.drivers.distribution_point_group.clone())
            .filter(|group| !group.trim().is_empty())
            .ok_or_else(|| {
                missing(
                    "drivers.distribution_point_group",
                    "--distribution-point-group",
                )
            })?;

        Ok(Self {
            source_root,
            package_root,
            site_code,
            distribution_point_group,
            log_file: args
                .log_file
                .clone()
                .or_else(|| config.drivers.log_file.clone()),
        })
    }
}

fn missing(key: &str, flag: &str) -> error::WinstageError {
    error::config::invalid(format!("{key} is not set (use {flag})"))
}

/// Run driver-package command
pub fn run(config_path: Option<PathBuf>, args: DriverPackageArgs) -> Result<()> {
    let version: VersionLabel = args.version.parse()?;
    let config = config::load_config(config_path.as_deref())?;
    let settings = SiteSettings::resolve(&args, &config)?;

    let plan = StagingPlan::resolve(
        args.model,
        version,
        &settings.source_root,
        &settings.package_root,
    );
    debug!("Staging plan: {:?}", plan);

    println!(
        "{} {}",
        Style::new().bold().apply_to("Staging"),
        Style::new().bold().yellow().apply_to(plan.description())
    );

    let mut log = EventLog::open_optional(settings.log_file.as_deref())?;
    let powershell = config.powershell().to_string();
    let module_path = config.platform.module_path.clone();
    let site_code = settings.site_code.clone();

    let report = drivers::stage(
        &plan,
        move || PowerShellClient::connect(powershell, site_code, module_path),
        &settings.distribution_point_group,
        &mut log,
    )?;

    ui::display_stage_report(&plan, &report, &settings.distribution_point_group);
    Ok(())
}
