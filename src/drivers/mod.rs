//! Driver package staging
//!
//! Staging runs a fixed sequence of gates. The first failing gate stops the
//! run with its own error:
//!
//! 1. source path exists and holds at least one `.inf` file
//! 2. model package folder exists
//! 3. version folder is absent (created) or empty
//! 4. marker files placed across the source tree
//! 5. no package and no category with the target name on the site
//! 6. package and category created, drivers imported
//! 7. content distributed (failure here is reported, not fatal)

pub mod marker;
pub mod model;
pub mod naming;

pub use marker::MarkerReport;
pub use model::DriverModel;
pub use naming::{StagingPlan, VersionLabel};

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{self, Result, WinstageError};
use crate::event_log::EventLog;
use crate::hash;
use crate::platform::{CategoryRef, ImportRequest, ManagementClient, PackageRef};

/// Extension of the driver descriptor files the platform imports
pub const DRIVER_DESCRIPTOR_EXTENSION: &str = "inf";

/// Result of a completed staging run
#[derive(Debug, Clone)]
pub struct StageReport {
    pub version_folder_created: bool,
    pub driver_files: usize,
    pub markers: MarkerReport,
    pub package: PackageRef,
    pub category: CategoryRef,
    /// Set when distribution failed; the package itself is complete
    pub distribution_error: Option<String>,
}

/// Count `.inf` files anywhere under `source` (extension compared case-insensitively)
pub fn count_driver_files(source: &Path) -> Result<usize> {
    let mut count = 0;
    for entry in WalkDir::new(source) {
        let entry = entry?;
        let is_descriptor = entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(DRIVER_DESCRIPTOR_EXTENSION));
        if is_descriptor {
            count += 1;
        }
    }
    Ok(count)
}

/// Gate 1: source path exists and contains driver files
fn check_source(plan: &StagingPlan) -> Result<usize> {
    if !plan.source_path.is_dir() {
        return Err(error::drivers::source_missing(
            plan.source_path.display().to_string(),
        ));
    }

    let driver_files = count_driver_files(&plan.source_path)?;
    if driver_files == 0 {
        return Err(error::drivers::no_driver_files(
            plan.source_path.display().to_string(),
        ));
    }
    Ok(driver_files)
}

/// Gates 2 and 3: model folder exists; version folder absent or empty
///
/// Returns whether the version folder was created.
fn prepare_destination(plan: &StagingPlan) -> Result<bool> {
    if !plan.model_folder.is_dir() {
        return Err(error::drivers::package_folder_missing(
            plan.model_folder.display().to_string(),
        ));
    }

    if plan.version_folder.exists() {
        let occupied = !plan.version_folder.is_dir()
            || fs::read_dir(&plan.version_folder)?.next().is_some();
        if occupied {
            return Err(error::drivers::version_folder_not_empty(
                plan.version_folder.display().to_string(),
            ));
        }
        return Ok(false);
    }

    fs::create_dir(&plan.version_folder).map_err(|e| {
        error::fs::write_failed(plan.version_folder.display().to_string(), e.to_string())
    })?;
    Ok(true)
}

/// Fingerprint the source tree for the event log
///
/// Never a gate: a tree that cannot be hashed is logged and staging goes on.
fn fingerprint(path: &Path, log: &mut EventLog) -> Option<String> {
    match hash::hash_directory(path) {
        Ok(digest) => Some(digest),
        Err(e) => {
            warn!("Failed to fingerprint {}: {}", path.display(), e);
            log.warn(format!("Fingerprint of {} unavailable: {e}", path.display()));
            None
        }
    }
}

/// Run every staging gate in order
///
/// `connect` is only invoked once all file system gates have passed.
pub fn stage<C, F>(
    plan: &StagingPlan,
    connect: F,
    distribution_target: &str,
    log: &mut EventLog,
) -> Result<StageReport>
where
    C: ManagementClient,
    F: FnOnce() -> Result<C>,
{
    log.info(format!(
        "Staging {} from {}",
        plan.package_name,
        plan.source_path.display()
    ));

    let result = run_gates(plan, connect, distribution_target, log);
    if let Err(e) = &result {
        log.error(format!("Staging {} halted: {}", plan.package_name, e));
    }
    result
}

fn run_gates<C, F>(
    plan: &StagingPlan,
    connect: F,
    distribution_target: &str,
    log: &mut EventLog,
) -> Result<StageReport>
where
    C: ManagementClient,
    F: FnOnce() -> Result<C>,
{
    let driver_files = check_source(plan)?;
    log.info(format!("Found {driver_files} driver file(s)"));

    let version_folder_created = prepare_destination(plan)?;
    if version_folder_created {
        log.info(format!("Created {}", plan.version_folder.display()));
    }

    let before = fingerprint(&plan.source_path, log);
    let markers = marker::place_markers(
        &plan.source_path,
        &plan.marker_file_name,
        &plan.marker_content(),
    )?;
    let after = fingerprint(&plan.source_path, log);
    let unavailable = || "unavailable".to_string();
    let (before, after) = (
        before.unwrap_or_else(unavailable),
        after.unwrap_or_else(unavailable),
    );
    debug!("Source fingerprint {} -> {}", before, after);
    log.info(format!(
        "Marker {} placed in {} subfolder(s); fingerprint {} -> {}",
        plan.marker_file_name, markers.copies, before, after
    ));

    let mut client = connect()?;

    if client.find_package(&plan.package_name)?.is_some() {
        return Err(error::platform::package_exists(&plan.package_name));
    }
    if client.find_category(&plan.category_name)?.is_some() {
        return Err(error::platform::category_exists(&plan.category_name));
    }

    let package = client.create_package(&plan.package_name, &plan.version_folder)?;
    info!("Created package {} ({})", package.name, package.id);
    log.info(format!("Created package {} ({})", package.name, package.id));

    let category = client.create_category(&plan.category_name)?;
    log.info(format!("Created category {}", category.name));

    let request = ImportRequest {
        source: &plan.source_path,
        package: &package,
        category: &category,
        enable_and_allow_install: true,
        update_distribution_points: false,
    };
    client
        .import_drivers(&request)
        .map_err(|e| WinstageError::ImportFailed {
            package: package.name.clone(),
            category: category.name.clone(),
            reason: e.to_string(),
        })?;
    log.info(format!("Imported drivers into {}", package.name));

    let distribution_error = match client.distribute(&package, distribution_target) {
        Ok(()) => {
            log.info(format!("Distribution to '{distribution_target}' started"));
            None
        }
        Err(e) => {
            warn!("Distribution failed: {}", e);
            log.warn(format!(
                "Distribution to '{distribution_target}' failed: {e}. Distribute the package manually"
            ));
            Some(e.to_string())
        }
    };

    Ok(StageReport {
        version_folder_created,
        driver_files,
        markers,
        package,
        category,
        distribution_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// In-memory platform recording every call
    #[derive(Default)]
    struct RecordingClient {
        calls: Vec<String>,
        packages: Vec<String>,
        categories: Vec<String>,
        fail_import: bool,
        fail_distribute: bool,
    }

    impl ManagementClient for RecordingClient {
        fn find_package(&mut self, name: &str) -> Result<Option<PackageRef>> {
            self.calls.push(format!("find_package {name}"));
            Ok(self.packages.iter().find(|p| *p == name).map(|p| PackageRef {
                id: "P0100001".to_string(),
                name: p.clone(),
            }))
        }

        fn find_category(&mut self, name: &str) -> Result<Option<CategoryRef>> {
            self.calls.push(format!("find_category {name}"));
            Ok(self
                .categories
                .iter()
                .find(|c| *c == name)
                .map(|c| CategoryRef {
                    id: "DriverCategories:1".to_string(),
                    name: c.clone(),
                }))
        }

        fn create_package(&mut self, name: &str, content_path: &Path) -> Result<PackageRef> {
            self.calls
                .push(format!("create_package {name} {}", content_path.display()));
            self.packages.push(name.to_string());
            Ok(PackageRef {
                id: "P0100123".to_string(),
                name: name.to_string(),
            })
        }

        fn create_category(&mut self, name: &str) -> Result<CategoryRef> {
            self.calls.push(format!("create_category {name}"));
            self.categories.push(name.to_string());
            Ok(CategoryRef {
                id: "DriverCategories:2".to_string(),
                name: name.to_string(),
            })
        }

        fn import_drivers(&mut self, request: &ImportRequest<'_>) -> Result<()> {
            self.calls.push(format!(
                "import_drivers {} enable={} update_dps={}",
                request.package.id,
                request.enable_and_allow_install,
                request.update_distribution_points
            ));
            if self.fail_import {
                return Err(error::platform::command_failed("import drivers", "boom"));
            }
            Ok(())
        }

        fn distribute(&mut self, package: &PackageRef, target: &str) -> Result<()> {
            self.calls.push(format!("distribute {} {target}", package.id));
            if self.fail_distribute {
                return Err(error::platform::command_failed("distribute content", "offline"));
            }
            Ok(())
        }
    }

    struct Fixture {
        _temp: TempDir,
        source_root: PathBuf,
        package_root: PathBuf,
    }

    impl Fixture {
        /// Source with one `.inf`, model folder present, no version folder
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let source_root = temp.path().join("Source");
            let package_root = temp.path().join("Packages");
            let source = source_root.join("Latitude 7480").join("1909_2020-03");
            fs::create_dir_all(source.join("chipset")).unwrap();
            fs::write(source.join("chipset").join("chipset.inf"), "[Version]").unwrap();
            fs::create_dir_all(package_root.join("Latitude 7480")).unwrap();
            Self {
                _temp: temp,
                source_root,
                package_root,
            }
        }

        fn plan(&self) -> StagingPlan {
            StagingPlan::resolve(
                DriverModel::Latitude7480,
                "1909_2020-03".parse().unwrap(),
                &self.source_root,
                &self.package_root,
            )
        }
    }

    /// Stage and assert the platform was never contacted
    fn stage_offline(plan: &StagingPlan) -> Result<StageReport> {
        let mut log = EventLog::disabled();
        let mut connected = false;
        let result = stage(
            plan,
            || {
                connected = true;
                Ok(RecordingClient::default())
            },
            "All Distribution Points",
            &mut log,
        );
        assert!(!connected, "platform contacted before file gates passed");
        result
    }

    /// Stage with a client whose calls can be inspected afterwards
    fn stage_with(plan: &StagingPlan, client: &mut RecordingClient) -> Result<StageReport> {
        let mut log = EventLog::disabled();
        stage(plan, move || Ok(client), "All Distribution Points", &mut log)
    }

    #[test]
    fn test_latitude_7480_scenario() {
        let fixture = Fixture::new();
        let plan = fixture.plan();
        let mut client = RecordingClient::default();

        let report = stage_with(&plan, &mut client).unwrap();

        assert!(report.version_folder_created);
        assert!(plan.version_folder.is_dir());
        assert_eq!(report.driver_files, 1);
        assert!(report.markers.created);
        assert!(plan.source_path.join(&plan.marker_file_name).is_file());
        assert!(
            plan.source_path
                .join("chipset")
                .join(&plan.marker_file_name)
                .is_file()
        );
        assert_eq!(report.package.name, "Latitude 7480 - 2020-03");
        assert_eq!(report.category.name, "Latitude 7480 - 2020-03");
        assert!(report.distribution_error.is_none());
        assert_eq!(
            client.calls,
            vec![
                "find_package Latitude 7480 - 2020-03".to_string(),
                "find_category Latitude 7480 - 2020-03".to_string(),
                format!(
                    "create_package Latitude 7480 - 2020-03 {}",
                    plan.version_folder.display()
                ),
                "create_category Latitude 7480 - 2020-03".to_string(),
                "import_drivers P0100123 enable=true update_dps=false".to_string(),
                "distribute P0100123 All Distribution Points".to_string(),
            ]
        );
    }

    #[test]
    fn test_non_empty_version_folder_halts_before_platform() {
        let fixture = Fixture::new();
        let plan = fixture.plan();
        fs::create_dir_all(plan.version_folder.join("x64")).unwrap();

        let result = stage_offline(&plan);

        assert!(matches!(
            result,
            Err(WinstageError::VersionFolderNotEmpty { .. })
        ));
        assert!(!plan.source_path.join(&plan.marker_file_name).exists());
    }

    #[test]
    fn test_version_path_that_is_a_file_halts() {
        let fixture = Fixture::new();
        let plan = fixture.plan();
        fs::write(&plan.version_folder, "not a folder").unwrap();

        let result = stage_offline(&plan);

        assert!(matches!(
            result,
            Err(WinstageError::VersionFolderNotEmpty { .. })
        ));
    }

    #[test]
    fn test_unreadable_tree_leaves_fingerprint_unavailable() {
        let temp = TempDir::new().unwrap();
        let log_path = temp.path().join("stage.log");
        let mut log = EventLog::open(&log_path).unwrap();

        let digest = fingerprint(&temp.path().join("missing"), &mut log);

        assert!(digest.is_none());
        let content = fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("[WARN] Fingerprint of"));
        assert!(content.contains("unavailable"));
    }

    #[test]
    fn test_empty_existing_version_folder_is_accepted() {
        let fixture = Fixture::new();
        let plan = fixture.plan();
        fs::create_dir_all(&plan.version_folder).unwrap();

        let mut client = RecordingClient::default();
        let report = stage_with(&plan, &mut client).unwrap();
        assert!(!report.version_folder_created);
    }

    #[test]
    fn test_missing_source_path() {
        let fixture = Fixture::new();
        let plan = StagingPlan::resolve(
            DriverModel::Latitude7480,
            "1909_2021-01".parse().unwrap(),
            &fixture.source_root,
            &fixture.package_root,
        );

        let result = stage_offline(&plan);
        assert!(matches!(result, Err(WinstageError::SourcePathMissing { .. })));
    }

    #[test]
    fn test_source_without_driver_files() {
        let fixture = Fixture::new();
        let plan = fixture.plan();
        fs::remove_file(plan.source_path.join("chipset").join("chipset.inf")).unwrap();
        fs::write(plan.source_path.join("readme.txt"), "no drivers").unwrap();

        let result = stage_offline(&plan);
        assert!(matches!(result, Err(WinstageError::NoDriverFiles { .. })));
        assert!(!plan.version_folder.exists());
    }

    #[test]
    fn test_uppercase_inf_extension_counts() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("NET.INF"), "[Version]").unwrap();
        assert_eq!(count_driver_files(temp.path()).unwrap(), 1);
    }

    #[test]
    fn test_missing_model_folder() {
        let fixture = Fixture::new();
        let plan = fixture.plan();
        fs::remove_dir(&plan.model_folder).unwrap();

        let result = stage_offline(&plan);
        assert!(matches!(
            result,
            Err(WinstageError::PackageFolderMissing { .. })
        ));
    }

    #[test]
    fn test_existing_package_halts() {
        let fixture = Fixture::new();
        let plan = fixture.plan();
        let mut client = RecordingClient {
            packages: vec!["Latitude 7480 - 2020-03".to_string()],
            ..Default::default()
        };

        let result = stage_with(&plan, &mut client);
        assert!(matches!(result, Err(WinstageError::PackageExists { .. })));
        assert_eq!(client.calls, vec!["find_package Latitude 7480 - 2020-03"]);
    }

    #[test]
    fn test_existing_category_halts() {
        let fixture = Fixture::new();
        let plan = fixture.plan();
        let mut client = RecordingClient {
            categories: vec!["Latitude 7480 - 2020-03".to_string()],
            ..Default::default()
        };

        let result = stage_with(&plan, &mut client);
        assert!(matches!(result, Err(WinstageError::CategoryExists { .. })));
        assert!(!client.calls.iter().any(|c| c.starts_with("create_")));
    }

    #[test]
    fn test_import_failure_is_fatal_without_rollback() {
        let fixture = Fixture::new();
        let plan = fixture.plan();
        let mut client = RecordingClient {
            fail_import: true,
            ..Default::default()
        };

        let result = stage_with(&plan, &mut client);
        match result {
            Err(WinstageError::ImportFailed {
                package, category, ..
            }) => {
                assert_eq!(package, "Latitude 7480 - 2020-03");
                assert_eq!(category, "Latitude 7480 - 2020-03");
            }
            other => panic!("Expected ImportFailed, got {other:?}"),
        }
        assert_eq!(client.packages, vec!["Latitude 7480 - 2020-03"]);
        assert!(!client.calls.iter().any(|c| c.starts_with("distribute")));
    }

    #[test]
    fn test_distribution_failure_is_not_fatal() {
        let fixture = Fixture::new();
        let plan = fixture.plan();
        let mut client = RecordingClient {
            fail_distribute: true,
            ..Default::default()
        };

        let report = stage_with(&plan, &mut client).unwrap();
        assert!(report.distribution_error.is_some());
    }

    #[test]
    fn test_connect_failure_stops_after_file_gates() {
        let fixture = Fixture::new();
        let plan = fixture.plan();
        let mut log = EventLog::disabled();

        let result = stage::<RecordingClient, _>(
            &plan,
            || Err(error::platform::connect_failed("P01", "no console")),
            "All Distribution Points",
            &mut log,
        );

        assert!(matches!(result, Err(WinstageError::ConnectFailed { .. })));
        assert!(plan.version_folder.is_dir());
    }

    #[test]
    fn test_halt_is_written_to_event_log() {
        let fixture = Fixture::new();
        let plan = fixture.plan();
        fs::remove_dir(&plan.model_folder).unwrap();
        let log_path = fixture.package_root.join("stage.log");
        let mut log = EventLog::open(&log_path).unwrap();

        let result = stage(
            &plan,
            || Ok(RecordingClient::default()),
            "All Distribution Points",
            &mut log,
        );
        assert!(result.is_err());

        let content = fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("[ERROR] Staging Latitude 7480 - 2020-03 halted"));
    }
}
