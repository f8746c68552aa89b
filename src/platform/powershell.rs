//! Configuration Manager client driven through PowerShell
//!
//! Each operation runs one `powershell -NoProfile -NonInteractive -Command`
//! invocation. The script starts with a prelude that loads the
//! ConfigurationManager module and switches to the site drive, so no session
//! state is kept between calls.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::{CategoryRef, ImportRequest, ManagementClient, PackageRef};
use crate::error::{self, Result};

const PACKAGE_FIELDS: &str = "Select-Object PackageID, Name | ConvertTo-Json -Compress";
const CATEGORY_FIELDS: &str =
    "Select-Object CategoryInstance_UniqueID, LocalizedCategoryInstanceName | ConvertTo-Json -Compress";

/// Quote a string as a PowerShell single-quoted literal
///
/// PowerShell treats the typographic single quotes as delimiters too, so
/// every one of them is doubled.
pub fn ps_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        if is_single_quote(c) {
            quoted.push(c);
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

fn is_single_quote(c: char) -> bool {
    matches!(c, '\'' | '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}')
}

fn ps_bool(value: bool) -> &'static str {
    if value { "$true" } else { "$false" }
}

/// Client for one Configuration Manager site
#[derive(Debug, Clone)]
pub struct PowerShellClient {
    program: String,
    site_code: String,
    module_path: Option<PathBuf>,
}

impl PowerShellClient {
    /// Create a client and check that the site drive is reachable
    pub fn connect(
        program: impl Into<String>,
        site_code: impl Into<String>,
        module_path: Option<PathBuf>,
    ) -> Result<Self> {
        let client = Self {
            program: program.into(),
            site_code: site_code.into(),
            module_path,
        };

        client
            .run("connect", "Get-CMSite | Out-Null")
            .map_err(|e| error::platform::connect_failed(&client.site_code, e.to_string()))?;

        debug!("Connected to site {}", client.site_code);
        Ok(client)
    }

    fn prelude(&self) -> String {
        let module = match &self.module_path {
            Some(path) => ps_quote(&path.display().to_string()),
            None => "(Join-Path (Split-Path $env:SMS_ADMIN_UI_PATH -Parent) 'ConfigurationManager.psd1')"
                .to_string(),
        };
        format!(
            "$ErrorActionPreference = 'Stop'; Import-Module {module}; Set-Location {}",
            ps_quote(&format!("{}:", self.site_code))
        )
    }

    fn run(&self, operation: &str, script: &str) -> Result<String> {
        let full = format!("{}; {}", self.prelude(), script);
        debug!("{} ({}): {}", operation, self.program, script);

        let output = Command::new(&self.program)
            .args(["-NoProfile", "-NonInteractive", "-Command", &full])
            .output()
            .map_err(|e| error::platform::command_failed(operation, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(error::platform::command_failed(
                operation,
                format!(
                    "exit code {}: {}",
                    output.status.code().unwrap_or(-1),
                    detail
                ),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn create<T: DeserializeOwned>(&self, operation: &str, script: &str) -> Result<T> {
        let stdout = self.run(operation, script)?;
        parse_single(&stdout)?.ok_or_else(|| {
            error::platform::command_failed(operation, "no object returned by the platform")
        })
    }
}

impl ManagementClient for PowerShellClient {
    fn find_package(&mut self, name: &str) -> Result<Option<PackageRef>> {
        let stdout = self.run("find package", &find_package_script(name))?;
        parse_single(&stdout)
    }

    fn find_category(&mut self, name: &str) -> Result<Option<CategoryRef>> {
        let stdout = self.run("find category", &find_category_script(name))?;
        parse_single(&stdout)
    }

    fn create_package(&mut self, name: &str, content_path: &Path) -> Result<PackageRef> {
        self.create("create package", &create_package_script(name, content_path))
    }

    fn create_category(&mut self, name: &str) -> Result<CategoryRef> {
        self.create("create category", &create_category_script(name))
    }

    fn import_drivers(&mut self, request: &ImportRequest<'_>) -> Result<()> {
        self.run("import drivers", &import_script(request))
            .map(|_| ())
    }

    fn distribute(&mut self, package: &PackageRef, target: &str) -> Result<()> {
        self.run("distribute content", &distribute_script(package, target))
            .map(|_| ())
    }
}

pub fn find_package_script(name: &str) -> String {
    format!(
        "Get-CMDriverPackage -Name {} -Fast | {PACKAGE_FIELDS}",
        ps_quote(name)
    )
}

pub fn find_category_script(name: &str) -> String {
    format!(
        "Get-CMCategory -CategoryType DriverCategories -Name {} | {CATEGORY_FIELDS}",
        ps_quote(name)
    )
}

pub fn create_package_script(name: &str, content_path: &Path) -> String {
    format!(
        "New-CMDriverPackage -Name {} -Path {} | {PACKAGE_FIELDS}",
        ps_quote(name),
        ps_quote(&content_path.display().to_string())
    )
}

pub fn create_category_script(name: &str) -> String {
    format!(
        "New-CMCategory -CategoryType DriverCategories -Name {} | {CATEGORY_FIELDS}",
        ps_quote(name)
    )
}

pub fn import_script(request: &ImportRequest<'_>) -> String {
    format!(
        "$package = Get-CMDriverPackage -Id {} -Fast; \
         $category = Get-CMCategory -Id {}; \
         Import-CMDriver -Path {} -ImportFolder -ImportDuplicateDriverOption AppendCategory \
         -EnableAndAllowInstall {} -AdministrativeCategory $category -DriverPackage $package \
         -UpdateDistributionPointsForDriverPackage {} | Out-Null",
        ps_quote(&request.package.id),
        ps_quote(&request.category.id),
        ps_quote(&request.source.display().to_string()),
        ps_bool(request.enable_and_allow_install),
        ps_bool(request.update_distribution_points),
    )
}

pub fn distribute_script(package: &PackageRef, target: &str) -> String {
    format!(
        "Start-CMContentDistribution -DriverPackageId {} -DistributionPointGroupName {}",
        ps_quote(&package.id),
        ps_quote(target)
    )
}

/// Parse `ConvertTo-Json` output holding zero, one or many objects
///
/// Empty output means no match; for arrays the first element is returned.
fn parse_single<T: DeserializeOwned>(stdout: &str) -> Result<Option<T>> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: serde_json::Value = serde_json::from_str(trimmed)?;
    let first = match value {
        serde_json::Value::Null => return Ok(None),
        serde_json::Value::Array(items) => match items.into_iter().next() {
            Some(item) => item,
            None => return Ok(None),
        },
        other => other,
    };

    Ok(Some(serde_json::from_value(first)?))
}
