//! Management platform access
//!
//! This module handles:
//! - Package and category references returned by the platform
//! - The [`ManagementClient`] seam used by the driver stager
//! - The PowerShell-backed Configuration Manager client (via powershell module)

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

pub mod powershell;

pub use powershell::PowerShellClient;

/// A driver package on the site
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageRef {
    #[serde(rename = "PackageID")]
    pub id: String,

    #[serde(rename = "Name")]
    pub name: String,
}

/// An administrative driver category on the site
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryRef {
    #[serde(rename = "CategoryInstance_UniqueID")]
    pub id: String,

    #[serde(rename = "LocalizedCategoryInstanceName")]
    pub name: String,
}

/// Options for importing a driver source tree
#[derive(Debug, Clone)]
pub struct ImportRequest<'a> {
    pub source: &'a Path,
    pub package: &'a PackageRef,
    pub category: &'a CategoryRef,
    pub enable_and_allow_install: bool,
    pub update_distribution_points: bool,
}

/// Operations the driver stager needs from the management platform
///
/// Every call is a remote operation that may fail; none are retried.
pub trait ManagementClient {
    fn find_package(&mut self, name: &str) -> Result<Option<PackageRef>>;

    fn find_category(&mut self, name: &str) -> Result<Option<CategoryRef>>;

    /// Create a driver package whose content lives in `content_path`
    fn create_package(&mut self, name: &str, content_path: &Path) -> Result<PackageRef>;

    fn create_category(&mut self, name: &str) -> Result<CategoryRef>;

    fn import_drivers(&mut self, request: &ImportRequest<'_>) -> Result<()>;

    /// Send package content to a distribution point group
    fn distribute(&mut self, package: &PackageRef, target: &str) -> Result<()>;
}

impl<C: ManagementClient + ?Sized> ManagementClient for &mut C {
    fn find_package(&mut self, name: &str) -> Result<Option<PackageRef>> {
        (**self).find_package(name)
    }

    fn find_category(&mut self, name: &str) -> Result<Option<CategoryRef>> {
        (**self).find_category(name)
    }

    fn create_package(&mut self, name: &str, content_path: &Path) -> Result<PackageRef> {
        (**self).create_package(name, content_path)
    }

    fn create_category(&mut self, name: &str) -> Result<CategoryRef> {
        (**self).create_category(name)
    }

    fn import_drivers(&mut self, request: &ImportRequest<'_>) -> Result<()> {
        (**self).import_drivers(request)
    }

    fn distribute(&mut self, package: &PackageRef, target: &str) -> Result<()> {
        (**self).distribute(package, target)
    }
}
