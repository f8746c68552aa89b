//! Supported hardware models
//!
//! Driver bundles are only staged for models on this list. Supporting a new
//! model means adding a variant here.

use std::fmt;

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum DriverModel {
    #[value(name = "Latitude 5480", alias = "latitude-5480")]
    Latitude5480,
    #[value(name = "Latitude 5490", alias = "latitude-5490")]
    Latitude5490,
    #[value(name = "Latitude 5500", alias = "latitude-5500")]
    Latitude5500,
    #[value(name = "Latitude 7390", alias = "latitude-7390")]
    Latitude7390,
    #[value(name = "Latitude 7400", alias = "latitude-7400")]
    Latitude7400,
    #[value(name = "Latitude 7480", alias = "latitude-7480")]
    Latitude7480,
    #[value(name = "Latitude 7490", alias = "latitude-7490")]
    Latitude7490,
    #[value(name = "OptiPlex 5050", alias = "optiplex-5050")]
    OptiPlex5050,
    #[value(name = "OptiPlex 7050", alias = "optiplex-7050")]
    OptiPlex7050,
    #[value(name = "OptiPlex 7060", alias = "optiplex-7060")]
    OptiPlex7060,
    #[value(name = "OptiPlex 7070", alias = "optiplex-7070")]
    OptiPlex7070,
    #[value(name = "Precision 5520", alias = "precision-5520")]
    Precision5520,
    #[value(name = "Precision 5530", alias = "precision-5530")]
    Precision5530,
}

impl DriverModel {
    /// Vendor spelling, used in folder names and package names
    pub fn name(self) -> &'static str {
        match self {
            DriverModel::Latitude5480 => "Latitude 5480",
            DriverModel::Latitude5490 => "Latitude 5490",
            DriverModel::Latitude5500 => "Latitude 5500",
            DriverModel::Latitude7390 => "Latitude 7390",
            DriverModel::Latitude7400 => "Latitude 7400",
            DriverModel::Latitude7480 => "Latitude 7480",
            DriverModel::Latitude7490 => "Latitude 7490",
            DriverModel::OptiPlex5050 => "OptiPlex 5050",
            DriverModel::OptiPlex7050 => "OptiPlex 7050",
            DriverModel::OptiPlex7060 => "OptiPlex 7060",
            DriverModel::OptiPlex7070 => "OptiPlex 7070",
            DriverModel::Precision5520 => "Precision 5520",
            DriverModel::Precision5530 => "Precision 5530",
        }
    }

    pub fn all() -> &'static [DriverModel] {
        DriverModel::value_variants()
    }
}

impl fmt::Display for DriverModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
