use clap::Parser;
use std::path::PathBuf;

use crate::drivers::DriverModel;

/// Arguments for the driver-package command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Stage a bundle using paths from winstage.yaml:\n    \
                   winstage driver-package \"Latitude 7480\" 1909_2020-03\n\n\
                   Override the site and roots:\n    \
                   winstage driver-package latitude-7480 1909_2020-03 --site-code P01 \\\n      \
                   --source-root \\\\cm01\\Drivers\\Source --package-root \\\\cm01\\Drivers\\Packages")]
pub struct DriverPackageArgs {
    /// Hardware model (see `winstage models`)
    #[arg(value_enum, ignore_case = true)]
    pub model: DriverModel,

    /// Driver bundle version label, e.g. 1909_2020-03
    pub version: String,

    /// Root of the extracted driver bundles
    #[arg(long, value_name = "DIR")]
    pub source_root: Option<PathBuf>,

    /// Root of the driver package content folders
    #[arg(long, value_name = "DIR")]
    pub package_root: Option<PathBuf>,

    /// Configuration Manager site code
    #[arg(long, value_name = "CODE")]
    pub site_code: Option<String>,

    /// Distribution point group that receives the package content
    #[arg(long, value_name = "GROUP")]
    pub distribution_point_group: Option<String>,

    /// Event log file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}
