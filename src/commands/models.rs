//! Models command implementation

use crate::drivers::DriverModel;
use crate::error::Result;

/// Print the supported models, one per line
pub fn run() -> Result<()> {
    for model in DriverModel::all() {
        println!("{model}");
    }
    Ok(())
}
