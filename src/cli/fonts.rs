use clap::Parser;
use std::path::PathBuf;

/// Arguments for the fonts command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install the fonts shipped next to winstage.exe:\n    winstage fonts\n\n\
                   Install from a share into a test folder:\n    \
                   winstage fonts --source \\\\server\\Fonts --destination C:\\Temp\\Fonts")]
pub struct FontsArgs {
    /// Folder holding the font files (defaults to the executable's folder)
    #[arg(long, short = 's', value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// System font folder (defaults to %WINDIR%\Fonts)
    #[arg(long, short = 'd', value_name = "DIR")]
    pub destination: Option<PathBuf>,

    /// Event log file (defaults to FontInstall.log in the source folder)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}
