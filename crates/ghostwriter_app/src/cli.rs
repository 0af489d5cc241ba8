use std::path::PathBuf;

use clap::Parser;

use crate::logging::LogDestination;

/// Scan a page for post text, draft a short reply through the configured
/// provider, and insert it into the page's best text box.
#[derive(Debug, Parser)]
#[command(name = "ghostwriter", version)]
pub struct Args {
    /// Page to load and operate on.
    pub url: String,

    /// Text treated as the user's selection once the page is loaded.
    #[arg(long)]
    pub select: Option<String>,

    /// Preference file location. Defaults to `.ghostwriter_prefs.ron` in
    /// the working directory.
    #[arg(long)]
    pub prefs: Option<PathBuf>,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,
}
