use clap::Subcommand;

use socialctl::remote::DEFAULT_ANALYTICS_SAMPLE;

#[derive(Subcommand)]
pub(crate) enum AnalyticsCommands {
    /// User and video totals
    Dashboard,

    /// Size and format breakdown over a sample of videos
    Videos {
        #[arg(long, default_value_t = DEFAULT_ANALYTICS_SAMPLE)]
        sample: u32,
    },
}
