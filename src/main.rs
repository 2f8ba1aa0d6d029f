mod cli_commands;
mod cli_exec;
mod cli_runtime;
mod cli_subcommands;

use cli_commands::Commands;
use cli_subcommands::{
    AnalyticsCommands, ConfigCommands, PermissionCommands, RoleCommands, UserCommands,
    VideoCommands,
};

#[tokio::main]
async fn main() {
    // A missing .env is the normal case.
    let _ = dotenvy::dotenv();

    if let Err(err) = cli_runtime::run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
