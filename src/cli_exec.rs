use anyhow::Result;

use socialctl::config::ConfigOverrides;
use socialctl::store::LocalStore;

use crate::Commands;
use crate::cli_runtime::App;

mod analytics;
mod config;
mod identity;
mod roles;
mod users;
mod videos;

pub(crate) async fn handle_command(
    store: LocalStore,
    overrides: ConfigOverrides,
    json: bool,
    command: Commands,
) -> Result<()> {
    if let Commands::Config { command } = command {
        return config::handle_config_command(&store, &overrides, json, command);
    }

    let mut app = App::new(store, &overrides, json)?;
    let result = match command {
        Commands::Login(args) => {
            identity::handle_login_command(&mut app, &args.username, &args.password).await
        }
        Commands::Logout => identity::handle_logout_command(&mut app).await,
        Commands::Whoami => identity::handle_whoami_command(&mut app).await,
        Commands::Users { command } => users::handle_user_command(&app, command).await,
        Commands::Videos { command } => videos::handle_video_command(&app, command).await,
        Commands::Roles { command } => roles::handle_role_command(&app, command).await,
        Commands::Permissions { command } => {
            roles::handle_permission_command(&app, command).await
        }
        Commands::Analytics { command } => {
            analytics::handle_analytics_command(&app, command).await
        }
        Commands::Config { command } => {
            config::handle_config_command(&app.store, &overrides, json, command)
        }
    };
    app.flush_notices();
    result
}

fn print_optional(label: &str, value: Option<&str>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        println!("{}: {}", label, v);
    }
}

fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}
