use clap::{Args, Subcommand};

use crate::{
    AnalyticsCommands, ConfigCommands, PermissionCommands, RoleCommands, UserCommands,
    VideoCommands,
};

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Log in and validate the session
    Login(LoginArgs),

    /// Log out (revoke the token and clear local state)
    Logout,

    /// Show the user behind the stored session
    Whoami,

    /// Show or change the stored client configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Manage users
    #[command(alias = "user")]
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Manage videos
    #[command(alias = "video")]
    Videos {
        #[command(subcommand)]
        command: VideoCommands,
    },

    /// Manage roles and their permissions
    #[command(alias = "role")]
    Roles {
        #[command(subcommand)]
        command: RoleCommands,
    },

    /// Manage permissions
    #[command(alias = "permission")]
    Permissions {
        #[command(subcommand)]
        command: PermissionCommands,
    },

    /// Summary figures computed from live listings
    Analytics {
        #[command(subcommand)]
        command: AnalyticsCommands,
    },
}

#[derive(Args)]
pub(crate) struct LoginArgs {
    #[arg(long, env = "SOCIALCTL_USERNAME")]
    pub(crate) username: String,

    #[arg(long, env = "SOCIALCTL_PASSWORD", hide_env_values = true)]
    pub(crate) password: String,
}
