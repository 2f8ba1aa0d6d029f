use std::path::PathBuf;

use clap::Subcommand;

use socialctl::remote::{DEFAULT_USER_PAGE_SIZE, DEFAULT_VIDEO_PAGE_SIZE};

#[derive(Subcommand)]
pub(crate) enum UserCommands {
    /// List users
    List {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_USER_PAGE_SIZE)]
        size: u32,
    },

    /// Show a user
    Get { user_id: String },

    /// Register a user
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, env = "SOCIALCTL_NEW_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Update a user; unset fields keep their current value
    Update {
        user_id: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        password: Option<String>,
        /// Re-enable the account
        #[arg(long, conflicts_with = "disable")]
        enable: bool,
        /// Deactivate the account
        #[arg(long)]
        disable: bool,
    },

    /// Delete a user
    Delete { user_id: String },
}

#[derive(Subcommand)]
pub(crate) enum VideoCommands {
    /// List videos, optionally for one user
    List {
        #[arg(long)]
        user: Option<String>,
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_VIDEO_PAGE_SIZE)]
        size: u32,
    },

    /// Upload a video file (max 20MB)
    Upload {
        path: PathBuf,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Override the content type guessed from the extension
        #[arg(long)]
        content_type: Option<String>,
    },

    /// Delete a video
    Delete { video_id: String },
}

#[derive(Subcommand)]
pub(crate) enum RoleCommands {
    /// List roles
    List {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_USER_PAGE_SIZE)]
        size: u32,
    },

    /// Show a role and its permissions
    Get { role_id: String },

    /// Create a role
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Update a role
    Update {
        role_id: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Delete a role
    Delete { role_id: String },

    /// Attach a permission to a role
    Grant {
        role_id: String,
        permission_id: String,
    },

    /// Detach a permission from a role
    Revoke {
        role_id: String,
        permission_id: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum PermissionCommands {
    /// List permissions
    List {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_USER_PAGE_SIZE)]
        size: u32,
    },

    /// Show a permission
    Get { permission_id: String },

    /// Create a permission
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Update a permission
    Update {
        permission_id: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Delete a permission
    Delete { permission_id: String },
}
