mod admin;
mod analytics;
mod config;

pub(crate) use self::admin::{PermissionCommands, RoleCommands, UserCommands, VideoCommands};
pub(crate) use self::analytics::AnalyticsCommands;
pub(crate) use self::config::ConfigCommands;
