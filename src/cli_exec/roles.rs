use anyhow::{Context, Result};

use socialctl::remote::{PermissionRequest, RoleRequest, RoleResponse};

use super::*;
use crate::{PermissionCommands, RoleCommands};

pub(super) async fn handle_role_command(app: &App, command: RoleCommands) -> Result<()> {
    app.require_session()?;
    let client = &app.client;
    let role = match command {
        RoleCommands::List { page, size } => {
            let roles = client.list_roles(page, size).await.context("list roles")?;
            if app.json {
                return app.print_json(&roles, "roles");
            }
            if roles.content.is_empty() {
                println!("No roles");
            }
            for r in &roles.content {
                println!(
                    "{} {} ({} permissions)",
                    short_id(&r.id),
                    r.name,
                    r.permissions.len()
                );
            }
            return Ok(());
        }
        RoleCommands::Get { role_id } => client.get_role(&role_id).await.context("get role")?,
        RoleCommands::Create { name, description } => {
            let req = RoleRequest {
                role_name: name,
                description,
            };
            client.create_role(&req).await.context("create role")?
        }
        RoleCommands::Update {
            role_id,
            name,
            description,
        } => {
            let req = RoleRequest {
                role_name: name,
                description,
            };
            client
                .update_role(&role_id, &req)
                .await
                .context("update role")?
        }
        RoleCommands::Delete { role_id } => {
            client.delete_role(&role_id).await.context("delete role")?;
            if !app.json {
                println!("Deleted role {}", role_id);
            }
            return Ok(());
        }
        RoleCommands::Grant {
            role_id,
            permission_id,
        } => client
            .add_permission_to_role(&role_id, &permission_id)
            .await
            .context("grant permission")?,
        RoleCommands::Revoke {
            role_id,
            permission_id,
        } => client
            .remove_permission_from_role(&role_id, &permission_id)
            .await
            .context("revoke permission")?,
    };

    if app.json {
        return app.print_json(&role, "role");
    }
    print_role(&role);
    Ok(())
}

fn print_role(role: &RoleResponse) {
    println!("id: {}", role.id);
    println!("name: {}", role.name);
    print_optional("description", role.description.as_deref());
    for p in &role.permissions {
        println!("permission: {} {}", short_id(&p.id), p.permission);
    }
}

pub(super) async fn handle_permission_command(
    app: &App,
    command: PermissionCommands,
) -> Result<()> {
    app.require_session()?;
    let client = &app.client;
    let permission = match command {
        PermissionCommands::List { page, size } => {
            let perms = client
                .list_permissions(page, size)
                .await
                .context("list permissions")?;
            if app.json {
                return app.print_json(&perms, "permissions");
            }
            if perms.content.is_empty() {
                println!("No permissions");
            }
            for p in &perms.content {
                println!("{} {}", short_id(&p.id), p.permission);
            }
            return Ok(());
        }
        PermissionCommands::Get { permission_id } => client
            .get_permission(&permission_id)
            .await
            .context("get permission")?,
        PermissionCommands::Create { name, description } => {
            let req = PermissionRequest {
                permission: name,
                description,
            };
            client
                .create_permission(&req)
                .await
                .context("create permission")?
        }
        PermissionCommands::Update {
            permission_id,
            name,
            description,
        } => {
            let req = PermissionRequest {
                permission: name,
                description,
            };
            client
                .update_permission(&permission_id, &req)
                .await
                .context("update permission")?
        }
        PermissionCommands::Delete { permission_id } => {
            client
                .delete_permission(&permission_id)
                .await
                .context("delete permission")?;
            if !app.json {
                println!("Deleted permission {}", permission_id);
            }
            return Ok(());
        }
    };

    if app.json {
        return app.print_json(&permission, "permission");
    }
    println!("id: {}", permission.id);
    println!("permission: {}", permission.permission);
    print_optional("description", permission.description.as_deref());
    Ok(())
}
