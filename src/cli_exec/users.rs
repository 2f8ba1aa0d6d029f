use anyhow::{Context, Result};

use socialctl::remote::{RegisterRequest, UserResponse, UserUpdateRequest};

use super::*;
use crate::UserCommands;

pub(super) async fn handle_user_command(app: &App, command: UserCommands) -> Result<()> {
    app.require_session()?;
    let client = &app.client;
    match command {
        UserCommands::List { page, size } => {
            let users = client.list_users(page, size).await.context("list users")?;
            if app.json {
                return app.print_json(&users, "users");
            }
            if users.content.is_empty() {
                println!("No users");
            }
            for u in &users.content {
                println!(
                    "{} {} {} {}{}",
                    short_id(&u.id),
                    u.username,
                    u.mail,
                    u.role(),
                    if u.is_disabled() { " (disabled)" } else { "" }
                );
            }
            println!(
                "page {}/{} ({} users)",
                page + 1,
                users.total_pages.max(1),
                users.total_elements
            );
        }
        UserCommands::Get { user_id } => {
            let user = client.get_user(&user_id).await.context("get user")?;
            if app.json {
                return app.print_json(&user, "user");
            }
            print_user(&user);
        }
        UserCommands::Create {
            username,
            email,
            phone,
            password,
        } => {
            let req = RegisterRequest {
                username,
                mail: email,
                phone_number: phone,
                password,
            };
            let created = client.create_user(&req).await.context("create user")?;
            if app.json {
                return app.print_json(&created, "user");
            }
            println!("Created user {} ({})", created.username, created.id);
        }
        UserCommands::Update {
            user_id,
            username,
            email,
            phone,
            password,
            enable,
            disable,
        } => {
            let current = client.get_user(&user_id).await.context("get user")?;
            let mut req = UserUpdateRequest::from_user(&current);
            if let Some(username) = username {
                req.username = username;
            }
            if let Some(email) = email {
                req.mail = email;
            }
            if let Some(phone) = phone {
                req.phone_number = phone;
            }
            req.password = password.filter(|p| !p.is_empty());
            if enable {
                req.enable = Some(true);
            } else if disable {
                req.enable = Some(false);
            }

            let updated = client
                .update_user(&user_id, &req)
                .await
                .context("update user")?;
            if app.json {
                return app.print_json(&updated, "user");
            }
            println!("Updated user {}", updated.username);
        }
        UserCommands::Delete { user_id } => {
            client.delete_user(&user_id).await.context("delete user")?;
            if !app.json {
                println!("Deleted user {}", user_id);
            }
        }
    }
    Ok(())
}

fn print_user(user: &UserResponse) {
    println!("id: {}", user.id);
    println!("username: {}", user.username);
    print_optional("email", Some(user.mail.as_str()));
    print_optional("phone", user.phone_number.as_deref());
    println!("role: {}", user.role());
    println!("enabled: {}", !user.is_disabled());
    let roles: Vec<&str> = user.roles.iter().map(|r| r.name.as_str()).collect();
    if !roles.is_empty() {
        println!("roles: {}", roles.join(", "));
    }
    print_optional("created_at", user.created_at.as_deref());
    print_optional("updated_at", user.updated_at.as_deref());
}
