use anyhow::Result;

use socialctl::guard::GuardOutcome;

use super::*;

pub(super) async fn handle_login_command(
    app: &mut App,
    username: &str,
    password: &str,
) -> Result<()> {
    if !app.auth.login(username, password).await {
        app.flush_notices();
        anyhow::bail!("login failed");
    }

    let login_route = app.client.config().routes.login.clone();
    let outcome = app.guard.reconcile(&login_route).await;
    app.flush_notices();
    match (outcome, app.client.session().user()) {
        (GuardOutcome::Redirect(_), Some(user)) => {
            if app.json {
                app.print_json(&user, "user")?;
            } else {
                println!("Logged in as {} ({})", user.username, user.role);
            }
            Ok(())
        }
        // The token was issued but did not validate. On the login route the
        // guard keeps a session whose validation merely failed, so drop it.
        _ => {
            app.auth.clear_auth();
            anyhow::bail!("session could not be validated after login")
        }
    }
}

pub(super) async fn handle_logout_command(app: &mut App) -> Result<()> {
    app.auth.logout().await;
    if !app.json {
        println!("Logged out");
    }
    Ok(())
}

pub(super) async fn handle_whoami_command(app: &mut App) -> Result<()> {
    app.require_session()?;
    let dashboard = app.client.config().routes.dashboard.clone();
    let outcome = app.guard.reconcile(&dashboard).await;
    let user = match (outcome, app.client.session().user()) {
        (GuardOutcome::Allow, Some(user)) => user,
        _ => anyhow::bail!("session invalid or expired (run `socialctl login --username ...`)"),
    };

    if app.json {
        app.print_json(&user, "whoami")?;
    } else {
        println!("user: {}", user.username);
        println!("user_id: {}", user.id);
        print_optional("email", Some(user.email.as_str()));
        println!("role: {}", user.role);
    }
    Ok(())
}
