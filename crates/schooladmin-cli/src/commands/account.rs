//! Sign-in, sign-out, and account settings commands.

use clap::Args;
use serde::Serialize;

use schooladmin_core::result::AppResult;
use schooladmin_entity::session::NavigationTarget;
use schooladmin_entity::user::ProfileUpdate;

use crate::app::App;
use crate::output::{OutputFormat, or_dash, print_item, print_success, print_warning};
use crate::prompt;

/// Arguments for `login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username or 10-digit mobile number
    pub identifier: Option<String>,
    /// Password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// Arguments for `reset-password`
#[derive(Debug, Args)]
pub struct ResetPasswordArgs {
    /// New password (prompted twice when omitted)
    #[arg(long)]
    pub new_password: Option<String>,
}

/// Arguments for `password`
#[derive(Debug, Args)]
pub struct PasswordArgs {
    /// Current password
    #[arg(long)]
    pub current: Option<String>,
    /// New password (prompted twice when omitted)
    #[arg(long)]
    pub new_password: Option<String>,
}

/// Arguments for `profile`
#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Display name
    #[arg(long)]
    pub name: Option<String>,
    /// Email address
    #[arg(long)]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
struct WhoamiView {
    phase: String,
    user_id: String,
    name: String,
    email: String,
    mobile_number: String,
    role: String,
    school_id: String,
    password_reset_required: bool,
}

pub async fn login(app: &App, args: &LoginArgs) -> AppResult<()> {
    let identifier = prompt::text_or_prompt(args.identifier.as_deref(), "Username or mobile")?;
    let password = prompt::secret_or_prompt(args.password.as_deref(), "Password")?;

    match app.session.login(&identifier, &password).await? {
        NavigationTarget::ResetPassword => {
            print_success("Signed in");
            print_warning("First login: run `schooladmin reset-password` to choose a new password");
        }
        _ => print_success("Signed in"),
    }
    Ok(())
}

pub async fn logout(app: &App) -> AppResult<()> {
    app.session.logout().await?;
    print_success("Signed out");
    Ok(())
}

pub async fn whoami(app: &App, format: OutputFormat) -> AppResult<()> {
    let snapshot = app.session.snapshot().await;
    let Some(user) = snapshot.user else {
        print_warning("Not signed in");
        return Ok(());
    };
    let view = WhoamiView {
        phase: snapshot.phase.to_string(),
        user_id: user.id.to_string(),
        name: user.name,
        email: or_dash(Some(user.email).filter(|e| !e.is_empty())),
        mobile_number: or_dash(Some(user.mobile_number).filter(|m| !m.is_empty())),
        role: user.role.to_string(),
        school_id: or_dash(user.school_id),
        password_reset_required: user.is_first_login,
    };
    print_item(&view, format);
    Ok(())
}

pub async fn reset_password(app: &App, args: &ResetPasswordArgs) -> AppResult<()> {
    let (password, confirm) = prompt::new_password(args.new_password.as_deref())?;
    let message = app.session.reset_password(&password, &confirm).await?;
    print_success(&message);
    Ok(())
}

pub async fn change_password(app: &App, args: &PasswordArgs) -> AppResult<()> {
    let current = prompt::secret_or_prompt(args.current.as_deref(), "Current password")?;
    let (password, confirm) = prompt::new_password(args.new_password.as_deref())?;
    let (message, _) = app
        .session
        .change_password(&current, &password, &confirm)
        .await?;
    print_success(&message);
    print_warning("You have been signed out; log in again with the new password");
    Ok(())
}

pub async fn profile(app: &App, args: &ProfileArgs, format: OutputFormat) -> AppResult<()> {
    let fields = ProfileUpdate {
        name: args.name.clone(),
        email: args.email.clone(),
    };
    let (message, user) = app.session.update_profile(&fields).await?;
    print_success(&message);
    print_item(&user, format);
    Ok(())
}
