use super::load_app_context;
use super::prompts;
use super::ui::is_interactive;
use crate::output::Output;
use color_eyre::Result;
use marquee_core::{validate_login_input, SessionError};
use serde_json::json;

pub fn run_login(email: Option<String>, output: &Output) -> Result<()> {
    let app = load_app_context()?;

    if let Some(identity) = app.session.current().identity {
        output.info(format!("Already logged in as {} <{}>", identity.name, identity.email));
        return Ok(());
    }

    if !is_interactive() {
        return Err(color_eyre::eyre::eyre!("Login needs an interactive terminal for the password prompt"));
    }

    let email = match email {
        Some(email) => email,
        None => prompts::prompt_string("Email", None)?,
    };
    let password = prompts::prompt_password("Password")?;

    // Local checks first so a typo never counts as a failed login
    if let Err(SessionError::Validation(message)) = validate_login_input(&email, &password) {
        return Err(color_eyre::eyre::eyre!(message));
    }

    match app.session.login(&email, &password) {
        Ok(identity) => {
            if output.format().is_json() {
                output.json(&json!({ "logged_in": true, "identity": identity }));
            } else {
                output.success(format!("Welcome, {}!", identity.name));
            }
            Ok(())
        }
        Err(e) => Err(color_eyre::eyre::eyre!("Login failed: {}", e)),
    }
}

pub fn run_logout(output: &Output) -> Result<()> {
    let app = load_app_context()?;
    let was_logged_in = app.session.is_logged_in();

    app.logout()
        .map_err(|e| color_eyre::eyre::eyre!("Logged out, but some saved state could not be removed: {}", e))?;

    if output.format().is_json() {
        output.json(&json!({ "logged_out": true, "was_logged_in": was_logged_in }));
    } else if was_logged_in {
        output.success("Logged out. Saved watchlist and session were removed.");
    } else {
        output.info("Not logged in. Saved state was cleared anyway.");
    }
    Ok(())
}

pub fn run_whoami(output: &Output) -> Result<()> {
    let app = load_app_context()?;
    let session = app.session.current();

    if output.format().is_json() {
        output.data(&session);
        return Ok(());
    }

    match session.identity {
        Some(identity) if session.is_logged_in => {
            output.println(format!("{} <{}>", identity.name, identity.email));
        }
        _ => output.info("Not logged in. Run 'marquee login' to sign in."),
    }
    Ok(())
}
