use anyhow::Result;
use taller_core::models::{Credentials, RegistrationRequest};

use super::session_manager;
use crate::cli::console::password_or_stdin;

pub struct RegisterArgs {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: Option<String>,
}

pub async fn login(base_url: &str, username: &str, password: Option<String>) -> Result<()> {
    let password = password_or_stdin(password)?;
    let session = session_manager(base_url);
    session.login(&Credentials::new(username, &password)).await?;
    Ok(())
}

pub async fn register(base_url: &str, args: RegisterArgs) -> Result<()> {
    let password = password_or_stdin(args.password)?;
    let request = RegistrationRequest::new(
        &args.username,
        &args.email,
        &password,
        &args.first_name,
        &args.last_name,
    );
    session_manager(base_url).register(&request).await?;
    Ok(())
}

pub fn logout(base_url: &str) {
    session_manager(base_url).logout();
}

/// Prints the stored session as profile rows.
pub fn whoami(base_url: &str) -> Result<()> {
    let Some(session) = session_manager(base_url).current_session() else {
        anyhow::bail!("Not logged in. Run `taller login` first.");
    };

    println!("{:<18}{}", "ID:", session.id);
    println!("{:<18}{}", "Usuario:", session.username);
    println!("{:<18}{}", "Email:", session.email);
    println!("{:<18}{}", "Nombre completo:", session.display_name());
    Ok(())
}
