use std::sync::Arc;

use anyhow::{Context, Result};
use comfy_table::{ContentArrangement, Table};
use taller_core::api::ApiClient;
use taller_core::messages;
use taller_core::models::UserSummary;
use taller_core::users::UsersService;

use crate::cli::console::ConsoleNotifier;

pub async fn list(base_url: &str, json: bool) -> Result<()> {
    let service = UsersService::new(ApiClient::new(base_url), Arc::new(ConsoleNotifier));
    let users = service
        .get_all_users()
        .await
        .context(messages::USERS_LOAD_FAILED)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
    } else if users.is_empty() {
        println!("{}", messages::USERS_EMPTY);
    } else {
        println!("{}", users_table(&users));
    }
    Ok(())
}

fn users_table(users: &[UserSummary]) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Usuario", "Email", "Nombre"]);
    for user in users {
        table.add_row(vec![
            user.id.to_string(),
            user.username.clone(),
            user.email.clone(),
            user.full_name(),
        ]);
    }
    table.to_string()
}
