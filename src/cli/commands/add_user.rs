use crate::cli::Console;
use crate::db::Store;
use crate::models::NewUser;

use super::report_store_error;

pub async fn cmd_add_user(
    store: &Store,
    console: &mut dyn Console,
    mal_user_id: Option<String>,
) -> anyhow::Result<()> {
    let mal_user_id = match mal_user_id {
        Some(id) if !id.trim().is_empty() => id.trim().to_string(),
        _ => console.prompt_text("Enter MAL username")?,
    };

    match store.create_user(&NewUser::new(mal_user_id.as_str())).await {
        Ok(user) => console.success(&format!(
            "User {} added successfully (ID: {}).",
            user.external_id, user.id
        )),
        Err(e) => report_store_error(console, "add user", &e),
    }

    Ok(())
}
