use crate::{
    cli::{admin, customer, input, manager},
    models::{Role, SessionUser},
    state::AppState,
};

/// Top-level role selection loop. Identities are fixed per role; picking a
/// role simply runs its menu against the matching seeded user.
pub async fn run(state: &AppState) -> anyhow::Result<()> {
    loop {
        println!();
        println!("=== Shop console ===");
        println!("1. Sign in as administrator");
        println!("2. Sign in as manager");
        println!("3. Sign in as customer");
        println!("0. Exit");

        let user = match input::read_parsed::<u32>("> ")? {
            1 => SessionUser::admin(),
            2 => SessionUser::manager(),
            3 => SessionUser::customer(),
            0 => {
                println!("Goodbye");
                return Ok(());
            }
            _ => {
                println!("Invalid selection");
                continue;
            }
        };

        tracing::info!(user_id = user.id, role = user.role.as_str(), "session started");

        match user.role {
            Role::Admin => admin::run(state, &user).await?,
            Role::Manager => manager::run(state, &user).await?,
            Role::Customer => customer::run(state, &user).await?,
        }
    }
}
