use projects_manager::app_state::AppState;
use projects_manager::services::data_stores::{
    PostgresEmployeeStore, PostgresProjectStore,
};
use projects_manager::utils::{constants::prod, constants::DATABASE_URL, tracing::init_tracing};
use projects_manager::{get_postgres_pool, Application};
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::RwLock;

#[tokio::main]
async fn main() {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialise tracing");

    let pg_pool = configure_postgresql().await;

    let project_store =
        Arc::new(RwLock::new(PostgresProjectStore::new(pg_pool.clone())));
    let employee_store =
        Arc::new(RwLock::new(PostgresEmployeeStore::new(pg_pool)));
    let app_state = AppState::new(project_store, employee_store);

    let app = Application::build(app_state, prod::APP_ADDRESS)
        .await
        .expect("Failed to build app");

    app.run().await.expect("Failed to run app");
}

async fn configure_postgresql() -> PgPool {
    let pg_pool = get_postgres_pool(&DATABASE_URL)
        .await
        .expect("Failed to create Postgres connection pool!");

    sqlx::migrate!()
        .run(&pg_pool)
        .await
        .expect("Failed to run migrations");

    pg_pool
}
