//! A small driver for manual testing against a real server.
//!
//! Set `TASKS_SERVER`, `TASKS_EMAIL` and `TASKS_PASSWORD`, then run it to
//! sign in and print today's visible task list.

use tasklist_sync::client::Client;
use tasklist_sync::config::DEFAULT_SERVER_URL;
use tasklist_sync::preferences::PreferenceStore;
use tasklist_sync::SyncController;

#[tokio::main]
async fn main() {
    env_logger::init();

    let server = std::env::var("TASKS_SERVER").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
    let email = std::env::var("TASKS_EMAIL").expect("set TASKS_EMAIL to your account e-mail");
    let password = std::env::var("TASKS_PASSWORD").expect("set TASKS_PASSWORD to your account password");

    let mut client = Client::new(&server, None).unwrap();
    client.sign_in(&email, &password).await.unwrap();
    println!("Signed in to {}", server);

    let preferences = PreferenceStore::at_default_location();
    let controller = SyncController::new(client, preferences, 0);
    controller.fetch().await.unwrap();

    for task in controller.store().state().visible {
        let marker = if task.is_done() { "x" } else { " " };
        println!("[{}] {} (due {})", marker, task.description(), task.estimated_date());
    }
}
