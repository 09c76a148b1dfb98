//! Effect handlers.
//!
//! Pure async functions returning the `UiEvent` to feed back to the reducer.
//! They never touch `AppState`.

use pms_core::auth::AuthClient;

use crate::common::TaskId;
use crate::events::UiEvent;
use crate::features::login::Password;

/// Runs one login request.
pub async fn login(
    client: AuthClient,
    task: TaskId,
    username: String,
    password: Password,
) -> UiEvent {
    let result = client.login(&username, password.expose()).await;
    UiEvent::LoginCompleted { task, result }
}
