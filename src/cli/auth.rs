use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{info, spotify, types::PkceToken};

pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    info!("Opening the Spotify authorization page...");
    spotify::auth::auth(shared_state).await;
}
