use tabled::Table;

use crate::{
    error,
    spotify::{LibraryApi, SpotifyClient},
    types::ProfileTableRow,
};

pub async fn profile() {
    let token = match super::access_token().await {
        Ok(t) => t,
        Err(e) => error!("Cannot get access token. Err: {}", e),
    };

    let client = SpotifyClient::new();
    let user = match client.user_profile(&token).await {
        Ok(user) => user,
        Err(e) => error!("Cannot load user profile. Err: {}", e),
    };

    let saved_songs = match client.saved_tracks(&token, 0, 1).await {
        Ok(page) => page.total,
        Err(e) => error!("Cannot count saved songs. Err: {}", e),
    };

    let row = ProfileTableRow {
        name: user.display_name.unwrap_or_else(|| user.id.clone()),
        id: user.id,
        saved_songs,
    };

    println!("{}", Table::new(vec![row]));
}
