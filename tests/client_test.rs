use playlistify::{
    error::PlaylistifyError,
    spotify::{LibraryApi, SpotifyClient},
    types::{AddTracksRequest, CreatePlaylistRequest},
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_string, header, method, path, query_param},
};

async fn client() -> (MockServer, SpotifyClient) {
    let server = MockServer::start().await;
    let client = SpotifyClient::with_base_url(format!("{}/", server.uri()));
    (server, client)
}

#[tokio::test]
async fn test_user_profile() {
    let (server, client) = client().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "user_1",
            "display_name": "Jane",
            "images": [{ "url": "https://i.scdn.co/image/a", "height": 64, "width": 64 }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let profile = client.user_profile("tok").await.unwrap();
    assert_eq!(profile.id, "user_1");
    assert_eq!(profile.display_name.as_deref(), Some("Jane"));
    assert_eq!(profile.images.len(), 1);
}

#[tokio::test]
async fn test_saved_tracks_page() {
    let (server, client) = client().await;

    Mock::given(method("GET"))
        .and(path("/me/tracks"))
        .and(query_param("offset", "50"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "added_at": "2024-03-07T10:00:00Z", "track": { "uri": "spotify:track:a", "name": "A" } },
                { "added_at": "2024-03-06T10:00:00Z", "track": { "uri": "spotify:track:b", "name": "B" } }
            ],
            "total": 120,
            "offset": 50,
            "limit": 2
        })))
        .mount(&server)
        .await;

    let page = client.saved_tracks("tok", 50, 2).await.unwrap();
    assert_eq!(page.total, 120);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].track.uri, "spotify:track:a");
    assert!(page.items[0].added_at > page.items[1].added_at);
}

#[tokio::test]
async fn test_create_playlist_sends_options() {
    let (server, client) = client().await;

    Mock::given(method("POST"))
        .and(path("/users/user_1/playlists"))
        .and(body_json(json!({ "name": "Saved Songs", "public": false })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "pl_1",
            "name": "Saved Songs",
            "external_urls": { "spotify": "https://open.spotify.com/playlist/pl_1" },
            "images": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let body = CreatePlaylistRequest {
        name: "Saved Songs".to_string(),
        description: None,
        public: Some(false),
    };
    let playlist = client.create_playlist("tok", "user_1", &body).await.unwrap();
    assert_eq!(playlist.id, "pl_1");
    assert_eq!(playlist.link(), "https://open.spotify.com/playlist/pl_1");
}

#[tokio::test]
async fn test_add_tracks_sends_position() {
    let (server, client) = client().await;

    Mock::given(method("POST"))
        .and(path("/playlists/pl_1/tracks"))
        .and(body_json(json!({
            "uris": ["spotify:track:a", "spotify:track:b"],
            "position": 100
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "snapshot_id": "snap" })))
        .expect(1)
        .mount(&server)
        .await;

    let body = AddTracksRequest {
        uris: vec!["spotify:track:a".to_string(), "spotify:track:b".to_string()],
        position: 100,
    };
    let snapshot = client.add_tracks("tok", "pl_1", &body).await.unwrap();
    assert_eq!(snapshot.snapshot_id, "snap");
}

#[tokio::test]
async fn test_cover_image_upload_and_fetch() {
    let (server, client) = client().await;

    Mock::given(method("PUT"))
        .and(path("/playlists/pl_1/images"))
        .and(header("content-type", "image/jpeg"))
        .and(body_string("/9j/4AAQ"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/playlists/pl_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "images": [{ "url": "https://mosaic.scdn.co/640/a" }]
        })))
        .mount(&server)
        .await;

    client.set_cover_image("tok", "pl_1", "/9j/4AAQ").await.unwrap();

    let images = client.playlist_cover_art("tok", "pl_1").await.unwrap();
    assert_eq!(images[0].url, "https://mosaic.scdn.co/640/a");
    assert_eq!(images[0].height, None);
}

#[tokio::test]
async fn test_unauthorized_maps_to_auth() {
    let (server, client) = client().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client.user_profile("expired").await.unwrap_err();
    assert!(matches!(err, PlaylistifyError::Auth(_)));
}

#[tokio::test]
async fn test_other_status_maps_to_http() {
    let (server, client) = client().await;

    Mock::given(method("POST"))
        .and(path("/playlists/missing/tracks"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let body = AddTracksRequest {
        uris: vec!["spotify:track:a".to_string()],
        position: 0,
    };
    let err = client.add_tracks("tok", "missing", &body).await.unwrap_err();
    assert_eq!(err, PlaylistifyError::Http { status: 404 });
    assert_eq!(err.to_string(), "HTTP Status Error: 404");
}

#[tokio::test]
async fn test_malformed_body_maps_to_parse() {
    let (server, client) = client().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client.user_profile("tok").await.unwrap_err();
    assert!(matches!(err, PlaylistifyError::Parse(_)));
}

#[tokio::test]
async fn test_rate_limit_is_retried() {
    let (server, client) = client().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "user_1" })))
        .expect(1)
        .mount(&server)
        .await;

    let profile = client.user_profile("tok").await.unwrap();
    assert_eq!(profile.id, "user_1");
    assert_eq!(profile.display_name, None);
}

#[tokio::test]
async fn test_abnormal_retry_after_is_not_retried() {
    let (server, client) = client().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "3600"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.user_profile("tok").await.unwrap_err();
    assert_eq!(err, PlaylistifyError::Http { status: 429 });
}
