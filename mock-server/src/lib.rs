use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Characters per page, matching the public API.
pub const PAGE_SIZE: usize = 20;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Character {
    pub id: u64,
    pub name: String,
    pub status: String,
    pub species: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub gender: String,
    pub origin: Location,
    pub location: Location,
    pub image: String,
    pub episode: Vec<String>,
    pub url: String,
    pub created: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Info {
    pub count: u64,
    pub pages: u64,
    pub next: Option<String>,
    pub prev: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page {
    pub info: Info,
    pub results: Vec<Character>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
}

struct AppState {
    base_url: String,
    characters: Vec<Character>,
}

type Db = Arc<AppState>;

/// Build a character whose URLs point at `base_url`.
pub fn character(base_url: &str, id: u64, name: &str, status: &str, gender: &str) -> Character {
    let earth = Location {
        name: "Earth (C-137)".to_string(),
        url: format!("{base_url}/location/1"),
    };
    Character {
        id,
        name: name.to_string(),
        status: status.to_string(),
        species: "Human".to_string(),
        kind: String::new(),
        gender: gender.to_string(),
        origin: earth.clone(),
        location: earth,
        image: format!("{base_url}/character/avatar/{id}.jpeg"),
        episode: vec![format!("{base_url}/episode/1")],
        url: format!("{base_url}/character/{id}"),
        created: "2017-11-04T18:48:46.250Z".to_string(),
    }
}

pub fn seed(base_url: &str) -> Vec<Character> {
    vec![
        character(base_url, 1, "Rick Sanchez", "Alive", "Male"),
        character(base_url, 2, "Morty Smith", "Alive", "Male"),
        character(base_url, 3, "Summer Smith", "Alive", "Female"),
    ]
}

/// Router seeded with three characters, linking pages under
/// `http://localhost:3000`.
pub fn app() -> Router {
    let base_url = "http://localhost:3000";
    app_with(base_url, seed(base_url))
}

/// Router serving `characters`; `base_url` is used for `next`/`prev` links.
pub fn app_with(base_url: &str, characters: Vec<Character>) -> Router {
    let db: Db = Arc::new(AppState {
        base_url: base_url.trim_end_matches('/').to_string(),
        characters,
    });
    Router::new()
        .route("/character", get(list_characters))
        .route("/character/{id}", get(get_character))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

fn not_found(message: &str) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
}

async fn list_characters(
    State(db): State<Db>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page>, (StatusCode, Json<ErrorBody>)> {
    let count = db.characters.len();
    let pages = count.div_ceil(PAGE_SIZE);
    let page = query.page.unwrap_or(1);
    // An empty collection still has a (blank) first page.
    if page == 0 || page > pages.max(1) {
        return Err(not_found("There is nothing here"));
    }

    let link = |n: usize| format!("{}/character?page={n}", db.base_url);
    let results = db
        .characters
        .iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .cloned()
        .collect();

    tracing::debug!(page, pages, "serving character page");
    Ok(Json(Page {
        info: Info {
            count: count as u64,
            pages: pages as u64,
            next: (page < pages).then(|| link(page + 1)),
            prev: (page > 1).then(|| link(page - 1)),
        },
        results,
    }))
}

async fn get_character(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Character>, (StatusCode, Json<ErrorBody>)> {
    db.characters
        .iter()
        .find(|c| c.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Character not found"))
}
