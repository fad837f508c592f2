use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

/// First id handed out by an empty collection.
pub const FIRST_ID: u32 = 11;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub id: u32,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
pub struct NewHero {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
}

pub type Db = Arc<RwLock<BTreeMap<u32, Hero>>>;

pub fn seed_heroes() -> Vec<Hero> {
    [
        "Dr. Nice",
        "Bombasto",
        "Celeritas",
        "Magneta",
        "RubberMan",
        "Dynama",
        "Dr. IQ",
        "Magma",
        "Tornado",
        "Narco",
    ]
    .into_iter()
    .zip(FIRST_ID..)
    .map(|(name, id)| Hero {
        id,
        name: name.to_string(),
        extra: Map::new(),
    })
    .collect()
}

/// Router seeded with the default heroes.
pub fn app() -> Router {
    app_with(seed_heroes())
}

pub fn app_with(heroes: Vec<Hero>) -> Router {
    let db: Db = Arc::new(RwLock::new(
        heroes.into_iter().map(|hero| (hero.id, hero)).collect(),
    ));
    Router::new()
        .route(
            "/api/heroes",
            get(list_heroes).post(create_hero).put(update_hero),
        )
        .route(
            "/api/heroes/{id}",
            get(get_hero).put(update_hero_at).delete(delete_hero),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn gen_id(heroes: &BTreeMap<u32, Hero>) -> u32 {
    heroes.keys().next_back().map_or(FIRST_ID, |max| max + 1)
}

async fn list_heroes(
    State(db): State<Db>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Hero>> {
    let heroes = db.read().await;
    let needle = params.name.map(|name| name.to_lowercase());
    Json(
        heroes
            .values()
            .filter(|hero| {
                needle
                    .as_deref()
                    .map_or(true, |needle| hero.name.to_lowercase().contains(needle))
            })
            .cloned()
            .collect(),
    )
}

async fn create_hero(
    State(db): State<Db>,
    Json(mut input): Json<NewHero>,
) -> (StatusCode, Json<Hero>) {
    // Client-supplied ids are ignored.
    input.extra.remove("id");
    let mut heroes = db.write().await;
    let hero = Hero {
        id: gen_id(&heroes),
        name: input.name,
        extra: input.extra,
    };
    heroes.insert(hero.id, hero.clone());
    info!(id = hero.id, "created hero");
    (StatusCode::CREATED, Json(hero))
}

async fn get_hero(State(db): State<Db>, Path(id): Path<u32>) -> Result<Json<Hero>, StatusCode> {
    let heroes = db.read().await;
    heroes.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_hero(State(db): State<Db>, Json(hero): Json<Hero>) -> StatusCode {
    replace(&db, hero).await
}

async fn update_hero_at(
    State(db): State<Db>,
    Path(id): Path<u32>,
    Json(mut hero): Json<Hero>,
) -> StatusCode {
    hero.id = id;
    replace(&db, hero).await
}

async fn replace(db: &Db, hero: Hero) -> StatusCode {
    let mut heroes = db.write().await;
    match heroes.get_mut(&hero.id) {
        Some(existing) => {
            info!(id = hero.id, "updated hero");
            *existing = hero;
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn delete_hero(State(db): State<Db>, Path(id): Path<u32>) -> StatusCode {
    let mut heroes = db.write().await;
    match heroes.remove(&id) {
        Some(_) => {
            info!(id, "deleted hero");
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}
