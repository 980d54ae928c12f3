use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub address: Address,
    pub phone: String,
    pub website: String,
}

/// Seeded once at startup and read-only afterwards.
pub type Db = Arc<BTreeMap<u32, User>>;

/// The records served at startup, shaped like the public placeholder API.
pub fn seed_users() -> Vec<User> {
    vec![
        User {
            id: 1,
            name: "Leanne Graham".to_string(),
            username: "Bret".to_string(),
            email: "Sincere@april.biz".to_string(),
            address: Address {
                street: "Kulas Light".to_string(),
                suite: "Apt. 556".to_string(),
                city: "Gwenborough".to_string(),
                zipcode: "92998-3874".to_string(),
            },
            phone: "1-770-736-8031 x56442".to_string(),
            website: "hildegard.org".to_string(),
        },
        User {
            id: 2,
            name: "Ervin Howell".to_string(),
            username: "Antonette".to_string(),
            email: "Shanna@melissa.tv".to_string(),
            address: Address {
                street: "Victor Plains".to_string(),
                suite: "Suite 879".to_string(),
                city: "Wisokyburgh".to_string(),
                zipcode: "90566-7771".to_string(),
            },
            phone: "010-692-6593 x09125".to_string(),
            website: "anastasia.net".to_string(),
        },
    ]
}

pub fn app() -> Router {
    app_with(seed_users())
}

/// Build the router over a custom set of users.
pub fn app_with(users: Vec<User>) -> Router {
    let db: Db = Arc::new(users.into_iter().map(|u| (u.id, u)).collect());
    Router::new()
        .route("/users/{id}", get(get_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn get_user(State(db): State<Db>, Path(id): Path<u32>) -> Result<Json<User>, StatusCode> {
    match db.get(&id) {
        Some(user) => Ok(Json(user.clone())),
        None => {
            tracing::debug!(id, "user not found");
            Err(StatusCode::NOT_FOUND)
        }
    }
}
