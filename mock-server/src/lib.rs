use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

/// Layout the real service uses for love timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Love {
    pub sender: String,
    pub recipient: String,
    pub message: String,
    pub timestamp: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Suggestion {
    pub label: String,
    pub value: String,
}

/// A user the server knows about.
#[derive(Clone, Debug)]
pub struct Employee {
    pub username: String,
    pub full_name: String,
}

impl Employee {
    pub fn new(username: &str, full_name: &str) -> Self {
        Self {
            username: username.to_string(),
            full_name: full_name.to_string(),
        }
    }
}

#[derive(Deserialize)]
pub struct LoveQuery {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub recipient: String,
    #[serde(default)]
    pub limit: i64,
}

#[derive(Deserialize)]
pub struct SendLove {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub recipient: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Deserialize)]
pub struct AutocompleteQuery {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub term: String,
}

pub struct Store {
    api_key: String,
    employees: Vec<Employee>,
    loves: Vec<Love>,
}

pub type Db = Arc<RwLock<Store>>;

type ApiResult<T> = Result<T, (StatusCode, String)>;

/// Users every fresh server starts with.
pub fn default_employees() -> Vec<Employee> {
    vec![
        Employee::new("hammy", "Hammy Hamster"),
        Employee::new("darwin", "Darwin Dog"),
        Employee::new("jeremy", "Jeremy Jones"),
        Employee::new("hannah", "Hannah Hall"),
    ]
}

pub fn app(api_key: &str) -> Router {
    app_with_employees(api_key, default_employees())
}

pub fn app_with_employees(api_key: &str, employees: Vec<Employee>) -> Router {
    let db: Db = Arc::new(RwLock::new(Store {
        api_key: api_key.to_string(),
        employees,
        loves: Vec::new(),
    }));
    Router::new()
        .route("/love", get(get_love).post(send_love))
        .route("/autocomplete", get(autocomplete))
        .with_state(db)
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

fn check_key(store: &Store, api_key: &str) -> ApiResult<()> {
    if store.api_key == api_key {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "Invalid API key".to_string()))
    }
}

fn bad_params(message: impl Into<String>) -> (StatusCode, String) {
    (StatusCode::UNPROCESSABLE_ENTITY, message.into())
}

async fn get_love(State(db): State<Db>, Query(query): Query<LoveQuery>) -> ApiResult<Json<Vec<Love>>> {
    let store = db.read().await;
    check_key(&store, &query.api_key)?;
    if query.sender.is_empty() && query.recipient.is_empty() {
        return Err(bad_params("Must specify at least one of sender and recipient"));
    }
    let matching = store
        .loves
        .iter()
        .rev()
        .filter(|love| query.sender.is_empty() || love.sender == query.sender)
        .filter(|love| query.recipient.is_empty() || love.recipient == query.recipient)
        .cloned();
    let loves: Vec<Love> = match usize::try_from(query.limit) {
        Ok(limit) if limit > 0 => matching.take(limit).collect(),
        _ => matching.collect(),
    };
    Ok(Json(loves))
}

async fn send_love(State(db): State<Db>, Form(input): Form<SendLove>) -> ApiResult<(StatusCode, String)> {
    let mut store = db.write().await;
    check_key(&store, &input.api_key)?;
    for (field, value) in [
        ("sender", &input.sender),
        ("recipient", &input.recipient),
        ("message", &input.message),
    ] {
        if value.trim().is_empty() {
            return Err(bad_params(format!("Missing {field}")));
        }
    }

    let recipients: Vec<&str> = input.recipient.split(',').map(str::trim).collect();
    for username in std::iter::once(input.sender.as_str()).chain(recipients.iter().copied()) {
        if !store.employees.iter().any(|e| e.username == username) {
            return Err(bad_params(format!("Unknown user: {username}")));
        }
    }
    if recipients.contains(&input.sender.as_str()) {
        return Err((
            StatusCode::IM_A_TEAPOT,
            "You can't send love to yourself.".to_string(),
        ));
    }

    let timestamp = chrono::Utc::now()
        .naive_utc()
        .format(TIMESTAMP_FORMAT)
        .to_string();
    for recipient in &recipients {
        store.loves.push(Love {
            sender: input.sender.clone(),
            recipient: recipient.to_string(),
            message: input.message.clone(),
            timestamp: timestamp.clone(),
        });
    }
    info!(sender = %input.sender, recipients = recipients.len(), "love stored");
    Ok((
        StatusCode::CREATED,
        format!("Love sent to {}!", recipients.join(", ")),
    ))
}

async fn autocomplete(
    State(db): State<Db>,
    Query(query): Query<AutocompleteQuery>,
) -> ApiResult<Json<Vec<Suggestion>>> {
    let store = db.read().await;
    check_key(&store, &query.api_key)?;
    let term = query.term.trim().to_lowercase();
    if term.is_empty() {
        return Ok(Json(Vec::new()));
    }
    let suggestions = store
        .employees
        .iter()
        .filter(|e| {
            e.username.to_lowercase().starts_with(&term)
                || e
                    .full_name
                    .split_whitespace()
                    .any(|name| name.to_lowercase().starts_with(&term))
        })
        .map(|e| Suggestion {
            label: format!("{} ({})", e.full_name, e.username),
            value: e.username.clone(),
        })
        .collect();
    Ok(Json(suggestions))
}
