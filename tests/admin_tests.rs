// tests/admin_tests.rs

use podotest::{config::Config, routes, state::AppState, utils::admin_session::AdminSessions};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

const ADMIN_PASSWORD: &str = "test-admin-pw";

async fn spawn_app() -> (String, SqlitePool) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        admin_password: ADMIN_PASSWORD.to_string(),
        rust_log: "error".to_string(),
        port: 0,
    };

    let state = AppState {
        pool: pool.clone(),
        config,
        admin_sessions: AdminSessions::new(),
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, pool)
}

fn token_from_path(path: &str) -> String {
    path.trim_start_matches("/t/")
        .split('/')
        .next()
        .unwrap()
        .to_string()
}

/// Runs one candidate through the whole flow (blank submission) and returns
/// the session token.
async fn seed_one_graded_session(client: &reqwest::Client, address: &str) -> String {
    let response = client
        .post(format!("{}/start", address))
        .send()
        .await
        .unwrap();
    let token = token_from_path(response.url().path());

    client
        .post(format!("{}/t/{}/profil", address, token))
        .json(&serde_json::json!({
            "first_name": "Jules",
            "last_name": "Renard",
            "role": "responsable",
            "experience": "5+ ans",
            "shop_type": "galerie marchande",
            "consent": true
        }))
        .send()
        .await
        .unwrap();

    client
        .post(format!("{}/t/{}", address, token))
        .json(&serde_json::json!({ "answers": {} }))
        .send()
        .await
        .unwrap();

    token
}

#[tokio::test]
async fn admin_routes_require_login() {
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    let dashboard = client.get(format!("{}/admin", address)).send().await.unwrap();
    assert_eq!(dashboard.status().as_u16(), 401);

    let export = client
        .get(format!("{}/admin/export.csv", address))
        .send()
        .await
        .unwrap();
    assert_eq!(export.status().as_u16(), 401);
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/admin/login", address))
        .json(&serde_json::json!({ "password": "not-the-password" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn login_dashboard_export_logout_flow() {
    let (address, _pool) = spawn_app().await;

    // Cookie store: the login cookie must ride along on later requests.
    let client = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap();

    let token = seed_one_graded_session(&client, &address).await;

    // Login redirects straight into the dashboard.
    let response = client
        .post(format!("{}/admin/login", address))
        .json(&serde_json::json!({ "password": ADMIN_PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.url().path(), "/admin");

    let summaries: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(summaries.len(), 1);

    let entry = &summaries[0];
    assert_eq!(entry["token"].as_str().unwrap(), token);
    assert_eq!(entry["first_name"], "Jules");
    // Blank submission: five questions assigned, none correct.
    assert_eq!(entry["correct"], 0);
    assert_eq!(entry["total"], 5);
    assert_eq!(entry["score_pct"], 0);

    // Export carries the fixed column order and the session row.
    let export = client
        .get(format!("{}/admin/export.csv", address))
        .send()
        .await
        .unwrap();
    assert_eq!(export.status().as_u16(), 200);
    assert_eq!(
        export.headers()["content-type"].to_str().unwrap(),
        "text/csv; charset=utf-8"
    );

    let body = export.text().await.unwrap();
    let mut lines = body.lines();
    assert_eq!(
        lines.next().unwrap(),
        "date,token,first_name,last_name,role,experience,shop_type,correct,total,score_pct"
    );
    let row = lines.next().unwrap();
    assert!(row.contains(&token));
    assert!(row.ends_with("0,5,0"));

    // Logout revokes the capability; the dashboard closes again.
    let response = client
        .get(format!("{}/admin/logout", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.url().path(), "/");

    let dashboard = client.get(format!("{}/admin", address)).send().await.unwrap();
    assert_eq!(dashboard.status().as_u16(), 401);
}

#[tokio::test]
async fn dashboard_lists_newest_sessions_first() {
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap();

    let first = seed_one_graded_session(&client, &address).await;
    let second = seed_one_graded_session(&client, &address).await;

    client
        .post(format!("{}/admin/login", address))
        .json(&serde_json::json!({ "password": ADMIN_PASSWORD }))
        .send()
        .await
        .unwrap();

    let summaries: Vec<serde_json::Value> = client
        .get(format!("{}/admin", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0]["token"].as_str().unwrap(), second);
    assert_eq!(summaries[1]["token"].as_str().unwrap(), first);

    // The limit parameter clamps the page size.
    let limited: Vec<serde_json::Value> = client
        .get(format!("{}/admin?limit=1", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0]["token"].as_str().unwrap(), second);
}
