use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use service::catalog::{CatalogManager, NewProduct, ProductPatch};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes::{self, ServerState};

fn cors() -> CorsLayer { CorsLayer::very_permissive() }

struct TestApp {
    base_url: String,
    catalog: Arc<CatalogManager>,
    products_path: PathBuf,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Use an isolated products file per test run
    let products_path = PathBuf::from(format!("target/test-data/{}/products.json", Uuid::new_v4()));
    let catalog = CatalogManager::new(&products_path);
    let state = ServerState { catalog: catalog.clone() };

    let app: Router = routes::build_router(state, cors());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, catalog, products_path })
}

async fn list(app: &TestApp, query: &str) -> anyhow::Result<(HttpStatusCode, serde_json::Value)> {
    let res = reqwest::get(format!("{}/products{}", app.base_url, query)).await?;
    let status = res.status();
    Ok((status, res.json::<serde_json::Value>().await?))
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_empty_catalog_lists_nothing() -> anyhow::Result<()> {
    let app = start_server().await?;
    let (status, body) = list(&app, "").await?;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
    Ok(())
}

#[tokio::test]
async fn e2e_list_reflects_catalog_mutations() -> anyhow::Result<()> {
    let app = start_server().await?;
    app.catalog.add(NewProduct::new("A", "d", 10.0, "t", "C1", 5)).await?;
    app.catalog.add(NewProduct::new("B", "d", 20.0, "t", "C2", 2)).await?;

    let (_, body) = list(&app, "").await?;
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(
        body[0],
        serde_json::json!({
            "title": "A", "description": "d", "price": 10.0, "thumbnail": "t",
            "code": "C1", "stock": 5, "id": 1
        })
    );

    let (_, body) = list(&app, "?limit=1").await?;
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    app.catalog.update(2, ProductPatch { stock: Some(7), ..Default::default() }).await?;
    let (_, body) = list(&app, "?limit=nope").await?;
    assert_eq!(body[1]["stock"], 7);

    app.catalog.delete_all().await?;
    let (_, body) = list(&app, "").await?;
    assert_eq!(body, serde_json::json!([]));
    Ok(())
}

#[tokio::test]
async fn e2e_corrupt_file_returns_error_object() -> anyhow::Result<()> {
    let app = start_server().await?;
    if let Some(parent) = app.products_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&app.products_path, "[{").await?;

    let (status, body) = list(&app, "").await?;
    assert_eq!(status, HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "failed to load products");

    let _ = tokio::fs::remove_file(&app.products_path).await;
    Ok(())
}
