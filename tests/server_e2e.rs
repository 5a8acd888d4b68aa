//! End-to-end tests: real listener, real HTTP client, graceful shutdown.

use std::time::Duration;

use serde_json::{json, Value};
use tokio::net::TcpListener;

use posts_proxy::http::HttpServer;
use posts_proxy::lifecycle::Shutdown;

mod common;

#[tokio::test]
async fn serves_crud_roundtrip_and_shuts_down() {
    let upstream = common::start_placeholder_upstream().await;
    let config = upstream.config();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let proxy_addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let base = format!("http://{proxy_addr}/posts");

    let list: Value = client.get(&base).send().await.unwrap().json().await.unwrap();
    assert_eq!(list["status"], "Successful");
    assert_eq!(list["data"].as_array().unwrap().len(), 2);

    let created = client
        .post(&base)
        .json(&json!({"title": "foo", "body": "bar", "userId": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), 200);
    let created: Value = created.json().await.unwrap();
    assert_eq!(created["data"]["id"], 101);

    let read: Value = client
        .get(format!("{base}/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(read, json!({"status": "Successful", "data": common::sample_post(1)}));

    let deleted: Value = client
        .delete(format!("{base}/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(deleted, json!({"status": "Successful", "message": "Data deleted!"}));

    let paths: Vec<_> = upstream
        .requests()
        .into_iter()
        .map(|r| format!("{} {}", r.method, r.path))
        .collect();
    assert_eq!(
        paths,
        ["GET /posts", "POST /posts", "GET /posts/1", "DELETE /posts/1"]
    );

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn bind_reports_address_on_failure() {
    let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let mut config = posts_proxy::ProxyConfig::default();
    config.listener.bind_address = taken.local_addr().unwrap().to_string();

    let err = HttpServer::new(config.clone()).bind().await.unwrap_err();
    assert!(err.to_string().contains(&config.listener.bind_address));
}
