use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use petstore::{
    api::{build_router_with, ApiError, ErrorBody, PetStoreHandler, PetStoreMiddleware},
    strict::{middleware_fn, TracingMiddleware},
    NewPet, PetStore,
};

fn require_api_key() -> PetStoreMiddleware {
    Arc::new(middleware_fn(|next: PetStoreHandler, _operation_id: &'static str| {
        PetStoreHandler::new(move |ctx, request| {
            let next = next.clone();
            async move {
                if ctx.headers.contains_key("x-api-key") {
                    next.call(ctx, request).await
                } else {
                    Err(ApiError::new(StatusCode::UNAUTHORIZED, "missing api key"))
                }
            }
        })
    }))
}

fn record_operations(seen: Arc<Mutex<Vec<&'static str>>>) -> PetStoreMiddleware {
    Arc::new(middleware_fn(move |next: PetStoreHandler, operation_id: &'static str| {
        let seen = Arc::clone(&seen);
        PetStoreHandler::new(move |ctx, request| {
            seen.lock().unwrap().push(operation_id);
            next.call(ctx, request)
        })
    }))
}

async fn spawn(store: Arc<PetStore>, middlewares: &[PetStoreMiddleware]) -> String {
    let app = build_router_with(store, middlewares);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

#[tokio::test]
async fn middleware_can_reject_before_the_store_is_touched() {
    let store = Arc::new(PetStore::new());
    let base = spawn(Arc::clone(&store), &[require_api_key()]).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/pets", base))
        .json(&NewPet::new("Fido"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: ErrorBody = resp.json().await.unwrap();
    assert_eq!(body.code, 401);
    assert!(store.is_empty());

    let resp = client
        .post(format!("{}/pets", base))
        .header("x-api-key", "secret")
        .json(&NewPet::new("Fido"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn each_route_sees_its_own_operation_id() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let store = Arc::new(PetStore::new());
    let middlewares = [
        Arc::new(TracingMiddleware) as PetStoreMiddleware,
        record_operations(Arc::clone(&seen)),
    ];
    let base = spawn(store, &middlewares).await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/pets", base))
        .json(&NewPet::new("Rex").with_tag("dog"))
        .send()
        .await
        .unwrap();
    client.get(format!("{}/pets", base)).send().await.unwrap();
    client.get(format!("{}/pets/1000", base)).send().await.unwrap();
    client.delete(format!("{}/pets/1000", base)).send().await.unwrap();
    client.get(format!("{}/pets/oops", base)).send().await.unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec!["addPet", "findPets", "findPetByID", "deletePet"]
    );
}
