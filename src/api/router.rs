//! axum adapter for the strict pet store handlers

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequestParts, Path, Query, State,
    },
    http::{request::Parts, HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::debug;

use super::{
    dispatch, operation, ApiError, FindPetsParams, PetStoreHandler, PetStoreMiddleware,
    StrictRequest, StrictServerInterface,
};
use crate::store::{NewPet, PetId};
use crate::strict::{apply_middlewares, StrictHandler, TracingMiddleware};

/// Request metadata handed to every strict handler
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            method: parts.method.clone(),
            uri: parts.uri.clone(),
            headers: parts.headers.clone(),
        })
    }
}

struct AppState {
    find_pets: PetStoreHandler,
    add_pet: PetStoreHandler,
    find_pet_by_id: PetStoreHandler,
    delete_pet: PetStoreHandler,
}

/// Router with request tracing on every operation.
pub fn build_router<S>(server: Arc<S>) -> Router
where
    S: StrictServerInterface,
{
    let middlewares: [PetStoreMiddleware; 1] = [Arc::new(TracingMiddleware)];
    build_router_with(server, &middlewares)
}

/// Router whose operations are wrapped by `middlewares`, first one outermost.
pub fn build_router_with<S>(server: Arc<S>, middlewares: &[PetStoreMiddleware]) -> Router
where
    S: StrictServerInterface,
{
    let adapt = |operation_id: &'static str| {
        apply_middlewares(strict_handler(Arc::clone(&server)), operation_id, middlewares)
    };
    let state = Arc::new(AppState {
        find_pets: adapt(operation::FIND_PETS),
        add_pet: adapt(operation::ADD_PET),
        find_pet_by_id: adapt(operation::FIND_PET_BY_ID),
        delete_pet: adapt(operation::DELETE_PET),
    });

    Router::new()
        .route("/pets", get(find_pets).post(add_pet))
        .route("/pets/:id", get(find_pet_by_id).delete(delete_pet))
        .with_state(state)
}

fn strict_handler<S>(server: Arc<S>) -> PetStoreHandler
where
    S: StrictServerInterface,
{
    StrictHandler::new(move |_ctx: RequestContext, request: StrictRequest| {
        let server = Arc::clone(&server);
        async move { dispatch(server.as_ref(), request) }
    })
}

async fn run(
    handler: &PetStoreHandler,
    ctx: RequestContext,
    request: Result<StrictRequest, ApiError>,
) -> Response {
    let request = match request {
        Ok(request) => request,
        Err(err) => {
            debug!(method = %ctx.method, uri = %ctx.uri, error = %err, "rejected request");
            return err.into_response();
        }
    };
    match handler.call(ctx, request).await {
        Ok(response) => response.into_response(),
        Err(err) => err.into_response(),
    }
}

fn path_id(path: Result<Path<PetId>, PathRejection>) -> Result<PetId, ApiError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        ApiError::bad_request(format!(
            "Invalid format for parameter id: {}",
            rejection.body_text()
        ))
    })
}

async fn find_pets(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let request = query
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
        .and_then(|Query(pairs)| FindPetsParams::from_pairs(pairs))
        .map(StrictRequest::FindPets);
    run(&state.find_pets, ctx, request).await
}

async fn add_pet(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    body: Result<Json<NewPet>, JsonRejection>,
) -> Response {
    let request = body
        .map(|Json(new_pet)| StrictRequest::AddPet(new_pet))
        .map_err(|_| ApiError::bad_request("Invalid format for NewPet"));
    run(&state.add_pet, ctx, request).await
}

async fn find_pet_by_id(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    path: Result<Path<PetId>, PathRejection>,
) -> Response {
    let request = path_id(path).map(StrictRequest::FindPetById);
    run(&state.find_pet_by_id, ctx, request).await
}

async fn delete_pet(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    path: Result<Path<PetId>, PathRejection>,
) -> Response {
    let request = path_id(path).map(StrictRequest::DeletePet);
    run(&state.delete_pet, ctx, request).await
}
