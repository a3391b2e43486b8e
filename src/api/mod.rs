//! HTTP surface of the pet store
//!
//! Requests are decoded into a [`StrictRequest`], passed through the strict
//! middleware chain of their operation and answered by a
//! [`StrictServerInterface`] implementation. Only the axum adapter in
//! [`router`] knows about status codes.

mod error;
mod query;
pub mod router;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::store::{NewPet, Pet, PetId, PetStore};
use crate::strict::{SharedMiddleware, StrictHandler};

pub use error::{ApiError, ErrorBody};
pub use query::FindPetsParams;
pub use router::{build_router, build_router_with, RequestContext};

/// Operation ids, as named in the petstore-expanded OpenAPI document
pub mod operation {
    pub const FIND_PETS: &str = "findPets";
    pub const ADD_PET: &str = "addPet";
    pub const FIND_PET_BY_ID: &str = "findPetByID";
    pub const DELETE_PET: &str = "deletePet";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrictRequest {
    FindPets(FindPetsParams),
    AddPet(NewPet),
    FindPetById(PetId),
    DeletePet(PetId),
}

impl StrictRequest {
    pub fn operation_id(&self) -> &'static str {
        match self {
            StrictRequest::FindPets(_) => operation::FIND_PETS,
            StrictRequest::AddPet(_) => operation::ADD_PET,
            StrictRequest::FindPetById(_) => operation::FIND_PET_BY_ID,
            StrictRequest::DeletePet(_) => operation::DELETE_PET,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrictResponse {
    Pets(Vec<Pet>),
    Pet(Pet),
    NoContent,
}

impl IntoResponse for StrictResponse {
    fn into_response(self) -> Response {
        match self {
            StrictResponse::Pets(pets) => (StatusCode::OK, Json(pets)).into_response(),
            StrictResponse::Pet(pet) => (StatusCode::OK, Json(pet)).into_response(),
            StrictResponse::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

pub type PetStoreHandler = StrictHandler<RequestContext, StrictRequest, StrictResponse, ApiError>;
pub type PetStoreMiddleware =
    SharedMiddleware<RequestContext, StrictRequest, StrictResponse, ApiError>;

/// The four operations of the pet store API.
pub trait StrictServerInterface: Send + Sync + 'static {
    fn find_pets(&self, params: FindPetsParams) -> Result<Vec<Pet>, ApiError>;

    fn add_pet(&self, new_pet: NewPet) -> Result<Pet, ApiError>;

    fn find_pet_by_id(&self, id: PetId) -> Result<Pet, ApiError>;

    fn delete_pet(&self, id: PetId) -> Result<(), ApiError>;
}

impl StrictServerInterface for PetStore {
    fn find_pets(&self, params: FindPetsParams) -> Result<Vec<Pet>, ApiError> {
        Ok(self.list(&params.into()))
    }

    fn add_pet(&self, new_pet: NewPet) -> Result<Pet, ApiError> {
        Ok(self.create(new_pet)?)
    }

    fn find_pet_by_id(&self, id: PetId) -> Result<Pet, ApiError> {
        Ok(self.get_by_id(id)?)
    }

    fn delete_pet(&self, id: PetId) -> Result<(), ApiError> {
        self.delete_by_id(id)?;
        Ok(())
    }
}

/// Route a decoded request to the matching server operation.
pub fn dispatch<S>(server: &S, request: StrictRequest) -> Result<StrictResponse, ApiError>
where
    S: StrictServerInterface + ?Sized,
{
    match request {
        StrictRequest::FindPets(params) => server.find_pets(params).map(StrictResponse::Pets),
        StrictRequest::AddPet(new_pet) => server.add_pet(new_pet).map(StrictResponse::Pet),
        StrictRequest::FindPetById(id) => server.find_pet_by_id(id).map(StrictResponse::Pet),
        StrictRequest::DeletePet(id) => server
            .delete_pet(id)
            .map(|()| StrictResponse::NoContent),
    }
}
