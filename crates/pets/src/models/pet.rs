//! Pet types.

use serde::Serialize;

use storeroom_core::PetId;

/// A registered animal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    /// Species, free text ("cat", "dog", ...).
    pub animal: String,
}

/// Fields required to register a pet.
#[derive(Debug, Clone)]
pub struct NewPet {
    pub name: String,
    pub animal: String,
}
