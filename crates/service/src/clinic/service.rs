use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::{debug, instrument};

use super::domain::{Owner, Pet, PetType, Vet, Visit};
use super::repo::{SeaOrmOwnerRepository, SeaOrmPetRepository, SeaOrmVetRepository, SeaOrmVisitRepository};
use super::repository::{OwnerRepository, PetRepository, VetRepository, VisitRepository};
use crate::errors::DataAccessError;

/// Single entry point the web layer uses for every clinic read and write.
#[async_trait]
pub trait ClinicService: Send + Sync {
    async fn find_pet_types(&self) -> Result<Vec<PetType>, DataAccessError>;
    async fn find_owner_by_id(&self, id: i32) -> Result<Option<Owner>, DataAccessError>;
    async fn find_owner_by_last_name(&self, last_name: &str) -> Result<Vec<Owner>, DataAccessError>;
    async fn save_owner(&self, owner: &mut Owner) -> Result<(), DataAccessError>;
    async fn save_pet(&self, pet: &mut Pet) -> Result<(), DataAccessError>;
    async fn save_visit(&self, visit: &mut Visit) -> Result<(), DataAccessError>;
    async fn find_pet_by_id(&self, id: i32) -> Result<Option<Pet>, DataAccessError>;
    async fn find_vets(&self) -> Result<Vec<Vet>, DataAccessError>;
    async fn find_visits_by_pet_id(&self, pet_id: i32) -> Result<Vec<Visit>, DataAccessError>;
}

/// Façade over the four repositories. Every method is one delegated call;
/// results and errors come back as the repository produced them.
pub struct ClinicServiceImpl {
    owners: Arc<dyn OwnerRepository>,
    pets: Arc<dyn PetRepository>,
    vets: Arc<dyn VetRepository>,
    visits: Arc<dyn VisitRepository>,
}

impl ClinicServiceImpl {
    pub fn new(
        owners: Arc<dyn OwnerRepository>,
        pets: Arc<dyn PetRepository>,
        vets: Arc<dyn VetRepository>,
        visits: Arc<dyn VisitRepository>,
    ) -> Self {
        Self { owners, pets, vets, visits }
    }

    /// One store backing all four repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::clinic::repository::memory::InMemoryClinicStore;
    /// use service::{ClinicService, ClinicServiceImpl};
    ///
    /// let store = Arc::new(InMemoryClinicStore::new());
    /// tokio_test::block_on(store.add_vet("James", "Carter", &[]));
    /// let svc = ClinicServiceImpl::with_store(store);
    /// let vets = tokio_test::block_on(svc.find_vets()).unwrap();
    /// assert_eq!(vets[0].last_name, "Carter");
    /// ```
    pub fn with_store<S>(store: Arc<S>) -> Self
    where
        S: OwnerRepository + PetRepository + VetRepository + VisitRepository + 'static,
    {
        Self::new(store.clone(), store.clone(), store.clone(), store)
    }

    /// SeaORM repositories sharing one connection pool.
    pub fn sea_orm(db: DatabaseConnection) -> Self {
        Self::new(
            Arc::new(SeaOrmOwnerRepository { db: db.clone() }),
            Arc::new(SeaOrmPetRepository { db: db.clone() }),
            Arc::new(SeaOrmVetRepository { db: db.clone() }),
            Arc::new(SeaOrmVisitRepository { db }),
        )
    }
}

#[async_trait]
impl ClinicService for ClinicServiceImpl {
    #[instrument(skip(self))]
    async fn find_pet_types(&self) -> Result<Vec<PetType>, DataAccessError> {
        debug!("find_pet_types");
        self.pets.find_pet_types().await
    }

    #[instrument(skip(self))]
    async fn find_owner_by_id(&self, id: i32) -> Result<Option<Owner>, DataAccessError> {
        debug!(owner_id = id, "find_owner_by_id");
        self.owners.find_by_id(id).await
    }

    #[instrument(skip(self))]
    async fn find_owner_by_last_name(&self, last_name: &str) -> Result<Vec<Owner>, DataAccessError> {
        debug!(last_name, "find_owner_by_last_name");
        self.owners.find_by_last_name(last_name).await
    }

    #[instrument(skip(self, owner), fields(owner_id = ?owner.id))]
    async fn save_owner(&self, owner: &mut Owner) -> Result<(), DataAccessError> {
        debug!("save_owner");
        self.owners.save(owner).await
    }

    #[instrument(skip(self, pet), fields(pet_id = ?pet.id, owner_id = ?pet.owner_id))]
    async fn save_pet(&self, pet: &mut Pet) -> Result<(), DataAccessError> {
        debug!("save_pet");
        self.pets.save(pet).await
    }

    #[instrument(skip(self, visit), fields(pet_id = ?visit.pet_id))]
    async fn save_visit(&self, visit: &mut Visit) -> Result<(), DataAccessError> {
        debug!("save_visit");
        self.visits.save(visit).await
    }

    #[instrument(skip(self))]
    async fn find_pet_by_id(&self, id: i32) -> Result<Option<Pet>, DataAccessError> {
        debug!(pet_id = id, "find_pet_by_id");
        self.pets.find_by_id(id).await
    }

    #[instrument(skip(self))]
    async fn find_vets(&self) -> Result<Vec<Vet>, DataAccessError> {
        debug!("find_vets");
        self.vets.find_all().await
    }

    #[instrument(skip(self))]
    async fn find_visits_by_pet_id(&self, pet_id: i32) -> Result<Vec<Visit>, DataAccessError> {
        debug!(pet_id, "find_visits_by_pet_id");
        self.visits.find_by_pet_id(pet_id).await
    }
}
