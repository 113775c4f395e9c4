//! [`Query`] collection related to [`Breed`]s.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{breed, species, Breed, Species},
    infra::{database, Database},
    Query, Service,
};

use super::DatabaseQuery;

/// Queries all the [`Breed`]s.
pub type List = DatabaseQuery<By<Vec<Breed>, ()>>;

/// Queries a [`Breed`] by its [`breed::Id`].
pub type ById = DatabaseQuery<By<Option<Breed>, breed::Id>>;

/// [`Query`] of the [`Breed`]s belonging to a [`Species`], in the order the
/// [`Database`] returns them.
///
/// Unknown [`Species`] have no [`Breed`]s.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BySpecies(pub species::Id);

impl<Db> Query<BySpecies> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Breed>, ()>>,
        Ok = Vec<Breed>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Breed>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        BySpecies(species_id): BySpecies,
    ) -> Result<Self::Ok, Self::Err> {
        let mut breeds = self
            .database()
            .execute(Select(By::<Vec<Breed>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        breeds.retain(|b| b.belongs_to(species_id));
        Ok(breeds)
    }
}

/// [`Query`] ensuring the referenced [`Species`] exists, and the referenced
/// [`Breed`] (if any) exists and belongs to it.
///
/// The check is advisory: the referenced entities may change right after it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CheckTaxonomy {
    /// ID of the referenced [`Species`].
    pub species_id: species::Id,

    /// ID of the referenced [`Breed`], if any.
    pub breed_id: Option<breed::Id>,
}

impl<Db> Query<CheckTaxonomy> for Service<Db>
where
    Db: Database<
            Select<By<Option<Species>, species::Id>>,
            Ok = Option<Species>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Breed>, breed::Id>>,
            Ok = Option<Breed>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = ();
    type Err = Traced<TaxonomyError>;

    async fn execute(
        &self,
        CheckTaxonomy {
            species_id,
            breed_id,
        }: CheckTaxonomy,
    ) -> Result<Self::Ok, Self::Err> {
        use TaxonomyError as E;

        _ = self
            .database()
            .execute(Select(By::<Option<Species>, _>::new(species_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::SpeciesNotExists(species_id))
            .map_err(tracerr::wrap!())?;

        let Some(breed_id) = breed_id else {
            return Ok(());
        };
        let breed = self
            .database()
            .execute(Select(By::<Option<Breed>, _>::new(breed_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::BreedNotExists(breed_id))
            .map_err(tracerr::wrap!())?;
        if !breed.belongs_to(species_id) {
            return Err(tracerr::new!(E::BreedSpeciesMismatch {
                breed_id,
                species_id,
            }));
        }
        Ok(())
    }
}

/// Error of [`CheckTaxonomy`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum TaxonomyError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Species`] with the provided ID doesn't exist.
    #[display("`Species(id: {_0})` doesn't exist")]
    #[from(ignore)]
    SpeciesNotExists(#[error(not(source))] species::Id),

    /// [`Breed`] with the provided ID doesn't exist.
    #[display("`Breed(id: {_0})` doesn't exist")]
    #[from(ignore)]
    BreedNotExists(#[error(not(source))] breed::Id),

    /// [`Breed`] doesn't belong to the referenced [`Species`].
    #[display("`Breed(id: {breed_id})` doesn't belong to \
               `Species(id: {species_id})`")]
    #[from(ignore)]
    BreedSpeciesMismatch {
        /// ID of the referenced [`Breed`].
        breed_id: breed::Id,

        /// ID of the referenced [`Species`].
        species_id: species::Id,
    },
}

#[cfg(test)]
mod spec {
    use crate::{
        command,
        domain::{breed, species, Breed, Species},
        infra::Memory,
        query, Command as _, Query as _, Service,
    };

    use super::{BySpecies, CheckTaxonomy, TaxonomyError};

    async fn breed(
        service: &Service<Memory>,
        name: &str,
        species_id: species::Id,
    ) -> Breed {
        service
            .execute(command::breed::Create::insert(breed::New {
                name: breed::Name::new(name).unwrap(),
                species_id,
            }))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn filters_breeds_of_species() {
        let service = Service::new(Default::default(), Memory::new());
        let mut species = Vec::<Species>::new();
        for name in ["Dog", "Cat"] {
            species.push(
                service
                    .execute(command::species::Create::insert(species::New {
                        name: species::Name::new(name).unwrap(),
                    }))
                    .await
                    .unwrap(),
            );
        }
        let (dog, cat) = (species[0].id, species[1].id);

        let labrador = breed(&service, "Labrador", dog).await;
        let siamese = breed(&service, "Siamese", cat).await;
        let poodle = breed(&service, "Poodle", dog).await;

        let dogs = service.execute(BySpecies(dog)).await.unwrap();
        assert_eq!(
            dogs.iter().map(|b| b.id).collect::<Vec<_>>(),
            [labrador.id, poodle.id],
        );

        let all = service.execute(query::breed::List::by(())).await.unwrap();
        let cats = service.execute(BySpecies(cat)).await.unwrap();
        assert_eq!(
            cats.iter().map(|b| b.id).collect::<Vec<_>>(),
            all.iter()
                .filter(|b| b.species_id == cat)
                .map(|b| b.id)
                .collect::<Vec<_>>(),
        );
        assert_eq!(cats[0].id, siamese.id);

        assert!(service
            .execute(BySpecies(404.into()))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn checks_taxonomy_references() {
        let service = Service::new(Default::default(), Memory::new());
        let mut species = Vec::<Species>::new();
        for name in ["Dog", "Cat"] {
            species.push(
                service
                    .execute(command::species::Create::insert(species::New {
                        name: species::Name::new(name).unwrap(),
                    }))
                    .await
                    .unwrap(),
            );
        }
        let (dog, cat) = (species[0].id, species[1].id);
        let siamese = breed(&service, "Siamese", cat).await;

        service
            .execute(CheckTaxonomy {
                species_id: dog,
                breed_id: None,
            })
            .await
            .unwrap();
        service
            .execute(CheckTaxonomy {
                species_id: cat,
                breed_id: Some(siamese.id),
            })
            .await
            .unwrap();

        let err = service
            .execute(CheckTaxonomy {
                species_id: dog,
                breed_id: Some(siamese.id),
            })
            .await
            .unwrap_err();
        assert!(
            matches!(
                err.as_ref(),
                TaxonomyError::BreedSpeciesMismatch { breed_id, species_id }
                    if *breed_id == siamese.id && *species_id == dog,
            ),
            "{err}",
        );

        let err = service
            .execute(CheckTaxonomy {
                species_id: 404.into(),
                breed_id: Some(siamese.id),
            })
            .await
            .unwrap_err();
        assert!(
            matches!(err.as_ref(), TaxonomyError::SpeciesNotExists(_)),
            "{err}",
        );

        let err = service
            .execute(CheckTaxonomy {
                species_id: cat,
                breed_id: Some(404.into()),
            })
            .await
            .unwrap_err();
        assert!(
            matches!(err.as_ref(), TaxonomyError::BreedNotExists(_)),
            "{err}",
        );
    }
}
