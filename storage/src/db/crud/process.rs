//! CRUD operations for the process and studio tables
use surrealdb::{Connection, RecordId, Surreal};
use tracing::instrument;

use crate::{
    db::{
        crud::Document,
        queries::process::{list_materials, list_steps},
        schemas::process::{
            Material, MaterialChangeSet, ProcessStep, ProcessStepChangeSet, StudioImage,
            StudioImageChangeSet, TimelapseVideo, TimelapseVideoChangeSet,
        },
    },
    errors::Error,
};

impl Document for Material {
    type ChangeSet = MaterialChangeSet;

    #[inline]
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Document for ProcessStep {
    type ChangeSet = ProcessStepChangeSet;

    #[inline]
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Document for StudioImage {
    type ChangeSet = StudioImageChangeSet;

    #[inline]
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Document for TimelapseVideo {
    type ChangeSet = TimelapseVideoChangeSet;

    #[inline]
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl ProcessStep {
    #[instrument]
    pub async fn list<C: Connection>(db: &Surreal<C>) -> Result<Vec<Self>, Error> {
        Ok(db.query(list_steps()).await?.take(0)?)
    }
}

impl Material {
    #[instrument]
    pub async fn list<C: Connection>(db: &Surreal<C>) -> Result<Vec<Self>, Error> {
        Ok(db.query(list_materials()).await?.take(0)?)
    }
}
