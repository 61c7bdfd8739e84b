use crate::app::{Build, BuildDefinitionReference, Deployment, Project};
use async_trait::async_trait;
use color_eyre::eyre::Result;

/// The remote query interface the dashboard loads from.
#[async_trait]
pub trait PipelineSource: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<Project>>;
    async fn list_build_definitions(&self, project: &str) -> Result<Vec<BuildDefinitionReference>>;
    async fn list_builds(&self, project: &str) -> Result<Vec<Build>>;
    async fn list_deployments(&self, project: &str) -> Result<Vec<Deployment>>;
}
