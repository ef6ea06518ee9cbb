use indexmap::IndexMap;
use tracing::{debug, info};

use crate::config::PlotConfig;
use crate::error::{HeterogeneityError, Result};
use crate::figure::Figure;
use crate::resource::{Resource, ResourceSummary};

/// Named collection of resources rendered together.
///
/// Resources iterate in insertion order. Re-adding an id replaces the resource
/// in place.
#[derive(Clone, Debug)]
pub struct Grouping {
    pub id: String,
    resources: IndexMap<String, Resource>,
    config: PlotConfig,
}

impl Grouping {
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_config(id, PlotConfig::default())
    }

    pub fn with_config(id: impl Into<String>, config: PlotConfig) -> Self {
        Self {
            id: id.into(),
            resources: IndexMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn add_resource(
        &mut self,
        resource_id: impl Into<String>,
        weights: &[f64],
        grades: &[f64],
    ) -> Result<()> {
        let resource_id = resource_id.into();
        let resource = Resource::new(resource_id.clone(), weights, grades)?;

        if self.resources.insert(resource_id.clone(), resource).is_some() {
            debug!(grouping = %self.id, resource = %resource_id, "replaced resource");
        } else {
            debug!(grouping = %self.id, resource = %resource_id, "added resource");
        }
        Ok(())
    }

    pub fn resource(&self, resource_id: &str) -> Option<&Resource> {
        self.resources.get(resource_id)
    }

    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// One panel per resource, stacked in insertion order under a shared title.
    pub fn render_all_curves(&self) -> Result<Figure> {
        if self.resources.is_empty() {
            return Err(HeterogeneityError::EmptyGrouping(self.id.clone()));
        }

        let mut figure = Figure::new(
            format!("ID: {}", self.id),
            self.resources.len(),
            self.config.clone(),
        );
        for (i, resource) in self.resources.values().enumerate() {
            resource.render_grade_recovery_curve(figure.panel_mut(i)?)?;
        }

        info!(grouping = %self.id, panels = figure.len(), "rendered grade-recovery curves");
        Ok(figure)
    }

    pub fn summaries(&self) -> Result<Vec<ResourceSummary>> {
        self.resources.values().map(Resource::summary).collect()
    }

    pub fn summaries_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.summaries()?)?)
    }
}
