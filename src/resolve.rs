//! Type resolution for hole annotations.

use crate::{
    config::ParserConfig,
    types::{Hole, ParameterDefinition, ResourceItem},
};

/// Maps an optional annotation to a target type name.
///
/// No annotation yields the configured default type. A known alias yields its
/// canonical target; anything else passes through unchanged.
pub fn resolve_type(annotation: Option<&str>, config: &ParserConfig) -> String {
    match annotation {
        None => config.default_type.clone(),
        Some(annotation) => config
            .lookup_alias(annotation)
            .unwrap_or(annotation)
            .to_string(),
    }
}

impl Hole {
    pub fn to_parameter(&self, config: &ParserConfig) -> ParameterDefinition {
        ParameterDefinition {
            name: self.name.clone(),
            resolved_type: resolve_type(self.r#type.as_deref(), config),
        }
    }
}

impl ResourceItem {
    /// One parameter per distinct hole name, in first-appearance order.
    ///
    /// A parsed item never holds two holes with the same name and different
    /// annotations, so collapsing on the name alone loses nothing.
    pub fn parameters(&self, config: &ParserConfig) -> Vec<ParameterDefinition> {
        let mut out: Vec<ParameterDefinition> = Vec::with_capacity(self.holes.len());
        for hole in &self.holes {
            if out.iter().all(|p| p.name != hole.name) {
                out.push(hole.to_parameter(config));
            }
        }
        out
    }
}
