//! Adapters turn parsed source trees into a typed [`State`].
//!
//! Each source format has its own entry point. Service adapters inside a
//! format are independent of each other: they read the raw tree (and may
//! resolve references through it) but never see another adapter's output.

pub mod cloudformation;
pub mod defaults;
pub mod kubernetes;
pub mod terraform;

use serde::{Deserialize, Serialize};

use crate::parser::cloudformation::FileContext;
use crate::parser::kubernetes::Manifest;
use crate::parser::terraform::Modules;
use crate::state::State;
use crate::types::{BoolValue, StringValue};

/// Which kind of source a state was adapted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Terraform,
    CloudFormation,
    Kubernetes,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Terraform => write!(f, "Terraform"),
            Self::CloudFormation => write!(f, "CloudFormation"),
            Self::Kubernetes => write!(f, "Kubernetes"),
        }
    }
}

/// Parsed inputs for one scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sources {
    #[serde(default)]
    pub terraform: Vec<Modules>,
    #[serde(default)]
    pub cloudformation: Vec<FileContext>,
    #[serde(default)]
    pub kubernetes: Vec<Manifest>,
}

impl Sources {
    pub fn is_empty(&self) -> bool {
        self.terraform.iter().all(Modules::is_empty)
            && self.cloudformation.iter().all(|f| f.resources.is_empty())
            && self.kubernetes.is_empty()
    }
}

/// One adapted source group.
#[derive(Debug, Clone)]
pub struct AdaptedState {
    pub source: SourceKind,
    pub name: String,
    pub state: State,
}

/// Adapt every source group into its own state.
///
/// Terraform configurations and CloudFormation templates each produce one
/// state. All Kubernetes manifests share one.
pub fn adapt_all(sources: &Sources, parallel: bool) -> Vec<AdaptedState> {
    let mut adapted = Vec::new();

    for (i, modules) in sources.terraform.iter().enumerate() {
        if modules.is_empty() {
            tracing::warn!(source = %SourceKind::Terraform, index = i, "empty configuration, skipping");
            continue;
        }
        adapted.push(AdaptedState {
            source: SourceKind::Terraform,
            name: modules
                .modules()
                .first()
                .map(|m| m.path.clone())
                .unwrap_or_else(|| format!("terraform-{i}")),
            state: terraform::adapt_with(modules, parallel),
        });
    }

    for file in &sources.cloudformation {
        adapted.push(AdaptedState {
            source: SourceKind::CloudFormation,
            name: file.filepath.clone(),
            state: cloudformation::adapt(file),
        });
    }

    if !sources.kubernetes.is_empty() {
        adapted.push(AdaptedState {
            source: SourceKind::Kubernetes,
            name: "manifests".into(),
            state: kubernetes::adapt(&sources.kubernetes),
        });
    }

    for a in &adapted {
        tracing::debug!(source = %a.source, name = %a.name, "adapted source");
    }
    adapted
}

/// Run two closures, on the rayon pool when `parallel` is set.
pub(crate) fn join<A, B, RA, RB>(parallel: bool, a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    #[cfg(feature = "parallel")]
    if parallel {
        return rayon::join(a, b);
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;
    (a(), b())
}

/// Interpret a string setting as a flag, keeping its provenance.
pub(crate) fn string_flag(value: StringValue, on: &str) -> BoolValue {
    value.map(|s| s.eq_ignore_ascii_case(on))
}
