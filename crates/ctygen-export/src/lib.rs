#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! ctygen export engine: dependency-ordered ctypes emission.
//!
//! Pipeline stages, each its own module:
//! - `graph` - closure expansion from the selected roots
//! - `order` - deterministic topological sort, residual cycle groups
//! - `cycles` - declare-then-patch planning for cycle groups
//! - `emit` - ctypes rendering and module assembly
//! - `report` - per-invocation outcome report
//!
//! [`export`] wires the stages together for one invocation; all state is
//! created fresh per call and dropped with the returned [`Export`].

mod cycles;
mod graph;
mod order;
mod report;

pub mod emit;

#[cfg(test)]
mod cycles_tests;
#[cfg(test)]
mod graph_tests;
#[cfg(test)]
mod test_utils;

use ctygen_core::{TypeCatalog, pattern};

pub use cycles::{EmitPlan, EmitStep};
pub use emit::{Fragment, Renderer, render_module};
pub use graph::{DependencyGraph, Edge, Unresolved, Unsupported};
pub use order::{TopoResult, sort};
pub use report::{ExportReport, Skip, SkipReason};

/// Errors that abort a whole invocation. Per-group and per-node failures
/// are reported as skips instead, so unrelated roots still export.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("unresolved type `{name}`, referenced by `{referrer}`")]
    UnresolvedType { name: String, referrer: String },

    #[error("type `{name}` is not exportable ({reason}), referenced by `{referrer}`")]
    UnsupportedRef {
        name: String,
        reason: String,
        referrer: String,
    },
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, Error>;

/// What to do when a referenced name has no usable definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnUnresolved {
    /// Abort the invocation.
    #[default]
    Fail,
    /// Emit an opaque placeholder and continue.
    Stub,
}

/// Per-invocation configuration.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub on_unresolved: OnUnresolved,
    /// Follow references outside the root set. Off restricts output to the
    /// roots themselves, ordered correctly among each other.
    pub follow_deps: bool,
    /// Prepended to every emitted catalog-type name.
    pub prefix: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            on_unresolved: OnUnresolved::default(),
            follow_deps: true,
            prefix: String::new(),
        }
    }
}

/// Ordered fragments plus the outcome report.
#[derive(Debug)]
pub struct Export {
    pub fragments: Vec<Fragment>,
    pub report: ExportReport,
}

impl Export {
    /// Assemble the fragments into one importable module block.
    pub fn module(&self) -> String {
        render_module(&self.fragments)
    }
}

/// Run one export: select roots, expand the closure, order, break cycles,
/// render.
pub fn export(
    catalog: &dyn TypeCatalog,
    patterns: &[String],
    options: &ExportOptions,
) -> Result<Export> {
    let all_names = catalog.names();
    let selection = pattern::select(&all_names, patterns);

    let mut report = ExportReport::default();
    for unmatched in &selection.unmatched {
        report
            .warnings
            .push(format!("pattern `{unmatched}` matched no types"));
    }
    if selection.names.is_empty() {
        report.warnings.push("no types selected".to_string());
        return Ok(Export {
            fragments: Vec::new(),
            report,
        });
    }

    let graph = DependencyGraph::build(catalog, &selection.names, options.follow_deps);

    let mut stubs: Vec<String> = Vec::new();
    for unresolved in graph.unresolved() {
        match options.on_unresolved {
            OnUnresolved::Fail => {
                return Err(Error::UnresolvedType {
                    name: unresolved.name.clone(),
                    referrer: unresolved.referrer.clone(),
                });
            }
            OnUnresolved::Stub => stubs.push(unresolved.name.clone()),
        }
    }
    for unsupported in graph.unsupported() {
        report.skipped.push(Skip {
            name: unsupported.name.clone(),
            reason: SkipReason::Unsupported {
                reason: unsupported.reason.clone(),
            },
        });
        if let Some(referrer) = unsupported.referrers.first() {
            match options.on_unresolved {
                OnUnresolved::Fail => {
                    return Err(Error::UnsupportedRef {
                        name: unsupported.name.clone(),
                        reason: unsupported.reason.clone(),
                        referrer: referrer.clone(),
                    });
                }
                OnUnresolved::Stub => stubs.push(unsupported.name.clone()),
            }
        }
    }
    stubs.sort_unstable();
    stubs.dedup();

    let topo = sort(&graph);
    let (plan, cycle_skips) = cycles::plan(&graph, &topo, &stubs);
    report.skipped.extend(cycle_skips);

    let renderer = Renderer::new(&graph, &options.prefix);
    let fragments = renderer.render(&plan);

    report.exported = plan
        .steps
        .iter()
        .filter(|step| matches!(step, EmitStep::Define(_) | EmitStep::Patch(_)))
        .map(|step| step.name().to_string())
        .collect();
    report.stubbed = stubs;
    if report.exported.is_empty() && report.stubbed.is_empty() {
        report
            .warnings
            .push("no types exported; output is empty".to_string());
    }

    Ok(Export { fragments, report })
}
