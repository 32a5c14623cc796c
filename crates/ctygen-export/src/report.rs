//! Per-invocation outcome report.
//!
//! The engine never prints; it accumulates what was exported, stubbed, or
//! skipped (and why) into an [`ExportReport`] the caller renders or
//! serializes. Warnings never fail an invocation.

use std::fmt;
use std::fmt::Write as _;

/// Why a name was left out of the output.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Member of a cycle with no pointer indirection to break it.
    NonPointerCycle,
    /// Catalog kind the exporter cannot translate.
    Unsupported { reason: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NonPointerCycle => {
                write!(f, "unrepresentable cycle without pointer indirection")
            }
            SkipReason::Unsupported { reason } => {
                write!(f, "unsupported host type: {reason}")
            }
        }
    }
}

/// One skipped name with its reason.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Skip {
    pub name: String,
    pub reason: SkipReason,
}

/// What an invocation produced, stubbed, skipped, and warned about.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct ExportReport {
    /// Fully defined names, in emission order.
    pub exported: Vec<String>,
    /// Names emitted as opaque stubs (stub mode only).
    pub stubbed: Vec<String>,
    /// Names left out, with reasons.
    pub skipped: Vec<Skip>,
    /// Non-fatal notes: patterns with no match, empty selections.
    pub warnings: Vec<String>,
}

impl ExportReport {
    /// Nothing was stubbed, skipped, or warned about.
    pub fn is_clean(&self) -> bool {
        self.stubbed.is_empty() && self.skipped.is_empty() && self.warnings.is_empty()
    }

    /// Human-readable summary, one line per item.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.exported.is_empty() {
            out.push_str("exported 0 types\n");
        } else {
            let _ = writeln!(
                out,
                "exported {} types: {}",
                self.exported.len(),
                self.exported.join(", ")
            );
        }
        for name in &self.stubbed {
            let _ = writeln!(out, "stubbed `{name}`: definition unavailable, emitted opaque");
        }
        for skip in &self.skipped {
            let _ = writeln!(out, "skipped `{}`: {}", skip.name, skip.reason);
        }
        for warning in &self.warnings {
            let _ = writeln!(out, "warning: {warning}");
        }
        out
    }
}
