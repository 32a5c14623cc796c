//! Rendering of planned emission steps into Python ctypes source.
//!
//! Pure functions of the plan and graph: no file or storage side effects
//! happen here. `python` holds the ctypes renderer; `render_module`
//! assembles fragments into one importable block.

mod python;


pub use python::Renderer;

/// One emitted text fragment, tagged with the type name it defines (or
/// declares, for shells and stubs).
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub name: String,
    pub text: String,
}

/// Join fragments into a self-contained module block under the imports it
/// needs.
pub fn render_module(fragments: &[Fragment]) -> String {
    let mut out = String::from("import ctypes\n");
    if fragments.iter().any(|f| f.text.contains("(enum.IntEnum)")) {
        out.push_str("import enum\n");
    }
    for fragment in fragments {
        out.push('\n');
        out.push_str(&fragment.text);
    }
    out
}
