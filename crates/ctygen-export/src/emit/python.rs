//! ctypes renderer.
//!
//! Each plan step becomes one fragment. Field order is preserved exactly
//! as the catalog holds it; packed aggregates set `_pack_ = 1` before
//! `_fields_` so the pragma applies. References to enums render the
//! enum's underlying scalar, since ctypes cannot take an `IntEnum`
//! subclass in a `_fields_` entry.

use std::fmt::Write as _;

use ctygen_core::{EnumMember, Field, Primitive, RefTarget, TypeKind, TypeRef};

use crate::cycles::{EmitPlan, EmitStep};
use crate::graph::DependencyGraph;

use super::Fragment;

/// Renders plan steps against a built graph. `prefix` is prepended to
/// every catalog-type name, definitions and references alike; ctypes and
/// enum builtins are never prefixed.
pub struct Renderer<'a> {
    graph: &'a DependencyGraph<'a>,
    prefix: &'a str,
}

impl<'a> Renderer<'a> {
    pub fn new(graph: &'a DependencyGraph<'a>, prefix: &'a str) -> Self {
        Renderer { graph, prefix }
    }

    pub fn render(&self, plan: &EmitPlan) -> Vec<Fragment> {
        plan.steps
            .iter()
            .map(|step| Fragment {
                name: step.name().to_string(),
                text: self.render_step(step),
            })
            .collect()
    }

    fn render_step(&self, step: &EmitStep) -> String {
        match step {
            // A stub has no definition to draw on; an opaque Structure
            // satisfies pointer references, which is all a stub can carry.
            EmitStep::Stub(name) => self.render_shell_class(name, "ctypes.Structure"),
            EmitStep::Shell(name) => {
                let base = match self.graph.node(name).map(|node| &node.kind) {
                    Some(TypeKind::Union { .. }) => "ctypes.Union",
                    _ => "ctypes.Structure",
                };
                self.render_shell_class(name, base)
            }
            EmitStep::Define(name) => self.render_define(name),
            EmitStep::Patch(name) => self.render_patch(name),
        }
    }

    fn render_define(&self, name: &str) -> String {
        let Some(node) = self.graph.node(name) else {
            return String::new();
        };
        match &node.kind {
            TypeKind::Primitive(prim) => {
                format!(
                    "{} = {}\n",
                    self.class_name(name),
                    prim.ctype().unwrap_or("None")
                )
            }
            TypeKind::Struct { packed, fields } => {
                self.render_class(name, "ctypes.Structure", *packed, fields)
            }
            TypeKind::Union { fields } => self.render_class(name, "ctypes.Union", false, fields),
            TypeKind::Enum { members, .. } => self.render_enum(name, members),
            TypeKind::Typedef { target } => {
                format!("{} = {}\n", self.class_name(name), self.render_ref(target))
            }
            TypeKind::Pointer { target } => {
                format!("{} = {}\n", self.class_name(name), self.render_pointer(target))
            }
            TypeKind::Array { element, length } => {
                let elem = self.render_ref(element);
                let elem = if elem.contains(" * ") {
                    format!("({elem})")
                } else {
                    elem
                };
                format!("{} = {} * {}\n", self.class_name(name), elem, length)
            }
            TypeKind::FunctionPointer { params, ret } => {
                let mut args = vec![self.render_return(ret)];
                args.extend(params.iter().map(|p| self.render_ref(p)));
                format!(
                    "{} = ctypes.CFUNCTYPE({})\n",
                    self.class_name(name),
                    args.join(", ")
                )
            }
            TypeKind::Unsupported { .. } => {
                unreachable!("unsupported types are never planned")
            }
        }
    }

    fn render_shell_class(&self, name: &str, base: &str) -> String {
        format!("class {}({base}):\n    pass\n", self.class_name(name))
    }

    fn render_class(&self, name: &str, base: &str, packed: bool, fields: &[Field]) -> String {
        let mut out = format!("class {}({base}):\n", self.class_name(name));
        if packed {
            out.push_str("    _pack_ = 1\n");
        }
        if fields.is_empty() {
            out.push_str("    _fields_ = []\n");
        } else {
            out.push_str("    _fields_ = [\n");
            for entry in self.field_entries(fields) {
                let _ = writeln!(out, "        {entry},");
            }
            out.push_str("    ]\n");
        }
        out
    }

    fn render_patch(&self, name: &str) -> String {
        let Some(node) = self.graph.node(name) else {
            return String::new();
        };
        let (packed, fields) = match &node.kind {
            TypeKind::Struct { packed, fields } => (*packed, fields),
            TypeKind::Union { fields } => (false, fields),
            _ => return self.render_define(name),
        };
        let class = self.class_name(name);
        let mut out = String::new();
        if packed {
            let _ = writeln!(out, "{class}._pack_ = 1");
        }
        if fields.is_empty() {
            let _ = writeln!(out, "{class}._fields_ = []");
        } else {
            let _ = writeln!(out, "{class}._fields_ = [");
            for entry in self.field_entries(fields) {
                let _ = writeln!(out, "    {entry},");
            }
            out.push_str("]\n");
        }
        out
    }

    fn render_enum(&self, name: &str, members: &[EnumMember]) -> String {
        let mut out = format!("class {}(enum.IntEnum):\n", self.class_name(name));
        if members.is_empty() {
            out.push_str("    pass\n");
        } else {
            for member in members {
                let _ = writeln!(out, "    {} = {}", member.name, member.value);
            }
        }
        out
    }

    fn field_entries(&self, fields: &[Field]) -> Vec<String> {
        fields
            .iter()
            .map(|field| {
                let ty = self.render_ref(&field.ty);
                match field.bits {
                    Some(bits) => format!("(\"{}\", {ty}, {bits})", field.name),
                    None => format!("(\"{}\", {ty})", field.name),
                }
            })
            .collect()
    }

    /// Render a reference with its pointer and array modifiers applied.
    fn render_ref(&self, type_ref: &TypeRef) -> String {
        let mut out = match &type_ref.target {
            RefTarget::Prim(prim) => prim.ctype().unwrap_or("None").to_string(),
            RefTarget::Named(name) => match self.graph.node(name).map(|node| &node.kind) {
                // ctypes cannot hold an IntEnum in _fields_; use the
                // underlying scalar and keep the class for its mapping.
                Some(TypeKind::Enum { underlying, .. }) => underlying
                    .ctype()
                    .unwrap_or("ctypes.c_int32")
                    .to_string(),
                // Stubbed names resolve to their opaque class.
                _ => self.class_name(name),
            },
        };
        for level in 0..type_ref.ptr {
            let void_base =
                level == 0 && matches!(type_ref.target, RefTarget::Prim(Primitive::Void));
            out = if void_base {
                "ctypes.c_void_p".to_string()
            } else {
                format!("ctypes.POINTER({out})")
            };
        }
        for (i, dim) in type_ref.dims.iter().rev().enumerate() {
            if i > 0 {
                out = format!("({out})");
            }
            let _ = write!(out, " * {dim}");
        }
        out
    }

    /// One extra level of indirection on top of the reference.
    fn render_pointer(&self, target: &TypeRef) -> String {
        let plain_void = matches!(target.target, RefTarget::Prim(Primitive::Void))
            && target.ptr == 0
            && target.dims.is_empty();
        if plain_void {
            "ctypes.c_void_p".to_string()
        } else {
            format!("ctypes.POINTER({})", self.render_ref(target))
        }
    }

    /// CFUNCTYPE return slot; void renders as `None`.
    fn render_return(&self, ret: &TypeRef) -> String {
        let plain_void = matches!(ret.target, RefTarget::Prim(Primitive::Void))
            && ret.ptr == 0
            && ret.dims.is_empty();
        if plain_void {
            "None".to_string()
        } else {
            self.render_ref(ret)
        }
    }

    fn class_name(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }
}
