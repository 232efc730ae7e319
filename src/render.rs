use itertools::Itertools;
use token_vars_core::{RebuiltNode, RebuiltTree, TokenValue};
use tracing::warn;

use crate::{
    config::{Dialect, PlatformConfig},
    transform::Variable,
};

const DO_NOT_EDIT: &str = "Do not edit directly, this file was auto-generated.";

impl Dialect {
    pub fn declaration(&self, name: &str, value: &str) -> String {
        match self {
            Dialect::Css => format!("  --{name}: {value};"),
            Dialect::Scss => format!("${name}: {value};"),
        }
    }

    fn document(&self, declarations: &[String]) -> String {
        match self {
            Dialect::Css => {
                let body = declarations.iter().map(|d| format!("{d}\n")).join("");
                format!("/**\n * {DO_NOT_EDIT}\n */\n\n:root {{\n{body}}}\n")
            }
            Dialect::Scss => {
                let body = declarations.iter().map(|d| format!("{d}\n")).join("");
                format!("// {DO_NOT_EDIT}\n\n{body}")
            }
        }
    }
}

/// Every token of the tree in depth-first document order, before transforms.
/// Composite values are left out: neither dialect has a single-value form for them.
pub fn variables(tree: &RebuiltTree) -> Vec<Variable> {
    let mut out = Vec::new();
    collect(tree, &mut Vec::new(), &mut out);
    out
}

fn collect(tree: &RebuiltTree, path: &mut Vec<String>, out: &mut Vec<Variable>) {
    for (segment, node) in tree {
        path.push(segment.clone());
        match node {
            RebuiltNode::Token(token) if matches!(token.value, TokenValue::Composite(_)) => {
                warn!(path = %path.join("."), type_ = %token.type_, "composite values have no variable form, skipping");
            }
            RebuiltNode::Token(token) => out.push(Variable::new(
                path.clone(),
                token.value.to_string(),
                token.type_.clone(),
            )),
            RebuiltNode::Group(children) => collect(children, path, out),
        }
        path.pop();
    }
}

/// Variables of the tree with the platform's transforms applied in order.
pub fn transformed(tree: &RebuiltTree, platform: &PlatformConfig) -> Vec<Variable> {
    let mut vars = variables(tree);
    for var in &mut vars {
        for transform in &platform.transforms {
            var.apply(*transform);
        }
    }
    vars
}

pub fn render(tree: &RebuiltTree, platform: &PlatformConfig) -> String {
    let declarations = transformed(tree, platform)
        .iter()
        .map(|var| platform.dialect.declaration(&var.name, &var.value))
        .collect::<Vec<_>>();
    platform.dialect.document(&declarations)
}
