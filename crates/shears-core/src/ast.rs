//! The syntax tree handed to us by the external stylesheet parser.
//!
//! The wire format is JSON: every node is `{"type": ..., "content": ...}`
//! where `content` is either an array of child nodes or the node's literal
//! source text. Root stylesheets additionally carry a `sourcePath`.
//!
//! Shape contract with the parser:
//! - Leaf nodes hold their literal text, delimiters included (`Space` holds
//!   the whitespace run, `DeclarationDelimiter` holds `";"`, `AtKeyword`
//!   holds the directive word such as `"@extend"`).
//! - Kinds whose surrounding characters the parser strips are re-decorated
//!   on render: `Variable` as `$` + name, `Interpolation` as `#{...}`,
//!   `Parenthesis` as `(...)`, `Block` as `{...}`, `Comment` as `/*...*/`.
//! - A `Variable` holds its bare name, either directly as text or as a
//!   single `Identifier` child.
//! - `Selector` nodes appear only as direct children of a `Ruleset`;
//!   directive targets (`@extend`, `@include`) are plain leaves.
//! - The children of a `Loop` before its first `Block` child form the loop
//!   header.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Stylesheet,
    Ruleset,
    Selector,
    SimpleSelector,
    Block,
    Declaration,
    DeclarationDelimiter,
    Property,
    PropertyDelimiter,
    Value,
    Variable,
    Identifier,
    Interpolation,
    Parenthesis,
    Function,
    Arguments,
    Mixin,
    Include,
    Extend,
    Loop,
    AtKeyword,
    AtRule,
    Operator,
    Space,
    Number,
    String,
    Color,
    Dimension,
    Percentage,
    Uri,
    Comment,
}

impl NodeKind {
    /// The tag used in the JSON wire format and in demotion comments.
    pub fn tag(self) -> &'static str {
        match self {
            NodeKind::Stylesheet => "stylesheet",
            NodeKind::Ruleset => "ruleset",
            NodeKind::Selector => "selector",
            NodeKind::SimpleSelector => "simpleSelector",
            NodeKind::Block => "block",
            NodeKind::Declaration => "declaration",
            NodeKind::DeclarationDelimiter => "declarationDelimiter",
            NodeKind::Property => "property",
            NodeKind::PropertyDelimiter => "propertyDelimiter",
            NodeKind::Value => "value",
            NodeKind::Variable => "variable",
            NodeKind::Identifier => "identifier",
            NodeKind::Interpolation => "interpolation",
            NodeKind::Parenthesis => "parenthesis",
            NodeKind::Function => "function",
            NodeKind::Arguments => "arguments",
            NodeKind::Mixin => "mixin",
            NodeKind::Include => "include",
            NodeKind::Extend => "extend",
            NodeKind::Loop => "loop",
            NodeKind::AtKeyword => "atKeyword",
            NodeKind::AtRule => "atRule",
            NodeKind::Operator => "operator",
            NodeKind::Space => "space",
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::Color => "color",
            NodeKind::Dimension => "dimension",
            NodeKind::Percentage => "percentage",
            NodeKind::Uri => "uri",
            NodeKind::Comment => "comment",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Children(Vec<Node>),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub content: Content,
    #[serde(rename = "sourcePath", default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,
}

impl Node {
    pub fn branch(kind: NodeKind, children: Vec<Node>) -> Self {
        Self {
            kind,
            content: Content::Children(children),
            source_path: None,
        }
    }

    pub fn leaf(kind: NodeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            content: Content::Text(text.into()),
            source_path: None,
        }
    }

    pub fn children(&self) -> Option<&[Node]> {
        match &self.content {
            Content::Children(children) => Some(children),
            Content::Text(_) => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            Content::Children(_) => None,
        }
    }

    /// The bare name of a `Variable` node, from its text or its
    /// `Identifier` child.
    pub fn variable_name(&self) -> Option<&str> {
        if self.kind != NodeKind::Variable {
            return None;
        }
        match &self.content {
            Content::Text(name) => Some(name),
            Content::Children(children) => children
                .iter()
                .find(|child| child.kind == NodeKind::Identifier)
                .and_then(|ident| ident.text()),
        }
    }

    /// Replaces this node with a diagnostic comment, removing its semantic
    /// effect without changing the parent's child list.
    pub fn demote(&mut self, tag: &str) {
        self.kind = NodeKind::Comment;
        self.content = Content::Text(format!(" {tag} "));
        self.source_path = None;
    }
}
