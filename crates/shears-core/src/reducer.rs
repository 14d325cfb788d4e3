//! The reduction pass: one depth-first walk that decides, per node, whether
//! its subtree can be affected by an override variable, and demotes every
//! dead removable node to a diagnostic comment in place.
//!
//! Liveness of `@extend` targets and `@include`d mixins is resolved against
//! registries filled by subtrees visited earlier in document order. There
//! is no fixed point: a mixin or selector defined after its use site is not
//! seen and the use is pruned.

use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};

use crate::ast::{Content, Node, NodeKind};
use crate::emitter;
use crate::error::{Error, Result};
use crate::overrides::{scan_variable_names, OverrideSet};

#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Variable definitions file naming the overridable variables. Required.
    pub vars_file: Option<PathBuf>,
    /// Base directory for resolving a relative `vars_file`. Defaults to the
    /// process working directory.
    pub cwd: Option<PathBuf>,
    /// Rewrite override variable reads into placeholder tokens for a later
    /// templating pass.
    pub templatize: bool,
}

/// Node kinds eligible for demotion when their subtree is dead.
const REMOVABLE: [NodeKind; 6] = [
    NodeKind::Declaration,
    NodeKind::Extend,
    NodeKind::Include,
    NodeKind::Loop,
    NodeKind::Mixin,
    NodeKind::Ruleset,
];

pub struct Reducer {
    overrides: OverrideSet,
    vars_path: PathBuf,
    templatize: bool,
    /// Selector text per open ruleset, innermost last.
    selector_stack: Vec<String>,
    /// Joined selector paths of rulesets proven live earlier in the walk.
    kept_selectors: HashSet<String>,
    /// Names of mixins proven live earlier in the walk.
    kept_mixins: HashSet<String>,
    /// Names bound by the innermost loop header, when that header mentions
    /// an override variable.
    loop_scope: HashSet<String>,
}

impl Reducer {
    pub fn new(options: Options) -> Result<Self> {
        let vars_file = options.vars_file.ok_or(Error::MissingVarsFile)?;
        let vars_path = resolve(&vars_file, options.cwd.as_deref());
        let overrides = OverrideSet::load(&vars_path)?;
        Ok(Self::with_overrides(overrides, vars_path, options.templatize))
    }

    /// Builds a reducer around an already loaded override set. One loaded
    /// set can seed any number of reducers; the traversal state itself is
    /// per instance and a reducer should only ever reduce one tree.
    pub fn with_overrides(overrides: OverrideSet, vars_path: PathBuf, templatize: bool) -> Self {
        Self {
            overrides,
            vars_path,
            templatize,
            selector_stack: Vec::new(),
            kept_selectors: HashSet::new(),
            kept_mixins: HashSet::new(),
            loop_scope: HashSet::new(),
        }
    }

    pub fn overrides(&self) -> &OverrideSet {
        &self.overrides
    }

    pub fn vars_path(&self) -> &Path {
        &self.vars_path
    }

    /// Reduces the tree rooted at `root` in place. Returns whether anything
    /// in the tree must be preserved.
    pub fn reduce(&mut self, root: &mut Node) -> bool {
        self.visit(root, None)
    }

    fn visit(&mut self, node: &mut Node, parent: Option<NodeKind>) -> bool {
        match node.kind {
            NodeKind::Selector => {
                self.selector_stack
                    .push(emitter::render(node).trim().to_string());
            }
            NodeKind::Loop => self.enter_loop(node),
            NodeKind::Variable => {
                if let Some(parent) = parent {
                    return self.visit_variable(node, parent);
                }
            }
            NodeKind::Extend => {
                if let Some(target) = directive_argument(node) {
                    if self.kept_selectors.contains(&target) {
                        return true;
                    }
                }
            }
            NodeKind::Include => {
                if let Some(argument) = directive_argument(node) {
                    if self.kept_mixins.contains(include_name(&argument)) {
                        return true;
                    }
                }
            }
            NodeKind::Stylesheet
                if node.source_path.as_deref() == Some(self.vars_path.as_path()) =>
            {
                // An inlined copy of the vars file itself never survives.
                node.demote("varsfile");
                return false;
            }
            _ => {}
        }

        let kind = node.kind;
        let mut keep = false;
        if let Content::Children(children) = &mut node.content {
            for child in children.iter_mut() {
                keep |= self.visit(child, Some(kind));
            }
        }

        match kind {
            NodeKind::Mixin if keep => self.register_mixin(node),
            NodeKind::Ruleset => {
                if keep && !self.selector_stack.is_empty() {
                    let path = self.selector_stack.join(" ");
                    log::debug!("ruleset kept: {path}");
                    self.kept_selectors.insert(path);
                }
                self.selector_stack.pop();
            }
            NodeKind::Loop => self.loop_scope.clear(),
            _ => {}
        }

        if !keep && REMOVABLE.contains(&kind) {
            node.demote(kind.tag());
            return false;
        }
        keep
    }

    fn visit_variable(&mut self, node: &mut Node, parent: NodeKind) -> bool {
        let name = match node.variable_name() {
            Some(name) => name.to_string(),
            // A variable with no name cannot be classified; only keep it
            // when it is an assignment target.
            None => return parent == NodeKind::Property,
        };
        let is_override = self.overrides.contains(&name);
        let keepable = is_override || self.loop_scope.contains(&name);
        let read_context = matches!(
            parent,
            NodeKind::Value | NodeKind::Interpolation | NodeKind::Parenthesis | NodeKind::Loop
        );
        if self.templatize && is_override && read_context {
            node.kind = NodeKind::Identifier;
            node.content = Content::Text(format!("____{name}____"));
        }
        parent == NodeKind::Property || (read_context && keepable)
    }

    /// Binds the loop header's variable names as keepable for the duration
    /// of this loop's subtree, but only when the header mentions at least
    /// one override variable. A nested loop replaces the scope outright.
    fn enter_loop(&mut self, node: &Node) {
        let header = loop_header_text(node);
        let names = scan_variable_names(&header);
        let live = names.iter().any(|name| self.overrides.contains(name));
        self.loop_scope = if live {
            names.into_iter().collect()
        } else {
            HashSet::new()
        };
    }

    fn register_mixin(&mut self, node: &Node) {
        let name = node
            .children()
            .and_then(|children| {
                children
                    .iter()
                    .find(|child| child.kind == NodeKind::Identifier)
            })
            .and_then(|ident| ident.text());
        match name {
            Some(name) => {
                log::debug!("mixin kept: {name}");
                self.kept_mixins.insert(name.to_string());
            }
            // A mixin without a name cannot be included anyway.
            None => log::warn!("mixin definition without an identifier, not registered"),
        }
    }
}

fn resolve(path: &Path, cwd: Option<&Path>) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match cwd {
        Some(base) => base.join(path),
        None => env::current_dir()
            .map(|base| base.join(path))
            .unwrap_or_else(|_| path.to_path_buf()),
    }
}

/// Rendered text of a directive node with the leading `@word` stripped and
/// any trailing `;` trimmed: `@extend .a .b` becomes `.a .b`.
fn directive_argument(node: &Node) -> Option<String> {
    let text = emitter::render(node);
    let rest = text.trim().strip_prefix('@')?;
    let argument = match rest.split_once(char::is_whitespace) {
        Some((_, argument)) => argument,
        None => return None,
    };
    let argument = argument.trim().trim_end_matches(';').trim_end();
    if argument.is_empty() {
        None
    } else {
        Some(argument.to_string())
    }
}

/// The mixin name of an include argument; arguments do not participate in
/// the registry match, so `foo(4px)` matches a mixin registered as `foo`.
fn include_name(argument: &str) -> &str {
    argument
        .split(|c: char| c == '(' || c.is_whitespace())
        .next()
        .unwrap_or(argument)
}

fn loop_header_text(node: &Node) -> String {
    match node.children() {
        Some(children) => {
            let mut header = String::new();
            for child in children {
                if child.kind == NodeKind::Block {
                    break;
                }
                header.push_str(&emitter::render(child));
            }
            header
        }
        None => node.text().unwrap_or_default().to_string(),
    }
}
