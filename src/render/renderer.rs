use colored::{ColoredString, Colorize};

use crate::filesystem::{Node, NodeKind};
use crate::git::RepoState;

const BRANCH: &str = "├── ";
const CORNER: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";
const UNKNOWN_SUFFIX: &str = "(unknown item type)";

/// Where a node sits among its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// Top of the output, drawn without any glyph.
    Root,
    Middle,
    Last,
}

impl Position {
    fn among(index: usize, count: usize) -> Self {
        if index + 1 == count {
            Position::Last
        } else {
            Position::Middle
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            Position::Root => "",
            Position::Middle => BRANCH,
            Position::Last => CORNER,
        }
    }

    /// What the node's descendants add to the indent.
    fn continuation(self) -> &'static str {
        match self {
            Position::Root => "",
            Position::Middle => PIPE,
            Position::Last => BLANK,
        }
    }
}

/// Turns a [`Node`] tree into display lines.
///
/// Inside a repo-aware context (the parent or the node itself contains a
/// repository, or the node is one) files are bright black, directories blue,
/// and repositories bold green when clean or bold red when dirty. Elsewhere
/// only files are colored.
#[derive(Debug, Clone, Copy)]
pub struct TreeRenderer {
    colorize: bool,
}

impl TreeRenderer {
    pub fn new(colorize: bool) -> Self {
        Self { colorize }
    }

    /// A root with children is not drawn itself; its children become the
    /// top-level lines.
    pub fn render(&self, root: &Node) -> Vec<String> {
        let mut lines = Vec::new();
        if root.children.is_empty() {
            self.render_node(root, "", Position::Root, false, &mut lines);
        } else {
            self.render_children(root, "", &mut lines);
        }
        lines
    }

    fn render_node(
        &self,
        node: &Node,
        indent: &str,
        position: Position,
        parent_contains_repo: bool,
        lines: &mut Vec<String>,
    ) {
        let repo_aware =
            parent_contains_repo || node.contains_repo || node.kind.is_repo_directory();
        lines.push(format!(
            "{indent}{}{}",
            position.glyph(),
            self.label(node, repo_aware)
        ));

        let child_indent = format!("{indent}{}", position.continuation());
        self.render_children(node, &child_indent, lines);
    }

    fn render_children(&self, node: &Node, indent: &str, lines: &mut Vec<String>) {
        let count = node.children.len();
        for (index, child) in node.children.iter().enumerate() {
            self.render_node(
                child,
                indent,
                Position::among(index, count),
                node.contains_repo,
                lines,
            );
        }
    }

    fn label(&self, node: &Node, repo_aware: bool) -> String {
        let name = node.name.as_str();
        match &node.kind {
            NodeKind::File => self.paint(name, |s| s.bright_black()),
            NodeKind::Directory if repo_aware => self.paint(name, |s| s.blue()),
            NodeKind::Directory => name.to_string(),
            NodeKind::RepoDirectory(status) => match status.state() {
                RepoState::Clean => self.paint(name, |s| s.green().bold()),
                RepoState::Dirty => self.paint(name, |s| s.red().bold()),
            },
            NodeKind::Unknown => format!("{name} {UNKNOWN_SUFFIX}"),
        }
    }

    fn paint(&self, text: &str, style: impl FnOnce(&str) -> ColoredString) -> String {
        if self.colorize {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}
