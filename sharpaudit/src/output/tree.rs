//! Directory-tree pretty printer for the Markdown report.

use std::collections::BTreeMap;

#[derive(Default)]
struct TreeNode {
    dirs: BTreeMap<String, TreeNode>,
    files: Vec<String>,
}

impl TreeNode {
    fn insert(&mut self, components: &[&str]) {
        match components {
            [] => {}
            [file] => self.files.push((*file).to_owned()),
            [dir, rest @ ..] => {
                self.dirs.entry((*dir).to_owned()).or_default().insert(rest);
            }
        }
    }
}

/// Renders `/`-separated relative paths as a `├──`/`└──` tree rooted at
/// `root_label`. Directories sort before files; both sort
/// case-insensitively by name.
#[must_use]
pub fn render_tree(root_label: &str, paths: &[&str]) -> String {
    let mut root = TreeNode::default();
    for path in paths {
        let components: Vec<&str> = path.split('/').filter(|c| !c.is_empty()).collect();
        root.insert(&components);
    }

    let mut out = String::new();
    out.push_str(root_label);
    out.push('\n');
    render_node(&root, "", &mut out);
    out
}

fn render_node(node: &TreeNode, prefix: &str, out: &mut String) {
    let mut dirs: Vec<&String> = node.dirs.keys().collect();
    dirs.sort_by_key(|name| name.to_lowercase());
    let mut files: Vec<&String> = node.files.iter().collect();
    files.sort_by_key(|name| name.to_lowercase());

    let total = dirs.len() + files.len();
    for (i, name) in dirs.iter().chain(files.iter()).enumerate() {
        let last = i + 1 == total;
        let connector = if last { "└── " } else { "├── " };
        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(name);
        out.push('\n');

        if let Some(child) = node.dirs.get(*name) {
            let child_prefix = if last {
                format!("{prefix}    ")
            } else {
                format!("{prefix}│   ")
            };
            render_node(child, &child_prefix, out);
        }
    }
}
