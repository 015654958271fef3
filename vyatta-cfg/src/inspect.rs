use vyatta_cfg_core::{ConfigMap, ConfigNode};

/// Render a configuration tree outline down to `max_depth` levels.
pub fn render_tree(map: &ConfigMap, max_depth: usize) -> String {
    let mut out = String::new();
    render_map(map, 0, max_depth, &mut out);
    out
}

fn render_map(map: &ConfigMap, depth: usize, max_depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    for (key, node) in map {
        match node {
            ConfigNode::Map(child) => {
                if depth >= max_depth && !child.is_empty() {
                    let count = node.leaf_count();
                    let noun = if count == 1 { "leaf" } else { "leaves" };
                    out.push_str(&format!("{indent}{key}/ ({count} {noun})\n"));
                    continue;
                }
                out.push_str(&format!("{indent}{key}/\n"));
                render_map(child, depth + 1, max_depth, out);
            }
            ConfigNode::Scalar(value) if value.is_empty() => {
                out.push_str(&format!("{indent}{key}\n"));
            }
            ConfigNode::Scalar(value) => out.push_str(&format!("{indent}{key} = {value}\n")),
            ConfigNode::List(values) => {
                out.push_str(&format!("{indent}{key} = [{}]\n", values.join(", ")));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::render_tree;
    use vyatta_cfg_core::parse;

    #[test]
    fn depth_limit_collapses_blocks() {
        let tree = parse("system {\n    host-name r1\n    name-server 1.1.1.1\n    name-server 8.8.8.8\n    login {\n        user admin {\n            level admin\n        }\n    }\n}\n")
            .expect("parse");

        assert_eq!(render_tree(&tree, 0), "system/ (4 leaves)\n");
        assert_eq!(
            render_tree(&tree, 2),
            "system/\n  host-name = r1\n  name-server = [1.1.1.1, 8.8.8.8]\n  login/\n    user/ (1 leaf)\n"
        );
    }
}
