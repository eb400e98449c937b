use crate::entitys::menu_node::MenuNode;

/// 合并连续的 `/`
pub fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut last_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !last_slash {
                out.push(c);
            }
            last_slash = true;
        } else {
            out.push(c);
            last_slash = false;
        }
    }
    out
}

/// 非空路径段
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// 拼接父路径与子路径
///
/// 子路径已经以父路径的全部段开头时视为已解析，只做规范化，保证重复解析结果不变。
pub fn join_path(parent_path: &str, raw_path: &str) -> String {
    if raw_path.is_empty() {
        return String::new();
    }
    if parent_path.is_empty() {
        return collapse_slashes(raw_path);
    }
    let parent = path_segments(parent_path);
    let raw = path_segments(raw_path);
    if !parent.is_empty() && raw.len() > parent.len() && raw.starts_with(&parent) {
        // 保持与父路径一致的前导 `/`
        let resolved = collapse_slashes(raw_path);
        if parent_path.starts_with('/') && !resolved.starts_with('/') {
            return format!("/{}", resolved);
        }
        return resolved;
    }
    collapse_slashes(&format!("{}/{}", parent_path, raw_path))
}

/// 计算单个节点及其子树的完整路径
pub fn resolve_menu_path(node: &MenuNode, parent_path: &str) -> MenuNode {
    let full_path = join_path(parent_path, &node.raw_path);
    let children = node.children.iter().map(|child| resolve_menu_path(child, &full_path)).collect();
    MenuNode { resolved_path: Some(full_path), children, ..node.clone() }
}

/// 计算整棵菜单树的完整路径，返回新树
pub fn resolve_menu_paths(nodes: &[MenuNode], parent_path: &str) -> Vec<MenuNode> {
    nodes.iter().map(|node| resolve_menu_path(node, parent_path)).collect()
}
