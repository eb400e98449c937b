use crate::entitys::menu_node::MenuNode;
use log::warn;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// 路由名称重复
    Name,
    /// 同一父路径下组件重复
    Component,
}

/// 一次重复冲突：先出现者生效，后出现者被记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteCollision {
    pub kind: CollisionKind,
    pub key: String,
    pub first_path: String,
    pub duplicate_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateReport {
    pub collisions: Vec<RouteCollision>,
}

impl DuplicateReport {
    pub fn is_clean(&self) -> bool {
        self.collisions.is_empty()
    }

    pub fn count(&self, kind: CollisionKind) -> usize {
        self.collisions.iter().filter(|c| c.kind == kind).count()
    }
}

#[derive(Default)]
struct Seen {
    names: HashMap<String, String>,
    components: HashMap<String, String>,
    report: DuplicateReport,
}

/// 检测已解析菜单树中的重复路由名称与重复组件，只读
pub fn check_duplicate_routes(menu_list: &[MenuNode]) -> DuplicateReport {
    let mut seen = Seen::default();
    check_nodes(menu_list, "", &mut seen);
    seen.report
}

fn check_nodes(nodes: &[MenuNode], parent_path: &str, seen: &mut Seen) {
    for node in nodes {
        let full_path = node.full_path();

        if !node.name.is_empty() {
            match seen.names.get(&node.name) {
                Some(first) => {
                    warn!("路由名称重复: [{}] 首次出现于 {}，重复于 {}", node.name, first, full_path);
                    seen.report.collisions.push(RouteCollision {
                        kind: CollisionKind::Name,
                        key: node.name.clone(),
                        first_path: first.clone(),
                        duplicate_path: full_path.to_string(),
                    });
                }
                None => {
                    seen.names.insert(node.name.clone(), full_path.to_string());
                }
            }
        }

        if let Some(component) = node.component.as_ref().filter(|c| !c.is_layout()) {
            let key = format!("{}:{}", parent_path, component.component_key());
            match seen.components.get(&key) {
                Some(first) => {
                    warn!("组件路径重复: [{}] 首次出现于 {}，重复于 {}", key, first, full_path);
                    seen.report.collisions.push(RouteCollision {
                        kind: CollisionKind::Component,
                        key,
                        first_path: first.clone(),
                        duplicate_path: full_path.to_string(),
                    });
                }
                None => {
                    seen.components.insert(key, full_path.to_string());
                }
            }
        }

        if node.has_children() {
            check_nodes(&node.children, full_path, seen);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::path_resolver::resolve_menu_paths;
    use crate::entitys::menu_node::{ComponentRef, MenuMeta};

    fn node(name: &str, path: &str, component: &str, children: Vec<MenuNode>) -> MenuNode {
        MenuNode {
            id: 0,
            name: name.to_string(),
            raw_path: path.to_string(),
            resolved_path: None,
            component: ComponentRef::parse(component),
            redirect: None,
            meta: MenuMeta::default(),
            children,
        }
    }

    #[test]
    fn sibling_name_clash_reported_once() {
        let tree = resolve_menu_paths(
            &[node(
                "system",
                "/system",
                "Layout",
                vec![node("menus", "menu", "/system/menu", vec![]), node("menus", "menu2", "/system/menu2", vec![])],
            )],
            "",
        );
        let before = tree.clone();
        let report = check_duplicate_routes(&tree);

        assert_eq!(report.collisions.len(), 1);
        let collision = &report.collisions[0];
        assert_eq!(collision.kind, CollisionKind::Name);
        assert_eq!(collision.first_path, "/system/menu");
        assert_eq!(collision.duplicate_path, "/system/menu2");
        assert_eq!(tree, before);
    }

    #[test]
    fn component_clash_is_scoped_by_parent() {
        let tree = resolve_menu_paths(
            &[
                node(
                    "a",
                    "/a",
                    "Layout",
                    vec![node("a1", "x", "/shared/view", vec![]), node("a2", "y", "/shared/view", vec![])],
                ),
                node("b", "/b", "Layout", vec![node("b1", "x", "/shared/view", vec![])]),
            ],
            "",
        );
        let report = check_duplicate_routes(&tree);
        assert_eq!(report.count(CollisionKind::Component), 1);
        assert_eq!(report.collisions[0].key, "/a:/shared/view");
        assert_eq!(report.count(CollisionKind::Name), 0);
    }

    #[test]
    fn layout_alias_may_repeat() {
        let tree = resolve_menu_paths(
            &[node("a", "/a", "/index/index", vec![]), node("b", "/b", "Layout", vec![])],
            "",
        );
        assert!(check_duplicate_routes(&tree).is_clean());
    }

    #[test]
    fn other_aliases_use_alias_key() {
        let tree = resolve_menu_paths(
            &[node("e1", "/e1", "Exception404", vec![]), node("e2", "/e2", "/exception/404", vec![])],
            "",
        );
        let report = check_duplicate_routes(&tree);
        assert_eq!(report.collisions.len(), 1);
        assert_eq!(report.collisions[0].key, ":Alias.Exception404");
    }

    #[test]
    fn reports_follow_preorder() {
        let tree = resolve_menu_paths(
            &[
                node("dup", "/one", "", vec![node("dup", "inner", "", vec![])]),
                node("dup", "/two", "", vec![]),
            ],
            "",
        );
        let report = check_duplicate_routes(&tree);
        let dupes: Vec<&str> = report.collisions.iter().map(|c| c.duplicate_path.as_str()).collect();
        assert_eq!(dupes, vec!["/one/inner", "/two"]);
    }
}
