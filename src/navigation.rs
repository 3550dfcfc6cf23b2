//! Side navigation for the dashboard.
//!
//! Sections are static; what a user sees depends on the session role and the
//! current path.

use crate::session::Role;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NavItem {
    pub name: &'static str,
    pub link: &'static str,
    pub icon: &'static str,
    /// Hidden unless the user is a platform master.
    pub only_master: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct NavGroup {
    pub heading: &'static str,
    pub items: &'static [NavItem],
}

pub const SIDEBAR: &[NavGroup] = &[NavGroup {
    heading: "Sessões",
    items: &[
        NavItem {
            name: "Associados",
            link: "/painel/associados",
            icon: "users",
            only_master: false,
        },
        NavItem {
            name: "Clientes",
            link: "/painel/clientes",
            icon: "store",
            only_master: false,
        },
        NavItem {
            name: "Usuários",
            link: "/painel/usuarios",
            icon: "circle-user-round",
            only_master: false,
        },
    ],
}];

/// A rendered sidebar entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NavLink {
    pub name: &'static str,
    pub link: &'static str,
    pub icon: &'static str,
    pub active: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NavSection {
    pub heading: &'static str,
    pub links: Vec<NavLink>,
}

/// Sidebar for `role` while viewing `pathname`. Empty groups are dropped.
#[must_use]
pub fn sidebar(role: Option<Role>, pathname: &str) -> Vec<NavSection> {
    build(SIDEBAR, role, pathname)
}

fn build(groups: &[NavGroup], role: Option<Role>, pathname: &str) -> Vec<NavSection> {
    let is_master = role.is_some_and(Role::is_master);

    groups
        .iter()
        .filter_map(|group| {
            let links: Vec<NavLink> = group
                .items
                .iter()
                .filter(|item| is_master || !item.only_master)
                .map(|item| NavLink {
                    name: item.name,
                    link: item.link,
                    icon: item.icon,
                    active: pathname.contains(item.link),
                })
                .collect();
            (!links.is_empty()).then_some(NavSection {
                heading: group.heading,
                links,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GATED: &[NavGroup] = &[
        NavGroup {
            heading: "Sessões",
            items: &[
                NavItem {
                    name: "Clientes",
                    link: "/painel/clientes",
                    icon: "store",
                    only_master: false,
                },
                NavItem {
                    name: "Usuários",
                    link: "/painel/usuarios",
                    icon: "circle-user-round",
                    only_master: true,
                },
            ],
        },
        NavGroup {
            heading: "Plataforma",
            items: &[NavItem {
                name: "Configurações",
                link: "/painel/configuracoes",
                icon: "settings",
                only_master: true,
            }],
        },
    ];

    fn names(sections: &[NavSection]) -> Vec<&'static str> {
        sections
            .iter()
            .flat_map(|section| section.links.iter().map(|link| link.name))
            .collect()
    }

    #[test]
    fn default_sidebar_lists_all_sections() {
        let sections = sidebar(Some(Role::Client), "/painel/associados");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading, "Sessões");
        assert_eq!(names(&sections), ["Associados", "Clientes", "Usuários"]);
    }

    #[test]
    fn active_item_follows_path() {
        let sections = sidebar(Some(Role::Master), "/painel/clientes/cadastrar-cliente");
        let active: Vec<&str> = sections[0]
            .links
            .iter()
            .filter(|link| link.active)
            .map(|link| link.name)
            .collect();
        assert_eq!(active, ["Clientes"]);
    }

    #[test]
    fn master_only_items_hidden_for_clients() {
        assert_eq!(names(&build(GATED, Some(Role::Client), "/")), ["Clientes"]);
        assert_eq!(names(&build(GATED, None, "/")), ["Clientes"]);
    }

    #[test]
    fn master_sees_everything() {
        let sections = build(GATED, Some(Role::Master), "/");
        assert_eq!(sections.len(), 2);
        assert_eq!(names(&sections), ["Clientes", "Usuários", "Configurações"]);
    }

    #[test]
    fn empty_groups_are_dropped() {
        let sections = build(GATED, Some(Role::Client), "/");
        assert!(sections.iter().all(|section| section.heading != "Plataforma"));
    }
}
