/// Terminals narrower than this get bottom tabs instead of the rail.
pub const COMPACT_BREAKPOINT: u16 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewport {
    Compact,
    Regular,
}

impl Viewport {
    pub fn from_width(width: u16) -> Self {
        if width < COMPACT_BREAKPOINT {
            Viewport::Compact
        } else {
            Viewport::Regular
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoHandler {
    ToastDemo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Navigate { href: &'static str },
    Drawer(DrawerSide),
    /// Bottom sheet on compact layouts, a drawer on regular ones.
    Submenu {
        id: &'static str,
        regular_drawer: DrawerSide,
    },
    Demo(DemoHandler),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
    pub compact_label: Option<&'static str>,
    pub icon: &'static str,
    pub action: NavAction,
}

impl NavItem {
    pub fn label_for(&self, viewport: Viewport) -> &'static str {
        match viewport {
            Viewport::Compact => self.compact_label.unwrap_or(self.label),
            Viewport::Regular => self.label,
        }
    }
}

pub const NAVIGATION: &[NavItem] = &[
    NavItem {
        id: "dashboard",
        label: "My Snapshot",
        compact_label: None,
        icon: "⌂",
        action: NavAction::Navigate { href: "#dashboard" },
    },
    NavItem {
        id: "content-hub",
        label: "Content Hub",
        compact_label: None,
        icon: "▤",
        action: NavAction::Drawer(DrawerSide::Right),
    },
    NavItem {
        id: "tasks",
        label: "Tasks",
        compact_label: None,
        icon: "✓",
        action: NavAction::Demo(DemoHandler::ToastDemo),
    },
    NavItem {
        id: "journal",
        label: "Journal",
        compact_label: None,
        icon: "✎",
        action: NavAction::Navigate { href: "#journal" },
    },
    NavItem {
        id: "learning-paths",
        label: "Learning Paths",
        compact_label: Some("Paths"),
        icon: "⇢",
        action: NavAction::Navigate { href: "#paths" },
    },
    NavItem {
        id: "programs",
        label: "Programs",
        compact_label: None,
        icon: "▶",
        action: NavAction::Drawer(DrawerSide::Left),
    },
    NavItem {
        id: "create",
        label: "Create",
        compact_label: None,
        icon: "+",
        action: NavAction::Submenu {
            id: "create",
            regular_drawer: DrawerSide::Left,
        },
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmenuItem {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub primary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submenu {
    pub id: &'static str,
    pub title: &'static str,
    pub items: &'static [SubmenuItem],
}

pub const SUBMENUS: &[Submenu] = &[Submenu {
    id: "create",
    title: "Create New",
    items: &[
        SubmenuItem {
            id: "create-program",
            label: "Create Program",
            icon: "▣",
            primary: true,
        },
        SubmenuItem {
            id: "invite-owners",
            label: "Invite Owners",
            icon: "☺",
            primary: false,
        },
        SubmenuItem {
            id: "import-csv",
            label: "Import CSV",
            icon: "⇪",
            primary: false,
        },
    ],
}];

pub fn submenu(id: &str) -> Option<&'static Submenu> {
    SUBMENUS.iter().find(|s| s.id == id)
}

/// What the shell should do after an item is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Navigated(&'static str),
    OpenDrawer(DrawerSide),
    OpenSubmenu(&'static str),
    Demo(DemoHandler),
}

#[derive(Debug, Clone)]
pub struct Navigation {
    active: usize,
    focused: usize,
    page: &'static str,
    rail_collapsed: bool,
}

impl Navigation {
    pub fn new(rail_collapsed: bool) -> Self {
        Self {
            active: 0,
            focused: 0,
            page: "#dashboard",
            rail_collapsed,
        }
    }

    pub fn items(&self) -> &'static [NavItem] {
        NAVIGATION
    }

    pub fn active(&self) -> &'static NavItem {
        &NAVIGATION[self.active]
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == index
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    /// Link of the last page navigated to.
    pub fn page(&self) -> &'static str {
        self.page
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % NAVIGATION.len();
    }

    pub fn focus_previous(&mut self) {
        self.focused = if self.focused == 0 {
            NAVIGATION.len() - 1
        } else {
            self.focused - 1
        };
    }

    pub fn activate_focused(&mut self, viewport: Viewport) -> Option<NavOutcome> {
        self.activate(self.focused, viewport)
    }

    pub fn activate_id(&mut self, id: &str, viewport: Viewport) -> Option<NavOutcome> {
        let index = NAVIGATION.iter().position(|item| item.id == id)?;
        self.activate(index, viewport)
    }

    pub fn activate(&mut self, index: usize, viewport: Viewport) -> Option<NavOutcome> {
        let item = NAVIGATION.get(index)?;
        self.active = index;
        self.focused = index;

        let outcome = match item.action {
            NavAction::Navigate { href } => {
                self.page = href;
                NavOutcome::Navigated(href)
            }
            NavAction::Drawer(side) => NavOutcome::OpenDrawer(side),
            NavAction::Submenu { id, regular_drawer } => match viewport {
                Viewport::Compact => NavOutcome::OpenSubmenu(id),
                Viewport::Regular => NavOutcome::OpenDrawer(regular_drawer),
            },
            NavAction::Demo(handler) => NavOutcome::Demo(handler),
        };
        Some(outcome)
    }

    pub fn rail_collapsed(&self) -> bool {
        self.rail_collapsed
    }

    /// The rail only exists on regular layouts; returns the new state if toggled.
    pub fn toggle_rail(&mut self, viewport: Viewport) -> Option<bool> {
        if viewport == Viewport::Compact {
            return None;
        }
        self.rail_collapsed = !self.rail_collapsed;
        Some(self.rail_collapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_breakpoint() {
        assert_eq!(Viewport::from_width(79), Viewport::Compact);
        assert_eq!(Viewport::from_width(80), Viewport::Regular);
    }

    #[test]
    fn dashboard_is_active_initially() {
        let nav = Navigation::new(false);
        assert_eq!(nav.active().id, "dashboard");
        assert_eq!(nav.page(), "#dashboard");
    }

    #[test]
    fn navigate_updates_page_and_active() {
        let mut nav = Navigation::new(false);
        let outcome = nav.activate_id("journal", Viewport::Regular);
        assert_eq!(outcome, Some(NavOutcome::Navigated("#journal")));
        assert_eq!(nav.active().id, "journal");
        assert_eq!(nav.page(), "#journal");
    }

    #[test]
    fn drawer_items_keep_page() {
        let mut nav = Navigation::new(false);
        let outcome = nav.activate_id("content-hub", Viewport::Compact);
        assert_eq!(outcome, Some(NavOutcome::OpenDrawer(DrawerSide::Right)));
        assert_eq!(nav.page(), "#dashboard");
    }

    #[test]
    fn submenu_depends_on_viewport() {
        let mut nav = Navigation::new(false);
        assert_eq!(
            nav.activate_id("create", Viewport::Compact),
            Some(NavOutcome::OpenSubmenu("create"))
        );
        assert_eq!(
            nav.activate_id("create", Viewport::Regular),
            Some(NavOutcome::OpenDrawer(DrawerSide::Left))
        );
    }

    #[test]
    fn tasks_runs_toast_demo() {
        let mut nav = Navigation::new(false);
        assert_eq!(
            nav.activate_id("tasks", Viewport::Regular),
            Some(NavOutcome::Demo(DemoHandler::ToastDemo))
        );
    }

    #[test]
    fn unknown_item_is_ignored() {
        let mut nav = Navigation::new(false);
        assert_eq!(nav.activate_id("settings", Viewport::Regular), None);
        assert_eq!(nav.active().id, "dashboard");
    }

    #[test]
    fn focus_wraps() {
        let mut nav = Navigation::new(false);
        nav.focus_previous();
        assert_eq!(nav.focused(), NAVIGATION.len() - 1);
        nav.focus_next();
        assert_eq!(nav.focused(), 0);
    }

    #[test]
    fn compact_labels() {
        let paths = NAVIGATION.iter().find(|i| i.id == "learning-paths").unwrap();
        assert_eq!(paths.label_for(Viewport::Compact), "Paths");
        assert_eq!(paths.label_for(Viewport::Regular), "Learning Paths");
    }

    #[test]
    fn rail_toggle_only_on_regular() {
        let mut nav = Navigation::new(false);
        assert_eq!(nav.toggle_rail(Viewport::Compact), None);
        assert_eq!(nav.toggle_rail(Viewport::Regular), Some(true));
        assert!(nav.rail_collapsed());
    }

    #[test]
    fn create_submenu_is_configured() {
        let create = submenu("create").unwrap();
        assert_eq!(create.title, "Create New");
        assert_eq!(create.items.len(), 3);
        assert!(create.items[0].primary);
    }
}
