use crate::modules::navigation::{self, DrawerSide, Submenu, SubmenuItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Closed,
    Open,
}

impl Panel {
    pub fn is_open(self) -> bool {
        self == Panel::Open
    }

    fn toggled(self) -> Self {
        match self {
            Panel::Closed => Panel::Open,
            Panel::Open => Panel::Closed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenSubmenu {
    menu: &'static Submenu,
    selected: usize,
}

/// Drawers, scrim, inset panel, bottom submenu and avatar menu.
#[derive(Debug, Clone, Default)]
pub struct Chrome {
    left: Panel,
    right: Panel,
    /// Sits beside the rail; it has no scrim.
    inset: Panel,
    avatar_menu: Panel,
    submenu: Option<OpenSubmenu>,
}

impl Chrome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drawer(&self, side: DrawerSide) -> Panel {
        match side {
            DrawerSide::Left => self.left,
            DrawerSide::Right => self.right,
        }
    }

    pub fn open_drawer(&mut self, side: DrawerSide) {
        *self.drawer_mut(side) = Panel::Open;
    }

    pub fn close_drawer(&mut self, side: DrawerSide) {
        *self.drawer_mut(side) = Panel::Closed;
    }

    fn drawer_mut(&mut self, side: DrawerSide) -> &mut Panel {
        match side {
            DrawerSide::Left => &mut self.left,
            DrawerSide::Right => &mut self.right,
        }
    }

    /// The scrim is shown exactly while a drawer is open.
    pub fn scrim(&self) -> Panel {
        if self.left.is_open() || self.right.is_open() {
            Panel::Open
        } else {
            Panel::Closed
        }
    }

    /// Dismissing the scrim closes every drawer.
    pub fn dismiss_scrim(&mut self) {
        self.left = Panel::Closed;
        self.right = Panel::Closed;
    }

    pub fn inset(&self) -> Panel {
        self.inset
    }

    pub fn open_inset(&mut self) {
        self.inset = Panel::Open;
    }

    pub fn close_inset(&mut self) {
        self.inset = Panel::Closed;
    }

    /// Opens a bottom submenu, closing any other. Unknown ids are ignored.
    pub fn open_submenu(&mut self, id: &str) -> bool {
        let Some(menu) = navigation::submenu(id) else {
            return false;
        };
        self.submenu = Some(OpenSubmenu { menu, selected: 0 });
        true
    }

    pub fn close_submenus(&mut self) {
        self.submenu = None;
    }

    pub fn submenu(&self) -> Option<&'static Submenu> {
        self.submenu.map(|open| open.menu)
    }

    pub fn submenu_selected(&self) -> Option<usize> {
        self.submenu.map(|open| open.selected)
    }

    pub fn submenu_next(&mut self) {
        if let Some(open) = self.submenu.as_mut() {
            let len = open.menu.items.len();
            if len > 0 {
                open.selected = (open.selected + 1) % len;
            }
        }
    }

    pub fn submenu_previous(&mut self) {
        if let Some(open) = self.submenu.as_mut() {
            let len = open.menu.items.len();
            if len > 0 {
                open.selected = (open.selected + len - 1) % len;
            }
        }
    }

    /// Picks the highlighted submenu entry and closes the sheet.
    pub fn choose_submenu_item(&mut self) -> Option<&'static SubmenuItem> {
        let open = self.submenu.take()?;
        open.menu.items.get(open.selected)
    }

    pub fn avatar_menu(&self) -> Panel {
        self.avatar_menu
    }

    pub fn toggle_avatar_menu(&mut self) {
        self.avatar_menu = self.avatar_menu.toggled();
    }

    pub fn has_overlay(&self) -> bool {
        self.scrim().is_open()
            || self.inset.is_open()
            || self.submenu.is_some()
            || self.avatar_menu.is_open()
    }

    /// Closes everything. Returns whether anything was open.
    pub fn escape(&mut self) -> bool {
        let had_overlay = self.has_overlay();
        self.dismiss_scrim();
        self.close_inset();
        self.close_submenus();
        self.avatar_menu = Panel::Closed;
        had_overlay
    }
}
