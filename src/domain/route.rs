//! Static screen registry.

/// Screens reachable from the navigation shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    /// Home menu.
    #[default]
    Home,
    /// Customer master data.
    Pelanggan,
    /// Goods master data.
    Barang,
    /// Sales orders.
    Penjualan,
}

impl Route {
    /// Data screens listed on the home menu, in menu order.
    pub const MENU: [Self; 3] = [Self::Pelanggan, Self::Barang, Self::Penjualan];

    /// Returns the screen title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Pelanggan => "Pelanggan",
            Self::Barang => "Barang",
            Self::Penjualan => "Penjualan",
        }
    }

    /// Returns the heading shown inside the screen.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Home => "Selamat Datang",
            Self::Pelanggan => "Master Data Pelanggan",
            Self::Barang => "Master Data Barang",
            Self::Penjualan => "Penjualan",
        }
    }

    /// Returns the menu entry at `index`, if any.
    #[must_use]
    pub fn from_menu_index(index: usize) -> Option<Self> {
        Self::MENU.get(index).copied()
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}
