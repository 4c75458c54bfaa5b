pub mod opener;
pub mod plain;
pub mod theme;
pub mod tui;
