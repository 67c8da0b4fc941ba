// Template context structures for Askama templates, split by audience.

pub mod admin;
pub mod site;

pub use admin::{AdminShellTemplate, LoginTemplate, NavItem, PanelTemplate};
pub use site::{DocumentGroup, HomeTemplate};
