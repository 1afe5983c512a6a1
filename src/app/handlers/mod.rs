pub mod input;
pub mod mouse;
pub mod project;
pub mod subtab;
pub mod view;
