//! Ratatui front-end: a search bar, the "Add New Item" form, and the items
//! table, all driven synchronously from key presses.

mod app;
mod forms;
mod helpers;
mod table;
mod terminal;

pub use app::App;
pub use terminal::run_app;
