mod action;
mod analysis;
mod coordinate;
mod event;
mod geolocation;
mod loading;
mod modal;
mod panel;
mod reply;
mod safety;
mod section;
mod slash_commands;
mod sos;
mod textarea;

pub use action::*;
pub use analysis::*;
pub use coordinate::*;
pub use event::*;
pub use geolocation::*;
pub use loading::*;
pub use modal::*;
pub use panel::*;
pub use reply::*;
pub use safety::*;
pub use section::*;
pub use slash_commands::*;
pub use sos::*;
pub use textarea::*;
