mod bookmarks;
mod navigator;
mod routing;
mod sheet;

pub use self::bookmarks::{
    BookmarkCategory, BookmarkInfo, Bookmarks, BookmarksOperation, BookmarksOutput,
};
pub use self::navigator::{Navigator, NavigatorOperation};
pub use self::routing::{Routing, RoutingOperation, RoutingOutput};
pub use self::sheet::{Sheet, SheetOperation, SheetOutput};

// Render and Http come straight from crux.
pub use crux_core::render::Render;
pub use crux_http::Http;

use crate::event::Event;
use crate::App;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub render: Render<Event>,
    pub http: Http<Event>,
    pub sheet: Sheet<Event>,
    pub routing: Routing<Event>,
    pub bookmarks: Bookmarks<Event>,
    pub navigator: Navigator<Event>,
}
