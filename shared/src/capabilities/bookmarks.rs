use crux_core::capability::{CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

use crate::model::LatLon;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookmarkCategory {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookmarkInfo {
    pub id: u64,
    pub location: LatLon,
    /// Marker service id, stored on bookmarks created from remote markers.
    pub remote_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum BookmarksOperation {
    AddBookmark { at: LatLon },
    DeleteBookmarkFromMapObject,
    ListCategories,
    ListCategoryBookmarks { category: String },
    CreateCategory { name: String },
    AddMarkerBookmark {
        category: String,
        at: LatLon,
        remote_id: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum BookmarksOutput {
    Done,
    Categories(Vec<BookmarkCategory>),
    Bookmarks(Vec<BookmarkInfo>),
}

impl Operation for BookmarksOperation {
    type Output = BookmarksOutput;
}

#[derive(crux_core::macros::Capability)]
pub struct Bookmarks<Ev> {
    context: CapabilityContext<BookmarksOperation, Ev>,
}

impl<Ev> Bookmarks<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<BookmarksOperation, Ev>) -> Self {
        Self { context }
    }

    fn notify(&self, operation: BookmarksOperation) {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            ctx.notify_shell(operation).await;
        });
    }

    pub fn add_bookmark(&self, at: LatLon) {
        self.notify(BookmarksOperation::AddBookmark { at });
    }

    /// Deletes the bookmark behind the currently selected object.
    pub fn delete_from_map_object(&self) {
        self.notify(BookmarksOperation::DeleteBookmarkFromMapObject);
    }

    pub fn create_category(&self, name: impl Into<String>) {
        self.notify(BookmarksOperation::CreateCategory { name: name.into() });
    }

    pub fn add_marker_bookmark(
        &self,
        category: impl Into<String>,
        at: LatLon,
        remote_id: impl Into<String>,
    ) {
        self.notify(BookmarksOperation::AddMarkerBookmark {
            category: category.into(),
            at,
            remote_id: remote_id.into(),
        });
    }

    pub fn list_categories<F>(&self, callback: F)
    where
        F: FnOnce(Vec<BookmarkCategory>) -> Ev + Send + 'static,
        Ev: Send,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let categories = match ctx.request_from_shell(BookmarksOperation::ListCategories).await {
                BookmarksOutput::Categories(categories) => categories,
                other => {
                    tracing::warn!(?other, "unexpected answer to category listing");
                    Vec::new()
                }
            };
            ctx.update_app(callback(categories));
        });
    }

    pub fn list_category_bookmarks<F>(&self, category: impl Into<String>, callback: F)
    where
        F: FnOnce(Vec<BookmarkInfo>) -> Ev + Send + 'static,
        Ev: Send,
    {
        let ctx = self.context.clone();
        let operation = BookmarksOperation::ListCategoryBookmarks {
            category: category.into(),
        };
        self.context.spawn(async move {
            let bookmarks = match ctx.request_from_shell(operation).await {
                BookmarksOutput::Bookmarks(bookmarks) => bookmarks,
                other => {
                    tracing::warn!(?other, "unexpected answer to bookmark listing");
                    Vec::new()
                }
            };
            ctx.update_app(callback(bookmarks));
        });
    }
}
