use crux_core::testing::AppTester;
use placepage::buttons::ButtonType;
use placepage::capabilities::{BookmarkCategory, BookmarkInfo, BookmarksOperation};
use placepage::markers::{self, Marker, MarkerError, POTHOLE_CATEGORY};
use placepage::model::{FeatureId, LatLon, MapObject, ToastKind};
use placepage::{App, Effect, Event, Model};

fn bookmark_ops(effects: &[Effect]) -> Vec<BookmarksOperation> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Bookmarks(request) => Some(request.operation.clone()),
            _ => None,
        })
        .collect()
}

/// (method, url) of every HTTP request in `effects`.
fn http_requests(effects: &[Effect]) -> Vec<(String, String)> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Http(request) => {
                Some((request.operation.method.clone(), request.operation.url.clone()))
            }
            _ => None,
        })
        .collect()
}

fn select(app: &AppTester<App, Effect>, model: &mut Model, title: &str, at: LatLon) {
    let mut object = MapObject::new(FeatureId::new("bm-1"), at, title);
    object.is_bookmark = true;
    app.update(Event::SelectionChanged(Some(object)), model);
}

fn marker(id: &str, latitude: f64, longitude: f64) -> Marker {
    Marker {
        latitude,
        longitude,
        id: id.into(),
    }
}

mod download {
    use super::*;

    #[test]
    fn starts_by_listing_categories() {
        let app = AppTester::<App, Effect>::default();
        let mut model = Model::default();
        select(&app, &mut model, "Cafe", LatLon::new(1.0, 2.0));

        let update = app.update(Event::ButtonClicked(ButtonType::PotholeDownload), &mut model);
        assert_eq!(bookmark_ops(&update.effects), vec![BookmarksOperation::ListCategories]);
    }

    #[test]
    fn existing_category_blocks_download() {
        let app = AppTester::<App, Effect>::default();
        let mut model = Model::default();

        let categories = vec![
            BookmarkCategory {
                id: 1,
                name: "My places".into(),
            },
            BookmarkCategory {
                id: 2,
                name: POTHOLE_CATEGORY.into(),
            },
        ];
        let update = app.update(Event::CategoriesListed(categories), &mut model);

        assert!(http_requests(&update.effects).is_empty());
        let toast = app.view(&model).toast.expect("toast shown");
        assert_eq!(toast.message, markers::ALREADY_DOWNLOADED_TOAST);
    }

    #[test]
    fn missing_category_fetches_marker_list() {
        let app = AppTester::<App, Effect>::default();
        let mut model = Model::default();

        let update = app.update(Event::CategoriesListed(Vec::new()), &mut model);
        let requests = http_requests(&update.effects);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "GET");
        assert_eq!(
            requests[0].1,
            "https://busy-pink-tadpole-toga.cyclic.cloud/api/pothole/getAllPotholes"
        );
    }

    #[test]
    fn fetched_markers_become_bookmarks_one_to_one() {
        let app = AppTester::<App, Effect>::default();
        let mut model = Model::default();

        let fetched = vec![marker("a1", 52.37, 4.89), marker("a2", 52.38, 4.90)];
        let update = app.update(Event::MarkersFetched(Ok(fetched)), &mut model);

        let ops = bookmark_ops(&update.effects);
        assert_eq!(
            ops,
            vec![
                BookmarksOperation::CreateCategory {
                    name: POTHOLE_CATEGORY.into()
                },
                BookmarksOperation::AddMarkerBookmark {
                    category: POTHOLE_CATEGORY.into(),
                    at: LatLon::new(52.37, 4.89),
                    remote_id: "a1".into(),
                },
                BookmarksOperation::AddMarkerBookmark {
                    category: POTHOLE_CATEGORY.into(),
                    at: LatLon::new(52.38, 4.90),
                    remote_id: "a2".into(),
                },
            ]
        );
        let toast = app.view(&model).toast.expect("toast shown");
        assert_eq!(toast.message, markers::DOWNLOADED_TOAST);
        assert_eq!(toast.kind, ToastKind::Success);
    }

    #[test]
    fn failed_fetch_degrades_to_no_data() {
        let app = AppTester::<App, Effect>::default();
        let mut model = Model::default();

        let update = app.update(
            Event::MarkersFetched(Err(MarkerError::Network("offline".into()))),
            &mut model,
        );
        assert!(bookmark_ops(&update.effects).is_empty());
        let toast = app.view(&model).toast.expect("toast shown");
        assert_eq!(toast.message, markers::FAILURE_TOAST);
        assert_eq!(toast.kind, ToastKind::Error);

        app.update(Event::DismissToast, &mut model);
        assert_eq!(app.view(&model).toast, None);
    }
}

mod delete {
    use super::*;

    fn bookmark(id: u64, at: LatLon, remote_id: &str) -> BookmarkInfo {
        BookmarkInfo {
            id,
            location: at,
            remote_id: Some(remote_id.into()),
        }
    }

    #[test]
    fn marker_bookmark_lists_marker_category() {
        let app = AppTester::<App, Effect>::default();
        let mut model = Model::default();
        select(&app, &mut model, "Pothole", LatLon::new(10.0, 20.0));

        let update = app.update(Event::ButtonClicked(ButtonType::BookmarkDelete), &mut model);
        assert_eq!(
            bookmark_ops(&update.effects),
            vec![BookmarksOperation::ListCategoryBookmarks {
                category: POTHOLE_CATEGORY.into()
            }]
        );
    }

    #[test]
    fn ordinary_bookmark_is_deleted_directly() {
        let app = AppTester::<App, Effect>::default();
        let mut model = Model::default();
        select(&app, &mut model, "Bakery", LatLon::new(10.0, 20.0));

        let update = app.update(Event::ButtonClicked(ButtonType::BookmarkDelete), &mut model);
        assert_eq!(
            bookmark_ops(&update.effects),
            vec![BookmarksOperation::DeleteBookmarkFromMapObject]
        );
        assert!(http_requests(&update.effects).is_empty());
    }

    #[test]
    fn matching_bookmark_is_deleted_locally_and_remotely() {
        let app = AppTester::<App, Effect>::default();
        let mut model = Model::default();

        let bookmarks = vec![
            bookmark(1, LatLon::new(10.0, 20.0 + 1e-11), "far"),
            bookmark(2, LatLon::new(10.0, 20.0 + 1e-13), "65a1"),
        ];
        let update = app.update(
            Event::MarkerBookmarksListed {
                target: LatLon::new(10.0, 20.0),
                bookmarks,
            },
            &mut model,
        );

        assert_eq!(
            bookmark_ops(&update.effects),
            vec![BookmarksOperation::DeleteBookmarkFromMapObject]
        );
        let requests = http_requests(&update.effects);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "DELETE");
        assert!(requests[0].1.ends_with("/api/pothole/deletePothole/65a1"));

        app.update(Event::MarkerDeleted(Ok(())), &mut model);
        let toast = app.view(&model).toast.expect("toast shown");
        assert_eq!(toast.message, markers::REMOVED_TOAST);
    }

    #[test]
    fn no_match_aborts_without_mutation() {
        let app = AppTester::<App, Effect>::default();
        let mut model = Model::default();

        let bookmarks = vec![bookmark(1, LatLon::new(10.0, 20.0 + 1e-11), "far")];
        let update = app.update(
            Event::MarkerBookmarksListed {
                target: LatLon::new(10.0, 20.0),
                bookmarks,
            },
            &mut model,
        );

        assert!(bookmark_ops(&update.effects).is_empty());
        assert!(http_requests(&update.effects).is_empty());
        let toast = app.view(&model).toast.expect("toast shown");
        assert_eq!(toast.message, markers::FAILURE_TOAST);
    }

    #[test]
    fn failed_remote_delete_is_reported() {
        let app = AppTester::<App, Effect>::default();
        let mut model = Model::default();

        app.update(Event::MarkerDeleted(Err(MarkerError::Status(500))), &mut model);
        let toast = app.view(&model).toast.expect("toast shown");
        assert_eq!(toast.message, markers::FAILURE_TOAST);
        assert_eq!(toast.kind, ToastKind::Error);
    }
}
