//! Bounded-depth asynchronous traversal with structured completion.

use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, join_all};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use pocudrop_protocol::{IMAGE_FILE_NAME, MAX_SCAN_DEPTH, MIN_APP_ID};

use crate::LocatorError;
use crate::candidate::{Candidate, CandidateCell};
use crate::entry::AppEntry;

/// Walks a dropped tree and returns the first entry matching the
/// app-image rule, or `None` if the tree holds no qualifying file.
///
/// Sibling branches of one directory run concurrently and their completion
/// order is unspecified; the first write to the candidate cell wins. Once a
/// match is recorded, branches not yet descended are skipped via the
/// cancellation token, and branches already in flight finish as no-ops.
pub async fn locate_app_image(
    root: Arc<dyn AppEntry>,
) -> Result<Option<Candidate>, LocatorError> {
    let cell = CandidateCell::new();
    let found = CancellationToken::new();
    visit(root, String::new(), 0, &cell, &found).await?;
    Ok(cell.take())
}

fn visit<'a>(
    entry: Arc<dyn AppEntry>,
    path: String,
    depth: usize,
    cell: &'a CandidateCell,
    found: &'a CancellationToken,
) -> BoxFuture<'a, Result<(), LocatorError>> {
    async move {
        if depth >= MAX_SCAN_DEPTH {
            info!(depth, path = %path, "depth limit reached, abandoning branch");
            return Ok(());
        }

        // A match elsewhere makes this branch a no-op.
        if found.is_cancelled() {
            return Ok(());
        }

        if entry.is_file() {
            if entry.name() != IMAGE_FILE_NAME {
                return Ok(());
            }
            let Some(app_id) = parse_app_id(&path) else {
                return Ok(());
            };
            let full_path = format!("{path}{}", entry.name());
            debug!(app_id, path = %full_path, "app image candidate");
            if cell.try_set(Candidate {
                entry,
                full_path,
                app_id,
            }) {
                found.cancel();
            }
            return Ok(());
        }

        if entry.is_dir() {
            let children = entry.children().await?;
            let child_path = format!("{path}{}/", entry.name());

            // Each child is an outstanding sub-traversal; the directory
            // resolves only when the whole set has finished.
            let subtasks: Vec<_> = children
                .into_iter()
                .map(|child| visit(child, child_path.clone(), depth + 1, cell, found))
                .collect();
            for result in join_all(subtasks).await {
                result?;
            }
        }

        Ok(())
    }
    .boxed()
}

/// Parses the app id from an accumulated path: the id is the trailing path
/// segment, i.e. the immediate parent directory of the matched file.
///
/// Mirrors `parseInt` semantics from the device's web tooling: only the
/// leading digits count, so `"2.5"` parses to 2 while `"abc"` does not
/// parse at all. Ids below [`MIN_APP_ID`] are rejected.
pub fn parse_app_id(path: &str) -> Option<u32> {
    let parent = path.trim_end_matches('/').rsplit('/').next()?;
    let digits = &parent[..parent.bytes().take_while(u8::is_ascii_digit).count()];
    let id: u32 = digits.parse().ok()?;
    (id >= MIN_APP_ID).then_some(id)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::entry::EntryFuture;

    #[test]
    fn app_id_accepts_numeric_parents() {
        assert_eq!(parse_app_id("apps/7/"), Some(7));
        assert_eq!(parse_app_id("2/"), Some(2));
    }

    #[test]
    fn app_id_rejects_reserved_and_non_numeric() {
        assert_eq!(parse_app_id("apps/1/"), None);
        assert_eq!(parse_app_id("apps/0/"), None);
        assert_eq!(parse_app_id("apps/abc/"), None);
        assert_eq!(parse_app_id(""), None);
    }

    #[test]
    fn app_id_truncates_trailing_non_digits() {
        // parseInt("2.5") == 2 in the original tooling; preserved as-is.
        assert_eq!(parse_app_id("apps/2.5/"), Some(2));
        assert_eq!(parse_app_id("apps/31banana/"), Some(31));
    }

    // -- scripted in-memory tree --------------------------------------

    struct MockFile {
        name: String,
    }

    impl AppEntry for MockFile {
        fn name(&self) -> &str {
            &self.name
        }
        fn is_file(&self) -> bool {
            true
        }
        fn is_dir(&self) -> bool {
            false
        }
        fn children(&self) -> EntryFuture<'_, Vec<Arc<dyn AppEntry>>> {
            Box::pin(async { Ok(Vec::new()) })
        }
        fn read(&self) -> EntryFuture<'_, Vec<u8>> {
            Box::pin(async { Ok(Vec::new()) })
        }
    }

    struct MockDir {
        name: String,
        children: Vec<Arc<dyn AppEntry>>,
        /// Enumeration latency, to script branch completion order.
        delay: Duration,
    }

    impl AppEntry for MockDir {
        fn name(&self) -> &str {
            &self.name
        }
        fn is_file(&self) -> bool {
            false
        }
        fn is_dir(&self) -> bool {
            true
        }
        fn children(&self) -> EntryFuture<'_, Vec<Arc<dyn AppEntry>>> {
            Box::pin(async move {
                if !self.delay.is_zero() {
                    tokio::time::sleep(self.delay).await;
                }
                Ok(self.children.clone())
            })
        }
        fn read(&self) -> EntryFuture<'_, Vec<u8>> {
            Box::pin(async { Ok(Vec::new()) })
        }
    }

    fn file(name: &str) -> Arc<dyn AppEntry> {
        Arc::new(MockFile { name: name.into() })
    }

    fn dir(name: &str, children: Vec<Arc<dyn AppEntry>>) -> Arc<dyn AppEntry> {
        slow_dir(name, children, Duration::ZERO)
    }

    fn slow_dir(
        name: &str,
        children: Vec<Arc<dyn AppEntry>>,
        delay: Duration,
    ) -> Arc<dyn AppEntry> {
        Arc::new(MockDir {
            name: name.into(),
            children,
            delay,
        })
    }

    #[tokio::test]
    async fn finds_nested_image() {
        let root = dir("drop", vec![dir("2", vec![file("esp32c3.app")])]);

        let found = locate_app_image(root).await.unwrap().unwrap();
        assert_eq!(found.app_id, 2);
        assert_eq!(found.full_path, "drop/2/esp32c3.app");
    }

    #[tokio::test]
    async fn not_found_terminates_with_none() {
        let root = dir(
            "drop",
            vec![
                dir("2", vec![file("readme.txt")]),
                dir("assets", vec![file("esp32c3.bin")]),
            ],
        );

        assert!(locate_app_image(root).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn wrong_parent_id_is_skipped() {
        let root = dir("drop", vec![dir("1", vec![file("esp32c3.app")])]);
        assert!(locate_app_image(root).await.unwrap().is_none());

        let root = dir("drop", vec![dir("builds", vec![file("esp32c3.app")])]);
        assert!(locate_app_image(root).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn file_at_root_has_no_parent_id() {
        let root: Arc<dyn AppEntry> = file("esp32c3.app");
        assert!(locate_app_image(root).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn depth_bound_abandons_deep_branches() {
        // drop(0) / a(1) / b(2) / c(3) / 2(4) / esp32c3.app(5) — the file
        // sits exactly at the bound and must never be found.
        let deep = dir(
            "drop",
            vec![dir(
                "a",
                vec![dir(
                    "b",
                    vec![dir("c", vec![dir("2", vec![file("esp32c3.app")])])],
                )],
            )],
        );
        assert!(locate_app_image(deep).await.unwrap().is_none());

        // One level shallower the same file is found.
        let shallow = dir(
            "drop",
            vec![dir(
                "a",
                vec![dir("b", vec![dir("2", vec![file("esp32c3.app")])])],
            )],
        );
        let found = locate_app_image(shallow).await.unwrap().unwrap();
        assert_eq!(found.app_id, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn first_write_wins_across_slow_siblings() {
        // The slow branch is enumerated first but resolves last; the fast
        // sibling's write must win and must not be overwritten.
        let root = dir(
            "drop",
            vec![
                slow_dir(
                    "9",
                    vec![file("esp32c3.app")],
                    Duration::from_millis(500),
                ),
                dir("2", vec![file("esp32c3.app")]),
            ],
        );

        let found = locate_app_image(root).await.unwrap().unwrap();
        assert_eq!(found.app_id, 2);
        assert_eq!(found.full_path, "drop/2/esp32c3.app");
    }

    #[tokio::test]
    async fn enumeration_order_wins_when_branches_are_uniform() {
        let root = dir(
            "drop",
            vec![
                dir("5", vec![file("esp32c3.app")]),
                dir("2", vec![file("esp32c3.app")]),
            ],
        );

        let found = locate_app_image(root).await.unwrap().unwrap();
        assert_eq!(found.app_id, 5);
    }
}
