//! Existence checks for reference targets.

use std::future::Future;
use std::io;
use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;
use url::Url;

/// A reference target that exists and can be opened as a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub path: PathBuf,
    pub uri: Url,
}

/// Collaborator answering "can the resource at this path be opened as a document?"
pub trait TargetProbe: Send + Sync {
    fn open(&self, path: &Path) -> impl Future<Output = io::Result<()>> + Send;
}

/// Probe backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemProbe;

impl TargetProbe for FileSystemProbe {
    async fn open(&self, path: &Path) -> io::Result<()> {
        let file = tokio::fs::File::open(path).await?;
        let metadata = file.metadata().await?;
        if metadata.is_file() {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ))
        }
    }
}

/// Join a relative reference onto `source_dir`, folding `.` and `..`.
///
/// Returns `None` for references that are not relative paths: rooted
/// paths, Windows prefixes and URLs with a scheme.
pub fn candidate_path(source_dir: &Path, relative_path: &str) -> Option<PathBuf> {
    if relative_path.is_empty() || relative_path.contains("://") {
        return None;
    }
    let relative = Path::new(relative_path);
    if relative
        .components()
        .any(|c| matches!(c, Component::RootDir | Component::Prefix(_)))
    {
        return None;
    }
    Some(source_dir.join(relative).clean())
}

/// Resolve `relative_path` against `source_dir` and keep it only if the
/// probe can open it.
///
/// Probe failures of any kind are logged and reported as not found.
pub async fn resolve_if_exists<P: TargetProbe>(
    probe: &P,
    source_dir: &Path,
    relative_path: &str,
) -> Option<ResolvedTarget> {
    let Some(path) = candidate_path(source_dir, relative_path) else {
        log::debug!(
            target: "dank_ls::target",
            "Skipping non-relative reference {:?}",
            relative_path
        );
        return None;
    };

    if let Err(err) = probe.open(&path).await {
        log::debug!(
            target: "dank_ls::target",
            "Target {} cannot be opened: {}",
            path.display(),
            err
        );
        return None;
    }

    let uri = Url::from_file_path(&path).ok()?;
    Some(ResolvedTarget { path, uri })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case::sibling("/site/pages", "nav.html", "/site/pages/nav.html")]
    #[case::dot_slash("/site/pages", "./nav.html", "/site/pages/nav.html")]
    #[case::parent("/site/pages", "../partials/nav.html", "/site/partials/nav.html")]
    #[case::nested_parents("/site/pages/blog", "../../sw.ts", "/site/sw.ts")]
    fn candidate_paths_fold_dot_segments(
        #[case] dir: &str,
        #[case] reference: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(
            candidate_path(Path::new(dir), reference),
            Some(PathBuf::from(expected))
        );
    }

    #[rstest]
    #[case::rooted("/abs/worker.ts")]
    #[case::url("https://cdn.example.com/worker.js")]
    #[case::empty("")]
    fn non_relative_references_have_no_candidate(#[case] reference: &str) {
        assert_eq!(candidate_path(Path::new("/site"), reference), None);
    }

    #[tokio::test]
    async fn existing_file_resolves_to_file_url() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("nav.html"), "<nav></nav>").unwrap();

        let target = resolve_if_exists(&FileSystemProbe, dir.path(), "./nav.html")
            .await
            .expect("nav.html exists");

        assert_eq!(target.path, dir.path().join("nav.html"));
        assert_eq!(target.uri, Url::from_file_path(dir.path().join("nav.html")).unwrap());
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            resolve_if_exists(&FileSystemProbe, dir.path(), "missing.html").await,
            None
        );
    }

    #[tokio::test]
    async fn directory_is_not_a_document() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("partials.html")).unwrap();
        assert_eq!(
            resolve_if_exists(&FileSystemProbe, dir.path(), "partials.html").await,
            None
        );
    }

    struct FailingProbe;

    impl TargetProbe for FailingProbe {
        async fn open(&self, _path: &Path) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }
    }

    #[tokio::test]
    async fn probe_errors_are_swallowed() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("nav.html"), "").unwrap();
        assert_eq!(
            resolve_if_exists(&FailingProbe, dir.path(), "nav.html").await,
            None
        );
    }
}
