//! Repository status and file content access via libgit2.

use std::path::{Path, PathBuf};

use git2::{ErrorCode, Repository as GitRepository, Status, StatusOptions};
use thiserror::Error;

/// Maximum file size to load (50 MiB). Prevents OOM on huge files.
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Errors from repository operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RepoError {
    /// Path is not inside a git repository.
    #[error("not a git repository: {}", .0.display())]
    NotARepo(PathBuf),
    /// libgit2 reported an error.
    #[error("git error: {0}")]
    Git(#[from] git2::Error),
    /// I/O error while reading the working tree.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Status entry path was not valid UTF-8.
    #[error("invalid utf-8 in path")]
    InvalidUtf8,
    /// File exceeds maximum allowed size.
    #[error("file too large: {size} bytes (max {max} bytes)")]
    FileTooLarge {
        /// Actual file size.
        size: u64,
        /// Maximum allowed size.
        max: u64,
    },
}

/// Error when constructing a RelPath with an absolute path.
#[derive(Debug, Clone, thiserror::Error)]
#[error("path must be relative, got: {0}")]
pub struct InvalidRelPath(pub String);

/// Canonicalized path to a git working tree root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRoot(PathBuf);

impl RepoRoot {
    /// Discover the repository containing the given path.
    ///
    /// Bare repositories are rejected since they have nothing to stage.
    #[must_use = "this returns a Result that should be checked"]
    pub fn discover(path: &Path) -> Result<Self, RepoError> {
        let repo = match GitRepository::discover(path) {
            Ok(repo) => repo,
            Err(e) if e.code() == ErrorCode::NotFound => {
                return Err(RepoError::NotARepo(path.to_path_buf()))
            }
            Err(e) => return Err(e.into()),
        };

        let workdir = repo
            .workdir()
            .ok_or_else(|| RepoError::NotARepo(path.to_path_buf()))?;
        let canonical = workdir
            .canonicalize()
            .map_err(|_| RepoError::NotARepo(path.to_path_buf()))?;

        Ok(Self(canonical))
    }

    /// Get the repository root path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Consume into the owned path.
    #[must_use]
    pub fn into_path(self) -> PathBuf {
        self.0
    }
}

/// A repository-relative path. Never absolute.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct RelPath(String);

impl RelPath {
    /// Create a new RelPath, rejecting absolute paths.
    ///
    /// # Examples
    ///
    /// ```
    /// use stagediff::core::RelPath;
    ///
    /// let path = RelPath::try_new("src/main.rs").unwrap();
    /// assert_eq!(path.as_str(), "src/main.rs");
    /// assert!(RelPath::try_new("/absolute/path").is_err());
    /// ```
    #[must_use = "this returns a Result that should be checked"]
    pub fn try_new(path: impl Into<String>) -> Result<Self, InvalidRelPath> {
        let path = path.into();
        if path.starts_with('/') {
            return Err(InvalidRelPath(path));
        }
        Ok(Self(path))
    }

    /// Create a RelPath from trusted libgit2 output.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        debug_assert!(
            !path.starts_with('/'),
            "RelPath must not be absolute: {}",
            path
        );
        Self(path)
    }

    /// Get the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to an absolute path under a repository root.
    #[must_use]
    pub fn to_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }

    /// Get the file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        Path::new(&self.0)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.0)
    }
}

impl std::fmt::Display for RelPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of change within one facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChangeKind {
    /// File was newly added.
    Added,
    /// File was modified.
    Modified,
    /// File was deleted.
    Deleted,
    /// File was renamed.
    Renamed,
    /// File type changed (e.g. file to symlink).
    TypeChange,
    /// File is not tracked.
    Untracked,
    /// File has merge conflicts.
    Conflicted,
}

impl FileChangeKind {
    /// Single-letter badge shown next to the path.
    pub fn badge(self) -> &'static str {
        match self {
            Self::Added => "A",
            Self::Modified => "M",
            Self::Deleted => "D",
            Self::Renamed => "R",
            Self::TypeChange => "T",
            Self::Untracked => "?",
            Self::Conflicted => "U",
        }
    }
}

/// Which of the two file lists an entry is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeFacet {
    /// Changes recorded in the index.
    Staged,
    /// Changes in the working tree not yet in the index.
    Unstaged,
}

impl ChangeFacet {
    /// Both facets in display order.
    pub const ALL: [ChangeFacet; 2] = [ChangeFacet::Staged, ChangeFacet::Unstaged];

    /// Heading shown above the list.
    pub fn heading(self) -> &'static str {
        match self {
            Self::Staged => "Staged",
            Self::Unstaged => "Unstaged",
        }
    }
}

/// A change record with independent index and working-tree facets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the repository root.
    pub path: RelPath,
    /// Change relative to HEAD, if staged.
    pub index: Option<FileChangeKind>,
    /// Change relative to the index, if unstaged.
    pub worktree: Option<FileChangeKind>,
}

impl FileEntry {
    /// Create an entry from its two facets.
    pub fn new(
        path: RelPath,
        index: Option<FileChangeKind>,
        worktree: Option<FileChangeKind>,
    ) -> Self {
        Self {
            path,
            index,
            worktree,
        }
    }

    /// Whether the entry has staged changes.
    pub fn in_index(&self) -> bool {
        self.index.is_some()
    }

    /// Whether the entry has unstaged changes.
    pub fn in_working_tree(&self) -> bool {
        self.worktree.is_some()
    }

    /// Change kind as seen from one facet.
    pub fn kind(&self, facet: ChangeFacet) -> Option<FileChangeKind> {
        match facet {
            ChangeFacet::Staged => self.index,
            ChangeFacet::Unstaged => self.worktree,
        }
    }
}

/// Status split into the staged and unstaged lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLists {
    /// Entries with staged changes, in status order.
    pub index: Vec<FileEntry>,
    /// Entries with unstaged changes, in status order.
    pub working: Vec<FileEntry>,
}

impl StatusLists {
    /// Partition status entries. An entry in both facets lands in both lists.
    pub fn partition(entries: impl IntoIterator<Item = FileEntry>) -> Self {
        let mut lists = Self::default();
        for entry in entries {
            if entry.in_index() {
                lists.index.push(entry.clone());
            }
            if entry.in_working_tree() {
                lists.working.push(entry);
            }
        }
        lists
    }

    /// Entries for one facet.
    pub fn facet(&self, facet: ChangeFacet) -> &[FileEntry] {
        match facet {
            ChangeFacet::Staged => &self.index,
            ChangeFacet::Unstaged => &self.working,
        }
    }
}

/// Source of status and file contents for a repository.
///
/// Implemented over libgit2 by [`GitStatusProvider`]; tests substitute
/// in-memory providers.
pub trait StatusProvider {
    /// List changed files of the repository at `root`.
    fn status(&self, root: &Path) -> Result<Vec<FileEntry>, RepoError>;

    /// Load the old/new contents shown for an entry in one facet.
    fn load_pair(
        &self,
        root: &Path,
        path: &RelPath,
        facet: ChangeFacet,
    ) -> Result<(Vec<u8>, Vec<u8>), RepoError>;

    /// Stage the working tree state of a path.
    fn stage(&self, root: &Path, path: &RelPath) -> Result<(), RepoError>;

    /// Reset the index entry of a path back to HEAD.
    fn unstage(&self, root: &Path, path: &RelPath) -> Result<(), RepoError>;
}

/// [`StatusProvider`] backed by libgit2.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitStatusProvider;

impl GitStatusProvider {
    /// Create a provider.
    pub fn new() -> Self {
        Self
    }
}

fn open(root: &Path) -> Result<GitRepository, RepoError> {
    match GitRepository::open(root) {
        Ok(repo) => Ok(repo),
        Err(e) if e.code() == ErrorCode::NotFound => Err(RepoError::NotARepo(root.to_path_buf())),
        Err(e) => Err(e.into()),
    }
}

impl StatusProvider for GitStatusProvider {
    fn status(&self, root: &Path) -> Result<Vec<FileEntry>, RepoError> {
        let mut timer = crate::metrics::FrameTimer::start("git_status");
        let repo = open(root)?;

        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false)
            .renames_head_to_index(true);

        let statuses = repo.statuses(Some(&mut opts))?;
        let mut entries = Vec::with_capacity(statuses.len());

        for status in statuses.iter() {
            let Some(path) = status.path() else {
                log::warn!("skipping status entry with non-utf8 path");
                continue;
            };
            let bits = status.status();
            let entry = FileEntry::new(RelPath::new(path), index_kind(bits), worktree_kind(bits));
            if entry.in_index() || entry.in_working_tree() {
                entries.push(entry);
            }
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        timer.record(entries.len());
        log::debug!("status {}: {} entries", root.display(), entries.len());
        Ok(entries)
    }

    fn load_pair(
        &self,
        root: &Path,
        path: &RelPath,
        facet: ChangeFacet,
    ) -> Result<(Vec<u8>, Vec<u8>), RepoError> {
        let repo = open(root)?;
        match facet {
            ChangeFacet::Staged => Ok((
                load_head_content(&repo, path)?,
                load_index_content(&repo, path)?,
            )),
            ChangeFacet::Unstaged => {
                // Untracked files have no index entry; compare against nothing.
                let old = load_index_content(&repo, path)?;
                Ok((old, load_working_content(root, path)?))
            }
        }
    }

    fn stage(&self, root: &Path, path: &RelPath) -> Result<(), RepoError> {
        let repo = open(root)?;
        let mut index = repo.index()?;
        let rel = Path::new(path.as_str());

        if path.to_absolute(root).symlink_metadata().is_ok() {
            index.add_path(rel)?;
        } else {
            index.remove_path(rel)?;
        }
        index.write()?;
        log::info!("staged {}", path);
        Ok(())
    }

    fn unstage(&self, root: &Path, path: &RelPath) -> Result<(), RepoError> {
        let repo = open(root)?;
        match repo.head() {
            Ok(head) => {
                let commit = head.peel_to_commit()?;
                repo.reset_default(Some(commit.as_object()), [path.as_str()])?;
            }
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                let mut index = repo.index()?;
                index.remove_path(Path::new(path.as_str()))?;
                index.write()?;
            }
            Err(e) => return Err(e.into()),
        }
        log::info!("unstaged {}", path);
        Ok(())
    }
}

fn index_kind(bits: Status) -> Option<FileChangeKind> {
    if bits.contains(Status::CONFLICTED) {
        Some(FileChangeKind::Conflicted)
    } else if bits.contains(Status::INDEX_NEW) {
        Some(FileChangeKind::Added)
    } else if bits.contains(Status::INDEX_DELETED) {
        Some(FileChangeKind::Deleted)
    } else if bits.contains(Status::INDEX_RENAMED) {
        Some(FileChangeKind::Renamed)
    } else if bits.contains(Status::INDEX_TYPECHANGE) {
        Some(FileChangeKind::TypeChange)
    } else if bits.contains(Status::INDEX_MODIFIED) {
        Some(FileChangeKind::Modified)
    } else {
        None
    }
}

fn worktree_kind(bits: Status) -> Option<FileChangeKind> {
    if bits.contains(Status::CONFLICTED) {
        Some(FileChangeKind::Conflicted)
    } else if bits.contains(Status::WT_NEW) {
        Some(FileChangeKind::Untracked)
    } else if bits.contains(Status::WT_DELETED) {
        Some(FileChangeKind::Deleted)
    } else if bits.contains(Status::WT_RENAMED) {
        Some(FileChangeKind::Renamed)
    } else if bits.contains(Status::WT_TYPECHANGE) {
        Some(FileChangeKind::TypeChange)
    } else if bits.contains(Status::WT_MODIFIED) {
        Some(FileChangeKind::Modified)
    } else {
        None
    }
}

fn check_size(size: u64) -> Result<(), RepoError> {
    if size > MAX_FILE_SIZE {
        return Err(RepoError::FileTooLarge {
            size,
            max: MAX_FILE_SIZE,
        });
    }
    Ok(())
}

/// Load blob content at HEAD. Missing file or unborn HEAD yields empty content.
fn load_head_content(repo: &GitRepository, path: &RelPath) -> Result<Vec<u8>, RepoError> {
    let head = match repo.head() {
        Ok(head) => head,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(Vec::new())
        }
        Err(e) => return Err(e.into()),
    };

    let tree = head.peel_to_tree()?;
    let entry = match tree.get_path(Path::new(path.as_str())) {
        Ok(entry) => entry,
        Err(e) if e.code() == ErrorCode::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let blob = entry.to_object(repo)?.peel_to_blob()?;
    check_size(blob.size() as u64)?;
    Ok(blob.content().to_vec())
}

/// Load the stage-0 index blob for a path. Missing entry yields empty content.
fn load_index_content(repo: &GitRepository, path: &RelPath) -> Result<Vec<u8>, RepoError> {
    let index = repo.index()?;
    let Some(entry) = index.get_path(Path::new(path.as_str()), 0) else {
        return Ok(Vec::new());
    };

    check_size(u64::from(entry.file_size))?;
    let blob = repo.find_blob(entry.id)?;
    Ok(blob.content().to_vec())
}

/// Load content from the working tree.
/// Returns empty content for directories, symlinks, or missing files.
fn load_working_content(root: &Path, path: &RelPath) -> Result<Vec<u8>, RepoError> {
    let full_path = path.to_absolute(root);

    // symlink_metadata so a link never escapes the repository.
    match std::fs::symlink_metadata(&full_path) {
        Ok(meta) if meta.is_file() => check_size(meta.len())?,
        Ok(_) => return Ok(Vec::new()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    }

    match std::fs::read(&full_path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}
