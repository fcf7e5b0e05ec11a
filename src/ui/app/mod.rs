//! Application state and lifecycle.

use std::path::PathBuf;

use anyhow::{anyhow, Context};

use crate::core::{
    find_theme, ChangeFacet, DiscoveryInbox, DiscoveryWorker, RepoWatcher, Repository,
    RepositoryRegistry, StateStore, StatusProvider, ThemeRef,
};
use crate::scroll::{DiffRegistry, ListEntry, Scene, ScrollEngine};
use crate::theme::{Theme, SIDEBAR_COLORS};

mod files;
mod repos;
mod scroll;
mod state;
mod theme;
mod watcher;

pub use scroll::{StickyHeaders, WHEEL_COLUMNS, WHEEL_LINES};
pub use state::{
    DocRow, DocumentLayout, Focus, Mode, SidebarState, ThemeSelectorState, UiState,
};

/// Startup options for [`App::new`].
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// State file location.
    pub state_path: PathBuf,
    /// Theme label overriding the persisted one for this session.
    pub theme: Option<String>,
    /// Watch the active repository for changes.
    pub watch: bool,
}

/// Application state.
pub struct App {
    /// Known repositories.
    pub repos: RepositoryRegistry,
    /// Persisted state.
    pub store: StateStore,
    /// Staged/unstaged lists of the active repository.
    pub diffs: DiffRegistry,
    /// Document scroll state and pending gestures.
    pub engine: ScrollEngine,
    /// Element tree of the last paint.
    pub scene: Scene,
    /// Per-diff vertical offsets from the last broadcast.
    pub sticky: StickyHeaders,
    /// Last document layout.
    pub layout: DocumentLayout,
    /// Repository list state.
    pub sidebar: SidebarState,
    /// Current focus.
    pub focus: Focus,
    /// Index into [`App::selectable_entries`].
    pub cursor: usize,
    /// UI state (mode, messages).
    pub ui: UiState,
    /// Current palette.
    pub theme: Theme,
    /// Current theme selection.
    pub theme_ref: ThemeRef,
    /// Theme selector overlay.
    pub theme_selector: ThemeSelectorState,
    /// Should the app quit?
    pub should_quit: bool,

    provider: Box<dyn StatusProvider>,
    next_view_id: u64,
    follow_cursor: bool,
    watch: bool,
    watcher: Option<RepoWatcher>,
    // The inbox must drop before the worker so a blocked send fails and the join returns.
    discovery: DiscoveryInbox,
    _discovery_worker: Option<DiscoveryWorker>,
}

impl App {
    /// Create the app and activate the first known repository, if any.
    pub fn new(
        options: AppOptions,
        provider: Box<dyn StatusProvider>,
        discovery: DiscoveryInbox,
        discovery_worker: Option<DiscoveryWorker>,
    ) -> anyhow::Result<Self> {
        let store = StateStore::open(options.state_path.clone()).with_context(|| {
            format!("failed to open state file {}", options.state_path.display())
        })?;

        let theme_ref = match options.theme.as_deref() {
            Some(label) => ThemeRef::from(
                find_theme(label).ok_or_else(|| anyhow!("unknown theme '{}'", label))?,
            ),
            None => store.state().theme.clone(),
        };
        let theme = Theme::for_ref(&theme_ref);
        let repos =
            RepositoryRegistry::from_persisted(&store.state().repositories, SIDEBAR_COLORS.len());
        log::info!(
            "starting with {} known repositories, theme {}",
            repos.len(),
            theme_ref.label
        );

        let mut app = Self {
            repos,
            store,
            diffs: DiffRegistry::new(),
            engine: ScrollEngine::new(),
            scene: Scene::new(),
            sticky: StickyHeaders::default(),
            layout: DocumentLayout::default(),
            sidebar: SidebarState::default(),
            focus: Focus::Files,
            cursor: 0,
            ui: UiState {
                dirty: true,
                ..Default::default()
            },
            theme,
            theme_ref,
            theme_selector: ThemeSelectorState::default(),
            should_quit: false,
            provider,
            next_view_id: 1,
            follow_cursor: false,
            watch: options.watch,
            watcher: None,
            discovery,
            _discovery_worker: discovery_worker,
        };

        if !app.repos.is_empty() {
            app.activate_repository(0);
        }

        Ok(app)
    }

    /// The repository whose lists are mounted.
    pub fn active_repository(&self) -> Option<&Repository> {
        let path = self.diffs.repository()?;
        self.repos.find(path).and_then(|idx| self.repos.get(idx))
    }

    /// Entries the cursor can land on: staged first, then unstaged.
    pub fn selectable_entries(&self) -> Vec<(ChangeFacet, usize)> {
        ChangeFacet::ALL
            .into_iter()
            .flat_map(|facet| {
                let len = self.diffs.list(facet).map_or(0, |l| l.len());
                (0..len).map(move |idx| (facet, idx))
            })
            .collect()
    }

    /// Entry under the cursor.
    pub fn selected_entry(&self) -> Option<(ChangeFacet, usize)> {
        self.selectable_entries().get(self.cursor).copied()
    }

    /// Look up a list entry.
    pub fn entry(&self, facet: ChangeFacet, idx: usize) -> Option<&ListEntry> {
        self.diffs.list(facet)?.entries().get(idx)
    }

    /// Open the in-app help overlay.
    pub fn open_help(&mut self) {
        self.ui.mode = Mode::Help;
        self.ui.dirty = true;
    }

    /// Close the help overlay.
    pub fn close_help(&mut self) {
        if self.ui.mode == Mode::Help {
            self.ui.mode = Mode::Normal;
            self.ui.dirty = true;
        }
    }

    /// Switch focus between the repository list and the file lists.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Sidebar => Focus::Files,
            Focus::Files => Focus::Sidebar,
        };
        self.ui.dirty = true;
    }

    /// Explicitly set the UI focus.
    pub fn set_focus(&mut self, focus: Focus) {
        if self.focus != focus {
            self.focus = focus;
            self.ui.dirty = true;
        }
    }

    /// Save known repositories before exit.
    ///
    /// The theme is left alone: it is only persisted when picked in the
    /// selector, so a `--theme` override never outlives the session.
    pub fn save_state(&mut self) -> anyhow::Result<()> {
        self.store.set_repositories(self.repos.to_persisted());
        self.store.save()?;
        Ok(())
    }

    /// Mark dirty for redraw.
    pub fn mark_dirty(&mut self) {
        self.ui.dirty = true;
    }

    /// Clear dirty flag after drawing.
    pub fn clear_dirty(&mut self) {
        self.ui.dirty = false;
    }

    fn allocate_view_id(&mut self) -> u64 {
        let id = self.next_view_id;
        self.next_view_id += 1;
        id
    }
}
