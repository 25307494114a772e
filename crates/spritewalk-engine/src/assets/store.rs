use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use flume::{Receiver, Sender};

use super::{AssetError, ImageData};

/// Handle to an image registered with an [`AssetStore`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(u32);

impl AssetId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Load progress of a single asset.
#[derive(Debug)]
pub enum LoadState {
    Pending,
    Ready(Arc<ImageData>),
    Failed(AssetError),
}

impl LoadState {
    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }
}

struct Entry {
    path: PathBuf,
    state: LoadState,
}

struct Loaded {
    id: AssetId,
    result: Result<ImageData, AssetError>,
}

/// Registry of image assets and their load states.
///
/// `load` hands the file to a worker thread and returns immediately. Results are
/// applied by `poll`, which the frame loop calls once per tick; the store itself is
/// only ever touched from the thread that owns it.
pub struct AssetStore {
    entries: Vec<Entry>,
    tx: Sender<Loaded>,
    rx: Receiver<Loaded>,
}

impl AssetStore {
    pub fn new() -> Self {
        let (tx, rx) = flume::unbounded();
        Self {
            entries: Vec::new(),
            tx,
            rx,
        }
    }

    /// Starts loading `path` in the background.
    pub fn load(&mut self, path: impl Into<PathBuf>) -> AssetId {
        let path = path.into();
        let id = self.register(path.clone(), LoadState::Pending);

        let tx = self.tx.clone();
        let worker_path = path.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("asset-loader-{}", id.0))
            .spawn(move || {
                let result = ImageData::from_path(&worker_path);
                // A closed channel means the store is gone; nobody is waiting.
                let _ = tx.send(Loaded { id, result });
            });

        match spawned {
            Ok(_) => log::debug!("loading {} as asset {}", path.display(), id.0),
            Err(source) => self.settle(id, Err(AssetError::Spawn { path, source })),
        }

        id
    }

    /// Registers an already decoded image. It is ready immediately.
    pub fn insert(&mut self, label: impl Into<PathBuf>, image: ImageData) -> AssetId {
        self.register(label.into(), LoadState::Ready(Arc::new(image)))
    }

    /// Applies finished loads. Returns how many assets settled.
    pub fn poll(&mut self) -> usize {
        let mut settled = 0;
        while let Ok(loaded) = self.rx.try_recv() {
            self.settle(loaded.id, loaded.result);
            settled += 1;
        }
        settled
    }

    /// Blocks until no asset is pending or `timeout` elapses.
    ///
    /// Returns `true` when everything settled (ready or failed) in time.
    pub fn wait_all(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            self.poll();
            if self.pending() == 0 {
                return true;
            }

            match self.rx.recv_deadline(deadline) {
                Ok(loaded) => self.settle(loaded.id, loaded.result),
                Err(_) => return self.pending() == 0,
            }
        }
    }

    pub fn state(&self, id: AssetId) -> Option<&LoadState> {
        self.entries.get(id.index()).map(|e| &e.state)
    }

    /// Returns the decoded image if the asset is ready.
    pub fn image(&self, id: AssetId) -> Option<&Arc<ImageData>> {
        match self.state(id)? {
            LoadState::Ready(image) => Some(image),
            _ => None,
        }
    }

    pub fn path(&self, id: AssetId) -> Option<&Path> {
        self.entries.get(id.index()).map(|e| e.path.as_path())
    }

    pub fn pending(&self) -> usize {
        self.entries.iter().filter(|e| e.state.is_pending()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn register(&mut self, path: PathBuf, state: LoadState) -> AssetId {
        let id = AssetId(self.entries.len() as u32);
        self.entries.push(Entry { path, state });
        id
    }

    fn settle(&mut self, id: AssetId, result: Result<ImageData, AssetError>) {
        let Some(entry) = self.entries.get_mut(id.index()) else {
            return;
        };

        entry.state = match result {
            Ok(image) => {
                log::info!(
                    "loaded {} ({}x{})",
                    entry.path.display(),
                    image.width,
                    image.height
                );
                LoadState::Ready(Arc::new(image))
            }
            Err(err) => {
                log::warn!("{err}; it will not be drawn");
                LoadState::Failed(err)
            }
        };
    }
}

impl Default for AssetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_png(name: &str, w: u32, h: u32) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "spritewalk-{}-{name}.png",
            std::process::id()
        ));
        image::RgbaImage::from_pixel(w, h, image::Rgba([200, 100, 50, 255]))
            .save(&path)
            .expect("write test png");
        path
    }

    #[test]
    fn insert_is_ready_immediately() {
        let mut store = AssetStore::new();
        let id = store.insert("solid", ImageData::solid(1, 1, [0, 0, 0, 255]));
        assert!(store.state(id).is_some_and(LoadState::is_ready));
        assert_eq!(store.pending(), 0);
    }

    #[test]
    fn load_starts_pending_then_becomes_ready() {
        let path = temp_png("ready", 4, 2);
        let mut store = AssetStore::new();
        let id = store.load(&path);

        assert!(store.wait_all(Duration::from_secs(10)));
        let image = store.image(id).expect("image ready");
        assert_eq!((image.width, image.height), (4, 2));
        assert_eq!(store.path(id), Some(path.as_path()));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn missing_file_settles_as_failed() {
        let mut store = AssetStore::new();
        let id = store.load("no/such/asset.png");

        assert!(store.wait_all(Duration::from_secs(10)));
        assert!(matches!(
            store.state(id),
            Some(LoadState::Failed(AssetError::Io { .. }))
        ));
        assert!(store.image(id).is_none());
    }

    #[test]
    fn ids_are_distinct_and_unknown_ids_have_no_state() {
        let mut a = AssetStore::new();
        let first = a.insert("a", ImageData::solid(1, 1, [0; 4]));
        let second = a.insert("b", ImageData::solid(1, 1, [0; 4]));
        assert_ne!(first, second);

        let empty = AssetStore::new();
        assert!(empty.state(second).is_none());
        assert!(empty.is_empty());
    }
}
