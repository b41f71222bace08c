// xt-entropy/src/host.rs
//! A filesystem-backed `EvidenceHost`: one directory is one volume, every
//! regular file below it is one item.

use anyhow::{Context, Result, bail};
use log::{debug, info};
use std::collections::HashMap;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use xt_entropy_core::{EvidenceHost, ItemHandle, ItemId, NameForm, VolumeHandle};

/// Host version the directory host reports to the engine.
pub const DIRECTORY_HOST_VERSION: u32 = 2100;

/// A file discovered below the root.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    pub id: ItemId,
    /// Path relative to the root, used as the item name.
    pub relative: PathBuf,
    pub path: PathBuf,
}

/// Message sent to the host output, tagged by how the engine ended it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostMessage {
    pub text: String,
    pub skipping: bool,
}

/// Serves a directory tree as a single evidence volume.
#[derive(Debug)]
pub struct DirectoryHost {
    root: PathBuf,
    short_name: String,
    files: Vec<DiscoveredFile>,
    open: HashMap<usize, File>,
    next_handle: usize,
    annotations: Vec<(ItemId, String)>,
    messages: Vec<HostMessage>,
}

impl DirectoryHost {
    /// Walks `root` (sorted by file name) and assigns item ids from 1.
    pub fn open(root: &Path, short_name: Option<&str>) -> Result<Self> {
        if !root.is_dir() {
            bail!("{} is not a directory", root.display());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry below {}: {}", root.display(), e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path()).to_path_buf();
            let id = ItemId::try_from(files.len() + 1).context("Too many files for one volume")?;
            files.push(DiscoveredFile { id, relative, path: entry.path().to_path_buf() });
        }

        let short_name = short_name.map(str::to_string).unwrap_or_else(|| {
            root.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| root.display().to_string())
        });

        info!("Discovered {} files below {}", files.len(), root.display());
        Ok(Self {
            root: root.to_path_buf(),
            short_name,
            files,
            open: HashMap::new(),
            next_handle: 1,
            annotations: Vec::new(),
            messages: Vec::new(),
        })
    }

    pub fn files(&self) -> &[DiscoveredFile] {
        &self.files
    }

    /// Ids are dense from 1, so the id is the position in `files` plus one.
    pub fn file(&self, id: ItemId) -> Option<&DiscoveredFile> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.files.get(index)
    }

    /// Annotations in the order the engine attached them.
    pub fn annotations(&self) -> &[(ItemId, String)] {
        &self.annotations
    }

    pub fn messages(&self) -> &[HostMessage] {
        &self.messages
    }

    /// Handles still open; zero once the engine is done with a volume.
    pub fn open_handles(&self) -> usize {
        self.open.len()
    }
}

impl EvidenceHost for DirectoryHost {
    fn case_title(&self) -> Option<String> {
        Some(format!("Directory scan of {}", self.root.display()))
    }

    fn has_evidence(&self) -> bool {
        true
    }

    fn volume_name(&self, _volume: VolumeHandle, form: NameForm) -> String {
        match form {
            NameForm::Long => self.root.display().to_string(),
            NameForm::Short => self.short_name.clone(),
        }
    }

    fn item_count(&self, _volume: VolumeHandle) -> u64 {
        self.files.len() as u64
    }

    fn item_name(&self, item: ItemId) -> String {
        self.file(item)
            .map(|f| f.relative.display().to_string())
            .unwrap_or_default()
    }

    fn open_item(&mut self, _volume: VolumeHandle, item: ItemId) -> Option<ItemHandle> {
        let path = self.file(item)?.path.clone();
        match File::open(&path) {
            Ok(file) => {
                let handle = self.next_handle;
                self.next_handle += 1;
                self.open.insert(handle, file);
                Some(ItemHandle(handle))
            }
            Err(e) => {
                debug!("Cannot open {}: {}", path.display(), e);
                None
            }
        }
    }

    fn item_size(&mut self, handle: ItemHandle) -> u64 {
        self.open
            .get(&handle.0)
            .and_then(|f| f.metadata().ok())
            .map_or(0, |m| m.len())
    }

    fn read_item(&mut self, handle: ItemHandle, buf: &mut [u8]) -> usize {
        let Some(file) = self.open.get_mut(&handle.0) else {
            return 0;
        };
        let mut filled = 0;
        while filled < buf.len() {
            match file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    debug!("Read of handle {} stopped: {}", handle.0, e);
                    break;
                }
            }
        }
        filled
    }

    fn close_item(&mut self, handle: ItemHandle) {
        self.open.remove(&handle.0);
    }

    fn should_stop(&self) -> bool {
        false
    }

    fn show_progress(&mut self, label: &str) {
        info!("{}", label);
    }

    fn set_progress_percentage(&mut self, percent: u32) {
        debug!("Progress: {}%", percent);
    }

    fn set_progress_description(&mut self, text: &str) {
        debug!("Scoring {}", text);
    }

    fn hide_progress(&mut self) {
        debug!("Progress closed");
    }

    fn output_message(&mut self, message: &str) {
        self.messages.push(HostMessage {
            text: message.to_string(),
            skipping: message.ends_with("Skipping..."),
        });
    }

    fn add_comment(&mut self, item: ItemId, text: &str, _category: u8) {
        self.annotations.push((item, text.to_string()));
    }
}
