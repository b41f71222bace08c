// xt-entropy-core/tests/common/mod.rs
//! In-memory `EvidenceHost` shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashSet;

use xt_entropy_core::{EvidenceHost, ItemHandle, ItemId, NameForm, VolumeHandle};

/// One item the mock host can serve.
#[derive(Debug, Clone)]
pub struct MockItem {
    pub id: ItemId,
    pub name: String,
    /// `None` makes the item unopenable.
    pub content: Option<Vec<u8>>,
    /// Overrides the size reported for the item.
    pub reported_size: Option<u64>,
}

impl MockItem {
    pub fn new(id: ItemId, content: &[u8]) -> Self {
        Self {
            id,
            name: format!("file{}.bin", id),
            content: Some(content.to_vec()),
            reported_size: None,
        }
    }

    pub fn unreadable(id: ItemId) -> Self {
        Self { content: None, ..Self::new(id, b"") }
    }

    pub fn with_reported_size(mut self, size: u64) -> Self {
        self.reported_size = Some(size);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Shown(String),
    Percent(u32),
    Hidden,
}

#[derive(Debug)]
pub struct MockHost {
    pub case_title: Option<String>,
    pub has_evidence: bool,
    /// `(long, short)` display names, indexed by `VolumeHandle`.
    pub volumes: Vec<(String, String)>,
    pub items: Vec<MockItem>,
    /// Overrides the item count announced at Prepare.
    pub announced_count: Option<u64>,
    /// `should_stop` turns true once this many comments exist.
    pub stop_after: Option<usize>,
    pub comments: Vec<(ItemId, String, u8)>,
    pub messages: Vec<String>,
    pub progress: Vec<ProgressEvent>,
    pub descriptions: Vec<String>,
    pub open_handles: HashSet<usize>,
    pub opens: usize,
    pub closes: usize,
}

impl MockHost {
    pub fn new(items: Vec<MockItem>) -> Self {
        Self {
            case_title: Some("Case 42".to_string()),
            has_evidence: true,
            volumes: vec![("Image.e01, Partition 1".to_string(), "Image.e01".to_string())],
            items,
            announced_count: None,
            stop_after: None,
            comments: Vec::new(),
            messages: Vec::new(),
            progress: Vec::new(),
            descriptions: Vec::new(),
            open_handles: HashSet::new(),
            opens: 0,
            closes: 0,
        }
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id).collect()
    }

    pub fn comment_for(&self, id: ItemId) -> Option<&str> {
        self.comments.iter().find(|(item, _, _)| *item == id).map(|(_, text, _)| text.as_str())
    }

    pub fn progress_visible(&self) -> bool {
        let shown = self.progress.iter().filter(|e| matches!(e, ProgressEvent::Shown(_))).count();
        let hidden = self.progress.iter().filter(|e| **e == ProgressEvent::Hidden).count();
        shown > hidden
    }

    fn item(&self, id: ItemId) -> Option<&MockItem> {
        self.items.iter().find(|item| item.id == id)
    }
}

impl EvidenceHost for MockHost {
    fn case_title(&self) -> Option<String> {
        self.case_title.clone()
    }

    fn has_evidence(&self) -> bool {
        self.has_evidence
    }

    fn volume_name(&self, volume: VolumeHandle, form: NameForm) -> String {
        let (long, short) = &self.volumes[volume.0];
        match form {
            NameForm::Long => long.clone(),
            NameForm::Short => short.clone(),
        }
    }

    fn item_count(&self, _volume: VolumeHandle) -> u64 {
        self.announced_count.unwrap_or(self.items.len() as u64)
    }

    fn item_name(&self, item: ItemId) -> String {
        self.item(item).map(|i| i.name.clone()).unwrap_or_default()
    }

    fn open_item(&mut self, _volume: VolumeHandle, item: ItemId) -> Option<ItemHandle> {
        let index = self.items.iter().position(|i| i.id == item)?;
        self.items[index].content.as_ref()?;
        self.opens += 1;
        self.open_handles.insert(index);
        Some(ItemHandle(index))
    }

    fn item_size(&mut self, handle: ItemHandle) -> u64 {
        let item = &self.items[handle.0];
        item.reported_size
            .unwrap_or_else(|| item.content.as_ref().map_or(0, |c| c.len() as u64))
    }

    fn read_item(&mut self, handle: ItemHandle, buf: &mut [u8]) -> usize {
        let content = self.items[handle.0].content.as_deref().unwrap_or_default();
        let n = content.len().min(buf.len());
        buf[..n].copy_from_slice(&content[..n]);
        n
    }

    fn close_item(&mut self, handle: ItemHandle) {
        self.closes += 1;
        self.open_handles.remove(&handle.0);
    }

    fn should_stop(&self) -> bool {
        self.stop_after.is_some_and(|limit| self.comments.len() >= limit)
    }

    fn show_progress(&mut self, label: &str) {
        self.progress.push(ProgressEvent::Shown(label.to_string()));
    }

    fn set_progress_percentage(&mut self, percent: u32) {
        self.progress.push(ProgressEvent::Percent(percent));
    }

    fn set_progress_description(&mut self, text: &str) {
        self.descriptions.push(text.to_string());
    }

    fn hide_progress(&mut self) {
        self.progress.push(ProgressEvent::Hidden);
    }

    fn output_message(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    fn add_comment(&mut self, item: ItemId, text: &str, category: u8) {
        self.comments.push((item, text.to_string(), category));
    }
}
