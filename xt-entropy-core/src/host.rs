// xt-entropy-core/src/host.rs
//! Defines the `EvidenceHost` trait: everything the engine consumes from the
//! forensic application it is loaded into.
//!
//! The engine never touches evidence directly. Volume names, item counts, item
//! content, progress display, messages and the annotation sink are all reached
//! through this trait, so the same coordinator drives the real host, the
//! directory-backed host of the CLI, and in-memory hosts in tests.
//!
//! License: MIT OR APACHE 2.0

/// Opaque identifier of one item (file) within the open case.
pub type ItemId = i32;

/// Opaque reference to a volume handed over by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VolumeHandle(pub usize);

/// Opaque reference to an item opened for reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemHandle(pub usize);

/// Which display form of a volume name to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameForm {
    /// Full descriptive name, e.g. `"Image.e01, Partition 1 (NTFS)"`.
    Long,
    /// Abbreviated name as shown in the case tree.
    Short,
}

/// A trait that defines the host collaborator of the engine.
///
/// Calls are made from a single thread and each returns before the engine
/// proceeds. Reads are bounded by the slice handed in.
pub trait EvidenceHost {
    /// Title of the active case, or `None` when no case is open.
    fn case_title(&self) -> Option<String>;

    /// Whether the active case holds at least one evidence object.
    fn has_evidence(&self) -> bool;

    /// Display name of `volume` in the requested form.
    fn volume_name(&self, volume: VolumeHandle, form: NameForm) -> String;

    /// Number of items the host will enumerate for `volume`.
    fn item_count(&self, volume: VolumeHandle) -> u64;

    /// Display name of an item, used in progress text and warnings.
    fn item_name(&self, item: ItemId) -> String;

    /// Opens an item for reading. `None` means the item cannot be read.
    fn open_item(&mut self, volume: VolumeHandle, item: ItemId) -> Option<ItemHandle>;

    /// Logical size of an opened item in bytes.
    fn item_size(&mut self, handle: ItemHandle) -> u64;

    /// Reads from offset 0 into `buf`, returning the number of bytes read.
    fn read_item(&mut self, handle: ItemHandle, buf: &mut [u8]) -> usize;

    /// Closes a handle returned by [`EvidenceHost::open_item`].
    fn close_item(&mut self, handle: ItemHandle);

    /// Polled once per item; `true` asks the engine to stop.
    fn should_stop(&self) -> bool;

    /// Opens the progress window with the given label.
    fn show_progress(&mut self, label: &str);

    fn set_progress_percentage(&mut self, percent: u32);

    /// Secondary progress line; hosts without one may ignore it.
    fn set_progress_description(&mut self, _text: &str) {}

    fn hide_progress(&mut self);

    /// Writes one line to the host's message output.
    fn output_message(&mut self, message: &str);

    /// Attaches `text` to `item` as a comment under `category`.
    fn add_comment(&mut self, item: ItemId, text: &str, category: u8);
}
