//! Headless model for a tag dropdown bound to a single string field.
//!
//! The entries are the registry tags in order, then the current value as a
//! free-text entry when it is not registered, then an "add new" entry that
//! asks the host to open its registry editor. A custom value is never forced
//! onto a registered tag.

use crate::registry::TagRegistry;

/// One row of the dropdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickerEntry {
    /// A registered tag.
    Tag(String),
    /// The field's current value, which is not a registered tag.
    Custom(String),
    /// Open the registry editor.
    AddNew,
}

/// What the host should do after the user picks a row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickerAction {
    /// Store this tag in the field.
    Set(String),
    /// Leave the field as it is.
    Keep,
    /// Show the registry editor.
    OpenRegistry,
}

/// Dropdown state for one string field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagPicker {
    entries: Vec<PickerEntry>,
    selected: Option<usize>,
}

impl TagPicker {
    pub fn new(registry: &TagRegistry, current: &str) -> Self {
        let mut entries: Vec<PickerEntry> =
            registry.iter().map(|t| PickerEntry::Tag(t.to_owned())).collect();

        let selected = match registry.index_of(current) {
            Some(idx) => Some(idx),
            None if !current.is_empty() => {
                entries.push(PickerEntry::Custom(current.to_owned()));
                Some(entries.len() - 1)
            }
            None => None,
        };
        entries.push(PickerEntry::AddNew);

        Self { entries, selected }
    }

    #[inline]
    pub fn entries(&self) -> &[PickerEntry] {
        &self.entries
    }

    /// Row showing the current value; `None` when the field is empty.
    #[inline]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Row labels, for hosts that only take strings.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| match entry {
            PickerEntry::Tag(tag) | PickerEntry::Custom(tag) => tag.as_str(),
            PickerEntry::AddNew => "Add Tag...",
        })
    }

    pub fn choose(&self, index: usize) -> PickerAction {
        match self.entries.get(index) {
            Some(PickerEntry::Tag(tag)) => PickerAction::Set(tag.clone()),
            Some(PickerEntry::AddNew) => PickerAction::OpenRegistry,
            Some(PickerEntry::Custom(_)) | None => PickerAction::Keep,
        }
    }
}
