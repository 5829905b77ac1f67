//! Ordered input files and their optional layer names.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("The first input file cannot be removed")]
    FirstEntry,

    #[error("No input file at position {index} (have {len})")]
    OutOfRange { index: usize, len: usize },
}

/// One input file. An entry with a blank path is skipped when compiling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputFile {
    pub path: String,
    /// Custom layer name; blank means tippecanoe derives one from the path.
    pub layer: String,
}

impl InputFile {
    pub fn new(path: impl Into<String>, layer: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            layer: layer.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.path.trim().is_empty() && self.layer.trim().is_empty()
    }
}

/// The input file list of a session.
///
/// There is always at least one entry; the first entry can be edited but never
/// removed. Order is significant: it is the argument order on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFiles {
    entries: Vec<InputFile>,
}

impl Default for InputFiles {
    fn default() -> Self {
        Self {
            entries: vec![InputFile::default()],
        }
    }
}

impl InputFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a blank entry and returns its position.
    pub fn add(&mut self) -> usize {
        self.entries.push(InputFile::default());
        self.entries.len() - 1
    }

    /// Adds a file, filling the initial blank entry if it is still untouched.
    pub fn push(&mut self, file: InputFile) -> usize {
        if let [only] = self.entries.as_mut_slice() {
            if only.is_blank() {
                *only = file;
                return 0;
            }
        }
        self.entries.push(file);
        self.entries.len() - 1
    }

    /// Removes the entry at `index`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FirstEntry` for index 0 and
    /// `InputError::OutOfRange` for positions past the end.
    pub fn remove(&mut self, index: usize) -> Result<InputFile, InputError> {
        if index == 0 {
            return Err(InputError::FirstEntry);
        }
        if index >= self.entries.len() {
            return Err(InputError::OutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    pub fn set_path(&mut self, index: usize, path: &str) -> Result<(), InputError> {
        self.entry_mut(index)?.path = path.to_string();
        Ok(())
    }

    pub fn set_layer(&mut self, index: usize, layer: &str) -> Result<(), InputError> {
        self.entry_mut(index)?.layer = layer.to_string();
        Ok(())
    }

    pub fn as_slice(&self) -> &[InputFile] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut InputFile, InputError> {
        let len = self.entries.len();
        self.entries
            .get_mut(index)
            .ok_or(InputError::OutOfRange { index, len })
    }
}
