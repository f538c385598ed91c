//! RAM-backed [`StoragePort`] for host tests and boards without EEPROM.

use crate::app::ports::StoragePort;
use crate::error::StorageError;

/// Size of the blob area.  Matches the smallest EEPROM page the parameter
/// blob must fit in.
pub const MEM_STORAGE_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub struct MemStorage {
    data: [u8; MEM_STORAGE_CAPACITY],
    /// `None` until the first write, so a blank area reads as `NotFound`.
    len: Option<usize>,
    writes: u32,
    fail_writes: bool,
}

impl MemStorage {
    pub const fn new() -> Self {
        Self {
            data: [0; MEM_STORAGE_CAPACITY],
            len: None,
            writes: 0,
            fail_writes: false,
        }
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> u32 {
        self.writes
    }

    /// Make every following write fail with [`StorageError::Io`].
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn contents(&self) -> Option<&[u8]> {
        self.len.map(|len| &self.data[..len])
    }

    pub fn erase(&mut self) {
        self.len = None;
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StoragePort for MemStorage {
    fn read(&self, buf: &mut [u8]) -> Result<usize, StorageError> {
        let stored = self.contents().ok_or(StorageError::NotFound)?;
        let dst = buf.get_mut(..stored.len()).ok_or(StorageError::Full)?;
        dst.copy_from_slice(stored);
        Ok(stored.len())
    }

    fn write(&mut self, data: &[u8]) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Io);
        }
        let dst = self
            .data
            .get_mut(..data.len())
            .ok_or(StorageError::Full)?;
        dst.copy_from_slice(data);
        self.len = Some(data.len());
        self.writes += 1;
        Ok(())
    }
}
