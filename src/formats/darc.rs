//! darc - generic named-file archive.
//!
//! Boot splashes ship as a darc archive (usually LZ11-compressed on disk as
//! `logo.bcma.lz`) holding one BCLIM image per screen. The variant written
//! here is flat: one root entry followed by N file entries, no directory
//! nesting.
//!
//! ## Layout
//! ```text
//! [0x00] Magic "darc"         (4 bytes)
//! [0x04] BOM (0xFEFF)         (u16 LE)
//! [0x06] HeaderSize (0x1C)    (u16 LE)
//! [0x08] Version (0x01000000) (u32 LE)
//! [0x0C] TotalFileSize        (u32 LE, backpatched)
//! [0x10] FileDataOffset       (u32 LE)
//! [0x14] FileDataSize         (u32 LE)
//! [0x18] EntryTableSize       (u32 LE) = EntryCount x 0x0C
//! [0x1C] Entries              (EntryCount x 0x0C bytes)
//! [...]  Name table           (null-terminated UTF-8, 4-byte aligned)
//! [FileDataOffset] File data  (concatenated contents)
//! ```
//!
//! ## Entry (0x0C bytes)
//! ```text
//! [0x00] NameOffset   (u24 into the name table) | flags (top byte;
//!        0x01 marks the root entry)
//! [0x04] DataOffset   (u32 LE, absolute; 0 for empty files)
//! [0x08] Size         (u32 LE; for the root: total entry count)
//! ```
//!
//! The root entry's size field doubling as the entry count is the archive's
//! only count field; parse validates it against the entry table size.

use crate::utils::{align4, le_u16, le_u32, magic, null_string, patch_u32, push_u16, push_u32};
use crate::{Error, Result};

const HEADER_SIZE: usize = 0x1C;
const ENTRY_SIZE: usize = 0x0C;
const BOM: u16 = 0xFEFF;
const VERSION: u32 = 0x0100_0000;
const ROOT_FLAG: u32 = 0x0100_0000;

/// Parsed darc archive with file contents copied out.
#[derive(Debug, Clone)]
pub struct Darc {
    /// Named files in entry-table order.
    pub files: Vec<DarcFile>,
}

/// A single named file inside a darc archive.
#[derive(Debug, Clone)]
pub struct DarcFile {
    /// File name from the name table.
    pub name: String,
    /// File contents.
    pub data: Vec<u8>,
}

impl Darc {
    /// Parse a darc archive from a complete buffer.
    pub fn parse(data: &[u8]) -> Result<Self> {
        magic(data, 0, b"darc")?;
        if le_u16(data, 0x04)? != BOM {
            return Err(Error::Parse("invalid darc BOM"));
        }
        if le_u16(data, 0x06)? as usize != HEADER_SIZE {
            return Err(Error::Parse("unexpected darc header size"));
        }
        let _version = le_u32(data, 0x08)?;
        let total_size = le_u32(data, 0x0C)? as usize;
        if total_size > data.len() {
            return Err(Error::InvalidRange);
        }
        let data_offset = le_u32(data, 0x10)? as usize;
        let _data_size = le_u32(data, 0x14)? as usize;
        let table_size = le_u32(data, 0x18)? as usize;
        if table_size % ENTRY_SIZE != 0 {
            return Err(Error::Parse("darc entry table size not a multiple of 12"));
        }

        let entry_count = table_size / ENTRY_SIZE;
        if entry_count == 0 {
            return Err(Error::Parse("darc archive has no root entry"));
        }

        // Root entry: flag set, size field = total entry count.
        let root_attrs = le_u32(data, HEADER_SIZE)?;
        if root_attrs & ROOT_FLAG == 0 {
            return Err(Error::Parse("first darc entry is not a root"));
        }
        if le_u32(data, HEADER_SIZE + 8)? as usize != entry_count {
            return Err(Error::Parse("darc entry count mismatch"));
        }

        let name_table = HEADER_SIZE + table_size;
        if name_table > data.len() || data_offset > data.len() {
            return Err(Error::InvalidRange);
        }

        let mut files = Vec::with_capacity(entry_count - 1);
        for i in 1..entry_count {
            let entry = HEADER_SIZE + i * ENTRY_SIZE;
            let name_off = (le_u32(data, entry)? & 0x00FF_FFFF) as usize;
            let file_off = le_u32(data, entry + 4)? as usize;
            let size = le_u32(data, entry + 8)? as usize;

            let name = null_string(data, name_table + name_off)?;
            let contents = if size == 0 {
                Vec::new()
            } else {
                data.get(file_off..file_off + size)
                    .ok_or(Error::InvalidRange)?
                    .to_vec()
            };
            files.push(DarcFile {
                name,
                data: contents,
            });
        }

        Ok(Self { files })
    }

    /// Build a darc archive from `(name, contents)` pairs.
    ///
    /// Layout order is entries, name table (root name empty, padded to 4
    /// bytes), then concatenated file data; the total-size field is
    /// backpatched once the buffer is complete.
    pub fn build(files: &[(&str, &[u8])]) -> Result<Vec<u8>> {
        let entry_count = files.len() + 1;
        let table_size = entry_count * ENTRY_SIZE;

        // Name table: empty root name first, then each file name.
        let mut names = Vec::new();
        let mut name_offs = Vec::with_capacity(files.len());
        names.push(0); // root
        for (name, _) in files {
            name_offs.push(names.len());
            names.extend_from_slice(name.as_bytes());
            names.push(0);
        }
        let names_len = align4(names.len());
        names.resize(names_len, 0);
        if names_len > 0x00FF_FFFF {
            // Offsets share their entry word with the flag byte.
            return Err(Error::Parse("darc name table too large"));
        }

        let data_start = HEADER_SIZE + table_size + names_len;
        let data_len: usize = files.iter().map(|(_, d)| d.len()).sum();

        let mut out = Vec::with_capacity(data_start + data_len);
        out.extend_from_slice(b"darc");
        push_u16(&mut out, BOM);
        push_u16(&mut out, HEADER_SIZE as u16);
        push_u32(&mut out, VERSION);
        push_u32(&mut out, 0); // total size, backpatched below
        push_u32(&mut out, data_start as u32);
        push_u32(&mut out, data_len as u32);
        push_u32(&mut out, table_size as u32);

        // Root entry.
        push_u32(&mut out, ROOT_FLAG);
        push_u32(&mut out, data_start as u32);
        push_u32(&mut out, entry_count as u32);

        let mut file_off = data_start;
        for ((_, contents), &name_off) in files.iter().zip(&name_offs) {
            push_u32(&mut out, name_off as u32);
            push_u32(
                &mut out,
                if contents.is_empty() { 0 } else { file_off as u32 },
            );
            push_u32(&mut out, contents.len() as u32);
            file_off += contents.len();
        }

        out.extend_from_slice(&names);
        for (_, contents) in files {
            out.extend_from_slice(contents);
        }

        let total = out.len() as u32;
        patch_u32(&mut out, 0x0C, total);
        Ok(out)
    }

    /// Find a file by its exact name.
    pub fn get(&self, name: &str) -> Option<&DarcFile> {
        self.files.iter().find(|f| f.name == name)
    }
}
