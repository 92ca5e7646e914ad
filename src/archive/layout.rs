//! Fixed-width ZIP header structures.
//!
//! Every multi-byte field is little-endian. Field positions are named
//! constants so tests can check individual fields of an encoded header.

/// Version needed to extract / version made by: 2.0, MS-DOS host.
pub const ZIP_VERSION: u16 = 20;

/// Compression method 0: stored, no compression.
pub const METHOD_STORED: u16 = 0;

/// General-purpose flag bit 11: file name is UTF-8.
pub const FLAG_UTF8_NAME: u16 = 1 << 11;

fn put_u16(buf: &mut [u8], at: usize, value: u16) {
    buf[at..at + 2].copy_from_slice(&value.to_le_bytes());
}

fn put_u32(buf: &mut [u8], at: usize, value: u32) {
    buf[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

/// Header preceding each entry's name and data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalFileHeader {
    pub flags: u16,
    pub crc32: u32,
    pub size: u32,
    pub name_len: u16,
}

impl LocalFileHeader {
    pub const SIGNATURE: u32 = 0x0403_4b50;
    pub const LEN: usize = 30;

    pub const OFF_SIGNATURE: usize = 0;
    pub const OFF_VERSION_NEEDED: usize = 4;
    pub const OFF_FLAGS: usize = 6;
    pub const OFF_METHOD: usize = 8;
    pub const OFF_MOD_TIME: usize = 10;
    pub const OFF_MOD_DATE: usize = 12;
    pub const OFF_CRC32: usize = 14;
    pub const OFF_COMPRESSED_SIZE: usize = 18;
    pub const OFF_UNCOMPRESSED_SIZE: usize = 22;
    pub const OFF_NAME_LEN: usize = 26;
    pub const OFF_EXTRA_LEN: usize = 28;

    /// Encode the header. Modification time/date and extra length are zero.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut buf = [0u8; Self::LEN];
        put_u32(&mut buf, Self::OFF_SIGNATURE, Self::SIGNATURE);
        put_u16(&mut buf, Self::OFF_VERSION_NEEDED, ZIP_VERSION);
        put_u16(&mut buf, Self::OFF_FLAGS, self.flags);
        put_u16(&mut buf, Self::OFF_METHOD, METHOD_STORED);
        put_u16(&mut buf, Self::OFF_MOD_TIME, 0);
        put_u16(&mut buf, Self::OFF_MOD_DATE, 0);
        put_u32(&mut buf, Self::OFF_CRC32, self.crc32);
        // Stored entries: compressed size == uncompressed size
        put_u32(&mut buf, Self::OFF_COMPRESSED_SIZE, self.size);
        put_u32(&mut buf, Self::OFF_UNCOMPRESSED_SIZE, self.size);
        put_u16(&mut buf, Self::OFF_NAME_LEN, self.name_len);
        put_u16(&mut buf, Self::OFF_EXTRA_LEN, 0);
        buf
    }
}

/// Central directory header, one per entry, followed by the entry name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CentralDirectoryHeader {
    pub flags: u16,
    pub crc32: u32,
    pub size: u32,
    pub name_len: u16,
    /// Offset of the entry's local file header from the start of the archive.
    pub local_header_offset: u32,
}

impl CentralDirectoryHeader {
    pub const SIGNATURE: u32 = 0x0201_4b50;
    pub const LEN: usize = 46;

    pub const OFF_SIGNATURE: usize = 0;
    pub const OFF_VERSION_MADE_BY: usize = 4;
    pub const OFF_VERSION_NEEDED: usize = 6;
    pub const OFF_FLAGS: usize = 8;
    pub const OFF_METHOD: usize = 10;
    pub const OFF_MOD_TIME: usize = 12;
    pub const OFF_MOD_DATE: usize = 14;
    pub const OFF_CRC32: usize = 16;
    pub const OFF_COMPRESSED_SIZE: usize = 20;
    pub const OFF_UNCOMPRESSED_SIZE: usize = 24;
    pub const OFF_NAME_LEN: usize = 28;
    pub const OFF_EXTRA_LEN: usize = 30;
    pub const OFF_COMMENT_LEN: usize = 32;
    pub const OFF_DISK_START: usize = 34;
    pub const OFF_INTERNAL_ATTRS: usize = 36;
    pub const OFF_EXTERNAL_ATTRS: usize = 38;
    pub const OFF_LOCAL_HEADER_OFFSET: usize = 42;

    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut buf = [0u8; Self::LEN];
        put_u32(&mut buf, Self::OFF_SIGNATURE, Self::SIGNATURE);
        put_u16(&mut buf, Self::OFF_VERSION_MADE_BY, ZIP_VERSION);
        put_u16(&mut buf, Self::OFF_VERSION_NEEDED, ZIP_VERSION);
        put_u16(&mut buf, Self::OFF_FLAGS, self.flags);
        put_u16(&mut buf, Self::OFF_METHOD, METHOD_STORED);
        put_u16(&mut buf, Self::OFF_MOD_TIME, 0);
        put_u16(&mut buf, Self::OFF_MOD_DATE, 0);
        put_u32(&mut buf, Self::OFF_CRC32, self.crc32);
        put_u32(&mut buf, Self::OFF_COMPRESSED_SIZE, self.size);
        put_u32(&mut buf, Self::OFF_UNCOMPRESSED_SIZE, self.size);
        put_u16(&mut buf, Self::OFF_NAME_LEN, self.name_len);
        put_u16(&mut buf, Self::OFF_EXTRA_LEN, 0);
        put_u16(&mut buf, Self::OFF_COMMENT_LEN, 0);
        put_u16(&mut buf, Self::OFF_DISK_START, 0);
        put_u16(&mut buf, Self::OFF_INTERNAL_ATTRS, 0);
        put_u32(&mut buf, Self::OFF_EXTERNAL_ATTRS, 0);
        put_u32(&mut buf, Self::OFF_LOCAL_HEADER_OFFSET, self.local_header_offset);
        buf
    }
}

/// End-of-central-directory record. Single-disk archives only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndOfCentralDirectory {
    pub entry_count: u16,
    pub central_directory_size: u32,
    pub central_directory_offset: u32,
}

impl EndOfCentralDirectory {
    pub const SIGNATURE: u32 = 0x0605_4b50;
    pub const LEN: usize = 22;

    pub const OFF_SIGNATURE: usize = 0;
    pub const OFF_DISK_NUMBER: usize = 4;
    pub const OFF_CENTRAL_DIRECTORY_DISK: usize = 6;
    pub const OFF_ENTRIES_ON_DISK: usize = 8;
    pub const OFF_ENTRIES_TOTAL: usize = 10;
    pub const OFF_CENTRAL_DIRECTORY_SIZE: usize = 12;
    pub const OFF_CENTRAL_DIRECTORY_OFFSET: usize = 16;
    pub const OFF_COMMENT_LEN: usize = 20;

    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut buf = [0u8; Self::LEN];
        put_u32(&mut buf, Self::OFF_SIGNATURE, Self::SIGNATURE);
        put_u16(&mut buf, Self::OFF_DISK_NUMBER, 0);
        put_u16(&mut buf, Self::OFF_CENTRAL_DIRECTORY_DISK, 0);
        put_u16(&mut buf, Self::OFF_ENTRIES_ON_DISK, self.entry_count);
        put_u16(&mut buf, Self::OFF_ENTRIES_TOTAL, self.entry_count);
        put_u32(
            &mut buf,
            Self::OFF_CENTRAL_DIRECTORY_SIZE,
            self.central_directory_size,
        );
        put_u32(
            &mut buf,
            Self::OFF_CENTRAL_DIRECTORY_OFFSET,
            self.central_directory_offset,
        );
        put_u16(&mut buf, Self::OFF_COMMENT_LEN, 0);
        buf
    }
}
