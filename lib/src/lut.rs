//! Binary look-up table (LUT) file format (version 0): big-endian,
//! structure-of-arrays keys/values slabs, grouped into maps. Grounded on
//! `royalur/lut/reader.py::LutReader`/`Lut`.

use std::io::{self, ErrorKind};

use serde_json::Value;

const MAGIC: &[u8; 3] = b"RGU";
const VERSION: u8 = 0;
const KEY_SIZE: usize = 4;
const VALUE_SIZE: usize = 2;

/// An in-memory LUT: a JSON header plus `N` maps, each a sorted `u32 ->
/// u16` table. Keys and values live in two contiguous slabs rather than
/// one array of pairs, so a hit only ever touches the keys slab until the
/// final value read.
#[derive(Debug, Clone)]
pub struct LutFile {
    header: Value,
    map_sizes: Vec<i32>,
    keys: Vec<u32>,
    values: Vec<u16>,
}

impl LutFile {
    /// Assembles a LUT from already-sorted-per-map `(key, value)` pairs,
    /// ready to be written with `write_to`. Used by the enumerator/CLI
    /// when generating a corpus.
    #[must_use]
    pub fn new(header: Value, maps: Vec<Vec<(u32, u16)>>) -> Self {
        let map_sizes = maps.iter().map(|m| m.len() as i32).collect();
        let mut keys = Vec::new();
        let mut values = Vec::new();
        for map in maps {
            keys.reserve(map.len());
            values.reserve(map.len());
            for (key, value) in map {
                keys.push(key);
                values.push(value);
            }
        }
        Self {
            header,
            map_sizes,
            keys,
            values,
        }
    }

    #[must_use]
    pub fn header(&self) -> &Value {
        &self.header
    }

    #[must_use]
    pub fn number_of_maps(&self) -> usize {
        self.map_sizes.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn map_offset(&self, map_index: usize) -> usize {
        self.map_sizes[..map_index].iter().map(|&s| s as usize).sum()
    }

    /// Looks up `key` within `map_index`'s slab via a binary search
    /// bounded to that map alone (`keys[offset .. offset + map_size)`).
    ///
    /// The Python reference this is ported from binary-searches
    /// `0..len(self._keys)` regardless of `map_index` -- a bug that only
    /// happens not to bite single-map LUTs. Spec.md §6.1 calls for the
    /// per-map bound, which is what this implements.
    pub fn lookup(&self, map_index: usize, key: u32) -> io::Result<u16> {
        let map_size = *self.map_sizes.get(map_index).ok_or_else(|| {
            io::Error::new(ErrorKind::InvalidInput, format!("no such map {map_index}"))
        })? as usize;
        let offset = self.map_offset(map_index);
        let slab = &self.keys[offset..offset + map_size];

        let mut low = 0usize;
        let mut high = map_size;
        while low < high {
            let mid = low + (high - low) / 2;
            match slab[mid].cmp(&key) {
                std::cmp::Ordering::Equal => return Ok(self.values[offset + mid]),
                std::cmp::Ordering::Less => low = mid + 1,
                std::cmp::Ordering::Greater => high = mid,
            }
        }
        Err(io::Error::new(
            ErrorKind::NotFound,
            format!("key {key} not found in look-up table"),
        ))
    }

    /// Parses a LUT from its on-disk byte representation.
    pub fn read(bytes: &[u8]) -> io::Result<Self> {
        let mut cursor = 0usize;

        let magic = read_slice(bytes, &mut cursor, 3)?;
        if magic != MAGIC {
            return Err(io::Error::new(
                ErrorKind::InvalidData,
                "invalid magic number, expected \"RGU\"",
            ));
        }

        let version = read_slice(bytes, &mut cursor, 1)?[0];
        if version != VERSION {
            return Err(io::Error::new(
                ErrorKind::InvalidData,
                format!("unsupported LUT version {version}, only version 0 is implemented"),
            ));
        }

        let header_length = read_i32(bytes, &mut cursor)?;
        let header_bytes = read_slice(bytes, &mut cursor, usize_from_signed(header_length)?)?;
        let header_str = std::str::from_utf8(header_bytes)
            .map_err(|e| io::Error::new(ErrorKind::InvalidData, e))?;
        let header: Value = serde_json::from_str(header_str)
            .map_err(|e| io::Error::new(ErrorKind::InvalidData, e))?;

        let number_of_maps = usize_from_signed(read_i32(bytes, &mut cursor)?)?;
        let mut map_sizes = Vec::with_capacity(number_of_maps);
        for _ in 0..number_of_maps {
            map_sizes.push(read_i32(bytes, &mut cursor)?);
        }
        let total: usize = map_sizes.iter().map(|&s| usize_from_signed(s)).sum::<io::Result<_>>()?;

        let keys_bytes = read_slice(bytes, &mut cursor, total * KEY_SIZE)?;
        let keys = keys_bytes
            .chunks_exact(KEY_SIZE)
            .map(|chunk| u32::from_be_bytes(chunk.try_into().expect("chunk is KEY_SIZE bytes")))
            .collect();

        let values_bytes = read_slice(bytes, &mut cursor, total * VALUE_SIZE)?;
        let values = values_bytes
            .chunks_exact(VALUE_SIZE)
            .map(|chunk| u16::from_be_bytes(chunk.try_into().expect("chunk is VALUE_SIZE bytes")))
            .collect();

        Ok(Self {
            header,
            map_sizes,
            keys,
            values,
        })
    }

    /// Serializes this LUT to its on-disk byte representation.
    #[must_use]
    pub fn write_to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(MAGIC);
        out.push(VERSION);

        let header_str = self.header.to_string();
        out.extend_from_slice(&(header_str.len() as i32).to_be_bytes());
        out.extend_from_slice(header_str.as_bytes());

        out.extend_from_slice(&(self.map_sizes.len() as i32).to_be_bytes());
        for size in &self.map_sizes {
            out.extend_from_slice(&size.to_be_bytes());
        }

        for key in &self.keys {
            out.extend_from_slice(&key.to_be_bytes());
        }
        for value in &self.values {
            out.extend_from_slice(&value.to_be_bytes());
        }
        out
    }
}

fn read_slice<'a>(bytes: &'a [u8], cursor: &mut usize, len: usize) -> io::Result<&'a [u8]> {
    let end = cursor.checked_add(len).ok_or_else(|| {
        io::Error::new(ErrorKind::UnexpectedEof, "truncated LUT file: length overflow")
    })?;
    let slice = bytes
        .get(*cursor..end)
        .ok_or_else(|| io::Error::new(ErrorKind::UnexpectedEof, "truncated LUT file"))?;
    *cursor = end;
    Ok(slice)
}

fn read_i32(bytes: &[u8], cursor: &mut usize) -> io::Result<i32> {
    let slice = read_slice(bytes, cursor, 4)?;
    Ok(i32::from_be_bytes(slice.try_into().expect("read_slice returns 4 bytes")))
}

fn usize_from_signed(value: i32) -> io::Result<usize> {
    usize::try_from(value)
        .map_err(|_| io::Error::new(ErrorKind::InvalidData, format!("negative length {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip_single_map() {
        let maps = vec![vec![(1u32, 10u16), (5, 50), (100, 1000)]];
        let lut = LutFile::new(json!({"author": "test"}), maps);
        let bytes = lut.write_to_bytes();
        let parsed = LutFile::read(&bytes).unwrap();
        assert_eq!(parsed.lookup(0, 5).unwrap(), 50);
        assert_eq!(parsed.lookup(0, 100).unwrap(), 1000);
        assert!(parsed.lookup(0, 6).is_err());
    }

    #[test]
    fn test_lookup_is_bounded_per_map() {
        // map 0 contains key 5 mapping to 500; map 1 also contains key 5,
        // mapping to a different value. A lookup against map 1 must never
        // find map 0's entry, proving the search is bounded to its slab.
        let maps = vec![vec![(5u32, 500u16)], vec![(5u32, 999u16)]];
        let lut = LutFile::new(json!({}), maps);
        assert_eq!(lut.lookup(0, 5).unwrap(), 500);
        assert_eq!(lut.lookup(1, 5).unwrap(), 999);
    }

    #[test]
    fn test_rejects_bad_magic() {
        let mut bytes = LutFile::new(json!({}), vec![vec![]]).write_to_bytes();
        bytes[0] = b'X';
        assert_eq!(
            LutFile::read(&bytes).unwrap_err().kind(),
            ErrorKind::InvalidData
        );
    }

    #[test]
    fn test_truncated_file_is_unexpected_eof() {
        let bytes = LutFile::new(json!({"a": 1}), vec![vec![(1, 2)]]).write_to_bytes();
        let truncated = &bytes[..bytes.len() - 1];
        assert_eq!(
            LutFile::read(truncated).unwrap_err().kind(),
            ErrorKind::UnexpectedEof
        );
    }
}
