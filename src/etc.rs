use std::{io::Write as _, path::Path};

use once_cell::sync::Lazy;
use regex::Regex;
use utf16string::{BigEndian, LittleEndian, WString};

use crate::{error, Encoding};

const BOM_LE: &[u8] = &[0xff, 0xfe];
const BOM_BE: &[u8] = &[0xfe, 0xff];

/// Split text into lines, each keeping its own terminator.
/// Concatenating the output reproduces the input exactly.
pub fn lines(raw: &str) -> impl Iterator<Item = &str> {
    static LINE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r#"(?x)
            [^\r\n]* (?: \r\n | \r | \n )
            | [^\r\n]+
        "#,
        )
        .unwrap()
    });

    LINE.find_iter(raw).map(|m| m.as_str())
}

/// The BOM, if any, stays in the decoded text so that it survives a rewrite.
pub fn read_bytes(bytes: Vec<u8>) -> Option<(String, Encoding)> {
    if bytes.starts_with(BOM_LE) {
        let raw = WString::from_utf16le(bytes).ok()?;
        return Some((raw.to_utf8(), Encoding::Utf16Le));
    }

    if bytes.starts_with(BOM_BE) {
        let raw = WString::from_utf16be(bytes).ok()?;
        return Some((raw.to_utf8(), Encoding::Utf16Be));
    }

    if let Ok(raw) = String::from_utf8(bytes.clone()) {
        return Some((raw, Encoding::Utf8));
    }

    Some((ansi_bytes_to_str(&bytes), Encoding::Ansi))
}

/// Each byte becomes the char with the same value, so any 8-bit code page
/// survives a round trip through `str_to_ansi_bytes`.
pub fn ansi_bytes_to_str(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Chars above U+00FF can only come from the search tag,
/// and those are written as UTF-8.
pub fn str_to_ansi_bytes(data: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(data.len());
    for c in data.chars() {
        match u8::try_from(c) {
            Ok(b) => bytes.push(b),
            Err(_) => bytes.extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes()),
        }
    }
    bytes
}

pub fn str_to_bytes(data: &str, encoding: Encoding) -> Vec<u8> {
    match encoding {
        Encoding::Utf8 => data.as_bytes().to_vec(),
        Encoding::Ansi => str_to_ansi_bytes(data),
        Encoding::Utf16Le => WString::<LittleEndian>::from(data).into_bytes(),
        Encoding::Utf16Be => WString::<BigEndian>::from(data).into_bytes(),
    }
}

pub fn read_file<P: AsRef<Path>>(file: P) -> Result<(String, Encoding), error::Read> {
    let bytes = std::fs::read(file)?;

    read_bytes(bytes).ok_or(error::Read::UnsupportedEncoding)
}

/// Stage the content next to the destination and then move it into place,
/// so the destination is never left truncated.
pub fn write_file<P: AsRef<Path>>(file: P, content: &str, encoding: Encoding) -> Result<(), error::Write> {
    let file = file.as_ref();
    let dir = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    staged.write_all(&str_to_bytes(content, encoding))?;
    staged.as_file().sync_all()?;

    if let Ok(metadata) = std::fs::metadata(file) {
        staged.as_file().set_permissions(metadata.permissions())?;
    }

    staged.persist(file)?;
    Ok(())
}

/// Whether both paths name the same existing file, including through hard links.
pub fn same_file<P: AsRef<Path>, Q: AsRef<Path>>(a: P, b: Q) -> bool {
    ::same_file::is_same_file(a, b).unwrap_or(false)
}
