#![doc = include_str!("../README.md")]

pub mod error;
mod etc;

use std::path::Path;

/// Absolute system directory as it appears in registry entry files
/// generated on the build machine.
pub const SYSTEM_FOLDER_PATH: &str = r"/C:\\Windows\\system32\\";

/// Installer placeholder for the target machine's system directory.
pub const SYSTEM_FOLDER_TAG: &str = "[SystemFolder]";

const CODE_DIRECTORY_TRAILER: &[char] = &['\\', ' ', '\n'];

/// Text encoding of a registry entry file.
/// Files are written back out in the encoding they were read in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Encoding {
    /// This also covers plain ASCII.
    #[default]
    Utf8,
    /// Any 8-bit code page, such as the Windows ANSI code page that `REGEDIT4` files use.
    /// Bytes are carried through one char per byte, so substitutions only need
    /// the patterns to match byte for byte.
    Ansi,
    /// This is what Regedit uses for `Windows Registry Editor Version 5.00` files.
    Utf16Le,
    Utf16Be,
}

/// Rewrites absolute paths in registry entry files into a search tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixer {
    code_base: String,
    template_base: String,
    search_tag: String,
}

impl Fixer {
    /// Derive the search patterns.
    ///
    /// `code_directory` is a plain filesystem path (single backslashes).
    /// Trailing backslashes, spaces, and newlines are ignored.
    pub fn new(code_directory: impl AsRef<str>, search_tag: impl Into<String>) -> Self {
        let search_tag = search_tag.into();
        let code_base = code_directory
            .as_ref()
            .trim_end_matches(CODE_DIRECTORY_TRAILER)
            .replace('\\', r"\\");
        let template_base = format!(r"{search_tag}\\..\\..");

        Self {
            code_base,
            template_base,
            search_tag,
        }
    }

    /// The code directory with escaped backslashes, as it appears in the file.
    pub fn code_base(&self) -> &str {
        &self.code_base
    }

    /// The search tag followed by an escaped `\..\..`.
    pub fn template_base(&self) -> &str {
        &self.template_base
    }

    /// The placeholder substituted for absolute paths.
    pub fn search_tag(&self) -> &str {
        &self.search_tag
    }

    /// Apply the substitutions to a single line.
    /// The code base goes first, so that a template directory under it
    /// turns into a template base that the second substitution collapses.
    pub fn fix_line(&self, line: &str) -> String {
        let line = if self.code_base.is_empty() {
            line.to_string()
        } else {
            line.replace(&self.code_base, &self.search_tag)
        };

        line.replace(&self.template_base, &self.search_tag)
            .replace(SYSTEM_FOLDER_PATH, SYSTEM_FOLDER_TAG)
    }

    /// Apply the substitutions line by line.
    /// Line count, order, and terminators are preserved.
    pub fn fix_str(&self, raw: &str) -> String {
        self.fix_lines(raw).0
    }

    fn fix_lines(&self, raw: &str) -> (String, usize) {
        let mut out = String::with_capacity(raw.len());
        let mut changed = 0;

        for line in etc::lines(raw) {
            let fixed = self.fix_line(line);
            if fixed != line {
                changed += 1;
            }
            out.push_str(&fixed);
        }

        (out, changed)
    }

    /// Copy `old` to `new` and then rewrite `new` in place.
    /// Both may be the same file.
    /// The original encoding is kept, and `new` is replaced atomically.
    pub fn fix_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, old: P, new: Q) -> Result<(), error::Fix> {
        let old = old.as_ref();
        let new = new.as_ref();

        log::debug!(
            "Code base: {:?}, template base: {:?}, search tag: {:?}",
            self.code_base,
            self.template_base,
            self.search_tag
        );
        if self.code_base.is_empty() {
            log::warn!("Code directory is empty; only the template and system folder will be replaced");
        }

        if etc::same_file(old, new) {
            log::debug!("Source and destination are the same file, skipping copy: {:?}", new);
        } else {
            log::debug!("Copying {:?} to {:?}", old, new);
            std::fs::copy(old, new).map_err(error::Fix::Copy)?;
        }

        let (raw, encoding) = etc::read_file(new)?;
        let (fixed, changed) = self.fix_lines(&raw);
        etc::write_file(new, &fixed, encoding)?;

        log::info!("Fixed {} line(s) in {:?} ({:?})", changed, new, encoding);
        Ok(())
    }
}

/// Write a copy of `old` to `new` with absolute paths replaced by `search_tag`.
pub fn fix<P: AsRef<Path>, Q: AsRef<Path>>(
    code_directory: impl AsRef<str>,
    old: P,
    new: Q,
    search_tag: impl Into<String>,
) -> Result<(), error::Fix> {
    Fixer::new(code_directory, search_tag).fix_file(old, new)
}
