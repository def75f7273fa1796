//! Icon identifier fixer.
//!
//! LVGL's image converter names symbols after the source image, so a weather
//! icon `01d.png` becomes `uint8_t 01d_map[]` and `lv_img_dsc_t 01d`, neither
//! of which is a valid C identifier. This module finds the generated
//! `icon_<code>.c` files in a directory and prefixes those symbols in place.

mod rules;

pub use rules::{Rewrite, RuleKind, RuleSet, SubstitutionRule};

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::defaults::FixerDefaults;
use crate::error::{Error, Result};
use crate::local_files::FileSystem;

// ============================================================================
// Types
// ============================================================================

/// Icon code derived from a filename, e.g. `01d` from `icon_01d.c`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct IconCode(String);

impl IconCode {
    /// Extract the icon code from a filename. The match is anchored at the
    /// start of the name only.
    pub fn from_filename(name: &str) -> Option<Self> {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let re = PATTERN
            .get_or_init(|| Regex::new(r"^icon_(\d+[dn])\.c").expect("Invalid regex pattern"));

        re.captures(name).map(|cap| IconCode(cap[1].to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IconCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A generated icon source file found in the target directory.
#[derive(Debug, Clone)]
pub struct IconFile {
    pub path: PathBuf,
    pub file_name: String,
    pub code: IconCode,
}

/// Replacement count for one rule in one file.
#[derive(Debug, Clone, Serialize)]
pub struct RuleReplacements {
    pub rule: RuleKind,
    pub count: usize,
}

/// Result of processing a single icon file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOutcome {
    pub file: String,
    pub code: IconCode,
    pub changed: bool,
    pub replacements: Vec<RuleReplacements>,
}

impl FileOutcome {
    /// Console line for this file.
    pub fn status_line(&self) -> String {
        if self.changed {
            format!("Fixed: {}", self.file)
        } else {
            format!("No changes needed for: {}", self.file)
        }
    }
}

/// Result of a full run over the icon directory.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixReport {
    pub directory: String,
    pub files: Vec<FileOutcome>,
    pub files_fixed: usize,
    pub total_replacements: usize,
    /// Expected icon codes with no matching file in the directory.
    pub missing_codes: Vec<String>,
}

// ============================================================================
// Discovery
// ============================================================================

/// List the icon files directly inside `dir`, sorted by filename.
///
/// Directories and names that are not valid UTF-8 are skipped.
pub fn find_icon_files<F: FileSystem>(fs: &F, dir: &Path) -> Result<Vec<IconFile>> {
    let mut files: Vec<IconFile> = fs
        .list(dir)?
        .into_iter()
        .filter(|entry| !entry.is_dir)
        .filter_map(|entry| {
            let file_name = entry.file_name()?.to_string();
            let code = IconCode::from_filename(&file_name)?;
            Some(IconFile {
                path: entry.path,
                file_name,
                code,
            })
        })
        .collect();

    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(files)
}

// ============================================================================
// Fixing
// ============================================================================

/// Apply the rules to one file, writing it back only when the text changed.
pub fn fix_file<F: FileSystem>(
    fs: &F,
    file: &IconFile,
    rules: &RuleSet,
) -> Result<FileOutcome> {
    let original = fs.read(&file.path)?;
    let rewrite = rules.apply(&original);
    let changed = rewrite.content != original;

    if changed {
        fs.write(&file.path, &rewrite.content)?;
    }

    Ok(FileOutcome {
        file: file.file_name.clone(),
        code: file.code.clone(),
        changed,
        replacements: rewrite
            .replacements
            .iter()
            .map(|&(rule, count)| RuleReplacements { rule, count })
            .collect(),
    })
}

/// Fix every icon file in the configured directory.
///
/// `on_file` is called after each file is processed, so callers can report
/// progress before a later failure aborts the run. Errors from reading or
/// writing any file stop the run immediately; files already rewritten stay
/// rewritten.
pub fn fix_directory<F, C>(
    fs: &F,
    defaults: &FixerDefaults,
    mut on_file: C,
) -> Result<FixReport>
where
    F: FileSystem,
    C: FnMut(&FileOutcome),
{
    let dir = defaults.directory.as_path();
    if !fs.is_dir(dir) {
        return Err(Error::directory_not_found(dir.display().to_string()));
    }

    let files = find_icon_files(fs, dir)?;
    log_status!("iconfix", "Found {} icon file(s) in {}", files.len(), dir.display());

    let rules = RuleSet::new(&defaults.identifier_prefix);
    let mut outcomes = Vec::with_capacity(files.len());

    for file in &files {
        let outcome = fix_file(fs, file, &rules)?;
        on_file(&outcome);
        outcomes.push(outcome);
    }

    let codes: Vec<&IconCode> = files.iter().map(|f| &f.code).collect();
    let missing_codes = missing_codes(&defaults.expected_codes, &codes);

    Ok(FixReport {
        directory: dir.display().to_string(),
        files_fixed: outcomes.iter().filter(|o| o.changed).count(),
        total_replacements: outcomes
            .iter()
            .flat_map(|o| o.replacements.iter())
            .map(|r| r.count)
            .sum(),
        files: outcomes,
        missing_codes,
    })
}

/// Expected codes that have no icon file.
pub fn missing_codes(expected: &[String], found: &[&IconCode]) -> Vec<String> {
    expected
        .iter()
        .filter(|code| !found.iter().any(|f| f.as_str() == code.as_str()))
        .cloned()
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
