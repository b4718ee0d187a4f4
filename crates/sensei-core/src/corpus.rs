use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::{RuleChunk, ALL_LANGUAGES};

const RULE_ID_PREFIX: &str = "Rule ID:";
const SCOPE_PREFIX: &str = "Scope:";
const HEADING_PREFIX: &str = "# ";

/// The ordered, read-only set of rules loaded from a standards directory.
#[derive(Debug, Clone)]
pub struct Corpus {
    chunks: Vec<RuleChunk>,
}

impl Corpus {
    /// Parse every `*.md` document directly inside `dir`; subdirectories are not read.
    pub fn load(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::CorpusNotFound(dir.to_path_buf()));
        }
        let files = list_md_files(dir);
        info!(dir = %dir.display(), documents = files.len(), "loading standards corpus");

        let mut chunks = Vec::new();
        let mut seen: HashMap<String, String> = HashMap::new();
        for file_path in &files {
            let content = read_file_content(file_path)?;
            let parsed = parse_document(file_path, &content);
            debug!(doc = %file_path.display(), rules = parsed.len(), "parsed standards document");
            for chunk in parsed {
                if let Some(first_doc) = seen.get(&chunk.rule_id) {
                    return Err(Error::DuplicateRuleId {
                        rule_id: chunk.rule_id,
                        first_doc: first_doc.clone(),
                        second_doc: chunk.doc_name,
                    });
                }
                seen.insert(chunk.rule_id.clone(), chunk.doc_name.clone());
                chunks.push(chunk);
            }
        }

        if chunks.is_empty() {
            return Err(Error::CorpusEmpty(dir.to_path_buf()));
        }
        info!(documents = files.len(), rules = chunks.len(), "standards corpus loaded");
        Ok(Self { chunks })
    }

    pub fn chunks(&self) -> &[RuleChunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Rules that apply to `language`, in corpus order.
    pub fn scoped_to(&self, language: &str) -> Vec<RuleChunk> {
        scope_chunks(&self.chunks, language)
    }
}

/// Keep the chunks whose scope covers `language`, preserving order.
pub fn scope_chunks(chunks: &[RuleChunk], language: &str) -> Vec<RuleChunk> {
    chunks.iter().filter(|c| c.applies_to(language)).cloned().collect()
}

/// A corpus that is parsed at most once and then shared read-only.
///
/// Concurrent first callers block on the single initialization. A failed load
/// is not cached, so each caller sees the error.
#[derive(Debug)]
pub struct CorpusHandle {
    dir: PathBuf,
    cell: OnceCell<Corpus>,
}

impl CorpusHandle {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), cell: OnceCell::new() }
    }

    pub fn get(&self) -> Result<&Corpus> {
        self.cell.get_or_try_init(|| Corpus::load(&self.dir))
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

struct OpenRule {
    rule_id: String,
    scope: String,
    section_title: String,
    body: Vec<String>,
}

/// Split one standards document into rule chunks.
///
/// `# ` headings set the section title, `Rule ID:` opens a rule, `Scope:` sets
/// the open rule's scope, and every other line is body text of the open rule.
/// Lines before the first rule are dropped, as are rules whose body is blank.
pub fn parse_document(path: &Path, content: &str) -> Vec<RuleChunk> {
    let doc_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let mut section_title = default_section_title(path);
    let mut chunks = Vec::new();
    let mut open: Option<OpenRule> = None;

    for line in content.lines() {
        if let Some(heading) = line.strip_prefix(HEADING_PREFIX) {
            section_title = heading.trim_start_matches('#').trim().to_string();
            continue;
        }
        let trimmed = line.trim_start();
        if let Some(id) = trimmed.strip_prefix(RULE_ID_PREFIX) {
            flush(open.take(), &doc_name, &mut chunks);
            let id = id.trim();
            if !id.is_empty() {
                open = Some(OpenRule {
                    rule_id: id.to_string(),
                    scope: ALL_LANGUAGES.to_string(),
                    section_title: section_title.clone(),
                    body: Vec::new(),
                });
            }
            continue;
        }
        if let Some(scope) = trimmed.strip_prefix(SCOPE_PREFIX) {
            if let Some(rule) = open.as_mut() {
                rule.scope = scope.trim().to_string();
            }
            continue;
        }
        if let Some(rule) = open.as_mut() {
            rule.body.push(line.to_string());
        }
    }
    flush(open, &doc_name, &mut chunks);
    chunks
}

fn flush(rule: Option<OpenRule>, doc_name: &str, chunks: &mut Vec<RuleChunk>) {
    let Some(rule) = rule else { return };
    let text = rule.body.join("\n").trim().to_string();
    if text.is_empty() {
        debug!(rule_id = %rule.rule_id, doc = doc_name, "dropping rule with empty body");
        return;
    }
    chunks.push(RuleChunk {
        rule_id: rule.rule_id,
        scope: rule.scope,
        doc_name: doc_name.to_string(),
        section_title: rule.section_title,
        text,
    });
}

/// `python_style.md` becomes `Python Style`.
fn default_section_title(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().replace('_', " "))
        .unwrap_or_default();
    let mut out = String::with_capacity(stem.len());
    let mut prev_alpha = false;
    for ch in stem.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

fn read_file_content(file_path: &Path) -> Result<String> {
    let bytes = fs::read(file_path).map_err(|source| Error::Io { path: file_path.to_path_buf(), source })?;
    match String::from_utf8(bytes) {
        Ok(content) => Ok(content),
        Err(e) => Ok(String::from_utf8_lossy(e.as_bytes()).to_string()),
    }
}

fn list_md_files(root: &Path) -> Vec<PathBuf> {
    let mut md_files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .max_depth(1)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("md"))
        .collect();
    md_files.sort();
    md_files
}
