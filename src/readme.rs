use crate::classify::{Tier, TierBuckets};
use crate::config::{ReadmeAnchors, SectionAnchor};
use crate::render::{render_issue_list, render_statistics};
use crate::stats::Statistics;
use regex::{Captures, Regex};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Text that ends a generated issue list. A body stops right before the
/// first of these, or at end of file.
const SECTION_BOUNDARIES: [&str; 3] = ["\n#### ", "\n### ", "\n---"];

#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("section `{section}` not found in README")]
    SectionNotFound { section: String },
    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("invalid anchor pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Splices rendered issue lists and statistics into a README.
pub struct ReadmePatcher<'a> {
    anchors: &'a ReadmeAnchors,
    program_name: &'a str,
}

impl<'a> ReadmePatcher<'a> {
    pub fn new(anchors: &'a ReadmeAnchors, program_name: &'a str) -> Self {
        Self {
            anchors,
            program_name,
        }
    }

    /// Returns `content` with every tier section and the statistics block
    /// replaced. Fails without partial output if any anchor is missing.
    pub fn patch_content(
        &self,
        content: &str,
        buckets: &TierBuckets,
        stats: &Statistics,
    ) -> Result<String, PatchError> {
        let mut patched = content.to_string();
        for tier in Tier::ALL {
            let anchor = self.anchor(tier);
            let body = render_issue_list(buckets.get(tier));
            patched = replace_section(&patched, anchor, &body)?;
        }
        self.replace_statistics(&patched, stats)
    }

    /// Reads the README at `path`, patches it in memory and writes it back in
    /// a single atomic replace. The file is untouched when any step fails.
    pub fn patch_file(
        &self,
        path: &Path,
        buckets: &TierBuckets,
    ) -> Result<Statistics, PatchError> {
        let content = fs::read_to_string(path).map_err(|source| PatchError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let stats = Statistics::from_buckets(buckets);
        let patched = self.patch_content(&content, buckets, &stats)?;

        write_atomic(path, &patched).map_err(|source| PatchError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = patched.len(), "README written");
        Ok(stats)
    }

    fn anchor(&self, tier: Tier) -> &SectionAnchor {
        match tier {
            Tier::Beginner => &self.anchors.beginner,
            Tier::Intermediate => &self.anchors.intermediate,
            Tier::Advanced => &self.anchors.advanced,
        }
    }

    fn replace_statistics(
        &self,
        content: &str,
        stats: &Statistics,
    ) -> Result<String, PatchError> {
        let pattern = Regex::new(&format!(
            r"({}\n\n)- \*\*Total {} Issues\*\*: \d+\n- \*\*Completed Issues\*\*: \d+\n- \*\*Active Contributors\*\*: \d+\n- \*\*Open Issues\*\*: \d+",
            regex::escape(&self.anchors.statistics_heading),
            regex::escape(self.program_name),
        ))?;
        if !pattern.is_match(content) {
            return Err(PatchError::SectionNotFound {
                section: self.anchors.statistics_heading.clone(),
            });
        }

        let rendered = render_statistics(stats, self.program_name);
        let replaced =
            pattern.replace_all(content, |caps: &Captures| format!("{}{rendered}", &caps[1]));
        Ok(replaced.into_owned())
    }
}

/// Replaces the body after every occurrence of `anchor` with `body` plus a
/// newline.
fn replace_section(
    content: &str,
    anchor: &SectionAnchor,
    body: &str,
) -> Result<String, PatchError> {
    let pattern = Regex::new(&format!(
        r"{}\s*\n{}\n",
        regex::escape(&anchor.heading),
        regex::escape(&anchor.comment),
    ))?;

    let mut patched = String::with_capacity(content.len() + body.len());
    let mut cursor = 0;
    for found in pattern.find_iter(content) {
        if found.start() < cursor {
            continue;
        }
        patched.push_str(&content[cursor..found.end()]);
        patched.push_str(body);
        patched.push('\n');
        cursor = section_end(content, found.end());
    }

    if cursor == 0 {
        return Err(PatchError::SectionNotFound {
            section: anchor.heading.clone(),
        });
    }
    patched.push_str(&content[cursor..]);
    Ok(patched)
}

fn section_end(content: &str, from: usize) -> usize {
    SECTION_BOUNDARIES
        .iter()
        .filter_map(|boundary| content[from..].find(boundary))
        .min()
        .map_or(content.len(), |offset| from + offset)
}

fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("README");
    let tmp = path.with_file_name(format!(".{file_name}.tmp.{}", std::process::id()));

    let written = fs::File::create(&tmp).and_then(|mut file| {
        file.write_all(content.as_bytes())?;
        file.sync_all()
    });
    if let Err(e) = written.and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}
