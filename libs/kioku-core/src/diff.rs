//! Character-wise diffs between a typed answer and the canonical card text.
//!
//! The canonical text may carry furigana annotations the user never types.
//! Diffing therefore runs against the stripped form and afterwards maps
//! every matched range back to the annotated original, so the feedback view
//! can render readings on top of the comparison result.

use crate::furigana::{escape_html, tokenize, Token, TokenKind};
use serde::{Deserialize, Serialize};

/// CSS class put on matching parts of the rendered answer diff.
pub const MATCH_CLASS: &str = "kioku-matching-answer-part";

/// Kind of a diff operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffTag {
    /// No change between source and target.
    Equal,
    /// Insertion into the target string.
    Insert,
    /// Deletion from the source string.
    Delete,
    /// Replacement from source to target.
    Replace,
}

/// One aligned edit operation between the two compared strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opcode {
    pub tag: DiffTag,
    /// Substring consumed from the typed answer.
    pub source_text: String,
    /// Substring consumed from the annotated canonical answer.
    pub target_text: String,
}

impl Opcode {
    /// Render the opcode as HTML for the answer feedback view.
    ///
    /// Only the canonical side carries ruby markup; the typed side is
    /// escaped verbatim.
    pub fn to_html(&self) -> String {
        match self.tag {
            DiffTag::Equal => format!(
                "<span class=\"{MATCH_CLASS}\">{}</span>",
                tokenize(&self.target_text).to_html()
            ),
            DiffTag::Insert => format!("<ins>{}</ins>", tokenize(&self.target_text).to_html()),
            DiffTag::Delete => format!("<del>{}</del>", escape_html(&self.source_text)),
            DiffTag::Replace => format!(
                "<del>{}</del><ins>{}</ins>",
                escape_html(&self.source_text),
                tokenize(&self.target_text).to_html()
            ),
        }
    }
}

/// Compare a typed answer against the annotated canonical answer.
///
/// Concatenating `source_text` over the result reproduces `user_answer`;
/// concatenating `target_text` reproduces `canonical_answer` including its
/// annotations.
pub fn diff(user_answer: &str, canonical_answer: &str) -> Vec<Opcode> {
    let tokenized = tokenize(canonical_answer);
    let plain_target = tokenized.strip_annotations().to_string();
    let source: Vec<char> = user_answer.chars().collect();
    let target: Vec<char> = plain_target.chars().collect();
    let mut cursor = AnnotationCursor::new(tokenized.tokens());
    edit_script(&source, &target)
        .into_iter()
        .map(|run| Opcode {
            tag: run.tag,
            source_text: source[run.source_start..run.source_end].iter().collect(),
            target_text: cursor.take(run.target_end - run.target_start),
        })
        .collect()
}

/// Render a whole diff as HTML.
pub fn diff_to_html(opcodes: &[Opcode]) -> String {
    opcodes.iter().map(Opcode::to_html).collect()
}

struct Run {
    tag: DiffTag,
    source_start: usize,
    source_end: usize,
    target_start: usize,
    target_end: usize,
}

/// Character-level edit script based on a longest common subsequence,
/// merged into one run per opcode.
fn edit_script(source: &[char], target: &[char]) -> Vec<Run> {
    let n = source.len();
    let m = target.len();
    // lcs[i][j] = length of the LCS of source[i..] and target[j..]
    let mut lcs = vec![vec![0u32; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if source[i] == target[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut runs = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < n || j < m {
        let (source_start, target_start) = (i, j);
        if i < n && j < m && source[i] == target[j] {
            while i < n && j < m && source[i] == target[j] {
                i += 1;
                j += 1;
            }
            runs.push(Run {
                tag: DiffTag::Equal,
                source_start,
                source_end: i,
                target_start,
                target_end: j,
            });
        } else {
            while (i < n || j < m) && !(i < n && j < m && source[i] == target[j]) {
                if j >= m || (i < n && lcs[i + 1][j] >= lcs[i][j + 1]) {
                    i += 1;
                } else {
                    j += 1;
                }
            }
            let tag = match (i > source_start, j > target_start) {
                (true, true) => DiffTag::Replace,
                (true, false) => DiffTag::Delete,
                (false, _) => DiffTag::Insert,
            };
            runs.push(Run {
                tag,
                source_start,
                source_end: i,
                target_start,
                target_end: j,
            });
        }
    }
    runs
}

/// Walks the canonical token stream, converting plain-text spans back into
/// their annotated form.
///
/// The cursor only ever advances, so across a whole diff each reading is
/// re-attached to exactly the opcode that consumed its base character.
struct AnnotationCursor<'a> {
    tokens: &'a [Token],
    index: usize,
    /// Chars already consumed from the current `Text` token.
    offset: usize,
}

impl<'a> AnnotationCursor<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            index: 0,
            offset: 0,
        }
    }

    /// Consume `count` plain chars, returning the annotated text covering
    /// them.
    fn take(&mut self, count: usize) -> String {
        let mut result = String::new();
        let mut taken = 0;
        while taken < count {
            let token = &self.tokens[self.index];
            match token.kind {
                TokenKind::BaseChar => {
                    result.push_str(&token.text);
                    taken += 1;
                    self.index += 1;
                    // a base character is always followed by its delimiter,
                    // reading, and delimiter tokens
                    for _ in 0..3 {
                        result.push_str(&self.tokens[self.index].text);
                        self.index += 1;
                    }
                }
                TokenKind::Text => {
                    let chars: Vec<char> = token.text.chars().collect();
                    let wanted = (count - taken).min(chars.len() - self.offset);
                    result.extend(chars[self.offset..self.offset + wanted].iter());
                    taken += wanted;
                    self.offset += wanted;
                    if self.offset == chars.len() {
                        self.index += 1;
                        self.offset = 0;
                    }
                }
                TokenKind::OpenDelim | TokenKind::Reading | TokenKind::CloseDelim => {
                    self.index += 1;
                }
            }
        }
        result
    }
}
