//! Tag-aware string helpers shared by the segmenter and the field extractors.
//!
//! Nothing here builds a tree. The schedule pages are scanned as flat text with
//! just enough tag awareness to find row and cell boundaries, link texts and
//! line breaks. Tag names are matched case-insensitively on ASCII.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static LINK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?is)<a\b([^>]*)>(.*?)</a\s*>"#).expect("link pattern compiles"));
static HREF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)href\s*=\s*["']?([^"'\s>]+)"#).expect("href pattern compiles"));

/// Tags whose closing (or self-closing) form ends a visual line of text.
const LINE_BREAK_TAGS: &[&str] = &["br", "div", "li", "p", "tr", "table", "h1", "h2", "h3", "h4", "h5", "h6"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
	Open,
	Close,
}

/// One `<...>` tag located in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagToken {
	pub kind: TagKind,
	pub name: String,
	pub span: Range<usize>,
}

/// Iterator over the tags of a document in order of appearance.
///
/// Comments, doctypes and processing instructions are skipped. A `<` with no
/// closing `>` ends the scan, so unterminated markup costs a single pass.
pub struct Tags<'a> {
	src: &'a str,
	pos: usize,
}

impl<'a> Tags<'a> {
	pub const fn new(src: &'a str) -> Self {
		Self { src, pos: 0 }
	}
}

impl Iterator for Tags<'_> {
	type Item = TagToken;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			let rest = self.src.get(self.pos..)?;
			let open = rest.find('<')? + self.pos;
			if !opens_tag(&self.src[open + 1..]) {
				self.pos = open + 1;
				continue;
			}
			let close = self.src[open..].find('>')? + open;
			self.pos = close + 1;

			let inner = &self.src[open + 1..close];
			let (kind, body) = match inner.strip_prefix('/') {
				Some(body) => (TagKind::Close, body),
				None => (TagKind::Open, inner),
			};

			let name: String = body.chars().take_while(char::is_ascii_alphanumeric).map(|c| c.to_ascii_lowercase()).collect();
			if name.is_empty() {
				continue;
			}

			return Some(TagToken { kind, name, span: open..close + 1 });
		}
	}
}

/// `rest`, the text right after a `<`, starts a tag, a comment or a declaration.
/// A `<` before anything else (`U<12`) is literal text.
fn opens_tag(rest: &str) -> bool {
	let name = rest.strip_prefix('/').unwrap_or(rest);
	rest.starts_with(['!', '?']) || name.starts_with(|c: char| c.is_ascii_alphabetic())
}

/// A matched `<tag ...> ... </tag>` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
	/// From the `<` of the opening tag to the `>` of the closing tag.
	pub outer: Range<usize>,
	/// Content between the two tags, may still contain nested markup.
	pub inner: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
	Scanning,
	InCandidate { open_start: usize, content_start: usize },
}

/// Explicit `Scanning -> InCandidate -> Emit` machine over one tag name.
///
/// An opening tag enters `InCandidate`, the matching closing tag emits a block
/// and returns to `Scanning`. A second opening tag before any close restarts
/// the candidate and drops the unclosed fragment, as does running out of input.
pub struct BlockScanner<'a> {
	tags: Tags<'a>,
	tag: &'a str,
	state: ScanState,
	dropped: usize,
}

impl<'a> BlockScanner<'a> {
	pub const fn new(src: &'a str, tag: &'a str) -> Self {
		Self {
			tags: Tags::new(src),
			tag,
			state: ScanState::Scanning,
			dropped: 0,
		}
	}

	/// Fragments opened but never closed so far.
	pub const fn dropped(&self) -> usize {
		self.dropped
	}
}

impl Iterator for BlockScanner<'_> {
	type Item = Block;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			let Some(token) = self.tags.next() else {
				if matches!(self.state, ScanState::InCandidate { .. }) {
					self.dropped += 1;
					self.state = ScanState::Scanning;
				}
				return None;
			};

			if !token.name.eq_ignore_ascii_case(self.tag) {
				continue;
			}

			match (self.state.clone(), token.kind) {
				(ScanState::Scanning, TagKind::Open) => {
					self.state = ScanState::InCandidate {
						open_start: token.span.start,
						content_start: token.span.end,
					};
				}
				(ScanState::InCandidate { .. }, TagKind::Open) => {
					self.dropped += 1;
					self.state = ScanState::InCandidate {
						open_start: token.span.start,
						content_start: token.span.end,
					};
				}
				(ScanState::InCandidate { open_start, content_start }, TagKind::Close) => {
					let block = Block {
						outer: open_start..token.span.end,
						inner: content_start..token.span.start,
					};
					self.state = ScanState::Scanning;
					return Some(block);
				}
				(ScanState::Scanning, TagKind::Close) => {}
			}
		}
	}
}

/// Inner markup of every `<tag>...</tag>` block in `src`.
pub fn block_contents<'a>(src: &'a str, tag: &'a str) -> Vec<&'a str> {
	BlockScanner::new(src, tag).map(|b| &src[b.inner]).collect()
}

/// A hyperlink found in markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
	pub href: String,
	pub text: String,
}

/// All `<a>` links in `src` with their visible text cleaned.
pub fn links(src: &str) -> Vec<Link> {
	LINK_RE
		.captures_iter(src)
		.map(|caps| {
			let attrs = caps.get(1).map_or("", |m| m.as_str());
			let href = HREF_RE.captures(attrs).and_then(|c| c.get(1)).map_or_else(String::new, |m| m.as_str().to_string());
			let text = strip_tags(caps.get(2).map_or("", |m| m.as_str()));
			Link { href, text }
		})
		.collect()
}

/// Remove every `<...>` tag, decode the common entities and collapse whitespace.
pub fn strip_tags(s: &str) -> String {
	let mut out = String::with_capacity(s.len());
	let mut in_tag = false;
	for (i, ch) in s.char_indices() {
		match ch {
			'<' if !in_tag && opens_tag(&s[i + 1..]) => {
				in_tag = true;
				out.push(' ');
			}
			'>' if in_tag => in_tag = false,
			_ if !in_tag => out.push(ch),
			_ => {}
		}
	}
	normalize_ws(&decode_entities(&out))
}

pub fn decode_entities(s: &str) -> String {
	s.replace("&nbsp;", " ")
		.replace("&#160;", " ")
		.replace("&quot;", "\"")
		.replace("&#39;", "'")
		.replace("&apos;", "'")
		.replace("&lt;", "<")
		.replace("&gt;", ">")
		.replace("&amp;", "&")
}

/// Collapse runs of whitespace into one space and trim.
pub fn normalize_ws(s: &str) -> String {
	s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Case-insensitive (ASCII) substring search returning a byte offset into `haystack`.
pub fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
	if needle.is_empty() {
		return None;
	}
	haystack.to_ascii_lowercase().find(&needle.to_ascii_lowercase())
}

pub fn contains_ci(haystack: &str, needle: &str) -> bool {
	find_ci(haystack, needle).is_some()
}

/// Offsets of `needle` in `haystack` that no ASCII digit touches on either side,
/// so `1/4/2025` is not found inside `11/4/2025` nor `Aug 3` inside `Aug 30`.
/// Both inputs are compared as given; lowercase them first for a case-insensitive search.
pub fn standalone_matches<'h>(haystack: &'h str, needle: &'h str) -> impl Iterator<Item = usize> + 'h {
	haystack.match_indices(needle).map(|(pos, _)| pos).filter(move |&pos| {
		!needle.is_empty()
			&& !haystack[..pos].ends_with(|c: char| c.is_ascii_digit())
			&& !haystack[pos + needle.len()..].starts_with(|c: char| c.is_ascii_digit())
	})
}

/// Largest char boundary `<= idx`.
pub fn floor_boundary(s: &str, idx: usize) -> usize {
	let mut idx = idx.min(s.len());
	while !s.is_char_boundary(idx) {
		idx -= 1;
	}
	idx
}

/// Smallest char boundary `>= idx`.
pub fn ceil_boundary(s: &str, idx: usize) -> usize {
	let mut idx = idx.min(s.len());
	while !s.is_char_boundary(idx) {
		idx += 1;
	}
	idx
}

/// Slice `[start - radius, end + radius]` clamped to the string and snapped to char boundaries.
pub fn surrounding(s: &str, start: usize, end: usize, radius: usize) -> Range<usize> {
	let from = floor_boundary(s, start.saturating_sub(radius));
	let to = ceil_boundary(s, end.saturating_add(radius));
	from..to
}

/// Byte ranges of visual lines: split on newlines and on line-breaking tags.
/// Blank lines are left out.
pub fn line_spans(src: &str) -> Vec<Range<usize>> {
	let mut cuts: Vec<usize> = src.match_indices('\n').map(|(i, _)| i + 1).collect();
	cuts.extend(
		Tags::new(src)
			.filter(|t| LINE_BREAK_TAGS.contains(&t.name.as_str()) && (t.kind == TagKind::Close || t.name == "br"))
			.map(|t| t.span.end),
	);
	cuts.sort_unstable();
	cuts.dedup();

	cuts.push(src.len());

	let mut spans = Vec::with_capacity(cuts.len());
	let mut start = 0;
	for cut in cuts {
		if cut > start {
			if !src[start..cut].trim().is_empty() {
				spans.push(start..cut);
			}
			start = cut;
		}
	}
	spans
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_strip_tags_collapses_markup_and_entities() {
		assert_eq!(strip_tags("<td> <a href='x'>Reno&nbsp;Apex</a>\n U12 </td>"), "Reno Apex U12");
		assert_eq!(strip_tags("Tom &amp; Jerry<br/>FC"), "Tom & Jerry FC");
	}

	#[test]
	fn test_tags_skip_comments_and_stop_on_unterminated() {
		let names: Vec<String> = Tags::new("<!-- c --><TR class=x><td>1</td></tr><td").map(|t| t.name).collect();
		assert_eq!(names, vec!["tr", "td", "td", "tr"]);
	}

	#[test]
	fn test_lone_angle_bracket_is_text() {
		let src = "<tr><td>U<12</td><td>a < b</td></tr>";
		let names: Vec<String> = Tags::new(src).map(|t| t.name).collect();
		assert_eq!(names, vec!["tr", "td", "td", "td", "td", "tr"]);

		let cells: Vec<String> = block_contents(src, "td").iter().map(|c| strip_tags(c)).collect();
		assert_eq!(cells, vec!["U<12", "a < b"]);
	}

	#[test]
	fn test_block_scanner_emits_closed_rows_only() {
		let src = "<tr><td>a</td></tr><tr><td>broken<tr><td>b</td></tr><tr>tail";
		let mut scanner = BlockScanner::new(src, "tr");
		let rows: Vec<&str> = scanner.by_ref().map(|b| &src[b.inner]).collect();
		assert_eq!(rows, vec!["<td>a</td>", "<td>b</td>"]);
		assert_eq!(scanner.dropped(), 2);
	}

	#[test]
	fn test_block_scanner_ignores_stray_close() {
		let src = "</tr><TR><td>x</td></TR>";
		assert_eq!(block_contents(src, "tr"), vec!["<td>x</td>"]);
	}

	#[test]
	fn test_links_extract_href_and_text() {
		let found = links(r#"<a href="/teams/1"><b>Sacramento</b> United</a> and <A HREF='/schedules?pitch=9'>Park</A>"#);
		assert_eq!(found.len(), 2);
		assert_eq!(found[0].href, "/teams/1");
		assert_eq!(found[0].text, "Sacramento United");
		assert_eq!(found[1].href, "/schedules?pitch=9");
	}

	#[test]
	fn test_find_ci_and_boundaries() {
		assert_eq!(find_ci("Game at RENO apex", "reno Apex"), Some(8));
		assert_eq!(find_ci("anything", ""), None);

		let s = "añb";
		assert_eq!(floor_boundary(s, 2), 1);
		assert_eq!(ceil_boundary(s, 2), 3);
		assert_eq!(surrounding("abcdef", 2, 3, 10), 0..6);
	}

	#[test]
	fn test_standalone_matches_respect_digit_boundaries() {
		let found: Vec<usize> = standalone_matches("11/4/2025 or 1/4/2025", "1/4/2025").collect();
		assert_eq!(found, vec![13]);
		assert_eq!(standalone_matches("aug 30 and aug 3", "aug 3").collect::<Vec<_>>(), vec![11]);
		assert_eq!(standalone_matches("8/30/2025", "8/30").count(), 1);
		assert_eq!(standalone_matches("anything", "").count(), 0);
	}

	#[test]
	fn test_line_spans_split_on_breaking_tags() {
		let src = "<div>one</div><div>two<br>three</div>\nfour";
		let lines: Vec<String> = line_spans(src).into_iter().map(|r| strip_tags(&src[r])).collect();
		assert_eq!(lines, vec!["one", "two", "three", "four"]);
	}
}
