use crate::markup::{standalone_matches, surrounding};
use crate::schema::DateForm;
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::debug;

/// Bytes kept on each side of a date mention.
pub const DEFAULT_WINDOW_RADIUS: usize = 5000;

/// A slice of the document believed to hold one day's fixtures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window<'a> {
	pub text: &'a str,
	pub start: usize,
	/// Date whose mention produced the window, `None` for the whole-document fallback.
	pub target: Option<NaiveDate>,
}

impl<'a> Window<'a> {
	pub const fn whole(document: &'a str) -> Self {
		Self {
			text: document,
			start: 0,
			target: None,
		}
	}

	pub const fn is_fallback(&self) -> bool {
		self.target.is_none()
	}
}

/// Windows around the first mention of every date form.
///
/// Forms are matched case-insensitively and never inside a longer number. Windows may overlap; identical bounds
/// are emitted once. When no form occurs anywhere the whole document becomes
/// the single window so partially structured pages are still scanned.
pub fn locate_windows<'a>(document: &'a str, forms: &[DateForm], radius: usize) -> Vec<Window<'a>> {
	let lowered = document.to_ascii_lowercase();
	let mut seen = HashSet::new();
	let mut windows = Vec::new();

	for form in forms {
		let needle = form.text.to_ascii_lowercase();
		if needle.is_empty() {
			continue;
		}
		let Some(pos) = standalone_matches(&lowered, &needle).next() else {
			continue;
		};

		let span = surrounding(document, pos, pos + needle.len(), radius);
		if !seen.insert((span.start, span.end)) {
			continue;
		}

		debug!(form = %form.text, offset = pos, start = span.start, end = span.end, "date window located");
		windows.push(Window {
			text: &document[span.clone()],
			start: span.start,
			target: Some(form.date),
		});
	}

	if windows.is_empty() {
		debug!(len = document.len(), "no target date mentioned, scanning whole document");
		windows.push(Window::whole(document));
	}

	windows
}
