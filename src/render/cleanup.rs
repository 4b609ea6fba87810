//! Noise filtering: running headers, footers and page numbers.

use std::collections::{HashMap, HashSet};

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::Page;

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Page-number lines only
    Minimal,
    /// NFC + headers/footers + page numbers
    #[default]
    Standard,
    /// Standard plus date-only lines and very short lines
    Aggressive,
}

/// Options for noise filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Remove lines repeated at the top or bottom of most pages
    pub remove_headers_footers: bool,

    /// Fraction of pages a first/last line must appear on (strictly more
    /// than) to count as a header or footer
    pub header_footer_threshold: f64,

    /// Header/footer detection is skipped for documents with fewer pages
    pub min_pages_for_headers: usize,

    /// Remove lines that are just the page's own number
    pub remove_page_numbers: bool,

    /// How far a page-number line may be from the page's 1-based ordinal
    pub page_number_tolerance: u32,

    /// Remove lines consisting only of a numeric date (e.g. 01/15/2023)
    pub remove_date_lines: bool,

    /// Remove non-empty lines shorter than this many characters (0 = off)
    pub min_line_chars: usize,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
            CleanupPreset::Aggressive => Self::aggressive(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: false,
            remove_headers_footers: false,
            remove_date_lines: false,
            min_line_chars: 0,
            ..Self::standard()
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            remove_headers_footers: true,
            header_footer_threshold: 0.5,
            min_pages_for_headers: 2,
            remove_page_numbers: true,
            page_number_tolerance: 2,
            remove_date_lines: false,
            min_line_chars: 0,
        }
    }

    /// Aggressive cleanup options.
    pub fn aggressive() -> Self {
        Self {
            remove_date_lines: true,
            min_line_chars: 3,
            ..Self::standard()
        }
    }

    /// Set the header/footer frequency threshold.
    pub fn with_header_footer_threshold(mut self, threshold: f64) -> Self {
        self.header_footer_threshold = threshold;
        self
    }

    /// Set the page-number tolerance.
    pub fn with_page_number_tolerance(mut self, tolerance: u32) -> Self {
        self.page_number_tolerance = tolerance;
        self
    }

    /// Check that the options are usable.
    pub fn validate(&self) -> Result<()> {
        let threshold = self.header_footer_threshold;
        if !(threshold > 0.0 && threshold < 1.0) {
            return Err(Error::InvalidOption(format!(
                "header/footer threshold must be in (0, 1), got {}",
                threshold
            )));
        }
        Ok(())
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Strips layout noise from page text.
///
/// The passes run until the text stops changing, so applying the filter
/// to its own output changes nothing.
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    options: CleanupOptions,
    page_number_regex: Regex,
    date_regex: Regex,
}

impl NoiseFilter {
    /// Create a filter with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self {
            options,
            page_number_regex: Regex::new(
                r"^[\s\-–—|•·\[\](){}<>]*(?i:(?:page|pg\.?|p\.)\s*)?(\d{1,6})(?:\s*(?i:of|/)\s*\d{1,6})?[\s\-–—|•·\[\](){}<>]*$",
            )
            .expect("page number pattern is valid"),
            date_regex: Regex::new(r"^\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4}$")
                .expect("date pattern is valid"),
        }
    }

    /// Create a filter from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Options in use.
    pub fn options(&self) -> &CleanupOptions {
        &self.options
    }

    /// Clean the `cleaned_text` of every page in place.
    pub fn clean(&self, pages: &mut [Page]) {
        let texts: Vec<&str> = pages.iter().map(|p| p.cleaned_text.as_str()).collect();
        let cleaned = self.clean_texts(&texts);
        for (page, text) in pages.iter_mut().zip(cleaned) {
            page.cleaned_text = text;
        }
    }

    /// Clean a sequence of page texts, given in page order.
    pub fn clean_texts<S: AsRef<str>>(&self, texts: &[S]) -> Vec<String> {
        let mut pages: Vec<Vec<String>> = texts
            .iter()
            .map(|text| {
                let text = text.as_ref();
                let text: String = if self.options.normalize_unicode {
                    text.nfc().collect()
                } else {
                    text.to_string()
                };
                text.lines().map(str::to_string).collect()
            })
            .collect();

        let mut passes = 0;
        loop {
            passes += 1;
            let mut changed = self.remove_noise_lines(&mut pages);
            if self.options.remove_headers_footers
                && pages.len() >= self.options.min_pages_for_headers
            {
                changed |= self.remove_headers_footers(&mut pages);
            }
            if !changed {
                break;
            }
        }
        log::debug!("Noise filter settled after {} passes", passes);

        pages.into_iter().map(|lines| join_trimmed(&lines)).collect()
    }

    /// Drop page-number, date and short lines anywhere on the page.
    fn remove_noise_lines(&self, pages: &mut [Vec<String>]) -> bool {
        let mut changed = false;
        for (index, lines) in pages.iter_mut().enumerate() {
            let before = lines.len();
            lines.retain(|line| !self.is_noise_line(line.trim(), index + 1));
            changed |= lines.len() != before;
        }
        changed
    }

    fn is_noise_line(&self, line: &str, ordinal: usize) -> bool {
        if line.is_empty() {
            return false;
        }
        if self.options.remove_page_numbers && self.is_page_number(line, ordinal) {
            return true;
        }
        if self.options.remove_date_lines && self.date_regex.is_match(line) {
            return true;
        }
        self.options.min_line_chars > 0 && line.chars().count() < self.options.min_line_chars
    }

    /// Whether `line` looks like the printed number of page `ordinal`.
    pub fn is_page_number(&self, line: &str, ordinal: usize) -> bool {
        let Some(caps) = self.page_number_regex.captures(line.trim()) else {
            return false;
        };
        let Ok(value) = caps[1].parse::<usize>() else {
            return false;
        };
        value.abs_diff(ordinal) <= self.options.page_number_tolerance as usize
    }

    /// Remove first/last lines that recur on more than the threshold of pages.
    fn remove_headers_footers(&self, pages: &mut [Vec<String>]) -> bool {
        let repeated = self.repeated_edge_lines(pages);
        if repeated.is_empty() {
            return false;
        }
        log::debug!("Detected {} header/footer lines", repeated.len());

        let mut changed = false;
        for lines in pages.iter_mut() {
            // Last first, so the first line's index stays valid.
            if let Some(last) = last_content_line(lines) {
                if repeated.contains(lines[last].trim()) {
                    lines.remove(last);
                    changed = true;
                }
            }
            if let Some(first) = first_content_line(lines) {
                if repeated.contains(lines[first].trim()) {
                    lines.remove(first);
                    changed = true;
                }
            }
        }
        changed
    }

    fn repeated_edge_lines(&self, pages: &[Vec<String>]) -> HashSet<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for lines in pages {
            let mut edges: Vec<&str> = Vec::with_capacity(2);
            for index in [first_content_line(lines), last_content_line(lines)]
                .into_iter()
                .flatten()
            {
                let value = lines[index].trim();
                if !edges.contains(&value) {
                    edges.push(value);
                }
            }
            for value in edges {
                *counts.entry(value).or_insert(0) += 1;
            }
        }

        let page_count = pages.len() as f64;
        counts
            .into_iter()
            .filter(|(_, count)| *count as f64 / page_count > self.options.header_footer_threshold)
            .map(|(value, _)| value.to_string())
            .collect()
    }
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self::new(CleanupOptions::default())
    }
}

fn first_content_line(lines: &[String]) -> Option<usize> {
    lines.iter().position(|line| !line.trim().is_empty())
}

fn last_content_line(lines: &[String]) -> Option<usize> {
    lines.iter().rposition(|line| !line.trim().is_empty())
}

/// Join lines, dropping blank lines at the start and end of the page.
fn join_trimmed(lines: &[String]) -> String {
    match (first_content_line(lines), last_content_line(lines)) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}
