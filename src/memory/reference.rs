//! Logical page reference strings.

use super::error::{MemoryError, MemoryResult};
use super::{PageNumber, PageTable};
use crate::config::REFERENCE_MAX;
use anyhow::{Context, Result};
use rand::Rng;
use std::path::Path;

/// An immutable, bounded sequence of page references consumed front to back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceString {
    pages: Vec<PageNumber>,
}

impl ReferenceString {
    /// Wraps `pages`, bounded by [`REFERENCE_MAX`].
    pub fn new(pages: Vec<PageNumber>) -> MemoryResult<Self> {
        Self::with_limit(pages, REFERENCE_MAX)
    }

    pub fn with_limit(pages: Vec<PageNumber>, max: usize) -> MemoryResult<Self> {
        if pages.len() > max {
            return Err(MemoryError::ReferenceTooLong {
                len: pages.len(),
                max,
            });
        }
        Ok(Self { pages })
    }

    /// Parses page numbers separated by commas and/or whitespace.
    pub fn parse(text: &str) -> Result<Self> {
        let pages = text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<PageNumber>()
                    .with_context(|| format!("Invalid page number: {:?}", token))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(pages)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read reference file: {:?}", path))?;
        Self::parse(&text).with_context(|| format!("Failed to parse reference file: {:?}", path))
    }

    /// Draws `len` page numbers uniformly from `0..table_size`.
    pub fn random<R: Rng>(len: usize, table_size: usize, rng: &mut R) -> MemoryResult<Self> {
        if table_size == 0 && len > 0 {
            return Err(MemoryError::InvalidReference {
                index: 0,
                page: 0,
                table_size,
            });
        }
        let pages = (0..len).map(|_| rng.gen_range(0..table_size)).collect();
        Self::new(pages)
    }

    /// Checks that every reference names a page of `table`.
    pub fn validate(&self, table: &PageTable) -> MemoryResult<()> {
        let table_size = table.len();
        match self.pages.iter().position(|&page| page >= table_size) {
            Some(index) => Err(MemoryError::InvalidReference {
                index,
                page: self.pages[index],
                table_size,
            }),
            None => Ok(()),
        }
    }

    /// The first `len` references (or all of them if shorter).
    pub fn prefix(&self, len: usize) -> ReferenceString {
        Self {
            pages: self.pages[..len.min(self.pages.len())].to_vec(),
        }
    }

    pub fn pages(&self) -> &[PageNumber] {
        &self.pages
    }

    pub fn iter(&self) -> impl Iterator<Item = PageNumber> + '_ {
        self.pages.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
