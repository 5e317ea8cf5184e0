//! Mapping between logical pages and (file, local page) pairs.

use folio_core::PdfError;

/// Per-file page counts and the first logical page of each file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageMap {
    counts: Vec<usize>,
    /// `starts[i]` is the first logical page of file `i`.
    starts: Vec<usize>,
    total: usize,
}

impl PageMap {
    pub(crate) fn new(counts: Vec<usize>) -> Self {
        let mut starts = Vec::with_capacity(counts.len());
        let mut total = 0;
        for count in &counts {
            starts.push(total);
            total += count;
        }
        Self {
            counts,
            starts,
            total,
        }
    }

    /// Total number of logical pages.
    pub(crate) fn total(&self) -> usize {
        self.total
    }

    /// Page counts of the constituent files, in file order.
    pub(crate) fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// First logical page of file `file_index`.
    pub(crate) fn first_page(&self, file_index: usize) -> usize {
        self.starts.get(file_index).copied().unwrap_or(self.total)
    }

    /// Resolve a logical page into `(file_index, local_page)`.
    ///
    /// Files with no pages are never returned.
    pub(crate) fn locate(&self, page: usize) -> Result<(usize, usize), PdfError> {
        if page >= self.total {
            return Err(PdfError::PageOutOfRange {
                page,
                page_count: self.total,
            });
        }
        // Last file whose first page is <= page; skips empty files sharing a start
        let file_index = self.starts.partition_point(|&start| start <= page) - 1;
        Ok((file_index, page - self.starts[file_index]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_map_has_no_pages() {
        let map = PageMap::new(Vec::new());
        assert_eq!(map.total(), 0);
        assert_eq!(
            map.locate(0),
            Err(PdfError::PageOutOfRange {
                page: 0,
                page_count: 0
            })
        );
    }

    #[test]
    fn locate_across_files() {
        let map = PageMap::new(vec![3, 1, 2]);
        assert_eq!(map.total(), 6);
        assert_eq!(map.locate(0), Ok((0, 0)));
        assert_eq!(map.locate(2), Ok((0, 2)));
        assert_eq!(map.locate(3), Ok((1, 0)));
        assert_eq!(map.locate(4), Ok((2, 0)));
        assert_eq!(map.locate(5), Ok((2, 1)));
        assert!(map.locate(6).is_err());
    }

    #[test]
    fn empty_files_are_skipped() {
        let map = PageMap::new(vec![0, 2, 0, 0, 1]);
        assert_eq!(map.locate(0), Ok((1, 0)));
        assert_eq!(map.locate(1), Ok((1, 1)));
        assert_eq!(map.locate(2), Ok((4, 0)));
    }

    #[test]
    fn first_page_offsets() {
        let map = PageMap::new(vec![3, 1, 2]);
        assert_eq!(map.first_page(0), 0);
        assert_eq!(map.first_page(1), 3);
        assert_eq!(map.first_page(2), 4);
        assert_eq!(map.first_page(9), 6);
        assert_eq!(map.counts(), &[3, 1, 2]);
    }

    #[test]
    fn every_page_maps_back_to_itself() {
        let map = PageMap::new(vec![2, 5, 0, 3]);
        for page in 0..map.total() {
            let (file, local) = map.locate(page).unwrap();
            assert!(local < map.counts()[file]);
            assert_eq!(map.first_page(file) + local, page);
        }
    }
}
