/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Block offsets of the LIZ sites inside the KKR matrix

use super::errors::{KkrError, Result};
use crate::angular::channel_count;
use crate::liz::LocalInteractionZone;
use serde::Serialize;

/// How site blocks are placed along each matrix axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockLayout {
    /// Every site has the global cutoff, site `i` starts at `i * block_size`
    Identical { block_size: usize },
    /// Sites have their own cutoff, offsets are a running sum of block sizes
    Variable,
}

impl BlockLayout {
    /// Choose the layout for a LIZ.
    ///
    /// The identical layout needs the first site at `max_lmax` and every other
    /// site at the first site's cutoff. Anything else falls back to the
    /// variable layout, which handles uniform cutoffs too.
    pub fn select(liz: &LocalInteractionZone, max_lmax: usize, spin_cant: usize) -> Self {
        let first = liz.sites()[0].lmax;
        if first != max_lmax {
            log::info!(
                "first LIZ site has lmax {} but the configured maximum is {}, using variable block layout",
                first,
                max_lmax
            );
            return BlockLayout::Variable;
        }

        match liz.first_lmax_mismatch(first) {
            None => BlockLayout::Identical {
                block_size: spin_cant * channel_count(max_lmax),
            },
            Some((site, lmax)) => {
                log::debug!(
                    "site {} has lmax {} (first site {}), using variable block layout",
                    site,
                    lmax,
                    first
                );
                BlockLayout::Variable
            }
        }
    }

    /// Order of site `site`'s block
    pub fn block_size(&self, liz: &LocalInteractionZone, spin_cant: usize, site: usize) -> usize {
        match *self {
            BlockLayout::Identical { block_size } => block_size,
            BlockLayout::Variable => spin_cant * liz.sites()[site].kkr_size(),
        }
    }

    /// Write the start offset of every site into `offsets` and return the
    /// matrix dimension
    pub fn offsets_into(
        &self,
        liz: &LocalInteractionZone,
        spin_cant: usize,
        offsets: &mut Vec<usize>,
    ) -> usize {
        offsets.clear();
        match *self {
            BlockLayout::Identical { block_size } => {
                offsets.extend((0..liz.len()).map(|site| site * block_size));
                liz.len() * block_size
            }
            BlockLayout::Variable => {
                let mut offset = 0;
                for site in liz.sites() {
                    offsets.push(offset);
                    offset += spin_cant * channel_count(site.lmax);
                }
                offset
            }
        }
    }

    /// Start offset of every site
    pub fn offsets(&self, liz: &LocalInteractionZone, spin_cant: usize) -> Vec<usize> {
        let mut offsets = Vec::with_capacity(liz.len());
        self.offsets_into(liz, spin_cant, &mut offsets);
        offsets
    }
}

/// Order of the KKR matrix, the sum of all site block sizes
pub fn matrix_dimension(liz: &LocalInteractionZone, spin_cant: usize) -> usize {
    spin_cant * liz.total_kkr_size()
}

/// Row band heights read off `offsets`.
///
/// The offsets must be the running sums of `block_sizes` and the blocks must
/// tile exactly `dimension` rows.
pub(crate) fn band_heights(
    offsets: &[usize],
    block_sizes: &[usize],
    dimension: usize,
) -> Result<Vec<usize>> {
    if offsets.len() != block_sizes.len() {
        return Err(KkrError::DimensionMismatch(format!(
            "{} block offsets for {} sites",
            offsets.len(),
            block_sizes.len()
        )));
    }

    let mut expected = 0;
    for (site, (&offset, &size)) in offsets.iter().zip(block_sizes).enumerate() {
        if offset != expected {
            return Err(KkrError::DimensionMismatch(format!(
                "site {} block starts at {}, preceding blocks end at {}",
                site, offset, expected
            )));
        }
        expected += size;
    }
    if expected != dimension {
        return Err(KkrError::DimensionMismatch(format!(
            "site blocks span {} rows, matrix has {}",
            expected, dimension
        )));
    }

    let heights = offsets
        .iter()
        .zip(offsets.iter().skip(1).chain(std::iter::once(&dimension)))
        .map(|(&start, &end)| end - start)
        .collect();
    Ok(heights)
}
