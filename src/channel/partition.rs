use std::{cell::RefCell, rc::Rc};

use super::{SharedChannel, VirtualSubchannel};
use crate::{Error, Result};

/// Partition of a parent channel into numbered subchannels.
///
/// Subchannels are built on first access and cached by id until the
/// partition is replaced. Index lists may overlap; nothing here enforces
/// disjointness.
pub struct SubchannelMap {
    parent: SharedChannel,
    partition: Vec<Vec<usize>>,
    cache: Vec<Option<Rc<RefCell<VirtualSubchannel>>>>,
}

impl SubchannelMap {
    pub fn new(parent: SharedChannel, partition: Vec<Vec<usize>>) -> Self {
        let cache = vec![None; partition.len()];
        Self {
            parent,
            partition,
            cache,
        }
    }

    /// Split the parent into `zones` contiguous runs of equal length.
    ///
    /// The last zone absorbs the remainder.
    pub fn split_into_zones(parent: SharedChannel, zones: usize) -> Self {
        let total = parent.borrow().pixel_count();
        let partition = if zones == 0 {
            Vec::new()
        } else {
            let per_zone = total / zones;
            (0..zones)
                .map(|zone| {
                    let start = zone * per_zone;
                    let end = if zone + 1 == zones {
                        total
                    } else {
                        start + per_zone
                    };
                    (start..end).collect()
                })
                .collect()
        };
        Self::new(parent, partition)
    }

    /// Build subchannels from inclusive `(start, end)` ranges
    pub fn from_ranges(parent: SharedChannel, ranges: &[(usize, usize)]) -> Self {
        let partition = ranges
            .iter()
            .map(|&(start, end)| (start..=end).collect())
            .collect();
        Self::new(parent, partition)
    }

    pub fn parent(&self) -> &SharedChannel {
        &self.parent
    }

    /// Subchannel `id`, built and cached on first use
    pub fn subchannel(&mut self, id: usize) -> Result<Rc<RefCell<VirtualSubchannel>>> {
        let count = self.partition.len();
        let Some(indices) = self.partition.get(id) else {
            return Err(Error::SubchannelNotDefined { id, count });
        };

        if let Some(cached) = &self.cache[id] {
            return Ok(Rc::clone(cached));
        }

        let subchannel = Rc::new(RefCell::new(VirtualSubchannel::new(
            Rc::clone(&self.parent),
            indices.clone(),
        )?));
        self.cache[id] = Some(Rc::clone(&subchannel));
        Ok(subchannel)
    }

    /// All subchannels in id order
    pub fn subchannels(&mut self) -> Result<Vec<Rc<RefCell<VirtualSubchannel>>>> {
        (0..self.partition.len())
            .map(|id| self.subchannel(id))
            .collect()
    }

    pub fn subchannel_count(&self) -> usize {
        self.partition.len()
    }

    pub fn subchannel_map(&self) -> &[Vec<usize>] {
        &self.partition
    }

    /// Replace the partition and drop every cached subchannel
    pub fn set_subchannel_map(&mut self, partition: Vec<Vec<usize>>) {
        self.cache = vec![None; partition.len()];
        self.partition = partition;
    }
}
