use std::fmt;
use thiserror::Error;

/// Names the axis of a flat buffer address that failed a bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Channel,
    Atom,
    Dim,
    Flat,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::Channel => "channel",
            Axis::Atom => "atom",
            Axis::Dim => "dim",
            Axis::Flat => "flat",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("Invalid extents ({nout}, {natom}, {ndim}): every extent must be positive")]
    InvalidExtent {
        nout: usize,
        natom: usize,
        ndim: usize,
    },
    #[error("Channel-free addressing needs a single-channel layout, found {nout} channels")]
    MultipleChannels { nout: usize },
    #[error("Index {index} out of range on {axis} axis (extent {extent})")]
    OutOfRange {
        axis: Axis,
        index: isize,
        extent: usize,
    },
}

/// Addressing law shared by every flat buffer exchanged with an inference engine.
///
/// A buffer of `nout * natom * ndim` values is laid out row-major with the channel
/// axis varying slowest, so the value for `(iout, iatom, idim)` lives at
/// `iout * natom * ndim + iatom * ndim + idim`. Negative indices count back from the
/// end of their axis. When there is a single channel the channel axis may be left out
/// entirely (the 2-D form), which is equivalent to addressing channel `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConverter {
    nout: usize,
    natom: usize,
    ndim: usize,
}

impl IndexConverter {
    pub fn new(nout: usize, natom: usize, ndim: usize) -> Result<Self, IndexError> {
        if nout == 0 || natom == 0 || ndim == 0 {
            return Err(IndexError::InvalidExtent { nout, natom, ndim });
        }
        Ok(Self { nout, natom, ndim })
    }

    /// Single-channel converter, the `(natom, ndim)` layout of coordinate buffers.
    pub fn for_atoms(natom: usize, ndim: usize) -> Result<Self, IndexError> {
        Self::new(1, natom, ndim)
    }

    pub fn nout(&self) -> usize {
        self.nout
    }

    pub fn natom(&self) -> usize {
        self.natom
    }

    pub fn ndim(&self) -> usize {
        self.ndim
    }

    pub fn len(&self) -> usize {
        self.nout * self.natom * self.ndim
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat address of `(iatom, idim)` in a channel-free buffer.
    ///
    /// Fails with [`IndexError::MultipleChannels`] unless `nout == 1`.
    pub fn flatten(&self, iatom: isize, idim: isize) -> Result<usize, IndexError> {
        self.require_single_channel()?;
        self.flatten_with_channel(0, iatom, idim)
    }

    pub fn flatten_with_channel(
        &self,
        iout: isize,
        iatom: isize,
        idim: isize,
    ) -> Result<usize, IndexError> {
        let io = wrap(iout, self.nout, Axis::Channel)?;
        let ia = wrap(iatom, self.natom, Axis::Atom)?;
        let id = wrap(idim, self.ndim, Axis::Dim)?;
        Ok(io * (self.natom * self.ndim) + ia * self.ndim + id)
    }

    /// Decomposes a flat address into `(iatom, idim)`. Requires `nout == 1`.
    pub fn unflatten(&self, multi_idx: usize) -> Result<(usize, usize), IndexError> {
        self.require_single_channel()?;
        let (_, iatom, idim) = self.unflatten_with_channel(multi_idx)?;
        Ok((iatom, idim))
    }

    /// Rejects every address at or past `len()`, single-channel layouts included.
    pub fn unflatten_with_channel(
        &self,
        multi_idx: usize,
    ) -> Result<(usize, usize, usize), IndexError> {
        if multi_idx >= self.len() {
            return Err(IndexError::OutOfRange {
                axis: Axis::Flat,
                index: multi_idx as isize,
                extent: self.len(),
            });
        }
        let iout = multi_idx / (self.natom * self.ndim);
        let iatom = (multi_idx / self.ndim) % self.natom;
        let idim = multi_idx % self.ndim;
        Ok((iout, iatom, idim))
    }

    fn require_single_channel(&self) -> Result<(), IndexError> {
        if self.nout != 1 {
            return Err(IndexError::MultipleChannels { nout: self.nout });
        }
        Ok(())
    }
}

fn wrap(index: isize, extent: usize, axis: Axis) -> Result<usize, IndexError> {
    let resolved = if index < 0 {
        extent as isize + index
    } else {
        index
    };
    if resolved < 0 || resolved as usize >= extent {
        return Err(IndexError::OutOfRange {
            axis,
            index,
            extent,
        });
    }
    Ok(resolved as usize)
}
