//! Target hardware descriptor.

use bon::bon;

/// Capacities of the target the tiles are sized for.
///
/// All sizes are in bytes. The descriptor is read-only for the duration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hardware {
    /// Vector-compute buffer capacity.
    pub mem_vc_size: usize,
    /// Alignment unit of the vector-compute buffer.
    pub mem_vc_align: usize,
    pub num_core: usize,
    /// Vector blocks processed per instruction.
    pub vblocknum: usize,
    /// Bytes per vector block.
    pub vblocksize: usize,
}

impl Default for Hardware {
    fn default() -> Self {
        Self::npu()
    }
}

#[bon]
impl Hardware {
    /// Create a hardware descriptor with builder pattern.
    ///
    /// Unset fields take the [`Hardware::npu`] values.
    #[builder]
    pub fn builder(
        #[builder(default = 192 * 1024)] mem_vc_size: usize,
        #[builder(default = 32)] mem_vc_align: usize,
        #[builder(default = 32)] num_core: usize,
        #[builder(default = 8)] vblocknum: usize,
        #[builder(default = 32)] vblocksize: usize,
    ) -> Self {
        Self { mem_vc_size, mem_vc_align, num_core, vblocknum, vblocksize }
    }
}

impl Hardware {
    /// Host CPU preset: 256 KiB L2-sized buffer, 64-byte cache lines, AVX2-wide
    /// blocks, one core per available hardware thread.
    pub fn cpu() -> Self {
        Self {
            mem_vc_size: 256 * 1024,
            mem_vc_align: 64,
            num_core: std::thread::available_parallelism().map(|p| p.get()).unwrap_or(8),
            vblocknum: 1,
            vblocksize: 32,
        }
    }

    /// Vector accelerator preset with a 192 KiB unified buffer and 32 AI cores.
    pub const fn npu() -> Self {
        Self { mem_vc_size: 192 * 1024, mem_vc_align: 32, num_core: 32, vblocknum: 8, vblocksize: 32 }
    }

    /// Bytes consumed by one full vector instruction.
    pub const fn vector_width_bytes(&self) -> usize {
        self.vblocknum * self.vblocksize
    }

    /// Elements of a `data_coef`-byte type covered by one vector instruction, at least 1.
    pub fn vec_granularity(&self, data_coef: usize) -> usize {
        self.vector_width_bytes().checked_div(data_coef).unwrap_or(0).max(1)
    }
}
