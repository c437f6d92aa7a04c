//! Volatile 32-bit register access

use core::ptr;

/// Address of one memory-mapped 32-bit register
///
/// # Invariant
///
/// The address is word-aligned, readable and writable, and owned by the
/// peripheral handle that built it. [`Reg::at`] is `unsafe` so that this
/// holds for every value in existence, which is what makes `read`, `write`
/// and `modify` sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Reg(usize);

impl Reg {
    /// # Safety
    ///
    /// `base + offset` must be a word-aligned register (or memory laid out
    /// like one) that stays valid, and is not written by anyone else, for
    /// as long as the returned `Reg` is used.
    pub(crate) const unsafe fn at(base: usize, offset: usize) -> Self {
        Self(base + offset)
    }

    pub(crate) fn read(self) -> u32 {
        // SAFETY: the address satisfies the `Reg` invariant.
        unsafe { ptr::read_volatile(self.0 as *const u32) }
    }

    pub(crate) fn write(self, value: u32) {
        // SAFETY: the address satisfies the `Reg` invariant.
        unsafe { ptr::write_volatile(self.0 as *mut u32, value) }
    }

    pub(crate) fn modify(self, f: impl FnOnce(u32) -> u32) {
        self.write(f(self.read()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_lands_on_offset_word() {
        let mut block = [0u32; 4];
        let base = block.as_mut_ptr() as usize;
        // SAFETY: `block` outlives both handles and is only touched through them.
        let (r1, r3) = unsafe { (Reg::at(base, 4), Reg::at(base, 12)) };

        r1.write(0x0000_00F0);
        r1.modify(|v| v | 0x0F);
        r3.write(0xDEAD_BEEF);

        assert_eq!(r1.read(), 0xFF);
        assert_eq!(r3.read(), 0xDEAD_BEEF);
        assert_eq!(block, [0, 0xFF, 0, 0xDEAD_BEEF]);
    }
}
