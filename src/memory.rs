use crate::constants::{FONT_ADDRESS, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::{FaultKind, LoadError};
use crate::opcode::Opcode;

/// Addresses are 12 bits wide
const ADDRESS_MASK: u16 = 0x0FFF;

/// # Memory
/// 4096 bytes of flat, byte addressable memory.
///
/// ```text
/// 0x000-0x04F  hex font
/// 0x050-0x1FF  reserved
/// 0x200-0xFFF  program and data
/// ```
/// Neither program loads nor instruction stores reach the reserved region, so
/// the font survives anything a program does.
pub struct Memory {
    bytes: Box<[u8; MEMORY_SIZE]>,
}

impl Memory {
    /// Zeroed memory with the font burned in
    pub fn new() -> Self {
        let mut bytes = Box::new([0; MEMORY_SIZE]);
        let font = FONT_ADDRESS as usize;
        bytes[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    pub fn capacity(&self) -> usize {
        MEMORY_SIZE
    }

    pub fn read(&self, address: u16) -> u8 {
        self.bytes[(address & ADDRESS_MASK) as usize]
    }

    pub fn write(&mut self, address: u16, value: u8) {
        self.bytes[(address & ADDRESS_MASK) as usize] = value;
    }

    /// Reads the big-endian word at `address`
    pub fn read_word(&self, address: u16) -> u16 {
        Opcode::from_bytes(self.read(address), self.read(address.wrapping_add(1))).0
    }

    /// Copy a program into memory starting at `offset`.
    ///
    /// The whole program is checked before anything is copied.
    pub fn load_program(&mut self, offset: u16, program: &[u8]) -> Result<(), LoadError> {
        let start = offset as usize;
        if offset < PROGRAM_START || start >= MEMORY_SIZE {
            return Err(LoadError::InvalidOffset { offset });
        }
        let capacity = self.capacity() - start;
        if program.len() > capacity {
            return Err(LoadError::ProgramTooLarge {
                size: program.len(),
                capacity,
            });
        }
        self.bytes[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    /// The `len` bytes starting at `address`, which must all lie within memory
    pub fn slice(&self, address: u16, len: usize) -> Result<&[u8], FaultKind> {
        let start = Self::check(address, len)?;
        Ok(&self.bytes[start..start + len])
    }

    /// Mutable version of `slice`, limited to the program region
    pub fn slice_mut(&mut self, address: u16, len: usize) -> Result<&mut [u8], FaultKind> {
        if address < PROGRAM_START {
            return Err(FaultKind::ReservedWrite {
                address: address as usize,
            });
        }
        let start = Self::check(address, len)?;
        Ok(&mut self.bytes[start..start + len])
    }

    fn check(address: u16, len: usize) -> Result<usize, FaultKind> {
        let start = address as usize;
        if start + len > MEMORY_SIZE {
            Err(FaultKind::OutOfBounds {
                address: start,
                len,
            })
        } else {
            Ok(start)
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_zeroed_after_font() {
        let m = Memory::new();
        assert!(m.bytes[SPRITE_SHEET.len()..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_font_glyph_zero() {
        let m = Memory::new();
        assert_eq!(m.slice(0, 5), Ok(&[0xF0, 0x90, 0x90, 0x90, 0xF0][..]));
    }

    #[test]
    fn test_read_word_is_big_endian() {
        let mut m = Memory::new();
        m.write(0x300, 0xAA);
        m.write(0x301, 0xBB);
        assert_eq!(m.read_word(0x300), 0xAABB);
    }

    #[test]
    fn test_read_write_wrap_to_12_bits() {
        let mut m = Memory::new();
        m.write(0x1234, 0x42);
        assert_eq!(m.read(0x234), 0x42);
    }

    #[test]
    fn test_program_load_ok() {
        let mut m = Memory::new();
        m.load_program(PROGRAM_START, &[0x00, 0xE0]).unwrap();
        assert_eq!(m.slice(0x200, 2), Ok(&[0x00, 0xE0][..]));
    }

    #[test]
    fn test_program_exactly_fills_memory() {
        let mut m = Memory::new();
        let program = vec![0xAB; MEMORY_SIZE - 0x200];
        m.load_program(PROGRAM_START, &program).unwrap();
        assert_eq!(m.read(0xFFF), 0xAB);
    }

    #[test]
    fn test_program_one_byte_too_large() {
        let mut m = Memory::new();
        let program = vec![0xAB; MEMORY_SIZE - 0x200 + 1];
        match m.load_program(PROGRAM_START, &program) {
            Err(LoadError::ProgramTooLarge { size, capacity }) => {
                assert_eq!(size, 3585);
                assert_eq!(capacity, 3584);
            }
            other => panic!("expected ProgramTooLarge, got {:?}", other),
        }
        // nothing was copied
        assert_eq!(m.read(0x200), 0);
    }

    #[test]
    fn test_program_load_at_custom_offset() {
        let mut m = Memory::new();
        m.load_program(0x600, &[1, 2, 3]).unwrap();
        assert_eq!(m.slice(0x600, 3), Ok(&[1, 2, 3][..]));
        let too_big = vec![0; MEMORY_SIZE - 0x600 + 1];
        assert!(m.load_program(0x600, &too_big).is_err());
    }

    #[test]
    fn test_program_cannot_overwrite_font() {
        let mut m = Memory::new();
        assert!(matches!(
            m.load_program(0x000, &[0xFF]),
            Err(LoadError::InvalidOffset { offset: 0 })
        ));
        assert!(matches!(
            m.load_program(0x1000, &[]),
            Err(LoadError::InvalidOffset { offset: 0x1000 })
        ));
        assert_eq!(m.read(0), 0xF0);
    }

    #[test]
    fn test_slice_past_end_faults() {
        let mut m = Memory::new();
        assert_eq!(
            m.slice_mut(0xFFE, 3).map(|s| s.len()),
            Err(FaultKind::OutOfBounds {
                address: 0xFFE,
                len: 3
            })
        );
        assert_eq!(m.slice(0xFFD, 3).map(|s| s.len()), Ok(3));
    }

    #[test]
    fn test_slice_mut_below_program_region_faults() {
        let mut m = Memory::new();
        assert_eq!(
            m.slice_mut(0x1FF, 1).map(|s| s.len()),
            Err(FaultKind::ReservedWrite { address: 0x1FF })
        );
        assert_eq!(m.slice_mut(PROGRAM_START, 1).map(|s| s.len()), Ok(1));
        // reads of the font stay allowed
        assert_eq!(m.slice(0, 1), Ok(&[0xF0][..]));
    }
}
