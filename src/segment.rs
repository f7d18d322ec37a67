//! Seven-segment glyph encoding.
//!
//! Each digit unit is a chain of seven LEDs, one per segment. The chain order is fixed
//! by the wiring of the clock face and is shared by digits and letters:
//!
//! ```text
//!     --4--          A
//!    |     |       F   B
//!    5     3         G
//!    |     |       E   C
//!     --0--          D
//!    |     |
//!    6     2
//!    |     |
//!     --1--
//! ```
//!
//! The period lights the bottom bar (D, chain position 1), not chain position 3. In
//! this wiring position 3 is the upper-right bar B, which would put the dot at the top
//! of the digit.
//!
//! [`encode`] is total: characters without a glyph render blank instead of failing, so
//! bad text can never stop the clock from drawing.

/// Number of LEDs in one digit unit.
pub const SEGMENT_COUNT: usize = 7;

/// A single segment, valued by its position in the LED chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Segment {
    /// Middle bar.
    G = 0,
    /// Bottom bar.
    D = 1,
    /// Lower right.
    C = 2,
    /// Upper right.
    B = 3,
    /// Top bar.
    A = 4,
    /// Upper left.
    F = 5,
    /// Lower left.
    E = 6,
}

impl Segment {
    /// All segments in chain order.
    pub const ALL: [Segment; SEGMENT_COUNT] = [
        Segment::G,
        Segment::D,
        Segment::C,
        Segment::B,
        Segment::A,
        Segment::F,
        Segment::E,
    ];

    /// Position of this segment in the LED chain.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Which segments of a digit unit are lit, one bit per chain position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentMask(u8);

impl SegmentMask {
    /// All segments off.
    pub const BLANK: SegmentMask = SegmentMask(0);

    const fn of(segments: &[Segment]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < segments.len() {
            bits |= segments[i].bit();
            i += 1;
        }
        SegmentMask(bits)
    }

    /// Mask from raw bits; bits past the end of the chain are dropped.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        SegmentMask(bits & 0x7f)
    }

    /// Raw bits, bit `n` set when chain position `n` is lit.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if the segment is lit.
    #[inline]
    pub const fn is_lit(self, segment: Segment) -> bool {
        self.0 & segment.bit() != 0
    }

    /// Returns true if the LED at chain position `index` is lit.
    #[inline]
    pub const fn is_lit_at(self, index: usize) -> bool {
        index < SEGMENT_COUNT && self.0 & (1 << index) != 0
    }

    /// Number of lit segments.
    #[inline]
    pub const fn lit_count(self) -> u32 {
        self.0.count_ones()
    }

    /// Per-LED on/off pattern in chain order.
    pub fn to_array(self) -> [bool; SEGMENT_COUNT] {
        core::array::from_fn(|i| self.is_lit_at(i))
    }
}

use Segment::{A, B, C, D, E, F, G};

const DIGITS: [SegmentMask; 10] = [
    SegmentMask::of(&[A, B, C, D, E, F]),    // 0
    SegmentMask::of(&[B, C]),                // 1
    SegmentMask::of(&[A, B, D, E, G]),       // 2
    SegmentMask::of(&[A, B, C, D, G]),       // 3
    SegmentMask::of(&[B, C, F, G]),          // 4
    SegmentMask::of(&[A, C, D, F, G]),       // 5
    SegmentMask::of(&[A, C, D, E, F, G]),    // 6
    SegmentMask::of(&[A, B, C]),             // 7
    SegmentMask::of(&[A, B, C, D, E, F, G]), // 8
    SegmentMask::of(&[A, B, C, D, F, G]),    // 9
];

/// Every non-blank, non-digit symbol with a glyph, in canonical case.
///
/// Letters whose only rendering would duplicate a digit (S, Z, O as a closed ring, ...)
/// are left out so that a glyph always identifies its character.
pub const SYMBOLS: &[char] = &[
    '.', '-', 'A', 'b', 'C', 'c', 'd', 'E', 'F', 'G', 'H', 'h', 'I', 'J', 'L', 'n', 'o', 'P',
    'r', 't', 'U', 'u', 'y',
];

/// Encodes a single decimal digit. Values above 9 encode blank.
#[inline]
pub const fn encode_digit(digit: u8) -> SegmentMask {
    if digit < 10 {
        DIGITS[digit as usize]
    } else {
        SegmentMask::BLANK
    }
}

/// Encodes a character. Unsupported characters encode blank.
pub const fn encode(symbol: char) -> SegmentMask {
    match symbol {
        '0'..='9' => encode_digit(symbol as u8 - b'0'),
        '.' => SegmentMask::of(&[D]),
        '-' => SegmentMask::of(&[G]),
        'A' | 'a' => SegmentMask::of(&[A, B, C, E, F, G]),
        'b' | 'B' => SegmentMask::of(&[C, D, E, F, G]),
        'C' => SegmentMask::of(&[A, D, E, F]),
        'c' => SegmentMask::of(&[D, E, G]),
        'd' | 'D' => SegmentMask::of(&[B, C, D, E, G]),
        'E' | 'e' => SegmentMask::of(&[A, D, E, F, G]),
        'F' | 'f' => SegmentMask::of(&[A, E, F, G]),
        'G' => SegmentMask::of(&[A, C, D, E, F]),
        'H' => SegmentMask::of(&[B, C, E, F, G]),
        'h' => SegmentMask::of(&[C, E, F, G]),
        'I' | 'i' => SegmentMask::of(&[E, F]),
        'J' | 'j' => SegmentMask::of(&[B, C, D, E]),
        'L' | 'l' => SegmentMask::of(&[D, E, F]),
        'n' | 'N' => SegmentMask::of(&[C, E, G]),
        'o' | 'O' => SegmentMask::of(&[C, D, E, G]),
        'P' | 'p' => SegmentMask::of(&[A, B, E, F, G]),
        'r' | 'R' => SegmentMask::of(&[E, G]),
        't' | 'T' => SegmentMask::of(&[D, E, F, G]),
        'U' => SegmentMask::of(&[B, C, D, E, F]),
        'u' => SegmentMask::of(&[C, D, E]),
        'y' | 'Y' => SegmentMask::of(&[B, C, D, F, G]),
        _ => SegmentMask::BLANK,
    }
}
