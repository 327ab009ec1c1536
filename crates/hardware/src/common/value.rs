//! Fixed-width bit values.
//!
//! Every datum that moves between stages is one of four widths. The types here provide:
//! 1. **Dual Views:** The same bits read as signed or unsigned integers.
//! 2. **Wrapping Arithmetic:** Addition and subtraction modulo 2^n.
//! 3. **Extension:** Sign and zero extension of narrow values to a [`Word`].
//! 4. **Formatting:** Decimal (signed) and fixed-width hexadecimal rendering.

use std::fmt;

macro_rules! bit_value {
    ($(#[$meta:meta])* $name:ident, $unsigned:ty, $signed:ty) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name(pub $unsigned);

        impl $name {
            /// Width of the value in bits.
            pub const BITS: u32 = <$unsigned>::BITS;

            /// Wraps raw unsigned bits.
            pub const fn new(bits: $unsigned) -> Self {
                Self(bits)
            }

            /// Wraps the two's-complement bits of a signed value.
            pub const fn from_signed(value: $signed) -> Self {
                Self(value as $unsigned)
            }

            /// The bits read as an unsigned integer.
            pub const fn unsigned(self) -> $unsigned {
                self.0
            }

            /// The bits read as a two's-complement signed integer.
            pub const fn signed(self) -> $signed {
                self.0 as $signed
            }

            /// Addition modulo 2^n.
            #[must_use]
            pub const fn wrapping_add(self, rhs: Self) -> Self {
                Self(self.0.wrapping_add(rhs.0))
            }

            /// Subtraction modulo 2^n.
            #[must_use]
            pub const fn wrapping_sub(self, rhs: Self) -> Self {
                Self(self.0.wrapping_sub(rhs.0))
            }

            /// Unsigned less-than over the full width.
            pub const fn lt_unsigned(self, rhs: Self) -> bool {
                self.0 < rhs.0
            }

            /// Signed less-than.
            pub const fn lt_signed(self, rhs: Self) -> bool {
                self.signed() < rhs.signed()
            }

            /// Zero-padded hexadecimal rendering, e.g. `0x0000002a`.
            pub fn to_hex_string(self) -> String {
                format!("{:#0width$x}", self.0, width = (Self::BITS / 4 + 2) as usize)
            }
        }

        impl From<$unsigned> for $name {
            fn from(bits: $unsigned) -> Self {
                Self(bits)
            }
        }

        impl From<$name> for $unsigned {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.signed())
            }
        }

        impl fmt::LowerHex for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::LowerHex::fmt(&self.0, f)
            }
        }

        impl fmt::UpperHex for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::UpperHex::fmt(&self.0, f)
            }
        }
    };
}

bit_value!(
    /// An 8-bit value.
    Byte, u8, i8
);
bit_value!(
    /// A 16-bit value.
    HalfWord, u16, i16
);
bit_value!(
    /// A 32-bit value, the register width.
    Word, u32, i32
);
bit_value!(
    /// A 64-bit value, produced by full-width multiplication.
    DoubleWord, u64, i64
);

impl Byte {
    /// Sign-extends to a word.
    pub const fn sign_extend(self) -> Word {
        Word(self.signed() as i32 as u32)
    }

    /// Zero-extends to a word.
    pub const fn zero_extend(self) -> Word {
        Word(self.0 as u32)
    }
}

impl HalfWord {
    /// Sign-extends to a word.
    pub const fn sign_extend(self) -> Word {
        Word(self.signed() as i32 as u32)
    }

    /// Zero-extends to a word.
    pub const fn zero_extend(self) -> Word {
        Word(self.0 as u32)
    }
}

impl Word {
    /// The low byte.
    pub const fn low_byte(self) -> Byte {
        Byte(self.0 as u8)
    }

    /// The low half-word.
    pub const fn low_half(self) -> HalfWord {
        HalfWord(self.0 as u16)
    }
}

impl DoubleWord {
    /// Upper 32 bits.
    pub const fn hi(self) -> Word {
        Word((self.0 >> 32) as u32)
    }

    /// Lower 32 bits.
    pub const fn lo(self) -> Word {
        Word(self.0 as u32)
    }

    /// Reassembles a double word from its halves.
    pub const fn from_halves(hi: Word, lo: Word) -> Self {
        Self(((hi.0 as u64) << 32) | lo.0 as u64)
    }
}
