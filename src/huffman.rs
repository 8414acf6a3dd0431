//! Standard JPEG Huffman table specs and canonical code construction.
//!
//! RFC 2435 strips the DHT segments from the wire, so receivers regenerate
//! them from the fixed tables of the JPEG standard, section K.3. The four
//! specs here are only valid for 8-bit sample precision. The canonical code
//! builder reproduces the assignment a baseline decoder performs from the
//! (bits, values) representation, including one real-world accommodation for
//! malformed encoder tables (see [`build_canonical_codes`]).

/// One fixed (bits, values) Huffman table pair.
///
/// `bits` is 1-based: `bits[n]` is the number of codes of length `n`, and
/// `bits[0]` is unused padding kept for direct indexing by code length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuffmanSpec {
    /// Table class: 0 for DC, 1 for AC.
    pub class: u8,
    /// Table destination id: 0 for luminance, 1 for chrominance.
    pub id: u8,
    /// Count of codes per code length 1..=16.
    pub bits: [u8; 17],
    /// Symbol values in code order.
    pub values: &'static [u8],
}

impl HuffmanSpec {
    /// Total number of symbols, i.e. the sum of `bits[1..=16]`.
    pub fn symbol_count(&self) -> usize {
        self.bits[1..].iter().map(|&n| usize::from(n)).sum()
    }
}

const VALUES_DC: [u8; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

const VALUES_AC_LUMINANCE: [u8; 162] = [
    0x01, 0x02, 0x03, 0x00, 0x04, 0x11, 0x05, 0x12, 0x21, 0x31, 0x41, 0x06, 0x13, 0x51, 0x61,
    0x07, 0x22, 0x71, 0x14, 0x32, 0x81, 0x91, 0xa1, 0x08, 0x23, 0x42, 0xb1, 0xc1, 0x15, 0x52,
    0xd1, 0xf0, 0x24, 0x33, 0x62, 0x72, 0x82, 0x09, 0x0a, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x25,
    0x26, 0x27, 0x28, 0x29, 0x2a, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3a, 0x43, 0x44, 0x45,
    0x46, 0x47, 0x48, 0x49, 0x4a, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5a, 0x63, 0x64,
    0x65, 0x66, 0x67, 0x68, 0x69, 0x6a, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7a, 0x83,
    0x84, 0x85, 0x86, 0x87, 0x88, 0x89, 0x8a, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97, 0x98, 0x99,
    0x9a, 0xa2, 0xa3, 0xa4, 0xa5, 0xa6, 0xa7, 0xa8, 0xa9, 0xaa, 0xb2, 0xb3, 0xb4, 0xb5, 0xb6,
    0xb7, 0xb8, 0xb9, 0xba, 0xc2, 0xc3, 0xc4, 0xc5, 0xc6, 0xc7, 0xc8, 0xc9, 0xca, 0xd2, 0xd3,
    0xd4, 0xd5, 0xd6, 0xd7, 0xd8, 0xd9, 0xda, 0xe1, 0xe2, 0xe3, 0xe4, 0xe5, 0xe6, 0xe7, 0xe8,
    0xe9, 0xea, 0xf1, 0xf2, 0xf3, 0xf4, 0xf5, 0xf6, 0xf7, 0xf8, 0xf9, 0xfa,
];

const VALUES_AC_CHROMINANCE: [u8; 162] = [
    0x00, 0x01, 0x02, 0x03, 0x11, 0x04, 0x05, 0x21, 0x31, 0x06, 0x12, 0x41, 0x51, 0x07, 0x61,
    0x71, 0x13, 0x22, 0x32, 0x81, 0x08, 0x14, 0x42, 0x91, 0xa1, 0xb1, 0xc1, 0x09, 0x23, 0x33,
    0x52, 0xf0, 0x15, 0x62, 0x72, 0xd1, 0x0a, 0x16, 0x24, 0x34, 0xe1, 0x25, 0xf1, 0x17, 0x18,
    0x19, 0x1a, 0x26, 0x27, 0x28, 0x29, 0x2a, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3a, 0x43, 0x44,
    0x45, 0x46, 0x47, 0x48, 0x49, 0x4a, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5a, 0x63,
    0x64, 0x65, 0x66, 0x67, 0x68, 0x69, 0x6a, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7a,
    0x82, 0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x89, 0x8a, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97,
    0x98, 0x99, 0x9a, 0xa2, 0xa3, 0xa4, 0xa5, 0xa6, 0xa7, 0xa8, 0xa9, 0xaa, 0xb2, 0xb3, 0xb4,
    0xb5, 0xb6, 0xb7, 0xb8, 0xb9, 0xba, 0xc2, 0xc3, 0xc4, 0xc5, 0xc6, 0xc7, 0xc8, 0xc9, 0xca,
    0xd2, 0xd3, 0xd4, 0xd5, 0xd6, 0xd7, 0xd8, 0xd9, 0xda, 0xe2, 0xe3, 0xe4, 0xe5, 0xe6, 0xe7,
    0xe8, 0xe9, 0xea, 0xf2, 0xf3, 0xf4, 0xf5, 0xf6, 0xf7, 0xf8, 0xf9, 0xfa,
];

/// DC luminance table (class 0, id 0).
pub const DC_LUMINANCE: HuffmanSpec = HuffmanSpec {
    class: 0,
    id: 0,
    bits: [0, 0, 1, 5, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0],
    values: &VALUES_DC,
};

/// DC chrominance table (class 0, id 1).
pub const DC_CHROMINANCE: HuffmanSpec = HuffmanSpec {
    class: 0,
    id: 1,
    bits: [0, 0, 3, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0],
    values: &VALUES_DC,
};

/// AC luminance table (class 1, id 0).
pub const AC_LUMINANCE: HuffmanSpec = HuffmanSpec {
    class: 1,
    id: 0,
    bits: [0, 0, 2, 1, 3, 3, 2, 4, 3, 5, 5, 4, 4, 0, 0, 1, 0x7d],
    values: &VALUES_AC_LUMINANCE,
};

/// AC chrominance table (class 1, id 1).
pub const AC_CHROMINANCE: HuffmanSpec = HuffmanSpec {
    class: 1,
    id: 1,
    bits: [0, 0, 2, 1, 2, 4, 4, 3, 4, 7, 5, 4, 4, 0, 1, 2, 0x77],
    values: &VALUES_AC_CHROMINANCE,
};

/// The four fixed specs in DHT emission order.
pub const STANDARD_SPECS: [&HuffmanSpec; 4] = [
    &DC_LUMINANCE,
    &DC_CHROMINANCE,
    &AC_LUMINANCE,
    &AC_CHROMINANCE,
];

/// A canonical Huffman code assigned to one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuffmanCode {
    /// Code length in bits, 1..=16.
    pub length: u8,
    /// Code value, left-aligned within `length` bits.
    pub code: u16,
}

/// Builds the canonical code for every symbol of a (bits, values) table.
///
/// Standard assignment: iterate code length from 1 to 16, handing out
/// sequential code values to the `bits[length]` symbols of that length, then
/// left-shifting the running code when moving to the next length.
///
/// Some badly encoded streams map two different codes to symbol 0 (observed
/// in embedded JPEGs from real camera firmware). Only the first assignment to
/// symbol 0 is kept; later duplicates are ignored but still consume their
/// code slot, so the remaining symbols keep the code values a compliant
/// decoder would give them.
///
/// Returns a 256-entry table indexed by symbol value; symbols absent from
/// `values` are `None`.
///
/// # Panics
/// Panics if `values` holds fewer symbols than `bits` announces.
pub fn build_canonical_codes(bits: &[u8; 17], values: &[u8]) -> [Option<HuffmanCode>; 256] {
    let announced: usize = bits[1..].iter().map(|&n| usize::from(n)).sum();
    assert!(
        values.len() >= announced,
        "values table holds {} symbols, bits table announces {}",
        values.len(),
        announced
    );

    let mut table = [None; 256];
    let mut next_value = 0usize;
    // Widened accumulator: the trailing shift past length 16 would overflow
    // a u16, but every assigned code still fits one.
    let mut code = 0u32;
    for length in 1..=16u8 {
        for _ in 0..bits[usize::from(length)] {
            let symbol = usize::from(values[next_value]);
            next_value += 1;
            if symbol != 0 || table[0].is_none() {
                table[symbol] = Some(HuffmanCode {
                    length,
                    code: code as u16,
                });
            }
            code += 1;
        }
        code <<= 1;
    }
    table
}
