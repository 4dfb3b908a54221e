/// Trait for GOST 28147-89 S-boxes.
pub trait Sbox {
    /// S-box name.
    const NAME: &'static str;

    /// S-box rows; row `i` substitutes nibble `i` of the word, counted from
    /// the least significant nibble.
    const SBOX: [[u8; 16]; 8];

    /// Round function: add the round key, substitute, rotate left by 11.
    #[inline]
    fn g(a: u32, k: u32) -> u32 {
        let x = a.wrapping_add(k);
        let mut y = 0u32;
        for (i, row) in Self::SBOX.iter().enumerate() {
            let nibble = (x >> (4 * i)) & 0xf;
            y |= u32::from(row[nibble as usize]) << (4 * i);
        }
        y.rotate_left(11)
    }
}

/// S-box defined in GOST R 34.12-2015.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tc26 {}

impl Sbox for Tc26 {
    const NAME: &'static str = "Tc26";
    const SBOX: [[u8; 16]; 8] = [
        [12, 4, 6, 2, 10, 5, 11, 9, 14, 8, 13, 7, 0, 3, 15, 1],
        [6, 8, 2, 3, 9, 10, 5, 12, 1, 14, 4, 7, 11, 13, 0, 15],
        [11, 3, 5, 8, 2, 15, 10, 13, 14, 1, 7, 4, 12, 9, 6, 0],
        [12, 8, 2, 1, 13, 4, 15, 6, 7, 0, 10, 5, 3, 14, 9, 11],
        [7, 15, 5, 10, 8, 1, 6, 13, 0, 9, 3, 14, 11, 4, 2, 12],
        [5, 13, 15, 6, 9, 2, 12, 10, 11, 7, 8, 1, 4, 3, 14, 0],
        [8, 14, 2, 5, 6, 9, 1, 12, 15, 4, 11, 0, 13, 10, 3, 7],
        [1, 7, 14, 13, 0, 5, 8, 3, 4, 15, 10, 6, 9, 12, 11, 2],
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_permutations() {
        for row in Tc26::SBOX.iter() {
            let mut seen = [false; 16];
            row.iter().for_each(|&v| seen[v as usize] = true);
            assert!(seen.iter().all(|&s| s));
        }
    }

    // GOST R 34.12-2015 A.2.2: g[87654321](fedcba98) = fdcbc20c
    #[test]
    fn g_vector() {
        assert_eq!(Tc26::g(0xfedc_ba98, 0x8765_4321), 0xfdcb_c20c);
    }
}
