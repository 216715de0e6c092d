//! DES reference
//! -------------
//! A plain, byte-oriented DES with a configurable number of rounds, written
//! to be read rather than to be fast. Every permutation is done bit by bit
//! from the FIPS 46-3 tables.
//!
//! • Block   : 8 bytes, split into two 4-byte halves
//! • Subkey  : 6 bytes (48 bits), one per round
//! • Rounds  : 1..=16
//!
//! `crypt` runs the Feistel rounds without IP/FP and without swapping the
//! halves after the last round, so the same function decrypts when given the
//! reversed schedule. `standard_encrypt` adds IP/FP for 16-round FIPS DES.

use thiserror::Error;

pub const BLOCK_BYTES: usize = 8;
pub const SUBKEY_BYTES: usize = 6;
pub const MAX_ROUNDS: usize = 16;

pub type Subkey = [u8; SUBKEY_BYTES];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Encrypt,
    Decrypt,
}

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("expected {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },
    #[error("round count {0} outside 1..=16")]
    Rounds(usize),
}

// Tables, 1-based positions counted from the most significant bit.
const PC1: [u8; 56] = [
    57, 49, 41, 33, 25, 17, 9, 1, 58, 50, 42, 34, 26, 18, 10, 2, 59, 51, 43, 35, 27, 19, 11, 3, 60,
    52, 44, 36, 63, 55, 47, 39, 31, 23, 15, 7, 62, 54, 46, 38, 30, 22, 14, 6, 61, 53, 45, 37, 29,
    21, 13, 5, 28, 20, 12, 4,
];
const PC2: [u8; 48] = [
    14, 17, 11, 24, 1, 5, 3, 28, 15, 6, 21, 10, 23, 19, 12, 4, 26, 8, 16, 7, 27, 20, 13, 2, 41, 52,
    31, 37, 47, 55, 30, 40, 51, 45, 33, 48, 44, 49, 39, 56, 34, 53, 46, 42, 50, 36, 29, 32,
];
const SHIFTS: [usize; 16] = [1, 1, 2, 2, 2, 2, 2, 2, 1, 2, 2, 2, 2, 2, 2, 1];
const E: [u8; 48] = [
    32, 1, 2, 3, 4, 5, 4, 5, 6, 7, 8, 9, 8, 9, 10, 11, 12, 13, 12, 13, 14, 15, 16, 17, 16, 17, 18,
    19, 20, 21, 20, 21, 22, 23, 24, 25, 24, 25, 26, 27, 28, 29, 28, 29, 30, 31, 32, 1,
];
const P: [u8; 32] = [
    16, 7, 20, 21, 29, 12, 28, 17, 1, 15, 23, 26, 5, 18, 31, 10, 2, 8, 24, 14, 32, 27, 3, 9, 19,
    13, 30, 6, 22, 11, 4, 25,
];
const IP: [u8; 64] = [
    58, 50, 42, 34, 26, 18, 10, 2, 60, 52, 44, 36, 28, 20, 12, 4, 62, 54, 46, 38, 30, 22, 14, 6,
    64, 56, 48, 40, 32, 24, 16, 8, 57, 49, 41, 33, 25, 17, 9, 1, 59, 51, 43, 35, 27, 19, 11, 3, 61,
    53, 45, 37, 29, 21, 13, 5, 63, 55, 47, 39, 31, 23, 15, 7,
];
const FP: [u8; 64] = [
    40, 8, 48, 16, 56, 24, 64, 32, 39, 7, 47, 15, 55, 23, 63, 31, 38, 6, 46, 14, 54, 22, 62, 30,
    37, 5, 45, 13, 53, 21, 61, 29, 36, 4, 44, 12, 52, 20, 60, 28, 35, 3, 43, 11, 51, 19, 59, 27,
    34, 2, 42, 10, 50, 18, 58, 26, 33, 1, 41, 9, 49, 17, 57, 25,
];

/// S1..S8, each 4 rows of 16.
const SBOX: [[[u8; 16]; 4]; 8] = [
    [
        [14, 4, 13, 1, 2, 15, 11, 8, 3, 10, 6, 12, 5, 9, 0, 7],
        [0, 15, 7, 4, 14, 2, 13, 1, 10, 6, 12, 11, 9, 5, 3, 8],
        [4, 1, 14, 8, 13, 6, 2, 11, 15, 12, 9, 7, 3, 10, 5, 0],
        [15, 12, 8, 2, 4, 9, 1, 7, 5, 11, 3, 14, 10, 0, 6, 13],
    ],
    [
        [15, 1, 8, 14, 6, 11, 3, 4, 9, 7, 2, 13, 12, 0, 5, 10],
        [3, 13, 4, 7, 15, 2, 8, 14, 12, 0, 1, 10, 6, 9, 11, 5],
        [0, 14, 7, 11, 10, 4, 13, 1, 5, 8, 12, 6, 9, 3, 2, 15],
        [13, 8, 10, 1, 3, 15, 4, 2, 11, 6, 7, 12, 0, 5, 14, 9],
    ],
    [
        [10, 0, 9, 14, 6, 3, 15, 5, 1, 13, 12, 7, 11, 4, 2, 8],
        [13, 7, 0, 9, 3, 4, 6, 10, 2, 8, 5, 14, 12, 11, 15, 1],
        [13, 6, 4, 9, 8, 15, 3, 0, 11, 1, 2, 12, 5, 10, 14, 7],
        [1, 10, 13, 0, 6, 9, 8, 7, 4, 15, 14, 3, 11, 5, 2, 12],
    ],
    [
        [7, 13, 14, 3, 0, 6, 9, 10, 1, 2, 8, 5, 11, 12, 4, 15],
        [13, 8, 11, 5, 6, 15, 0, 3, 4, 7, 2, 12, 1, 10, 14, 9],
        [10, 6, 9, 0, 12, 11, 7, 13, 15, 1, 3, 14, 5, 2, 8, 4],
        [3, 15, 0, 6, 10, 1, 13, 8, 9, 4, 5, 11, 12, 7, 2, 14],
    ],
    [
        [2, 12, 4, 1, 7, 10, 11, 6, 8, 5, 3, 15, 13, 0, 14, 9],
        [14, 11, 2, 12, 4, 7, 13, 1, 5, 0, 15, 10, 3, 9, 8, 6],
        [4, 2, 1, 11, 10, 13, 7, 8, 15, 9, 12, 5, 6, 3, 0, 14],
        [11, 8, 12, 7, 1, 14, 2, 13, 6, 15, 0, 9, 10, 4, 5, 3],
    ],
    [
        [12, 1, 10, 15, 9, 2, 6, 8, 0, 13, 3, 4, 14, 7, 5, 11],
        [10, 15, 4, 2, 7, 12, 9, 5, 6, 1, 13, 14, 0, 11, 3, 8],
        [9, 14, 15, 5, 2, 8, 12, 3, 7, 0, 4, 10, 1, 13, 11, 6],
        [4, 3, 2, 12, 9, 5, 15, 10, 11, 14, 1, 7, 6, 0, 8, 13],
    ],
    [
        [4, 11, 2, 14, 15, 0, 8, 13, 3, 12, 9, 7, 5, 10, 6, 1],
        [13, 0, 11, 7, 4, 9, 1, 10, 14, 3, 5, 12, 2, 15, 8, 6],
        [1, 4, 11, 13, 12, 3, 7, 14, 10, 15, 6, 8, 0, 5, 9, 2],
        [6, 11, 13, 8, 1, 4, 10, 7, 9, 5, 0, 15, 14, 2, 3, 12],
    ],
    [
        [13, 2, 8, 4, 6, 15, 11, 1, 10, 9, 3, 14, 5, 0, 12, 7],
        [1, 15, 13, 8, 10, 3, 7, 4, 12, 5, 6, 11, 0, 14, 9, 2],
        [7, 11, 4, 1, 9, 12, 14, 2, 0, 6, 10, 13, 15, 3, 5, 8],
        [2, 1, 14, 7, 4, 10, 8, 13, 15, 12, 9, 0, 3, 5, 6, 11],
    ],
];

/// Bit `n` of a byte string, bit 0 being the top bit of byte 0.
fn get_bit(bytes: &[u8], n: usize) -> u8 {
    (bytes[n / 8] >> (7 - n % 8)) & 1
}

/// Output bit `j` = input bit `table[j]` (1-based). Output is `N` bytes.
fn permute<const N: usize>(input: &[u8], table: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    for (j, &src) in table.iter().enumerate() {
        out[j / 8] |= get_bit(input, src as usize - 1) << (7 - j % 8);
    }
    out
}

/// Generates `rounds` subkeys, in application order for `mode`.
pub fn key_schedule(
    key: &[u8; BLOCK_BYTES],
    mode: Mode,
    rounds: usize,
) -> Result<Vec<Subkey>, ReferenceError> {
    if !(1..=MAX_ROUNDS).contains(&rounds) {
        return Err(ReferenceError::Rounds(rounds));
    }

    // --- 1. PC-1 into one bit per byte: C = cd[..28], D = cd[28..] ---
    let mut cd = [0u8; 56];
    for (i, bit) in cd.iter_mut().enumerate() {
        *bit = get_bit(key, PC1[i] as usize - 1);
    }

    // --- 2. Rotate and compress once per round ---
    let mut schedule = Vec::with_capacity(rounds);
    for &shift in SHIFTS.iter().take(rounds) {
        cd[..28].rotate_left(shift);
        cd[28..].rotate_left(shift);

        let mut subkey = [0u8; SUBKEY_BYTES];
        for (j, &src) in PC2.iter().enumerate() {
            subkey[j / 8] |= cd[src as usize - 1] << (7 - j % 8);
        }
        schedule.push(subkey);
    }

    // --- 3. Decryption applies the same subkeys last to first ---
    if mode == Mode::Decrypt {
        schedule.reverse();
    }
    Ok(schedule)
}

/// Round function F(R, K) on a 4-byte half.
fn f(right: &[u8; 4], subkey: &Subkey) -> [u8; 4] {
    // --- 1. Expansion ---
    let mut expanded: [u8; 6] = permute(right, &E);

    // --- 2. Key mixing ---
    for (e, k) in expanded.iter_mut().zip(subkey.iter()) {
        *e ^= k;
    }

    // --- 3. Substitution: outer bits pick the row, middle four the column ---
    let mut substituted = [0u8; 4];
    for (s, sbox) in SBOX.iter().enumerate() {
        let base = 6 * s;
        let row = (get_bit(&expanded, base) << 1) | get_bit(&expanded, base + 5);
        let mut col = 0;
        for b in 1..5 {
            col = (col << 1) | get_bit(&expanded, base + b);
        }
        let nibble = sbox[row as usize][col as usize];
        substituted[s / 2] |= if s % 2 == 0 { nibble << 4 } else { nibble };
    }

    // --- 4. Permutation ---
    permute(&substituted, &P)
}

fn xor4(a: &[u8; 4], b: &[u8; 4]) -> [u8; 4] {
    [a[0] ^ b[0], a[1] ^ b[1], a[2] ^ b[2], a[3] ^ b[3]]
}

/// Runs the Feistel rounds on one block. Direction follows the schedule.
pub fn crypt(input: &[u8; BLOCK_BYTES], schedule: &[Subkey]) -> [u8; BLOCK_BYTES] {
    let mut left = [input[0], input[1], input[2], input[3]];
    let mut right = [input[4], input[5], input[6], input[7]];

    if let Some((last, head)) = schedule.split_last() {
        for subkey in head {
            let next = xor4(&f(&right, subkey), &left);
            left = right;
            right = next;
        }
        // The final round does not swap.
        left = xor4(&f(&right, last), &left);
    }

    let mut out = [0u8; BLOCK_BYTES];
    out[..4].copy_from_slice(&left);
    out[4..].copy_from_slice(&right);
    out
}

/// FIPS 46-3 DES (16 rounds, IP/FP included).
pub fn standard_encrypt(key: &[u8; BLOCK_BYTES], plaintext: &[u8; BLOCK_BYTES]) -> [u8; BLOCK_BYTES] {
    let schedule = full_schedule(key, Mode::Encrypt);
    let permuted: [u8; 8] = permute(plaintext, &IP);
    permute(&crypt(&permuted, &schedule), &FP)
}

pub fn standard_decrypt(key: &[u8; BLOCK_BYTES], ciphertext: &[u8; BLOCK_BYTES]) -> [u8; BLOCK_BYTES] {
    let schedule = full_schedule(key, Mode::Decrypt);
    let permuted: [u8; 8] = permute(ciphertext, &IP);
    permute(&crypt(&permuted, &schedule), &FP)
}

fn full_schedule(key: &[u8; BLOCK_BYTES], mode: Mode) -> Vec<Subkey> {
    match key_schedule(key, mode, MAX_ROUNDS) {
        Ok(schedule) => schedule,
        Err(_) => unreachable!("MAX_ROUNDS is always a valid round count"),
    }
}

fn parse_block(input: &str) -> Result<[u8; BLOCK_BYTES], ReferenceError> {
    let bytes = hex::decode(input)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| ReferenceError::Length {
            expected: BLOCK_BYTES,
            actual: bytes.len(),
        })
}

/// Reduced-round encryption on hex strings (no IP/FP), for test vector tooling.
pub fn encrypt_hex(key: &str, plaintext: &str, rounds: usize) -> Result<String, ReferenceError> {
    let key = parse_block(key)?;
    let plaintext = parse_block(plaintext)?;
    let schedule = key_schedule(&key, Mode::Encrypt, rounds)?;
    Ok(hex::encode(crypt(&plaintext, &schedule)))
}
