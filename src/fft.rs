//! Iterative radix-2 decimation-in-time FFT.
//!
//! The bit-reversal permutation and the twiddle factors of every butterfly
//! stage are computed once in [`Fft::new`] and reused by every transform.
//! Transforms are unnormalised in both directions.

use num_complex::Complex32;
use std::f32::consts::PI;

use crate::config::ConfigError;

/// Sign of the exponent used by a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Kernel `e^{-2πi·jk/N}`
    Forward,
    /// Kernel `e^{+2πi·jk/N}`
    Inverse,
}

/// A reusable complex FFT of a fixed power-of-two length.
#[derive(Debug, Clone)]
pub struct Fft {
    size: usize,
    log2n: u32,
    bit_reversed: Vec<usize>,
    // twiddles[stage][k] = e^{-2πi·k / 2^(stage + 1)}
    twiddles: Vec<Vec<Complex32>>,
    front: Vec<Complex32>,
    back: Vec<Complex32>,
}

impl Fft {
    /// Plan a transform of `size` points. `size` must be a power of two.
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        if !size.is_power_of_two() {
            return Err(ConfigError::FftLength(size));
        }

        let log2n = size.trailing_zeros();
        let bit_reversed = (0..size).map(|i| reverse_bits(i, log2n)).collect();

        let twiddles = (0..log2n)
            .map(|stage| {
                let span = 2usize << stage;
                (0..span / 2).map(|k| twiddle(k, span)).collect()
            })
            .collect();

        log::debug!("planned {}-point FFT with {} stages", size, log2n);

        Ok(Self {
            size,
            log2n,
            bit_reversed,
            twiddles,
            front: vec![Complex32::new(0.0, 0.0); size],
            back: vec![Complex32::new(0.0, 0.0); size],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn log2_size(&self) -> u32 {
        self.log2n
    }

    /// The bit-reversal permutation applied to the input.
    pub fn bit_reversal_table(&self) -> &[usize] {
        &self.bit_reversed
    }

    /// Transform `size` elements read from `input[i * stride + offset]`,
    /// writing them to `output[i * stride + offset]`.
    ///
    /// # Panics
    /// If either slice is too short for the requested stride and offset.
    pub fn process(
        &mut self,
        input: &[Complex32],
        output: &mut [Complex32],
        stride: usize,
        offset: usize,
        direction: Direction,
    ) {
        self.load(input, stride, offset);
        self.butterflies(direction);
        self.store(output, stride, offset);
    }

    /// Same as [`Fft::process`] with the input and output being one buffer.
    pub fn process_in_place(
        &mut self,
        data: &mut [Complex32],
        stride: usize,
        offset: usize,
        direction: Direction,
    ) {
        self.load(data, stride, offset);
        self.butterflies(direction);
        self.store(data, stride, offset);
    }

    /// Transform a contiguous sequence and return the result.
    ///
    /// # Panics
    /// If `sequence` does not hold exactly `size` elements.
    pub fn transform(&mut self, sequence: &[Complex32], direction: Direction) -> Vec<Complex32> {
        assert_eq!(sequence.len(), self.size, "expected a {}-point sequence", self.size);
        let mut output = vec![Complex32::new(0.0, 0.0); self.size];
        self.process(sequence, &mut output, 1, 0, direction);
        output
    }

    /// Separable 2D transform of a row-major `size x size` buffer:
    /// every row first, then every column.
    pub fn transform_2d(&mut self, data: &mut [Complex32], direction: Direction) {
        let n = self.size;
        assert_eq!(data.len(), n * n, "2D transform expects a {}x{} buffer", n, n);

        for row in 0..n {
            self.process_in_place(data, 1, row * n, direction);
        }
        for column in 0..n {
            self.process_in_place(data, n, column, direction);
        }
    }

    fn load(&mut self, input: &[Complex32], stride: usize, offset: usize) {
        for (slot, &source) in self.front.iter_mut().zip(&self.bit_reversed) {
            *slot = input[source * stride + offset];
        }
    }

    fn butterflies(&mut self, direction: Direction) {
        for (stage, factors) in self.twiddles.iter().enumerate() {
            let half = 1usize << stage;
            let span = half << 1;

            for block in (0..self.size).step_by(span) {
                for (k, &factor) in factors.iter().enumerate() {
                    let factor = match direction {
                        Direction::Forward => factor,
                        Direction::Inverse => factor.conj(),
                    };
                    let even = self.front[block + k];
                    let odd = self.front[block + k + half] * factor;
                    self.back[block + k] = even + odd;
                    self.back[block + k + half] = even - odd;
                }
            }

            std::mem::swap(&mut self.front, &mut self.back);
        }
    }

    fn store(&self, output: &mut [Complex32], stride: usize, offset: usize) {
        for (i, value) in self.front.iter().enumerate() {
            output[i * stride + offset] = *value;
        }
    }
}

/// Reverse the low `bits` bits of `x`.
fn reverse_bits(mut x: usize, bits: u32) -> usize {
    let mut reversed = 0;
    for _ in 0..bits {
        reversed = (reversed << 1) | (x & 1);
        x >>= 1;
    }
    reversed
}

fn twiddle(k: usize, span: usize) -> Complex32 {
    let angle = -2.0 * PI * k as f32 / span as f32;
    Complex32::new(angle.cos(), angle.sin())
}
