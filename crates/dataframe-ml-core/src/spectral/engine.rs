//! Radix-2 and Bluestein transform kernels.

use std::fmt;

use num_complex::Complex;

use crate::parallel::ParallelGate;

use super::value::FftReal;

/// Algorithm used for a given transform length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftAlgorithm {
    /// Iterative radix-2 decimation in time.
    Radix2,
    /// Bluestein chirp-z convolution over a padded radix-2 transform.
    Bluestein,
}

impl FftAlgorithm {
    /// Algorithm selected for a sequence of `len` elements.
    pub fn for_len(len: usize) -> Self {
        if len.is_power_of_two() || len == 0 {
            FftAlgorithm::Radix2
        } else {
            FftAlgorithm::Bluestein
        }
    }
}

impl fmt::Display for FftAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FftAlgorithm::Radix2 => f.write_str("radix-2"),
            FftAlgorithm::Bluestein => f.write_str("bluestein"),
        }
    }
}

/// Forward DFT of `data` in place, `X[k] = sum_j x[j] exp(-2 pi i jk / n)`.
///
/// Any length is accepted; the output length always equals the input length.
pub fn forward_transform<R: FftReal>(data: &mut [Complex<R>], gate: &ParallelGate) {
    transform(data, false, gate);
}

/// Inverse DFT of `data` in place, scaled by `1 / n`.
///
/// Computed as `conj(forward(conj(x))) / n`.
pub fn inverse_transform<R: FftReal>(data: &mut [Complex<R>], gate: &ParallelGate) {
    let n = data.len();
    if n == 0 {
        return;
    }
    gate.for_each_mut(data, |_, v| *v = v.conj());
    transform(data, false, gate);
    let scale = R::one() / R::from_usize(n);
    gate.for_each_mut(data, |_, v| *v = v.conj() * scale);
}

fn transform<R: FftReal>(data: &mut [Complex<R>], reverse: bool, gate: &ParallelGate) {
    let n = data.len();
    if n == 0 {
        return;
    }
    let algorithm = FftAlgorithm::for_len(n);
    tracing::trace!(
        n,
        %algorithm,
        reverse,
        parallel = gate.is_parallel(n),
        "Running transform"
    );
    match algorithm {
        FftAlgorithm::Radix2 => radix2(data, reverse, gate, n),
        FftAlgorithm::Bluestein => bluestein(data, reverse, gate),
    }
}

/// Unit complex number at `angle` radians.
#[inline]
fn unit<R: FftReal>(angle: R) -> Complex<R> {
    Complex::new(angle.cos(), angle.sin())
}

#[inline]
fn direction<R: FftReal>(reverse: bool) -> R {
    if reverse {
        R::one()
    } else {
        -R::one()
    }
}

/// Reverse the lowest `levels` bits of `i`.
#[inline]
fn reverse_bits(i: usize, levels: u32) -> usize {
    if levels == 0 {
        0
    } else {
        i.reverse_bits() >> (usize::BITS - levels)
    }
}

/// In-place radix-2 transform. `data.len()` must be a power of two.
///
/// `reverse` flips the twiddle sign and leaves the output unscaled.
/// Elementwise loops are gated on `gate_len`, the length of the transform
/// the caller was asked for.
fn radix2<R: FftReal>(
    data: &mut [Complex<R>],
    reverse: bool,
    gate: &ParallelGate,
    gate_len: usize,
) {
    let n = data.len();
    let levels = n.trailing_zeros();
    let sign = direction::<R>(reverse);
    let tau = R::PI() + R::PI();
    let len = R::from_usize(n);

    let mut twiddles = vec![Complex::<R>::default(); n / 2];
    gate.for_each_mut_gated(gate_len, &mut twiddles, |i, w| {
        *w = unit(sign * tau * R::from_usize(i) / len);
    });

    for i in 0..n {
        let j = reverse_bits(i, levels);
        if j > i {
            data.swap(i, j);
        }
    }

    let mut size = 2;
    while size <= n {
        let half = size / 2;
        let step = n / size;
        for start in (0..n).step_by(size) {
            for j in 0..half {
                let top = start + j;
                let bottom = top + half;
                let t = data[bottom] * twiddles[j * step];
                data[bottom] = data[top] - t;
                data[top] = data[top] + t;
            }
        }
        size *= 2;
    }
}

/// In-place transform of arbitrary length via Bluestein's algorithm.
fn bluestein<R: FftReal>(data: &mut [Complex<R>], reverse: bool, gate: &ParallelGate) {
    let n = data.len();
    let m = (2 * n + 1).next_power_of_two();
    let sign = direction::<R>(reverse);
    let pi = R::PI();
    let len = R::from_usize(n);
    let wrap = 2 * n as u128;
    let zero = Complex::<R>::default();

    // exp(sign * i * pi * k^2 / n), with k^2 reduced mod 2n to keep the angle small.
    let mut chirp = vec![zero; n];
    gate.for_each_mut_gated(n, &mut chirp, |i, w| {
        let k = ((i as u128 * i as u128) % wrap) as usize;
        *w = unit(sign * pi * R::from_usize(k) / len);
    });

    let mut a = vec![zero; m];
    {
        let input = &*data;
        gate.for_each_mut_gated(n, &mut a[..n], |i, v| *v = input[i] * chirp[i]);
    }

    let mut b = vec![zero; m];
    gate.for_each_mut_gated(n, &mut b, |p, v| {
        *v = if p == 0 {
            chirp[0]
        } else if p < n {
            chirp[p].conj()
        } else if p > m - n {
            chirp[m - p].conj()
        } else {
            zero
        };
    });

    convolve(&mut a, &mut b, gate, n);

    gate.for_each_mut_gated(n, data, |i, v| *v = a[i] * chirp[i]);
}

/// Circular convolution of `a` and `b`, written into `a`.
///
/// Both lengths must be the same power of two. `b` is overwritten with its
/// own transform. Loops are gated on `gate_len`.
fn convolve<R: FftReal>(
    a: &mut [Complex<R>],
    b: &mut [Complex<R>],
    gate: &ParallelGate,
    gate_len: usize,
) {
    let m = a.len();
    radix2(a, false, gate, gate_len);
    radix2(b, false, gate, gate_len);
    {
        let spectrum = &*b;
        gate.for_each_mut_gated(gate_len, a, |i, v| *v = *v * spectrum[i]);
    }
    radix2(a, true, gate, gate_len);
    let scale = R::one() / R::from_usize(m);
    gate.for_each_mut_gated(gate_len, a, |_, v| *v = *v * scale);
}
