use rayon::{
    iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// One destination coordinate: the two source samples it blends and the
/// weight of the second, in 1/256ths.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Tap {
    lo: usize,
    hi: usize,
    weight: u32,
}

fn taps(dst: usize, src: usize) -> Vec<Tap> {
    let step = src as f32 / dst as f32;
    (0..dst)
        .map(|d| {
            let f = d as f32 * step;
            let lo = (f.floor() as usize).min(src - 1);
            Tap {
                lo,
                hi: (lo + 1).min(src - 1),
                weight: ((f - lo as f32) * 256.0).round() as u32,
            }
        })
        .collect()
}

#[inline]
fn blend(a: u32, b: u32, w: u32) -> u32 {
    let inv = 256 - w;
    // red and blue share one multiply, green gets its own
    let rb = (((a & 0x00FF00FF) * inv + (b & 0x00FF00FF) * w) >> 8) & 0x00FF00FF;
    let g = (((a & 0x0000FF00) * inv + (b & 0x0000FF00) * w) >> 8) & 0x0000FF00;
    rb | g
}

/// Bilinear upscaler from the internal frame buffer to the window surface.
pub struct FrameScaler {
    src_w: usize,
    cols: Vec<Tap>,
    rows: Vec<Tap>,
}

impl FrameScaler {
    pub fn new(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> Self {
        Self {
            src_w,
            cols: taps(dst_w, src_w),
            rows: taps(dst_h, src_h),
        }
    }

    pub fn target_size(&self) -> (usize, usize) {
        (self.cols.len(), self.rows.len())
    }

    /// Rows are written in parallel.
    pub fn blit(&self, dst: &mut [u32], src: &[u32]) {
        let dw = self.cols.len();
        if dw == 0 {
            return;
        }
        let sw = self.src_w;
        dst.par_chunks_mut(dw)
            .zip(self.rows.par_iter())
            .for_each(|(out, row)| {
                let upper = &src[row.lo * sw..(row.lo + 1) * sw];
                let lower = &src[row.hi * sw..(row.hi + 1) * sw];
                for (px, col) in out.iter_mut().zip(&self.cols) {
                    let top = blend(upper[col.lo], upper[col.hi], col.weight);
                    let bottom = blend(lower[col.lo], lower[col.hi], col.weight);
                    *px = blend(top, bottom, row.weight);
                }
            });
    }
}
