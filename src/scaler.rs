use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Precomputed mapping from window pixels to canvas pixels.
/// Nearest neighbour keeps one-pixel grid lines crisp at any size.
pub struct ScaleLut {
    src_x: Vec<usize>,
    src_y: Vec<usize>,
    src_w: usize,
    src_h: usize,
    dst_w: usize,
    dst_h: usize,
}

impl ScaleLut {
    pub fn empty() -> Self {
        Self {
            src_x: Vec::new(),
            src_y: Vec::new(),
            src_w: 0,
            src_h: 0,
            dst_w: 0,
            dst_h: 0,
        }
    }

    pub fn matches(&self, dst_w: usize, dst_h: usize) -> bool {
        self.dst_w == dst_w && self.dst_h == dst_h
    }

    /// Canvas pixel under a window position.
    pub fn window_to_canvas(&self, x: f64, y: f64) -> [i32; 2] {
        if self.dst_w == 0 || self.dst_h == 0 {
            return [x as i32, y as i32];
        }
        [
            (x * self.src_w as f64 / self.dst_w as f64).floor() as i32,
            (y * self.src_h as f64 / self.dst_h as f64).floor() as i32,
        ]
    }
}

pub fn build_scale_lut(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> ScaleLut {
    let map = |dst: usize, src: usize| -> Vec<usize> {
        let s = src as f32 / dst as f32;
        (0..dst)
            .map(|i| ((i as f32 * s) as usize).min(src.saturating_sub(1)))
            .collect()
    };

    ScaleLut {
        src_x: map(dst_w, src_w),
        src_y: map(dst_h, src_h),
        src_w,
        src_h,
        dst_w,
        dst_h,
    }
}

/// Parallel nearest-neighbour stretch of `src` into `dst`, row by row.
pub fn blit_nearest_stretch(dst: &mut [u32], dw: usize, src: &[u32], sw: usize, lut: &ScaleLut) {
    dst.par_chunks_mut(dw).enumerate().for_each(|(y, dst_row)| {
        let row = lut.src_y[y] * sw;
        for (x, px) in dst_row.iter_mut().enumerate() {
            *px = src[row + lut.src_x[x]];
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_copy() {
        let src: Vec<u32> = (0..12).collect();
        let lut = build_scale_lut(4, 3, 4, 3);
        let mut dst = vec![0; 12];
        blit_nearest_stretch(&mut dst, 4, &src, 4, &lut);
        assert_eq!(dst, src);
    }

    #[test]
    fn doubling_repeats_pixels() {
        let src = vec![1, 2, 3, 4];
        let lut = build_scale_lut(4, 4, 2, 2);
        let mut dst = vec![0; 16];
        blit_nearest_stretch(&mut dst, 4, &src, 2, &lut);
        assert_eq!(&dst[0..4], &[1, 1, 2, 2]);
        assert_eq!(&dst[12..16], &[3, 3, 4, 4]);
    }

    #[test]
    fn window_positions_map_back_to_canvas() {
        let lut = build_scale_lut(2050, 1410, 1025, 705);
        assert_eq!(lut.window_to_canvas(0.0, 0.0), [0, 0]);
        assert_eq!(lut.window_to_canvas(101.0, 64.0), [50, 32]);
        assert!(lut.matches(2050, 1410));
    }
}
