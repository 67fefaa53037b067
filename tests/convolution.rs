use std::sync::Arc;

use directional_blur::color::{Color32, PrecisionColor};
use directional_blur::filter::{ConvolutionFilter, Kernel, ParallelConvolutionFilter, RasterFilter};
use directional_blur::image::{PixelLayout, Raster};
use directional_blur::Error;
use threadpool::ThreadPool;

const LAYOUTS: [PixelLayout; 3] = [
    PixelLayout::Indexed8,
    PixelLayout::Rgb24,
    PixelLayout::Argb32,
];

/// Pseudo random pixels with `padding` extra bytes per row.
fn create_test_raster(width: usize, height: usize, layout: PixelLayout, padding: usize) -> Raster {
    let stride = Raster::minimum_stride(width, layout).unwrap() + padding;
    let mut state: u32 = 0x2545_f491;
    let bytes = (0..stride * height)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect();
    Raster::new(width, height, stride, layout, bytes).unwrap()
}

fn assert_same_pixels(actual: &Raster, expected: &Raster) {
    for y in 0..expected.height() as isize {
        for x in 0..expected.width() as isize {
            assert_eq!(
                actual.get(x, y).to_clamped_color(),
                expected.get(x, y).to_clamped_color(),
                "pixel ({}, {}) differs",
                x,
                y
            );
        }
    }
}

#[test]
fn identity_kernel_reproduces_source() {
    for layout in LAYOUTS {
        let source = create_test_raster(7, 4, layout, 3);
        let output = ConvolutionFilter::new(Kernel::identity())
            .apply(&source)
            .unwrap();
        assert_same_pixels(&output, &source);
    }
}

#[test]
fn output_shape_matches_source() {
    let kernels = [
        Kernel::identity(),
        Kernel::reference(),
        Kernel::new(vec![1.0; 9]).unwrap(),
    ];
    for layout in LAYOUTS {
        let source = create_test_raster(5, 3, layout, 2);
        for kernel in kernels.iter().cloned() {
            let output = ConvolutionFilter::new(kernel).apply(&source).unwrap();
            assert_eq!(output.width(), source.width());
            assert_eq!(output.height(), source.height());
            assert_eq!(output.stride(), source.stride());
            assert_eq!(output.layout(), source.layout());
        }
    }
}

#[test]
fn interior_pixel_ignores_source_outside_window() {
    let source = create_test_raster(11, 2, PixelLayout::Argb32, 0);
    let filter = ConvolutionFilter::new(Kernel::reference());
    let before = filter.apply(&source).unwrap();

    let mut changed = source.clone();
    let white = PrecisionColor::new(255.0, 255.0, 255.0, 255.0);
    // the window of column 5 spans columns 3 to 7
    for x in [0, 1, 2, 8, 9, 10] {
        changed.set(x, 0, &white);
    }
    changed.set(5, 1, &white);
    let after = filter.apply(&changed).unwrap();

    assert_eq!(before.get(5, 0), after.get(5, 0));
}

#[test]
fn border_matches_zero_padded_reference() {
    let source = create_test_raster(6, 1, PixelLayout::Argb32, 0);
    let kernel = Kernel::reference();
    let output = ConvolutionFilter::new(kernel.clone())
        .apply(&source)
        .unwrap();

    let radius = kernel.radius();
    let mut padded = vec![PrecisionColor::zero(); radius];
    padded.extend((0..6).map(|x| source.get(x, 0)));
    padded.extend(vec![PrecisionColor::zero(); radius]);

    for x in 0..6 {
        let mut expected = PrecisionColor::zero();
        for (weight, color) in kernel.weights().iter().zip(&padded[x..x + kernel.len()]) {
            expected += *weight * *color;
        }
        assert_eq!(
            output.get(x as isize, 0).to_clamped_color(),
            expected.to_clamped_color(),
            "column {} differs",
            x
        );
    }
}

#[test]
fn reference_kernel_under_isolated_red_pixel() {
    let mut source = Raster::blank(9, 1, 27, PixelLayout::Rgb24).unwrap();
    source.set(4, 0, &PrecisionColor::from(Color32::opaque(255, 0, 0)));
    let output = ConvolutionFilter::new(Kernel::reference())
        .apply(&source)
        .unwrap();
    let center = output.get(4, 0).to_clamped_color();
    assert_eq!(center, Color32::opaque(103, 0, 0));
}

#[test]
fn reference_kernel_darkens_flat_regions() {
    // the literal weights sum to 0.9796, a full white row loses about 2 percent
    let source = Raster::new(9, 1, 27, PixelLayout::Rgb24, vec![255; 27]).unwrap();
    let output = ConvolutionFilter::new(Kernel::reference())
        .apply(&source)
        .unwrap();
    assert_eq!(output.get(4, 0).to_clamped_color(), Color32::opaque(250, 250, 250));
}

#[test]
fn parallel_pass_is_byte_identical() {
    let threadpool = ThreadPool::new(4);
    for layout in LAYOUTS {
        let source = create_test_raster(31, 17, layout, 1);
        let sequential = ConvolutionFilter::new(Kernel::reference())
            .apply(&source)
            .unwrap();
        let source = Arc::new(source);
        for rows_per_band in [1, 3, 5, 17] {
            let parallel = ParallelConvolutionFilter::new(Kernel::reference(), &threadpool)
                .with_rows_per_band(rows_per_band)
                .apply_shared(Arc::clone(&source))
                .unwrap();
            assert_eq!(parallel.bytes(), sequential.bytes());
        }
        let parallel = ParallelConvolutionFilter::new(Kernel::reference(), &threadpool)
            .apply_shared(source)
            .unwrap();
        assert_eq!(parallel.bytes(), sequential.bytes());
    }
}

#[test]
fn even_kernel_is_rejected() {
    assert!(matches!(
        Kernel::new(vec![0.5, 0.5]),
        Err(Error::EvenKernelLength(2))
    ));
}

#[test]
fn mismatched_destination_is_rejected_before_writing() {
    let source = create_test_raster(4, 4, PixelLayout::Rgb24, 0);
    let mut destination = Raster::blank(4, 4, 16, PixelLayout::Argb32).unwrap();
    let result = ConvolutionFilter::new(Kernel::reference()).apply_into(&source, &mut destination);
    assert!(matches!(result, Err(Error::LayoutMismatch(_, _))));
    assert!(destination.bytes().iter().all(|&byte| byte == 0));
}
