use pixconv_image::{DynImage, Image, ImageSize};
use pixconv_imgproc::filter::{
    apply_filter, apply_kernel, apply_kernel_with, available_filters, resolve, FilterAction,
    FilterError, Kernel2d, NamedFilter, ShapeError, BLUR_3X3, EDGE_DETECTION_3X3, SHARPEN_3X3,
};
use pixconv_imgproc::parallel::ExecutionStrategy;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_image<const C: usize>(rng: &mut StdRng, size: ImageSize) -> Image<u8, C> {
    let data = (0..size.area() * C).map(|_| rng.random::<u8>()).collect();
    Image::new(size, data).unwrap()
}

fn random_size(rng: &mut StdRng) -> ImageSize {
    ImageSize {
        width: rng.random_range(1..=17),
        height: rng.random_range(1..=17),
    }
}

fn builtin_kernels() -> [&'static Kernel2d; 3] {
    [&BLUR_3X3, &EDGE_DETECTION_3X3, &SHARPEN_3X3]
}

#[test]
fn test_shape_is_preserved() -> Result<(), FilterError> {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let size = random_size(&mut rng);
        let gray = random_image::<1>(&mut rng, size);
        let rgb = random_image::<3>(&mut rng, size);

        for kernel in builtin_kernels() {
            let out = apply_kernel(&gray, kernel)?;
            assert_eq!(out.size(), size);
            assert_eq!(out.as_slice().len(), gray.as_slice().len());

            let out = apply_kernel(&rgb, kernel)?;
            assert_eq!(out.size(), size);
            assert_eq!(out.num_channels(), 3);
            assert_eq!(out.as_slice().len(), rgb.as_slice().len());
        }
    }
    Ok(())
}

#[test]
fn test_input_is_not_modified() -> Result<(), FilterError> {
    let mut rng = StdRng::seed_from_u64(11);
    let image = random_image::<3>(&mut rng, [9, 6].into());
    let before = image.clone();

    for name in available_filters() {
        let _ = apply_filter(&image, name)?;
    }
    assert_eq!(image, before);
    Ok(())
}

#[test]
fn test_identity_and_unknown_names_are_no_ops() -> Result<(), FilterError> {
    let mut rng = StdRng::seed_from_u64(3);
    let gray = random_image::<1>(&mut rng, [13, 4].into());
    let rgb = random_image::<3>(&mut rng, [5, 8].into());

    for name in ["none", "anything_not_registered", "Sharpen", ""] {
        assert_eq!(resolve(name), FilterAction::Identity);
        assert_eq!(apply_filter(&gray, name)?, gray);
        assert_eq!(apply_filter(&rgb, name)?, rgb);
    }
    Ok(())
}

#[test]
fn test_output_is_deterministic_across_strategies() -> Result<(), FilterError> {
    let mut rng = StdRng::seed_from_u64(1234);
    let image = random_image::<3>(&mut rng, [37, 29].into());
    let kernel = Kernel2d::new(5, (0..25).map(|i| (i as f64 - 12.0) / 7.0).collect())?;

    let mut kernels: Vec<&Kernel2d> = builtin_kernels().to_vec();
    kernels.push(&kernel);

    for kernel in kernels {
        let reference = apply_kernel_with(&image, kernel, ExecutionStrategy::Serial)?;
        assert_eq!(apply_kernel(&image, kernel)?, reference);
        assert_eq!(
            apply_kernel_with(&image, kernel, ExecutionStrategy::ParallelRows)?,
            reference
        );
        assert_eq!(
            apply_kernel_with(&image, kernel, ExecutionStrategy::Fixed(3))?,
            reference
        );
    }
    Ok(())
}

#[test]
fn test_constant_image_is_unchanged_at_borders() -> Result<(), FilterError> {
    for (width, height) in [(1, 1), (2, 7), (10, 10), (28, 28)] {
        let size = ImageSize { width, height };
        for value in [0u8, 1, 128, 255] {
            let image = Image::<u8, 1>::from_size_val(size, value)?;

            // replicated borders see the same value everywhere
            let blurred = apply_kernel(&image, &BLUR_3X3)?;
            assert!(blurred.as_slice().iter().all(|&v| v == value));

            let sharpened = apply_kernel(&image, &SHARPEN_3X3)?;
            assert!(sharpened.as_slice().iter().all(|&v| v == value));

            let edges = apply_kernel(&image, &EDGE_DETECTION_3X3)?;
            assert!(edges.as_slice().iter().all(|&v| v == 0));
        }
    }
    Ok(())
}

#[test]
fn test_channels_are_filtered_independently() -> Result<(), FilterError> {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..5 {
        let size = random_size(&mut rng);
        let image = random_image::<3>(&mut rng, size);
        let channels = image.split_channels()?;

        for kernel in builtin_kernels() {
            let filtered = apply_kernel(&image, kernel)?;
            let per_channel = [
                apply_kernel(&channels[0], kernel)?,
                apply_kernel(&channels[1], kernel)?,
                apply_kernel(&channels[2], kernel)?,
            ];
            assert_eq!(filtered, Image::from_channels(&per_channel)?);
        }
    }
    Ok(())
}

#[test]
fn test_edge_detection_single_bright_pixel() -> Result<(), FilterError> {
    let mut data = vec![0u8; 25];
    data[2 * 5 + 2] = 255;
    let image = Image::<u8, 1>::new(
        ImageSize {
            width: 5,
            height: 5,
        },
        data,
    )?;

    let out = apply_filter(&image, "edge_detection")?;

    assert_eq!(out.get([2, 2, 0]), Some(&255));
    for [y, x] in [[1, 2], [3, 2], [2, 1], [2, 3]] {
        assert_eq!(out.get([y, x, 0]), Some(&0));
    }
    assert_eq!(out.as_slice().iter().filter(|&&v| v != 0).count(), 1);
    Ok(())
}

#[test]
fn test_brute_force_reference() -> Result<(), FilterError> {
    let mut rng = StdRng::seed_from_u64(5);
    let size = ImageSize {
        width: 6,
        height: 4,
    };
    let image = random_image::<3>(&mut rng, size);

    for kernel in builtin_kernels() {
        let out = apply_kernel(&image, kernel)?;
        let r = kernel.radius() as isize;

        for y in 0..size.height {
            for x in 0..size.width {
                for c in 0..3 {
                    let mut acc = 0.0f64;
                    for ky in 0..kernel.side() {
                        for kx in 0..kernel.side() {
                            let sy = (y as isize + ky as isize - r)
                                .clamp(0, size.height as isize - 1)
                                as usize;
                            let sx = (x as isize + kx as isize - r)
                                .clamp(0, size.width as isize - 1)
                                as usize;
                            let v = *image.get([sy, sx, c]).unwrap() as f64;
                            acc += v * kernel.get(ky, kx).unwrap();
                        }
                    }
                    let expected = (acc.clamp(0.0, 255.0) + 0.5).floor() as u8;
                    assert_eq!(out.get([y, x, c]), Some(&expected), "at ({y}, {x}, {c})");
                }
            }
        }
    }
    Ok(())
}

#[test]
fn test_registry_enumeration() {
    let names = available_filters();
    assert_eq!(names.len(), 4);
    for expected in ["none", "blur", "edge_detection", "sharpen"] {
        assert_eq!(names.iter().filter(|&&n| n == expected).count(), 1);
    }
    assert_eq!(names, available_filters());

    for name in names {
        let filter = NamedFilter::from_name(name).unwrap();
        assert_eq!(resolve(name), filter.action());
    }
}

#[test]
fn test_unsupported_layouts_are_invalid_shapes() {
    let size = ImageSize {
        width: 2,
        height: 2,
    };
    let err: FilterError = DynImage::from_raw(size, 4, vec![0; 16])
        .map_err(FilterError::from)
        .unwrap_err();
    assert_eq!(
        err,
        FilterError::InvalidShape(ShapeError::UnsupportedChannels(4))
    );

    let image = Image::<u8, 2>::from_size_val(size, 0).unwrap();
    assert!(apply_filter(&image, "blur").is_err_and(|e| e.is_invalid_shape()));
    assert!(apply_filter(&image, "none").is_err_and(|e| e.is_invalid_shape()));
}
