use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rescale_image::{CpuAllocator, Image, ImageSize, ImageView};
use rescale_imgproc::{filter::FilterKernel, resample, resize};

fn resize_image_crate(data: &[u8], size: ImageSize, new_size: ImageSize) -> Vec<u8> {
    let rgb = image::RgbImage::from_raw(size.width as u32, size.height as u32, data.to_vec())
        .unwrap();
    let image_crate = image::DynamicImage::ImageRgb8(rgb);

    let image_resized = image_crate.resize_exact(
        new_size.width as u32,
        new_size.height as u32,
        image::imageops::FilterType::Triangle,
    );
    image_resized.into_rgb8().into_raw()
}

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("Resize");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        // input image
        let image_size: ImageSize = [*width, *height].into();
        let data: Vec<u8> = (0..width * height * 3).map(|i| (i % 251) as u8).collect();

        // output image
        let new_size = ImageSize {
            width: width / 2,
            height: height / 2,
        };

        group.bench_with_input(
            BenchmarkId::new("image_rs_triangle", &parameter_string),
            &data,
            |b, d| b.iter(|| resize_image_crate(black_box(d), image_size, new_size)),
        );

        for kernel in [
            FilterKernel::Triangle,
            FilterKernel::Bell,
            FilterKernel::Lanczos3,
        ] {
            group.bench_with_input(
                BenchmarkId::new(format!("rescale_{}", kernel), &parameter_string),
                &data,
                |b, d| {
                    b.iter(|| {
                        resize::resize_with_filter(
                            black_box(d),
                            image_size,
                            3,
                            new_size,
                            black_box(kernel),
                        )
                    })
                },
            );
        }

        // reuse the destination buffer across iterations
        let src = ImageView::new(image_size, 3, &data).unwrap();
        let mut dst = Image::from_allocator(new_size, 3, CpuAllocator).unwrap();
        group.bench_with_input(
            BenchmarkId::new("rescale_bell_into", &parameter_string),
            &src,
            |b, s| {
                b.iter(|| {
                    resample::resample_separable(
                        black_box(s),
                        black_box(&mut dst),
                        &FilterKernel::Bell,
                    )
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_resize);
criterion_main!(benches);
