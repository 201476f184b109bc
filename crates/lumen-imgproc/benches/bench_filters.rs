use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use lumen_image::Image;
use lumen_imgproc::filter::{box_filter_integral, convolve, kernels, smooth};

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("Filters");

    for (width, height) in [(256, 224), (512, 448)].iter() {
        for sigma in [1.0f32, 2.0].iter() {
            let parameter_string = format!("{width}x{height}x{sigma}");

            let image = Image::from_fn([*width, *height].into(), 3, |x, y, c| {
                ((x * 31 + y * 17 + c * 7) % 255) as f32 / 255.0
            });
            let kernel = kernels::gaussian_kernel(*sigma).unwrap();

            group.throughput(criterion::Throughput::Elements(
                (*width * *height * kernel.width() * kernel.height()) as u64,
            ));

            group.bench_with_input(
                BenchmarkId::new("convolve_gaussian", &parameter_string),
                &image,
                |b, i| b.iter(|| black_box(convolve(i, &kernel, true))),
            );

            group.bench_with_input(
                BenchmarkId::new("smooth_separable", &parameter_string),
                &image,
                |b, i| b.iter(|| black_box(smooth(i, *sigma))),
            );
        }

        let image = Image::from_size_val([*width, *height].into(), 5, 0.5);
        group.bench_with_input(
            BenchmarkId::new("box_filter_integral_15", format!("{width}x{height}")),
            &image,
            |b, i| b.iter(|| black_box(box_filter_integral(i, 15))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_filters);
criterion_main!(benches);
