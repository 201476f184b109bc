use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use lumen_image::{Image, ImageSize};
use lumen_imgproc::{interpolation::InterpolationMode, resize::resize};

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("Resize");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{width}x{height}");

        let image = Image::from_fn([*width, *height].into(), 3, |x, y, c| {
            ((x + y + c) % 7) as f32 / 7.0
        });
        let new_size = ImageSize {
            width: width / 2,
            height: height / 2,
        };

        for mode in [InterpolationMode::Nearest, InterpolationMode::Bilinear] {
            group.bench_with_input(
                BenchmarkId::new(format!("resize_{mode:?}"), &parameter_string),
                &image,
                |b, i| b.iter(|| black_box(resize(i, new_size, mode))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_resize);
criterion_main!(benches);
