use std::sync::Arc;
use std::time::{Duration, Instant};

use directional_blur::filter::{ConvolutionFilter, Kernel, ParallelConvolutionFilter, RasterFilter};
use directional_blur::image::{PixelLayout, Raster};
use threadpool::ThreadPool;

const IMAGE_WIDTH: usize = 3840;
const IMAGE_HEIGHT: usize = 2160;
const LAYOUT: PixelLayout = PixelLayout::Argb32;

fn create_test_raster() -> Raster {
    let stride = Raster::minimum_stride(IMAGE_WIDTH, LAYOUT).expect("Test raster width fits in memory");
    let bytes = (0..stride * IMAGE_HEIGHT)
        .map(|index| {
            let x = index % stride;
            let y = index / stride;
            ((x + y * 8) % 256) as u8
        })
        .collect();
    Raster::new(IMAGE_WIDTH, IMAGE_HEIGHT, stride, LAYOUT, bytes).expect("Test raster is valid")
}

fn calculate_std_deviation_in_micros(mean: &Duration, measurements: &[Duration]) -> u64 {
    let mean_micros = mean.as_micros() as i128;
    let sum = measurements
        .iter()
        .map(|m| m.as_micros() as i128 - mean_micros)
        .map(|v| v.pow(2).unsigned_abs())
        .sum::<u128>();
    let variance = sum / measurements.len() as u128;
    (variance as f64).sqrt().round() as u64
}

fn report(name: &str, durations: &[Duration]) {
    let min_duration = durations.iter().min().unwrap();
    let max_duration = durations.iter().max().unwrap();
    let avg_duration = durations.iter().sum::<Duration>() / durations.len() as u32;
    let std_deviation = calculate_std_deviation_in_micros(&avg_duration, durations);

    println!(
        "{}: Min: {}, Max: {}, Average: {}, Std Deviation: {}",
        name,
        min_duration.as_micros(),
        max_duration.as_micros(),
        avg_duration.as_micros(),
        std_deviation,
    );
}

fn measure<F: FnMut()>(name: &str, mut pass: F) -> Vec<Duration> {
    let mut durations: Vec<Duration> = Vec::new();
    for round in 1..=NUMBER_OF_ROUNDS {
        let start = Instant::now();
        pass();
        let duration = start.elapsed();
        println!(
            "{} round {} finished after {} microseconds",
            name,
            round,
            duration.as_micros(),
        );
        durations.push(duration);
    }
    durations
}

const NUMBER_OF_ROUNDS: u32 = 5;

fn main() {
    println!("Creating test raster");
    let source = Arc::new(create_test_raster());
    let threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let threadpool = ThreadPool::new(threads);

    let sequential = ConvolutionFilter::new(Kernel::reference());
    let sequential_durations = measure("Sequential", || {
        sequential.apply(&source).expect("Sequential pass failed");
    });

    let parallel = ParallelConvolutionFilter::new(Kernel::reference(), &threadpool);
    let parallel_durations = measure("Parallel", || {
        parallel
            .apply_shared(Arc::clone(&source))
            .expect("Parallel pass failed");
    });

    report("Sequential", &sequential_durations);
    report(&format!("Parallel ({} threads)", threads), &parallel_durations);
}
