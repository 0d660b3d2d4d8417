extern crate crossbeam;
extern crate image;
#[macro_use]
extern crate itertools;
extern crate newton;
extern crate rand;
extern crate tempfile;

use newton::readiness::ReadinessTracker;
use newton::writer::drain_in_order;
use newton::{render_files, PixelResult, RenderConfig, Renderer, MAX_ITERATIONS};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs;
use std::thread;
use std::time::Duration;

fn render(size: usize, degree: usize, threads: usize) -> (Vec<u8>, Vec<u8>) {
    let renderer = Renderer::new(size, degree).unwrap();
    let (mut attractors, mut convergence) = (Vec::<u8>::new(), Vec::<u8>::new());
    renderer
        .render(threads, &mut attractors, &mut convergence)
        .unwrap();
    (attractors, convergence)
}

fn body(raster: &[u8]) -> Vec<String> {
    String::from_utf8(raster.to_vec())
        .unwrap()
        .lines()
        .skip(3)
        .map(String::from)
        .collect()
}

#[test]
fn output_does_not_depend_on_thread_count() {
    for (degree, threads) in iproduct!(2..=9, vec![2, 3, 7]) {
        let single = render(33, degree, 1);
        let multi = render(33, degree, threads);
        assert!(
            single == multi,
            "degree {} differs with {} threads",
            degree,
            threads
        );
    }
}

#[test]
fn rerunning_into_files_is_byte_identical() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let (a1, c1) = render_files(&RenderConfig::new(4, 64, 5, first.path()).unwrap()).unwrap();
    let (a2, c2) = render_files(&RenderConfig::new(4, 64, 5, second.path()).unwrap()).unwrap();
    assert_eq!(fs::read(a1).unwrap(), fs::read(a2).unwrap());
    assert_eq!(fs::read(c1).unwrap(), fs::read(c2).unwrap());
}

#[test]
fn degree_one_is_a_single_colour() {
    let (attractors, convergence) = render(16, 1, 3);
    let colour_row = "230 025 075 ".repeat(16);
    let grey_row = "000 ".repeat(16);
    let attractors = body(&attractors);
    let convergence = body(&convergence);
    assert_eq!(attractors.len(), 16);
    assert!(attractors.iter().all(|row| *row == colour_row));
    assert!(convergence.iter().all(|row| *row == grey_row));
}

#[test]
fn rows_have_one_token_per_pixel_and_bounded_iterations() {
    let (attractors, convergence) = render(21, 6, 4);
    for row in body(&attractors) {
        assert_eq!(row.len(), 21 * 12);
    }
    for row in body(&convergence) {
        let levels: Vec<u32> = row
            .split_whitespace()
            .map(|token| token.parse().unwrap())
            .collect();
        assert_eq!(levels.len(), 21);
        assert!(levels.iter().all(|&level| level <= MAX_ITERATIONS));
    }
}

#[test]
fn attractor_file_decodes_as_a_pixmap() {
    let dir = tempfile::tempdir().unwrap();
    let config = RenderConfig::new(2, 24, 1, dir.path()).unwrap();
    let (attractors, _) = render_files(&config).unwrap();
    let decoded = image::open(&attractors).unwrap().to_rgb();
    assert_eq!(decoded.dimensions(), (24, 24));
    assert!(decoded.pixels().all(|p| *p == image::Rgb([230, 25, 75])));
}

#[test]
fn writer_emits_rows_in_order_whatever_order_they_finish() {
    const ROWS: usize = 64;
    let data: Vec<Vec<PixelResult>> = (0..ROWS)
        .map(|r| {
            vec![PixelResult {
                root: None,
                iterations: r as u8,
            }]
        })
        .collect();
    let mut order: Vec<usize> = (0..ROWS).collect();
    order.shuffle(&mut rand::thread_rng());

    let tracker = ReadinessTracker::new(ROWS);
    let mut emitted = Vec::new();
    crossbeam::scope(|spawner| {
        for chunk in order.chunks(ROWS / 4) {
            let tracker = &tracker;
            let data = &data;
            spawner.spawn(move |_| {
                let mut rng = rand::thread_rng();
                for &row in chunk {
                    thread::sleep(Duration::from_micros(rng.gen_range(0, 200)));
                    tracker.mark_ready(row, &data[row]);
                }
            });
        }
        drain_in_order(&tracker, |start, run| {
            for (offset, row) in run.iter().enumerate() {
                assert_eq!(row[0].iterations as usize, start + offset);
                emitted.push(start + offset);
            }
            Ok(())
        })
        .unwrap();
    })
    .unwrap();

    let expected: Vec<usize> = (0..ROWS).collect();
    assert_eq!(emitted, expected);
}
