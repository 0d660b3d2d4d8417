extern crate clap;
extern crate env_logger;
extern crate newton;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use std::str::FromStr;

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const THREADS: &str = "threads";
const LINES: &str = "lines";
const OUTPUT: &str = "output";
const DEGREE: &str = "degree";

fn args<'a>(default_threads: &'a str) -> ArgMatches<'a> {
    App::new("newton")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Newton fractal renderer for x^d - 1")
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value(default_threads)
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        4096,
                        "Could not parse thread count",
                        "Thread count must be between 1 and 4096",
                    )
                })
                .help("Number of threads to use in solver"),
        )
        .arg(
            Arg::with_name(LINES)
                .required(false)
                .long(LINES)
                .short("l")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        100_000,
                        "Could not parse picture size",
                        "Picture size must be between 1 and 100000",
                    )
                })
                .help("Number of rows (and columns) in the output images"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .required(false)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value(".")
                .help("Directory to write the output images into"),
        )
        .arg(
            Arg::with_name(DEGREE)
                .required(true)
                .index(1)
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        9,
                        "Could not parse polynomial degree",
                        "Polynomial degree must be between 1 and 9",
                    )
                })
                .help("Degree d of the polynomial x^d - 1"),
        )
        .get_matches()
}

fn parse<T: FromStr>(matches: &ArgMatches, name: &str) -> Option<T> {
    matches.value_of(name).and_then(|s| T::from_str(s).ok())
}

fn main() {
    env_logger::init();

    let default_threads = num_cpus::get().to_string();
    let matches = args(&default_threads);

    // The validators have already checked each of these.
    let (threads, lines, degree) = match (
        parse::<usize>(&matches, THREADS),
        parse::<usize>(&matches, LINES),
        parse::<usize>(&matches, DEGREE),
    ) {
        (Some(t), Some(l), Some(d)) => (t, l, d),
        _ => {
            eprintln!("Could not parse arguments");
            std::process::exit(1);
        }
    };
    let output = matches.value_of(OUTPUT).unwrap_or(".");

    let result = newton::RenderConfig::new(threads, lines, degree, output)
        .and_then(|config| newton::render_files(&config));

    match result {
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok((attractors, convergence)) => {
            println!("{}", attractors.display());
            println!("{}", convergence.display());
        }
    }
}
