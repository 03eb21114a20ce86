use clap::{value_t, App, Arg, ArgMatches};
use image::RgbaImage;
use log::{error, info};
use mandelbrot::output::{ensure_dir, image_path, write_png};
use mandelbrot::views::load_views;
use mandelbrot::{render_with_threads, RenderConfig};
use std::path::Path;
use std::str::FromStr;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_size(s: &str) -> Result<(), String> {
    match parse_pair::<u32>(s, 'x') {
        Some((w, h)) if w > 0 && h > 0 => Ok(()),
        Some(_) => Err("Image width and height must be non-zero".to_string()),
        None => Err("Could not parse output image size".to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
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

fn validate_finite(s: &str) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(f) if f.is_finite() => Ok(()),
        _ => Err("Hue offset must be a finite number".to_string()),
    }
}

const VIEWS: &str = "views";
const OUTPUT: &str = "output";
const SIZE: &str = "size";
const SAMPLES: &str = "samples";
const ITERATIONS: &str = "iterations";
const HUE_OFFSET: &str = "hue-offset";
const THREADS: &str = "threads";
const SEED: &str = "seed";
const NO_MIXING: &str = "no-mixing";
const INSIDE_WHITE: &str = "inside-white";
const GRAYSCALE: &str = "grayscale";
const NO_OVERVIEW: &str = "no-overview";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandel")
        .version("0.1.0")
        .about("Anti-aliased, smooth-coloured Mandelbrot renderer")
        .arg(
            Arg::with_name(VIEWS)
                .long(VIEWS)
                .short("v")
                .takes_value(true)
                .default_value("locations.json")
                .help("JSON file of views to render"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value(".")
                .help("Directory the images are written to"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1024x1024")
                .validator(|s| validate_size(&s))
                .help("Size of output images"),
        )
        .arg(
            Arg::with_name(SAMPLES)
                .long(SAMPLES)
                .short("n")
                .takes_value(true)
                .default_value("50")
                .validator(|s| {
                    validate_range(
                        &s,
                        1u32,
                        u32::max_value(),
                        "Could not parse sample count",
                        "Sample count must be at least 1",
                    )
                })
                .help("Jittered samples per pixel"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("1500")
                .validator(|s| {
                    validate_range(
                        &s,
                        1u32,
                        u32::max_value(),
                        "Could not parse iteration count",
                        "Iteration count must be at least 1",
                    )
                })
                .help("Iterations before a point counts as inside the set"),
        )
        .arg(
            Arg::with_name(HUE_OFFSET)
                .long(HUE_OFFSET)
                .short("u")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0")
                .validator(|s| validate_finite(&s))
                .help("Rotates the colour ramp; taken modulo 1"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of render workers (default: one per CPU)"),
        )
        .arg(
            Arg::with_name(SEED)
                .long(SEED)
                .takes_value(true)
                .validator(|s| {
                    u64::from_str(&s)
                        .map(|_| ())
                        .map_err(|_| "Could not parse seed".to_string())
                })
                .help("Jitter seed (default: the current time)"),
        )
        .arg(
            Arg::with_name(NO_MIXING)
                .long(NO_MIXING)
                .help("Average samples in display space instead of linear light"),
        )
        .arg(
            Arg::with_name(INSIDE_WHITE)
                .long(INSIDE_WHITE)
                .help("Paint the inside of the set white instead of black"),
        )
        .arg(
            Arg::with_name(GRAYSCALE)
                .long(GRAYSCALE)
                .help("Map escape speed to lightness instead of hue"),
        )
        .arg(
            Arg::with_name(NO_OVERVIEW)
                .long(NO_OVERVIEW)
                .help("Don't append the whole-set view to the list"),
        )
        .get_matches()
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn config_from(matches: &ArgMatches) -> RenderConfig {
    let (width, height) = parse_pair::<u32>(matches.value_of(SIZE).unwrap_or_default(), 'x')
        .unwrap_or((1024, 1024));
    RenderConfig {
        width,
        height,
        samples_per_pixel: value_t!(matches, SAMPLES, u32).unwrap_or_else(|e| e.exit()),
        max_iterations: value_t!(matches, ITERATIONS, u32).unwrap_or_else(|e| e.exit()),
        hue_offset: value_t!(matches, HUE_OFFSET, f64).unwrap_or_else(|e| e.exit()),
        linear_mixing: !matches.is_present(NO_MIXING),
        inside_set_is_black: !matches.is_present(INSIDE_WHITE),
        grayscale: matches.is_present(GRAYSCALE),
        rng_seed: if matches.is_present(SEED) {
            value_t!(matches, SEED, u64).unwrap_or_else(|e| e.exit())
        } else {
            time_seed()
        },
    }
}

fn run(matches: &ArgMatches) -> mandelbrot::Result<()> {
    let config = config_from(matches);
    config.validate()?;
    let threads = if matches.is_present(THREADS) {
        value_t!(matches, THREADS, usize).unwrap_or_else(|e| e.exit())
    } else {
        num_cpus::get()
    };
    let outdir = Path::new(matches.value_of(OUTPUT).unwrap_or("."));
    ensure_dir(outdir)?;

    info!("Reading location data...");
    let views = load_views(
        matches.value_of(VIEWS).unwrap_or("locations.json"),
        !matches.is_present(NO_OVERVIEW),
    )?;

    let start = Instant::now();
    for (index, view) in views.iter().enumerate() {
        info!("Allocating and rendering image {}", index + 1);
        let rendered = Instant::now();
        let mut image = RgbaImage::new(config.width, config.height);
        render_with_threads(&mut image, *view, &config, threads)?;
        info!("Rendered image {} in {:?}", index + 1, rendered.elapsed());

        let path = image_path(outdir, view, index);
        info!("Encoding image {} to {}", index + 1, path.display());
        write_png(&path, &image)?;
    }
    info!("Done in {:?}", start.elapsed());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = args();
    if let Err(e) = run(&matches) {
        error!("Render failure: {}", e);
        std::process::exit(1);
    }
}
