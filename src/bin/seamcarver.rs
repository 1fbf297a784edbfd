// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use seamcarver::{energy_to_image, SeamCarver};

extern crate clap;
extern crate image;

use clap::{crate_version, value_t, App, Arg, ArgMatches};
use failure::Error;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

fn setup_logging(verbosity: u64, quiet: bool) {
    let level_filter = if quiet {
        LevelFilter::OFF
    } else {
        match verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(level_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let input = matches.value_of("input").unwrap_or_default();
    let output = matches.value_of("output").unwrap_or_default();

    let picture = image::open(input)?.to_rgb();
    let (width, height) = picture.dimensions();
    info!(input, width, height, "loaded");

    let mut carver = SeamCarver::new(&picture)?;
    if matches.is_present("energy") {
        energy_to_image(&carver).save(output)?;
        info!(output, "wrote energy map");
        return Ok(());
    }

    let newwidth = target_arg(matches, "width", width);
    let newheight = target_arg(matches, "height", height);
    let carved = carver.carve(newwidth, newheight)?;
    carved.save(output)?;
    info!(output, width = newwidth, height = newheight, "wrote carved picture");
    Ok(())
}

// An optional numeric argument, defaulting to the picture's own size.
// Malformed numbers end the program with clap's own usage message.
fn target_arg(matches: &ArgMatches, name: &str, default: u32) -> u32 {
    if matches.is_present(name) {
        value_t!(matches, name, u32).unwrap_or_else(|e| e.exit())
    } else {
        default
    }
}

fn main() {
    let matches = App::new("seamcarver")
        .version(crate_version!())
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware image resizing by seam carving")
        .arg(
            Arg::with_name("input")
                .help("The image to carve")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the result; the format follows the extension")
                .short("o")
                .long("output")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("width")
                .help("Target width (default: unchanged)")
                .short("w")
                .long("width")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("height")
                .help("Target height (default: unchanged)")
                .short("H")
                .long("height")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("energy")
                .help("Write the energy map instead of carving")
                .short("e")
                .long("energy"),
        )
        .arg(
            Arg::with_name("verbose")
                .help("Raise the log level; repeat for more")
                .short("v")
                .multiple(true),
        )
        .arg(
            Arg::with_name("quiet")
                .help("Disable logging")
                .short("q")
                .long("quiet"),
        )
        .get_matches();

    setup_logging(matches.occurrences_of("verbose"), matches.is_present("quiet"));

    if let Err(e) = run(&matches) {
        eprintln!("seamcarver: {}", e);
        std::process::exit(1);
    }
}
