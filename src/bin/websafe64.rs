/*
 * Copyright (C) 2026 taylor.fish <contact@taylor.fish>
 *
 * This file is part of websafe64.
 *
 * websafe64 is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * websafe64 is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with websafe64. If not, see <https://www.gnu.org/licenses/>.
 */

use std::fmt::Display;
use std::fs::File;
use std::io::{self, stdin, stdout, Read, Write};
use std::path::{Path, PathBuf};
use std::process::exit;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use websafe64::{decode_to_slice, decoded_capacity};
use websafe64::{encode_to_slice, encoded_capacity};

/// Encodes or decodes web-safe base64 data from [FILE] and writes the result
/// to standard output.
#[derive(Parser, Debug)]
#[command(name = "websafe64", version)]
struct Arguments {
    /// Decode data instead of encoding. A single trailing line ending in the
    /// input is ignored.
    #[arg(short, long)]
    decode: bool,

    /// When encoding, write a newline after the output.
    #[arg(short, long, conflicts_with = "decode")]
    newline: bool,

    /// Input file. If missing or "-", the data is read from standard input.
    file: Option<PathBuf>,
}

#[macro_use]
mod error_exit {
    use super::{exit, Display};

    macro_rules! error_exit {
        ($($args:tt)*) => {
            crate::error_exit::__run(format_args!($($args)*));
        };
    }

    #[doc(hidden)]
    pub fn __run(args: impl Display) -> ! {
        eprintln!("error: {}", args);
        if cfg!(feature = "cli-panic") {
            panic!("error: {}", args);
        } else {
            exit(1);
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    let mut input = Vec::new();
    match path.filter(|p| *p != Path::new("-")) {
        Some(path) => {
            debug!(path = %path.display(), "reading file");
            File::open(path)
                .with_context(|| {
                    format!("could not open file '{}'", path.display())
                })?
                .read_to_end(&mut input)
                .with_context(|| {
                    format!("could not read file '{}'", path.display())
                })?;
        }
        None => {
            debug!("reading standard input");
            stdin()
                .lock()
                .read_to_end(&mut input)
                .context("could not read input")?;
        }
    }
    debug!(bytes = input.len(), "read input");
    Ok(input)
}

fn encode(input: &[u8], newline: bool) -> Result<Vec<u8>> {
    let mut output = vec![0; encoded_capacity(input.len())];
    let mut len = encode_to_slice(input, &mut output)?;
    if newline {
        // `encoded_capacity` leaves one spare byte.
        output[len] = b'\n';
        len += 1;
    }
    output.truncate(len);
    debug!(bytes = len, "encoded");
    Ok(output)
}

fn decode(input: &[u8]) -> Result<Vec<u8>> {
    let text = input
        .strip_suffix(b"\n")
        .map_or(input, |t| t.strip_suffix(b"\r").unwrap_or(t));
    let mut output = vec![0; decoded_capacity(text.len())];
    let len = decode_to_slice(text, &mut output)
        .context("input is not valid web-safe base64 data")?;
    output.truncate(len);
    debug!(bytes = len, "decoded");
    Ok(output)
}

fn write_output(output: &[u8]) -> io::Result<()> {
    let mut stdout = stdout().lock();
    stdout.write_all(output)?;
    stdout.flush()
}

fn run(args: &Arguments) -> Result<()> {
    let input = read_input(args.file.as_deref())?;
    let output = if args.decode {
        decode(&input)?
    } else {
        encode(&input, args.newline)?
    };
    write_output(&output).context("could not write to standard output")
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Arguments::parse();
    debug!(?args, "parsed arguments");
    if let Err(e) = run(&args) {
        error_exit!("{:#}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_with_newline_uses_spare_byte() {
        assert_eq!(encode(b"foo", false).unwrap(), b"Zm9v");
        assert_eq!(encode(b"foo", true).unwrap(), b"Zm9v\n");
        assert_eq!(encode(b"", true).unwrap(), b"\n");
    }

    #[test]
    fn decode_strips_one_line_ending() {
        assert_eq!(decode(b"Zm8.\n").unwrap(), b"fo");
        assert_eq!(decode(b"Zm8.\r\n").unwrap(), b"fo");
        assert!(decode(b"Zm8.\n\n").is_err());
        assert!(decode(b"Zm 8.").is_err());
    }

    #[test]
    fn arguments() {
        let args = Arguments::try_parse_from(["websafe64", "-d", "in.txt"])
            .unwrap();
        assert!(args.decode);
        assert_eq!(args.file.as_deref(), Some(Path::new("in.txt")));
        assert!(
            Arguments::try_parse_from(["websafe64", "-d", "-n"]).is_err()
        );
    }
}
