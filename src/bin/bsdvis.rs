/*
 * Copyright (C) 2021 taylor.fish <contact@taylor.fish>
 *
 * This file is part of bsdvis.
 *
 * bsdvis is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * bsdvis is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with bsdvis. If not, see <https://www.gnu.org/licenses/>.
 */

use std::ffi::OsStr;
use std::fmt::{Debug, Display};
use std::fs::File;
use std::io::{stdin, stdout, BufReader, BufWriter, Read, Stdout, Write};
use std::path::Path;
use std::process::exit;

use bsdvis::charset::{CharSet, VIS_DQ};
use bsdvis::decode::decode_bytes;
use bsdvis::encode::encode_bytes_with;
use bsdvis::host::{resolve_charset, LogHost};

const USAGE: &str = "\
Usage: bsdvis [options] [file]

Vis-encodes or decodes data from [file] and writes the result to standard
output. If [file] is missing or \"-\", the data is read from standard input.

Non-printable bytes are always written as \\ddd octal escapes. By default,
globbing and shell special characters, space, tab, and newline are escaped
too.

Options:
  -d --decode        Decode data instead of encoding
  -c --chars <list>  Escape the characters in <list> instead of the default
                     set. The list must be ASCII; otherwise the input is
                     copied unaltered.
  -q --dq            Also escape double quotes
  -h --help          Show this help message
  -v --version       Show program version

Set RUST_LOG to control diagnostic output (default: warn).
";

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

fn expect<T, E: Debug>(result: Result<T, E>, msg: impl Display) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("error: {}", msg);
        if cfg!(feature = "cli-panic") {
            panic!("error: {}: {:?}", msg, e);
        } else {
            exit(1);
        }
    })
}

struct ParsedArgs<'a> {
    pub decode: bool,
    pub chars: Option<String>,
    pub dq: bool,
    pub path: Option<&'a Path>,
}

fn show_usage() -> ! {
    print!("{}", USAGE);
    exit(0);
}

fn show_version() -> ! {
    println!("{}", env!("CARGO_PKG_VERSION"));
    exit(0);
}

macro_rules! args_error {
    ($($args:tt)*) => {
        error_exit!(
            "{}\n{}",
            format_args!($($args)*),
            "See `bsdvis --help` for usage information.",
        );
    };
}

fn parse_args<'a, Args>(args: Args) -> ParsedArgs<'a>
where
    Args: IntoIterator<Item = &'a OsStr>,
{
    let mut decode = false;
    let mut chars: Option<String> = None;
    let mut dq = false;
    let mut file: Option<&'a OsStr> = None;
    let mut options_done = false;
    let mut chars_pending = false;

    let mut process_arg = |arg: &'a OsStr, astr: &str| {
        if chars_pending {
            chars_pending = false;
            chars = Some(astr.to_owned());
            return;
        }
        match astr {
            _ if options_done => {}
            "-" => {}
            "--" => {
                options_done = true;
                return;
            }
            "--help" => show_usage(),
            "--version" => show_version(),
            "--decode" => {
                decode = true;
                return;
            }
            "--chars" => {
                chars_pending = true;
                return;
            }
            "--dq" => {
                dq = true;
                return;
            }
            s if s.starts_with("--chars=") => {
                chars = Some(s["--chars=".len()..].to_owned());
                return;
            }
            s if s.starts_with("--") => {
                args_error!("unrecognized option: {}", s);
            }
            s if s.starts_with('-') => {
                s.chars().skip(1).for_each(|c| match c {
                    'h' => show_usage(),
                    'v' => show_version(),
                    'd' => {
                        decode = true;
                    }
                    'q' => {
                        dq = true;
                    }
                    'c' => {
                        chars_pending = true;
                    }
                    c => {
                        args_error!("unrecognized option: -{}", c);
                    }
                });
                return;
            }
            _ => {}
        }
        if file.replace(arg).is_some() {
            args_error!("unexpected argument: {}", astr);
        }
    };

    args.into_iter()
        .map(|a| (a, a.to_string_lossy()))
        .for_each(|(arg, astr)| process_arg(arg, &*astr));

    if chars_pending {
        args_error!("missing argument for --chars");
    }

    ParsedArgs {
        decode,
        chars,
        dq,
        path: file.map(Path::new),
    }
}

/// Builds the active set the way `enc` does: `None` means the input must be
/// copied unaltered.
fn charset(chars: Option<&str>, dq: bool) -> Option<CharSet> {
    let set = resolve_charset(&LogHost, chars.map(str::as_bytes)).ok()?;
    Some(if dq {
        set.union(VIS_DQ)
    } else {
        set
    })
}

fn flush_stdout(writer: &mut BufWriter<Stdout>) {
    expect(writer.flush(), "could not write to standard output");
}

fn write_all(iter: impl Iterator<Item = u8>) {
    let mut writer = BufWriter::new(stdout());
    iter.for_each(|b| {
        expect(writer.write_all(&[b]), "could not write to standard output");
    });
    flush_stdout(&mut writer);
}

fn encode(stream: &mut impl Read, set: Option<CharSet>) {
    let reader = BufReader::new(stream);
    let iter = reader.bytes().map(|b| expect(b, "could not read input"));
    match set {
        Some(set) => write_all(encode_bytes_with(iter, &set)),
        None => write_all(iter),
    }
}

fn decode(stream: &mut impl Read) {
    let reader = BufReader::new(stream);
    let iter = reader.bytes().map(|b| expect(b, "could not read input"));
    write_all(decode_bytes(iter));
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    )
    .init();

    let args: Vec<_> = std::env::args_os().skip(1).collect();
    let ParsedArgs {
        decode: should_decode,
        chars,
        dq,
        path,
    } = parse_args(args.iter().map(|s| s.as_os_str()));

    let set = if should_decode {
        None
    } else {
        charset(chars.as_deref(), dq)
    };

    path.map(|path| {
        File::open(path).unwrap_or_else(|e| {
            error_exit!("could not open file '{}': {}", path.display(), e);
        })
    })
    .map_or_else(
        || {
            if should_decode {
                decode(&mut stdin());
            } else {
                encode(&mut stdin(), set);
            }
        },
        |mut file| {
            if should_decode {
                decode(&mut file);
            } else {
                encode(&mut file, set);
            }
        },
    );
}
