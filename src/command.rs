//! Command language of the interactive shell.
//!
//! Lines are split on whitespace with shell-style quoting, so paths
//! containing spaces can be quoted. Each batch command resolves to a
//! [`BatchRequest`] with all defaults filled in and colors already parsed.

use std::path::PathBuf;

use crate::color::parse_color_list;
use crate::engine::ProcessOptions;
use crate::error::{Error, Result};

/// Size used by `process` and `remove-color` when none is given.
pub const DEFAULT_SIZE: u32 = 48;

/// Tolerance used by `magic` when none is given.
pub const MAGIC_TOLERANCE: u8 = 10;

/// A fully resolved batch job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    /// Input pattern (glob, file or directory).
    pub input: String,
    /// Directory receiving the PNG outputs.
    pub output: PathBuf,
    /// Per-file processing options.
    pub options: ProcessOptions,
}

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line.
    Empty,
    /// `exit` or `quit`.
    Exit,
    /// `help`.
    Help,
    /// `examples`.
    Examples,
    /// `clear`.
    Clear,
    /// `preview <pattern>`.
    Preview(String),
    /// Any batch command (`process`, `resize`, `remove-color`, `magic`).
    Batch(BatchRequest),
    /// A batch command given too few positional arguments; holds its usage line.
    Usage(&'static str),
    /// Unrecognized command word.
    Unknown(String),
}

/// Usage line for `resize`.
pub const RESIZE_USAGE: &str = "resize <input> <output> <size>";
/// Usage line for `remove-color`.
pub const REMOVE_COLOR_USAGE: &str = "remove-color <input> <output> <hex>";
/// Usage line for `magic`.
pub const MAGIC_USAGE: &str = "magic <input> <output> <size> <hex_colors> [tolerance]";
/// Usage line for `preview`.
pub const PREVIEW_USAGE: &str = "preview <pattern>";

/// Parse one shell line.
///
/// # Errors
///
/// Returns [`Error::InvalidSyntax`] for unbalanced quotes,
/// [`Error::InvalidNumber`] / [`Error::InvalidColor`] for bad values and
/// [`Error::MissingArgument`] when `process` lacks `--input` or `--output`.
pub fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "" => Command::Empty,
        "exit" | "quit" => Command::Exit,
        "help" => Command::Help,
        "examples" => Command::Examples,
        "clear" => Command::Clear,
        "preview" if rest.is_empty() => Command::Usage(PREVIEW_USAGE),
        "preview" => Command::Preview(rest.to_string()),
        "process" => Command::Batch(parse_process(&tokenize(rest)?)?),
        "resize" => quick(rest, 3, RESIZE_USAGE, |p| {
            Ok(BatchRequest {
                input: p[0].clone(),
                output: PathBuf::from(&p[1]),
                options: ProcessOptions {
                    size: Some(parse_size("size", &p[2])?),
                    overwrite: true,
                    ..ProcessOptions::default()
                },
            })
        })?,
        "remove-color" => quick(rest, 3, REMOVE_COLOR_USAGE, |p| {
            Ok(BatchRequest {
                input: p[0].clone(),
                output: PathBuf::from(&p[1]),
                options: ProcessOptions {
                    size: Some(DEFAULT_SIZE),
                    colors: parse_color_list(&p[2..3])?,
                    overwrite: true,
                    ..ProcessOptions::default()
                },
            })
        })?,
        "magic" => quick(rest, 4, MAGIC_USAGE, |p| {
            let tolerance = match p.get(4) {
                Some(t) => parse_number("tolerance", t)?,
                None => MAGIC_TOLERANCE,
            };
            Ok(BatchRequest {
                input: p[0].clone(),
                output: PathBuf::from(&p[1]),
                options: ProcessOptions {
                    size: Some(parse_size("size", &p[2])?),
                    colors: parse_color_list(&p[3..4])?,
                    tolerance,
                    keep_aspect: true,
                    overwrite: true,
                    ..ProcessOptions::default()
                },
            })
        })?,
        _ => Command::Unknown(word.to_string()),
    };

    Ok(command)
}

/// Split a command line into words.
///
/// Supports single quotes, double quotes and backslash escapes. Unlike a real
/// shell, `#` does not start a comment, so hex colors pass through unquoted.
fn tokenize(args: &str) -> Result<Vec<String>> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = args.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == q => quote = None,
            Some('"') if c == '\\' && matches!(chars.peek(), Some(&('"' | '\\'))) => {
                current.extend(chars.next());
            }
            Some(_) => current.push(c),
            None => match c {
                '\'' | '"' => {
                    quote = Some(c);
                    in_word = true;
                }
                '\\' => {
                    current.extend(chars.next());
                    in_word = true;
                }
                c if c.is_whitespace() => {
                    if in_word {
                        parts.push(std::mem::take(&mut current));
                        in_word = false;
                    }
                }
                c => {
                    current.push(c);
                    in_word = true;
                }
            },
        }
    }

    if quote.is_some() {
        return Err(Error::InvalidSyntax(args.to_string()));
    }
    if in_word {
        parts.push(current);
    }
    Ok(parts)
}

fn quick<F>(args: &str, required: usize, usage: &'static str, build: F) -> Result<Command>
where
    F: FnOnce(&[String]) -> Result<BatchRequest>,
{
    let parts = tokenize(args)?;
    if parts.len() < required {
        return Ok(Command::Usage(usage));
    }
    build(&parts).map(Command::Batch)
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T> {
    value.parse().map_err(|_| Error::InvalidNumber {
        name,
        value: value.to_string(),
    })
}

fn parse_size(name: &'static str, value: &str) -> Result<u32> {
    match parse_number(name, value)? {
        0 => Err(Error::InvalidSize(0)),
        size => Ok(size),
    }
}

/// Parse the flag form used by `process`. Unknown tokens are ignored.
fn parse_process(parts: &[String]) -> Result<BatchRequest> {
    let mut input = None;
    let mut output = None;
    let mut colors = Vec::new();
    let mut options = ProcessOptions {
        size: Some(DEFAULT_SIZE),
        ..ProcessOptions::default()
    };

    let mut i = 0;
    while i < parts.len() {
        let value = parts.get(i + 1);
        i += match (parts[i].as_str(), value) {
            ("--input", Some(v)) => {
                input = Some(v.clone());
                2
            }
            ("--output", Some(v)) => {
                output = Some(PathBuf::from(v));
                2
            }
            ("--size", Some(v)) => {
                options.size = Some(parse_size("--size", v)?);
                2
            }
            ("--remove-color", Some(v)) => {
                colors.push(v.clone());
                2
            }
            ("--tolerance", Some(v)) => {
                options.tolerance = parse_number("--tolerance", v)?;
                2
            }
            ("--suffix", Some(v)) => {
                options.suffix.clone_from(v);
                2
            }
            ("--keep-aspect", _) => {
                options.keep_aspect = true;
                1
            }
            ("--overwrite", _) => {
                options.overwrite = true;
                1
            }
            _ => 1,
        };
    }

    options.colors = parse_color_list(&colors)?;

    Ok(BatchRequest {
        input: input.ok_or(Error::MissingArgument("--input"))?,
        output: output.ok_or(Error::MissingArgument("--output"))?,
        options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn batch(line: &str) -> BatchRequest {
        match parse_command(line).unwrap() {
            Command::Batch(req) => req,
            other => panic!("expected batch for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn tokenizer_handles_quotes_and_hashes() {
        assert_eq!(
            tokenize(r#"a 'b c' "d \"e\"" f\ g #FFF ''"#).unwrap(),
            vec!["a", "b c", "d \"e\"", "f g", "#FFF", ""]
        );
        assert!(tokenize("'open").is_err());
        assert!(tokenize("  ").unwrap().is_empty());
    }

    #[test]
    fn simple_commands() {
        assert_eq!(parse_command("").unwrap(), Command::Empty);
        assert_eq!(parse_command("   ").unwrap(), Command::Empty);
        assert_eq!(parse_command("EXIT").unwrap(), Command::Exit);
        assert_eq!(parse_command("quit").unwrap(), Command::Exit);
        assert_eq!(parse_command("help").unwrap(), Command::Help);
        assert_eq!(parse_command("examples").unwrap(), Command::Examples);
        assert_eq!(parse_command("clear").unwrap(), Command::Clear);
        assert_eq!(
            parse_command("frobnicate now").unwrap(),
            Command::Unknown("frobnicate".to_string())
        );
    }

    #[test]
    fn preview_keeps_raw_pattern() {
        assert_eq!(
            parse_command("preview ./images/**/*.png").unwrap(),
            Command::Preview("./images/**/*.png".to_string())
        );
        assert_eq!(parse_command("preview").unwrap(), Command::Usage(PREVIEW_USAGE));
    }

    #[test]
    fn process_defaults() {
        let req = batch("process --input ./icons/*.png --output ./out");
        assert_eq!(req.input, "./icons/*.png");
        assert_eq!(req.output, PathBuf::from("./out"));
        assert_eq!(
            req.options,
            ProcessOptions {
                size: Some(48),
                ..ProcessOptions::default()
            }
        );
    }

    #[test]
    fn process_all_flags() {
        let req = batch(
            "process --input 'my dir/*.png' --output out --size 64 --remove-color #FF00FF,#000 \
             --remove-color #fff --tolerance 12 --suffix _64 --keep-aspect --overwrite --bogus",
        );
        assert_eq!(req.input, "my dir/*.png");
        let opts = req.options;
        assert_eq!(opts.size, Some(64));
        assert_eq!(opts.tolerance, 12);
        assert_eq!(opts.suffix, "_64");
        assert!(opts.keep_aspect);
        assert!(opts.overwrite);
        assert_eq!(
            opts.colors,
            vec![
                Color::new(255, 0, 255),
                Color::new(0, 0, 0),
                Color::new(255, 255, 255)
            ]
        );
    }

    #[test]
    fn process_requires_input_and_output() {
        assert!(matches!(
            parse_command("process --output out"),
            Err(Error::MissingArgument("--input"))
        ));
        assert!(matches!(
            parse_command("process --input x.png"),
            Err(Error::MissingArgument("--output"))
        ));
    }

    #[test]
    fn process_rejects_bad_values() {
        assert!(matches!(
            parse_command("process --input a --output b --size big"),
            Err(Error::InvalidNumber { name: "--size", .. })
        ));
        assert!(matches!(
            parse_command("process --input a --output b --size 0"),
            Err(Error::InvalidSize(0))
        ));
        assert!(matches!(
            parse_command("process --input a --output b --tolerance 300"),
            Err(Error::InvalidNumber { name: "--tolerance", .. })
        ));
        assert!(matches!(
            parse_command("process --input a --output b --remove-color #12"),
            Err(Error::InvalidColor(_))
        ));
        assert!(matches!(
            parse_command("process --input 'unterminated"),
            Err(Error::InvalidSyntax(_))
        ));
    }

    #[test]
    fn resize_shortcut() {
        let req = batch("resize ./icons/*.png ./output 64");
        assert_eq!(req.options.size, Some(64));
        assert!(req.options.overwrite);
        assert!(req.options.colors.is_empty());
        assert!(!req.options.keep_aspect);
        assert_eq!(parse_command("resize a b").unwrap(), Command::Usage(RESIZE_USAGE));
    }

    #[test]
    fn remove_color_shortcut() {
        let req = batch("remove-color ./images/*.png ./output #FFFFFF");
        assert_eq!(req.options.size, Some(DEFAULT_SIZE));
        assert_eq!(req.options.tolerance, 0);
        assert_eq!(req.options.colors, vec![Color::new(255, 255, 255)]);
        assert_eq!(
            parse_command("remove-color a b").unwrap(),
            Command::Usage(REMOVE_COLOR_USAGE)
        );
    }

    #[test]
    fn magic_shortcut() {
        let req = batch("magic ./icons/*.png ./output 64 #FFFFFF,#000000");
        assert_eq!(req.options.size, Some(64));
        assert_eq!(req.options.tolerance, MAGIC_TOLERANCE);
        assert!(req.options.keep_aspect);
        assert!(req.options.overwrite);
        assert_eq!(req.options.colors.len(), 2);

        let req = batch("magic a b 512 #FFF 3");
        assert_eq!(req.options.tolerance, 3);

        assert_eq!(parse_command("magic a b 64").unwrap(), Command::Usage(MAGIC_USAGE));
    }
}
