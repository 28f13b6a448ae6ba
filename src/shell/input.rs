//! Range-checked scalar input readers
//!
//! Prompt-retry loops over a generic reader/writer pair. Each reader keeps
//! asking until the value parses and lands inside its domain; only stream
//! failures propagate as errors.

use std::io::{self, BufRead, Write};

use crate::error::Result;
use crate::record::{current_year, MIN_YEAR};

/// Prompt once and read one trimmed line
pub fn read_line<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<String> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input stream closed").into());
    }
    Ok(line.trim().to_string())
}

/// Prompt until a non-empty line is entered
pub fn read_nonempty<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    what: &str,
) -> Result<String> {
    loop {
        let value = read_line(input, output, prompt)?;
        if !value.is_empty() {
            return Ok(value);
        }
        write!(output, "{what} cannot be empty. ")?;
    }
}

/// Prompt until an integer inside `[min, max]` is entered
pub fn read_u32_in_range<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    min: u32,
    max: u32,
) -> Result<u32> {
    loop {
        let raw = read_line(input, output, prompt)?;
        if raw.is_empty() {
            writeln!(output, "Input cannot be empty. Please enter a valid integer.")?;
            continue;
        }
        let value: u32 = match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                writeln!(output, "Invalid input. Please enter a valid integer.")?;
                continue;
            }
        };
        if value < min || value > max {
            writeln!(
                output,
                "Input out of range. Please enter an integer between {min} and {max}."
            )?;
            continue;
        }
        return Ok(value);
    }
}

/// Prompt until a number inside `[min, max]` is entered
pub fn read_f64_in_range<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    min: f64,
    max: f64,
) -> Result<f64> {
    loop {
        let raw = read_line(input, output, prompt)?;
        if raw.is_empty() {
            writeln!(output, "Input cannot be empty. Please enter a valid number.")?;
            continue;
        }
        let value: f64 = match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                writeln!(output, "Invalid input. Please enter a valid number.")?;
                continue;
            }
        };
        if value < min || value > max {
            writeln!(
                output,
                "Input out of range. Please enter a number between {min} and {max}."
            )?;
            continue;
        }
        return Ok(value);
    }
}

/// Prompt until a 4-digit recording year is entered
pub fn read_year<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<i32> {
    let latest = current_year();
    loop {
        let raw = read_line(input, output, prompt)?;
        if raw.is_empty() {
            writeln!(output, "Input cannot be empty. Please enter a valid integer.")?;
            continue;
        }
        let value: i32 = match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                writeln!(output, "Invalid input. Please enter a valid integer.")?;
                continue;
            }
        };
        if value < MIN_YEAR || value > latest {
            writeln!(
                output,
                "Input out of range. Please enter an integer between {MIN_YEAR} and {latest}."
            )?;
            continue;
        }
        return Ok(value);
    }
}
