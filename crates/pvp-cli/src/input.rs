//! Interactive collection of run parameters.

use anyhow::{bail, Result};
use pvp_core::{Limits, SimConfig};
use std::io::{BufRead, Write};
use std::num::IntErrorKind;

/// Prompt until the reader supplies an integer in `[min, max]`
pub fn read_bounded<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    min: u64,
    max: u64,
) -> Result<u64> {
    let mut line = String::new();

    loop {
        write!(output, "{}", prompt)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed before a value was entered");
        }

        match line.trim().parse::<i64>() {
            Ok(value) if value < 0 || (value as u64) < min => {
                writeln!(output, "Number too small")?;
            }
            Ok(value) if value as u64 <= max => return Ok(value as u64),
            Ok(_) => writeln!(output, "That's not right!")?,
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => writeln!(output, "That's not right!")?,
                IntErrorKind::NegOverflow => writeln!(output, "Number too small")?,
                _ => writeln!(output, "Oops! That was not a valid number. Please try again...")?,
            },
        }
    }
}

/// Ask for grid size, population and tick count
pub fn prompt_config<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    limits: &Limits,
    base: SimConfig,
) -> Result<SimConfig> {
    writeln!(output, "Please enter the following")?;

    let size = read_bounded(
        input,
        output,
        &format!("Size (Must be {} or less): ", limits.max_size),
        1,
        limits.max_size as u64,
    )? as usize;

    let max_population = limits.max_population(size);
    let population = read_bounded(
        input,
        output,
        &format!("Enter number of animals (Must be {} or less): ", max_population),
        0,
        max_population as u64,
    )? as usize;

    let ticks = read_bounded(
        input,
        output,
        &format!("Enter number of cycles (Must not be more than {}): ", limits.max_ticks),
        0,
        limits.max_ticks,
    )?;

    Ok(SimConfig {
        size,
        population,
        ticks,
        ..base
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_bounded_retries_until_valid() {
        let mut input = Cursor::new("abc\n-3\n25\n12\n");
        let mut output = Vec::new();

        let value = read_bounded(&mut input, &mut output, "Size: ", 1, 20).unwrap();

        assert_eq!(value, 12);
        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("Oops! That was not a valid number. Please try again..."));
        assert!(transcript.contains("Number too small"));
        assert!(transcript.contains("That's not right!"));
        assert_eq!(transcript.matches("Size: ").count(), 4);
    }

    #[test]
    fn test_read_bounded_enforces_minimum() {
        let mut input = Cursor::new("0\n1\n");
        let mut output = Vec::new();

        assert_eq!(read_bounded(&mut input, &mut output, "> ", 1, 5).unwrap(), 1);
        assert!(String::from_utf8(output).unwrap().contains("Number too small"));
    }

    #[test]
    fn test_read_bounded_huge_integers_are_out_of_range() {
        let mut input = Cursor::new("99999999999999999999\n-99999999999999999999\n3\n");
        let mut output = Vec::new();

        assert_eq!(read_bounded(&mut input, &mut output, "> ", 1, 5).unwrap(), 3);
        let transcript = String::from_utf8(output).unwrap();
        assert_eq!(transcript.matches("That's not right!").count(), 1);
        assert_eq!(transcript.matches("Number too small").count(), 1);
        assert!(!transcript.contains("Oops!"));
    }

    #[test]
    fn test_read_bounded_fails_on_eof() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        assert!(read_bounded(&mut input, &mut output, "> ", 0, 5).is_err());
    }

    #[test]
    fn test_prompt_config_caps_population_by_size() {
        let mut input = Cursor::new("4\n9\n8\n30\n");
        let mut output = Vec::new();
        let base = SimConfig {
            seed: Some(5),
            ..Default::default()
        };

        let config = prompt_config(&mut input, &mut output, &Limits::default(), base).unwrap();

        assert_eq!(config.size, 4);
        assert_eq!(config.population, 8);
        assert_eq!(config.ticks, 30);
        assert_eq!(config.seed, Some(5));
        assert!(String::from_utf8(output)
            .unwrap()
            .contains("Enter number of animals (Must be 8 or less): "));
    }
}
