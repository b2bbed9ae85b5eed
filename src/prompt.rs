//! Interactive prompts for the `explore` session.
//!
//! Generic over the input and output streams so sessions can be scripted.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use tracing::{error, info};

use crate::analyzers::analyzer::run;
use crate::dataset::{City, Loader};
use crate::filter::{DayFilter, FilterSpec, MonthFilter};
use crate::output::{TextReport, print_pretty};

/// Runs the interactive loop: prompt, report, and ask to restart.
///
/// A dataset that fails to load is reported and the user may try again.
/// Each restart begins a fresh round from the city prompt.
pub fn session<R: BufRead, W: Write>(
    loader: &Loader,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let mut round = 0;

    loop {
        round += 1;
        writeln!(out, "{}", "-".repeat(80))?;

        let Some(spec) = prompt_filters(input, out)? else {
            info!(round, "Input closed, ending session");
            break;
        };

        let span = tracing::info_span!("round", round, city = %spec.city);
        let _entered = span.enter();

        match run(loader, &spec) {
            Ok(report) => {
                print_pretty(&report);
                write!(out, "{}", TextReport(&report))?;
            }
            Err(e) => {
                error!(error = %e, "Failed to load dataset");
                writeln!(out, "\nCould not load data for {}: {e}", spec.city)?;
            }
        }

        if !prompt_restart(input, out)? {
            break;
        }
    }

    Ok(())
}

/// Asks for a city, month and day, re-prompting until each answer is valid.
///
/// Returns `Ok(None)` if the input ends before all three are answered.
pub fn prompt_filters<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<FilterSpec>> {
    writeln!(out, "Hello! Let's explore some US bikeshare data!")?;

    let Some(city) = ask::<City, _, _>(
        input,
        out,
        "\nPlease enter a city name (chicago, new york city, washington): ",
        "That city name is invalid. Please enter another city name: ",
    )?
    else {
        return Ok(None);
    };

    let Some(month) = ask::<MonthFilter, _, _>(
        input,
        out,
        "Please enter a month name in full (all, january, ..., june): ",
        "That month name is invalid. Please enter another month name: ",
    )?
    else {
        return Ok(None);
    };

    let Some(day) = ask::<DayFilter, _, _>(
        input,
        out,
        "Please enter a day of the week (all, monday, ..., sunday): ",
        "That day of the week is invalid. Please enter another day: ",
    )?
    else {
        return Ok(None);
    };

    Ok(Some(FilterSpec::new(city, month, day)))
}

/// Asks whether to run another round. Only `yes` (any case) continues.
pub fn prompt_restart<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<bool> {
    write!(out, "\nWould you like to restart? Enter yes or no.\n")?;
    out.flush()?;
    Ok(read_answer(input)?.is_some_and(|a| a == "yes"))
}

fn ask<T: FromStr, R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
    retry: &str,
) -> io::Result<Option<T>> {
    write!(out, "{question}")?;
    out.flush()?;

    loop {
        let Some(answer) = read_answer(input)? else {
            return Ok(None);
        };
        if let Ok(value) = answer.parse() {
            return Ok(Some(value));
        }
        tracing::debug!(answer = %answer, "Rejected prompt answer");
        write!(out, "{retry}")?;
        out.flush()?;
    }
}

/// Reads one trimmed, lower-cased line. `None` at end of input.
fn read_answer<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_lowercase()))
}
