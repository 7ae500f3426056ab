use std::io::{BufRead, Write};
use std::path::Path;
use std::time::Duration;

use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::LicenseError;
use crate::models::LicenseSummary;

/// The interactive side of the workflow.
pub trait Prompter {
    /// Ask the user to choose one of `licenses`; `None` means they chose nothing.
    fn pick_license(&mut self, licenses: &[LicenseSummary])
        -> Result<Option<usize>, LicenseError>;

    /// Ask whether the existing file at `path` may be replaced.
    fn confirm_overwrite(&mut self, path: &Path) -> Result<bool, LicenseError>;

    /// A network request is about to start.
    fn begin_fetch(&mut self, _message: &str) {}

    /// The request started by [`Prompter::begin_fetch`] finished.
    fn end_fetch(&mut self) {}
}

/// Line-based prompts on a terminal (or any reader/writer pair).
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
    show_progress: bool,
    spinner: Option<ProgressBar>,
}

impl TerminalPrompter<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio(show_progress: bool) -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout(), show_progress)
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W, show_progress: bool) -> Self {
        Self {
            input,
            output,
            show_progress,
            spinner: None,
        }
    }

    /// Read one line; `None` on end of input.
    fn read_answer(&mut self) -> Result<Option<String>, LicenseError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn render_choices(&mut self, licenses: &[LicenseSummary]) -> Result<(), LicenseError> {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("#").add_attribute(Attribute::Bold),
                Cell::new("License").add_attribute(Attribute::Bold),
                Cell::new("Key").add_attribute(Attribute::Bold),
            ]);

        for (i, license) in licenses.iter().enumerate() {
            table.add_row(vec![
                Cell::new(i + 1).set_alignment(CellAlignment::Right),
                Cell::new(&license.name),
                Cell::new(&license.key),
            ]);
        }

        writeln!(self.output, "{}", table)?;
        Ok(())
    }
}

/// Interpret a picker answer: a 1-based index or a license key.
///
/// Returns `Some(None)` when the user chose nothing, `None` when the answer
/// makes no sense.
fn parse_choice(answer: &str, licenses: &[LicenseSummary]) -> Option<Option<usize>> {
    if answer.is_empty() || answer.eq_ignore_ascii_case("q") {
        return Some(None);
    }
    if let Ok(n) = answer.parse::<usize>() {
        return (1..=licenses.len()).contains(&n).then(|| Some(n - 1));
    }
    licenses
        .iter()
        .position(|l| l.key.eq_ignore_ascii_case(answer))
        .map(Some)
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn pick_license(
        &mut self,
        licenses: &[LicenseSummary],
    ) -> Result<Option<usize>, LicenseError> {
        if licenses.is_empty() {
            writeln!(self.output, "No licenses available.")?;
            return Ok(None);
        }

        self.render_choices(licenses)?;

        loop {
            write!(
                self.output,
                "{} ",
                format!("Choose a license [1-{}, key, or q]:", licenses.len()).bold()
            )?;
            self.output.flush()?;

            let Some(answer) = self.read_answer()? else {
                writeln!(self.output)?;
                return Ok(None);
            };

            match parse_choice(&answer, licenses) {
                Some(choice) => return Ok(choice),
                None => writeln!(self.output, "{} {}", "Invalid choice:".yellow(), answer)?,
            }
        }
    }

    fn confirm_overwrite(&mut self, path: &Path) -> Result<bool, LicenseError> {
        write!(
            self.output,
            "{} {} already exists. Do you want to overwrite it? [y/N] ",
            "⚠".yellow(),
            path.display()
        )?;
        self.output.flush()?;

        let answer = self.read_answer()?.unwrap_or_default();
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }

    fn begin_fetch(&mut self, message: &str) {
        if !self.show_progress {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn end_fetch(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}
