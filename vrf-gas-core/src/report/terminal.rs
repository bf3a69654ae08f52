use std::io::{self, Write};

use colored::Colorize;

use super::{GroupReport, ReportError, Reporter};

/// A reporter that prints gas statistics to the terminal.
#[derive(Debug, Clone, Default)]
pub struct TerminalReporter {
    /// Whether to use colors in output (defaults to true).
    use_colors: bool,
}

impl TerminalReporter {
    /// Create a new terminal reporter with default settings.
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// Create a terminal reporter with color output disabled.
    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    fn label(&self, text: &str) -> String {
        if self.use_colors {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }

    /// Print the group title with its sample count.
    fn print_header(&self, writer: &mut impl Write, report: &GroupReport) -> io::Result<()> {
        let count = report.stats.sample_count;
        let plural = if count == 1 { "" } else { "s" };
        let title = format!("{} ({} sample{})", report.name, count, plural);

        if self.use_colors {
            writeln!(writer, "{}", title.bold())?;
        } else {
            writeln!(writer, "{}", title)?;
        }
        writeln!(writer, "{}", "-".repeat(title.len()))?;
        Ok(())
    }

    fn print_stats(&self, writer: &mut impl Write, report: &GroupReport) -> io::Result<()> {
        let stats = &report.stats;

        writeln!(writer, "{} {}", self.label("Min:"), stats.min)?;
        writeln!(writer, "{} {}", self.label("Max:"), stats.max)?;
        writeln!(
            writer,
            "{} {} ({} = sqrt({}))",
            self.label("Average (std):"),
            stats.mean,
            stats.std_dev,
            stats.variance
        )?;
        writeln!(writer, "{} {}", self.label("Median:"), stats.median)?;
        writeln!(writer)?;
        Ok(())
    }

    fn print_group(&self, writer: &mut impl Write, report: &GroupReport) -> io::Result<()> {
        self.print_header(writer, report)?;
        self.print_stats(writer, report)
    }

    /// Render `results` to any writer; [`Reporter::report`] targets stdout.
    pub fn write_to(&self, writer: &mut impl Write, results: &[GroupReport]) -> io::Result<()> {
        for report in results {
            self.print_group(writer, report)?;
        }
        Ok(())
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, results: &[GroupReport]) -> Result<(), ReportError> {
        let stdout = io::stdout();
        let mut writer = stdout.lock();

        self.write_to(&mut writer, results)?;
        writer.flush()?;
        Ok(())
    }
}
