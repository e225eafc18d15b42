//! Human-readable output formatter with colors and styling.

use super::formatter::EntryStat;
use super::formatter::ListingEntry;
use super::formatter::OutputFormatter;
use super::formatter::RootInfo;
use anyhow::Result;
use console::Term;
use console::style;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let digits = n.to_string();
        let mut result = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }
        result
    }

    fn type_char(kind: &str) -> &'static str {
        match kind {
            "directory" => "d",
            "symlink" => "l",
            "hardlink" => "h",
            "file" => "-",
            _ => "?",
        }
    }

    fn display_name(&self, entry: &ListingEntry) -> String {
        let name = if entry.kind == "directory" {
            format!("{}/", entry.name)
        } else {
            entry.name.clone()
        };

        if self.use_colors && entry.kind == "directory" {
            style(name).blue().bold().to_string()
        } else if self.use_colors && entry.link_target.is_some() {
            style(name).cyan().to_string()
        } else {
            name
        }
    }

    fn write_field(&self, label: &str, value: &str) {
        let _ = self.term.write_line(&format!("  {label:<9} {value}"));
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_root(&self, info: &RootInfo) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        // Plain root on its own line keeps `arcfs root` usable in scripts.
        let _ = self.term.write_line(&info.root);

        if self.verbose {
            self.write_field("Archive:", &info.archive);
            self.write_field("Format:", &info.format);
            self.write_field("Type:", info.kind);
            self.write_field("Entries:", &Self::format_number(info.entries));
        }

        Ok(())
    }

    fn format_listing(
        &self,
        dir: &str,
        entries: &[ListingEntry],
        long: bool,
        human_readable: bool,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if !long {
            for entry in entries {
                let _ = self.term.write_line(&self.display_name(entry));
            }
            return Ok(());
        }

        let mut total_size = 0_u64;
        for entry in entries {
            total_size = total_size.saturating_add(entry.size);
            let size_str = if human_readable {
                Self::format_size(entry.size)
            } else {
                entry.size.to_string()
            };
            let target = entry
                .link_target
                .as_ref()
                .map_or_else(String::new, |t| format!(" -> {t}"));

            let _ = self.term.write_line(&format!(
                "{} {:>10}  {}{}",
                Self::type_char(entry.kind),
                size_str,
                self.display_name(entry),
                target
            ));
        }

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&format!(
            "{dir}: {} entries, {}",
            Self::format_number(entries.len()),
            Self::format_size(total_size)
        ));

        Ok(())
    }

    fn format_stat(&self, stat: &EntryStat) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.write_field("Path:", &stat.path);
        self.write_field("Type:", stat.kind);
        self.write_field(
            "Size:",
            &format!("{} ({} bytes)", Self::format_size(stat.size), stat.size),
        );
        if let Some(target) = &stat.link_target {
            self.write_field("Target:", target);
        }
        if self.verbose || stat.member_path != stat.path {
            self.write_field("Stored:", &stat.member_path);
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:?}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("WARNING: {message}"));
        }
    }
}
