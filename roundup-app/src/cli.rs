use anyhow::{Result, bail};
use chrono::{Days, NaiveDate};
use roundup_core::TimeWindow;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "roundup", version, about = "Digest the most-engaged posts of a list")]
pub struct Cli {
    /// YAML configuration file; missing files fall back to env-only config.
    #[arg(long, short, env = "ROUNDUP_CONFIG", default_value = "roundup.yaml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive form (default).
    Tui,
    /// Produce one digest and print it to stdout.
    Digest(DigestArgs),
}

#[derive(Debug, Args)]
pub struct DigestArgs {
    /// List id or list URL.
    #[arg(long)]
    pub list: String,
    /// First day of the window (YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Last day of the window (YYYY-MM-DD), mapped to its midnight UTC.
    #[arg(long)]
    pub to: Option<NaiveDate>,
    /// Override `digest.top_k`.
    #[arg(long)]
    pub top_k: Option<usize>,
}

impl DigestArgs {
    /// Window for the run; missing dates default to the `lookback_days` ending `today`.
    pub fn window(&self, today: NaiveDate, lookback_days: u32) -> Result<TimeWindow> {
        let end = self.to.unwrap_or(today);
        let start = match self.from {
            Some(d) => d,
            None => match end.checked_sub_days(Days::new(u64::from(lookback_days))) {
                Some(d) => d,
                None => bail!("lookback of {lookback_days} days is out of range"),
            },
        };
        Ok(TimeWindow::from_dates(start, end)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use roundup_tui::DigestForm;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["roundup"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_digest_arguments() {
        let cli = Cli::try_parse_from([
            "roundup",
            "--config",
            "alt.yaml",
            "digest",
            "--list",
            "https://x.com/i/lists/42",
            "--from",
            "2024-01-01",
            "--to",
            "2024-01-08",
            "--top-k",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("alt.yaml"));
        let Some(Command::Digest(args)) = cli.command else {
            panic!("expected digest subcommand");
        };
        assert_eq!(args.list, "https://x.com/i/lists/42");
        assert_eq!(args.from, Some(day(2024, 1, 1)));
        assert_eq!(args.to, Some(day(2024, 1, 8)));
        assert_eq!(args.top_k, Some(5));
    }

    #[test]
    fn rejects_malformed_dates() {
        let parsed = Cli::try_parse_from(["roundup", "digest", "--list", "1", "--from", "01/02/2024"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn window_defaults_to_lookback_ending_today() {
        let args = DigestArgs {
            list: "1".into(),
            from: None,
            to: None,
            top_k: None,
        };
        let window = args.window(day(2024, 3, 10), 7).unwrap();
        assert_eq!(window.start().to_rfc3339(), "2024-03-03T00:00:00+00:00");
        assert_eq!(window.end().to_rfc3339(), "2024-03-10T00:00:00+00:00");
    }

    #[test]
    fn explicit_dates_win_over_defaults() {
        let args = DigestArgs {
            list: "1".into(),
            from: Some(day(2024, 2, 1)),
            to: Some(day(2024, 2, 2)),
            top_k: None,
        };
        let window = args.window(day(2024, 3, 10), 7).unwrap();
        assert_eq!(window.start().date_naive(), day(2024, 2, 1));
        assert_eq!(window.end().date_naive(), day(2024, 2, 2));
    }

    #[test]
    fn reversed_dates_are_rejected() {
        let args = DigestArgs {
            list: "1".into(),
            from: Some(day(2024, 2, 9)),
            to: Some(day(2024, 2, 2)),
            top_k: None,
        };
        assert!(args.window(day(2024, 3, 10), 7).is_err());
    }

    #[test]
    fn headless_and_form_windows_agree() {
        let today = day(2024, 2, 8);
        let args = DigestArgs {
            list: "42".into(),
            from: None,
            to: None,
            top_k: None,
        };
        let form_input = DigestForm::new(today, 7)
            .with_list_id("42")
            .validate()
            .unwrap();

        assert_eq!(args.window(today, 7).unwrap(), form_input.window().unwrap());
    }
}
