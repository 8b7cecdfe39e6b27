use std::path::PathBuf;

use log::LevelFilter;
use simplelog::ColorChoice;
use simplelog::Config;
use simplelog::TerminalMode;
use structopt::StructOpt;

use crate::Result;

#[derive(StructOpt, Debug, Default)]
pub struct TrendOpt {
    /// Where to save the chart instead of the default file name
    #[structopt(short = "o", long = "output", parse(from_os_str))]
    pub output: Option<PathBuf>,
    /// Save the chart without opening a window
    #[structopt(long = "no-show")]
    pub no_show: bool,
    /// Also write readings and fitted currents as a tab-separated table (.gz compresses it)
    #[structopt(long = "export", parse(from_os_str))]
    pub export: Option<PathBuf>,
    /// More log output, repeat for trace level
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    pub verbose: u8,
}

impl TrendOpt {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn initialize_logging(&self) -> Result<()> {
        simplelog::TermLogger::init(
            self.log_level(),
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_keep_the_defaults() {
        let opt = TrendOpt::from_iter(&["carga-de-bancada"]);
        assert_eq!(opt.output, None);
        assert!(!opt.no_show);
        assert_eq!(opt.export, None);
        assert_eq!(opt.log_level(), LevelFilter::Info);
    }

    #[test]
    fn flags_are_parsed() {
        let opt = TrendOpt::from_iter(&[
            "lampada-incandescente",
            "-o",
            "out.png",
            "--no-show",
            "--export",
            "table.tsv.gz",
            "-vv",
        ]);
        assert_eq!(opt.output, Some(PathBuf::from("out.png")));
        assert!(opt.no_show);
        assert_eq!(opt.export, Some(PathBuf::from("table.tsv.gz")));
        assert_eq!(opt.log_level(), LevelFilter::Trace);
    }
}
