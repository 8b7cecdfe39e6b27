use iv_trend::experiment;
use iv_trend::options::TrendOpt;
use iv_trend::Experiment;
use iv_trend::Result;
use structopt::StructOpt;

fn main() -> Result<()> {
    let opt = TrendOpt::from_args();
    opt.initialize_logging()?;

    experiment::run(Experiment::IncandescentLamp, &opt)
}
